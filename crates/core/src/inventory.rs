//! Inventory stock rules: count validation, status classification and
//! export filters.
//!
//! [`classify`] is the single source of truth for the stock tags shown in
//! the dashboard, the inventory list and the spreadsheet export. The SQL
//! predicates in the dashboard repository mirror it one-for-one.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Days ahead of `now` within which an item counts as expiring soon.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Maximum length for short descriptive fields (name, category, location...).
pub const MAX_TEXT_FIELD_LENGTH: usize = 255;

/* --------------------------------------------------------------------------
Stock count input
-------------------------------------------------------------------------- */

/// A stock count as submitted by a client.
///
/// Browser forms post numeric fields as strings, so both `10` and `"10"`
/// are accepted. Use [`StockInput::into_count`] to obtain a validated value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StockInput {
    Number(i64),
    Text(String),
}

impl StockInput {
    /// Coerce into a non-negative `i32`, naming `field` in any error.
    pub fn into_count(self, field: &str) -> Result<i32, CoreError> {
        let value = match self {
            StockInput::Number(n) => n,
            StockInput::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                CoreError::Validation(format!("{field} must be a whole number, got '{s}'"))
            })?,
        };
        validate_stock_count(field, value)
    }
}

/// Validate that a stock count is within `0..=i32::MAX`.
pub fn validate_stock_count(field: &str, value: i64) -> Result<i32, CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    i32::try_from(value)
        .map_err(|_| CoreError::Validation(format!("{field} is too large, got {value}")))
}

/// Validate a required free-text field: non-blank and within length limits.
pub fn validate_required_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_text_length(field, value)
}

/// Validate that a text field does not exceed [`MAX_TEXT_FIELD_LENGTH`].
pub fn validate_text_length(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_TEXT_FIELD_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TEXT_FIELD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Parse a client-supplied expiry date.
///
/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date, which is taken
/// as midnight UTC. A blank string means "no expiry".
pub fn parse_validity(raw: &str) -> Result<Option<Timestamp>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "validity must be an RFC 3339 timestamp or YYYY-MM-DD date, got '{raw}'"
            ))
        })
}

/* --------------------------------------------------------------------------
Classification
-------------------------------------------------------------------------- */

/// The stock-relevant fields of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevels {
    pub quantity: i32,
    pub reorder_level: i32,
    pub target_stock_level: i32,
    pub validity: Option<Timestamp>,
}

/// Every stock condition that holds for an item at a given instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockFlags {
    /// `quantity == 0`.
    pub zero_stock: bool,
    /// `quantity <= reorder_level`.
    pub low_stock: bool,
    /// `quantity < reorder_level`.
    pub below_reorder: bool,
    /// `quantity < target_stock_level`.
    pub below_target: bool,
    /// `validity < now`.
    pub expired: bool,
    /// `now <= validity <= now + 30 days`.
    pub expiring_soon: bool,
}

/// Classify an item's stock levels relative to `now`.
pub fn classify(levels: &StockLevels, now: Timestamp) -> StockFlags {
    let horizon = now + Duration::days(EXPIRY_WINDOW_DAYS);
    let (expired, expiring_soon) = match levels.validity {
        Some(validity) => (validity < now, validity >= now && validity <= horizon),
        None => (false, false),
    };

    StockFlags {
        zero_stock: levels.quantity == 0,
        low_stock: levels.quantity <= levels.reorder_level,
        below_reorder: levels.quantity < levels.reorder_level,
        below_target: levels.quantity < levels.target_stock_level,
        expired,
        expiring_soon,
    }
}

/// The single status shown for an item when only one fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimaryStatus {
    Expired,
    ZeroStock,
    ExpiringSoon,
    LowStock,
    InStock,
}

impl PrimaryStatus {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryStatus::Expired => "Expired",
            PrimaryStatus::ZeroStock => "Zero Stock",
            PrimaryStatus::ExpiringSoon => "Expiring Soon",
            PrimaryStatus::LowStock => "Low Stock",
            PrimaryStatus::InStock => "In Stock",
        }
    }
}

impl fmt::Display for PrimaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl StockFlags {
    /// Pick the most severe status: expired, then zero stock, then expiring
    /// soon, then low stock.
    pub fn primary_status(&self) -> PrimaryStatus {
        if self.expired {
            PrimaryStatus::Expired
        } else if self.zero_stock {
            PrimaryStatus::ZeroStock
        } else if self.expiring_soon {
            PrimaryStatus::ExpiringSoon
        } else if self.low_stock {
            PrimaryStatus::LowStock
        } else {
            PrimaryStatus::InStock
        }
    }

    /// Display tags, most severe first.
    ///
    /// Zero stock supersedes the low-stock and below-reorder tags; expired and
    /// expiring-soon never co-occur.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.expired {
            tags.push("expired");
        }
        if self.zero_stock {
            tags.push("zero_stock");
        } else {
            if self.below_reorder {
                tags.push("below_reorder");
            }
            if self.low_stock {
                tags.push("low_stock");
            }
        }
        if self.expiring_soon {
            tags.push("expiring_soon");
        }
        if self.below_target {
            tags.push("below_target");
        }
        tags
    }
}

/* --------------------------------------------------------------------------
Export filters
-------------------------------------------------------------------------- */

/// Row filter accepted by the spreadsheet export (`?filter=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFilter {
    #[default]
    All,
    LowStock,
    ZeroStock,
    BelowReorder,
    BelowTarget,
    ExpiringSoon,
    Expired,
}

/// All filters in the order they are documented.
pub const EXPORT_FILTERS: &[ExportFilter] = &[
    ExportFilter::All,
    ExportFilter::LowStock,
    ExportFilter::ZeroStock,
    ExportFilter::BelowReorder,
    ExportFilter::BelowTarget,
    ExportFilter::ExpiringSoon,
    ExportFilter::Expired,
];

impl ExportFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFilter::All => "all",
            ExportFilter::LowStock => "low_stock",
            ExportFilter::ZeroStock => "zero_stock",
            ExportFilter::BelowReorder => "below_reorder",
            ExportFilter::BelowTarget => "below_target",
            ExportFilter::ExpiringSoon => "expiring_soon",
            ExportFilter::Expired => "expired",
        }
    }

    /// Human title, e.g. `low_stock` -> `Low Stock`.
    pub fn title(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether an item with the given flags belongs in the export.
    pub fn matches(self, flags: &StockFlags) -> bool {
        match self {
            ExportFilter::All => true,
            ExportFilter::LowStock => flags.low_stock,
            ExportFilter::ZeroStock => flags.zero_stock,
            ExportFilter::BelowReorder => flags.below_reorder,
            ExportFilter::BelowTarget => flags.below_target,
            ExportFilter::ExpiringSoon => flags.expiring_soon,
            ExportFilter::Expired => flags.expired,
        }
    }
}

impl FromStr for ExportFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EXPORT_FILTERS
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = EXPORT_FILTERS.iter().map(|f| f.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid export filter '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

impl fmt::Display for ExportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
