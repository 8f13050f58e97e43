//! Withdrawal request lifecycle.
//!
//! ```text
//! pending --approve--> approved   (terminal)
//! pending --reject---> rejected   (terminal)
//! ```
//!
//! Status values are stored as text; these must match the
//! `ck_withdrawal_requests_status` check constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// Maximum length of the free-text purpose on a request.
pub const MAX_PURPOSE_LENGTH: usize = 2_000;

/// Maximum length of an admin decision comment.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => STATUS_PENDING,
            RequestStatus::Approved => STATUS_APPROVED,
            RequestStatus::Rejected => STATUS_REJECTED,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(RequestStatus::Pending),
            STATUS_APPROVED => Ok(RequestStatus::Approved),
            STATUS_REJECTED => Ok(RequestStatus::Rejected),
            other => Err(CoreError::Internal(format!(
                "Unknown withdrawal request status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessAction {
    Approve,
    Reject,
}

impl ProcessAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessAction::Approve => "approve",
            ProcessAction::Reject => "reject",
        }
    }

    /// The status a pending request moves to under this action.
    pub fn target_status(self) -> RequestStatus {
        match self {
            ProcessAction::Approve => RequestStatus::Approved,
            ProcessAction::Reject => RequestStatus::Rejected,
        }
    }
}

impl FromStr for ProcessAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ProcessAction::Approve),
            "reject" => Ok(ProcessAction::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid action '{other}'. Must be one of: approve, reject"
            ))),
        }
    }
}

/// Compute the next status for `action`, or fail if `current` is terminal.
pub fn transition(current: RequestStatus, action: ProcessAction) -> Result<RequestStatus, CoreError> {
    if current.is_terminal() {
        return Err(CoreError::InvalidState(format!(
            "Request already processed (status: {current})"
        )));
    }
    Ok(action.target_status())
}

/// Validate the requested quantity: a strictly positive `i32`.
pub fn validate_requested_quantity(quantity: i64) -> Result<i32, CoreError> {
    if quantity <= 0 {
        return Err(CoreError::Validation(format!(
            "requested_quantity must be a positive integer, got {quantity}"
        )));
    }
    i32::try_from(quantity).map_err(|_| {
        CoreError::Validation(format!("requested_quantity is too large, got {quantity}"))
    })
}

/// Validate the purpose text on a new request.
pub fn validate_purpose(purpose: &str) -> Result<(), CoreError> {
    if purpose.trim().is_empty() {
        return Err(CoreError::Validation("purpose must not be empty".into()));
    }
    if purpose.chars().count() > MAX_PURPOSE_LENGTH {
        return Err(CoreError::Validation(format!(
            "purpose must be at most {MAX_PURPOSE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional admin comment.
pub fn validate_comment(comment: Option<&str>) -> Result<(), CoreError> {
    match comment {
        Some(c) if c.chars().count() > MAX_COMMENT_LENGTH => Err(CoreError::Validation(format!(
            "comments must be at most {MAX_COMMENT_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}

/// The conflict reported when an item holds less than was requested.
pub fn insufficient_stock(available: i32, requested: i32) -> CoreError {
    CoreError::Conflict(format!(
        "Insufficient stock. Available: {available}, Requested: {requested}"
    ))
}
