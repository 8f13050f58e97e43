//! Inventory spreadsheet export.
//!
//! [`build_inventory_export`] filters items with the shared stock
//! classification and lays them out on a data sheet plus a `Summary` sheet.
//! Serialization is delegated to `rust_xlsxwriter`.

use labstock_core::inventory::{ExportFilter, PrimaryStatus};
use labstock_core::types::Timestamp;
use labstock_db::models::inventory::InventoryItem;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};

/// MIME type of an `.xlsx` workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Column headers of the data sheet, in order.
pub const DATA_HEADERS: [&str; 18] = [
    "Item Name",
    "Category",
    "Sub Category",
    "Location",
    "Manufacturer",
    "Supplier",
    "Model",
    "Unit of Measurement",
    "Catalogue Number",
    "Current Quantity",
    "Target Stock Level",
    "Reorder Level",
    "Validity Date",
    "Use Case",
    "Status",
    "Added By",
    "Created Date",
    "Last Updated",
];

/// Data sheet columns are never wider than this many characters.
pub const MAX_COLUMN_WIDTH: usize = 50;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A serialized export ready to be sent as a download.
#[derive(Debug)]
pub struct InventoryExport {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Number of data rows (header excluded).
    pub row_count: usize,
}

/// Per-status counts over the exported rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub in_stock: usize,
    pub zero_stock: usize,
    pub low_stock: usize,
    pub expiring_soon: usize,
    pub expired: usize,
}

impl StatusCounts {
    fn record(&mut self, status: PrimaryStatus) {
        match status {
            PrimaryStatus::InStock => self.in_stock += 1,
            PrimaryStatus::ZeroStock => self.zero_stock += 1,
            PrimaryStatus::LowStock => self.low_stock += 1,
            PrimaryStatus::ExpiringSoon => self.expiring_soon += 1,
            PrimaryStatus::Expired => self.expired += 1,
        }
    }
}

/// One cell of the export grid.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(i64),
}

impl Cell {
    fn width(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            Cell::Number(n) => n.to_string().len(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(n.into())
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or_else(|_| Cell::Text(n.to_string()), Cell::Number)
    }
}

/// `inventory_export[_<filter>]_<YYYYmmdd_HHMMSS>.xlsx`
pub fn export_filename(filter: ExportFilter, at: Timestamp) -> String {
    let stamp = at.format("%Y%m%d_%H%M%S");
    match filter {
        ExportFilter::All => format!("inventory_export_{stamp}.xlsx"),
        other => format!("inventory_export_{}_{stamp}.xlsx", other.as_str()),
    }
}

/// `Inventory` for the unfiltered export, `Inventory_<Filter Title>` otherwise.
pub fn data_sheet_name(filter: ExportFilter) -> String {
    match filter {
        ExportFilter::All => "Inventory".to_string(),
        other => format!("Inventory_{}", other.title()),
    }
}

/// Build the export workbook for `items` under `filter`, classified at `now`.
pub fn build_inventory_export(
    items: &[InventoryItem],
    filter: ExportFilter,
    now: Timestamp,
    exported_by: &str,
) -> Result<InventoryExport, XlsxError> {
    let mut counts = StatusCounts::default();
    let rows: Vec<Vec<Cell>> = items
        .iter()
        .filter_map(|item| {
            let flags = item.flags(now);
            filter.matches(&flags).then(|| {
                let status = flags.primary_status();
                counts.record(status);
                item_row(item, status)
            })
        })
        .collect();
    let row_count = rows.len();

    let mut data = Worksheet::new();
    data.set_name(data_sheet_name(filter))?;
    let headers: Vec<Cell> = DATA_HEADERS.iter().map(|h| Cell::from(*h)).collect();
    write_grid(&mut data, &headers, &rows, Some(MAX_COLUMN_WIDTH))?;

    let summary_rows: Vec<Vec<Cell>> = vec![
        vec!["Filter Applied".into(), filter.title().into()],
        vec!["Total Items".into(), row_count.into()],
        vec!["In Stock".into(), counts.in_stock.into()],
        vec!["Zero Stock".into(), counts.zero_stock.into()],
        vec!["Low Stock".into(), counts.low_stock.into()],
        vec!["Expiring Soon".into(), counts.expiring_soon.into()],
        vec!["Expired".into(), counts.expired.into()],
        vec!["Export Date".into(), now.format(DATETIME_FORMAT).to_string().into()],
        vec!["Exported By".into(), exported_by.into()],
    ];
    let mut summary = Worksheet::new();
    summary.set_name("Summary")?;
    write_grid(
        &mut summary,
        &["Metric".into(), "Value".into()],
        &summary_rows,
        None,
    )?;

    let mut workbook = Workbook::new();
    workbook.push_worksheet(data);
    workbook.push_worksheet(summary);

    Ok(InventoryExport {
        filename: export_filename(filter, now),
        bytes: workbook.save_to_buffer()?,
        row_count,
    })
}

/// Write a bold header row and data rows, then size every column to its
/// longest cell plus two, optionally capped at `max_width`.
fn write_grid(
    sheet: &mut Worksheet,
    headers: &[Cell],
    rows: &[Vec<Cell>],
    max_width: Option<usize>,
) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    let mut widths = vec![0usize; headers.len()];

    let all_rows = std::iter::once(headers).chain(rows.iter().map(Vec::as_slice));
    for (row_idx, row) in all_rows.enumerate() {
        let r = row_idx as RowNum;
        for (col_idx, cell) in row.iter().enumerate() {
            let c = col_idx as ColNum;
            match (cell, row_idx == 0) {
                (Cell::Text(text), true) => sheet.write_string_with_format(r, c, text, &bold)?,
                (Cell::Text(text), false) => sheet.write_string(r, c, text)?,
                (Cell::Number(n), _) => sheet.write_number(r, c, *n as f64)?,
            };
            if let Some(width) = widths.get_mut(col_idx) {
                *width = (*width).max(cell.width());
            }
        }
    }

    for (col_idx, longest) in widths.into_iter().enumerate() {
        let width = longest + 2;
        let width = max_width.map_or(width, |cap| width.min(cap));
        sheet.set_column_width(col_idx as ColNum, width as f64)?;
    }
    Ok(())
}

fn item_row(item: &InventoryItem, status: PrimaryStatus) -> Vec<Cell> {
    let validity = item
        .validity
        .map_or_else(|| "N/A".to_string(), |v| v.format(DATE_FORMAT).to_string());

    vec![
        item.item_name.as_str().into(),
        item.category.as_str().into(),
        item.sub_category.as_deref().unwrap_or("").into(),
        item.location.as_str().into(),
        item.manufacturer.as_str().into(),
        item.supplier.as_str().into(),
        item.model.as_str().into(),
        item.uom.as_str().into(),
        item.catalogue_no.as_str().into(),
        item.quantity.into(),
        item.target_stock_level.into(),
        item.reorder_level.into(),
        validity.into(),
        item.use_case.as_str().into(),
        status.label().into(),
        item.added_by.as_str().into(),
        item.created_at.format(DATETIME_FORMAT).to_string().into(),
        item.updated_at.format(DATETIME_FORMAT).to_string().into(),
    ]
}
