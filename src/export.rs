//! Spreadsheet export of a view.

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::models::{ClientRecord, COLUMNS};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Clients";
/// Header fill, RGB.
pub const HEADER_COLOR: u32 = 0xD7E4BC;
pub const COLUMN_WIDTH: f64 = 20.0;

/// `clients_YYYY-MM-DD.xlsx`
pub fn export_filename(date: NaiveDate) -> String {
    format!("clients_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Render the rows, in the order given, as a one-sheet xlsx workbook.
pub fn export_view(view: &[&ClientRecord]) -> Result<Vec<u8>> {
    build_workbook(view).map_err(|e| ExportError::Workbook(e).into())
}

fn build_workbook(view: &[&ClientRecord]) -> std::result::Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(HEADER_COLOR));

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, name, &header)?;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (row, record) in (1u32..).zip(view) {
        sheet.write_string(row, 0, record.service_date.format("%Y-%m-%d").to_string())?;
        sheet.write_string(row, 1, &record.company)?;
        sheet.write_string(row, 2, &record.tax_id)?;
        sheet.write_number(row, 3, record.duration_days)?;
        sheet.write_string(row, 4, record.has_driver.as_str())?;
        sheet.write_number(row, 5, record.price)?;
        sheet.write_string(row, 6, &record.contact_name)?;
        sheet.write_string(row, 7, record.email.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 8, record.phone.as_deref().unwrap_or(""))?;
        sheet.write_number(row, 9, record.credit_score)?;
        sheet.write_number(row, 10, record.worker_count)?;
        sheet.write_string(row, 11, record.client_type.as_str())?;
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(rows = view.len(), bytes = bytes.len(), "workbook built");
    Ok(bytes)
}
