// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::model::ExportRow;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// XLSX with a styled header, banded rows and auto-sized columns.
pub(crate) fn export_xlsx<T: ExportRow>(
    rows: &[T],
    sheet_name: &str,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    if rows.is_empty() {
        worksheet.write(0, 0, "No data available")?;
        workbook.save(path)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    // ---------------------------
    // Header
    // ---------------------------
    let headers = T::headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, item) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in item.to_row().iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band_color)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    workbook.save(path)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Dates become Excel dates, numbers stay numeric, everything else is text.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some(serial) = excel_date_serial(s) {
        let fmt = base.set_num_format("yyyy-mm-dd");
        ws.write_with_format(row, col, serial, &fmt)?;
    } else if let Ok(num) = s.parse::<f64>() {
        let fmt = base.set_align(FormatAlign::Right);
        ws.write_with_format(row, col, num, &fmt)?;
    } else {
        ws.write_with_format(row, col, s, &base)?;
    }
    Ok(())
}

/// Days since 1899-12-30 for a `YYYY-MM-DD` string.
fn excel_date_serial(s: &str) -> Option<f64> {
    if s.len() != 10 {
        return None;
    }
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - epoch).num_days() as f64)
}

#[cfg(test)]
mod tests {
    use super::excel_date_serial;

    #[test]
    fn serial_of_known_dates() {
        assert_eq!(excel_date_serial("1900-01-01"), Some(2.0));
        assert_eq!(excel_date_serial("2024-06-10"), Some(45453.0));
        assert_eq!(excel_date_serial("08:00"), None);
    }
}
