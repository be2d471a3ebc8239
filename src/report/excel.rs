use std::path::Path;

use log::info;
use rust_xlsxwriter::{ColNum, Format, FormatAlign, RowNum, Workbook, Worksheet};

use crate::error::{Error, Result};

use super::{Cell, Column, ReportRow, COLUMNS};

pub const SHEET_NAME: &str = "Threads 貼文";
const MAX_COLUMN_WIDTH: f64 = 80.0;

/// Write `rows` to a new workbook at `path`, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn export_excel(rows: &[ReportRow], path: &Path) -> Result<usize> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    write_sheet(worksheet, rows)?;

    workbook.save(path).map_err(|source| Error::ExportConflict {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Excel exported: {} rows -> {}", rows.len(), path.display());
    Ok(rows.len())
}

fn write_sheet(worksheet: &mut Worksheet, rows: &[ReportRow]) -> Result<()> {
    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let centered = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let wrapped = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    let mut widths: Vec<usize> = COLUMNS.iter().map(|(_, title)| title.chars().count()).collect();

    for (col, (_, title)) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, *title, &header)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as RowNum;
        for (col, (cell, (column, _))) in row.cells().into_iter().zip(COLUMNS.iter()).enumerate() {
            let format = match column {
                Column::Text => &wrapped,
                _ => &centered,
            };
            widths[col] = widths[col].max(cell.width());

            let col = col as ColNum;
            match cell {
                Cell::Text(text) => worksheet.write_string_with_format(row_num, col, text, format)?,
                Cell::Number(number) => {
                    worksheet.write_number_with_format(row_num, col, number as f64, format)?
                }
                Cell::Blank => worksheet.write_blank(row_num, col, format)?,
            };
        }
    }

    for (col, width) in widths.into_iter().enumerate() {
        worksheet.set_column_width(col as ColNum, column_width(width))?;
    }

    Ok(())
}

/// Sheet width for a column whose longest value has `chars` characters
fn column_width(chars: usize) -> f64 {
    (chars as f64 * 1.6 + 2.0).min(MAX_COLUMN_WIDTH)
}
