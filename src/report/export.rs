//! Spreadsheet export of transactions.

use crate::error::{ErrorType, Result};
use crate::model::Transaction;
use std::path::Path;

/// The name of the single worksheet in the exported workbook.
pub const SHEET_NAME: &str = "Transactions";

/// Writes `records` to an `.xlsx` workbook at `path`: a bold header row followed by one row per
/// transaction. Amounts are written as numbers. Returns the number of rows written.
#[cfg(feature = "xlsx")]
pub fn export_spreadsheet<'a, I>(records: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    use crate::error::IntoResult;
    use anyhow::Context;

    let rows = write_workbook(records, path)
        .with_context(|| format!("Unable to export the spreadsheet to {}", path.display()))
        .pub_result(ErrorType::Io)?;
    tracing::debug!("Exported {rows} transactions to {}", path.display());
    Ok(rows)
}

#[cfg(not(feature = "xlsx"))]
pub fn export_spreadsheet<'a, I>(_records: I, _path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    Err(crate::error::Error::new(
        ErrorType::MissingDependency,
        "Spreadsheet export is not available in this build. Rebuild with `--features xlsx` to \
        enable it.",
    ))
}

#[cfg(feature = "xlsx")]
fn write_workbook<'a, I>(records: I, path: &Path) -> crate::error::Res<usize>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    use crate::model::{headers, DATE_FORMAT};
    use rust_xlsxwriter::{Format, Workbook};

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;
    for (col, header) in headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    let mut rows = 0;
    for (ix, t) in records.into_iter().enumerate() {
        let row = (ix + 1) as u32;
        worksheet.write_string(row, 0, t.date().format(DATE_FORMAT).to_string())?;
        worksheet.write_number_with_format(row, 1, t.amount().to_f64(), &amount_format)?;
        worksheet.write_string(row, 2, t.description())?;
        worksheet.write_string(row, 3, t.category())?;
        worksheet.write_string(row, 4, t.account())?;
        worksheet.write_string(row, 5, t.user())?;
        rows += 1;
    }
    worksheet.set_column_width(2, 30)?;

    workbook.save(path)?;
    Ok(rows)
}
