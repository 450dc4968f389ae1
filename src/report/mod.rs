//! Report artifacts rendered from ledger data: a category bar chart and a spreadsheet export.
//!
//! Each adapter is behind a cargo feature. When a feature is compiled out, its function returns an
//! `ErrorType::MissingDependency` error explaining how to enable it.

mod chart;
mod export;

pub use chart::{render_category_chart, show};
pub use export::{export_spreadsheet, SHEET_NAME};
