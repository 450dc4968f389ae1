//! Chart and spreadsheet commands.

use crate::commands::{plural, Out};
use crate::error::Result;
use crate::query::{self, Summary};
use crate::store::Ledger;
use crate::{report, Config};
use std::path::PathBuf;

/// Draws the per-category bar chart of `user`'s transactions to the configured chart path, then
/// tries to open it in a viewer unless `open_chart` is off in the config. If `user` has no
/// transactions nothing is drawn.
///
/// # Errors
/// - `ErrorType::Validation` if the totals are too large to represent.
/// - `ErrorType::MissingDependency` if the `chart` feature is compiled out.
/// - `ErrorType::Io` if the image cannot be written.
pub fn chart(config: &Config, ledger: &Ledger, user: &str) -> Result<Out<PathBuf>> {
    let summary = query::summarize(query::by_user(ledger.records(), user))?;
    let aggregate = match &summary {
        Summary::Empty => return Ok("Nothing to chart".into()),
        Summary::Totals(aggregate) => aggregate,
    };

    let path = config.chart_path();
    report::render_category_chart(aggregate, &path)?;
    let shown = config.open_chart() && report::show(&path);
    let message = format!(
        "Saved a chart of {} to {}{}",
        plural(aggregate.categories().len(), "category", "categories"),
        path.display(),
        if shown { " and opened it" } else { "" }
    );
    Ok(Out::new(message, path))
}

/// Writes `user`'s transactions to the configured spreadsheet path.
///
/// # Errors
/// - `ErrorType::MissingDependency` if the `xlsx` feature is compiled out.
/// - `ErrorType::Io` if the workbook cannot be written.
pub fn export(config: &Config, ledger: &Ledger, user: &str) -> Result<Out<PathBuf>> {
    let path = config.export_path();
    let rows = report::export_spreadsheet(query::by_user(ledger.records(), user), &path)?;
    let message = format!(
        "Exported {} to {}",
        plural(rows, "transaction", "transactions"),
        path.display()
    );
    Ok(Out::new(message, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_chart_nothing_to_chart() {
        let env = TestEnv::new();
        env.add("2024-01-05", "50", "groceries", "bob");
        let out = chart(env.config(), &env.ledger(), "alice").unwrap();
        assert_eq!(out.message(), "Nothing to chart");
        assert!(out.structure().is_none());
        assert!(!env.config().chart_path().exists());
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_chart_writes_image() {
        let env = TestEnv::new();
        env.add("2024-01-05", "50", "groceries", "alice");
        env.add("2024-01-06", "15", "dining", "alice");
        let out = chart(env.config(), &env.ledger(), "alice").unwrap();
        let path = out.structure().unwrap();
        assert_eq!(path, &env.config().chart_path());
        assert!(path.is_file());
        assert!(out.message().starts_with("Saved a chart of 2 categories"));
        // The test ledger home turns the viewer off
        assert!(!out.message().ends_with("and opened it"));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_export_writes_workbook() {
        let env = TestEnv::new();
        env.add("2024-01-05", "50", "groceries", "alice");
        env.add("2024-01-06", "15", "dining", "bob");
        let out = export(env.config(), &env.ledger(), "alice").unwrap();
        assert!(out.structure().unwrap().is_file());
        assert!(out.message().starts_with("Exported 1 transaction to"));
    }

    #[cfg(not(feature = "xlsx"))]
    #[test]
    fn test_export_missing_dependency() {
        let env = TestEnv::new();
        let err = export(env.config(), &env.ledger(), "alice").unwrap_err();
        assert_eq!(
            err.error_type(),
            crate::error::ErrorType::MissingDependency
        );
    }
}
