//! Bar chart of per-category totals.

use crate::error::{ErrorType, Result};
use crate::query::Aggregate;
use std::path::Path;

/// Draws one bar per category of `aggregate` and writes the chart as an SVG image to `path`.
#[cfg(feature = "chart")]
pub fn render_category_chart(aggregate: &Aggregate, path: &Path) -> Result<()> {
    use crate::error::IntoResult;
    use anyhow::Context;

    draw(aggregate, path)
        .with_context(|| format!("Unable to draw the chart to {}", path.display()))
        .pub_result(ErrorType::Io)?;
    tracing::debug!(
        "Drew {} categories to {}",
        aggregate.categories().len(),
        path.display()
    );
    Ok(())
}

#[cfg(not(feature = "chart"))]
pub fn render_category_chart(_aggregate: &Aggregate, _path: &Path) -> Result<()> {
    Err(crate::error::Error::new(
        ErrorType::MissingDependency,
        "Charts are not available in this build. Rebuild with `--features chart` to enable them.",
    ))
}

#[cfg(feature = "chart")]
fn draw(aggregate: &Aggregate, path: &Path) -> crate::error::Res<()> {
    use plotters::prelude::*;

    let labels: Vec<String> = aggregate
        .categories()
        .iter()
        .map(|c| c.category().to_string())
        .collect();
    let values: Vec<f64> = aggregate
        .categories()
        .iter()
        .map(|c| c.amount().to_f64())
        .collect();
    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, (1024, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Spending by Category", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0.0..top)?;

    let label_of = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(ix) => labels.get(*ix).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&label_of)
        .x_desc("Category")
        .y_desc("Amount")
        .y_label_formatter(&|y| format!("{y:.2}"))
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(ix, value)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(ix), 0.0),
                (SegmentValue::Exact(ix + 1), *value),
            ],
            BLUE.mix(0.7).filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    root.present()?;
    Ok(())
}

/// Opens `path` in the platform's default viewer, if there seems to be a display to show it on.
/// Returns true if a viewer was launched.
pub fn show(path: &Path) -> bool {
    let Some(mut command) = viewer_command(path) else {
        tracing::debug!("No display available, not opening {}", path.display());
        return false;
    };
    match command.spawn() {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Unable to open {} in a viewer: {e}", path.display());
            false
        }
    }
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Option<std::process::Command> {
    let mut command = std::process::Command::new("open");
    command.arg(path);
    Some(command)
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Option<std::process::Command> {
    let mut command = std::process::Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    Some(command)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Option<std::process::Command> {
    let has_display = ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()));
    if !has_display {
        return None;
    }
    let mut command = std::process::Command::new("xdg-open");
    command
        .arg(path)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null());
    Some(command)
}
