//! Chart rendering.

use std::path::PathBuf;

use super::{ChartData, ChartDef, ChartOptions, all_charts};
use crate::core::pipeline::ResultTables;
use crate::error::Result;

/// Turns chart data into an artifact on disk.
///
/// Implement this to plug in an image backend; the crate ships
/// [`CsvChartRenderer`].
pub trait ChartRenderer {
    /// Short name used in log lines, e.g. "CSV".
    fn name(&self) -> &'static str;

    /// Renders one chart and returns the path written.
    fn render(&self, chart: &ChartDef, data: &ChartData) -> Result<PathBuf>;
}

/// Writes each chart's data as `<dir>/<name>.csv`.
#[cfg(feature = "csv-output")]
#[derive(Debug, Clone)]
pub struct CsvChartRenderer {
    dir: PathBuf,
}

#[cfg(feature = "csv-output")]
impl CsvChartRenderer {
    /// Creates a renderer writing into `dir`, usually `<output>/charts`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(feature = "csv-output")]
impl ChartRenderer for CsvChartRenderer {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn render(&self, chart: &ChartDef, data: &ChartData) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.csv", chart.name));
        crate::core::output::write_csv(&data.rows, &path)?;
        Ok(path)
    }
}

/// Builds and renders every registered chart.
///
/// Charts whose required tables are empty, or whose data comes out empty,
/// are skipped. Returns the paths written, in registry order.
#[tracing::instrument(skip_all, fields(renderer = renderer.name()))]
pub fn render_charts(
    tables: &ResultTables,
    options: &ChartOptions,
    renderer: &dyn ChartRenderer,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for chart in all_charts() {
        if !chart.is_available(tables) {
            tracing::debug!(chart = chart.name, "skipping chart: required table is empty");
            continue;
        }
        let data = (chart.build)(tables, options);
        if data.is_empty() {
            tracing::debug!(chart = chart.name, "skipping chart: no data");
            continue;
        }
        written.push(renderer.render(chart, &data)?);
    }

    tracing::info!(charts = written.len(), "rendered charts");
    Ok(written)
}
