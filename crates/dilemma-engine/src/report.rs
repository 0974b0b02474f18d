//! Report output: one log line per scenario and an optional JSON file.

use std::path::Path;

use dilemma_core::trials::ScenarioReport;
use dilemma_types::Skew;
use tracing::info;

use crate::error::EngineError;

/// Log the averaged start and end state of a scenario.
pub fn log_report(report: &ScenarioReport) {
    info!(
        scenario = ?report.scenario,
        description = report.scenario.description(),
        trials = report.trials,
        population = report.population,
        start_mean = report.start.mean,
        start_median = report.start.median,
        start_max = report.start.max,
        start_min = report.start.min,
        end_mean = report.end.mean,
        end_median = report.end.median,
        end_max = report.end.max,
        end_min = report.end.min,
        total_deaths = report.total_deaths,
        "Scenario complete"
    );

    match report.skew {
        Skew::Left => info!(scenario = ?report.scenario, "Median > mean, could be skewed left"),
        Skew::Right => info!(scenario = ?report.scenario, "Median < mean, could be skewed right"),
        Skew::None => {}
    }
}

/// Write every report to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`EngineError::Serialize`] if encoding fails or
/// [`EngineError::Write`] if the file cannot be written.
pub fn write_reports(path: &Path, reports: &[ScenarioReport]) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, json).map_err(|source| EngineError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), reports = reports.len(), "Report written");
    Ok(())
}
