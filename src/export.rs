//! Tabular export of computed results.
//!
//! Produces the rows consumed by CSV and report collaborators. The core only
//! shapes the data; it never opens files or chooses destinations.

use std::io::Write;

use csv::Writer;
use thiserror::Error;

use crate::models::soil::gradation::{DValues, ParticleDistribution};
use crate::models::soil::uscs::{ClassificationInput, ClassificationResult};

/// Errors raised while writing export tables.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output")]
    Io(#[from] std::io::Error),
}

/// D-value table rows: `(parameter, value in mm or "N/A")`.
pub fn d_value_rows(d_values: &DValues) -> Vec<(&'static str, String)> {
    d_values
        .labelled()
        .into_iter()
        .map(|(label, value)| (label, format_optional(value)))
        .collect()
}

/// Particle-distribution table rows: `(category label, percentage)`.
pub fn distribution_rows(distribution: &ParticleDistribution) -> Vec<(&'static str, f64)> {
    distribution
        .iter()
        .map(|(category, percent)| (category.label(), percent))
        .collect()
}

/// Writes the D-value table as CSV with a header row.
///
/// # Errors
///
/// Returns an [`ExportError`] if the underlying writer fails.
pub fn write_d_values_csv<W: Write>(writer: W, d_values: &DValues) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["Parameter", "Value (mm)"])?;
    for (label, value) in d_value_rows(d_values) {
        csv.write_record([label, value.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the particle-distribution table as CSV with a header row.
///
/// # Errors
///
/// Returns an [`ExportError`] if the underlying writer fails.
pub fn write_distribution_csv<W: Write>(
    writer: W,
    distribution: &ParticleDistribution,
) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["Category", "Percentage"])?;
    for (label, percent) in distribution_rows(distribution) {
        let percent = format!("{percent:.2}");
        csv.write_record([label, percent.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Renders the classification outcome as a flat key/value text block.
pub fn classification_report(
    input: &ClassificationInput,
    result: &ClassificationResult,
) -> String {
    let lines = [
        ("USCS Symbol", result.symbol.clone()),
        ("Description", result.short_description.clone()),
        ("Detailed Description", result.detailed_description.clone()),
        ("Coefficient of Uniformity", format_optional(input.cu())),
        ("Coefficient of Curvature", format_optional(input.cc())),
        (
            "% Passing No. 200 Sieve",
            format!("{:.1}", input.percent_fines()),
        ),
    ];
    lines
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}\n"))
        .collect()
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}
