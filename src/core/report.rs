use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::types::config::ReportFormat;
use crate::types::{AggregateResult, AppResult};

pub const CSV_HEADER: &str =
    "registrations,avg_compile_time,min_compile_time,max_compile_time,avg_binary_size,iterations";

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub compiler: &'a str,
    pub family: &'a str,
    pub standard: &'a str,
    pub optimization: &'a str,
    pub results: &'a [AggregateResult],
    pub marginal_cost_per_registration: Option<f64>,
}

/// Describes the toolchain a report was produced with
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub compiler: &'a str,
    pub family: &'a str,
    pub standard: &'a str,
    pub optimization: &'a str,
}

/// Estimated extra compile seconds per registration.
///
/// Only defined when there are at least two results, the first is the zero
/// registration baseline and the last has a larger count.
pub fn marginal_cost(results: &[AggregateResult]) -> Option<f64> {
    let (first, last) = match results {
        [first, .., last] => (first, last),
        _ => return None,
    };
    if first.registrations != 0 || last.registrations <= first.registrations {
        return None;
    }
    let time_diff = last.avg_compile_time - first.avg_compile_time;
    let regs_diff = (last.registrations - first.registrations) as f64;
    Some(time_diff / regs_diff)
}

pub fn render_csv(results: &[AggregateResult]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for r in results {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            r.registrations,
            r.avg_compile_time,
            r.min_compile_time,
            r.max_compile_time,
            r.avg_binary_size,
            r.iterations
        ));
    }
    out
}

pub fn render_json(results: &[AggregateResult], context: ReportContext<'_>) -> AppResult<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        compiler: context.compiler,
        family: context.family,
        standard: context.standard,
        optimization: context.optimization,
        results,
        marginal_cost_per_registration: marginal_cost(results),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn write_report(
    path: &Path,
    format: ReportFormat,
    results: &[AggregateResult],
    context: ReportContext<'_>,
) -> AppResult<()> {
    let contents = match format {
        ReportFormat::Csv => render_csv(results),
        ReportFormat::Json => render_json(results, context)?,
    };
    fs::write(path, contents)?;
    Ok(())
}

pub fn print_summary(results: &[AggregateResult]) {
    info!("");
    info!("Summary:");
    info!(
        "{:<15} {:<15} {:<20}",
        "Registrations", "Avg Time (s)", "Binary Size (KB)"
    );
    info!("{}", "-".repeat(50));
    for r in results {
        info!(
            "{:<15} {:<15.3} {:<20.1}",
            r.registrations,
            r.avg_compile_time,
            r.avg_binary_size / 1024.0
        );
    }

    match marginal_cost(results) {
        Some(cost) => {
            info!("");
            info!(
                "Estimated overhead per registration: {:.3} ms",
                cost * 1000.0
            );
        }
        None if !results.is_empty() => info!(
            "Overhead per registration not estimated (needs a 0-registration baseline first and a larger count last)"
        ),
        None => info!("No configuration produced a successful build"),
    }
}
