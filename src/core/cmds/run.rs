use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use log::{info, warn};

use crate::ToolchainRegistry;
use crate::core::cmds::resolve_toolchain_spec;
use crate::core::report::{ReportContext, print_summary, write_report};
use crate::core::runner::BuildExecutor;
use crate::core::sweep::{SweepSummary, run_sweep};
use crate::core::synth::SourceSynthesizer;
use crate::types::AppResult;
use crate::types::config::config;

pub async fn execute_run(
    running: Arc<AtomicBool>,
    registry: Arc<ToolchainRegistry>,
) -> AppResult<SweepSummary> {
    let cfg = config();
    cfg.validate()?;

    let spec = resolve_toolchain_spec(cfg);
    let family = registry.family_for(&spec.compiler);
    let artifact_kind = family.artifact_kind(&spec);
    let family = family.name();
    let work_dir = cfg.work_dir();
    fs::create_dir_all(&work_dir)?;

    info!(
        "Measuring compile times with {} (C++{}, {} family)",
        spec.compiler, spec.standard, family
    );
    info!("Container header: {}", cfg.header());
    info!("Iterations per configuration: {}", cfg.iterations());
    info!("Binary size measures the {artifact_kind} file");
    info!("{}", "-".repeat(80));

    let executor = BuildExecutor::new(
        Arc::clone(&registry),
        spec.clone(),
        Duration::from_secs(cfg.timeout()),
        work_dir,
    );
    let synthesizer = SourceSynthesizer::new(cfg.header(), &cfg.container());

    let summary = run_sweep(
        &executor,
        &synthesizer,
        cfg.registrations(),
        cfg.iterations(),
        &running,
    )
    .await;

    if summary.interrupted {
        warn!("Sweep interrupted; writing partial results");
    }

    let output = PathBuf::from(cfg.output());
    let context = ReportContext {
        compiler: &spec.compiler,
        family,
        standard: &spec.standard,
        optimization: &spec.optimization,
    };
    write_report(&output, cfg.format(), &summary.results, context)?;

    info!("");
    info!("{}", "=".repeat(80));
    info!("Results saved to: {}", output.display());
    info!("{}", "=".repeat(80));
    print_summary(&summary.results);

    Ok(summary)
}
