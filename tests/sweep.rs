mod common;

use std::future::Future;
use std::sync::atomic::AtomicBool;

use pretty_assertions::assert_eq;
use regcost::types::BuildOutcome;
use regcost::types::config::ContainerConfig;
use regcost::{Builder, SourceSynthesizer, marginal_cost, render_csv, run_sweep};

/// Always succeeds in 0.1s; artifact size grows linearly with the registration count
struct LinearStub;

impl Builder for LinearStub {
    fn build(&self, source: &str) -> impl Future<Output = BuildOutcome> {
        let registrations = source.matches("AddSingleton<").count() as u64;
        async move { BuildOutcome::success(0.1, 1000 + 100 * registrations) }
    }
}

fn synth() -> SourceSynthesizer {
    SourceSynthesizer::new("stub.hpp", &ContainerConfig::default())
}

#[tokio::test]
async fn rows_follow_input_order_with_growing_size() {
    let running = AtomicBool::new(true);
    let summary = run_sweep(&LinearStub, &synth(), &[0, 10], 1, &running).await;

    assert!(!summary.interrupted);
    let rows: Vec<(u64, f64, usize)> = summary
        .results
        .iter()
        .map(|r| (r.registrations, r.avg_binary_size, r.iterations))
        .collect();
    assert_eq!(rows, vec![(0, 1000.0, 1), (10, 2000.0, 1)]);
    assert!(summary.results[0].avg_binary_size < summary.results[1].avg_binary_size);
    assert_eq!(summary.results[1].avg_compile_time, 0.1);

    let csv = render_csv(&summary.results);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("0,"));
    assert!(lines[2].starts_with("10,"));

    // Flat timing means no measurable marginal cost
    assert_eq!(marginal_cost(&summary.results), Some(0.0));
}

#[tokio::test]
async fn descending_input_order_is_preserved() {
    let running = AtomicBool::new(true);
    let summary = run_sweep(&LinearStub, &synth(), &[50, 5, 20], 2, &running).await;

    let counts: Vec<u64> = summary.results.iter().map(|r| r.registrations).collect();
    assert_eq!(counts, vec![50, 5, 20]);
    assert!(summary.results.iter().all(|r| r.iterations == 2));
    // No zero baseline first, so no estimate
    assert_eq!(marginal_cost(&summary.results), None);
}

#[cfg(unix)]
#[tokio::test]
async fn real_process_sweep_leaves_no_scratch_files() {
    use common::*;
    use std::time::Duration;
    use tempfile::tempdir;

    let _guard = SPAWN_LOCK.lock().await;
    let bin_dir = tempdir().expect("Failed to create temp directory");
    let work_dir = tempdir().expect("Failed to create temp directory");
    let compiler = write_script(bin_dir.path(), "fakecc", SCALING_COMPILER);
    let executor = executor(&compiler, work_dir.path(), Duration::from_secs(30));

    let running = AtomicBool::new(true);
    let summary = run_sweep(&executor, &synth(), &[0, 4, 8], 2, &running).await;

    let sizes: Vec<f64> = summary.results.iter().map(|r| r.avg_binary_size).collect();
    assert_eq!(sizes, vec![128.0, 384.0, 640.0]);
    assert!(summary.results.iter().all(|r| r.iterations == 2));
    assert!(residual_files(work_dir.path()).is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn failing_compiler_yields_empty_report() {
    use common::*;
    use std::time::Duration;
    use tempfile::tempdir;

    let _guard = SPAWN_LOCK.lock().await;
    let bin_dir = tempdir().expect("Failed to create temp directory");
    let work_dir = tempdir().expect("Failed to create temp directory");
    let compiler = write_script(bin_dir.path(), "fakecc", FAILING_COMPILER);
    let executor = executor(&compiler, work_dir.path(), Duration::from_secs(30));

    let running = AtomicBool::new(true);
    let summary = run_sweep(&executor, &synth(), &[0, 10], 3, &running).await;

    assert!(summary.results.is_empty());
    assert!(!summary.interrupted);
    assert_eq!(
        render_csv(&summary.results),
        "registrations,avg_compile_time,min_compile_time,max_compile_time,avg_binary_size,iterations\n"
    );
    assert!(residual_files(work_dir.path()).is_empty());
}
