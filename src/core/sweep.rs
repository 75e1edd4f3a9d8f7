use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::core::runner::Builder;
use crate::core::synth::SourceSynthesizer;
use crate::types::{AggregateResult, BuildOutcome};

/// Results of a sweep plus whether it ran to completion
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    pub results: Vec<AggregateResult>,
    pub interrupted: bool,
}

/// Reduce the successful outcomes of one configuration.
///
/// Failed outcomes are ignored; `None` when nothing succeeded.
pub fn aggregate(registrations: u64, outcomes: &[BuildOutcome]) -> Option<AggregateResult> {
    let successes: Vec<&BuildOutcome> = outcomes.iter().filter(|o| o.succeeded()).collect();
    if successes.is_empty() {
        return None;
    }

    let count = successes.len() as f64;
    let times = successes.iter().map(|o| o.elapsed_secs);
    let total_time: f64 = times.clone().sum();
    let min_time = times.clone().fold(f64::INFINITY, f64::min);
    let max_time = times.fold(f64::NEG_INFINITY, f64::max);
    let total_size: f64 = successes.iter().map(|o| o.binary_size as f64).sum();

    Some(AggregateResult {
        registrations,
        avg_compile_time: total_time / count,
        min_compile_time: min_time,
        max_compile_time: max_time,
        avg_binary_size: total_size / count,
        iterations: successes.len(),
    })
}

/// Measure every registration count in order, `iterations` builds each.
///
/// Builds run strictly one after another. Counts whose builds all failed are
/// left out of the result. Clearing `running` stops the sweep at the next
/// iteration boundary.
pub async fn run_sweep<B: Builder>(
    builder: &B,
    synthesizer: &SourceSynthesizer,
    registrations: &[u64],
    iterations: u32,
    running: &AtomicBool,
) -> SweepSummary {
    let mut results = Vec::with_capacity(registrations.len());

    for &count in registrations {
        if !running.load(Ordering::SeqCst) {
            warn!("Sweep interrupted, stopping...");
            return SweepSummary {
                results,
                interrupted: true,
            };
        }

        info!("Testing with {count} registrations...");
        let unit = synthesizer.synthesize(count);
        debug!(
            "Synthesized {} bytes for {} registrations (sha256 {})",
            unit.text.len(),
            unit.registrations,
            unit.digest.short()
        );

        let mut outcomes = Vec::with_capacity(iterations as usize);
        for i in 1..=iterations {
            if !running.load(Ordering::SeqCst) {
                break;
            }
            let outcome = builder.build(&unit.text).await;
            if outcome.succeeded() {
                info!(
                    "  Iteration {i}/{iterations}: {:.3}s",
                    outcome.elapsed_secs
                );
            } else {
                warn!("  Iteration {i}/{iterations}: FAILED");
            }
            outcomes.push(outcome);
        }

        let stopped = !running.load(Ordering::SeqCst);
        match aggregate(count, &outcomes) {
            Some(result) => {
                info!("  Average: {:.3}s", result.avg_compile_time);
                info!("  Binary size: {:.1} KB", result.avg_binary_size / 1024.0);
                if result.iterations < outcomes.len() {
                    warn!(
                        "  Only {}/{} iterations succeeded",
                        result.iterations,
                        outcomes.len()
                    );
                }
                results.push(result);
            }
            None if stopped => debug!(
                "Interrupted before any build for {count} registrations succeeded"
            ),
            None => warn!(
                "All {} iteration(s) failed for {count} registrations; omitting it from the report",
                outcomes.len()
            ),
        }
    }

    let interrupted = !running.load(Ordering::SeqCst);
    SweepSummary {
        results,
        interrupted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::ContainerConfig;
    use std::cell::RefCell;
    use std::future::Future;

    /// Replays a fixed script of outcomes and records what it was asked to build
    struct Scripted {
        outcomes: RefCell<Vec<BuildOutcome>>,
        seen: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(mut outcomes: Vec<BuildOutcome>) -> Self {
            outcomes.reverse();
            Self {
                outcomes: RefCell::new(outcomes),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Builder for Scripted {
        fn build(&self, source: &str) -> impl Future<Output = BuildOutcome> {
            self.seen.borrow_mut().push(source.to_string());
            let next = self
                .outcomes
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| BuildOutcome::failure(None));
            async move { next }
        }
    }

    /// Clears `running` once `after` builds have been requested, like a Ctrl-C mid count
    struct Interrupting<'a> {
        inner: Scripted,
        running: &'a AtomicBool,
        after: usize,
    }

    impl Builder for Interrupting<'_> {
        fn build(&self, source: &str) -> impl Future<Output = BuildOutcome> {
            let outcome = self.inner.build(source);
            if self.inner.seen.borrow().len() == self.after {
                self.running.store(false, Ordering::SeqCst);
            }
            outcome
        }
    }

    fn synth() -> SourceSynthesizer {
        SourceSynthesizer::new("stub.hpp", &ContainerConfig::default())
    }

    #[test]
    fn single_success_defines_all_statistics() {
        let outcomes = vec![
            BuildOutcome::failure(Some("boom".to_string())),
            BuildOutcome::success(1.25, 4096),
            BuildOutcome::failure(None),
        ];
        let result = aggregate(10, &outcomes).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.avg_compile_time, 1.25);
        assert_eq!(result.min_compile_time, 1.25);
        assert_eq!(result.max_compile_time, 1.25);
        assert_eq!(result.avg_binary_size, 4096.0);
    }

    #[test]
    fn reduces_mean_min_max() {
        let outcomes = vec![
            BuildOutcome::success(1.0, 100),
            BuildOutcome::success(3.0, 300),
            BuildOutcome::success(2.0, 200),
        ];
        let result = aggregate(5, &outcomes).unwrap();
        assert_eq!(result.registrations, 5);
        assert_eq!(result.avg_compile_time, 2.0);
        assert_eq!(result.min_compile_time, 1.0);
        assert_eq!(result.max_compile_time, 3.0);
        assert_eq!(result.avg_binary_size, 200.0);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn all_failures_produce_nothing() {
        let outcomes = vec![BuildOutcome::failure(None); 3];
        assert!(aggregate(0, &outcomes).is_none());
        assert!(aggregate(0, &[]).is_none());
    }

    #[tokio::test]
    async fn exhausted_configuration_is_omitted() {
        let builder = Scripted::new(vec![
            BuildOutcome::success(0.5, 10),
            BuildOutcome::success(0.6, 10),
            BuildOutcome::failure(None),
            BuildOutcome::failure(None),
            BuildOutcome::success(0.7, 20),
        ]);
        let running = AtomicBool::new(true);
        let summary = run_sweep(&builder, &synth(), &[0, 50, 100], 2, &running).await;

        let counts: Vec<u64> = summary.results.iter().map(|r| r.registrations).collect();
        assert_eq!(counts, vec![0, 100]);
        assert!(!summary.interrupted);
        // Every configuration is still attempted
        assert_eq!(builder.seen.borrow().len(), 6);
    }

    #[tokio::test]
    async fn source_is_synthesized_once_per_count() {
        let builder = Scripted::new(vec![BuildOutcome::success(0.1, 1); 3]);
        let running = AtomicBool::new(true);
        run_sweep(&builder, &synth(), &[3], 3, &running).await;

        let seen = builder.seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|s| *s == synth().source(3)));
    }

    #[tokio::test]
    async fn duplicate_counts_yield_independent_rows() {
        let builder = Scripted::new(vec![
            BuildOutcome::success(1.0, 1),
            BuildOutcome::success(2.0, 1),
        ]);
        let running = AtomicBool::new(true);
        let summary = run_sweep(&builder, &synth(), &[7, 7], 1, &running).await;
        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.results[0].avg_compile_time, 1.0);
        assert_eq!(summary.results[1].avg_compile_time, 2.0);
    }

    #[tokio::test]
    async fn interrupt_mid_count_keeps_completed_builds() {
        let running = AtomicBool::new(true);
        let builder = Interrupting {
            inner: Scripted::new(vec![
                BuildOutcome::success(1.0, 10),
                BuildOutcome::success(3.0, 30),
            ]),
            running: &running,
            after: 2,
        };
        let summary = run_sweep(&builder, &synth(), &[0, 10], 3, &running).await;

        assert!(summary.interrupted);
        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.results[0].registrations, 0);
        assert_eq!(summary.results[0].iterations, 2);
        assert_eq!(summary.results[0].avg_compile_time, 2.0);
        assert_eq!(builder.inner.seen.borrow().len(), 2);
    }

    #[tokio::test]
    async fn interrupt_before_any_success_omits_count() {
        let running = AtomicBool::new(true);
        let builder = Interrupting {
            inner: Scripted::new(vec![BuildOutcome::failure(None)]),
            running: &running,
            after: 1,
        };
        let summary = run_sweep(&builder, &synth(), &[0, 10], 3, &running).await;

        assert!(summary.interrupted);
        assert!(summary.results.is_empty());
        assert_eq!(builder.inner.seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn cleared_flag_stops_before_building() {
        let builder = Scripted::new(vec![BuildOutcome::success(0.1, 1)]);
        let running = AtomicBool::new(false);
        let summary = run_sweep(&builder, &synth(), &[0, 10], 1, &running).await;
        assert!(summary.interrupted);
        assert!(summary.results.is_empty());
        assert!(builder.seen.borrow().is_empty());
    }
}
