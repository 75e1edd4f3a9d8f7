use serde::Serialize;

/// Reduced statistics for one registration count across repeated builds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub registrations: u64,
    pub avg_compile_time: f64,
    pub min_compile_time: f64,
    pub max_compile_time: f64,
    pub avg_binary_size: f64,
    /// Number of iterations that succeeded and contributed samples
    pub iterations: usize,
}
