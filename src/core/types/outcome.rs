use serde::Serialize;

/// Result of one compiler invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildOutcome {
    /// Wall-clock seconds spent in the compiler, or `BuildOutcome::FAILED`
    pub elapsed_secs: f64,
    /// Size of the produced artifact in bytes (0 if none was found)
    pub binary_size: u64,
    /// Captured compiler stderr, only set on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl BuildOutcome {
    pub const FAILED: f64 = -1.0;

    pub fn success(elapsed_secs: f64, binary_size: u64) -> Self {
        Self {
            elapsed_secs,
            binary_size,
            stderr: None,
        }
    }

    pub fn failure(stderr: Option<String>) -> Self {
        Self {
            elapsed_secs: Self::FAILED,
            binary_size: 0,
            stderr,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.elapsed_secs >= 0.0
    }
}
