pub mod core;
pub mod toolchains;

// Re-export key items for easy importing in this crate
pub use core::types;

// Re-export key items for easy importing in other crates
pub use core::engine::traits::ToolchainFamily;
pub use core::engine::utils;
pub use core::main_shared::run_main;
pub use core::registry::ToolchainRegistry;
pub use core::report::{marginal_cost, render_csv};
pub use core::runner::{BuildExecutor, Builder};
pub use core::sweep::{SweepSummary, aggregate, run_sweep};
pub use core::synth::{CompilationUnit, SourceSynthesizer};
