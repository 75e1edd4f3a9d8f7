use std::path::PathBuf;

use crate::types::ToolchainSpec;
use crate::types::config::Config;

pub mod generate;
pub mod init;
pub mod print;
pub mod run;

pub use generate::execute_generate;
pub use init::execute_init;
pub use print::execute_print;
pub use run::execute_run;

/// Toolchain selection from the effective config.
///
/// The working directory is appended to the include path so a header given
/// relative to it resolves from the scratch directory.
pub fn resolve_toolchain_spec(cfg: &Config) -> ToolchainSpec {
    let mut include_dirs: Vec<PathBuf> = cfg.include_dirs().to_vec();
    if let Ok(cwd) = std::env::current_dir()
        && !include_dirs.contains(&cwd)
    {
        include_dirs.push(cwd);
    }
    ToolchainSpec {
        compiler: cfg.compiler().to_string(),
        standard: cfg.std().to_string(),
        optimization: cfg.optimization().to_string(),
        include_dirs,
        compile_only: cfg.compile_only(),
    }
}
