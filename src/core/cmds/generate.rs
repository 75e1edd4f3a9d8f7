use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::ToolchainRegistry;
use crate::core::cmds::resolve_toolchain_spec;
use crate::core::synth::SourceSynthesizer;
use crate::types::{AppResult, ToolchainSpec};
use crate::types::config::config;

pub fn default_output(registrations: u64) -> PathBuf {
    PathBuf::from(format!("test_{registrations}_registrations.cpp"))
}

pub async fn execute_generate(
    registrations: u64,
    output: Option<PathBuf>,
    registry: &ToolchainRegistry,
) -> AppResult<PathBuf> {
    let cfg = config();
    let synthesizer = SourceSynthesizer::new(cfg.header(), &cfg.container());
    let unit = synthesizer.synthesize(registrations);

    let path = output.unwrap_or_else(|| default_output(registrations));
    fs::write(&path, &unit.text)?;

    info!(
        "Generated {} with {} service registrations (sha256 {})",
        path.display(),
        unit.registrations,
        unit.digest.short()
    );

    let spec = resolve_toolchain_spec(cfg);
    info!("Compile with: {}", compile_hint(registry, &spec, &path));

    Ok(path)
}

/// Command line that builds `source` into a runnable program
pub fn compile_hint(registry: &ToolchainRegistry, spec: &ToolchainSpec, source: &Path) -> String {
    registry
        .family_for(&spec.compiler)
        .standalone_invocation(spec, source)
        .command_line()
}
