use log::info;

use crate::ToolchainRegistry;
use crate::types::AppResult;
use crate::types::config::config;

pub async fn execute(registry: &ToolchainRegistry) -> AppResult<()> {
    let compiler = config().compiler();
    let selected = registry.family_for(compiler).name();

    info!("Toolchain families (first match wins, last is the fallback):");
    for name in registry.all_families() {
        let marker = if name == selected { "*" } else { " " };
        info!("  {marker} {name}");
    }
    info!("");
    info!("Compiler '{compiler}' selects: {selected}");

    Ok(())
}
