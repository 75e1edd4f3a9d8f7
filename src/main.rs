use std::sync::Arc;

use regcost::ToolchainRegistry;
use regcost::run_main;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // GCC/Clang conventions are the fallback; other families are matched first
    let mut registry = ToolchainRegistry::new(regcost::toolchains::gnu::GnuFamily::new());
    registry.register(regcost::toolchains::msvc::MsvcFamily::new());

    // Run the shared main function
    run_main(Arc::new(registry)).await?;
    Ok(())
}
