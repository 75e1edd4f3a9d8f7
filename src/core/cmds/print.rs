use crate::ToolchainRegistry;
use crate::types::AppResult;

pub mod config;
pub mod toolchains;

pub enum PrintCommand {
    Config(String),
    Toolchains,
}

pub async fn execute_print(command: PrintCommand, registry: &ToolchainRegistry) -> AppResult<()> {
    match command {
        PrintCommand::Config(format) => config::execute(format).await,
        PrintCommand::Toolchains => toolchains::execute(registry).await,
    }
}
