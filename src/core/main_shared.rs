use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use log::{debug, warn};

use crate::ToolchainRegistry;
use crate::core::cli::{Args, Commands, PrintArgs, ToolchainArgs};
use crate::core::cmds;
use crate::core::logging::init_logging;
use crate::types::AppResult;
use crate::types::config::{CliOverrides, init_with_overrides};

fn toolchain_overrides(overrides: &mut CliOverrides, toolchain: &ToolchainArgs) {
    overrides.header = toolchain.header.clone();
    overrides.compiler = toolchain.compiler.clone();
    overrides.std = toolchain.std.clone();
    overrides.optimization = toolchain.optimization.clone();
    overrides.include_dirs = toolchain.include_dirs.clone();
    overrides.compile_only = toolchain.compile_only;
}

/// Collect every flag that can override the config file
fn cli_overrides(args: &Args) -> CliOverrides {
    let mut overrides = CliOverrides {
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
        ..Default::default()
    };

    match &args.command {
        Commands::Run(run_args) => {
            toolchain_overrides(&mut overrides, &run_args.toolchain);
            overrides.registrations = run_args.registrations.clone();
            overrides.iterations = run_args.iterations;
            overrides.output = run_args.output.clone();
            overrides.format = run_args.format.clone();
            overrides.timeout = run_args.timeout;
            overrides.work_dir = run_args.work_dir.clone();
        }
        Commands::Generate(generate_args) => {
            toolchain_overrides(&mut overrides, &generate_args.toolchain);
        }
        Commands::Init | Commands::Print { .. } => {}
    }

    overrides
}

pub async fn run_main(registry: Arc<ToolchainRegistry>) -> AppResult<()> {
    let args = Args::parse();

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        env::set_current_dir(&cwd)?;
    }

    // Initialize configuration (files, then CLI overrides)
    init_with_overrides(&cli_overrides(&args))?;

    // Initialize logging after config so level/color are applied
    init_logging();
    debug!("Current working directory: {}", env::current_dir()?.display());

    // Setup running flag to handle signals from ctrl-c
    let running = Arc::new(AtomicBool::new(true));
    let running_ctrlc = Arc::clone(&running);

    if let Err(e) = ctrlc::set_handler(move || {
        warn!("Received Ctrl-C, finishing the current build..");
        running_ctrlc.store(false, Ordering::SeqCst);
    }) {
        warn!("Could not install Ctrl-C handler: {e}");
    }

    // Dispatch to appropriate command
    let exit_code = match args.command {
        Commands::Init => {
            cmds::execute_init().await?;
            0
        }
        Commands::Run(_) => {
            let summary = cmds::execute_run(Arc::clone(&running), Arc::clone(&registry)).await?;
            if summary.interrupted { 2 } else { 0 }
        }
        Commands::Generate(generate_args) => {
            cmds::execute_generate(
                generate_args.registrations,
                generate_args.output,
                &registry,
            )
            .await?;
            0
        }
        Commands::Print {
            command: print_args,
        } => {
            let command = match print_args {
                PrintArgs::Config(args) => cmds::print::PrintCommand::Config(args.format),
                PrintArgs::Toolchains => cmds::print::PrintCommand::Toolchains,
            };
            cmds::execute_print(command, &registry).await?;
            0
        }
    };

    // Exit with appropriate code
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_become_overrides() {
        let args = Args::try_parse_from([
            "regcost",
            "--log.level",
            "debug",
            "run",
            "--compiler",
            "cl.exe",
            "--timeout",
            "60",
            "--format",
            "json",
            "--compile-only",
        ])
        .unwrap();
        let overrides = cli_overrides(&args);
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(overrides.compiler.as_deref(), Some("cl.exe"));
        assert_eq!(overrides.timeout, Some(60));
        assert_eq!(overrides.format.as_deref(), Some("json"));
        assert!(overrides.compile_only);
        assert!(overrides.registrations.is_none());
    }

    #[test]
    fn print_has_no_sweep_overrides() {
        let args = Args::try_parse_from(["regcost", "print", "config"]).unwrap();
        let overrides = cli_overrides(&args);
        assert!(overrides.compiler.is_none());
        assert!(overrides.include_dirs.is_empty());
    }
}
