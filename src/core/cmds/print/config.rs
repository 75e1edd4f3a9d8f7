use log::info;

use crate::types::AppResult;
use crate::types::config::config;

fn or_unset<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}

pub async fn execute(format: String) -> AppResult<()> {
    let effective_config = config().to_effective();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&effective_config)?);
        return Ok(());
    }

    info!("Effective Configuration:");
    info!("");
    info!("Sweep:");
    info!("  header: {}", or_unset(effective_config.header.as_ref()));
    info!("  compiler: {}", or_unset(effective_config.compiler.as_ref()));
    info!("  std: {}", or_unset(effective_config.std.as_ref()));
    info!(
        "  optimization: {}",
        or_unset(effective_config.optimization.as_ref())
    );
    if let Some(registrations) = &effective_config.registrations {
        let list: Vec<String> = registrations.iter().map(u64::to_string).collect();
        info!("  registrations: [{}]", list.join(", "));
    }
    info!("  iterations: {}", or_unset(effective_config.iterations));
    info!("  timeout: {}s", or_unset(effective_config.timeout));
    info!(
        "  compile_only: {}",
        or_unset(effective_config.compile_only)
    );
    match &effective_config.include_dirs {
        Some(dirs) if !dirs.is_empty() => {
            let list: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
            info!("  include_dirs: [{}]", list.join(", "));
        }
        _ => info!("  include_dirs: []"),
    }
    if let Some(work_dir) = &effective_config.work_dir {
        info!("  work_dir: {}", work_dir.display());
    }

    info!("");
    info!("Output:");
    info!("  output: {}", or_unset(effective_config.output.as_ref()));
    info!("  format: {}", or_unset(effective_config.format));

    info!("");
    info!("Log:");
    if let Some(log) = &effective_config.log {
        info!("  level: {}", log.level());
        match log.color {
            Some(true) => info!("  color: on"),
            Some(false) => info!("  color: off"),
            None => info!("  color: auto"),
        }
    }

    info!("");
    info!("Container:");
    if let Some(container) = &effective_config.container {
        info!("  collection: {}", container.collection());
        info!("  register: {}", container.register());
        info!("  build: {}", container.build());
    }

    Ok(())
}
