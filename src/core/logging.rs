use std::str::FromStr;

use console::style;
use log::{Level, LevelFilter};

use crate::types::config::{colors_enabled, config};

fn level_tag(level: Level, colored: bool) -> String {
    let tag = format!("{:<5}", level);
    if !colored {
        return tag;
    }
    let styled = match level {
        Level::Error => style(tag).red().bold(),
        Level::Warn => style(tag).yellow(),
        Level::Info => style(tag).green(),
        Level::Debug => style(tag).cyan(),
        Level::Trace => style(tag).dim(),
    };
    styled.force_styling(true).to_string()
}

/// Install the global logger using the resolved config
pub fn init_logging() {
    let log_config = config().log();
    let level = LevelFilter::from_str(log_config.level()).unwrap_or(LevelFilter::Info);
    let colored = colors_enabled();

    let result = fern::Dispatch::new()
        .format(move |out, message, record| {
            if record.level() == Level::Info {
                out.finish(format_args!("{message}"))
            } else {
                out.finish(format_args!(
                    "[{}] {}",
                    level_tag(record.level(), colored),
                    message
                ))
            }
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}
