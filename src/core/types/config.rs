use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::warn;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::ConfigError;

pub const CONFIG_FILENAME: &str = "regcost.toml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn color(&self) -> Option<bool> {
        self.color // None has semantic meaning (auto-detect)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            level: Some(self.level().to_string()),
            color: self.color,
        }
    }
}

/// Spelling of the container API the synthesized source calls
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ContainerConfig {
    pub collection: Option<String>,
    pub register: Option<String>,
    pub build: Option<String>,
}

impl ContainerConfig {
    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or("skr::ServiceCollection")
    }

    pub fn register(&self) -> &str {
        self.register.as_deref().unwrap_or("AddSingleton")
    }

    pub fn build(&self) -> &str {
        self.build.as_deref().unwrap_or("CreateServiceProvider")
    }

    pub fn to_effective(&self) -> Self {
        Self {
            collection: Some(self.collection().to_string()),
            register: Some(self.register().to_string()),
            build: Some(self.build().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    // Top-level fields
    pub header: Option<String>,
    pub compiler: Option<String>,
    pub std: Option<String>,
    pub optimization: Option<String>,
    pub registrations: Option<Vec<u64>>,
    pub iterations: Option<u32>,
    pub output: Option<String>,
    pub format: Option<ReportFormat>,
    pub timeout: Option<u64>,
    pub work_dir: Option<PathBuf>,
    pub include_dirs: Option<Vec<PathBuf>>,
    pub compile_only: Option<bool>,

    // Nested sections
    pub log: Option<LogConfig>,
    pub container: Option<ContainerConfig>,
}

impl Config {
    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or("Skirnir.hpp")
    }

    pub fn compiler(&self) -> &str {
        self.compiler.as_deref().unwrap_or("g++")
    }

    pub fn std(&self) -> &str {
        self.std.as_deref().unwrap_or("20")
    }

    pub fn optimization(&self) -> &str {
        self.optimization.as_deref().unwrap_or("-O2")
    }

    pub fn registrations(&self) -> &[u64] {
        self.registrations
            .as_deref()
            .unwrap_or(&[0, 10, 50, 100, 500])
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.unwrap_or(3)
    }

    pub fn output(&self) -> &str {
        self.output
            .as_deref()
            .unwrap_or("compile_time_results.csv")
    }

    pub fn format(&self) -> ReportFormat {
        self.format.unwrap_or(ReportFormat::Csv)
    }

    pub fn timeout(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        self.include_dirs.as_deref().unwrap_or(&[])
    }

    pub fn compile_only(&self) -> bool {
        self.compile_only.unwrap_or(false)
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    pub fn container(&self) -> ContainerConfig {
        self.container.clone().unwrap_or_default()
    }

    pub fn to_effective(&self) -> Self {
        Self {
            header: Some(self.header().to_string()),
            compiler: Some(self.compiler().to_string()),
            std: Some(self.std().to_string()),
            optimization: Some(self.optimization().to_string()),
            registrations: Some(self.registrations().to_vec()),
            iterations: Some(self.iterations()),
            output: Some(self.output().to_string()),
            format: Some(self.format()),
            timeout: Some(self.timeout()),
            work_dir: Some(self.work_dir()),
            include_dirs: Some(self.include_dirs().to_vec()),
            compile_only: Some(self.compile_only()),
            log: Some(self.log().to_effective()),
            container: Some(self.container().to_effective()),
        }
    }

    /// Reject settings that would make a sweep meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations() == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.registrations().is_empty() {
            return Err(ConfigError::EmptyRegistrations);
        }
        if self.timeout() == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
    pub header: Option<String>,
    pub compiler: Option<String>,
    pub std: Option<String>,
    pub optimization: Option<String>,
    pub registrations: Option<String>, // csv
    pub iterations: Option<u32>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub timeout: Option<u64>,
    pub work_dir: Option<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub compile_only: bool,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut cfg = Config::default();
        // Apply nearest config file found by walking up from cwd
        if let Some(path) = find_nearest_config_file()
            && let Some(file_cfg) = read_config_file(&path)
        {
            apply_file_config(&mut cfg, &file_cfg);
        }
        cfg
    })
}

pub fn init_with_overrides(overrides: &CliOverrides) -> Result<(), ConfigError> {
    let mut cfg = Config::default();

    // 1) Config file: walk up from cwd and use the first config file found
    if let Some(path) = find_nearest_config_file()
        && let Some(file_cfg) = read_config_file(&path)
    {
        apply_file_config(&mut cfg, &file_cfg);
    }

    // 2) CLI arguments (highest priority). Only override if user specified.
    apply_cli_overrides(&mut cfg, overrides)?;

    let _ = CONFIG.set(cfg);
    Ok(())
}

fn read_config_file(path: &Path) -> Option<Config> {
    let contents = fs::read_to_string(path).ok()?;
    match toml::from_str::<Config>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            // Logging is not up yet, so this goes straight to stderr
            eprintln!("Ignoring malformed {}: {e}", path.display());
            None
        }
    }
}

pub fn apply_file_config(cfg: &mut Config, file: &Config) {
    macro_rules! take {
        ($($field:ident),*) => {
            $(
                if file.$field.is_some() {
                    cfg.$field = file.$field.clone();
                }
            )*
        };
    }
    take!(
        header,
        compiler,
        std,
        optimization,
        registrations,
        iterations,
        output,
        format,
        timeout,
        work_dir,
        compile_only
    );

    if let Some(dirs) = &file.include_dirs {
        cfg.include_dirs = Some(
            cfg.include_dirs()
                .iter()
                .chain(dirs.iter())
                .cloned()
                .collect(),
        );
    }

    // Merge log section
    if let Some(file_log) = &file.log {
        let mut log = cfg.log.clone().unwrap_or_default();
        if file_log.level.is_some() {
            log.level = file_log.level.clone();
        }
        if file_log.color.is_some() {
            log.color = file_log.color;
        }
        cfg.log = Some(log);
    }

    // Merge container section
    if let Some(file_container) = &file.container {
        let mut container = cfg.container.clone().unwrap_or_default();
        if file_container.collection.is_some() {
            container.collection = file_container.collection.clone();
        }
        if file_container.register.is_some() {
            container.register = file_container.register.clone();
        }
        if file_container.build.is_some() {
            container.build = file_container.build.clone();
        }
        cfg.container = Some(container);
    }
}

pub fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) -> Result<(), ConfigError> {
    // Top-level overrides
    if let Some(header) = non_blank(&overrides.header) {
        cfg.header = Some(header);
    }
    if let Some(compiler) = non_blank(&overrides.compiler) {
        cfg.compiler = Some(compiler);
    }
    if let Some(std) = non_blank(&overrides.std) {
        cfg.std = Some(std);
    }
    if let Some(optimization) = non_blank(&overrides.optimization) {
        cfg.optimization = Some(optimization);
    }
    if let Some(csv) = &overrides.registrations {
        cfg.registrations = Some(parse_registrations(csv)?);
    }
    if overrides.iterations.is_some() {
        cfg.iterations = overrides.iterations;
    }
    if let Some(output) = non_blank(&overrides.output) {
        cfg.output = Some(output);
    }
    if let Some(format) = &overrides.format {
        let parsed = ReportFormat::from_str(format.trim())
            .map_err(|_| ConfigError::UnknownFormat(format.clone()))?;
        cfg.format = Some(parsed);
    }
    if overrides.timeout.is_some() {
        cfg.timeout = overrides.timeout;
    }
    if overrides.work_dir.is_some() {
        cfg.work_dir = overrides.work_dir.clone();
    }
    if !overrides.include_dirs.is_empty() {
        let existing = cfg.include_dirs().to_vec();
        cfg.include_dirs = Some(
            existing
                .into_iter()
                .chain(overrides.include_dirs.iter().cloned())
                .collect(),
        );
    }
    if overrides.compile_only {
        cfg.compile_only = Some(true);
    }

    // Log overrides
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = non_blank(&overrides.log_level) {
        log.level = Some(level);
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            other => warn!("Ignoring unknown --log.color value '{other}'"),
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }

    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a comma-separated list of registration counts.
///
/// Empty entries are skipped; duplicates are kept in order.
pub fn parse_registrations(input: &str) -> Result<Vec<u64>, ConfigError> {
    let counts = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| ConfigError::InvalidRegistration(s.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if counts.is_empty() {
        return Err(ConfigError::EmptyRegistrations);
    }
    Ok(counts)
}

fn find_nearest_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

pub fn colors_enabled() -> bool {
    match config().log().color() {
        Some(force) => force,
        None => console::colors_enabled(),
    }
}
