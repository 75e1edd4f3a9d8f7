use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// All relative paths will be interpreted relative to this directory.
    /// Compilers are run in this directory.
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Logging level (overrides env/config). One of: trace, debug, info, warn, error
    #[arg(long = "log.level", global = true)]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color", global = true)]
    pub log_color: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example regcost.toml into the current directory
    Init,

    /// Measure compile time and artifact size across registration counts
    Run(RunArgs),

    /// Write one standalone synthesized source for manual inspection
    Generate(GenerateArgs),

    /// Print configuration and toolchain information
    Print {
        #[command(subcommand)]
        command: PrintArgs,
    },
}

/// Toolchain selection shared by run and generate
#[derive(Parser, Debug, Default)]
pub struct ToolchainArgs {
    /// Path of the container header under test, as written in the #include.
    /// Replaces config `header` if provided.
    #[arg(long)]
    pub header: Option<String>,

    /// C++ compiler to use (g++, clang++, cl.exe).
    /// Replaces config `compiler` if provided.
    #[arg(long)]
    pub compiler: Option<String>,

    /// C++ standard version (17, 20, 23).
    /// Replaces config `std` if provided.
    #[arg(long = "std")]
    pub std: Option<String>,

    /// Optimization level in GCC spelling; mapped for MSVC (-O2 -> /O2, -O0 -> /Od).
    /// Replaces config `optimization` if provided.
    #[arg(long, allow_hyphen_values = true)]
    pub optimization: Option<String>,

    /// Extra include directory passed to the compiler (repeatable)
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Produce object files for MSVC too, so sizes are comparable across families
    #[arg(long)]
    pub compile_only: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub toolchain: ToolchainArgs,

    /// Comma-separated list of registration counts to test (e.g. "0,10,50,100,500").
    /// Replaces config `registrations` if provided.
    #[arg(long)]
    pub registrations: Option<String>,

    /// Number of compilation iterations per configuration.
    /// Replaces config `iterations` if provided.
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Output file for results.
    /// Replaces config `output` if provided.
    #[arg(long)]
    pub output: Option<String>,

    /// Output format: "csv" (default) or "json"
    #[arg(long)]
    pub format: Option<String>,

    /// Per-build deadline in seconds.
    /// Replaces config `timeout` if provided.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory for temporary sources and artifacts (defaults to the system temp dir)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub toolchain: ToolchainArgs,

    /// Number of service registrations in the generated file
    #[arg(long, default_value_t = 100)]
    pub registrations: u64,

    /// Output file; defaults to test_<N>_registrations.cpp
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the print command
#[derive(Subcommand, Debug)]
pub enum PrintArgs {
    /// Print the effective global configuration
    Config(PrintConfigArgs),

    /// List registered toolchain families and the one the configured compiler selects
    Toolchains,
}

/// Arguments for the print config subcommand
#[derive(Parser, Debug)]
pub struct PrintConfigArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}
