use std::path::PathBuf;

use serde::Serialize;
use strum::Display;

/// Compiler selection for one sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolchainSpec {
    /// Compiler executable as given by the user (name or path)
    pub compiler: String,
    /// Language standard version, e.g. "20"
    pub standard: String,
    /// Optimization level in GCC spelling, e.g. "-O2"
    pub optimization: String,
    pub include_dirs: Vec<PathBuf>,
    /// Produce an object file even where the family links by default
    pub compile_only: bool,
}

/// What the compiler leaves behind at the output path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Object,
    Executable,
}

/// A fully resolved compiler command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub artifact: PathBuf,
    pub artifact_kind: ArtifactKind,
    /// Extra files the compiler may write that must be removed afterwards
    pub byproducts: Vec<PathBuf>,
}

impl Invocation {
    /// Shell-like rendering for logs and manual reproduction
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| {
                if part.contains(' ') {
                    format!("\"{part}\"")
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
