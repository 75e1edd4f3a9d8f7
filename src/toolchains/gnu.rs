use std::path::Path;

use crate::ToolchainFamily;
use crate::types::{ArtifactKind, ToolchainSpec};
use crate::utils::path_arg;

/// GCC and Clang style drivers. Accepts any compiler identity, so it is
/// registered as the fallback.
#[derive(Debug, Default)]
pub struct GnuFamily;

impl GnuFamily {
    pub fn new() -> Self {
        Self
    }
}

impl ToolchainFamily for GnuFamily {
    fn name(&self) -> &'static str {
        "gnu"
    }

    fn matches(&self, _compiler: &str) -> bool {
        true
    }

    fn artifact_extension(&self, kind: ArtifactKind) -> &'static str {
        match kind {
            ArtifactKind::Object => "o",
            ArtifactKind::Executable => "out",
        }
    }

    // Always compile-only: linking adds noise unrelated to template instantiation
    fn artifact_kind(&self, _spec: &ToolchainSpec) -> ArtifactKind {
        ArtifactKind::Object
    }

    fn build_args(&self, spec: &ToolchainSpec, source: &Path, output: &Path) -> Vec<String> {
        let mut args = common_args(spec);
        args.push("-c".to_string());
        args.push("-o".to_string());
        args.push(path_arg(output));
        args.push(path_arg(source));
        args
    }

    fn link_args(&self, spec: &ToolchainSpec, source: &Path, output: &Path) -> Vec<String> {
        let mut args = common_args(spec);
        args.push("-o".to_string());
        args.push(path_arg(output));
        args.push(path_arg(source));
        args
    }
}

fn common_args(spec: &ToolchainSpec) -> Vec<String> {
    let mut args = vec![format!("-std=c++{}", spec.standard)];
    if !spec.optimization.trim().is_empty() {
        args.push(spec.optimization.clone());
    }
    args.extend(
        spec.include_dirs
            .iter()
            .map(|dir| format!("-I{}", path_arg(dir))),
    );
    args
}
