use std::path::{Path, PathBuf};

use log::debug;

use crate::ToolchainFamily;
use crate::types::{ArtifactKind, ToolchainSpec};
use crate::utils::{compiler_stem, path_arg};

/// Microsoft `cl.exe` style driver
#[derive(Debug, Default)]
pub struct MsvcFamily;

impl MsvcFamily {
    pub fn new() -> Self {
        Self
    }
}

/// Translate a GCC-style optimization level to its `cl` spelling
fn map_optimization(level: &str) -> Option<String> {
    match level.trim() {
        "-O2" => Some("/O2".to_string()),
        "-O0" => Some("/Od".to_string()),
        native if native.starts_with('/') => Some(native.to_string()),
        "" => None,
        other => {
            debug!("No cl equivalent for optimization level {other}; omitting it");
            None
        }
    }
}

impl ToolchainFamily for MsvcFamily {
    fn name(&self) -> &'static str {
        "msvc"
    }

    fn matches(&self, compiler: &str) -> bool {
        compiler_stem(compiler) == "cl"
    }

    fn artifact_extension(&self, kind: ArtifactKind) -> &'static str {
        match kind {
            ArtifactKind::Object => "obj",
            ArtifactKind::Executable => "exe",
        }
    }

    fn artifact_kind(&self, spec: &ToolchainSpec) -> ArtifactKind {
        if spec.compile_only {
            ArtifactKind::Object
        } else {
            ArtifactKind::Executable
        }
    }

    fn build_args(&self, spec: &ToolchainSpec, source: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            format!("/std:c++{}", spec.standard),
            "/EHsc".to_string(),
            "/nologo".to_string(),
        ];
        args.extend(
            spec.include_dirs
                .iter()
                .map(|dir| format!("/I{}", path_arg(dir))),
        );
        if let Some(opt) = map_optimization(&spec.optimization) {
            args.push(opt);
        }
        if spec.compile_only {
            args.push("/c".to_string());
            args.push(format!("/Fo:{}", path_arg(output)));
        } else {
            // Keep the intermediate object beside the source instead of the cwd
            args.push(format!("/Fo:{}", path_arg(&source.with_extension("obj"))));
            args.push(format!("/Fe:{}", path_arg(output)));
        }
        args.push(path_arg(source));
        args
    }

    fn link_args(&self, spec: &ToolchainSpec, source: &Path, output: &Path) -> Vec<String> {
        let linked = ToolchainSpec {
            compile_only: false,
            ..spec.clone()
        };
        self.build_args(&linked, source, output)
    }

    fn byproducts(&self, spec: &ToolchainSpec, source: &Path) -> Vec<PathBuf> {
        if spec.compile_only {
            Vec::new()
        } else {
            vec![source.with_extension("obj")]
        }
    }
}
