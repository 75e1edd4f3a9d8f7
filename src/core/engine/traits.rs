use std::path::Path;

use crate::types::{ArtifactKind, Invocation, ToolchainSpec};

/// Core trait that toolchain families must provide
pub trait ToolchainFamily: Send + Sync {
    /// Family name (e.g., "msvc", "gnu")
    fn name(&self) -> &'static str;

    /// Whether this family understands the given compiler identity
    fn matches(&self, compiler: &str) -> bool;

    /// File extension of the artifact this family produces for `kind`
    fn artifact_extension(&self, kind: ArtifactKind) -> &'static str;

    /// Whether this selection produces an object file or a linked executable
    fn artifact_kind(&self, spec: &ToolchainSpec) -> ArtifactKind;

    /// Arguments (excluding the program itself) that compile `source` into `output`
    fn build_args(&self, spec: &ToolchainSpec, source: &Path, output: &Path) -> Vec<String>;

    /// Arguments that compile and link `source` into a runnable `output`
    fn link_args(&self, spec: &ToolchainSpec, source: &Path, output: &Path) -> Vec<String>;

    /// Intermediate files the compiler writes beside `source` that are not the artifact
    fn byproducts(&self, _spec: &ToolchainSpec, _source: &Path) -> Vec<std::path::PathBuf> {
        Vec::new()
    }

    /// Resolve the full invocation; the artifact path is derived from the source path
    fn invocation(&self, spec: &ToolchainSpec, source: &Path) -> Invocation {
        let artifact_kind = self.artifact_kind(spec);
        let artifact = source.with_extension(self.artifact_extension(artifact_kind));
        Invocation {
            program: spec.compiler.clone(),
            args: self.build_args(spec, source, &artifact),
            artifact,
            artifact_kind,
            byproducts: self.byproducts(spec, source),
        }
    }

    /// A linked, runnable build of `source`, for inspecting a generated file by hand
    fn standalone_invocation(&self, spec: &ToolchainSpec, source: &Path) -> Invocation {
        let linked = ToolchainSpec {
            compile_only: false,
            ..spec.clone()
        };
        let artifact = source.with_extension(self.artifact_extension(ArtifactKind::Executable));
        Invocation {
            program: linked.compiler.clone(),
            args: self.link_args(&linked, source, &artifact),
            artifact,
            artifact_kind: ArtifactKind::Executable,
            byproducts: self.byproducts(&linked, source),
        }
    }
}
