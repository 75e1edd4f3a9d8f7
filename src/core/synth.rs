use std::fmt::Write;

use crate::types::Hash;
use crate::types::config::ContainerConfig;

/// A synthesized translation unit for one registration count
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub registrations: u64,
    pub text: String,
    pub digest: Hash,
}

/// Builds self-contained C++ sources that register N trivial services
#[derive(Debug, Clone)]
pub struct SourceSynthesizer {
    header: String,
    collection: String,
    register: String,
    build: String,
}

impl SourceSynthesizer {
    pub fn new(header: impl Into<String>, container: &ContainerConfig) -> Self {
        Self {
            header: header.into(),
            collection: container.collection().to_string(),
            register: container.register().to_string(),
            build: container.build().to_string(),
        }
    }

    pub fn synthesize(&self, registrations: u64) -> CompilationUnit {
        let text = self.source(registrations);
        CompilationUnit {
            registrations,
            digest: Hash::digest(&text),
            text,
        }
    }

    /// Source text; a pure function of the header, container API and count
    pub fn source(&self, registrations: u64) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_source(&mut out, registrations);
        out
    }

    fn write_source(&self, out: &mut String, n: u64) -> std::fmt::Result {
        writeln!(out, "#include \"{}\"", self.header)?;
        writeln!(out, "#include <memory>")?;
        writeln!(out)?;
        writeln!(out, "// {n} dummy services for registration")?;

        for i in 0..n {
            writeln!(out)?;
            writeln!(out, "class Service{i} {{")?;
            writeln!(out, "public:")?;
            writeln!(out, "    Service{i}() = default;")?;
            writeln!(out, "    void work() {{}}")?;
            writeln!(out, "}};")?;
        }

        writeln!(out)?;
        writeln!(out, "int main() {{")?;
        writeln!(out, "    auto container = {}();", self.collection)?;
        writeln!(out)?;
        for i in 0..n {
            writeln!(out, "    container.{}<Service{i}>();", self.register)?;
        }
        writeln!(out)?;
        writeln!(out, "    auto provider = container.{}();", self.build)?;
        writeln!(out, "    static_cast<void>(provider);")?;
        writeln!(out, "    return 0;")?;
        writeln!(out, "}}")
    }
}
