use crate::ToolchainFamily;

/// Registry for managing available toolchain families.
///
/// Families are consulted in registration order; the first whose predicate
/// accepts the compiler identity wins, otherwise the fallback is used.
pub struct ToolchainRegistry {
    families: Vec<Box<dyn ToolchainFamily>>,
    fallback: Box<dyn ToolchainFamily>,
}

impl ToolchainRegistry {
    pub fn new<T: ToolchainFamily + 'static>(fallback: T) -> Self {
        Self {
            families: Vec::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Register a toolchain family
    pub fn register<T: ToolchainFamily + 'static>(&mut self, family: T) {
        self.families.push(Box::new(family));
    }

    /// Get the family that handles a compiler identity
    pub fn family_for(&self, compiler: &str) -> &dyn ToolchainFamily {
        self.families
            .iter()
            .find(|family| family.matches(compiler))
            .map(|family| family.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    /// Get family by name
    pub fn get_family(&self, name: &str) -> Option<&dyn ToolchainFamily> {
        self.families
            .iter()
            .chain(std::iter::once(&self.fallback))
            .find(|family| family.name().eq_ignore_ascii_case(name))
            .map(|family| family.as_ref())
    }

    /// Get all registered family names, fallback last
    pub fn all_families(&self) -> Vec<&str> {
        self.families
            .iter()
            .chain(std::iter::once(&self.fallback))
            .map(|family| family.name())
            .collect()
    }
}

impl Default for ToolchainRegistry {
    fn default() -> Self {
        let mut registry = Self::new(crate::toolchains::gnu::GnuFamily::new());
        registry.register(crate::toolchains::msvc::MsvcFamily::new());
        registry
    }
}
