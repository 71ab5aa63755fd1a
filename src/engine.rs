//! The main entry point: an [`Engine`] owns a compatibility registry and answers every conversion
//! and validation query against it.

use crate::classifier::{classify, RuleKind};
use crate::compatibility::{CompatibilityTable, Registry, RegistryError};
use crate::converter::{abp_snippet_to_adg, ubo_scriptlet_to_adg, ConversionError, Converter};
use crate::validator::{NameCache, Validator};

/// Converts and validates scriptlet and redirect rules.
///
/// ```
/// use adblock_scriptlets::Engine;
///
/// let engine = Engine::default();
/// assert!(engine.is_valid_scriptlet_rule("example.org##+js(set-constant, ads, false)"));
/// assert_eq!(
///     engine.convert_adg_scriptlet_to_ubo("example.org#%#//scriptlet('set-constant', 'ads', 'false')"),
///     Ok(Some("example.org##+js(set-constant, ads, false)".to_string())),
/// );
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    registry: Registry,
    names: NameCache,
}

impl Engine {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            names: NameCache::default(),
        }
    }

    pub fn from_table(table: &CompatibilityTable) -> Result<Self, RegistryError> {
        Ok(Self::new(Registry::from_table(table)?))
    }

    /// Builds an engine from a compatibility table in its JSON form,
    /// `{ "scriptlets": [{ "adg": ..., "ubo": ..., "abp": ... }], "redirects": [...] }`.
    pub fn from_table_json(data: &str) -> Result<Self, RegistryError> {
        Ok(Self::new(Registry::from_json(data)?))
    }

    /// Replaces the compatibility table. Memoized name checks are discarded. On error the engine
    /// keeps its current table.
    pub fn reload(&mut self, table: &CompatibilityTable) -> Result<(), RegistryError> {
        self.registry = Registry::from_table(table)?;
        self.names = NameCache::default();
        Ok(())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn converter(&self) -> Converter<'_> {
        Converter::new(&self.registry, &self.names)
    }

    pub fn validator(&self) -> Validator<'_> {
        Validator::new(&self.registry, &self.names)
    }

    pub fn classify(&self, rule: &str) -> RuleKind {
        classify(rule, &self.registry)
    }

    pub fn convert_ubo_scriptlet_to_adg(&self, rule: &str) -> Result<String, ConversionError> {
        ubo_scriptlet_to_adg(rule)
    }

    pub fn convert_abp_snippet_to_adg(&self, rule: &str) -> Result<Vec<String>, ConversionError> {
        abp_snippet_to_adg(rule)
    }

    pub fn convert_scriptlet_to_adg(&self, rule: &str) -> Result<Vec<String>, ConversionError> {
        self.converter().scriptlet_to_adg(rule)
    }

    pub fn convert_adg_scriptlet_to_ubo(
        &self,
        rule: &str,
    ) -> Result<Option<String>, ConversionError> {
        self.converter().adg_scriptlet_to_ubo(rule)
    }

    pub fn convert_ubo_redirect_to_adg(&self, rule: &str) -> Option<String> {
        self.converter().ubo_redirect_to_adg(rule)
    }

    pub fn convert_abp_redirect_to_adg(&self, rule: &str) -> Option<String> {
        self.converter().abp_redirect_to_adg(rule)
    }

    pub fn convert_redirect_to_adg(&self, rule: &str) -> Option<String> {
        self.converter().redirect_to_adg(rule)
    }

    pub fn convert_adg_redirect_to_ubo(&self, rule: &str) -> Result<String, ConversionError> {
        self.converter().adg_redirect_to_ubo(rule)
    }

    pub fn convert_adg_to_ubo(&self, rule: &str) -> Result<Option<String>, ConversionError> {
        self.converter().adg_to_ubo(rule)
    }

    pub fn convert_redirect_name_to_adg(&self, name: &str) -> Option<String> {
        self.converter().redirect_name_to_adg(name)
    }

    pub fn is_valid_scriptlet_name(&self, name: &str) -> bool {
        self.validator().is_valid_scriptlet_name(name)
    }

    pub fn is_valid_scriptlet_rule(&self, rule: &str) -> bool {
        self.validator().is_valid_scriptlet_rule(rule)
    }

    pub fn is_valid_adg_redirect_rule(&self, rule: &str) -> bool {
        self.validator().is_valid_adg_redirect_rule(rule)
    }

    pub fn is_redirect_resource_compatible_with_adg(&self, name: &str) -> bool {
        self.validator().is_redirect_resource_compatible_with_adg(name)
    }

    /// Number of scriptlet names whose validity has been memoized.
    pub fn cached_name_count(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod unit_tests;
