//! Parsing, validation and conversion of scriptlet injection and redirect rules between the
//! AdGuard, uBlock Origin and Adblock Plus filter list dialects.
//!
//! The free functions in this module use a process-wide [`Engine`] built from the compatibility
//! table shipped with the crate. Build an [`Engine`] directly to supply a different table.

pub mod classifier;
pub mod compatibility;
pub mod converter;
#[cfg(feature = "css-validation")]
pub mod css_validation;
pub mod engine;
pub mod filters;
pub mod tokenizer;
pub mod validator;

use once_cell::sync::Lazy;

pub use classifier::{Dialect, RuleFamily, RuleKind};
pub use compatibility::{CompatibilityRecord, CompatibilityTable, RegistryError};
pub use converter::ConversionError;
pub use engine::Engine;
pub use tokenizer::SyntaxError;

static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::default);

pub fn convert_ubo_scriptlet_to_adg(rule: &str) -> Result<String, ConversionError> {
    DEFAULT_ENGINE.convert_ubo_scriptlet_to_adg(rule)
}

pub fn convert_abp_snippet_to_adg(rule: &str) -> Result<Vec<String>, ConversionError> {
    DEFAULT_ENGINE.convert_abp_snippet_to_adg(rule)
}

pub fn convert_scriptlet_to_adg(rule: &str) -> Result<Vec<String>, ConversionError> {
    DEFAULT_ENGINE.convert_scriptlet_to_adg(rule)
}

pub fn convert_adg_scriptlet_to_ubo(rule: &str) -> Result<Option<String>, ConversionError> {
    DEFAULT_ENGINE.convert_adg_scriptlet_to_ubo(rule)
}

pub fn convert_ubo_redirect_to_adg(rule: &str) -> Option<String> {
    DEFAULT_ENGINE.convert_ubo_redirect_to_adg(rule)
}

pub fn convert_abp_redirect_to_adg(rule: &str) -> Option<String> {
    DEFAULT_ENGINE.convert_abp_redirect_to_adg(rule)
}

pub fn convert_redirect_to_adg(rule: &str) -> Option<String> {
    DEFAULT_ENGINE.convert_redirect_to_adg(rule)
}

pub fn convert_adg_redirect_to_ubo(rule: &str) -> Result<String, ConversionError> {
    DEFAULT_ENGINE.convert_adg_redirect_to_ubo(rule)
}

pub fn convert_adg_to_ubo(rule: &str) -> Result<Option<String>, ConversionError> {
    DEFAULT_ENGINE.convert_adg_to_ubo(rule)
}

pub fn convert_redirect_name_to_adg(name: &str) -> Option<String> {
    DEFAULT_ENGINE.convert_redirect_name_to_adg(name)
}

pub fn is_valid_scriptlet_name(name: &str) -> bool {
    DEFAULT_ENGINE.is_valid_scriptlet_name(name)
}

pub fn is_valid_scriptlet_rule(rule: &str) -> bool {
    DEFAULT_ENGINE.is_valid_scriptlet_rule(rule)
}

pub fn is_valid_adg_redirect_rule(rule: &str) -> bool {
    DEFAULT_ENGINE.is_valid_adg_redirect_rule(rule)
}

pub fn is_redirect_resource_compatible_with_adg(name: &str) -> bool {
    DEFAULT_ENGINE.is_redirect_resource_compatible_with_adg(name)
}
