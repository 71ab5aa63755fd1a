//! Yes/no questions about scriptlet and redirect rules.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::trace;

use crate::classifier::{classify, is_comment, RuleFamily};
use crate::compatibility::Registry;
use crate::converter::Converter;
use crate::filters::redirect::{RedirectMarker, RedirectRule};
use crate::filters::scriptlet::ScriptletRule;

/// Memoized results of [`Validator::is_valid_scriptlet_name`]. Entries are written once and never
/// change for the lifetime of the registry they were computed against.
#[derive(Debug, Default)]
pub struct NameCache {
    names: RwLock<HashMap<String, bool>>,
}

impl NameCache {
    fn get(&self, name: &str) -> Option<bool> {
        self.names.read().ok()?.get(name).copied()
    }

    fn insert(&self, name: &str, valid: bool) {
        // A poisoned lock only costs us the memoization.
        if let Ok(mut names) = self.names.write() {
            names.entry(name.to_owned()).or_insert(valid);
        }
    }

    pub fn len(&self) -> usize {
        self.names.read().map(|names| names.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a Registry,
    names: &'a NameCache,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a Registry, names: &'a NameCache) -> Self {
        Self { registry, names }
    }

    /// Whether `name` is known under any of its spellings. The empty name is valid, as used by
    /// allowlist rules that disable every scriptlet on a site.
    pub fn is_valid_scriptlet_name(&self, name: &str) -> bool {
        if name.is_empty() {
            return true;
        }
        if let Some(valid) = self.names.get(name) {
            return valid;
        }

        let valid = self.registry.find_scriptlet(name).is_some();
        self.names.insert(name, valid);
        valid
    }

    /// Whether `rule` is a well-formed scriptlet rule, in any dialect, all of whose scriptlets are
    /// known.
    pub fn is_valid_scriptlet_rule(&self, rule: &str) -> bool {
        let kind = classify(rule, self.registry);
        if kind.family() != RuleFamily::ScriptletInjection {
            return false;
        }

        let converted = match Converter::new(self.registry, self.names).scriptlet_to_adg(rule) {
            Ok(converted) => converted,
            Err(e) => {
                trace!(rule, error = %e, "scriptlet rule does not convert");
                return false;
            }
        };

        !converted.is_empty()
            && converted.iter().all(|adg_rule| {
                ScriptletRule::parse_adg(adg_rule)
                    .map(|parsed| self.is_valid_scriptlet_name(&parsed.name))
                    .unwrap_or(false)
            })
    }

    /// Whether `rule` has exactly one `redirect=` or `redirect-rule=` modifier naming a known
    /// AdGuard resource.
    pub fn is_valid_adg_redirect_rule(&self, rule: &str) -> bool {
        self.adg_redirect(rule)
            .map(|redirect| redirect.has_single_marker())
            .unwrap_or(false)
    }

    pub fn is_redirect_resource_compatible_with_adg(&self, name: &str) -> bool {
        self.registry.is_adg_redirect(name)
    }

    pub fn is_ubo_redirect_compatible_with_adg(&self, rule: &str) -> bool {
        self.redirect(rule)
            .filter(|redirect| redirect.marker != RedirectMarker::Rewrite)
            .and_then(|redirect| self.registry.redirect_ubo_to_adg(&redirect.resource_name))
            .is_some()
    }

    pub fn is_abp_redirect_compatible_with_adg(&self, rule: &str) -> bool {
        self.redirect(rule)
            .filter(|redirect| redirect.marker == RedirectMarker::Rewrite)
            .and_then(|redirect| self.registry.redirect_abp_to_adg(&redirect.resource_name))
            .is_some()
    }

    pub fn is_adg_redirect_compatible_with_ubo(&self, rule: &str) -> bool {
        self.adg_redirect(rule)
            .and_then(|redirect| self.registry.redirect_adg_to_ubo(&redirect.resource_name))
            .is_some()
    }

    /// Whether a redirect rule names one of the content types uBO accepts on redirect rules.
    pub fn has_valid_content_type(&self, rule: &str) -> bool {
        self.redirect(rule)
            .map(|redirect| redirect.has_valid_content_type())
            .unwrap_or(false)
    }

    fn redirect(&self, rule: &str) -> Option<RedirectRule> {
        if is_comment(rule) {
            return None;
        }
        RedirectRule::parse(rule)
    }

    fn adg_redirect(&self, rule: &str) -> Option<RedirectRule> {
        self.redirect(rule).filter(|redirect| {
            redirect.marker != RedirectMarker::Rewrite
                && self.registry.is_adg_redirect(&redirect.resource_name)
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/validator.rs"]
mod unit_tests;
