//! Given a single line of a filter list, determines which dialect and rule family it belongs to.
//! Rules this crate does not handle are classified as [`RuleKind::Other`] and are passed through
//! unchanged by the converters.

use memchr::memmem;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::compatibility::Registry;
use crate::filters::redirect::{RedirectMarker, RedirectRule};

pub(crate) const ADG_SCRIPTLET_MASK: &str = "#%#//scriptlet";
pub(crate) const ADG_SCRIPTLET_EXCEPTION_MASK: &str = "#@%#//scriptlet";
pub(crate) const UBO_SCRIPTLET_MASK_1: &str = "##+js";
pub(crate) const UBO_SCRIPTLET_MASK_2: &str = "##script:inject";
pub(crate) const UBO_SCRIPTLET_EXCEPTION_MASK_1: &str = "#@#+js";
pub(crate) const UBO_SCRIPTLET_EXCEPTION_MASK_2: &str = "#@#script:inject";
pub(crate) const ABP_SCRIPTLET_MASK: &str = "#$#";
pub(crate) const ABP_SCRIPTLET_EXCEPTION_MASK: &str = "#@$#";

pub(crate) static UBO_SCRIPTLET_MASK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#@?#script:inject|#@?#\s*\+js").unwrap());
/// ABP snippets share their `#$#` separator with CSS injection rules like `#$#body { color: red }`.
static CSS_INJECTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#@?\$#.+?\{.*\}\s*$").unwrap());

/// The filter list syntaxes understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// AdGuard
    Adg,
    /// uBlock Origin
    Ubo,
    /// Adblock Plus
    Abp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFamily {
    ScriptletInjection,
    Redirect,
    Other,
}

/// Result of classifying a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Comment,
    Scriptlet(Dialect),
    Redirect(Dialect),
    Other,
}

impl RuleKind {
    pub fn family(&self) -> RuleFamily {
        match self {
            RuleKind::Scriptlet(_) => RuleFamily::ScriptletInjection,
            RuleKind::Redirect(_) => RuleFamily::Redirect,
            RuleKind::Comment | RuleKind::Other => RuleFamily::Other,
        }
    }

    pub fn dialect(&self) -> Option<Dialect> {
        match self {
            RuleKind::Scriptlet(dialect) | RuleKind::Redirect(dialect) => Some(*dialect),
            RuleKind::Comment | RuleKind::Other => None,
        }
    }
}

#[inline]
fn contains(rule: &str, mask: &str) -> bool {
    memmem::find(rule.as_bytes(), mask.as_bytes()).is_some()
}

pub fn is_comment(rule: &str) -> bool {
    rule.starts_with('!')
}

pub fn is_adg_scriptlet_rule(rule: &str) -> bool {
    !is_comment(rule)
        && (contains(rule, ADG_SCRIPTLET_MASK) || contains(rule, ADG_SCRIPTLET_EXCEPTION_MASK))
}

pub fn is_ubo_scriptlet_rule(rule: &str) -> bool {
    !is_comment(rule)
        && (contains(rule, UBO_SCRIPTLET_MASK_1)
            || contains(rule, UBO_SCRIPTLET_MASK_2)
            || contains(rule, UBO_SCRIPTLET_EXCEPTION_MASK_1)
            || contains(rule, UBO_SCRIPTLET_EXCEPTION_MASK_2))
        && UBO_SCRIPTLET_MASK_RE.is_match(rule)
}

pub fn is_abp_snippet_rule(rule: &str) -> bool {
    !is_comment(rule)
        && (contains(rule, ABP_SCRIPTLET_MASK) || contains(rule, ABP_SCRIPTLET_EXCEPTION_MASK))
        && !CSS_INJECTION_RE.is_match(rule)
}

/// Determines the dialect of a redirect rule. `rewrite=abp-resource:` only exists in Adblock Plus;
/// for `redirect=` and `redirect-rule=` the resource name decides, with AdGuard names taking
/// precedence since such rules need no conversion.
fn redirect_dialect(rule: &str, registry: &Registry) -> Option<Dialect> {
    let redirect = RedirectRule::parse(rule)?;
    if redirect.marker == RedirectMarker::Rewrite {
        return Some(Dialect::Abp);
    }
    if registry.is_adg_redirect(&redirect.resource_name) {
        Some(Dialect::Adg)
    } else if registry.redirect_ubo_to_adg(&redirect.resource_name).is_some() {
        Some(Dialect::Ubo)
    } else {
        None
    }
}

/// Classifies `rule`. When the text carries markers of more than one scriptlet dialect it is not
/// possible to tell which one was meant, and the rule is reported as [`RuleKind::Other`].
pub fn classify(rule: &str, registry: &Registry) -> RuleKind {
    if is_comment(rule) {
        return RuleKind::Comment;
    }

    let mut scriptlet_dialects = [
        (Dialect::Adg, is_adg_scriptlet_rule(rule)),
        (Dialect::Ubo, is_ubo_scriptlet_rule(rule)),
        (Dialect::Abp, is_abp_snippet_rule(rule)),
    ]
    .into_iter()
    .filter_map(|(dialect, matched)| if matched { Some(dialect) } else { None });

    let kind = match (scriptlet_dialects.next(), scriptlet_dialects.next()) {
        (Some(dialect), None) => RuleKind::Scriptlet(dialect),
        (Some(_), Some(_)) => RuleKind::Other,
        (None, _) => redirect_dialect(rule, registry)
            .map(RuleKind::Redirect)
            .unwrap_or(RuleKind::Other),
    };
    trace!(rule, ?kind, "classified rule");

    kind
}

#[cfg(test)]
#[path = "../tests/unit/classifier.rs"]
mod unit_tests;
