//! Conversion of scriptlet and redirect rules between dialects.
//!
//! Rules are converted towards AdGuard syntax, which every other dialect can be expressed in, and
//! from AdGuard to uBlock Origin where uBO has an equivalent. Malformed input is reported as an
//! error; a rule that simply has no equivalent in the target dialect yields an empty result.

use thiserror::Error;
use tracing::debug;

use crate::classifier::{classify, is_adg_scriptlet_rule, is_comment, Dialect, RuleKind};
use crate::compatibility::{without_js_extension, Registry, ABP_ALIAS_PREFIX, UBO_ALIAS_PREFIX};
use crate::filters::redirect::{ubo_content_type_to_adg, RedirectMarker, RedirectRule};
use crate::filters::scriptlet::ScriptletRule;
use crate::tokenizer::{check_quotable, strip_outer_quotes, SyntaxError};
use crate::validator::{NameCache, Validator};

/// uBO scriptlets whose selector argument may itself contain commas.
const REMOVE_ATTR_CLASS_NAMES: [&str; 4] = ["remove-attr", "ra", "remove-class", "rc"];
/// Words allowed in the trailing "applying" argument of `remove-attr`/`remove-class`.
const APPLYING_KEYWORDS: [&str; 3] = ["asap", "stay", "complete"];
const ABP_RESOURCE_PREFIX: &str = "abp-resource:";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConversionError {
    #[error("malformed rule: {0}")]
    MalformedSyntax(#[from] SyntaxError),
    #[error("{0:?} is not an AdGuard redirect rule with a uBlock Origin equivalent")]
    UnsupportedRedirect(String),
    #[error("no content type can be inferred for redirect rule {0:?}")]
    UnderSpecifiedRedirect(String),
}

/// Where a rule passed to [`Converter::scriptlet_to_adg`] comes from, and therefore how it is
/// converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptletSource {
    Ubo,
    Abp,
    AdgValid,
    AdgInvalid,
    Other,
}

/// A bare `$` is a placeholder in uBO; AdGuard spells the same literal as `$$`.
fn dollar_to_adg(arg: String) -> String {
    if arg == "$" {
        "$$".to_owned()
    } else {
        arg
    }
}

fn is_applying_argument(arg: &str) -> bool {
    let mut words = arg.split_whitespace().peekable();
    words.peek().is_some() && words.all(|word| APPLYING_KEYWORDS.contains(&word))
}

/// `remove-attr` and `remove-class` take `(names, selector, applying)`. uBO lets an unescaped
/// selector spill over several arguments, which are glued back together here.
fn join_selector_arguments(mut args: Vec<String>) -> Result<Vec<String>, SyntaxError> {
    let applying = match args.last() {
        Some(last) if is_applying_argument(last) => args.pop(),
        _ => None,
    };

    if args.len() > 1 {
        let selector = args.split_off(1).join(", ");
        #[cfg(feature = "css-validation")]
        crate::css_validation::validate_selector(&selector)?;
        args.push(selector);
    }
    args.extend(applying);

    Ok(args)
}

/// Converts a uBlock Origin scriptlet rule to AdGuard syntax. The scriptlet name becomes
/// `ubo-<name>.js` and every argument is quoted.
///
/// ```
/// # use adblock_scriptlets::converter::ubo_scriptlet_to_adg;
/// assert_eq!(
///     ubo_scriptlet_to_adg("example.org##+js(abort-current-inline-script, $, popup)").unwrap(),
///     "example.org#%#//scriptlet('ubo-abort-current-inline-script.js', '$$', 'popup')",
/// );
/// ```
pub fn ubo_scriptlet_to_adg(rule: &str) -> Result<String, ConversionError> {
    if is_comment(rule) {
        return Ok(rule.to_owned());
    }

    let mut parsed = ScriptletRule::parse_ubo(rule)?;
    if parsed.name.is_empty() {
        return Ok(parsed.to_adg());
    }

    let ubo_name = without_js_extension(strip_outer_quotes(&parsed.name)).to_owned();
    let mut args: Vec<String> = std::mem::take(&mut parsed.args)
        .into_iter()
        .map(dollar_to_adg)
        .collect();
    if REMOVE_ATTR_CLASS_NAMES.contains(&ubo_name.as_str()) && args.len() > 1 {
        args = join_selector_arguments(args)?;
    }
    args.iter().try_for_each(|arg| check_quotable(arg))?;

    parsed.name = format!("{}{}.js", UBO_ALIAS_PREFIX, ubo_name);
    parsed.args = args;

    Ok(parsed.to_adg())
}

/// Converts an Adblock Plus snippet rule to AdGuard syntax, one rule per snippet statement.
pub fn abp_snippet_to_adg(rule: &str) -> Result<Vec<String>, ConversionError> {
    if is_comment(rule) {
        return Ok(vec![rule.to_owned()]);
    }

    ScriptletRule::parse_abp(rule)?
        .into_iter()
        .map(|mut statement| -> Result<String, ConversionError> {
            statement.args.iter().try_for_each(|arg| check_quotable(arg))?;
            statement.name = format!("{}{}", ABP_ALIAS_PREFIX, statement.name);
            Ok(statement.to_adg())
        })
        .collect()
}

/// Conversions that need to resolve names through the compatibility registry.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    registry: &'a Registry,
    validator: Validator<'a>,
}

impl<'a> Converter<'a> {
    pub fn new(registry: &'a Registry, names: &'a NameCache) -> Self {
        Self {
            registry,
            validator: Validator::new(registry, names),
        }
    }

    /// Determines how [`Converter::scriptlet_to_adg`] should treat `rule`. AdGuard rules are
    /// parsed to check their scriptlet name, so malformed ones are reported here.
    pub fn scriptlet_source(&self, rule: &str) -> Result<ScriptletSource, ConversionError> {
        let source = match classify(rule, self.registry) {
            RuleKind::Scriptlet(Dialect::Ubo) => ScriptletSource::Ubo,
            RuleKind::Scriptlet(Dialect::Abp) => ScriptletSource::Abp,
            RuleKind::Scriptlet(Dialect::Adg) => {
                let parsed = ScriptletRule::parse_adg(rule)?;
                if self.validator.is_valid_scriptlet_name(&parsed.name) {
                    ScriptletSource::AdgValid
                } else {
                    ScriptletSource::AdgInvalid
                }
            }
            RuleKind::Comment | RuleKind::Redirect(_) | RuleKind::Other => ScriptletSource::Other,
        };
        Ok(source)
    }

    /// Converts any scriptlet rule to AdGuard syntax. Valid AdGuard rules, comments and rules of
    /// other kinds are returned unchanged; an AdGuard rule naming an unknown scriptlet yields
    /// nothing.
    pub fn scriptlet_to_adg(&self, rule: &str) -> Result<Vec<String>, ConversionError> {
        match self.scriptlet_source(rule)? {
            ScriptletSource::Ubo => Ok(vec![ubo_scriptlet_to_adg(rule)?]),
            ScriptletSource::Abp => abp_snippet_to_adg(rule),
            ScriptletSource::AdgValid | ScriptletSource::Other => Ok(vec![rule.to_owned()]),
            ScriptletSource::AdgInvalid => {
                debug!(rule, "dropping AdGuard scriptlet rule with unknown name");
                Ok(vec![])
            }
        }
    }

    /// Converts an AdGuard scriptlet rule to uBlock Origin syntax. Returns `None` if `rule` is not
    /// an AdGuard scriptlet rule or the scriptlet has no uBO counterpart.
    pub fn adg_scriptlet_to_ubo(&self, rule: &str) -> Result<Option<String>, ConversionError> {
        if !is_adg_scriptlet_rule(rule) {
            return Ok(None);
        }

        let mut parsed = ScriptletRule::parse_adg(rule)?;
        if parsed.name.is_empty() {
            return Ok(Some(parsed.to_ubo()));
        }

        let entry = match self.registry.find_scriptlet(&parsed.name) {
            Some(entry) => entry,
            None => {
                debug!(name = %parsed.name, "unknown scriptlet, not converting to uBO");
                return Ok(None);
            }
        };

        let named_by_ubo_alias = parsed.name.starts_with(UBO_ALIAS_PREFIX);
        let ubo_name = if named_by_ubo_alias {
            &parsed.name[UBO_ALIAS_PREFIX.len()..]
        } else {
            match entry.first_ubo_alias() {
                Some(alias) => alias,
                None => {
                    debug!(name = %parsed.name, "scriptlet has no uBO equivalent");
                    return Ok(None);
                }
            }
        };
        let ubo_name = without_js_extension(ubo_name).to_owned();

        let mut args = std::mem::take(&mut parsed.args);
        match entry.canonical_adg_name.as_str() {
            "set-constant" => {
                if let Some(value) = args.get_mut(1) {
                    match value.as_str() {
                        "" | "''" => *value = "''".to_owned(),
                        "emptyArr" => *value = "[]".to_owned(),
                        "emptyObj" => *value = "{}".to_owned(),
                        _ => (),
                    }
                }
            }
            "prevent-fetch" => {
                if let Some(pattern) = args.first_mut() {
                    if matches!(pattern.as_str(), "*" | "" | "''") {
                        *pattern = "/^/".to_owned();
                    }
                }
            }
            _ => (),
        }
        if named_by_ubo_alias {
            for arg in args.iter_mut().filter(|arg| arg.as_str() == "$$") {
                *arg = "$".to_owned();
            }
        }

        parsed.name = ubo_name;
        parsed.args = args;

        Ok(Some(parsed.to_ubo()))
    }

    /// Converts a uBlock Origin redirect rule to AdGuard syntax, keeping its marker. The redirect
    /// priority is dropped.
    pub fn ubo_redirect_to_adg(&self, rule: &str) -> Option<String> {
        if is_comment(rule) {
            return Some(rule.to_owned());
        }

        let redirect = RedirectRule::parse(rule)?;
        if redirect.marker == RedirectMarker::Rewrite {
            return None;
        }
        let adg_name = self.registry.redirect_ubo_to_adg(&redirect.resource_name)?;

        Some(redirect.rewrite(redirect.marker, adg_name, ubo_content_type_to_adg, &[]))
    }

    /// Converts an Adblock Plus `rewrite=abp-resource:` rule to an AdGuard `redirect=` rule.
    pub fn abp_redirect_to_adg(&self, rule: &str) -> Option<String> {
        if is_comment(rule) {
            return Some(rule.to_owned());
        }

        let redirect = RedirectRule::parse(rule)?;
        if redirect.marker != RedirectMarker::Rewrite {
            return None;
        }
        let adg_name = self.registry.redirect_abp_to_adg(&redirect.resource_name)?;

        Some(redirect.rewrite(RedirectMarker::Redirect, adg_name, |modifier| modifier, &[]))
    }

    /// Converts a redirect rule of any dialect to AdGuard syntax.
    pub fn redirect_to_adg(&self, rule: &str) -> Option<String> {
        match classify(rule, self.registry) {
            RuleKind::Comment | RuleKind::Redirect(Dialect::Adg) => Some(rule.to_owned()),
            RuleKind::Redirect(Dialect::Ubo) => self.ubo_redirect_to_adg(rule),
            RuleKind::Redirect(Dialect::Abp) => self.abp_redirect_to_adg(rule),
            RuleKind::Scriptlet(_) | RuleKind::Other => None,
        }
    }

    /// Converts an AdGuard redirect rule to uBlock Origin syntax. uBO insists on an explicit
    /// content type, so one is added when the rule has none and the resource implies one.
    ///
    /// ```
    /// # use adblock_scriptlets::Engine;
    /// let engine = Engine::default();
    /// assert_eq!(
    ///     engine.convert_adg_redirect_to_ubo("||example.com^$script,redirect=noopjs:99").unwrap(),
    ///     "||example.com^$script,redirect=noop.js",
    /// );
    /// ```
    pub fn adg_redirect_to_ubo(&self, rule: &str) -> Result<String, ConversionError> {
        let unsupported = || ConversionError::UnsupportedRedirect(rule.to_owned());
        if is_comment(rule) {
            return Err(unsupported());
        }

        let redirect = RedirectRule::parse(rule).ok_or_else(unsupported)?;
        if redirect.marker == RedirectMarker::Rewrite
            || !self.registry.is_adg_redirect(&redirect.resource_name)
        {
            return Err(unsupported());
        }
        let ubo_name = self
            .registry
            .redirect_adg_to_ubo(&redirect.resource_name)
            .ok_or_else(unsupported)?;

        if redirect.has_valid_content_type() {
            return Ok(redirect.rewrite(redirect.marker, ubo_name, |modifier| modifier, &[]));
        }

        let content_types = self
            .registry
            .required_ubo_source_types(&redirect.resource_name)
            .ok_or_else(|| ConversionError::UnderSpecifiedRedirect(rule.to_owned()))?;
        Ok(redirect.rewrite(redirect.marker, ubo_name, |modifier| modifier, content_types))
    }

    /// Converts an AdGuard scriptlet or redirect rule to uBlock Origin syntax.
    pub fn adg_to_ubo(&self, rule: &str) -> Result<Option<String>, ConversionError> {
        match classify(rule, self.registry) {
            RuleKind::Scriptlet(Dialect::Adg) => self.adg_scriptlet_to_ubo(rule),
            RuleKind::Redirect(Dialect::Adg) => self.adg_redirect_to_ubo(rule).map(Some),
            _ => Ok(None),
        }
    }

    /// Resolves a bare redirect resource name of any dialect to its AdGuard name.
    pub fn redirect_name_to_adg(&self, name: &str) -> Option<String> {
        if self.registry.is_adg_redirect(name) {
            return Some(name.to_owned());
        }
        self.registry
            .redirect_ubo_to_adg(name)
            .or_else(|| {
                let abp_name = name.strip_prefix(ABP_RESOURCE_PREFIX).unwrap_or(name);
                self.registry.redirect_abp_to_adg(abp_name)
            })
            .map(str::to_owned)
    }
}

#[cfg(test)]
#[path = "../tests/unit/converter.rs"]
mod unit_tests;
