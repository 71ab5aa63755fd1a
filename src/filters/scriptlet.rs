//! Cosmetic rules that inject a named scriptlet into matching pages.
//!
//! - AdGuard: `example.org#%#//scriptlet('set-constant', 'ads', 'false')`
//! - uBlock Origin: `example.org##+js(set-constant, ads, false)`
//! - Adblock Plus: `example.org#$#abort-on-property-read ads; log hello`

use itertools::Itertools;
use memchr::memmem;

use crate::classifier::{
    ABP_SCRIPTLET_EXCEPTION_MASK, ABP_SCRIPTLET_MASK, ADG_SCRIPTLET_EXCEPTION_MASK,
    ADG_SCRIPTLET_MASK, UBO_SCRIPTLET_EXCEPTION_MASK_1 as UBO_SCRIPTLET_EXCEPTION_MASK,
    UBO_SCRIPTLET_MASK_1 as UBO_SCRIPTLET_MASK, UBO_SCRIPTLET_MASK_RE,
};
use crate::tokenizer::{
    escape_delimiter, split_by_unescaped, split_outside_quotes, split_sentence,
    strip_outer_quotes, tokenize_arguments, wrap_in_single_quotes, SyntaxError,
};

/// Struct representing a parsed scriptlet rule.
///
/// `args` hold the arguments as written in the source dialect: AdGuard arguments are unquoted,
/// uBlock Origin and Adblock Plus arguments may still carry their own quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptletRule {
    pub domains: String,
    pub exception: bool,
    /// Empty only for an AdGuard or uBO allowlist rule that disables every scriptlet.
    pub name: String,
    pub args: Vec<String>,
}

fn find(rule: &str, mask: &str) -> Option<usize> {
    memmem::find(rule.as_bytes(), mask.as_bytes())
}

impl ScriptletRule {
    fn from_tokens(
        domains: &str,
        exception: bool,
        mut tokens: Vec<String>,
    ) -> Result<Self, SyntaxError> {
        if tokens.is_empty() {
            if !exception {
                return Err(SyntaxError::MissingScriptletName);
            }
            tokens.push(String::new());
        }
        let name = tokens.remove(0);
        if name.is_empty() && (!exception || !tokens.is_empty()) {
            return Err(SyntaxError::MissingScriptletName);
        }

        Ok(Self {
            domains: domains.to_owned(),
            exception,
            name,
            args: tokens,
        })
    }

    /// Parses `domains#%#//scriptlet(...)` or its `#@%#` exception form.
    pub fn parse_adg(rule: &str) -> Result<Self, SyntaxError> {
        let (index, mask, exception) = match find(rule, ADG_SCRIPTLET_EXCEPTION_MASK) {
            Some(index) => (index, ADG_SCRIPTLET_EXCEPTION_MASK, true),
            None => (
                find(rule, ADG_SCRIPTLET_MASK).ok_or(SyntaxError::MissingArguments)?,
                ADG_SCRIPTLET_MASK,
                false,
            ),
        };

        let arguments = rule[index + mask.len()..].trim();
        if arguments.is_empty() {
            return Err(SyntaxError::MissingArguments);
        }

        Self::from_tokens(&rule[..index], exception, tokenize_arguments(arguments)?)
    }

    /// Parses `domains##+js(...)`, `domains##script:inject(...)` and their `#@#` exception forms.
    pub fn parse_ubo(rule: &str) -> Result<Self, SyntaxError> {
        let mask = UBO_SCRIPTLET_MASK_RE
            .find(rule)
            .ok_or(SyntaxError::MissingArguments)?;
        let exception = mask.as_str().contains('@');

        let rest = rule[mask.end()..].trim();
        let arguments = rest
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or(SyntaxError::MissingArguments)?;

        let tokens = if arguments.trim().is_empty() {
            vec![]
        } else {
            split_by_unescaped(arguments, ',')
        };

        Self::from_tokens(&rule[..mask.start()], exception, tokens)
    }

    /// Parses an Adblock Plus snippet rule. Statements separated by `;` each become one rule, in
    /// source order.
    pub fn parse_abp(rule: &str) -> Result<Vec<Self>, SyntaxError> {
        let (index, mask, exception) = match find(rule, ABP_SCRIPTLET_EXCEPTION_MASK) {
            Some(index) => (index, ABP_SCRIPTLET_EXCEPTION_MASK, true),
            None => (
                find(rule, ABP_SCRIPTLET_MASK).ok_or(SyntaxError::MissingArguments)?,
                ABP_SCRIPTLET_MASK,
                false,
            ),
        };
        let domains = &rule[..index];

        let rules = split_outside_quotes(&rule[index + mask.len()..], ';')
            .into_iter()
            .map(split_sentence)
            .filter(|words| !words.is_empty())
            .map(|words| Self {
                domains: domains.to_owned(),
                exception,
                name: strip_outer_quotes(words[0]).to_owned(),
                args: words[1..].iter().map(|word| word.to_string()).collect(),
            })
            .collect::<Vec<_>>();

        if rules.is_empty() {
            return Err(SyntaxError::EmptySnippet);
        }
        Ok(rules)
    }

    /// Formats the rule in AdGuard syntax, quoting the name and every argument.
    pub fn to_adg(&self) -> String {
        let mask = if self.exception {
            ADG_SCRIPTLET_EXCEPTION_MASK
        } else {
            ADG_SCRIPTLET_MASK
        };

        let arguments = if self.name.is_empty() && self.args.is_empty() {
            String::new()
        } else {
            std::iter::once(&self.name)
                .chain(self.args.iter())
                .map(|arg| wrap_in_single_quotes(arg))
                .join(", ")
        };

        format!("{}{}({})", self.domains, mask, arguments)
    }

    /// Formats the rule in uBlock Origin syntax. Arguments are written unquoted, so literal commas
    /// are escaped.
    pub fn to_ubo(&self) -> String {
        let mask = if self.exception {
            UBO_SCRIPTLET_EXCEPTION_MASK
        } else {
            UBO_SCRIPTLET_MASK
        };

        let arguments = std::iter::once(self.name.clone())
            .chain(self.args.iter().map(|arg| escape_delimiter(arg, ',')))
            .filter(|arg| !arg.is_empty() || !self.name.is_empty())
            .join(", ");

        format!("{}{}({})", self.domains, mask, arguments)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/scriptlet.rs"]
mod unit_tests;
