//! The compatibility table records, for every AdGuard scriptlet and redirect resource, the names
//! that uBlock Origin and Adblock Plus use for the same behavior.
//!
//! A [`Registry`] is built from the table exactly once. All name lookups afterwards go through
//! precomputed indexes, so converting a rule never rescans the table.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::classifier::Dialect;

static EMBEDDED_TABLE: &str = include_str!("../data/compatibility-table.json");

/// Prefix marking a uBlock Origin scriptlet name inside an AdGuard rule.
pub const UBO_ALIAS_PREFIX: &str = "ubo-";
/// Prefix marking an Adblock Plus snippet name inside an AdGuard rule.
pub const ABP_ALIAS_PREFIX: &str = "abp-";

/// Content types that satisfy uBlock Origin's requirement for an explicit type on redirect rules.
pub const VALID_SOURCE_TYPES: [&str; 7] = [
    "image",
    "media",
    "subdocument",
    "stylesheet",
    "script",
    "xmlhttprequest",
    "other",
];

/// Content types to add to a redirect rule converted for uBlock Origin when the source rule has
/// none. Redirects missing from this list cannot be converted without a content type.
static ABSENT_SOURCE_TYPE_REPLACEMENT: [(&str, &[&str]); 10] = [
    ("nooptext", &VALID_SOURCE_TYPES),
    ("noopcss", &["stylesheet"]),
    ("noopjs", &["script"]),
    ("noopframe", &["subdocument"]),
    ("1x1-transparent.gif", &["image"]),
    ("noopmp3-0.1s", &["media"]),
    ("noopmp4-1s", &["media"]),
    ("googlesyndication-adsbygoogle", &["xmlhttprequest", "script"]),
    ("google-analytics", &["script"]),
    ("googletagservices-gpt", &["script"]),
];

/// Possible failures when building a [`Registry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("compatibility table is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("compatibility record without an AdGuard name")]
    EmptyCanonicalName,
    #[error("AdGuard name {0:?} is listed more than once")]
    DuplicateCanonicalName(String),
}

/// One line of the compatibility table, as stored on disk.
///
/// - `adg`: the canonical AdGuard name
///
/// - `ubo`: uBlock Origin names, written as `"main.js (alias.js), other.js"`
///
/// - `abp`: the Adblock Plus name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRecord {
    pub adg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abp: Option<String>,
}

/// The full table: scriptlets and redirect resources are kept separately since their names
/// overlap (e.g. `noeval` is both).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityTable {
    #[serde(default)]
    pub scriptlets: Vec<CompatibilityRecord>,
    #[serde(default)]
    pub redirects: Vec<CompatibilityRecord>,
}

impl CompatibilityTable {
    pub fn from_json(data: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(data)?)
    }

    /// The table shipped with this crate.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_TABLE).expect("embedded compatibility table is valid JSON")
    }
}

/// A canonical AdGuard name together with its aliases in the other dialects.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityEntry {
    pub canonical_adg_name: String,
    /// uBlock Origin names, in table order. The first one is used when converting to uBO.
    pub ubo_aliases: Vec<String>,
    pub abp_alias: Option<String>,
    /// Only ever set for redirect resources.
    pub required_ubo_source_types: Option<&'static [&'static str]>,
}

impl CompatibilityEntry {
    fn from_record(record: &CompatibilityRecord, is_redirect: bool) -> Self {
        let canonical_adg_name = record.adg.trim();
        let required_ubo_source_types = if is_redirect {
            ABSENT_SOURCE_TYPE_REPLACEMENT
                .iter()
                .find(|(name, _)| *name == canonical_adg_name)
                .map(|(_, types)| *types)
        } else {
            None
        };

        Self {
            canonical_adg_name: canonical_adg_name.to_owned(),
            ubo_aliases: record.ubo.as_deref().map(parse_ubo_names).unwrap_or_default(),
            abp_alias: record
                .abp
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
            required_ubo_source_types,
        }
    }

    pub fn first_ubo_alias(&self) -> Option<&str> {
        self.ubo_aliases.first().map(String::as_str)
    }
}

/// Splits `"abort-current-inline-script.js (acis.js), abort-current-script.js (acs.js)"` into
/// its four names, preserving order.
fn parse_ubo_names(names: &str) -> Vec<String> {
    names
        .split(|c: char| c == ',' || c == '(' || c == ')' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

fn exact_name(name: &str) -> &str {
    name
}

pub(crate) fn without_js_extension(scriptlet_name: &str) -> &str {
    scriptlet_name.strip_suffix(".js").unwrap_or(scriptlet_name)
}

/// Maps every known name of a dialect to the position of the first entry carrying it.
#[derive(Debug, Default)]
struct NameIndex {
    adg: HashMap<String, usize>,
    ubo: HashMap<String, usize>,
    abp: HashMap<String, usize>,
}

impl NameIndex {
    fn build(
        entries: &[CompatibilityEntry],
        ubo_key: fn(&str) -> &str,
        kind: &'static str,
    ) -> Result<Self, RegistryError> {
        let mut index = Self::default();

        for (position, entry) in entries.iter().enumerate() {
            if entry.canonical_adg_name.is_empty() {
                return Err(RegistryError::EmptyCanonicalName);
            }
            if index.adg.insert(entry.canonical_adg_name.clone(), position).is_some() {
                return Err(RegistryError::DuplicateCanonicalName(entry.canonical_adg_name.clone()));
            }
            for alias in &entry.ubo_aliases {
                insert_first(&mut index.ubo, ubo_key(alias), position, entries, kind);
            }
            if let Some(alias) = &entry.abp_alias {
                insert_first(&mut index.abp, alias, position, entries, kind);
            }
        }

        Ok(index)
    }
}

/// Aliases shared between entries are resolved in favor of the earliest entry. The table has
/// historically contained such collisions, so they are reported instead of rejected.
fn insert_first(
    map: &mut HashMap<String, usize>,
    alias: &str,
    position: usize,
    entries: &[CompatibilityEntry],
    kind: &'static str,
) {
    match map.entry(alias.to_owned()) {
        Entry::Vacant(slot) => {
            slot.insert(position);
        }
        Entry::Occupied(slot) if *slot.get() != position => {
            warn!(
                alias,
                kept = %entries[*slot.get()].canonical_adg_name,
                ignored = %entries[position].canonical_adg_name,
                "{} alias is listed for more than one AdGuard name",
                kind
            );
        }
        Entry::Occupied(_) => (),
    }
}

/// Read-only lookup structure over a [`CompatibilityTable`].
#[derive(Debug)]
pub struct Registry {
    scriptlets: Vec<CompatibilityEntry>,
    redirects: Vec<CompatibilityEntry>,
    scriptlet_names: NameIndex,
    redirect_names: NameIndex,
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_table(&CompatibilityTable::embedded())
            .expect("embedded compatibility table is well-formed")
    }
}

impl Registry {
    pub fn from_table(table: &CompatibilityTable) -> Result<Self, RegistryError> {
        let scriptlets: Vec<_> = table
            .scriptlets
            .iter()
            .map(|record| CompatibilityEntry::from_record(record, false))
            .collect();
        let redirects: Vec<_> = table
            .redirects
            .iter()
            .map(|record| CompatibilityEntry::from_record(record, true))
            .collect();

        // uBO allows omitting `.js` from scriptlet names, but not from redirect resource names.
        let scriptlet_names = NameIndex::build(&scriptlets, without_js_extension, "scriptlet")?;
        let redirect_names = NameIndex::build(&redirects, exact_name, "redirect")?;

        debug!(
            scriptlets = scriptlets.len(),
            redirects = redirects.len(),
            "built compatibility registry"
        );

        Ok(Self {
            scriptlets,
            redirects,
            scriptlet_names,
            redirect_names,
        })
    }

    pub fn from_json(data: &str) -> Result<Self, RegistryError> {
        Self::from_table(&CompatibilityTable::from_json(data)?)
    }

    pub fn scriptlets(&self) -> &[CompatibilityEntry] {
        &self.scriptlets
    }

    pub fn redirects(&self) -> &[CompatibilityEntry] {
        &self.redirects
    }

    pub fn scriptlet_by_canonical_name(&self, name: &str) -> Option<&CompatibilityEntry> {
        self.scriptlet_names.adg.get(name).map(|&i| &self.scriptlets[i])
    }

    /// Looks up a scriptlet by the name a given dialect knows it under. uBO names match with or
    /// without their `.js` extension.
    pub fn scriptlet_by_alias(&self, dialect: Dialect, alias: &str) -> Option<&CompatibilityEntry> {
        let position = match dialect {
            Dialect::Adg => self.scriptlet_names.adg.get(alias),
            Dialect::Ubo => self.scriptlet_names.ubo.get(without_js_extension(alias)),
            Dialect::Abp => self.scriptlet_names.abp.get(alias),
        };
        position.map(|&i| &self.scriptlets[i])
    }

    /// Resolves any name that may appear in an AdGuard scriptlet rule: the canonical name, a
    /// `ubo-`/`abp-` prefixed alias, or a bare uBO name.
    pub fn find_scriptlet(&self, name: &str) -> Option<&CompatibilityEntry> {
        if let Some(entry) = self.scriptlet_by_canonical_name(name) {
            return Some(entry);
        }
        if let Some(ubo_name) = name.strip_prefix(UBO_ALIAS_PREFIX) {
            return self.scriptlet_by_alias(Dialect::Ubo, ubo_name);
        }
        if let Some(abp_name) = name.strip_prefix(ABP_ALIAS_PREFIX) {
            return self.scriptlet_by_alias(Dialect::Abp, abp_name);
        }
        self.scriptlet_by_alias(Dialect::Ubo, name)
    }

    pub fn redirect_by_canonical_name(&self, name: &str) -> Option<&CompatibilityEntry> {
        self.redirect_names.adg.get(name).map(|&i| &self.redirects[i])
    }

    pub fn is_adg_redirect(&self, name: &str) -> bool {
        self.redirect_names.adg.contains_key(name)
    }

    pub fn redirect_adg_to_ubo(&self, adg_name: &str) -> Option<&str> {
        self.redirect_by_canonical_name(adg_name)
            .and_then(CompatibilityEntry::first_ubo_alias)
    }

    pub fn redirect_ubo_to_adg(&self, ubo_name: &str) -> Option<&str> {
        self.redirect_names
            .ubo
            .get(ubo_name)
            .map(|&i| self.redirects[i].canonical_adg_name.as_str())
    }

    pub fn redirect_abp_to_adg(&self, abp_name: &str) -> Option<&str> {
        self.redirect_names
            .abp
            .get(abp_name)
            .map(|&i| self.redirects[i].canonical_adg_name.as_str())
    }

    /// Content types to synthesize for uBO when an AdGuard redirect rule specifies none.
    pub fn required_ubo_source_types(&self, adg_name: &str) -> Option<&'static [&'static str]> {
        self.redirect_by_canonical_name(adg_name)
            .and_then(|entry| entry.required_ubo_source_types)
    }
}

#[cfg(test)]
#[path = "../tests/unit/compatibility.rs"]
mod unit_tests;
