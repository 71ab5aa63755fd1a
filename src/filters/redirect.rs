//! Network rules that answer a matching request with a mock resource instead of blocking it,
//! e.g. `||example.com/ads.js$script,redirect=noopjs`.

use memchr::memrchr as find_char_reverse;

use crate::compatibility::VALID_SOURCE_TYPES;

pub(crate) const REDIRECT_MARKER: &str = "redirect=";
pub(crate) const REDIRECT_RULE_MARKER: &str = "redirect-rule=";
pub(crate) const ABP_REWRITE_MARKER: &str = "rewrite=abp-resource:";

/// The modifier that names the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMarker {
    /// `redirect=`, AdGuard and uBlock Origin
    Redirect,
    /// `redirect-rule=`, AdGuard and uBlock Origin
    RedirectRule,
    /// `rewrite=abp-resource:`, Adblock Plus
    Rewrite,
}

impl RedirectMarker {
    pub fn prefix(&self) -> &'static str {
        match self {
            RedirectMarker::Redirect => REDIRECT_MARKER,
            RedirectMarker::RedirectRule => REDIRECT_RULE_MARKER,
            RedirectMarker::Rewrite => ABP_REWRITE_MARKER,
        }
    }

    fn of(modifier: &str) -> Option<Self> {
        [
            RedirectMarker::Redirect,
            RedirectMarker::RedirectRule,
            RedirectMarker::Rewrite,
        ]
        .into_iter()
        .find(|marker| modifier.starts_with(marker.prefix()))
    }
}

/// Struct representing a parsed redirect rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectRule {
    /// Everything before the modifier list, including a leading `@@`.
    pub base: String,
    pub exception: bool,
    pub modifiers: Vec<String>,
    pub marker: RedirectMarker,
    /// Resource name with any `:<priority>` suffix removed.
    pub resource_name: String,
    /// uBO's redirect priority. Not carried over by any conversion.
    pub priority: Option<i32>,
    marker_index: usize,
    marker_count: usize,
}

/// Separates uBO's `noop.js:10` into the resource name and its priority.
pub fn split_priority(resource: &str) -> (&str, Option<i32>) {
    if let Some(colon) = resource.rfind(':') {
        if let Ok(priority) = resource[colon + 1..].parse::<i32>() {
            return (&resource[..colon], Some(priority));
        }
    }
    (resource, None)
}

/// Renames uBO's shorthand content types to the names AdGuard and [`VALID_SOURCE_TYPES`] use.
pub(crate) fn ubo_content_type_to_adg(modifier: &str) -> &str {
    match modifier {
        "xhr" => "xmlhttprequest",
        "~xhr" => "~xmlhttprequest",
        "css" => "stylesheet",
        "~css" => "~stylesheet",
        "frame" => "subdocument",
        "~frame" => "~subdocument",
        _ => modifier,
    }
}

impl RedirectRule {
    /// Parses a network rule carrying a redirect-family modifier. `redirect=` is preferred over
    /// `redirect-rule=`. A repeated marker, or `rewrite=abp-resource:` next to any other redirect
    /// modifier, yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let options_index = find_char_reverse(b'$', line.as_bytes())?;

        // slicing here is safe; the first byte after '$' will be a character boundary
        let base = &line[..options_index];
        let modifiers: Vec<String> = line[options_index + 1..]
            .split(',')
            .map(|modifier| modifier.trim().to_owned())
            .collect();

        let markers: Vec<(usize, RedirectMarker)> = modifiers
            .iter()
            .enumerate()
            .filter_map(|(i, modifier)| RedirectMarker::of(modifier).map(|marker| (i, marker)))
            .collect();
        let count = |wanted: RedirectMarker| markers.iter().filter(|(_, m)| *m == wanted).count();
        if count(RedirectMarker::Redirect) > 1
            || count(RedirectMarker::RedirectRule) > 1
            || (count(RedirectMarker::Rewrite) > 0 && markers.len() > 1)
        {
            return None;
        }

        let (marker_index, marker) = [
            RedirectMarker::Redirect,
            RedirectMarker::RedirectRule,
            RedirectMarker::Rewrite,
        ]
        .into_iter()
        .find_map(|wanted| markers.iter().copied().find(|(_, m)| *m == wanted))?;

        let (resource_name, priority) =
            split_priority(&modifiers[marker_index][marker.prefix().len()..]);
        let resource_name = resource_name.to_owned();

        Some(Self {
            base: base.to_owned(),
            exception: base.starts_with("@@"),
            modifiers,
            marker,
            resource_name,
            priority,
            marker_index,
            marker_count: markers.len(),
        })
    }

    /// Whether the rule carries no redirect modifier besides the one that was parsed.
    pub fn has_single_marker(&self) -> bool {
        self.marker_count == 1
    }

    /// Whether any of uBO's accepted content types is among the modifiers, uBO's `xhr`, `css`
    /// and `frame` shorthands included.
    pub fn has_valid_content_type(&self) -> bool {
        self.modifiers
            .iter()
            .any(|modifier| VALID_SOURCE_TYPES.contains(&ubo_content_type_to_adg(modifier)))
    }

    /// Rebuilds the rule with the redirect modifier replaced by `marker` naming `resource_name`.
    /// A second, less preferred redirect modifier is dropped. Other modifiers pass through
    /// `map_modifier`, and `extra_modifiers` are appended.
    pub fn rewrite<F>(
        &self,
        marker: RedirectMarker,
        resource_name: &str,
        map_modifier: F,
        extra_modifiers: &[&str],
    ) -> String
    where
        F: Fn(&str) -> &str,
    {
        let mut modifiers: Vec<String> = self
            .modifiers
            .iter()
            .enumerate()
            .filter(|(i, modifier)| {
                *i == self.marker_index || RedirectMarker::of(modifier.as_str()).is_none()
            })
            .map(|(i, modifier)| {
                if i == self.marker_index {
                    format!("{}{}", marker.prefix(), resource_name)
                } else {
                    map_modifier(modifier.as_str()).to_owned()
                }
            })
            .collect();
        modifiers.extend(extra_modifiers.iter().map(|modifier| modifier.to_string()));

        format!("{}${}", self.base, modifiers.join(","))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/redirect.rs"]
mod unit_tests;
