#[cfg(test)]
mod tests {
    use super::super::*;

    fn table(json: &str) -> CompatibilityTable {
        CompatibilityTable::from_json(json).unwrap()
    }

    #[test]
    fn embedded_table_builds() {
        let registry = Registry::default();
        assert!(registry.scriptlets().len() > 40);
        assert!(registry.redirects().len() > 40);
    }

    #[test]
    fn parses_ubo_name_lists() {
        assert_eq!(
            parse_ubo_names(
                "abort-current-inline-script.js (acis.js), abort-current-script.js (acs.js)"
            ),
            vec![
                "abort-current-inline-script.js",
                "acis.js",
                "abort-current-script.js",
                "acs.js",
            ]
        );
        assert_eq!(
            parse_ubo_names("noeval.js (silent-noeval.js, noeval-silent.js)"),
            vec!["noeval.js", "silent-noeval.js", "noeval-silent.js"]
        );
        assert!(parse_ubo_names("").is_empty());
    }

    #[test]
    fn scriptlet_entry_fields() {
        let registry = Registry::default();
        let entry = registry.scriptlet_by_canonical_name("set-constant").unwrap();
        assert_eq!(entry.canonical_adg_name, "set-constant");
        assert_eq!(entry.ubo_aliases, vec!["set-constant.js", "set.js"]);
        assert_eq!(entry.first_ubo_alias(), Some("set-constant.js"));
        assert_eq!(entry.abp_alias, None);
        assert_eq!(entry.required_ubo_source_types, None);

        let entry = registry.scriptlet_by_canonical_name("log").unwrap();
        assert!(entry.ubo_aliases.is_empty());
        assert_eq!(entry.first_ubo_alias(), None);
        assert_eq!(entry.abp_alias.as_deref(), Some("log"));
    }

    #[test]
    fn scriptlet_ubo_alias_ignores_js_extension() {
        let registry = Registry::default();
        for alias in &["acis", "acis.js", "acs", "abort-current-script.js"] {
            assert_eq!(
                registry
                    .scriptlet_by_alias(Dialect::Ubo, alias)
                    .map(|entry| entry.canonical_adg_name.as_str()),
                Some("abort-current-inline-script"),
                "{}",
                alias
            );
        }
        assert!(registry.scriptlet_by_alias(Dialect::Ubo, "acis.jsx").is_none());
    }

    #[test]
    fn scriptlet_alias_per_dialect() {
        let registry = Registry::default();
        assert_eq!(
            registry
                .scriptlet_by_alias(Dialect::Abp, "prevent-listener")
                .map(|entry| entry.canonical_adg_name.as_str()),
            Some("prevent-addEventListener")
        );
        assert!(registry.scriptlet_by_alias(Dialect::Ubo, "prevent-listener").is_none());
        assert!(registry.scriptlet_by_alias(Dialect::Adg, "set").is_none());
        assert!(registry.scriptlet_by_alias(Dialect::Adg, "set-constant").is_some());
    }

    #[test]
    fn find_scriptlet_resolves_every_spelling() {
        let registry = Registry::default();
        let canonical = |name: &str| {
            registry
                .find_scriptlet(name)
                .map(|entry| entry.canonical_adg_name.clone())
        };

        assert_eq!(canonical("set-constant").as_deref(), Some("set-constant"));
        assert_eq!(canonical("ubo-set.js").as_deref(), Some("set-constant"));
        assert_eq!(canonical("ubo-set").as_deref(), Some("set-constant"));
        assert_eq!(canonical("nostif.js").as_deref(), Some("prevent-setTimeout"));
        assert_eq!(canonical("abp-cookie-remover").as_deref(), Some("remove-cookie"));
        assert_eq!(canonical("abp-log").as_deref(), Some("log"));
        assert_eq!(canonical("ubo-log.js"), None);
        assert_eq!(canonical("abp-set"), None);
        assert_eq!(canonical("totally-unknown-name"), None);
    }

    #[test]
    fn scriptlets_and_redirects_are_separate() {
        let registry = Registry::default();
        assert!(registry.scriptlet_by_canonical_name("noeval").is_some());
        assert!(registry.redirect_by_canonical_name("noeval").is_some());
        assert!(registry.scriptlet_by_canonical_name("noopjs").is_none());
        assert!(!registry.is_adg_redirect("set-constant"));
    }

    #[test]
    fn redirect_lookups() {
        let registry = Registry::default();
        assert!(registry.is_adg_redirect("noopjs"));
        assert!(!registry.is_adg_redirect("noop.js"));
        assert_eq!(registry.redirect_adg_to_ubo("noopjs"), Some("noop.js"));
        assert_eq!(registry.redirect_adg_to_ubo("noopvast-2.0"), None);
        assert_eq!(registry.redirect_ubo_to_adg("noop.js"), Some("noopjs"));
        assert_eq!(registry.redirect_ubo_to_adg("noopjs"), Some("noopjs"));
        assert_eq!(registry.redirect_abp_to_adg("blank-js"), Some("noopjs"));
        assert_eq!(registry.redirect_abp_to_adg("noopjs"), None);
    }

    #[test]
    fn redirect_names_keep_their_extension() {
        let registry = Registry::default();
        assert_eq!(registry.redirect_ubo_to_adg("noop"), None);
        assert_eq!(registry.redirect_ubo_to_adg("1x1.gif"), Some("1x1-transparent.gif"));
    }

    #[test]
    fn shared_ubo_alias_resolves_to_first_entry() {
        let registry = Registry::default();
        assert_eq!(
            registry.redirect_ubo_to_adg("google-analytics_ga.js"),
            Some("google-analytics-ga")
        );
        assert_eq!(
            registry.redirect_ubo_to_adg("google-analytics_analytics.js"),
            Some("google-analytics")
        );
        assert_eq!(
            registry.redirect_adg_to_ubo("google-analytics"),
            Some("google-analytics_analytics.js")
        );
    }

    #[test]
    fn required_source_types() {
        let registry = Registry::default();
        assert_eq!(registry.required_ubo_source_types("noopjs"), Some(&["script"][..]));
        assert_eq!(
            registry.required_ubo_source_types("googlesyndication-adsbygoogle"),
            Some(&["xmlhttprequest", "script"][..])
        );
        assert_eq!(
            registry.required_ubo_source_types("nooptext"),
            Some(&VALID_SOURCE_TYPES[..])
        );
        assert_eq!(registry.required_ubo_source_types("noopjson"), None);
        assert_eq!(registry.required_ubo_source_types("unknown"), None);
    }

    #[test]
    fn required_source_types_use_the_trimmed_name() {
        let registry =
            Registry::from_json(r#"{ "redirects": [{ "adg": " noopjs ", "ubo": "noop.js" }] }"#)
                .unwrap();
        assert_eq!(registry.required_ubo_source_types("noopjs"), Some(&["script"][..]));
    }

    #[test]
    fn custom_table() {
        let registry = Registry::from_table(&table(
            r#"{
                "scriptlets": [
                    { "adg": "first", "ubo": "shared.js (one.js)" },
                    { "adg": "second", "ubo": "shared.js, two.js", "abp": "second-snippet" }
                ]
            }"#,
        ))
        .unwrap();

        assert!(registry.redirects().is_empty());
        assert_eq!(
            registry
                .scriptlet_by_alias(Dialect::Ubo, "shared")
                .map(|entry| entry.canonical_adg_name.as_str()),
            Some("first")
        );
        assert_eq!(
            registry
                .scriptlet_by_alias(Dialect::Ubo, "two.js")
                .map(|entry| entry.canonical_adg_name.as_str()),
            Some("second")
        );
        assert_eq!(
            registry
                .scriptlet_by_alias(Dialect::Abp, "second-snippet")
                .map(|entry| entry.canonical_adg_name.as_str()),
            Some("second")
        );
    }

    #[test]
    fn table_errors() {
        assert!(matches!(
            Registry::from_json("not json"),
            Err(RegistryError::InvalidJson(_))
        ));
        assert!(matches!(
            Registry::from_json(r#"{ "scriptlets": [{ "adg": "" }] }"#),
            Err(RegistryError::EmptyCanonicalName)
        ));
        assert!(matches!(
            Registry::from_json(r#"{ "redirects": [{ "adg": "noopjs" }, { "adg": "noopjs" }] }"#),
            Err(RegistryError::DuplicateCanonicalName(name)) if name == "noopjs"
        ));
    }

    #[test]
    fn table_serializes_back() {
        let original = table(r#"{ "scriptlets": [{ "adg": "log", "abp": "log" }] }"#);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(
            json,
            r#"{"scriptlets":[{"adg":"log","abp":"log"}],"redirects":[]}"#
        );
    }
}
