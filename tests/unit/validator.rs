#[cfg(test)]
mod tests {
    use super::super::*;

    fn check<F: FnOnce(Validator)>(f: F) {
        let registry = Registry::default();
        let names = NameCache::default();
        f(Validator::new(&registry, &names));
    }

    #[test]
    fn scriptlet_names() {
        check(|validator| {
            assert!(validator.is_valid_scriptlet_name(""));
            assert!(validator.is_valid_scriptlet_name("set-constant"));
            assert!(validator.is_valid_scriptlet_name("ubo-set.js"));
            assert!(validator.is_valid_scriptlet_name("ubo-set"));
            assert!(validator.is_valid_scriptlet_name("nostif"));
            assert!(validator.is_valid_scriptlet_name("abp-log"));
            assert!(!validator.is_valid_scriptlet_name("abp-unknown"));
            assert!(!validator.is_valid_scriptlet_name("totally-unknown-name"));
        });
    }

    #[test]
    fn scriptlet_names_are_memoized() {
        let registry = Registry::default();
        let names = NameCache::default();
        let validator = Validator::new(&registry, &names);

        assert!(names.is_empty());
        assert!(validator.is_valid_scriptlet_name(""));
        assert!(names.is_empty());

        assert!(validator.is_valid_scriptlet_name("set-constant"));
        assert!(!validator.is_valid_scriptlet_name("totally-unknown-name"));
        assert_eq!(names.len(), 2);

        assert!(validator.is_valid_scriptlet_name("set-constant"));
        assert!(!validator.is_valid_scriptlet_name("totally-unknown-name"));
        assert_eq!(names.len(), 2);
        assert_eq!(names.get("set-constant"), Some(true));
        assert_eq!(names.get("totally-unknown-name"), Some(false));
    }

    #[test]
    fn scriptlet_rules() {
        check(|validator| {
            assert!(validator
                .is_valid_scriptlet_rule("example.org#%#//scriptlet('set-constant', 'ads', 'false')"));
            assert!(validator.is_valid_scriptlet_rule("example.org#@%#//scriptlet()"));
            assert!(validator.is_valid_scriptlet_rule("example.org##+js(set, ads, false)"));
            assert!(validator.is_valid_scriptlet_rule("example.org#@#+js()"));
            assert!(validator
                .is_valid_scriptlet_rule("example.org#$#log hello; abort-on-property-read ads"));
        });
    }

    #[test]
    fn invalid_scriptlet_rules() {
        check(|validator| {
            assert!(!validator.is_valid_scriptlet_rule("example.org#%#//scriptlet('unknown')"));
            assert!(!validator.is_valid_scriptlet_rule("example.org#%#//scriptlet('log"));
            assert!(!validator.is_valid_scriptlet_rule("example.org##+js(unknown-scriptlet)"));
            assert!(!validator.is_valid_scriptlet_rule("example.org##+js()"));
            assert!(!validator.is_valid_scriptlet_rule("example.org#$#log; unknown-snippet"));
            assert!(!validator.is_valid_scriptlet_rule("! example.org##+js(set, ads, false)"));
            assert!(!validator.is_valid_scriptlet_rule("||example.com^$script,redirect=noopjs"));
            assert!(!validator.is_valid_scriptlet_rule("example.org##.ad"));
        });
    }

    #[test]
    fn adg_redirect_rules() {
        check(|validator| {
            assert!(validator.is_valid_adg_redirect_rule("||example.com^$script,redirect=noopjs"));
            assert!(validator.is_valid_adg_redirect_rule("||example.com^$redirect-rule=noopjs:10"));
            assert!(!validator.is_valid_adg_redirect_rule("||example.com^$script,redirect=noop.js"));
            assert!(!validator
                .is_valid_adg_redirect_rule("||example.com^$rewrite=abp-resource:blank-js"));
            assert!(!validator
                .is_valid_adg_redirect_rule("||example.com^$redirect=noopjs,redirect-rule=noopjs"));
            assert!(!validator.is_valid_adg_redirect_rule("!||example.com^$redirect=noopjs"));
            assert!(!validator.is_valid_adg_redirect_rule("||example.com^"));
        });
    }

    #[test]
    fn redirect_compatibility() {
        check(|validator| {
            assert!(validator.is_redirect_resource_compatible_with_adg("noopjs"));
            assert!(!validator.is_redirect_resource_compatible_with_adg("noop.js"));

            assert!(validator.is_ubo_redirect_compatible_with_adg("||example.com^$redirect=noop.js"));
            assert!(!validator.is_ubo_redirect_compatible_with_adg("||example.com^$redirect=nope"));
            assert!(!validator
                .is_ubo_redirect_compatible_with_adg("||example.com^$rewrite=abp-resource:blank-js"));

            assert!(validator
                .is_abp_redirect_compatible_with_adg("||example.com^$rewrite=abp-resource:blank-js"));
            assert!(!validator.is_abp_redirect_compatible_with_adg("||example.com^$redirect=noopjs"));

            assert!(validator.is_adg_redirect_compatible_with_ubo("||example.com^$redirect=noopjs"));
            assert!(!validator
                .is_adg_redirect_compatible_with_ubo("||example.com^$redirect=noopvast-2.0"));
        });
    }

    #[test]
    fn content_types() {
        check(|validator| {
            assert!(validator.has_valid_content_type("||example.com^$script,redirect=noopjs"));
            assert!(!validator.has_valid_content_type("||example.com^$redirect=noopjs"));
            assert!(!validator.has_valid_content_type("||example.com^$script"));
        });
    }
}
