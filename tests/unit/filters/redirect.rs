#[cfg(test)]
mod parse_tests {
    use super::super::*;

    #[test]
    fn parses_redirect_with_priority() {
        let rule = RedirectRule::parse("||example.com^$script,redirect=noopjs:99").unwrap();
        assert_eq!(rule.base, "||example.com^");
        assert!(!rule.exception);
        assert_eq!(rule.modifiers, vec!["script", "redirect=noopjs:99"]);
        assert_eq!(rule.marker, RedirectMarker::Redirect);
        assert_eq!(rule.resource_name, "noopjs");
        assert_eq!(rule.priority, Some(99));
    }

    #[test]
    fn parses_markers() {
        let rule = RedirectRule::parse("@@||example.com^$redirect-rule=noopjs").unwrap();
        assert!(rule.exception);
        assert_eq!(rule.marker, RedirectMarker::RedirectRule);
        assert_eq!(rule.priority, None);

        let rule =
            RedirectRule::parse("||example.com/ads.js$rewrite=abp-resource:blank-js,domain=a.com")
                .unwrap();
        assert_eq!(rule.marker, RedirectMarker::Rewrite);
        assert_eq!(rule.resource_name, "blank-js");
    }

    #[test]
    fn requires_a_redirect_modifier() {
        assert!(RedirectRule::parse("||example.com^").is_none());
        assert!(RedirectRule::parse("||example.com^$script,domain=a.com").is_none());
        assert!(RedirectRule::parse("||example.com^$redirect=noopjs,redirect=noopcss").is_none());
        assert!(RedirectRule::parse(
            "||example.com^$redirect-rule=noopjs,rewrite=abp-resource:blank-js"
        )
        .is_none());
    }

    #[test]
    fn redirect_is_preferred_over_redirect_rule() {
        let rule =
            RedirectRule::parse("||example.com^$redirect-rule=noopcss,redirect=noopjs").unwrap();
        assert_eq!(rule.marker, RedirectMarker::Redirect);
        assert_eq!(rule.resource_name, "noopjs");
        assert!(!rule.has_single_marker());

        let rule = RedirectRule::parse("||example.com^$script,redirect-rule=noopjs").unwrap();
        assert_eq!(rule.marker, RedirectMarker::RedirectRule);
        assert!(rule.has_single_marker());
    }

    #[test]
    fn modifiers_come_after_the_last_dollar() {
        let rule = RedirectRule::parse("/ads$/$redirect=noopjs").unwrap();
        assert_eq!(rule.base, "/ads$/");
        assert_eq!(rule.modifiers, vec!["redirect=noopjs"]);
    }

    #[test]
    fn priority_must_be_numeric() {
        assert_eq!(split_priority("noop.js:10"), ("noop.js", Some(10)));
        assert_eq!(split_priority("noop.js:-5"), ("noop.js", Some(-5)));
        assert_eq!(split_priority("noop.js"), ("noop.js", None));
        assert_eq!(split_priority("noop.js:high"), ("noop.js:high", None));
        assert_eq!(split_priority("noopmp3-0.1s"), ("noopmp3-0.1s", None));
    }

    #[test]
    fn content_types() {
        let has_type = |line: &str| RedirectRule::parse(line).unwrap().has_valid_content_type();
        assert!(has_type("||example.com^$script,redirect=noopjs"));
        assert!(has_type("||example.com^$redirect=1x1-transparent.gif,image"));
        assert!(!has_type("||example.com^$redirect=noopjs"));
        assert!(!has_type("||example.com^$~script,redirect=noopjs"));
        assert!(!has_type("||example.com^$~xhr,redirect=noopjs"));
    }

    #[test]
    fn ubo_content_type_shorthands_count() {
        let has_type = |line: &str| RedirectRule::parse(line).unwrap().has_valid_content_type();
        assert!(has_type("||example.com^$xhr,redirect=nooptext"));
        assert!(has_type("||example.com^$css,redirect=noopcss"));
        assert!(has_type("||example.com^$frame,redirect=noopframe"));
        assert_eq!(ubo_content_type_to_adg("~frame"), "~subdocument");
        assert_eq!(ubo_content_type_to_adg("script"), "script");
    }
}

#[cfg(test)]
mod rewrite_tests {
    use super::super::*;

    #[test]
    fn replaces_only_the_redirect_modifier() {
        let rule = RedirectRule::parse("||example.com^$xhr,redirect=noop.txt:5,domain=a.com").unwrap();
        assert_eq!(
            rule.rewrite(
                RedirectMarker::Redirect,
                "nooptext",
                |modifier| if modifier == "xhr" { "xmlhttprequest" } else { modifier },
                &[],
            ),
            "||example.com^$xmlhttprequest,redirect=nooptext,domain=a.com"
        );
    }

    #[test]
    fn drops_the_less_preferred_redirect_modifier() {
        let rule =
            RedirectRule::parse("||example.com^$script,redirect=noop.js,redirect-rule=noop.js")
                .unwrap();
        assert_eq!(
            rule.rewrite(RedirectMarker::Redirect, "noopjs", |modifier| modifier, &[]),
            "||example.com^$script,redirect=noopjs"
        );
    }

    #[test]
    fn changes_marker_and_appends_modifiers() {
        let rule = RedirectRule::parse("@@||example.com^$rewrite=abp-resource:blank-js").unwrap();
        assert_eq!(
            rule.rewrite(RedirectMarker::RedirectRule, "noop.js", |modifier| modifier, &["script"]),
            "@@||example.com^$redirect-rule=noop.js,script"
        );
    }
}
