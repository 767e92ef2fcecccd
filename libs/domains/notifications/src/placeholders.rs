//! Placeholder substitution.
//!
//! Tokens look like `{key}` or `{key|fallback}` where `key` is made of ASCII
//! word characters. Each token resolves against a [`DataContext`]:
//!
//! 1. `session_location`: missing, blank, `Studio` and `TBD` all become `-`.
//!    Anything else passes through. A fallback literal is ignored.
//! 2. keys containing `phone`: missing or blank becomes the fallback literal
//!    when one is given, otherwise `-`.
//! 3. everything else: the value if present, else the fallback literal if
//!    non-empty, else the original token text, braces included.
//!
//! Values are inserted verbatim. Nothing is HTML-escaped.

use crate::context::DataContext;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)(?:\|([^}]*))?\}").unwrap());

/// Shown in place of a location or phone number that is not worth printing.
pub const DASH: &str = "-";

const LOCATION_KEY: &str = "session_location";

/// Location values that mean "nothing specific was entered".
const LOCATION_DEFAULTS: [&str; 2] = ["Studio", "TBD"];

/// Substitute every placeholder token in `template`.
pub fn resolve(template: &str, context: &DataContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            let fallback = caps.get(2).map(|m| m.as_str());
            resolve_token(key, fallback, context).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolve a single key. `None` means the token stays in the output as-is.
pub fn resolve_token(key: &str, fallback: Option<&str>, context: &DataContext) -> Option<String> {
    if key == LOCATION_KEY {
        let location = match context.get_non_blank(key) {
            Some(value) if !LOCATION_DEFAULTS.contains(&value) => value,
            _ => DASH,
        };
        return Some(location.to_string());
    }

    if key.contains("phone") {
        let phone = context
            .get_non_blank(key)
            .or_else(|| fallback.filter(|f| !f.is_empty()))
            .unwrap_or(DASH);
        return Some(phone.to_string());
    }

    context
        .get(key)
        .or_else(|| fallback.filter(|f| !f.is_empty()))
        .map(str::to_string)
}

/// Resolve `{key|fallback}` without building a template string.
pub(crate) fn resolve_key(key: &str, fallback: &str, context: &DataContext) -> String {
    resolve_token(key, Some(fallback), context).unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(pairs: &[(&str, &str)]) -> DataContext {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_mixed_grammar() {
        let context = ctx(&[
            ("first_name", "Jordan"),
            ("missing_value", ""),
            ("session_location", "Studio"),
            ("customer_phone", ""),
        ]);
        let out = resolve(
            "Hi {first_name}, meet at {session_location} ({customer_phone|no phone}) {missing_value|fallback}",
            &context,
        );
        assert_eq!(out, "Hi Jordan, meet at - (no phone) fallback");
    }

    #[test]
    fn test_location_defaults_collapse_to_dash() {
        for value in ["TBD", "Studio", "", "   "] {
            let context = ctx(&[("session_location", value)]);
            assert_eq!(resolve("{session_location}", &context), "-", "value {value:?}");
        }
        assert_eq!(resolve("{session_location}", &DataContext::new()), "-");
    }

    #[test]
    fn test_location_passes_real_value_and_ignores_fallback() {
        let context = ctx(&[("session_location", "Central Park")]);
        assert_eq!(resolve("{session_location|Somewhere}", &context), "Central Park");
        assert_eq!(resolve("{session_location|Somewhere}", &DataContext::new()), "-");
    }

    #[test]
    fn test_phone_keys_default_to_dash() {
        let context = ctx(&[("business_phone", " ")]);
        assert_eq!(resolve("{business_phone}", &context), "-");
        assert_eq!(resolve("{client_phone_number}", &DataContext::new()), "-");
        assert_eq!(
            resolve("{business_phone}", &ctx(&[("business_phone", "+1 555")])),
            "+1 555"
        );
    }

    #[test]
    fn test_unresolved_token_stays_visible() {
        assert_eq!(resolve("Dear {client_name},", &DataContext::new()), "Dear {client_name},");
        // An empty fallback is no fallback at all.
        assert_eq!(resolve("{client_name|}", &DataContext::new()), "{client_name|}");
    }

    #[test]
    fn test_fallback_used_for_empty_value() {
        let context = ctx(&[("client_name", "")]);
        assert_eq!(resolve("{client_name|there}", &context), "there");
    }

    #[test]
    fn test_whitespace_value_is_truthy_for_generic_keys() {
        let context = ctx(&[("client_name", " ")]);
        assert_eq!(resolve("[{client_name|x}]", &context), "[ ]");
    }

    #[test]
    fn test_malformed_syntax_left_alone() {
        let context = ctx(&[("name", "Ada")]);
        assert_eq!(resolve("{name and {name", &context), "{name and {name");
        assert_eq!(resolve("{name and {name}", &context), "{name and Ada");
        assert_eq!(resolve("{ name }", &context), "{ name }");
        assert_eq!(resolve("{na-me}", &context), "{na-me}");
    }

    #[test]
    fn test_values_are_not_escaped() {
        let context = ctx(&[("link", "<a href=\"x\">go</a>")]);
        assert_eq!(resolve("{link}", &context), "<a href=\"x\">go</a>");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let context = ctx(&[("a", "{b}"), ("b", "nope")]);
        assert_eq!(resolve("{a}", &context), "{b}");
    }
}
