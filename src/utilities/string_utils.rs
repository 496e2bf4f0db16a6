//! Placeholder interpolation for prompt templates.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::utilities::errors::PromptError;

static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_\-]*)\}").expect("invalid placeholder regex")
});

/// Replace `{name}` placeholders in `template` with values from `inputs`.
///
/// Only identifiers (letter or underscore first, then alphanumerics,
/// underscores, hyphens) count as placeholders, so other braces pass through.
/// Replacement happens in a single pass: placeholder-like text inside an
/// inserted value is left alone.
///
/// # Errors
/// Returns [`PromptError::MissingVariable`] naming the first placeholder
/// without an input.
pub fn interpolate_only(
    template: &str,
    inputs: &HashMap<&str, &str>,
) -> Result<String, PromptError> {
    if let Some(missing) = VARIABLE_PATTERN
        .captures_iter(template)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
        .find(|name| !inputs.contains_key(name))
    {
        return Err(PromptError::MissingVariable(missing.to_string()));
    }

    let rendered = VARIABLE_PATTERN.replace_all(template, |caps: &Captures<'_>| {
        inputs.get(&caps[1]).copied().unwrap_or_default().to_string()
    });
    Ok(rendered.into_owned())
}

/// Template placeholders in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in VARIABLE_PATTERN.captures_iter(template) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_only_basic() {
        let inputs = HashMap::from([("user_input", "I feel tired")]);
        let result = interpolate_only("Input Message: {user_input}", &inputs).unwrap();
        assert_eq!(result, "Input Message: I feel tired");
    }

    #[test]
    fn test_interpolate_only_missing_var() {
        let inputs = HashMap::new();
        let err = interpolate_only("Hello {name}!", &inputs).unwrap_err();
        assert!(matches!(err, PromptError::MissingVariable(ref v) if v == "name"));
    }

    #[test]
    fn test_interpolate_only_is_single_pass() {
        let inputs = HashMap::from([("analysis", "{directive}"), ("directive", "STANDARD")]);
        let result = interpolate_only("{analysis} / {directive}", &inputs).unwrap();
        assert_eq!(result, "{directive} / STANDARD");
    }

    #[test]
    fn test_interpolate_only_leaves_json_braces() {
        let inputs = HashMap::new();
        let result = interpolate_only(r#"{"range": [1, 10]}"#, &inputs).unwrap();
        assert_eq!(result, r#"{"range": [1, 10]}"#);
    }

    #[test]
    fn test_placeholders_dedup_in_order() {
        assert_eq!(
            placeholders("{a} {b} {a}"),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
