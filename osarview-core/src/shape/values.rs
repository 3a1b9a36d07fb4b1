//! Conversion of arbitrary JSON values into display text.

use serde_json::Value;

/// Convert an arbitrary result value into display text.
///
/// Absent and `null` values render as the `-` placeholder. Strings pass
/// through unchanged, booleans and numbers are stringified (so `0` renders as
/// `"0"`, distinct from "missing"), and anything structured is
/// JSON-serialized, falling back to the `Display` form if serialization
/// fails.
pub fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Whether display text looks like a clickable URL.
pub fn is_url(text: &str) -> bool {
    let lowered = text.trim_start().to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null_render_as_placeholder() {
        assert_eq!(display_text(None), "-");
        assert_eq!(display_text(Some(&Value::Null)), "-");
    }

    #[test]
    fn test_zero_is_not_the_placeholder() {
        assert_eq!(display_text(Some(&json!(0))), "0");
        assert_eq!(display_text(Some(&json!(false))), "false");
    }

    #[test]
    fn test_strings_pass_through_unchanged() {
        assert_eq!(display_text(Some(&json!("  as-is "))), "  as-is ");
    }

    #[test]
    fn test_scalars_are_stringified() {
        assert_eq!(display_text(Some(&json!(3.5))), "3.5");
        assert_eq!(display_text(Some(&json!(true))), "true");
        assert_eq!(display_text(Some(&json!(-17))), "-17");
    }

    #[test]
    fn test_structured_values_are_serialized() {
        assert_eq!(display_text(Some(&json!(["a", 1]))), r#"["a",1]"#);
        assert_eq!(display_text(Some(&json!({"k": "v"}))), r#"{"k":"v"}"#);
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.org/x"));
        assert!(is_url("HTTP://EXAMPLE.ORG"));
        assert!(!is_url("ftp://example.org"));
        assert!(!is_url("not a url"));
    }
}
