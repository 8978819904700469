// Unit tests for types module

use super::*;

#[test]
fn test_selector_kind_inference() {
    assert_eq!(SelectorKind::infer("//div[@id='x']"), SelectorKind::Xpath);
    assert_eq!(SelectorKind::infer("/html/body/div"), SelectorKind::Xpath);
    assert_eq!(SelectorKind::infer("(//div)[2]"), SelectorKind::Xpath);
    assert_eq!(SelectorKind::infer("  //span"), SelectorKind::Xpath);

    assert_eq!(SelectorKind::infer("div.card"), SelectorKind::Css);
    assert_eq!(SelectorKind::infer("#login > input"), SelectorKind::Css);
    assert_eq!(
        SelectorKind::infer("input[name='email']"),
        SelectorKind::Css
    );
}

#[test]
fn test_sibling_position_only() {
    let position = SiblingPosition::only();
    assert_eq!(position.index, 1);
    assert_eq!(position.total, 1);
}

#[test]
fn test_suggestion_deserializes_provider_field_names() {
    // The provider contract uses camelCase keys
    let json = r##"{
        "xpath": "//button[@id='go']",
        "cssSelector": "#go",
        "idSelector": "#go",
        "explanation": "The element has a unique id."
    }"##;

    let suggestion: SelectorSuggestion = serde_json::from_str(json).unwrap();
    assert_eq!(suggestion.xpath, "//button[@id='go']");
    assert_eq!(suggestion.css_selector, "#go");
    assert_eq!(suggestion.id_selector, Some("#go".to_string()));
    assert_eq!(suggestion.name_selector, None);
    assert_eq!(suggestion.iframe_warning, None);
}

#[test]
fn test_suggestion_serializes_camel_case() {
    let suggestion = SelectorSuggestion {
        xpath: "//a".to_string(),
        css_selector: "a".to_string(),
        id_selector: None,
        name_selector: Some("[name='link']".to_string()),
        explanation: "x".to_string(),
        iframe_warning: None,
    };

    let value = serde_json::to_value(&suggestion).unwrap();
    assert!(value.get("cssSelector").is_some());
    assert!(value.get("nameSelector").is_some());
    // Skipped when None
    assert!(value.get("idSelector").is_none());
    assert!(value.get("iframeWarning").is_none());
}

#[test]
fn test_verification_helpers() {
    let invalid = SelectorVerification::invalid();
    assert!(!invalid.is_valid);
    assert_eq!(invalid.match_count, 0);

    let valid = SelectorVerification::valid(3);
    assert!(valid.is_valid);
    assert_eq!(valid.match_count, 3);
}
