// Unit tests for provider config resolution, response parsing, and the prompt

use super::*;
use crate::fingerprint;
use crate::prompt::build_prompt;

#[test]
fn test_missing_api_key_is_descriptive() {
    let settings = Settings::default();
    let err = ProviderConfig::from_settings(&settings).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("API key"));
    assert!(msg.contains("SELECTORPROBE_GEMINI_API_KEY"));
}

#[test]
fn test_blank_api_key_rejected() {
    let settings = Settings {
        api_key: Some("   ".to_string()),
        ..Settings::default()
    };
    assert!(ProviderConfig::from_settings(&settings).is_err());
}

#[test]
fn test_defaults_per_provider() {
    let settings = Settings {
        api_key: Some("key".to_string()),
        ..Settings::default()
    };
    let config = ProviderConfig::from_settings(&settings).unwrap();
    assert_eq!(config.base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(config.model, DEFAULT_GEMINI_MODEL);

    let settings = Settings {
        provider: Provider::OpenaiCompatible,
        api_key: Some("key".to_string()),
        ..Settings::default()
    };
    let config = ProviderConfig::from_settings(&settings).unwrap();
    assert_eq!(config.base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(config.model, DEFAULT_OPENAI_MODEL);
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let settings = Settings {
        provider: Provider::OpenaiCompatible,
        api_key: Some("key".to_string()),
        base_url: Some("http://localhost:11434/v1/".to_string()),
        ..Settings::default()
    };
    let config = ProviderConfig::from_settings(&settings).unwrap();
    assert_eq!(config.base_url, "http://localhost:11434/v1");
}

#[test]
fn test_parse_suggestion_plain_json() {
    let content = r#"{"xpath": "//b", "cssSelector": "b", "explanation": "bold"}"#;
    let suggestion = parse_suggestion(content).unwrap();
    assert_eq!(suggestion.xpath, "//b");
    assert_eq!(suggestion.css_selector, "b");
}

#[test]
fn test_parse_suggestion_strips_fences() {
    let fenced = "```json\n{\"xpath\": \"//b\", \"cssSelector\": \"b\", \"explanation\": \"x\"}\n```";
    let suggestion = parse_suggestion(fenced).unwrap();
    assert_eq!(suggestion.xpath, "//b");

    let bare_fence = "```\n{\"xpath\": \"//i\", \"cssSelector\": \"i\", \"explanation\": \"x\"}\n```";
    let suggestion = parse_suggestion(bare_fence).unwrap();
    assert_eq!(suggestion.xpath, "//i");
}

#[test]
fn test_parse_suggestion_missing_required_field() {
    let content = r#"{"xpath": "//b", "explanation": "no css selector"}"#;
    let err = parse_suggestion(content).unwrap_err();
    assert!(err.to_string().contains("unparseable JSON"));
}

#[test]
fn test_gemini_response_extraction() {
    let raw = r#"{
        "candidates": [
            { "content": { "parts": [ { "text": "{\"ok\": true}" } ] } }
        ]
    }"#;
    let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(extract_gemini_text(parsed).unwrap(), "{\"ok\": true}");

    let empty: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
    assert!(extract_gemini_text(empty).is_err());
}

#[test]
fn test_chat_response_shape() {
    let raw = r#"{
        "choices": [
            { "message": { "content": "{\"ok\": true}" } }
        ]
    }"#;
    let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed.choices[0].message.content, "{\"ok\": true}");
}

#[test]
fn test_suggestion_schema_requires_core_fields() {
    let schema = suggestion_schema();
    let required = schema["required"].as_array().unwrap();
    assert!(required.iter().any(|v| v == "xpath"));
    assert!(required.iter().any(|v| v == "cssSelector"));
    assert!(required.iter().any(|v| v == "explanation"));
}

#[test]
fn test_prompt_carries_fingerprint_and_rules() {
    let html = r#"
    <html><body>
        <div class="row"><button class="buy">Buy</button></div>
        <div class="row"><button class="buy">Buy</button></div>
    </body></html>
    "#;
    let fp = fingerprint::extract(html, "button", 1).unwrap();
    let prompt = build_prompt(&fp, Some("Never use nth-child."));

    assert!(prompt.contains("<button>"));
    assert!(prompt.contains("\"Buy\""));
    assert!(prompt.contains("class=\"buy\""));
    assert!(prompt.contains("number 2 in document order"));
    assert!(prompt.contains("Never use nth-child."));
    // Output contract
    assert!(prompt.contains("\"xpath\""));
    assert!(prompt.contains("\"cssSelector\""));
    assert!(prompt.contains("\"explanation\""));
    assert!(prompt.contains("\"iframeWarning\""));
}

#[test]
fn test_prompt_without_rules_has_no_rules_section() {
    let html = "<html><body><p>x</p></body></html>";
    let fp = fingerprint::extract(html, "p", 0).unwrap();
    let prompt = build_prompt(&fp, None);
    assert!(!prompt.contains("ADDITIONAL RULES"));
}
