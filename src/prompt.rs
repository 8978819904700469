//! Natural-language prompt construction from an element fingerprint.

use crate::types::ElementFingerprint;

/// Build the provider prompt for a fingerprint, with optional user-supplied
/// rules appended verbatim.
pub fn build_prompt(fingerprint: &ElementFingerprint, custom_rules: Option<&str>) -> String {
    let attributes = if fingerprint.attributes.is_empty() {
        "(none)".to_string()
    } else {
        fingerprint
            .attributes
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let ancestors = if fingerprint.ancestors.is_empty() {
        "(document root)".to_string()
    } else {
        fingerprint
            .ancestors
            .iter()
            .map(|a| {
                let mut part = a.tag.clone();
                if let Some(id) = &a.id {
                    part.push_str(&format!("#{}", id));
                }
                if !a.classes.is_empty() {
                    part.push_str(&format!(".{}", a.classes.join(".")));
                }
                part.push_str(&format!(
                    " ({} of {} <{}> siblings)",
                    a.position.index, a.position.total, a.tag
                ));
                part
            })
            .collect::<Vec<_>>()
            .join(" < ")
    };

    let text_line = if fingerprint.text.is_empty() {
        "(no text content)".to_string()
    } else if fingerprint.text_truncated {
        format!("\"{}\" (truncated)", fingerprint.text)
    } else {
        format!("\"{}\"", fingerprint.text)
    };

    let rules = custom_rules
        .map(|rules| format!("\nADDITIONAL RULES FROM THE USER:\n{}\n", rules))
        .unwrap_or_default();

    format!(
        r#"You are an expert in browser automation. Generate selectors that re-locate one specific HTML element reliably.

TARGET ELEMENT:
- Tag: <{tag}>
- Text: {text}
- Attributes: {attributes}
- Position: element {index} of {total} <{tag}> siblings under its parent
- Ancestor chain (nearest first): {ancestors}
- Elements with the same tag and exact text: {dup_count} (this one is number {dup_rank} in document order)

REQUIREMENTS:
- The XPath and CSS selector must each match exactly this element, preferring stable attributes (id, name, data-*) over positional indexes.
- When the same tag+text appears {dup_count} times, the selectors must disambiguate this occurrence.
- Avoid brittle auto-generated class names when a structural alternative exists.
{rules}
Respond with ONLY a JSON object, no markdown fences, with keys:
  "xpath" (string, required), "cssSelector" (string, required), "explanation" (string, required),
  "idSelector" (string, optional), "nameSelector" (string, optional), "iframeWarning" (string, optional)."#,
        tag = fingerprint.tag,
        text = text_line,
        attributes = attributes,
        index = fingerprint.position.index,
        total = fingerprint.position.total,
        ancestors = ancestors,
        dup_count = fingerprint.duplicates.count,
        dup_rank = fingerprint.duplicates.rank,
        rules = rules,
    )
}
