use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for programmatic consumption
    Json,
    /// Human-readable simple format
    Simple,
}

/// Kind of selector expression
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    /// CSS selector
    Css,
    /// XPath expression
    Xpath,
}

impl SelectorKind {
    /// Infer the kind from the expression text. XPath expressions start with
    /// `/`, `//`, or a parenthesized step like `(//div)[1]`; everything else
    /// is treated as CSS.
    pub fn infer(selector: &str) -> Self {
        let trimmed = selector.trim_start();
        if trimmed.starts_with('/') || trimmed.starts_with('(') {
            SelectorKind::Xpath
        } else {
            SelectorKind::Css
        }
    }
}

/// 1-based position of an element among its same-tag siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingPosition {
    /// 1-based index among siblings sharing the tag
    pub index: usize,
    /// Total siblings sharing the tag (including the element itself)
    pub total: usize,
}

impl SiblingPosition {
    /// Position of an element with no parent (or no same-tag siblings)
    pub fn only() -> Self {
        SiblingPosition { index: 1, total: 1 }
    }
}

/// Summary of one ancestor on the path from the target to the root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AncestorSummary {
    /// Ancestor tag name
    pub tag: String,
    /// id attribute if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Class list, document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Position among the ancestor's own same-tag siblings
    pub position: SiblingPosition,
}

/// How many elements share the target's tag and exact trimmed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateTextStats {
    /// Number of elements with the same tag and trimmed text
    pub count: usize,
    /// 1-based rank of the target among them, in document order
    pub rank: usize,
}

/// Structural summary of a designated element, produced once and consumed
/// once to build the provider prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementFingerprint {
    /// Tag name (lowercase)
    pub tag: String,
    /// Trimmed inner text, truncated to a fixed character budget
    pub text: String,
    /// Whether the text was cut off at the budget
    pub text_truncated: bool,
    /// All attributes, sorted by name
    pub attributes: BTreeMap<String, String>,
    /// Position among same-tag siblings
    pub position: SiblingPosition,
    /// Up to 5 ancestors, nearest first
    pub ancestors: Vec<AncestorSummary>,
    /// Same tag + same text occurrence stats across the document
    pub duplicates: DuplicateTextStats,
}

/// Selector pair returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorSuggestion {
    /// XPath expression for the element
    pub xpath: String,
    /// CSS selector for the element
    pub css_selector: String,
    /// Short id-based selector, when the element has a usable id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_selector: Option<String>,
    /// Name-attribute selector, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_selector: Option<String>,
    /// Free-text explanation of the chosen strategy
    pub explanation: String,
    /// Warning when the element appears to live inside an iframe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iframe_warning: Option<String>,
}

/// Result of re-running a selector against the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorVerification {
    /// False when the selector failed to parse or evaluate
    pub is_valid: bool,
    /// Number of matched elements (0 when invalid)
    pub match_count: usize,
}

impl SelectorVerification {
    pub fn invalid() -> Self {
        SelectorVerification {
            is_valid: false,
            match_count: 0,
        }
    }

    pub fn valid(match_count: usize) -> Self {
        SelectorVerification {
            is_valid: true,
            match_count,
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
