//! Structural fingerprint extraction for a designated element.
//!
//! The fingerprint is the only thing the provider sees: tag, trimmed text,
//! attributes, sibling position, a short ancestor chain, and how many other
//! elements share the same tag and text. It is computed in one synchronous
//! walk over the parsed document.

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

use crate::types::{
    AncestorSummary, DuplicateTextStats, ElementFingerprint, SiblingPosition,
};

/// Ancestors reported in the fingerprint, nearest first
pub const MAX_ANCESTORS: usize = 5;

/// Character budget for the reported inner text
pub const TEXT_BUDGET: usize = 120;

/// Compute the fingerprint of the element matched by `target` (a rough CSS
/// selector) at `index` (0-based) within the document text.
pub fn extract(html: &str, target: &str, index: usize) -> Result<ElementFingerprint> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(target)
        .map_err(|e| anyhow::anyhow!("Invalid target selector '{}': {}", target, e))?;

    let element = document
        .select(&selector)
        .nth(index)
        .ok_or_else(|| anyhow::anyhow!("No element found matching target: {}", target))?;

    Ok(fingerprint_element(&document, element))
}

/// Fingerprint an already-located element.
pub fn fingerprint_element(document: &Html, element: ElementRef<'_>) -> ElementFingerprint {
    let full_text = element_text(element);
    let text: String = full_text.chars().take(TEXT_BUDGET).collect();
    let text_truncated = full_text.chars().count() > TEXT_BUDGET;

    let attributes = element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let ancestors = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(MAX_ANCESTORS)
        .map(|ancestor| AncestorSummary {
            tag: ancestor.value().name().to_string(),
            id: ancestor.value().id().map(str::to_string),
            classes: ancestor.value().classes().map(str::to_string).collect(),
            position: sibling_position(ancestor),
        })
        .collect();

    ElementFingerprint {
        tag: element.value().name().to_string(),
        text,
        text_truncated,
        attributes,
        position: sibling_position(element),
        ancestors,
        duplicates: duplicate_text_stats(document, element, &full_text),
    }
}

/// Trimmed text content of an element's subtree.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 1-based position of an element among siblings sharing its tag.
/// An element with no parent element counts as 1 of 1.
fn sibling_position(element: ElementRef<'_>) -> SiblingPosition {
    let Some(parent) = element.parent() else {
        return SiblingPosition::only();
    };

    let tag = element.value().name();
    let mut index = 0;
    let mut total = 0;
    for sibling in parent.children().filter_map(ElementRef::wrap) {
        if sibling.value().name() == tag {
            total += 1;
            if sibling.id() == element.id() {
                index = total;
            }
        }
    }

    if total == 0 || index == 0 {
        SiblingPosition::only()
    } else {
        SiblingPosition { index, total }
    }
}

/// Count elements across the whole document that share the target's tag and
/// exact trimmed text, and the target's 1-based rank among them in document
/// order. Empty text always reports 1 of 1.
fn duplicate_text_stats(
    document: &Html,
    element: ElementRef<'_>,
    text: &str,
) -> DuplicateTextStats {
    if text.is_empty() {
        return DuplicateTextStats { count: 1, rank: 1 };
    }

    let tag = element.value().name();
    let mut count = 0;
    let mut rank = 0;
    for candidate in document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        if candidate.value().name() == tag && element_text(candidate) == text {
            count += 1;
            if candidate.id() == element.id() {
                rank = count;
            }
        }
    }

    if count == 0 || rank == 0 {
        DuplicateTextStats { count: 1, rank: 1 }
    } else {
        DuplicateTextStats { count, rank }
    }
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod fingerprint_test;
