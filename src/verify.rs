//! Selector verification: re-run a generated selector against the document
//! and report the match count, or flag it invalid when parsing/evaluation
//! fails. Each call re-parses the document text; there is no caching.

use scraper::{Html, Selector};
use skyscraper::html as sky_html;
use skyscraper::xpath;
use tracing::debug;

use crate::types::{SelectorKind, SelectorSuggestion, SelectorVerification};

/// Verify a single selector of the given kind against the document text.
pub fn verify(html: &str, selector: &str, kind: SelectorKind) -> SelectorVerification {
    match kind {
        SelectorKind::Css => verify_css(html, selector),
        SelectorKind::Xpath => verify_xpath(html, selector),
    }
}

/// Verify a selector, inferring its kind from the expression text.
pub fn verify_inferred(html: &str, selector: &str) -> SelectorVerification {
    verify(html, selector, SelectorKind::infer(selector))
}

/// Verification results for both halves of a suggestion.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionVerification {
    pub xpath: SelectorVerification,
    pub css: SelectorVerification,
}

/// Verify a suggestion's XPath and CSS selectors against the document.
pub fn verify_suggestion(html: &str, suggestion: &SelectorSuggestion) -> SuggestionVerification {
    SuggestionVerification {
        xpath: verify_xpath(html, &suggestion.xpath),
        css: verify_css(html, &suggestion.css_selector),
    }
}

fn verify_css(html: &str, selector: &str) -> SelectorVerification {
    let parsed = match Selector::parse(selector) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("CSS selector failed to parse: {}", e);
            return SelectorVerification::invalid();
        }
    };

    let document = Html::parse_document(html);
    SelectorVerification::valid(document.select(&parsed).count())
}

fn verify_xpath(html: &str, selector: &str) -> SelectorVerification {
    let expression = match xpath::parse(selector) {
        Ok(expression) => expression,
        Err(e) => {
            debug!("XPath expression failed to parse: {}", e);
            return SelectorVerification::invalid();
        }
    };

    // Parsing yields the item tree the expression evaluates against
    let tree = match sky_html::parse(html) {
        Ok(tree) => tree,
        Err(e) => {
            debug!("Document failed to parse for XPath evaluation: {}", e);
            return SelectorVerification::invalid();
        }
    };

    match expression.apply(&tree) {
        Ok(items) => SelectorVerification::valid(items.len()),
        Err(e) => {
            debug!("XPath evaluation failed: {}", e);
            SelectorVerification::invalid()
        }
    }
}

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;
