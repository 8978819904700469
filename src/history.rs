//! In-memory suggestion history.
//!
//! Append-only, newest first. Recording a suggestion verifies both of its
//! selectors against the document; editing one entry's selector re-verifies
//! that entry only.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::types::{SelectorKind, SelectorSuggestion, SelectorVerification};
use crate::verify;

/// One recorded suggestion with its verification state
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub suggestion: SelectorSuggestion,
    pub xpath_verification: SelectorVerification,
    pub css_verification: SelectorVerification,
}

/// Newest-first list of suggestion records
#[derive(Debug, Default)]
pub struct SuggestionHistory {
    entries: Vec<HistoryEntry>,
}

impl SuggestionHistory {
    pub fn new() -> Self {
        SuggestionHistory::default()
    }

    /// Verify the suggestion against the document and prepend it.
    pub fn record(&mut self, html: &str, suggestion: SelectorSuggestion) -> &HistoryEntry {
        let verification = verify::verify_suggestion(html, &suggestion);
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            suggestion,
            xpath_verification: verification.xpath,
            css_verification: verification.css,
        };
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Replace one selector of one entry and re-verify that selector against
    /// the document. Other entries are untouched.
    pub fn edit_selector(
        &mut self,
        id: Uuid,
        kind: SelectorKind,
        new_selector: String,
        html: &str,
    ) -> Result<&HistoryEntry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| anyhow::anyhow!("No history entry with id {}", id))?;

        let verification = verify::verify(html, &new_selector, kind);
        match kind {
            SelectorKind::Xpath => {
                entry.suggestion.xpath = new_selector;
                entry.xpath_verification = verification;
            }
            SelectorKind::Css => {
                entry.suggestion.css_selector = new_selector;
                entry.css_verification = verification;
            }
        }
        Ok(&*entry)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;
