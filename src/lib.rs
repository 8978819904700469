//! # selectorprobe
#![allow(clippy::uninlined_format_args)]
//!
//! CLI tool that turns a designated HTML element into an AI-generated
//! XPath/CSS selector pair, verified against the document.
//!
//! Point it at an HTML document (file, stdin, stored document, or URL
//! import), designate the element with a rough selector, and it computes the
//! element's structural fingerprint, asks the configured AI provider for
//! robust selectors, and re-runs the generated selectors against the
//! document to count matches.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Generate selectors for the first submit button in page.html
//! selectorprobe suggest "button[type='submit']" --file page.html
//!
//! # Designate the third .card element
//! selectorprobe suggest ".card" --file page.html --index 2
//!
//! # Import a page (public URLs go through the relay cascade) and store it
//! selectorprobe import "https://example.com/login"
//!
//! # Work against the stored document
//! selectorprobe fingerprint "input[name='email']"
//! selectorprobe suggest "input[name='email']"
//!
//! # Verify a selector by hand (kind inferred: leading / or ( means XPath)
//! selectorprobe verify "//form//input[@name='email']" --file page.html
//! selectorprobe verify "form input[name='email']" --file page.html
//!
//! # Configure the provider
//! selectorprobe settings set --provider gemini --api-key "$KEY"
//! selectorprobe settings set --provider openai-compatible \
//!     --base-url "http://localhost:11434/v1" --model "qwen2.5:7b"
//! ```
//!
//! JSON output goes to stdout; logs go to stderr (`RUST_LOG=selectorprobe=debug`).
//!
//! ## Library Usage
//!
//! ```no_run
//! use selectorprobe::{fingerprint, prompt, verify, SelectorKind};
//!
//! # fn example() -> anyhow::Result<()> {
//! let html = "<html><body><button id='go'>Go</button></body></html>";
//! let fp = fingerprint::extract(html, "button", 0)?;
//! let _prompt = prompt::build_prompt(&fp, None);
//! let check = verify::verify(html, "#go", SelectorKind::Css);
//! assert_eq!(check.match_count, 1);
//! # Ok(())
//! # }
//! ```

/// Structural fingerprint extraction for a designated element
pub mod fingerprint;

/// In-memory, newest-first suggestion history
pub mod history;

/// URL import with the relay fallback cascade
pub mod importer;

/// Prompt construction from a fingerprint
pub mod prompt;

/// Typed client for the AI providers
pub mod provider;

/// Persisted settings and document state
pub mod settings;

/// Type definitions for fingerprints, suggestions, and verification
pub mod types;

/// Selector verification against the document
pub mod verify;

pub use history::{HistoryEntry, SuggestionHistory};
pub use importer::{FetchVia, ImportError, ImportedDocument, Importer};
pub use provider::{ProviderClient, ProviderConfig};
pub use settings::{Provider, Settings, SettingsStore};
pub use types::{
    AncestorSummary, DuplicateTextStats, ElementFingerprint, OutputFormat, SelectorKind,
    SelectorSuggestion, SelectorVerification, SiblingPosition,
};
