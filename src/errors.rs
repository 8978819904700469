use std::fmt;

use crate::importer::ImportError;

/// Custom error type that includes exit codes
#[derive(Debug)]
pub enum SelectorProbeError {
    /// Target element not found in the document (exit code 2)
    ElementNotFound(String),
    /// Provider credentials missing or empty (exit code 3)
    MissingCredentials(String),
    /// URL import failed after all attempts (exit code 4)
    ImportFailed(String),
    /// Provider request or response parsing failed (exit code 5)
    ProviderFailed(String),
    /// Generic error (exit code 1)
    Other(anyhow::Error),
}

impl SelectorProbeError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SelectorProbeError::ElementNotFound(_) => 2,
            SelectorProbeError::MissingCredentials(_) => 3,
            SelectorProbeError::ImportFailed(_) => 4,
            SelectorProbeError::ProviderFailed(_) => 5,
            SelectorProbeError::Other(_) => 1,
        }
    }
}

impl fmt::Display for SelectorProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorProbeError::ElementNotFound(target) => {
                write!(f, "No element found matching target: {}", target)
            }
            SelectorProbeError::MissingCredentials(msg) => {
                write!(f, "Missing credentials: {}", msg)
            }
            SelectorProbeError::ImportFailed(msg) => {
                write!(f, "Import failed: {}", msg)
            }
            SelectorProbeError::ProviderFailed(msg) => {
                write!(f, "Provider request failed: {}", msg)
            }
            SelectorProbeError::Other(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SelectorProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectorProbeError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for SelectorProbeError {
    fn from(err: anyhow::Error) -> Self {
        // Typed import errors carry their own classification
        if err.downcast_ref::<ImportError>().is_some() {
            return SelectorProbeError::ImportFailed(err.to_string());
        }

        // Fall back to detecting error classes from the message
        let msg = err.to_string();

        if msg.contains("No element found matching target") {
            SelectorProbeError::ElementNotFound(msg)
        } else if msg.contains("API key") || msg.contains("credentials") {
            SelectorProbeError::MissingCredentials(msg)
        } else if msg.contains("provider") || msg.contains("generateContent") {
            SelectorProbeError::ProviderFailed(msg)
        } else {
            SelectorProbeError::Other(err)
        }
    }
}
