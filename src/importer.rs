//! URL import with a sequential relay fallback cascade.
//!
//! Cross-origin pages are fetched through a fixed, ordered list of public
//! CORS-relay services; the first non-empty, non-blocked response wins, and
//! a final direct fetch is the last resort. Private-network addresses are
//! fetched directly exactly once and fail closed, because relays cannot
//! reach them anyway. The relay list is configuration, not behavior: the
//! defaults below can be replaced through settings.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info};
use url::{Host, Url};

/// Default public CORS-relay templates, tried in order. `{url}` is replaced
/// with the target URL (percent-encoded for query-parameter templates).
pub const DEFAULT_RELAYS: [&str; 4] = [
    "https://api.allorigins.win/raw?url={url}",
    "https://corsproxy.io/?url={url}",
    "https://api.codetabs.com/v1/proxy?quest={url}",
    "https://thingproxy.freeboard.io/fetch/{url}",
];

const DIRECT_TIMEOUT: Duration = Duration::from_secs(8);
const RELAY_TIMEOUT: Duration = Duration::from_secs(12);

const USER_AGENT: &str = concat!("selectorprobe/", env!("CARGO_PKG_VERSION"));

/// Typed failures of the import cascade
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
    #[error("unsupported URL scheme '{0}' (only http and https can be imported)")]
    UnsupportedScheme(String),
    #[error("private-network address {0} could not be reached directly: {1}")]
    PrivateNetworkUnreachable(String, String),
    #[error("all import attempts failed for {url} ({attempts} relays plus direct fetch)")]
    AllAttemptsFailed { url: String, attempts: usize },
}

/// Which attempt produced the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchVia {
    Direct,
    Relay(String),
}

impl fmt::Display for FetchVia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchVia::Direct => write!(f, "direct"),
            FetchVia::Relay(template) => write!(f, "relay {}", template),
        }
    }
}

/// A successfully imported document
#[derive(Debug, Clone)]
pub struct ImportedDocument {
    pub body: String,
    pub via: FetchVia,
}

/// Sequential URL importer with relay fallback
pub struct Importer {
    client: reqwest::Client,
    relays: Vec<String>,
}

impl Importer {
    pub fn new() -> Result<Self> {
        Self::with_relays(DEFAULT_RELAYS.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_relays(relays: Vec<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Importer { client, relays })
    }

    /// Fetch the document at `raw_url`, serially trying relays for public
    /// addresses and exactly one direct fetch for private ones.
    pub async fn fetch(&self, raw_url: &str) -> Result<ImportedDocument, ImportError> {
        let url =
            Url::parse(raw_url).map_err(|_| ImportError::InvalidUrl(raw_url.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ImportError::UnsupportedScheme(url.scheme().to_string()));
        }

        if is_private_host(&url) {
            info!("{} is a private-network address, fetching directly", url);
            return match self.fetch_once(url.as_str(), DIRECT_TIMEOUT).await {
                Ok(body) => Ok(ImportedDocument {
                    body,
                    via: FetchVia::Direct,
                }),
                Err(e) => Err(ImportError::PrivateNetworkUnreachable(
                    url.to_string(),
                    e.to_string(),
                )),
            };
        }

        for template in &self.relays {
            let relay_url = render_relay(template, &url);
            match self.fetch_once(&relay_url, RELAY_TIMEOUT).await {
                Ok(body) if !body.trim().is_empty() && !looks_blocked(&body) => {
                    info!("Imported {} via relay {}", url, template);
                    return Ok(ImportedDocument {
                        body,
                        via: FetchVia::Relay(template.clone()),
                    });
                }
                Ok(_) => debug!("Relay {} returned an empty or blocked body", template),
                Err(e) => debug!("Relay {} failed: {}", template, e),
            }
        }

        // Last resort: one direct attempt
        match self.fetch_once(url.as_str(), DIRECT_TIMEOUT).await {
            Ok(body) if !body.trim().is_empty() => {
                info!("Imported {} via direct fetch", url);
                Ok(ImportedDocument {
                    body,
                    via: FetchVia::Direct,
                })
            }
            Ok(_) => Err(ImportError::AllAttemptsFailed {
                url: url.to_string(),
                attempts: self.relays.len(),
            }),
            Err(e) => {
                debug!("Direct fetch failed: {}", e);
                Err(ImportError::AllAttemptsFailed {
                    url: url.to_string(),
                    attempts: self.relays.len(),
                })
            }
        }
    }

    async fn fetch_once(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Render a relay template for a target URL. Query-parameter templates get a
/// percent-encoded URL; path-style templates take it verbatim.
fn render_relay(template: &str, target: &Url) -> String {
    let placeholder = template.find("{url}");
    let query = template.find('?');
    let in_query = match (placeholder, query) {
        (Some(p), Some(q)) => p > q,
        _ => false,
    };

    if in_query {
        let encoded: String =
            url::form_urlencoded::byte_serialize(target.as_str().as_bytes()).collect();
        template.replace("{url}", &encoded)
    } else {
        template.replace("{url}", target.as_str())
    }
}

/// Classify a URL's host as private-network: relays cannot reach these, so
/// the cascade is skipped entirely.
fn is_private_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => {
            ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
        }
        Some(Host::Ipv6(ip)) => {
            ip.is_loopback()
                || ip.is_unspecified()
                || (ip.segments()[0] & 0xfe00) == 0xfc00
                || (ip.segments()[0] & 0xffc0) == 0xfe80
        }
        Some(Host::Domain(domain)) => {
            let domain = domain.to_ascii_lowercase();
            domain == "localhost"
                || domain.ends_with(".localhost")
                || domain.ends_with(".local")
                || domain.ends_with(".internal")
        }
        None => true,
    }
}

/// Relays that refuse a request often answer 200 with an HTML denial page
/// instead of an error status.
fn looks_blocked(body: &str) -> bool {
    let head: String = body.chars().take(4096).collect::<String>().to_lowercase();
    const MARKERS: [&str; 4] = [
        "access denied",
        "403 forbidden",
        "missing required request header",
        "rate limit exceeded",
    ];
    MARKERS.iter().any(|marker| head.contains(marker))
}

#[cfg(test)]
#[path = "importer_test.rs"]
mod importer_test;
