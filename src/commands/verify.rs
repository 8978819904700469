use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

use crate::commands::utils;
use crate::settings::SettingsStore;
use crate::types::{OutputFormat, SelectorKind};
use crate::verify;

pub async fn handle_verify(
    selector: String,
    kind: Option<SelectorKind>,
    file: Option<PathBuf>,
    url: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let store = SettingsStore::new()?;
    let settings = store.load()?;
    let html = utils::load_document(file, url, &store, &settings).await?;

    let kind = kind.unwrap_or_else(|| SelectorKind::infer(&selector));
    info!("Verifying {:?} selector: {}", kind, selector);
    let verification = verify::verify(&html, &selector, kind);

    match format {
        OutputFormat::Json => {
            let output = json!({
                "selector": selector,
                "kind": kind,
                "isValid": verification.is_valid,
                "matchCount": verification.match_count,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Simple => {
            if verification.is_valid {
                println!(
                    "{} -> {} match(es)",
                    selector, verification.match_count
                );
            } else {
                println!("{} -> invalid", selector);
            }
        }
    }

    Ok(())
}
