use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::commands::utils;
use crate::fingerprint;
use crate::settings::SettingsStore;
use crate::types::OutputFormat;

pub async fn handle_fingerprint(
    target: String,
    file: Option<PathBuf>,
    url: Option<String>,
    index: usize,
    format: OutputFormat,
) -> Result<()> {
    let store = SettingsStore::new()?;
    let settings = store.load()?;
    let html = utils::load_document(file, url, &store, &settings).await?;

    info!("Fingerprinting {} (index {})", target, index);
    let fingerprint = fingerprint::extract(&html, &target, index)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&fingerprint)?);
        }
        OutputFormat::Simple => {
            println!(
                "<{}> {} of {} same-tag siblings",
                fingerprint.tag, fingerprint.position.index, fingerprint.position.total
            );
            if !fingerprint.text.is_empty() {
                println!("  Text: {}", fingerprint.text);
            }
            for (name, value) in &fingerprint.attributes {
                println!("  @{}=\"{}\"", name, value);
            }
            if fingerprint.duplicates.count > 1 {
                println!(
                    "  Same tag+text appears {} times (this is number {})",
                    fingerprint.duplicates.count, fingerprint.duplicates.rank
                );
            }
            for ancestor in &fingerprint.ancestors {
                println!(
                    "  Ancestor: <{}> ({} of {})",
                    ancestor.tag, ancestor.position.index, ancestor.position.total
                );
            }
        }
    }

    Ok(())
}
