use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::importer::{FetchVia, Importer};
use crate::settings::SettingsStore;
use crate::types::OutputFormat;

pub async fn handle_import(
    url: String,
    output: Option<PathBuf>,
    show: bool,
    format: OutputFormat,
) -> Result<()> {
    let store = SettingsStore::new()?;
    let settings = store.load()?;

    info!("Importing {}", url);
    let importer = Importer::with_relays(settings.relay_templates())?;
    let imported = importer.fetch(&url).await?;

    store.save_document(&imported.body)?;
    if let Some(path) = &output {
        fs::write(path, &imported.body)?;
        info!("Wrote {} bytes to {}", imported.body.len(), path.display());
    }

    if show {
        println!("{}", imported.body);
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let via = match &imported.via {
                FetchVia::Direct => json!({ "kind": "direct" }),
                FetchVia::Relay(template) => json!({ "kind": "relay", "template": template }),
            };
            let output = json!({
                "url": url,
                "bytes": imported.body.len(),
                "via": via,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Simple => {
            println!(
                "Imported {} bytes from {} ({})",
                imported.body.len(),
                url,
                imported.via
            );
        }
    }

    Ok(())
}
