use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use crate::importer::Importer;
use crate::settings::{Settings, SettingsStore};

/// Resolve the working document: an explicit file ("-" reads stdin), a URL
/// import, or the stored document blob, in that order. Freshly loaded text
/// is persisted as the new stored document, mirroring the original tool's
/// last-edited-document behavior.
pub async fn load_document(
    file: Option<PathBuf>,
    url: Option<String>,
    store: &SettingsStore,
    settings: &Settings,
) -> Result<String> {
    if let Some(path) = file {
        let html = if path.as_os_str() == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read HTML from stdin")?;
            buffer
        } else {
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        };
        store.save_document(&html)?;
        return Ok(html);
    }

    if let Some(url) = url {
        let importer = Importer::with_relays(settings.relay_templates())?;
        let imported = importer.fetch(&url).await?;
        debug!("Imported {} bytes via {}", imported.body.len(), imported.via);
        store.save_document(&imported.body)?;
        return Ok(imported.body);
    }

    store
        .load_document()?
        .context("No document loaded. Pass --file/--url or run `selectorprobe import <URL>`")
}
