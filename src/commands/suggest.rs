use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::commands::utils;
use crate::fingerprint;
use crate::history::SuggestionHistory;
use crate::prompt;
use crate::provider::{ProviderClient, ProviderConfig};
use crate::settings::SettingsStore;
use crate::types::{OutputFormat, SelectorVerification};

pub async fn handle_suggest(
    target: String,
    file: Option<PathBuf>,
    url: Option<String>,
    index: usize,
    rules: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let store = SettingsStore::new()?;
    let settings = store.load()?;

    // Resolve credentials before touching the document or the network
    let config = ProviderConfig::from_settings(&settings)?;

    let html = utils::load_document(file, url, &store, &settings).await?;

    info!("Fingerprinting {} (index {})", target, index);
    let fingerprint = fingerprint::extract(&html, &target, index)?;

    let custom_rules = rules.as_deref().or(settings.custom_rules.as_deref());
    let prompt_text = prompt::build_prompt(&fingerprint, custom_rules);

    let client = ProviderClient::new(config)?;
    let suggestion = client.generate(&prompt_text).await?;

    let mut history = SuggestionHistory::new();
    let entry = history.record(&html, suggestion);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
        OutputFormat::Simple => {
            println!(
                "XPath: {}  [{}]",
                entry.suggestion.xpath,
                describe(entry.xpath_verification)
            );
            println!(
                "CSS:   {}  [{}]",
                entry.suggestion.css_selector,
                describe(entry.css_verification)
            );
            if let Some(id_selector) = &entry.suggestion.id_selector {
                println!("Id:    {}", id_selector);
            }
            if let Some(name_selector) = &entry.suggestion.name_selector {
                println!("Name:  {}", name_selector);
            }
            println!("Why:   {}", entry.suggestion.explanation);
            if let Some(warning) = &entry.suggestion.iframe_warning {
                println!("Note:  {}", warning);
            }
        }
    }

    Ok(())
}

fn describe(verification: SelectorVerification) -> String {
    if verification.is_valid {
        match verification.match_count {
            1 => "1 match".to_string(),
            n => format!("{} matches", n),
        }
    } else {
        "invalid".to_string()
    }
}
