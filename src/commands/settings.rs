use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::settings::{Provider, SettingsStore};

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Update one or more settings (unset options are left unchanged)
    Set {
        /// AI provider
        #[arg(long)]
        provider: Option<Provider>,

        /// API key for the provider
        #[arg(long)]
        api_key: Option<String>,

        /// Base URL override (e.g. a local OpenAI-compatible endpoint)
        #[arg(long)]
        base_url: Option<String>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// Free-text rules appended to every prompt
        #[arg(long)]
        rules: Option<String>,

        /// Relay template for the import cascade; repeat to set several,
        /// `{url}` is replaced with the target URL
        #[arg(long = "relay")]
        relays: Vec<String>,
    },

    /// Print the current settings (API key redacted)
    Show,

    /// Reset all settings to defaults
    Clear,
}

pub async fn handle_settings(command: SettingsCommands) -> Result<()> {
    let store = SettingsStore::new()?;

    match command {
        SettingsCommands::Set {
            provider,
            api_key,
            base_url,
            model,
            rules,
            relays,
        } => {
            let mut settings = store.load()?;
            if let Some(provider) = provider {
                settings.provider = provider;
            }
            if let Some(api_key) = api_key {
                settings.api_key = Some(api_key);
            }
            if let Some(base_url) = base_url {
                settings.base_url = Some(base_url);
            }
            if let Some(model) = model {
                settings.model = Some(model);
            }
            if let Some(rules) = rules {
                settings.custom_rules = Some(rules);
            }
            if !relays.is_empty() {
                settings.relays = Some(relays);
            }
            store.save(&settings)?;
            info!("Settings updated");
            println!("Settings saved");
        }
        SettingsCommands::Show => {
            let settings = store.load()?;
            println!("Provider:  {:?}", settings.provider);
            println!(
                "API key:   {}",
                if settings.api_key.is_some() {
                    "(set)"
                } else {
                    "(not set)"
                }
            );
            println!(
                "Base URL:  {}",
                settings.base_url.as_deref().unwrap_or("(default)")
            );
            println!(
                "Model:     {}",
                settings.model.as_deref().unwrap_or("(default)")
            );
            println!(
                "Rules:     {}",
                settings.custom_rules.as_deref().unwrap_or("(none)")
            );
            match &settings.relays {
                Some(relays) => {
                    println!("Relays:");
                    for relay in relays {
                        println!("  {}", relay);
                    }
                }
                None => println!("Relays:    (built-in list)"),
            }
        }
        SettingsCommands::Clear => {
            store.clear_settings()?;
            println!("Settings cleared");
        }
    }

    Ok(())
}
