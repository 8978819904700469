use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;
use tracing::info;

use crate::settings::SettingsStore;

#[derive(Subcommand)]
pub enum DocCommands {
    /// Store an HTML file as the working document
    Set {
        /// HTML file to store
        file: PathBuf,
    },

    /// Print the stored document
    Show,

    /// Remove the stored document
    Clear,
}

pub async fn handle_doc(command: DocCommands) -> Result<()> {
    let store = SettingsStore::new()?;

    match command {
        DocCommands::Set { file } => {
            let html = std::fs::read_to_string(&file)?;
            store.save_document(&html)?;
            info!("Stored document from {}", file.display());
            println!("Stored {} bytes", html.len());
        }
        DocCommands::Show => match store.load_document()? {
            Some(html) => println!("{}", html),
            None => println!("No document stored"),
        },
        DocCommands::Clear => {
            store.clear_document()?;
            println!("Document cleared");
        }
    }

    Ok(())
}
