#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod errors;
pub mod fingerprint;
pub mod history;
pub mod importer;
pub mod prompt;
pub mod provider;
pub mod settings;
pub mod types;
pub mod verify;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const _EXIT_COMMAND_ERROR: i32 = 1;
const _EXIT_ELEMENT_NOT_FOUND: i32 = 2;
const _EXIT_MISSING_CREDENTIALS: i32 = 3;
const _EXIT_IMPORT_FAILED: i32 = 4;
const _EXIT_PROVIDER_FAILED: i32 = 5;

use crate::commands::doc::DocCommands;
use crate::commands::settings::SettingsCommands;
use types::{OutputFormat, SelectorKind};

#[derive(Parser)]
#[command(name = "selectorprobe")]
#[command(about = "AI-generated XPath/CSS selectors for HTML elements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a verified selector pair for a designated element
    Suggest {
        /// Rough CSS selector designating the target element
        target: String,

        /// HTML file to load ("-" reads stdin); defaults to the stored document
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// URL to import instead of a file (runs the relay cascade)
        #[arg(short, long)]
        url: Option<String>,

        /// Pick the target at a specific index (0-based) when multiple match
        #[arg(long, default_value = "0")]
        index: usize,

        /// Extra rules for the provider, overriding stored custom rules
        #[arg(long)]
        rules: Option<String>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the structural fingerprint of a designated element
    Fingerprint {
        /// Rough CSS selector designating the target element
        target: String,

        /// HTML file to load ("-" reads stdin); defaults to the stored document
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// URL to import instead of a file
        #[arg(short, long)]
        url: Option<String>,

        /// Pick the target at a specific index (0-based) when multiple match
        #[arg(long, default_value = "0")]
        index: usize,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Verify a selector against a document and count matches
    Verify {
        /// Selector expression (CSS or XPath)
        selector: String,

        /// Selector kind; inferred from the expression when omitted
        #[arg(long)]
        kind: Option<SelectorKind>,

        /// HTML file to load ("-" reads stdin); defaults to the stored document
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// URL to import instead of a file
        #[arg(short, long)]
        url: Option<String>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Import a URL through the relay cascade and store it as the document
    Import {
        /// URL to import
        url: String,

        /// Also write the fetched document to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the document body to stdout instead of a summary
        #[arg(long)]
        show: bool,

        /// Output format for the summary
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Manage the stored HTML document
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },

    /// Manage provider settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[tokio::main]
async fn main() {
    let result = run().await;

    // Handle exit codes based on error type
    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            // Convert to our error type to get proper exit code
            let probe_err: errors::SelectorProbeError = err.into();

            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": probe_err.to_string(),
                "exit_code": probe_err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            // Also log to stderr for human reading
            eprintln!("Error: {}", probe_err);
            std::process::exit(probe_err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so JSON output to stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "selectorprobe=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest {
            target,
            file,
            url,
            index,
            rules,
            format,
        } => commands::suggest::handle_suggest(target, file, url, index, rules, format).await?,

        Commands::Fingerprint {
            target,
            file,
            url,
            index,
            format,
        } => commands::fingerprint::handle_fingerprint(target, file, url, index, format).await?,

        Commands::Verify {
            selector,
            kind,
            file,
            url,
            format,
        } => commands::verify::handle_verify(selector, kind, file, url, format).await?,

        Commands::Import {
            url,
            output,
            show,
            format,
        } => commands::import::handle_import(url, output, show, format).await?,

        Commands::Doc { command } => commands::doc::handle_doc(command).await?,

        Commands::Settings { command } => commands::settings::handle_settings(command).await?,
    }

    Ok(())
}
