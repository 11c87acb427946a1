use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use folio::app::{App, AppEvent};
use folio::config::Config;
use folio::theme::ThemeVariant;
use folio::ui;

/// Get the config directory path (~/.config/folio/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("folio");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Terminal browser for static-site content manifests")]
struct Args {
    /// Manifest URL (overrides manifest_url from the config file)
    url: Option<String>,

    /// Theme to start with ("dark" or "light")
    #[arg(long)]
    theme: Option<String>,

    /// Use an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let manifest_url = match args.url.or_else(|| config.manifest_url.clone()) {
        Some(url) => url,
        None => {
            eprintln!("Error: no manifest URL given.");
            eprintln!();
            eprintln!("Pass one on the command line:");
            eprintln!("  folio https://example.com/content.json");
            eprintln!();
            eprintln!(
                "Or set manifest_url in {}",
                config_path.display()
            );
            std::process::exit(1);
        }
    };

    let mut app = App::new(manifest_url, &config).context("Failed to create application")?;

    // --theme beats the config file
    if let Some(name) = &args.theme {
        match ThemeVariant::from_str_name(name) {
            Some(variant) => app.set_theme(variant),
            None => anyhow::bail!("Unknown theme '{}' (expected \"dark\" or \"light\")", name),
        }
    }

    // Create event channel for the manifest load task
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(8);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
