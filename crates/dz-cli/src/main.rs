//! dz-hass-gen
//!
//! Reads the device catalog of a Domoticz hub and writes the Home Assistant
//! MQTT configuration that bridges it: automation rules, entity configs,
//! climate entities, utility meters and groups.

mod args;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dz_catalog::{CatalogSnapshot, HttpCatalog};
use dz_emitter::DocumentEmitter;
use dz_generator::generate;

use crate::args::Args;

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(verbose)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = args.resolve_config().context("Invalid configuration")?;
    info!("Domoticz hub: {} ({} units)", config.host, config.unit);

    let root = match &args.output_root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    let emitter =
        DocumentEmitter::new(&root, &config.outputs).context("Invalid output layout")?;
    info!("Writing to the following files:");
    for (artifact, path) in emitter.targets() {
        info!("  {:<14} {}", artifact.label(), path.display());
    }

    // Fail on unwritable destinations before talking to the hub
    emitter
        .preflight()
        .await
        .context("Cannot prepare output directories")?;

    let catalog = HttpCatalog::new(&config.host).context("Cannot create hub client")?;
    let snapshot = CatalogSnapshot::fetch(&catalog)
        .await
        .with_context(|| format!("Cannot read the device list from {}", config.host))?;

    let documents = generate(&snapshot, &config).context("Generation failed")?;

    let written = emitter
        .emit_all(documents.iter())
        .await
        .context("Cannot write output")?;

    info!(
        "Done: {} rules, {} documents, {} files",
        documents.rules().len(),
        documents.document_count(),
        written
    );
    Ok(())
}
