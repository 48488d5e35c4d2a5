//! # Ember Sim
//!
//! Headless driver for the Ember character core.
//!
//! Runs a scripted session (sprint, pickups, a fight, a pause, a level
//! transition) and prints the final character state as JSON.
//!
//! Usage: `ember-sim [CONFIG] [SAVE_DIR]`. Without a save directory slots are
//! kept in memory.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod scenario;

use std::path::{Path, PathBuf};

use anyhow::Result;
use ember_gameplay::{CharacterConfig, FileSlotStore, MemorySlotStore, CONFIG_FILE};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::scenario::{load_catalog, Session};

/// Weapon catalog file, looked up next to the config file.
const WEAPONS_FILE: &str = "weapons.toml";

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("ember=info".parse()?))
        .init();

    info!("Ember sim starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let save_dir = args.next().map(PathBuf::from);

    let config = CharacterConfig::load_from(&config_path);
    let weapons_path = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(WEAPONS_FILE);
    let catalog = load_catalog(&weapons_path)?;

    let report = match save_dir {
        Some(dir) => {
            info!("Using save directory {}", dir.display());
            Session::new(&config, catalog, FileSlotStore::new(dir)).run()?
        },
        None => Session::new(&config, catalog, MemorySlotStore::new()).run()?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    info!("Ember sim shutdown complete");
    Ok(())
}
