use std::path::Path;

use anyhow::Context;

pub mod adapter;
pub mod domain;
pub mod port;

use adapter::{
    in_memory::{EnclosureList, SpeciesTable},
    json_config, static_zoo,
};
use domain::AllocationEngine;

pub type ZooEngine = AllocationEngine<SpeciesTable, EnclosureList>;

/// Builds the engine over the reference data in `config`, or over the
/// built-in zoo when no file is given.
pub fn create_engine(config: Option<&Path>) -> anyhow::Result<ZooEngine> {
    let (catalog, enclosures) = match config {
        Some(path) => json_config::load(path)
            .with_context(|| format!("loading reference data from {}", path.display()))?,
        None => static_zoo::reference_zoo().context("building the built-in zoo")?,
    };

    Ok(AllocationEngine::new(catalog, enclosures))
}
