//! The allocation engine.
//!
//! Stateless over injected reference data: every call to
//! [`AllocationEngine::analyze`] reads the catalog and the enclosure snapshot
//! and nothing else, so one engine can be shared between any number of
//! callers.

use log::debug;
use thiserror::Error;

use crate::zoo::port::{EnclosureRegistry, SpeciesCatalog};

use super::{
    biome, capacity,
    coexistence::{self, CoexistenceRule},
    types::{Enclosure, FeasibleEnclosure, Space},
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Animal inválido")]
    InvalidSpecies,

    #[error("Quantidade inválida")]
    InvalidQuantity,

    #[error("Não há recinto viável")]
    NoFeasibleEnclosure,
}

pub type AllocationResult = Result<Vec<FeasibleEnclosure>, AllocationError>;

pub struct AllocationEngine<Catalog, Registry> {
    catalog: Catalog,
    registry: Registry,
}

impl<Catalog: SpeciesCatalog, Registry: EnclosureRegistry> AllocationEngine<Catalog, Registry> {
    pub fn new(catalog: Catalog, registry: Registry) -> Self {
        Self { catalog, registry }
    }

    /// Every enclosure that can take `quantity` animals of `species_id`, in
    /// snapshot order, with the free space left after the addition.
    pub fn analyze(&self, species_id: &str, quantity: i64) -> AllocationResult {
        let species = self
            .catalog
            .species(species_id)
            .ok_or(AllocationError::InvalidSpecies)?;

        if quantity <= 0 {
            return Err(AllocationError::InvalidQuantity);
        }

        let required = quantity.saturating_mul(Space::from(species.unit_size));
        let rule = CoexistenceRule::for_request(species, quantity);
        debug!("{quantity}x {species_id} needs {required} space under {rule:?}");

        let candidates = self
            .registry
            .enclosures()
            .iter()
            .filter(|enclosure| {
                biome::is_compatible(enclosure, species)
                    && capacity::free_space(*enclosure, &self.catalog) >= required
                    && rule.permits(enclosure, &self.catalog)
            })
            .collect::<Vec<&Enclosure>>();

        if candidates.is_empty() {
            return Err(AllocationError::NoFeasibleEnclosure);
        }

        let feasible = candidates
            .into_iter()
            .filter_map(|enclosure| {
                let free_space_after = capacity::free_space(enclosure, &self.catalog)
                    - required
                    - coexistence::mixed_occupancy_penalty(enclosure, species_id);

                if free_space_after < 0 {
                    debug!(
                        "enclosure {} has no room left for the mixed-occupancy buffer",
                        enclosure.number
                    );
                    return None;
                }

                Some(FeasibleEnclosure {
                    number: enclosure.number,
                    free_space_after,
                    total_size: enclosure.total_size,
                })
            })
            .collect::<Vec<_>>();

        if feasible.is_empty() {
            Err(AllocationError::NoFeasibleEnclosure)
        } else {
            Ok(feasible)
        }
    }
}
