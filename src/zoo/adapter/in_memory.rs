use std::collections::{hash_map::Entry, HashMap, HashSet};

use log::warn;
use thiserror::Error;

use crate::zoo::{
    domain::{
        capacity,
        types::{Enclosure, EnclosureNumber, SpeciesId, SpeciesTrait},
    },
    port::{EnclosureRegistry, SpeciesCatalog},
};

#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("{entry}: missing or malformed field `{field}`")]
    MalformedField { entry: String, field: &'static str },

    #[error("species {0} is listed twice")]
    DuplicateSpecies(SpeciesId),

    #[error("species {0} must occupy a positive amount of space")]
    NonPositiveUnitSize(SpeciesId),

    #[error("species {0} tolerates no biome")]
    NoTolerableBiome(SpeciesId),

    #[error("enclosure {0} is listed twice")]
    DuplicateEnclosure(EnclosureNumber),

    #[error("enclosure {0} must have a positive total size")]
    NonPositiveTotalSize(EnclosureNumber),

    #[error("enclosure {0} provides no biome")]
    NoEnclosureBiome(EnclosureNumber),

    #[error("enclosure {number} holds a non-positive count of {species}")]
    NonPositiveCount {
        number: EnclosureNumber,
        species: SpeciesId,
    },

    #[error("enclosure {number} holds {species} which is not in the catalog")]
    UnknownOccupant {
        number: EnclosureNumber,
        species: SpeciesId,
    },
}

#[derive(Clone, Debug)]
pub struct SpeciesTable {
    species: HashMap<SpeciesId, SpeciesTrait>,
}

impl SpeciesTable {
    pub fn new(traits: Vec<SpeciesTrait>) -> Result<Self, ReferenceDataError> {
        let mut species = HashMap::with_capacity(traits.len());

        for species_trait in traits {
            if species_trait.unit_size == 0 {
                return Err(ReferenceDataError::NonPositiveUnitSize(species_trait.id));
            }
            if species_trait.tolerant_biomes.is_empty() {
                return Err(ReferenceDataError::NoTolerableBiome(species_trait.id));
            }

            match species.entry(species_trait.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(ReferenceDataError::DuplicateSpecies(species_trait.id))
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(species_trait);
                }
            }
        }

        Ok(Self { species })
    }
}

impl SpeciesCatalog for SpeciesTable {
    fn species(&self, id: &str) -> Option<&SpeciesTrait> {
        self.species.get(id)
    }
}

#[derive(Clone, Debug)]
pub struct EnclosureList {
    enclosures: Vec<Enclosure>,
}

impl EnclosureList {
    /// Checks the enclosures against the catalog their occupants refer to.
    ///
    /// Overfull enclosures are accepted with a warning: they never take new
    /// animals, but they are a faithful snapshot of the zoo.
    pub fn new<Catalog: SpeciesCatalog + ?Sized>(
        enclosures: Vec<Enclosure>,
        catalog: &Catalog,
    ) -> Result<Self, ReferenceDataError> {
        let mut numbers = HashSet::with_capacity(enclosures.len());

        for enclosure in &enclosures {
            if !numbers.insert(enclosure.number) {
                return Err(ReferenceDataError::DuplicateEnclosure(enclosure.number));
            }
            if enclosure.total_size == 0 {
                return Err(ReferenceDataError::NonPositiveTotalSize(enclosure.number));
            }
            if enclosure.biomes.is_empty() {
                return Err(ReferenceDataError::NoEnclosureBiome(enclosure.number));
            }

            for occupant in &enclosure.occupants {
                if occupant.count == 0 {
                    return Err(ReferenceDataError::NonPositiveCount {
                        number: enclosure.number,
                        species: occupant.species.clone(),
                    });
                }
                if catalog.species(&occupant.species).is_none() {
                    return Err(ReferenceDataError::UnknownOccupant {
                        number: enclosure.number,
                        species: occupant.species.clone(),
                    });
                }
            }

            let free = capacity::free_space(enclosure, catalog);
            if free < 0 {
                warn!(
                    "enclosure {} is over capacity by {}",
                    enclosure.number, -free
                );
            }
        }

        Ok(Self { enclosures })
    }
}

impl EnclosureRegistry for EnclosureList {
    fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }
}
