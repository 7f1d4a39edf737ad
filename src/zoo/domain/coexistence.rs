//! Rules deciding whether a new group may join an enclosure's current
//! occupants, independently of how much space is left.

use crate::zoo::port::SpeciesCatalog;

use super::types::{Classification, Enclosure, Space, SpeciesTrait, RIVER, SAVANNA};

/// Extra space reserved when the new group moves in next to another species.
pub const MIXED_OCCUPANCY_PENALTY: Space = 1;

/// The single rule that applies to one request. Resolved once from the
/// species classification and then checked against every candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoexistenceRule<'a> {
    /// Empty enclosure, or one holding only this same carnivore.
    CarnivoreExclusive { species: &'a str },
    /// A single primate needs at least one non-carnivore companion.
    LonePrimate,
    /// A primate group only needs the absence of carnivores.
    PrimateGroup,
    /// Empty enclosure, or a carnivore-free savanna-and-river one.
    Hippo,
    GenericHerbivore,
}

impl<'a> CoexistenceRule<'a> {
    pub fn for_request(species: &'a SpeciesTrait, quantity: i64) -> Self {
        match species.classification {
            Classification::Carnivore => CoexistenceRule::CarnivoreExclusive {
                species: &species.id,
            },
            Classification::PrimateLike if quantity == 1 => CoexistenceRule::LonePrimate,
            Classification::PrimateLike => CoexistenceRule::PrimateGroup,
            Classification::HippoLike => CoexistenceRule::Hippo,
            Classification::GenericHerbivore => CoexistenceRule::GenericHerbivore,
        }
    }

    pub fn permits<Catalog: SpeciesCatalog + ?Sized>(
        &self,
        enclosure: &Enclosure,
        catalog: &Catalog,
    ) -> bool {
        match self {
            CoexistenceRule::CarnivoreExclusive { species } => enclosure
                .occupants
                .iter()
                .all(|occupant| occupant.species == *species),
            CoexistenceRule::LonePrimate => has_non_carnivore(enclosure, catalog),
            CoexistenceRule::PrimateGroup | CoexistenceRule::GenericHerbivore => {
                !has_carnivore(enclosure, catalog)
            }
            CoexistenceRule::Hippo => {
                enclosure.is_empty()
                    || (is_savanna_and_river(enclosure) && !has_carnivore(enclosure, catalog))
            }
        }
    }
}

/// Space the new group costs on top of its own size.
pub fn mixed_occupancy_penalty(enclosure: &Enclosure, species: &str) -> Space {
    if enclosure.hosts_other_species(species) {
        MIXED_OCCUPANCY_PENALTY
    } else {
        0
    }
}

fn is_carnivore<Catalog: SpeciesCatalog + ?Sized>(catalog: &Catalog, species: &str) -> Option<bool> {
    catalog.species(species).map(SpeciesTrait::is_carnivore)
}

fn has_carnivore<Catalog: SpeciesCatalog + ?Sized>(enclosure: &Enclosure, catalog: &Catalog) -> bool {
    enclosure
        .occupants
        .iter()
        .any(|occupant| is_carnivore(catalog, &occupant.species) == Some(true))
}

fn has_non_carnivore<Catalog: SpeciesCatalog + ?Sized>(
    enclosure: &Enclosure,
    catalog: &Catalog,
) -> bool {
    enclosure
        .occupants
        .iter()
        .any(|occupant| is_carnivore(catalog, &occupant.species) == Some(false))
}

fn is_savanna_and_river(enclosure: &Enclosure) -> bool {
    enclosure.biomes.len() == 2
        && enclosure.biomes.contains(SAVANNA)
        && enclosure.biomes.contains(RIVER)
}
