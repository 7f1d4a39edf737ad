//! The zoo used when no reference data file is given.

use crate::zoo::domain::types::{
    biome_set, parse_biome_descriptor, Classification, Enclosure, Occupant, SpeciesTrait, FOREST,
    RIVER, SAVANNA,
};

use super::in_memory::{EnclosureList, ReferenceDataError, SpeciesTable};

pub fn reference_zoo() -> Result<(SpeciesTable, EnclosureList), ReferenceDataError> {
    let catalog = SpeciesTable::new(species())?;
    let enclosures = EnclosureList::new(enclosures(), &catalog)?;
    Ok((catalog, enclosures))
}

pub fn species() -> Vec<SpeciesTrait> {
    let species = |id: &str, unit_size, biomes: &[&str], classification| SpeciesTrait {
        id: id.to_string(),
        unit_size,
        tolerant_biomes: biome_set(biomes.iter().copied()),
        classification,
    };

    vec![
        species("LEAO", 3, &[SAVANNA], Classification::Carnivore),
        species("LEOPARDO", 2, &[SAVANNA], Classification::Carnivore),
        species("CROCODILO", 3, &[RIVER], Classification::Carnivore),
        species("MACACO", 1, &[SAVANNA, FOREST], Classification::PrimateLike),
        species("GAZELA", 2, &[SAVANNA], Classification::GenericHerbivore),
        species("HIPOPOTAMO", 4, &[SAVANNA, RIVER], Classification::HippoLike),
    ]
}

pub fn enclosures() -> Vec<Enclosure> {
    let enclosure = |number, descriptor: &str, total_size, occupants: &[(&str, u32)]| Enclosure {
        number,
        biomes: parse_biome_descriptor(descriptor),
        total_size,
        occupants: occupants
            .iter()
            .map(|&(species, count)| Occupant {
                species: species.to_string(),
                count,
            })
            .collect(),
    };

    vec![
        enclosure(1, "savana", 10, &[("MACACO", 3)]),
        enclosure(2, "floresta", 5, &[]),
        enclosure(3, "savana e rio", 7, &[("GAZELA", 1)]),
        enclosure(4, "rio", 8, &[]),
        enclosure(5, "savana", 9, &[("LEAO", 1)]),
    ]
}
