use log::warn;

use crate::zoo::port::SpeciesCatalog;

use super::types::{Enclosure, Space};

/// Saturates at `Space::MAX`; no real enclosure gets near it.
pub fn occupied_space<Catalog: SpeciesCatalog + ?Sized>(
    enclosure: &Enclosure,
    catalog: &Catalog,
) -> Space {
    enclosure
        .occupants
        .iter()
        .map(|occupant| match catalog.species(&occupant.species) {
            Some(species) => {
                Space::from(occupant.count).saturating_mul(Space::from(species.unit_size))
            }
            None => {
                warn!(
                    "enclosure {} holds {} which is not in the catalog",
                    enclosure.number, occupant.species
                );
                0
            }
        })
        .fold(0, Space::saturating_add)
}

pub fn free_space<Catalog: SpeciesCatalog + ?Sized>(
    enclosure: &Enclosure,
    catalog: &Catalog,
) -> Space {
    Space::from(enclosure.total_size) - occupied_space(enclosure, catalog)
}
