use super::types::{Enclosure, SpeciesTrait};

/// An enclosure suits a species when it provides at least one biome the
/// species tolerates.
pub fn is_compatible(enclosure: &Enclosure, species: &SpeciesTrait) -> bool {
    !enclosure.biomes.is_disjoint(&species.tolerant_biomes)
}

#[cfg(test)]
mod tests {
    use crate::zoo::domain::types::{
        biome_set, parse_biome_descriptor, Classification, FOREST, RIVER, SAVANNA,
    };

    use super::*;

    fn enclosure(descriptor: &str) -> Enclosure {
        Enclosure {
            number: 1,
            biomes: parse_biome_descriptor(descriptor),
            total_size: 10,
            occupants: vec![],
        }
    }

    fn species(biomes: &[&str]) -> SpeciesTrait {
        SpeciesTrait {
            id: "X".to_string(),
            unit_size: 1,
            tolerant_biomes: biome_set(biomes.iter().copied()),
            classification: Classification::GenericHerbivore,
        }
    }

    #[test]
    fn single_biome() {
        assert!(is_compatible(&enclosure("savana"), &species(&[SAVANNA])));
        assert!(!is_compatible(&enclosure("floresta"), &species(&[SAVANNA])));
    }

    #[test]
    fn each_tag_of_a_dual_biome_counts() {
        let dual = enclosure("savana e rio");
        assert!(is_compatible(&dual, &species(&[RIVER])));
        assert!(is_compatible(&dual, &species(&[SAVANNA])));
        assert!(is_compatible(&dual, &species(&[FOREST, RIVER])));
        assert!(!is_compatible(&dual, &species(&[FOREST])));
    }
}
