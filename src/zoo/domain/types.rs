use std::{borrow::Borrow, collections::BTreeSet};

#[cfg(test)]
use proptest_derive::Arbitrary;

pub type SpeciesId = String;
pub type EnclosureNumber = u32;

/// Signed so that inconsistent snapshots (overfull enclosures) stay representable.
pub type Space = i64;

pub const SAVANNA: &str = "savana";
pub const RIVER: &str = "rio";
pub const FOREST: &str = "floresta";

/// Joins the tags of a multi-biome descriptor, as in "savana e rio".
const DESCRIPTOR_SEPARATOR: &str = " e ";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Biome(String);

impl Biome {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_lowercase())
    }
}

impl Borrow<str> for Biome {
    fn borrow(&self) -> &str {
        &self.0
    }
}

pub type BiomeSet = BTreeSet<Biome>;

pub fn biome_set<'a>(tags: impl IntoIterator<Item = &'a str>) -> BiomeSet {
    tags.into_iter()
        .map(Biome::new)
        .filter(|biome| !biome.0.is_empty())
        .collect()
}

/// Splits a descriptor such as "savana e rio" into its biome tags.
pub fn parse_biome_descriptor(descriptor: &str) -> BiomeSet {
    biome_set(descriptor.split(DESCRIPTOR_SEPARATOR))
}

/// How a species behaves towards enclosure mates. Exactly one coexistence
/// rule follows from each variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Classification {
    Carnivore,
    /// Seeks company when alone, tolerates anything but predators in a group.
    PrimateLike,
    /// Shares space only in an enclosure that is both savanna and river.
    HippoLike,
    GenericHerbivore,
}

impl Classification {
    pub fn is_carnivore(self) -> bool {
        self == Classification::Carnivore
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeciesTrait {
    pub id: SpeciesId,
    pub unit_size: u32,
    pub tolerant_biomes: BiomeSet,
    pub classification: Classification,
}

impl SpeciesTrait {
    pub fn is_carnivore(&self) -> bool {
        self.classification.is_carnivore()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub species: SpeciesId,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enclosure {
    pub number: EnclosureNumber,
    pub biomes: BiomeSet,
    pub total_size: u32,
    pub occupants: Vec<Occupant>,
}

impl Enclosure {
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn hosts_other_species(&self, species: &str) -> bool {
        self.occupants.iter().any(|occupant| occupant.species != species)
    }
}

/// An enclosure that can take the requested group, with the space left over
/// once the group has moved in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeasibleEnclosure {
    pub number: EnclosureNumber,
    pub free_space_after: Space,
    pub total_size: u32,
}
