use crate::zoo::domain::types::{Enclosure, SpeciesTrait};

pub trait SpeciesCatalog {
    fn species(&self, id: &str) -> Option<&SpeciesTrait>;
}

/// A read-only snapshot of the enclosures, in their reporting order.
pub trait EnclosureRegistry {
    fn enclosures(&self) -> &[Enclosure];
}
