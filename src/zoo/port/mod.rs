pub mod reference_data;

pub use reference_data::{EnclosureRegistry, SpeciesCatalog};
