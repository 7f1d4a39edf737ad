//! Reference data loaded from a JSON document.
//!
//! ```json
//! {
//!   "species": [
//!     {"id": "LEAO", "unit_size": 3, "biomes": ["savana"], "carnivore": true},
//!     {"id": "MACACO", "unit_size": 1, "biomes": ["savana", "floresta"], "behavior": "primate"}
//!   ],
//!   "enclosures": [
//!     {"number": 1, "biome": "savana e rio", "total_size": 10,
//!      "occupants": [{"species": "MACACO", "count": 3}]}
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use log::info;
use serde_json::Value;

use crate::zoo::domain::types::{
    biome_set, parse_biome_descriptor, BiomeSet, Classification, Enclosure, Occupant,
    SpeciesTrait,
};

use super::in_memory::{EnclosureList, ReferenceDataError, SpeciesTable};

pub fn load(path: &Path) -> anyhow::Result<(SpeciesTable, EnclosureList)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let (catalog, enclosures) = parse(&text)?;
    info!("loaded reference data from {}", path.display());
    Ok((catalog, enclosures))
}

pub fn parse(text: &str) -> Result<(SpeciesTable, EnclosureList), ReferenceDataError> {
    let value: Value = serde_json::from_str(text)?;

    let species = value["species"]
        .as_array()
        .ok_or_else(|| malformed("document", "species"))?
        .iter()
        .enumerate()
        .map(|(index, entry)| species_from_json(index, entry))
        .collect::<Result<Vec<_>, _>>()?;
    let catalog = SpeciesTable::new(species)?;

    let enclosures = value["enclosures"]
        .as_array()
        .ok_or_else(|| malformed("document", "enclosures"))?
        .iter()
        .enumerate()
        .map(|(index, entry)| enclosure_from_json(index, entry))
        .collect::<Result<Vec<_>, _>>()?;
    let enclosures = EnclosureList::new(enclosures, &catalog)?;

    Ok((catalog, enclosures))
}

fn malformed(entry: impl Into<String>, field: &'static str) -> ReferenceDataError {
    ReferenceDataError::MalformedField {
        entry: entry.into(),
        field,
    }
}

/// Negative sizes and counts map to zero so the table validation reports
/// them. Values that do not fit a `u32` are malformed.
fn non_negative(value: i64) -> Option<u32> {
    u32::try_from(value.max(0)).ok()
}

fn species_from_json(index: usize, val: &Value) -> Result<SpeciesTrait, ReferenceDataError> {
    let entry = || format!("species #{index}");

    let id = val["id"].as_str().ok_or_else(|| malformed(entry(), "id"))?;
    let unit_size = val["unit_size"]
        .as_i64()
        .and_then(non_negative)
        .ok_or_else(|| malformed(entry(), "unit_size"))?;
    let biomes = val["biomes"]
        .as_array()
        .and_then(|tags| tags.iter().map(Value::as_str).collect::<Option<Vec<_>>>())
        .ok_or_else(|| malformed(entry(), "biomes"))?;

    let carnivore = match &val["carnivore"] {
        Value::Null => false,
        Value::Bool(carnivore) => *carnivore,
        _ => return Err(malformed(entry(), "carnivore")),
    };
    let classification = match (carnivore, &val["behavior"]) {
        (true, _) => Classification::Carnivore,
        (false, Value::Null) => Classification::GenericHerbivore,
        (false, Value::String(behavior)) => match behavior.as_str() {
            "primate" => Classification::PrimateLike,
            "hippo" => Classification::HippoLike,
            "herbivore" => Classification::GenericHerbivore,
            _ => return Err(malformed(entry(), "behavior")),
        },
        (false, _) => return Err(malformed(entry(), "behavior")),
    };

    Ok(SpeciesTrait {
        id: id.to_uppercase(),
        unit_size,
        tolerant_biomes: biome_set(biomes),
        classification,
    })
}

fn enclosure_from_json(index: usize, val: &Value) -> Result<Enclosure, ReferenceDataError> {
    let entry = || format!("enclosure #{index}");

    let number = val["number"]
        .as_u64()
        .and_then(|number| u32::try_from(number).ok())
        .ok_or_else(|| malformed(entry(), "number"))?;
    let biomes: BiomeSet = match &val["biome"] {
        Value::String(descriptor) => parse_biome_descriptor(descriptor),
        Value::Array(tags) => biome_set(
            tags.iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| malformed(entry(), "biome"))?,
        ),
        _ => return Err(malformed(entry(), "biome")),
    };
    let total_size = val["total_size"]
        .as_i64()
        .and_then(non_negative)
        .ok_or_else(|| malformed(entry(), "total_size"))?;

    let occupants = match &val["occupants"] {
        Value::Null => vec![],
        Value::Array(occupants) => occupants
            .iter()
            .map(|occupant| {
                let species = occupant["species"].as_str();
                let count = occupant["count"].as_i64().and_then(non_negative);
                match (species, count) {
                    (Some(species), Some(count)) => Ok(Occupant {
                        species: species.to_uppercase(),
                        count,
                    }),
                    _ => Err(malformed(entry(), "occupants")),
                }
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(malformed(entry(), "occupants")),
    };

    Ok(Enclosure {
        number,
        biomes,
        total_size,
        occupants,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::zoo::{
        adapter::static_zoo,
        domain::engine::AllocationEngine,
        port::{EnclosureRegistry, SpeciesCatalog},
    };

    use super::*;

    fn built_in_as_json() -> Value {
        json!({
            "species": [
                {"id": "LEAO", "unit_size": 3, "biomes": ["savana"], "carnivore": true},
                {"id": "LEOPARDO", "unit_size": 2, "biomes": ["savana"], "carnivore": true},
                {"id": "CROCODILO", "unit_size": 3, "biomes": ["rio"], "carnivore": true},
                {"id": "MACACO", "unit_size": 1, "biomes": ["savana", "floresta"], "behavior": "primate"},
                {"id": "GAZELA", "unit_size": 2, "biomes": ["savana"]},
                {"id": "HIPOPOTAMO", "unit_size": 4, "biomes": ["savana", "rio"], "behavior": "hippo"}
            ],
            "enclosures": [
                {"number": 1, "biome": "savana", "total_size": 10, "occupants": [{"species": "MACACO", "count": 3}]},
                {"number": 2, "biome": "floresta", "total_size": 5, "occupants": []},
                {"number": 3, "biome": ["savana", "rio"], "total_size": 7, "occupants": [{"species": "GAZELA", "count": 1}]},
                {"number": 4, "biome": "rio", "total_size": 8},
                {"number": 5, "biome": "savana", "total_size": 9, "occupants": [{"species": "LEAO", "count": 1}]}
            ]
        })
    }

    #[test]
    fn matches_the_built_in_zoo() {
        let (catalog, enclosures) = parse(&built_in_as_json().to_string()).unwrap();

        for expected in static_zoo::species() {
            assert_eq!(catalog.species(&expected.id), Some(&expected));
        }
        assert_eq!(enclosures.enclosures(), &static_zoo::enclosures()[..]);

        let engine = AllocationEngine::new(catalog, enclosures);
        assert_eq!(engine.analyze("MACACO", 2).unwrap().len(), 3);
    }

    #[test]
    fn loads_from_a_file() {
        let path = std::env::temp_dir().join(format!("zoo-enclosures-{}.json", std::process::id()));
        std::fs::write(&path, built_in_as_json().to_string()).unwrap();

        let (catalog, _) = load(&path).unwrap();
        assert!(catalog.species("HIPOPOTAMO").is_some());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file() {
        let err = load(Path::new("/nonexistent/zoo.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/zoo.json"));
    }

    #[test]
    fn not_json() {
        assert!(matches!(
            parse("species: []"),
            Err(ReferenceDataError::InvalidJson(_))
        ));
    }

    #[test]
    fn malformed_fields() {
        let mut doc = built_in_as_json();
        doc["species"][1]["unit_size"] = json!("two");
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::MalformedField { field: "unit_size", .. })
        ));

        let mut doc = built_in_as_json();
        doc["species"][4]["behavior"] = json!("grazer");
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::MalformedField { field: "behavior", .. })
        ));

        let mut doc = built_in_as_json();
        doc["enclosures"][0]["biome"] = json!(7);
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::MalformedField { field: "biome", .. })
        ));

        let doc = json!({"species": []});
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::MalformedField { field: "enclosures", .. })
        ));
    }

    #[test]
    fn sizes_beyond_u32() {
        let mut doc = built_in_as_json();
        doc["species"][0]["unit_size"] = json!(99999999999i64);
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::MalformedField { field: "unit_size", .. })
        ));

        let mut doc = built_in_as_json();
        doc["enclosures"][1]["total_size"] = json!(4294967296i64);
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::MalformedField { field: "total_size", .. })
        ));

        let mut doc = built_in_as_json();
        doc["enclosures"][0]["occupants"][0]["count"] = json!(4294967296i64);
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::MalformedField { field: "occupants", .. })
        ));
    }

    #[test]
    fn largest_sizes_load_without_overflow() {
        let mut doc = built_in_as_json();
        doc["species"][4]["unit_size"] = json!(u32::MAX);
        doc["enclosures"][2]["total_size"] = json!(u32::MAX);
        doc["enclosures"][2]["occupants"] = json!([
            {"species": "GAZELA", "count": u32::MAX},
            {"species": "GAZELA", "count": u32::MAX}
        ]);

        let (catalog, enclosures) = parse(&doc.to_string()).unwrap();
        assert_eq!(catalog.species("GAZELA").unwrap().unit_size, u32::MAX);

        let engine = AllocationEngine::new(catalog, enclosures);
        assert_eq!(
            engine.analyze("MACACO", 1).unwrap().iter().map(|e| e.number).collect::<Vec<_>>(),
            vec![1]
        );
    }

    #[test]
    fn invalid_values() {
        let mut doc = built_in_as_json();
        doc["species"][0]["unit_size"] = json!(-3);
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::NonPositiveUnitSize(id)) if id == "LEAO"
        ));

        let mut doc = built_in_as_json();
        doc["enclosures"][1]["total_size"] = json!(0);
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::NonPositiveTotalSize(2))
        ));

        let mut doc = built_in_as_json();
        doc["enclosures"][0]["occupants"][0]["species"] = json!("UNICORNIO");
        assert!(matches!(
            parse(&doc.to_string()),
            Err(ReferenceDataError::UnknownOccupant { number: 1, .. })
        ));
    }
}
