use serde_json::{json, Value};

use crate::zoo::domain::{engine::AllocationResult, types::FeasibleEnclosure};

pub fn line(enclosure: &FeasibleEnclosure) -> String {
    format!(
        "Recinto {} (espaço livre: {} total: {})",
        enclosure.number, enclosure.free_space_after, enclosure.total_size
    )
}

/// One line per feasible enclosure, or the error message on its own.
pub fn lines(result: &AllocationResult) -> Vec<String> {
    match result {
        Ok(enclosures) => enclosures.iter().map(line).collect(),
        Err(err) => vec![err.to_string()],
    }
}

pub fn to_json(result: &AllocationResult) -> Value {
    match result {
        Ok(enclosures) => json!({
            "erro": null,
            "recintosViaveis": enclosures
                .iter()
                .map(|enclosure| json!({
                    "numero": enclosure.number,
                    "espacoLivre": enclosure.free_space_after,
                    "total": enclosure.total_size,
                }))
                .collect::<Vec<_>>(),
        }),
        Err(err) => error_json(&err.to_string()),
    }
}

pub fn error_json(message: &str) -> Value {
    json!({"erro": message, "recintosViaveis": null})
}
