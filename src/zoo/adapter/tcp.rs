//! Line-oriented query service.
//!
//! Every line is one request and gets exactly one response line. A request is
//! either a JSON object `{"animal": "MACACO", "quantidade": 2}`, answered with
//! JSON, or plain text `MACACO 2`, answered with the report lines joined by
//! `"; "`.

use std::sync::Arc;

use log::debug;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpStream,
    select,
};

use crate::{
    shutdown::ShutdownToken,
    zoo::{
        domain::engine::AllocationEngine,
        port::{EnclosureRegistry, SpeciesCatalog},
    },
};

use super::report;

lazy_static::lazy_static! {
    static ref TEXT_REQUEST: Regex = Regex::new(r"^\s*([A-Za-z_]+)\s+([+-]?\d+)\s*$").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Text,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Query {
    pub species: String,
    pub quantity: i64,
    pub format: Format,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Requisição inválida")]
    Malformed(Format),
}

impl Query {
    pub fn parse(line: &str) -> Result<Self, RequestError> {
        if line.trim_start().starts_with('{') {
            Self::from_json(line)
        } else {
            Self::from_text(line)
        }
    }

    fn from_json(line: &str) -> Result<Self, RequestError> {
        let malformed = RequestError::Malformed(Format::Json);

        let value: Value = serde_json::from_str(line).map_err(|_| malformed.clone())?;
        match (value["animal"].as_str(), value["quantidade"].as_i64()) {
            (Some(species), Some(quantity)) => Ok(Query {
                species: species.to_uppercase(),
                quantity,
                format: Format::Json,
            }),
            _ => Err(malformed),
        }
    }

    fn from_text(line: &str) -> Result<Self, RequestError> {
        let malformed = RequestError::Malformed(Format::Text);

        let captures = TEXT_REQUEST.captures(line).ok_or(malformed.clone())?;
        // Out-of-range quantities are not worth a separate message.
        let quantity = captures[2].parse::<i64>().map_err(|_| malformed)?;
        Ok(Query {
            species: captures[1].to_uppercase(),
            quantity,
            format: Format::Text,
        })
    }
}

pub fn handle_line<Catalog: SpeciesCatalog, Registry: EnclosureRegistry>(
    engine: &AllocationEngine<Catalog, Registry>,
    line: &str,
    client_id: i32,
) -> String {
    let query = match Query::parse(line) {
        Ok(query) => query,
        Err(err) => {
            debug!("client {client_id} sent a malformed request: {line:?}");
            return match err {
                RequestError::Malformed(Format::Json) => {
                    report::error_json(&err.to_string()).to_string()
                }
                RequestError::Malformed(Format::Text) => err.to_string(),
            };
        }
    };

    let _span = tracing::info_span!(
        "analyze",
        client_id,
        species = query.species.as_str(),
        quantity = query.quantity
    )
    .entered();

    let result = engine.analyze(&query.species, query.quantity);
    match query.format {
        Format::Json => report::to_json(&result).to_string(),
        Format::Text => report::lines(&result).join("; "),
    }
}

pub async fn handle_connection<Catalog, Registry>(
    mut stream: TcpStream,
    mut shutdown_token: ShutdownToken,
    client_id: i32,
    engine: Arc<AllocationEngine<Catalog, Registry>>,
) -> std::io::Result<()>
where
    Catalog: SpeciesCatalog,
    Registry: EnclosureRegistry,
{
    let (read, mut write) = stream.split();
    let mut lines = BufReader::new(read).lines();

    loop {
        let line = select! {
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break
            },
            _ = shutdown_token.wait_for_shutdown() => break
        };

        if line.trim().is_empty() {
            continue;
        }

        debug!("--> {client_id}: {line}");
        let response = handle_line(&*engine, &line, client_id);
        debug!("<-- {client_id}: {response}");

        write.write_all(response.as_bytes()).await?;
        write.write_all("\n".as_bytes()).await?;
    }

    Ok(())
}
