use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

pub const USAGE: &str = "usage: zoo-enclosures [--config <file.json>] <SPECIES> <QUANTITY>
       zoo-enclosures [--config <file.json>] serve [PORT]";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Query { species: String, quantity: i64 },
    Serve { port: u16 },
}

#[derive(Debug, PartialEq, Eq)]
pub struct Invocation {
    pub config: Option<PathBuf>,
    pub command: Command,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing file name after --config")]
    MissingConfig,
    #[error("invalid port number: {0}")]
    InvalidPort(String),
    #[error("quantity must be an integer, got {0:?}")]
    InvalidQuantity(String),
    #[error("unexpected arguments: {0:?}")]
    UnexpectedArguments(Vec<String>),
}

impl Invocation {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, UsageError> {
        let mut config = None;
        let mut positional = vec![];

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                config = Some(PathBuf::from(args.next().ok_or(UsageError::MissingConfig)?));
            } else {
                positional.push(arg);
            }
        }

        let command = match positional.as_slice() {
            [serve] if serve == "serve" => Command::Serve { port: DEFAULT_PORT },
            [serve, port] if serve == "serve" => Command::Serve {
                port: port
                    .parse()
                    .map_err(|_| UsageError::InvalidPort(port.clone()))?,
            },
            [species, quantity] => Command::Query {
                species: species.to_uppercase(),
                quantity: quantity
                    .trim()
                    .parse()
                    .map_err(|_| UsageError::InvalidQuantity(quantity.clone()))?,
            },
            _ => return Err(UsageError::UnexpectedArguments(positional.clone())),
        };

        Ok(Invocation { config, command })
    }
}
