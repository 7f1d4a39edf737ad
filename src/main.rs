mod cli;
mod server;
mod shutdown;
mod zoo;

use std::{process::ExitCode, sync::Arc};

use log::{error, info};
use tokio::signal;

use crate::{
    cli::{Command, Invocation},
    zoo::{adapter::report, domain::AllocationResult},
};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    log_panics::init();

    let invocation = match Invocation::parse(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{e}\n{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    let engine = match zoo::create_engine(invocation.config.as_deref()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::from(2);
        }
    };

    match invocation.command {
        Command::Query { species, quantity } => {
            let result: AllocationResult = engine.analyze(&species, quantity);
            for line in report::lines(&result) {
                println!("{line}");
            }
            if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Serve { port } => {
            let listener = match server::bind(port).await {
                Ok(listener) => listener,
                Err(e) => {
                    eprintln!("{e:#}");
                    return ExitCode::from(2);
                }
            };
            info!("Starting server on port {port}");

            server::serve(listener, Arc::new(engine), async {
                if let Err(e) = signal::ctrl_c().await {
                    error!("cannot listen for ctrl-c: {e}");
                }
            })
            .await;

            ExitCode::SUCCESS
        }
    }
}
