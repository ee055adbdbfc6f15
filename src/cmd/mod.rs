use crate::{pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod ping;

#[derive(Parser)]
#[command(about = "job board api")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Serve the HTTP api
    Listen,
    /// Check that the database answers, then exit
    Ping,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Ping) => {
            ping::check().await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
