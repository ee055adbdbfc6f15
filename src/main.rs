mod cmd;
pub mod conf;
pub mod error;
pub mod pkg;
mod prelude;
pub mod token;

use tracing_subscriber::EnvFilter;

use crate::prelude::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    cmd::run().await?;
    Ok(())
}
