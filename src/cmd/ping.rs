use crate::{
    conf::settings,
    pkg::{internal::store::DocumentStore, server::state::db_store},
    prelude::Result,
};

pub async fn check() -> Result<()> {
    let store = db_store().await?;
    tracing::debug!("pinging {}", &settings.database_name);
    store.ping().await?;
    println!("Database {} is reachable", settings.database_name);
    Ok(())
}
