use std::sync::Arc;

use crate::{
    conf::settings,
    pkg::internal::{mongo::MongoStore, store::DocumentStore},
    prelude::Result,
    token::TokenKeys,
};

pub async fn db_store() -> Result<MongoStore> {
    MongoStore::connect(
        &settings.database_url,
        &settings.database_name,
        &settings.service_name,
    )
    .await
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        let tokens = TokenKeys::new(
            &settings.jwt_secret,
            settings.token_ttl_hours,
            &settings.token_cookie,
        );
        Ok(AppState::from_parts(Arc::new(db_store().await?), tokens))
    }

    pub fn from_parts(store: Arc<dyn DocumentStore>, tokens: TokenKeys) -> AppState {
        AppState {
            store,
            tokens: Arc::new(tokens),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
