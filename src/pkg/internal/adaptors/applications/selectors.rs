use super::{
    query::{ApplicationQuery, existing},
    spec::ApplicationEntry,
};
use crate::{
    pkg::internal::{
        adaptors::decode_all,
        store::{CollectionName, DocumentStore, FindSpec},
    },
    prelude::Result,
};

pub struct ApplicationSelector<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        ApplicationSelector { store }
    }

    pub async fn list(&self, query: &ApplicationQuery) -> Result<Vec<ApplicationEntry>> {
        let docs = self
            .store
            .find(CollectionName::Applied, query.filter(), FindSpec::default())
            .await?;
        Ok(decode_all(docs))
    }

    /// Whether `email` already has an application on `job_id`, whatever shape
    /// the stored record has.
    pub async fn has_applied(&self, job_id: &str, email: &str) -> Result<bool> {
        let doc = self
            .store
            .find_one(CollectionName::Applied, existing(job_id, email))
            .await?;
        Ok(doc.is_some())
    }
}
