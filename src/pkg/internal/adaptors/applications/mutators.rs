use super::spec::ApplicationEntry;
use crate::{
    pkg::internal::store::{CollectionName, DocumentStore, InsertOutcome},
    prelude::Result,
};

pub struct ApplicationMutator<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        ApplicationMutator { store }
    }

    pub async fn create(&self, application: &ApplicationEntry) -> Result<InsertOutcome> {
        let doc = bson::to_document(application)?;
        self.store.insert_one(CollectionName::Applied, doc).await
    }
}
