use bson::oid::ObjectId;

use super::{
    query::{JobQuery, by_id, most_applied, newest_first},
    spec::JobEntry,
};
use crate::{
    pkg::internal::{
        adaptors::decode_all,
        store::{CollectionName, DocumentStore},
    },
    prelude::Result,
};

pub struct JobSelector<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> JobSelector<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        JobSelector { store }
    }

    pub async fn get_by_id(&self, id: &ObjectId) -> Result<Option<JobEntry>> {
        let doc = self.store.find_one(CollectionName::Jobs, by_id(id)).await?;
        Ok(doc.map(bson::from_document).transpose()?)
    }

    /// Newest postings first.
    pub async fn list(&self, query: &JobQuery) -> Result<Vec<JobEntry>> {
        let docs = self
            .store
            .find(CollectionName::Jobs, query.filter(), newest_first())
            .await?;
        Ok(decode_all(docs))
    }

    pub async fn popular(&self, limit: i64) -> Result<Vec<JobEntry>> {
        let docs = self
            .store
            .find(CollectionName::Jobs, Default::default(), most_applied(limit))
            .await?;
        Ok(decode_all(docs))
    }
}
