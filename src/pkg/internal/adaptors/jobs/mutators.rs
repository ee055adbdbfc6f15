use bson::oid::ObjectId;

use super::{
    query::by_id,
    spec::{JobEntry, JobPatch},
};
use crate::{
    pkg::internal::store::{
        CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome,
    },
    prelude::Result,
};

pub struct JobMutator<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> JobMutator<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        JobMutator { store }
    }

    pub async fn create(&self, job: &JobEntry) -> Result<InsertOutcome> {
        let doc = bson::to_document(job)?;
        self.store.insert_one(CollectionName::Jobs, doc).await
    }

    /// Merges `patch` into the job, creating it under `id` when missing.
    pub async fn update(&self, id: &ObjectId, patch: &JobPatch) -> Result<UpdateOutcome> {
        self.store
            .update_one(CollectionName::Jobs, by_id(id), patch.to_document()?, true)
            .await
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<DeleteOutcome> {
        self.store.delete_one(CollectionName::Jobs, by_id(id)).await
    }

    /// Returns the job as it looks after the increment, `None` if no job has `id`.
    pub async fn add_applicants(&self, id: &ObjectId, by: i32) -> Result<Option<JobEntry>> {
        let doc = self
            .store
            .find_one_and_increment(CollectionName::Jobs, by_id(id), "applicants", by)
            .await?;
        Ok(doc.map(bson::from_document).transpose()?)
    }
}
