use bson::{Bson, Document};
use serde::Serialize;

use crate::prelude::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Jobs,
    Applied,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Jobs => "jobs",
            CollectionName::Applied => "applied",
        }
    }
}

/// Sort and limit applied on top of a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindSpec {
    pub sort: Option<Document>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// The document operations the service relies on. Each call is atomic on its
/// own; nothing here composes them.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
        spec: FindSpec,
    ) -> Result<Vec<Document>>;

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>>;

    async fn insert_one(&self, collection: CollectionName, doc: Document) -> Result<InsertOutcome>;

    /// `$set` merge of `set` into the first match, inserting when `upsert` and
    /// nothing matched.
    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome>;

    /// `$inc` of `field` by `by`, returning the document after the update.
    async fn find_one_and_increment(
        &self,
        collection: CollectionName,
        filter: Document,
        field: &str,
        by: i32,
    ) -> Result<Option<Document>>;

    async fn delete_one(&self, collection: CollectionName, filter: Document)
    -> Result<DeleteOutcome>;

    async fn ping(&self) -> Result<()>;
}

pub fn id_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
