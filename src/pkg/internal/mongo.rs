use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    options::{ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument, UpdateOptions},
};

use super::store::{
    CollectionName, DeleteOutcome, DocumentStore, FindSpec, InsertOutcome, UpdateOutcome, id_string,
};
use crate::prelude::Result;

#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Builds the client lazily; the first operation opens the connection.
    pub async fn connect(url: &str, database: &str, app_name: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(url).await?;
        options.app_name = Some(app_name.to_string());
        let client = Client::with_options(options)?;
        tracing::info!("using database {}", database);
        Ok(MongoStore {
            db: client.database(database),
        })
    }

    fn collection(&self, name: CollectionName) -> Collection<Document> {
        self.db.collection(name.as_str())
    }
}

#[async_trait::async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
        spec: FindSpec,
    ) -> Result<Vec<Document>> {
        let mut options = FindOptions::default();
        options.sort = spec.sort;
        options.limit = spec.limit;
        tracing::debug!("find {}: {:?}", collection.as_str(), &filter);
        let cursor = self.collection(collection).find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>> {
        Ok(self.collection(collection).find_one(filter, None).await?)
    }

    async fn insert_one(&self, collection: CollectionName, doc: Document) -> Result<InsertOutcome> {
        let result = self.collection(collection).insert_one(doc, None).await?;
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id_string(&result.inserted_id),
        })
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome> {
        let options = UpdateOptions::builder().upsert(upsert).build();
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": set }, options)
            .await?;
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.as_ref().map(id_string),
        })
    }

    async fn find_one_and_increment(
        &self,
        collection: CollectionName,
        filter: Document,
        field: &str,
        by: i32,
    ) -> Result<Option<Document>> {
        let mut inc = Document::new();
        inc.insert(field, by);
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        Ok(self
            .collection(collection)
            .find_one_and_update(filter, doc! { "$inc": inc }, options)
            .await?)
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<DeleteOutcome> {
        let result = self.collection(collection).delete_one(filter, None).await?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
