//! In-process `DocumentStore` used by the test suites. Interprets the subset of
//! filter syntax the query builders emit: field equality and `$regex` with the
//! `i` option.

use std::{cmp::Ordering, collections::HashMap, sync::Mutex};

use bson::{Bson, Document, oid::ObjectId};
use regex::RegexBuilder;

use super::store::{
    CollectionName, DeleteOutcome, DocumentStore, FindSpec, InsertOutcome, UpdateOutcome, id_string,
};
use crate::prelude::{AppError, Result};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<CollectionName, Vec<Document>>>,
    fail_inserts: Mutex<Option<CollectionName>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self, collection: CollectionName) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Makes every subsequent insert into `collection` fail.
    pub fn fail_inserts_into(&self, collection: CollectionName) {
        *self.fail_inserts.lock().unwrap() = Some(collection);
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, cond)| {
        let value = doc.get(key);
        match cond {
            Bson::Document(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                ops.iter().all(|(op, arg)| match op.as_str() {
                    "$regex" => {
                        let case_insensitive = ops
                            .get_str("$options")
                            .map(|o| o.contains('i'))
                            .unwrap_or(false);
                        match (value, arg) {
                            (Some(Bson::String(s)), Bson::String(pattern)) => {
                                RegexBuilder::new(pattern)
                                    .case_insensitive(case_insensitive)
                                    .build()
                                    .map(|re| re.is_match(s))
                                    .unwrap_or(false)
                            }
                            _ => false,
                        }
                    }
                    "$options" => true,
                    _ => false,
                })
            }
            _ => value == Some(cond),
        }
    })
}

fn number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

// Cross-type order follows MongoDB's BSON comparison order.
fn rank(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) => 0,
        Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_)) => 1,
        Some(Bson::String(_)) => 2,
        Some(Bson::Document(_)) => 3,
        Some(Bson::Array(_)) => 4,
        Some(Bson::ObjectId(_)) => 5,
        Some(Bson::Boolean(_)) => 6,
        Some(Bson::DateTime(_)) => 7,
        Some(_) => 8,
    }
}

fn compare(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let by_type = rank(a).cmp(&rank(b));
    if by_type != Ordering::Equal {
        return by_type;
    }
    match (a, b) {
        (Some(Bson::String(a)), Some(Bson::String(b))) => a.cmp(b),
        (Some(Bson::DateTime(a)), Some(Bson::DateTime(b))) => {
            a.timestamp_millis().cmp(&b.timestamp_millis())
        }
        (Some(a), Some(b)) => match (number(a), number(b)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

fn sort(docs: &mut [Document], order: &Document) {
    docs.sort_by(|a, b| {
        for (field, direction) in order {
            let descending = number(direction).map(|d| d < 0.0).unwrap_or(false);
            let ord = compare(a.get(field), b.get(field));
            let ord = if descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

fn merge(target: &mut Document, fields: Document) {
    for (key, value) in fields {
        target.insert(key, value);
    }
}

fn with_id(mut doc: Document) -> Document {
    if !doc.contains_key("_id") {
        let mut stamped = Document::new();
        stamped.insert("_id", ObjectId::new());
        merge(&mut stamped, doc);
        doc = stamped;
    }
    doc
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: CollectionName,
        filter: Document,
        spec: FindSpec,
    ) -> Result<Vec<Document>> {
        let mut docs: Vec<Document> = self
            .all(collection)
            .into_iter()
            .filter(|d| matches(d, &filter))
            .collect();
        if let Some(order) = &spec.sort {
            sort(&mut docs, order);
        }
        if let Some(limit) = spec.limit {
            docs.truncate(limit.max(0) as usize);
        }
        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<Option<Document>> {
        Ok(self.all(collection).into_iter().find(|d| matches(d, &filter)))
    }

    async fn insert_one(&self, collection: CollectionName, doc: Document) -> Result<InsertOutcome> {
        if *self.fail_inserts.lock().unwrap() == Some(collection) {
            return Err(AppError::Internal("insert rejected".into()));
        }
        let doc = with_id(doc);
        let inserted_id = doc.get("_id").map(id_string).unwrap_or_default();
        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(doc);
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection).or_default();
        if let Some(doc) = docs.iter_mut().find(|d| matches(d, &filter)) {
            let before = doc.clone();
            merge(doc, set);
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(before != *doc),
                upserted_id: None,
            });
        }
        if !upsert {
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
            });
        }
        let mut doc: Document = filter
            .into_iter()
            .filter(|(_, v)| {
                !matches!(v, Bson::Document(ops) if ops.keys().any(|k| k.starts_with('$')))
            })
            .collect();
        merge(&mut doc, set);
        let doc = with_id(doc);
        let upserted_id = doc.get("_id").map(id_string);
        docs.push(doc);
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id,
        })
    }

    async fn find_one_and_increment(
        &self,
        collection: CollectionName,
        filter: Document,
        field: &str,
        by: i32,
    ) -> Result<Option<Document>> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection).or_default();
        let Some(doc) = docs.iter_mut().find(|d| matches(d, &filter)) else {
            return Ok(None);
        };
        let next = match doc.get(field) {
            Some(Bson::Int32(v)) => Bson::Int32(v + by),
            Some(Bson::Int64(v)) => Bson::Int64(v + i64::from(by)),
            Some(Bson::Double(v)) => Bson::Double(v + f64::from(by)),
            _ => Bson::Int32(by),
        };
        doc.insert(field, next);
        Ok(Some(doc.clone()))
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> Result<DeleteOutcome> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection).or_default();
        let deleted_count = match docs.iter().position(|d| matches(d, &filter)) {
            Some(idx) => {
                docs.remove(idx);
                1
            }
            None => 0,
        };
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::MemoryStore;
    use crate::pkg::internal::store::{CollectionName, DocumentStore, FindSpec};

    #[tokio::test]
    async fn regex_filter_is_case_insensitive() {
        let store = MemoryStore::new();
        store
            .insert_one(CollectionName::Jobs, doc! { "title": "Senior Engineer" })
            .await
            .unwrap();
        store
            .insert_one(CollectionName::Jobs, doc! { "title": "Designer" })
            .await
            .unwrap();
        let found = store
            .find(
                CollectionName::Jobs,
                doc! { "title": { "$regex": "engineer", "$options": "i" } },
                FindSpec::default(),
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("title").unwrap(), "Senior Engineer");
    }

    #[tokio::test]
    async fn upsert_creates_missing_document() {
        let store = MemoryStore::new();
        let oid = bson::oid::ObjectId::new();
        let outcome = store
            .update_one(
                CollectionName::Jobs,
                doc! { "_id": oid },
                doc! { "title": "Fresh" },
                true,
            )
            .await
            .unwrap();
        assert_eq!(outcome.upserted_id, Some(oid.to_hex()));
        let stored = store.all(CollectionName::Jobs);
        assert_eq!(stored[0].get_object_id("_id").unwrap(), oid);
        assert_eq!(stored[0].get_str("title").unwrap(), "Fresh");
    }

    #[tokio::test]
    async fn sorts_descending_and_limits() {
        let store = MemoryStore::new();
        for n in [3, 9, 1, 7] {
            store
                .insert_one(CollectionName::Jobs, doc! { "applicants": n })
                .await
                .unwrap();
        }
        let found = store
            .find(
                CollectionName::Jobs,
                doc! {},
                FindSpec {
                    sort: Some(doc! { "applicants": -1 }),
                    limit: Some(2),
                },
            )
            .await
            .unwrap();
        let counts: Vec<i32> = found.iter().map(|d| d.get_i32("applicants").unwrap()).collect();
        assert_eq!(counts, vec![9, 7]);
    }

    #[tokio::test]
    async fn datetimes_sort_above_strings_descending() {
        let store = MemoryStore::new();
        let docs = [
            doc! { "title": "a", "date": "2024-01-05" },
            doc! { "title": "b", "date": bson::DateTime::from_millis(1) },
            doc! { "title": "c" },
            doc! { "title": "d", "date": bson::DateTime::from_millis(2) },
        ];
        for doc in docs {
            store.insert_one(CollectionName::Jobs, doc).await.unwrap();
        }
        let found = store
            .find(
                CollectionName::Jobs,
                doc! {},
                FindSpec {
                    sort: Some(doc! { "date": -1 }),
                    limit: None,
                },
            )
            .await
            .unwrap();
        let titles: Vec<&str> = found.iter().map(|d| d.get_str("title").unwrap()).collect();
        assert_eq!(titles, vec!["d", "b", "a", "c"]);
    }
}
