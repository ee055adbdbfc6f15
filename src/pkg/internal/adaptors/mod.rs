use bson::Document;
use serde::de::DeserializeOwned;

pub mod applications;
pub mod jobs;

/// Decodes every readable document. One that doesn't fit `T` is logged and
/// left out so a single stray record can't fail a whole listing.
pub fn decode_all<T: DeserializeOwned>(docs: Vec<Document>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match bson::from_document::<T>(doc.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping undecodable document {:?}: {}", doc.get("_id"), e);
                None
            }
        })
        .collect()
}
