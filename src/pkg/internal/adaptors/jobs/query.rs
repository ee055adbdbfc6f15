use bson::{Document, doc, oid::ObjectId};

use crate::{
    pkg::internal::store::FindSpec,
    prelude::{AppError, Result},
};

pub const POPULAR_LIMIT: i64 = 3;

/// Optional constraints on a job listing. Unset (or empty) fields match
/// everything.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JobQuery {
    pub category: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl JobQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = present(category);
        self
    }

    /// Case-insensitive substring match on the title.
    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = present(title);
        self
    }

    pub fn owner(mut self, email: Option<String>) -> Self {
        self.email = present(email);
        self
    }

    pub fn filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(category) = &self.category {
            filter.insert("category", category.as_str());
        }
        if let Some(title) = &self.title {
            filter.insert(
                "title",
                doc! { "$regex": regex::escape(title), "$options": "i" },
            );
        }
        if let Some(email) = &self.email {
            filter.insert("email", email.as_str());
        }
        filter
    }
}

pub fn newest_first() -> FindSpec {
    FindSpec {
        sort: Some(doc! { "date": -1 }),
        limit: None,
    }
}

pub fn most_applied(limit: i64) -> FindSpec {
    FindSpec {
        sort: Some(doc! { "applicants": -1 }),
        limit: Some(limit),
    }
}

pub fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest(format!("invalid job id: {}", id)))
}

pub fn by_id(id: &ObjectId) -> Document {
    doc! { "_id": *id }
}
