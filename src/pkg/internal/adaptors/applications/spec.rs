use bson::{DateTime, oid::ObjectId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::pkg::internal::adaptors::jobs::spec::JobEntry;

/// One applicant's application to one job, stored in `applied`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub job_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyInput {
    pub job_id: String,
    pub email: String,
    pub name: Option<String>,
    pub resume: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
}

impl ApplyInput {
    /// Fills title and category from the job when the applicant left them out,
    /// so applications stay filterable by category.
    pub fn into_entry(self, job: &JobEntry) -> ApplicationEntry {
        ApplicationEntry {
            id: None,
            job_id: self.job_id,
            email: self.email,
            name: self.name,
            resume: self.resume,
            title: self.title.or_else(|| Some(job.title.clone())),
            category: self.category.or_else(|| Some(job.category.clone())),
            applied_at: Some(DateTime::from_chrono(Utc::now())),
        }
    }
}
