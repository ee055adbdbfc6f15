use bson::{Bson, DateTime, Document, oid::ObjectId};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::prelude::Result;

/// A job posting as stored in the `jobs` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub applicants: i32,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// Older postings may carry `date` as an RFC 3339 or `YYYY-MM-DD` string.
/// Anything that is neither a datetime nor such a string reads as absent.
fn lenient_date<'de, D>(deserializer: D) -> core::result::Result<Option<DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let date = match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::DateTime(date)) => Some(date),
        Some(Bson::String(text)) => parse_date(&text),
        _ => None,
    };
    Ok(date)
}

fn parse_date(text: &str) -> Option<DateTime> {
    if let Ok(date) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(DateTime::from_chrono(date.with_timezone(&Utc)));
    }
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(DateTime::from_chrono(day.and_hms_opt(0, 0, 0)?.and_utc()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub category: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub banner: Option<String>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
    pub applicants: Option<i32>,
    pub date: Option<chrono::DateTime<Utc>>,
    pub deadline: Option<String>,
}

impl From<NewJob> for JobEntry {
    fn from(job: NewJob) -> Self {
        JobEntry {
            id: None,
            title: job.title,
            category: job.category,
            name: job.name,
            email: job.email,
            banner: job.banner,
            salary_range: job.salary_range,
            description: job.description,
            applicants: job.applicants.unwrap_or(0),
            date: Some(DateTime::from_chrono(job.date.unwrap_or_else(Utc::now))),
            deadline: job.deadline,
        }
    }
}

/// Fields merged into an existing job with `$set`; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    // stored as a BSON datetime, see `JobPatch::to_document`
    #[serde(default, skip_serializing)]
    pub date: Option<chrono::DateTime<Utc>>,
}

impl JobPatch {
    pub fn to_document(&self) -> Result<Document> {
        let mut set = bson::to_document(self)?;
        if let Some(date) = self.date {
            set.insert("date", DateTime::from_chrono(date));
        }
        Ok(set)
    }
}
