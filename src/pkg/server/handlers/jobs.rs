use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{
                mutators::JobMutator,
                query::{JobQuery, POPULAR_LIMIT, parse_id},
                selectors::JobSelector,
                spec::{JobEntry, JobPatch, NewJob},
            },
            store::{DeleteOutcome, InsertOutcome, UpdateOutcome},
        },
        server::state::AppState,
    },
    prelude::Result,
    token::Identity,
};

#[derive(Deserialize, Default)]
pub struct ListJobsQuery {
    pub cat: Option<String>,
    pub q: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub applicants: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl From<JobEntry> for Job {
    fn from(entry: JobEntry) -> Self {
        Job {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: entry.title,
            category: entry.category,
            name: entry.name,
            email: entry.email,
            banner: entry.banner,
            salary_range: entry.salary_range,
            description: entry.description,
            applicants: entry.applicants,
            date: entry.date.map(|d| d.to_chrono()),
            deadline: entry.deadline,
        }
    }
}

fn render(entries: Vec<JobEntry>) -> Json<Vec<Job>> {
    Json(entries.into_iter().map(Job::from).collect())
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<Vec<Job>>> {
    let query = JobQuery::new().category(params.cat).title(params.q);
    tracing::debug!("listing jobs: {:?}", &query);
    let jobs = JobSelector::new(state.store()).list(&query).await?;
    Ok(render(jobs))
}

pub async fn popular(State(state): State<AppState>) -> Result<Json<Vec<Job>>> {
    let jobs = JobSelector::new(state.store()).popular(POPULAR_LIMIT).await?;
    Ok(render(jobs))
}

pub async fn by_owner(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Job>>> {
    let query = JobQuery::new().owner(Some(email));
    let jobs = JobSelector::new(state.store()).list(&query).await?;
    Ok(render(jobs))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewJob>,
) -> Result<Json<InsertOutcome>> {
    let outcome = JobMutator::new(state.store())
        .create(&JobEntry::from(input))
        .await?;
    tracing::info!("created job {}", &outcome.inserted_id);
    Ok(Json(outcome))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(identity): Extension<Arc<Identity>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Job>>> {
    let id = parse_id(&id)?;
    tracing::debug!("{} fetching job {}", &identity.email, &id);
    let job = JobSelector::new(state.store()).get_by_id(&id).await?;
    Ok(Json(job.map(Job::from)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<JobPatch>,
) -> Result<Json<UpdateOutcome>> {
    let id = parse_id(&id)?;
    let outcome = JobMutator::new(state.store()).update(&id, &patch).await?;
    Ok(Json(outcome))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>> {
    let id = parse_id(&id)?;
    let outcome = JobMutator::new(state.store()).delete(&id).await?;
    tracing::info!("deleted job {}: {}", &id, outcome.deleted_count);
    Ok(Json(outcome))
}
