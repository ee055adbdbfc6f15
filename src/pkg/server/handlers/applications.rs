use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    pkg::{
        internal::{
            adaptors::applications::{
                query::ApplicationQuery,
                selectors::ApplicationSelector,
                spec::{ApplicationEntry, ApplyInput},
            },
            apply::apply_to_job,
            store::InsertOutcome,
        },
        server::state::AppState,
    },
    prelude::{AppError, Result},
    token::Identity,
};

#[derive(Deserialize, Default)]
pub struct AppliedQuery {
    pub email: Option<String>,
    pub category: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,
    pub job_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime<Utc>>,
}

impl From<ApplicationEntry> for Application {
    fn from(entry: ApplicationEntry) -> Self {
        Application {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            job_id: entry.job_id,
            email: entry.email,
            name: entry.name,
            resume: entry.resume,
            title: entry.title,
            category: entry.category,
            applied_at: entry.applied_at.map(|d| d.to_chrono()),
        }
    }
}

pub async fn apply(
    State(state): State<AppState>,
    Extension(identity): Extension<Arc<Identity>>,
    Json(input): Json<ApplyInput>,
) -> Result<Json<InsertOutcome>> {
    if input.email != identity.email {
        tracing::warn!("{} denied applying as {}", &identity.email, &input.email);
        return Err(AppError::Forbidden);
    }
    let outcome = apply_to_job(state.store(), input).await?;
    Ok(Json(outcome))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<Arc<Identity>>,
    Query(params): Query<AppliedQuery>,
) -> Result<Json<Vec<Application>>> {
    if params.email.as_deref() != Some(identity.email.as_str()) {
        tracing::warn!(
            "{} denied applications of {:?}",
            &identity.email,
            &params.email
        );
        return Err(AppError::Forbidden);
    }
    let query = ApplicationQuery::new(params.email, params.category);
    let applications = ApplicationSelector::new(state.store()).list(&query).await?;
    Ok(Json(applications.into_iter().map(Application::from).collect()))
}
