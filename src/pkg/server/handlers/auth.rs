use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use axum_extra::extract::CookieJar;
use serde_json::{Value, json};

use crate::{
    pkg::server::state::AppState,
    prelude::Result,
    token::{Identity, TokenRequest},
};

pub async fn issue(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<TokenRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let token = state.tokens.sign(&input)?;
    tracing::info!("issued token for {}", &input.email);
    Ok((jar.add(state.tokens.cookie(token)), Json(json!({ "success": true }))))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<Arc<Identity>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>)> {
    tracing::info!("{} logged out", &identity.email);
    Ok((
        jar.remove(state.tokens.removal_cookie()),
        Json(json!({ "success": true })),
    ))
}
