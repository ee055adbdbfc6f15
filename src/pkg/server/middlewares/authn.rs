use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    pkg::server::state::AppState,
    prelude::{AppError, Result},
};

/// Admits the request only with a valid token cookie, exposing the caller as
/// `Extension<Arc<Identity>>`.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let maybe_cookie = jar
        .get(&state.tokens.cookie_name)
        .filter(|c| !c.value().is_empty());
    if let Some(cookie) = maybe_cookie {
        if let Ok(identity) = state.tokens.verify(cookie.value()) {
            tracing::debug!("authenticated {}", &identity.email);
            request.extensions_mut().insert(Arc::new(identity));
            return Ok(next.run(request).await);
        }
    }
    tracing::warn!("token missing or invalid, authentication denied");
    Err(AppError::Unauthorized)
}
