use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{MethodRouter, get, post},
};
use tower_http::cors::CorsLayer;

use super::{
    handlers::{
        applications,
        auth::{issue, logout},
        jobs,
        probes::{healthz, home, livez},
    },
    middlewares::authn,
    state::AppState,
};
use crate::{conf::settings, prelude::Result};

/// Wraps `route` in the token gate. Methods chained onto the result after this
/// call stay public.
fn gated(state: &AppState, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(state.clone(), authn::authenticate))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .route("/api/v1/jobs", get(jobs::list).post(jobs::create))
        .route("/api/v1/popular-jobs", get(jobs::popular))
        .route("/api/v1/popular-jobs/", get(jobs::popular))
        .route("/api/v1/jobs/user/:email", get(jobs::by_owner))
        .route(
            "/api/v1/job/:id",
            gated(&state, get(jobs::retrieve))
                .put(jobs::update)
                .delete(jobs::remove),
        )
        .route(
            "/api/v1/apply-job",
            gated(&state, post(applications::apply)),
        )
        .route(
            "/api/v1/applied-jobs",
            gated(&state, get(applications::list)),
        )
        .route(
            "/api/v1/applied-jobs/",
            gated(&state, get(applications::list)),
        )
        .route("/api/v1/auth/jwt", post(issue))
        .route("/api/v1/logout", gated(&state, post(logout)))
        .with_state(state)
}

fn cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins()
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    Ok(routes(state).layer(cors()))
}
