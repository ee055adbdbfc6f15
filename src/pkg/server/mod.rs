pub mod handlers;
pub mod middlewares;
pub mod router;
pub mod state;

use crate::{conf::settings, prelude::Result};
use router::build_routes;

/// Serves the API until ctrl+c. In-flight requests finish before returning.
pub async fn listen() -> Result<()> {
    let app = build_routes().await?;
    let addr = format!("0.0.0.0:{}", &settings.listen_port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "{} listening at {}",
        &settings.service_name,
        listener.local_addr()?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received ctrl+c interrupt, draining connections"),
        Err(e) => {
            // without a signal handler the server runs until killed
            tracing::error!("could not listen for ctrl+c: {}", e);
            std::future::pending::<()>().await
        }
    }
}
