use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::context::Context;

mod error;
mod routes;

fn api_router() -> Router {
    routes::leaderboard::router()
        .merge(routes::contests::router())
        .merge(routes::exam::router())
        .merge(routes::health::router())
}

/// The full application, ready to serve or to drive from tests.
pub fn app(ctx: Context) -> Router {
    api_router().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(Extension(Arc::new(ctx))),
    )
}

pub async fn serve(ctx: Context) -> anyhow::Result<()> {
    let server_port = ctx.config.api_port;
    let server_host = ctx.config.api_host.clone();

    let app = app(ctx);

    log::info!(
        port = server_port;
        "Serving API",
    );
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", server_host, server_port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
