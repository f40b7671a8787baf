use std::sync::Arc;

use axum::{extract::Extension, http, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::context::Context;

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "GCG Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "leaderboard": "/api/leaderboard",
            "contest": "/api/contests",
            "exam": "/api/exam",
        },
    }))
}

/// Always 200 so uptime pingers keep the instance warm; the body reports
/// whether the database answered.
async fn health(Extension(ctx): Extension<Arc<Context>>) -> (http::StatusCode, Json<Value>) {
    let is_database_ok = match ctx.leaderboards.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::error!(
                database_healthy = false,
                error = e.to_string();
                "Failed health check.",
            );
            false
        }
    };

    (
        http::StatusCode::OK,
        Json(json!({
            "status": "ok",
            "timestamp": Utc::now().to_rfc3339(),
            "uptime": ctx.started_at.elapsed().as_secs_f64(),
            "dbConnected": is_database_ok,
        })),
    )
}
