use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    api::error::{ApiError, AppResult},
    context::Context,
    errors::{domain_error, Error, ErrorCode},
    models::leaderboard::{APILeaderboardEntry, RefreshSummary},
    usecases::{
        self,
        leaderboards::{NewEntry, MISSING_FIELDS},
    },
};

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/leaderboard",
            get(get_leaderboard).post(create_entry),
        )
        .route("/api/leaderboard/refresh-all", put(refresh_all))
        .route("/api/leaderboard/:id/refresh", put(refresh_entry))
        .route("/api/leaderboard/:id", delete(delete_entry))
}

/// Keeps domain errors as they are and labels anything else with `feedback`.
fn or_internal(feedback: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |e| match domain_error(&e) {
        Some(_) => ApiError(e),
        None => ApiError(
            Error::new(ErrorCode::InternalServerError, feedback)
                .with_detail(e.to_string())
                .into(),
        ),
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEntryRequest {
    name: Option<String>,
    leetcode_username: Option<String>,
    codeforces_username: Option<String>,
}

async fn get_leaderboard(
    Extension(ctx): Extension<Arc<Context>>,
) -> AppResult<Json<Vec<APILeaderboardEntry>>> {
    let entries = usecases::leaderboards::fetch_all(ctx.clone())
        .await
        .map_err(or_internal("Error fetching leaderboard data"))?;

    Ok(Json(
        entries
            .into_iter()
            .map(APILeaderboardEntry::from_entry)
            .collect(),
    ))
}

async fn create_entry(
    Extension(ctx): Extension<Arc<Context>>,
    request: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<APILeaderboardEntry>)> {
    // Any body that does not decode into the three fields is a missing-field error.
    let Json(request) = request.map_err(|rejection| {
        log::warn!(error = rejection.body_text(); "Rejected leaderboard entry body");
        ApiError(Error::new(ErrorCode::BadRequest, MISSING_FIELDS).into())
    })?;

    let entry = usecases::leaderboards::create(
        NewEntry {
            name: request.name,
            leetcode_username: request.leetcode_username,
            codeforces_username: request.codeforces_username,
        },
        ctx.clone(),
    )
    .await
    .map_err(or_internal("Error adding user to leaderboard"))?;

    Ok((StatusCode::CREATED, Json(APILeaderboardEntry::from_entry(entry))))
}

async fn refresh_entry(
    Extension(ctx): Extension<Arc<Context>>,
    Path(id): Path<String>,
) -> AppResult<Json<APILeaderboardEntry>> {
    let entry = usecases::leaderboards::refresh_one(&id, ctx.clone())
        .await
        .map_err(or_internal("Error refreshing user stats"))?;

    Ok(Json(APILeaderboardEntry::from_entry(entry)))
}

async fn refresh_all(Extension(ctx): Extension<Arc<Context>>) -> AppResult<Json<RefreshSummary>> {
    let summary = usecases::leaderboards::refresh_all(ctx.clone())
        .await
        .map_err(or_internal("Error refreshing leaderboard"))?;

    Ok(Json(summary))
}

async fn delete_entry(
    Extension(ctx): Extension<Arc<Context>>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let entry = usecases::leaderboards::delete(&id, ctx.clone())
        .await
        .map_err(or_internal("Error deleting user"))?;

    Ok(Json(json!({
        "message": "User deleted successfully",
        "user": APILeaderboardEntry::from_entry(entry),
    })))
}
