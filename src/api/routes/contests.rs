use std::sync::Arc;

use axum::{extract::Extension, routing::get, Json, Router};

use crate::{
    context::Context,
    models::contest::{CombinedContests, ContestFeed},
    usecases,
};

pub fn router() -> Router {
    Router::new()
        .route("/api/contests/leetcode", get(get_leetcode_contests))
        .route("/api/contests/codeforces", get(get_codeforces_contests))
        .route("/api/contests/all", get(get_all_contests))
}

async fn get_leetcode_contests(Extension(ctx): Extension<Arc<Context>>) -> Json<ContestFeed> {
    let result = usecases::contests::fetch_leetcode(ctx.clone()).await;
    if let Err(e) = &result {
        log::error!(error = e.to_string(); "LeetCode contest feed failed");
    }

    Json(ContestFeed::from_result(result))
}

async fn get_codeforces_contests(Extension(ctx): Extension<Arc<Context>>) -> Json<ContestFeed> {
    let result = usecases::contests::fetch_codeforces(ctx.clone()).await;
    if let Err(e) = &result {
        log::error!(error = e.to_string(); "Codeforces contest feed failed");
    }

    Json(ContestFeed::from_result(result))
}

async fn get_all_contests(Extension(ctx): Extension<Arc<Context>>) -> Json<CombinedContests> {
    Json(usecases::contests::fetch_combined(ctx.clone()).await)
}
