use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    context::Context,
    models::question::{APIDailyQuestionSet, APIPreviousYearQuestion},
    usecases::{self, previous_year::GenerateRequest},
};

pub fn router() -> Router {
    Router::new()
        .route("/api/exam/generate-questions", get(generate_questions))
        .route("/api/exam/previous-questions", get(previous_questions))
        .route("/api/previous-year-questions", get(previous_year_questions))
        .route(
            "/api/previous-year-questions/generate",
            post(generate_previous_year_question),
        )
}

fn failure(
    e: anyhow::Error,
    message: &'static str,
    empty_field: &'static str,
) -> (StatusCode, Json<Value>) {
    let error = e.to_string();
    log::error!(error = error.as_str(); "{}", message);

    let mut body = json!({ "success": false, "error": error });
    if !empty_field.is_empty() {
        body[empty_field] = json!([]);
    }

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
}

async fn generate_questions(Extension(ctx): Extension<Arc<Context>>) -> (StatusCode, Json<Value>) {
    match usecases::exam::daily_questions(ctx.clone()).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => failure(e, "Failed to load daily questions", "questions"),
    }
}

async fn previous_questions(Extension(ctx): Extension<Arc<Context>>) -> (StatusCode, Json<Value>) {
    match usecases::exam::previous_questions(ctx.clone()).await {
        Ok(sets) => {
            let sets: Vec<APIDailyQuestionSet> =
                sets.into_iter().map(APIDailyQuestionSet::from_set).collect();
            (
                StatusCode::OK,
                Json(json!({ "success": true, "previousQuestions": sets })),
            )
        }
        Err(e) => failure(e, "Failed to fetch previous questions", "previousQuestions"),
    }
}

async fn previous_year_questions(
    Extension(ctx): Extension<Arc<Context>>,
) -> (StatusCode, Json<Value>) {
    match usecases::previous_year::fetch_all(ctx.clone()).await {
        Ok(questions) => {
            let questions: Vec<APIPreviousYearQuestion> = questions
                .into_iter()
                .map(APIPreviousYearQuestion::from_question)
                .collect();
            (
                StatusCode::OK,
                Json(json!({ "success": true, "questions": questions })),
            )
        }
        Err(e) => failure(e, "Failed to fetch previous year questions", "questions"),
    }
}

async fn generate_previous_year_question(
    Extension(ctx): Extension<Arc<Context>>,
    request: Option<Json<GenerateRequest>>,
) -> (StatusCode, Json<Value>) {
    let request = request.map(|Json(request)| request).unwrap_or_default();

    match usecases::previous_year::generate(request, ctx.clone()).await {
        Ok(question) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "question": APIPreviousYearQuestion::from_question(question),
            })),
        ),
        Err(e) => failure(e, "Failed to generate previous year question", ""),
    }
}
