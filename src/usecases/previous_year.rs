use std::sync::Arc;

use chrono::Utc;

use super::exam::SYLLABUS;
use crate::{
    context::Context,
    models::question::{GeneratedQuestion, PreviousYearQuestion},
    providers::gemini::strip_code_fences,
};

#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct GenerateRequest {
    pub company: Option<String>,
    pub year: Option<String>,
    pub difficulty: Option<String>,
}

fn prompt(request: &GenerateRequest) -> String {
    let difficulty = request.difficulty.as_deref().unwrap_or("Medium");
    let target_company = request.company.as_deref().unwrap_or("top tech companies");
    let target_year = request.year.as_deref().unwrap_or("2024");
    let company = request.company.as_deref().unwrap_or("HACKWITHINFY");
    let year = request.year.as_deref().unwrap_or("2025");

    format!(
        "Generate a realistic previous year coding question from the {target_company} {target_year} Online Assessment.

Requirements:
- {difficulty} difficulty.
- Prefer questions that actually appeared in that company's OAs.
- Clear problem statement, worked examples with explanations, test cases and constraints.
- It must test algorithmic problem solving, drawing on these topics:
{SYLLABUS}

Return ONLY valid JSON in exactly this shape, without markdown or extra text:
{{
  \"company\": \"{company}\",
  \"year\": \"{year}\",
  \"problemStatement\": \"Full description of the problem\",
  \"examples\": [{{\"input\": \"...\", \"output\": \"...\", \"explanation\": \"...\"}}],
  \"testCases\": [{{\"input\": \"...\", \"output\": \"...\"}}],
  \"constraints\": [\"1 <= n <= 10^5\"],
  \"difficulty\": \"{difficulty}\",
  \"topics\": [\"Array\", \"Dynamic Programming\"],
  \"explanation\": \"Solution approach with time and space complexity\"
}}"
    )
}

pub fn parse_generated(text: &str) -> anyhow::Result<GeneratedQuestion> {
    Ok(serde_json::from_str(&strip_code_fences(text))?)
}

pub async fn fetch_all(context: Arc<Context>) -> anyhow::Result<Vec<PreviousYearQuestion>> {
    context.questions.fetch_previous_year().await
}

pub async fn generate(
    request: GenerateRequest,
    context: Arc<Context>,
) -> anyhow::Result<PreviousYearQuestion> {
    let text = context.generator.generate(&prompt(&request)).await?;
    let generated = parse_generated(&text)?;

    let question = PreviousYearQuestion::from_generated(generated, Utc::now());
    let question = context.questions.create_previous_year(question).await?;

    log::info!(
        question_id = question.question_id.as_str();
        "Generated previous year question",
    );

    Ok(question)
}
