use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::{
    context::Context,
    models::question::{DailyQuestionSet, DailyQuestionsResponse, PracticeQuestion},
    providers::gemini::strip_code_fences,
};

const DAILY_QUESTION_COUNT: usize = 3;
const RECENT_SETS_LIMIT: i64 = 30;
const IST_OFFSET_SECS: i64 = 5 * 3600 + 30 * 60;

pub(crate) const SYLLABUS: &str = "\
- Dynamic Programming (imp)
- Greedy Algorithms (imp)
- Backtracking
- Stack
- Queue
- Mapping Concepts
- Array manipulation (imp)
- String manipulation
- Tree (imp)
- Segment Tree
- Graph (imp)
- Bit Manipulation and Hashing
- Recursion
- Heap
- Divide and Conquer
- Binary Search (imp)
- Two Pointers (imp)
- Sliding Window (imp)
- Linked List
- Math and Geometry
- Design Problems";

fn daily_prompt() -> String {
    format!(
        "Generate exactly 3 distinct, randomly chosen LeetCode problems as a JSON array.
Pick problems at the level and format of HACKWITHINFY, Microsoft OA, Amazon OA and JUSPAY OA.
Avoid famous, overused problems such as \"Two Sum\", \"Reverse Linked List\" or \"Valid Parentheses\";
prefer real but less commonly solved problems. Prioritise the (imp) topics of this syllabus:
{SYLLABUS}

Each element must have:
- questionNumber: the LeetCode problem number (integer)
- questionName: the exact LeetCode title
- questionLink: the full URL, https://leetcode.com/problems/<slug>/
- questionLevel: \"Easy\" for the first, \"Medium\" for the second, \"Hard\" for the third

Return ONLY the JSON array, without markdown or any other text. Example:
[{{\"questionNumber\": 1, \"questionName\": \"Two Sum\", \"questionLink\": \"https://leetcode.com/problems/two-sum/\", \"questionLevel\": \"Easy\"}}]"
    )
}

pub fn fallback_questions() -> Vec<PracticeQuestion> {
    vec![
        PracticeQuestion {
            question_number: 1,
            question_name: "Two Sum".to_string(),
            question_link: "https://leetcode.com/problems/two-sum/".to_string(),
            question_level: "Easy".to_string(),
        },
        PracticeQuestion {
            question_number: 15,
            question_name: "3Sum".to_string(),
            question_link: "https://leetcode.com/problems/3sum/".to_string(),
            question_level: "Medium".to_string(),
        },
        PracticeQuestion {
            question_number: 41,
            question_name: "First Missing Positive".to_string(),
            question_link: "https://leetcode.com/problems/first-missing-positive/".to_string(),
            question_level: "Hard".to_string(),
        },
    ]
}

/// The IST calendar date of `now`, as midnight UTC of that date.
pub fn ist_date_key(now: DateTime<Utc>) -> DateTime<Utc> {
    (now + Duration::seconds(IST_OFFSET_SECS))
        .date_naive()
        .and_time(NaiveTime::default())
        .and_utc()
}

pub fn parse_daily_questions(text: &str) -> anyhow::Result<Vec<PracticeQuestion>> {
    let questions: Vec<PracticeQuestion> = serde_json::from_str(&strip_code_fences(text))?;
    if questions.len() != DAILY_QUESTION_COUNT {
        anyhow::bail!("Invalid response format from Gemini");
    }

    Ok(questions)
}

async fn save_set(date: DateTime<Utc>, questions: Vec<PracticeQuestion>, context: &Context) {
    if let Err(e) = context
        .questions
        .save_daily(date, questions, Utc::now())
        .await
    {
        log::error!(
            date = date.to_rfc3339(),
            error = e.to_string();
            "Failed to save daily questions",
        );
    }
}

async fn generate(context: &Context) -> anyhow::Result<Vec<PracticeQuestion>> {
    let text = context.generator.generate(&daily_prompt()).await?;
    parse_daily_questions(&text)
}

/// Today's set: cached if it exists, otherwise generated and stored.
/// Generation failures fall back to a fixed set which is stored as well.
pub async fn daily_questions(context: Arc<Context>) -> anyhow::Result<DailyQuestionsResponse> {
    let date = ist_date_key(Utc::now());

    if let Some(existing) = context.questions.fetch_daily(date).await? {
        log::info!(date = date.to_rfc3339(); "Returning cached daily questions");
        return Ok(DailyQuestionsResponse {
            success: true,
            questions: existing.questions,
            generated_at: existing.generated_at,
            from_cache: Some(true),
            is_fallback: None,
            error: None,
        });
    }

    match generate(&context).await {
        Ok(questions) => {
            log::info!(date = date.to_rfc3339(); "Generated daily questions");
            save_set(date, questions.clone(), &context).await;

            Ok(DailyQuestionsResponse {
                success: true,
                questions,
                generated_at: Utc::now(),
                from_cache: None,
                is_fallback: None,
                error: None,
            })
        }
        Err(e) => {
            let error = e.to_string();
            log::error!(error = error.as_str(); "Question generation failed, using fallback set");

            let questions = fallback_questions();
            save_set(date, questions.clone(), &context).await;

            Ok(DailyQuestionsResponse {
                success: true,
                questions,
                generated_at: Utc::now(),
                from_cache: None,
                is_fallback: Some(true),
                error: Some(error),
            })
        }
    }
}

/// Up to thirty recent sets, newest first, excluding today's.
pub async fn previous_questions(context: Arc<Context>) -> anyhow::Result<Vec<DailyQuestionSet>> {
    let today = ist_date_key(Utc::now());
    let sets = context.questions.fetch_recent_daily(RECENT_SETS_LIMIT).await?;

    Ok(sets.into_iter().filter(|set| set.date < today).collect())
}
