use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuestion {
    pub question_number: u32,
    pub question_name: String,
    pub question_link: String,
    pub question_level: String,
}

/// One day's generated practice set, keyed by the IST calendar date.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuestionSet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub questions: Vec<PracticeQuestion>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub generated_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct APIDailyQuestionSet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: DateTime<Utc>,
    pub questions: Vec<PracticeQuestion>,
    pub generated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl APIDailyQuestionSet {
    pub fn from_set(set: DailyQuestionSet) -> Self {
        Self {
            id: set.id.map(|id| id.to_hex()),
            date: set.date,
            questions: set.questions,
            generated_at: set.generated_at,
            created_at: set.created_at,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuestionsResponse {
    pub success: bool,
    pub questions: Vec<PracticeQuestion>,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuestionExample {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

/// The question body as produced by the generator.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub company: String,
    pub year: String,
    pub problem_statement: String,
    #[serde(default)]
    pub examples: Vec<QuestionExample>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub constraints: Vec<String>,
    pub difficulty: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousYearQuestion {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub question_id: String,
    pub company: String,
    pub year: String,
    pub problem_statement: String,
    #[serde(default)]
    pub examples: Vec<QuestionExample>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub constraints: Vec<String>,
    pub difficulty: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub generated_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl PreviousYearQuestion {
    pub fn from_generated(generated: GeneratedQuestion, now: DateTime<Utc>) -> Self {
        let question_id = format!(
            "{}_{}_{}",
            generated.company.to_uppercase(),
            generated.year,
            now.timestamp_millis()
        );

        Self {
            id: None,
            question_id,
            company: generated.company,
            year: generated.year,
            problem_statement: generated.problem_statement,
            examples: generated.examples,
            test_cases: generated.test_cases,
            constraints: generated.constraints,
            difficulty: generated.difficulty,
            topics: generated.topics,
            explanation: generated.explanation,
            generated_at: now,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct APIPreviousYearQuestion {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question_id: String,
    pub company: String,
    pub year: String,
    pub problem_statement: String,
    pub examples: Vec<QuestionExample>,
    pub test_cases: Vec<TestCase>,
    pub constraints: Vec<String>,
    pub difficulty: String,
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl APIPreviousYearQuestion {
    pub fn from_question(question: PreviousYearQuestion) -> Self {
        Self {
            id: question.id.map(|id| id.to_hex()),
            question_id: question.question_id,
            company: question.company,
            year: question.year,
            problem_statement: question.problem_statement,
            examples: question.examples,
            test_cases: question.test_cases,
            constraints: question.constraints,
            difficulty: question.difficulty,
            topics: question.topics,
            explanation: question.explanation,
            generated_at: question.generated_at,
            created_at: question.created_at,
        }
    }
}
