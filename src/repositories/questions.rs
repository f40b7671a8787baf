use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{options::ReturnDocument, Collection, Database};

use crate::models::question::{DailyQuestionSet, PracticeQuestion, PreviousYearQuestion};

const DAILY_COLLECTION: &str = "dailyquestions";
const PREVIOUS_YEAR_COLLECTION: &str = "previousyearquestions";
const QUERY_TIMEOUT: Duration = Duration::from_secs(20);

#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn fetch_daily(&self, date: DateTime<Utc>) -> anyhow::Result<Option<DailyQuestionSet>>;

    /// Inserts or overwrites the set for `date`.
    async fn save_daily(
        &self,
        date: DateTime<Utc>,
        questions: Vec<PracticeQuestion>,
        generated_at: DateTime<Utc>,
    ) -> anyhow::Result<DailyQuestionSet>;

    /// Newest first.
    async fn fetch_recent_daily(&self, limit: i64) -> anyhow::Result<Vec<DailyQuestionSet>>;

    /// Newest first.
    async fn fetch_previous_year(&self) -> anyhow::Result<Vec<PreviousYearQuestion>>;

    async fn create_previous_year(
        &self,
        question: PreviousYearQuestion,
    ) -> anyhow::Result<PreviousYearQuestion>;
}

pub struct QuestionsRepository {
    daily: Collection<DailyQuestionSet>,
    previous_year: Collection<PreviousYearQuestion>,
}

impl QuestionsRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            daily: database.collection(DAILY_COLLECTION),
            previous_year: database.collection(PREVIOUS_YEAR_COLLECTION),
        }
    }
}

#[async_trait]
impl QuestionStore for QuestionsRepository {
    async fn fetch_daily(&self, date: DateTime<Utc>) -> anyhow::Result<Option<DailyQuestionSet>> {
        let set = self
            .daily
            .find_one(doc! { "date": bson::DateTime::from_chrono(date) })
            .await?;

        Ok(set)
    }

    async fn save_daily(
        &self,
        date: DateTime<Utc>,
        questions: Vec<PracticeQuestion>,
        generated_at: DateTime<Utc>,
    ) -> anyhow::Result<DailyQuestionSet> {
        let date_key = bson::DateTime::from_chrono(date);
        let questions_bson = bson::to_bson(&questions)?;
        let generated_at_bson = bson::DateTime::from_chrono(generated_at);

        let saved = self
            .daily
            .find_one_and_update(
                doc! { "date": date_key },
                doc! {
                    "$set": {
                        "date": date_key,
                        "questions": questions_bson,
                        "generatedAt": generated_at_bson,
                    },
                    "$setOnInsert": { "createdAt": generated_at_bson },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        match saved {
            Some(saved) => Ok(saved),
            None => anyhow::bail!("upsert of daily questions returned no document"),
        }
    }

    async fn fetch_recent_daily(&self, limit: i64) -> anyhow::Result<Vec<DailyQuestionSet>> {
        let sets: Vec<DailyQuestionSet> = self
            .daily
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .limit(limit)
            .max_time(QUERY_TIMEOUT)
            .await?
            .try_collect()
            .await?;

        Ok(sets)
    }

    async fn fetch_previous_year(&self) -> anyhow::Result<Vec<PreviousYearQuestion>> {
        let questions: Vec<PreviousYearQuestion> = self
            .previous_year
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .max_time(QUERY_TIMEOUT)
            .await?
            .try_collect()
            .await?;

        Ok(questions)
    }

    async fn create_previous_year(
        &self,
        mut question: PreviousYearQuestion,
    ) -> anyhow::Result<PreviousYearQuestion> {
        question.id = Some(ObjectId::new());
        self.previous_year.insert_one(&question).await?;

        Ok(question)
    }
}
