use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{round_rating, StatsProvider};
use crate::models::stats::{Platform, StatsFetch};

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolvedResponse {
    #[serde(default)]
    solved_problem: Option<u32>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestResponse {
    #[serde(default)]
    contest_rating: Option<f64>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    #[serde(default)]
    total_solved: Option<u32>,
    #[serde(default)]
    contest_rating: Option<f64>,
}

/// Reads LeetCode stats through the alfa-leetcode-api proxy.
pub struct LeetCodeProvider {
    client: reqwest::Client,
    base_url: String,
}

impl LeetCodeProvider {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).send().await?.error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl StatsProvider for LeetCodeProvider {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    async fn fetch_stats(&self, username: &str) -> StatsFetch {
        let mut questions: Option<u32> = None;
        let mut rating: Option<u32> = None;
        let mut last_error = String::new();

        // The solved and contest endpoints are independent; one failing must
        // not hide the other.
        match self.get::<SolvedResponse>(&format!("{username}/solved")).await {
            Ok(solved) => questions = Some(solved.solved_problem.unwrap_or(0)),
            Err(e) => {
                last_error = e.to_string();
                log::warn!(
                    username = username,
                    error = last_error.as_str();
                    "Failed to fetch LeetCode solved count",
                );
            }
        }

        match self
            .get::<ContestResponse>(&format!("{username}/contest"))
            .await
        {
            Ok(contest) => rating = Some(round_rating(contest.contest_rating.unwrap_or(0.0))),
            Err(e) => {
                last_error = e.to_string();
                log::warn!(
                    username = username,
                    error = last_error.as_str();
                    "Failed to fetch LeetCode contest rating",
                );
            }
        }

        if questions.unwrap_or(0) == 0 || rating.is_none() {
            match self.get::<ProfileResponse>(username).await {
                Ok(profile) => {
                    if questions.unwrap_or(0) == 0 {
                        questions = Some(profile.total_solved.unwrap_or(0));
                    }
                    if rating.unwrap_or(0) == 0 {
                        rating = Some(round_rating(profile.contest_rating.unwrap_or(0.0)));
                    }
                }
                Err(e) => {
                    last_error = e.to_string();
                    log::warn!(
                        username = username,
                        error = last_error.as_str();
                        "Failed to fetch LeetCode profile",
                    );
                }
            }
        }

        let fetch = StatsFetch::from_parts(questions, rating, format!("leetcode: {last_error}"));
        if let StatsFetch::Fetched(stats) = &fetch {
            log::info!(
                username = username,
                questions = stats.questions,
                rating = stats.rating;
                "Fetched LeetCode stats",
            );
        }

        fetch
    }
}
