use std::collections::HashSet;

use async_trait::async_trait;

use super::StatsProvider;
use crate::models::stats::{Platform, PlatformStats, StatsFetch};

const SUBMISSION_LIMIT: u32 = 10000;

#[derive(serde::Deserialize)]
pub(crate) struct CodeforcesResponse<T> {
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub result: Option<T>,
}

#[derive(serde::Deserialize)]
struct UserInfo {
    #[serde(default)]
    rating: Option<i64>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Problem {
    #[serde(rename = "contestId", default)]
    pub contest_id: Option<i64>,
    pub index: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Submission {
    pub problem: Problem,
    #[serde(default)]
    pub verdict: Option<String>,
}

/// Distinct problems with at least one accepted submission.
pub fn count_solved(submissions: &[Submission]) -> u32 {
    let solved: HashSet<(Option<i64>, &str)> = submissions
        .iter()
        .filter(|submission| submission.verdict.as_deref() == Some("OK"))
        .map(|submission| (submission.problem.contest_id, submission.problem.index.as_str()))
        .collect();

    solved.len() as u32
}

pub struct CodeforcesProvider {
    client: reqwest::Client,
    base_url: String,
}

impl CodeforcesProvider {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_rating(&self, username: &str) -> anyhow::Result<Option<u32>> {
        let url = format!("{}/user.info", self.base_url);
        // Unknown handles come back as 400 with a FAILED body, so the status
        // field decides, not the HTTP code.
        let response: CodeforcesResponse<Vec<UserInfo>> = self
            .client
            .get(&url)
            .query(&[("handles", username)])
            .send()
            .await?
            .json()
            .await?;

        if response.status != "OK" {
            log::warn!(
                username = username,
                comment = response.comment.unwrap_or_default();
                "Codeforces user not found",
            );
            return Ok(None);
        }

        let rating = response
            .result
            .and_then(|users| users.into_iter().next())
            .and_then(|user| user.rating)
            .unwrap_or(0)
            .max(0) as u32;

        Ok(Some(rating))
    }

    async fn fetch_submissions(&self, username: &str) -> anyhow::Result<Vec<Submission>> {
        let url = format!("{}/user.status", self.base_url);
        let count = SUBMISSION_LIMIT.to_string();
        let response: CodeforcesResponse<Vec<Submission>> = self
            .client
            .get(&url)
            .query(&[("handle", username), ("from", "1"), ("count", count.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status != "OK" {
            anyhow::bail!(
                "user.status returned {}: {}",
                response.status,
                response.comment.unwrap_or_default()
            );
        }

        Ok(response.result.unwrap_or_default())
    }
}

#[async_trait]
impl StatsProvider for CodeforcesProvider {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    async fn fetch_stats(&self, username: &str) -> StatsFetch {
        let rating = match self.fetch_rating(username).await {
            Ok(Some(rating)) => rating,
            Ok(None) => {
                return StatsFetch::Unavailable(format!("codeforces: unknown handle {username}"))
            }
            Err(e) => {
                let error = e.to_string();
                log::warn!(
                    username = username,
                    error = error.as_str();
                    "Failed to fetch Codeforces user info",
                );
                return StatsFetch::Unavailable(format!("codeforces: {error}"));
            }
        };

        let submissions = match self.fetch_submissions(username).await {
            Ok(submissions) => submissions,
            Err(e) => {
                let error = e.to_string();
                log::warn!(
                    username = username,
                    error = error.as_str();
                    "Could not fetch Codeforces submissions, keeping rating only",
                );
                return StatsFetch::from_parts(None, Some(rating), format!("codeforces: {error}"));
            }
        };
        let questions = count_solved(&submissions);

        log::info!(
            username = username,
            questions = questions,
            rating = rating;
            "Fetched Codeforces stats",
        );

        StatsFetch::Fetched(PlatformStats { questions, rating })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(contest_id: i64, index: &str, verdict: &str) -> Submission {
        Submission {
            problem: Problem {
                contest_id: Some(contest_id),
                index: index.to_string(),
            },
            verdict: Some(verdict.to_string()),
        }
    }

    #[test]
    fn repeated_accepts_count_once() {
        let submissions = vec![
            submission(1000, "A", "OK"),
            submission(1000, "A", "OK"),
            submission(1000, "B", "WRONG_ANSWER"),
            submission(1001, "A", "OK"),
        ];

        assert_eq!(count_solved(&submissions), 2);
    }

    #[test]
    fn pending_submissions_are_ignored() {
        let mut testing = submission(1200, "C", "OK");
        testing.verdict = None;

        assert_eq!(count_solved(&[testing]), 0);
    }

    #[test]
    fn parses_user_status_payload() {
        let body = r#"{
            "status": "OK",
            "result": [
                {"id": 1, "problem": {"contestId": 4, "index": "A", "name": "Watermelon"}, "verdict": "OK"},
                {"id": 2, "problem": {"contestId": 4, "index": "A", "name": "Watermelon"}, "verdict": "OK"},
                {"id": 3, "problem": {"problemsetName": "acmsguru", "index": "100"}, "verdict": "OK"},
                {"id": 4, "problem": {"contestId": 71, "index": "A"}, "verdict": "TIME_LIMIT_EXCEEDED"}
            ]
        }"#;

        let response: CodeforcesResponse<Vec<Submission>> = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "OK");
        assert_eq!(count_solved(&response.result.unwrap()), 2);
    }
}
