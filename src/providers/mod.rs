use std::time::Duration;

use async_trait::async_trait;

use crate::{
    config::Config,
    models::stats::{Platform, StatsFetch},
};

pub mod codeforces;
pub mod gemini;
pub mod leetcode;

/// A coding platform that can report solved-question counts and ratings.
///
/// Implementations never fail: every upstream problem is logged and folded
/// into [`StatsFetch::Partial`] or [`StatsFetch::Unavailable`].
#[async_trait]
pub trait StatsProvider: Send + Sync {
    fn platform(&self) -> Platform;

    async fn fetch_stats(&self, username: &str) -> StatsFetch;
}

/// Produces raw text from a prompt. Used for question generation.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

pub fn create_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.provider_user_agent)
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .build()?;

    Ok(client)
}

fn round_rating(rating: f64) -> u32 {
    if rating.is_nan() || rating <= 0.0 {
        return 0;
    }

    rating.round().min(u32::MAX as f64) as u32
}
