use std::{sync::Arc, time::Instant};

use crate::{
    config::Config,
    providers::{QuestionGenerator, StatsProvider},
    repositories::{leaderboards::LeaderboardStore, questions::QuestionStore},
};

#[derive(Clone)]
pub struct Context {
    pub config: Config,
    pub leaderboards: Arc<dyn LeaderboardStore>,
    pub questions: Arc<dyn QuestionStore>,
    pub leetcode: Arc<dyn StatsProvider>,
    pub codeforces: Arc<dyn StatsProvider>,
    pub generator: Arc<dyn QuestionGenerator>,
    pub http_client: reqwest::Client,
    pub started_at: Instant,
}
