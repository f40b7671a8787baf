use std::{sync::Arc, time::Instant};

use clap::Parser;
use gcg_leaderboard_service::{
    api,
    config::Config,
    context::Context,
    providers::{
        codeforces::CodeforcesProvider, create_client, gemini::GeminiGenerator,
        leetcode::LeetCodeProvider,
    },
    refresh,
    repositories::{leaderboards::LeaderboardsRepository, questions::QuestionsRepository},
};
use structured_logger::{async_json::new_writer, Builder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::parse();

    Builder::with_level(&config.log_level)
        .with_target_writer("*", new_writer(tokio::io::stdout()))
        .init();

    let client = mongodb::Client::with_uri_str(&config.database_url).await?;
    let database = client.database(&config.database_name);

    let http_client = create_client(&config)?;

    let context = Context {
        leaderboards: Arc::new(LeaderboardsRepository::new(&database)),
        questions: Arc::new(QuestionsRepository::new(&database)),
        leetcode: Arc::new(LeetCodeProvider::new(
            http_client.clone(),
            &config.leetcode_api_base_url,
        )),
        codeforces: Arc::new(CodeforcesProvider::new(
            http_client.clone(),
            &config.codeforces_api_base_url,
        )),
        generator: Arc::new(GeminiGenerator::new(
            http_client.clone(),
            &config.gemini_api_base_url,
            &config.gemini_model,
            config.gemini_api_key.clone(),
        )),
        http_client,
        started_at: Instant::now(),
        config,
    };

    match context.config.app_component.as_str() {
        "api" => api::serve(context).await?,
        "refresh_all" => refresh::serve(context).await?,
        other => anyhow::bail!("unknown app component: {other}"),
    }

    Ok(())
}
