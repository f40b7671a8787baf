#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Instant,
};

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde_json::Value;
use tower::ServiceExt;

use gcg_leaderboard_service::{
    config::Config,
    context::Context,
    models::{
        leaderboard::LeaderboardEntry,
        question::{DailyQuestionSet, PracticeQuestion, PreviousYearQuestion},
        stats::{Platform, PlatformStats, StatsFetch},
    },
    providers::{QuestionGenerator, StatsProvider},
    repositories::{leaderboards::LeaderboardStore, questions::QuestionStore},
};

#[derive(Default)]
pub struct MemoryLeaderboards {
    pub entries: Mutex<Vec<LeaderboardEntry>>,
    pub fail_writes: Mutex<bool>,
}

impl MemoryLeaderboards {
    pub fn snapshot(&self) -> Vec<LeaderboardEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn insert(&self, mut entry: LeaderboardEntry) -> ObjectId {
        let id = ObjectId::new();
        entry.id = Some(id);
        self.entries.lock().unwrap().push(entry);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<LeaderboardEntry> {
        self.snapshot().into_iter().find(|entry| entry.id == Some(id))
    }
}

#[async_trait]
impl LeaderboardStore for MemoryLeaderboards {
    async fn fetch_all(&self) -> anyhow::Result<Vec<LeaderboardEntry>> {
        Ok(self.snapshot())
    }

    async fn fetch_one(&self, id: ObjectId) -> anyhow::Result<Option<LeaderboardEntry>> {
        Ok(self.get(id))
    }

    async fn create(&self, mut entry: LeaderboardEntry) -> anyhow::Result<LeaderboardEntry> {
        if *self.fail_writes.lock().unwrap() {
            anyhow::bail!("store unreachable");
        }
        entry.id = Some(ObjectId::new());
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn replace(&self, entry: &LeaderboardEntry) -> anyhow::Result<bool> {
        if *self.fail_writes.lock().unwrap() {
            anyhow::bail!("store unreachable");
        }
        let mut entries = self.entries.lock().unwrap();
        match entries.iter_mut().find(|stored| stored.id == entry.id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<Option<LeaderboardEntry>> {
        let mut entries = self.entries.lock().unwrap();
        let position = entries.iter().position(|entry| entry.id == Some(id));
        Ok(position.map(|position| entries.remove(position)))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryQuestions {
    pub daily: Mutex<Vec<DailyQuestionSet>>,
    pub previous_year: Mutex<Vec<PreviousYearQuestion>>,
}

#[async_trait]
impl QuestionStore for MemoryQuestions {
    async fn fetch_daily(&self, date: DateTime<Utc>) -> anyhow::Result<Option<DailyQuestionSet>> {
        Ok(self
            .daily
            .lock()
            .unwrap()
            .iter()
            .find(|set| set.date == date)
            .cloned())
    }

    async fn save_daily(
        &self,
        date: DateTime<Utc>,
        questions: Vec<PracticeQuestion>,
        generated_at: DateTime<Utc>,
    ) -> anyhow::Result<DailyQuestionSet> {
        let mut daily = self.daily.lock().unwrap();
        daily.retain(|set| set.date != date);
        let set = DailyQuestionSet {
            id: Some(ObjectId::new()),
            date,
            questions,
            generated_at,
            created_at: generated_at,
        };
        daily.push(set.clone());
        Ok(set)
    }

    async fn fetch_recent_daily(&self, limit: i64) -> anyhow::Result<Vec<DailyQuestionSet>> {
        let mut sets = self.daily.lock().unwrap().clone();
        sets.sort_by(|a, b| b.date.cmp(&a.date));
        sets.truncate(limit as usize);
        Ok(sets)
    }

    async fn fetch_previous_year(&self) -> anyhow::Result<Vec<PreviousYearQuestion>> {
        let mut questions = self.previous_year.lock().unwrap().clone();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions)
    }

    async fn create_previous_year(
        &self,
        mut question: PreviousYearQuestion,
    ) -> anyhow::Result<PreviousYearQuestion> {
        question.id = Some(ObjectId::new());
        self.previous_year.lock().unwrap().push(question.clone());
        Ok(question)
    }
}

/// Answers from a fixed table; handles not in the table are unavailable.
pub struct FakeProvider {
    platform: Platform,
    pub stats: Mutex<HashMap<String, StatsFetch>>,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            stats: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, username: &str, questions: u32, rating: u32) {
        self.stats.lock().unwrap().insert(
            username.to_string(),
            StatsFetch::Fetched(PlatformStats { questions, rating }),
        );
    }

    pub fn set_partial(&self, username: &str, questions: Option<u32>, rating: Option<u32>) {
        let reason = format!("{}: partial answer for {username}", self.platform);
        self.stats.lock().unwrap().insert(
            username.to_string(),
            StatsFetch::from_parts(questions, rating, reason),
        );
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsProvider for FakeProvider {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_stats(&self, username: &str) -> StatsFetch {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.stats.lock().unwrap().get(username) {
            Some(fetch) => fetch.clone(),
            None => {
                StatsFetch::Unavailable(format!("{}: unknown handle {username}", self.platform))
            }
        }
    }
}

/// Replays canned generator output; an empty script is an error.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub responses: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.responses.lock().unwrap().pop() {
            Some(response) => Ok(response),
            None => anyhow::bail!("generator offline"),
        }
    }
}

pub struct TestContext {
    pub context: Context,
    pub leaderboards: Arc<MemoryLeaderboards>,
    pub questions: Arc<MemoryQuestions>,
    pub leetcode: Arc<FakeProvider>,
    pub codeforces: Arc<FakeProvider>,
    pub generator: Arc<ScriptedGenerator>,
}

pub fn test_config(extra: &[&str]) -> Config {
    let mut args = vec![
        "gcg-leaderboard-service",
        "--database-url",
        "mongodb://localhost:27017",
    ];
    args.extend_from_slice(extra);
    Config::parse_from(args)
}

pub fn setup() -> TestContext {
    setup_with_config(test_config(&[]))
}

pub fn setup_with_config(config: Config) -> TestContext {
    let leaderboards = Arc::new(MemoryLeaderboards::default());
    let questions = Arc::new(MemoryQuestions::default());
    let leetcode = Arc::new(FakeProvider::new(Platform::LeetCode));
    let codeforces = Arc::new(FakeProvider::new(Platform::Codeforces));
    let generator = Arc::new(ScriptedGenerator::default());

    let context = Context {
        config,
        leaderboards: leaderboards.clone(),
        questions: questions.clone(),
        leetcode: leetcode.clone(),
        codeforces: codeforces.clone(),
        generator: generator.clone(),
        http_client: reqwest::Client::new(),
        started_at: Instant::now(),
    };

    TestContext {
        context,
        leaderboards,
        questions,
        leetcode,
        codeforces,
        generator,
    }
}

pub fn entry(name: &str, leetcode: &str, codeforces: &str) -> LeaderboardEntry {
    LeaderboardEntry::new(
        name.to_string(),
        leetcode.to_string(),
        codeforces.to_string(),
        PlatformStats::default(),
        PlatformStats::default(),
        Utc::now(),
    )
}

pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
    let body = body.map(|body| body.to_string()).unwrap_or_default();
    send_raw(app, method, uri, Some("application/json"), body).await
}

/// Sends `body` verbatim, with `content_type` if given.
pub async fn send_raw(
    app: Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> (u16, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_fixture(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
