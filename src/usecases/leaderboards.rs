use std::sync::{Arc, LazyLock};

use bson::oid::ObjectId;
use chrono::Utc;
use futures::future::join_all;
use regex::Regex;

use crate::{
    context::Context,
    errors::{Error, ErrorCode},
    models::{
        leaderboard::{LeaderboardEntry, RefreshResult, RefreshSummary},
        stats::StatsFetch,
    },
};

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid username pattern"));

pub const MISSING_FIELDS: &str =
    "All fields (name, leetcodeUsername, codeforcesUsername) are required.";

pub struct NewEntry {
    pub name: Option<String>,
    pub leetcode_username: Option<String>,
    pub codeforces_username: Option<String>,
}

pub struct ValidEntry {
    pub name: String,
    pub leetcode_username: String,
    pub codeforces_username: String,
}

pub fn is_valid_username(username: &str) -> bool {
    USERNAME_PATTERN.is_match(username)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

pub fn validate(request: NewEntry) -> Result<ValidEntry, Error> {
    let (Some(name), Some(leetcode_username), Some(codeforces_username)) = (
        non_blank(request.name),
        non_blank(request.leetcode_username),
        non_blank(request.codeforces_username),
    ) else {
        return Err(Error::new(ErrorCode::BadRequest, MISSING_FIELDS));
    };

    if !is_valid_username(&leetcode_username) || !is_valid_username(&codeforces_username) {
        return Err(Error::new(
            ErrorCode::BadRequest,
            "Invalid username format. Use only letters, numbers, underscores, and hyphens.",
        ));
    }

    Ok(ValidEntry {
        name,
        leetcode_username,
        codeforces_username,
    })
}

fn user_not_found() -> anyhow::Error {
    Error::new(ErrorCode::NotFound, "User not found").into()
}

/// Malformed ids can never match a stored entry, so they read as not found.
fn parse_id(id: &str) -> anyhow::Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| user_not_found())
}

async fn fetch_both(
    leetcode_username: &str,
    codeforces_username: &str,
    context: &Context,
) -> (StatsFetch, StatsFetch) {
    tokio::join!(
        context.leetcode.fetch_stats(leetcode_username),
        context.codeforces.fetch_stats(codeforces_username),
    )
}

/// Entries ordered by rank score, highest first.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.rank_score.total_cmp(&a.rank_score));
    entries
}

pub async fn fetch_all(context: Arc<Context>) -> anyhow::Result<Vec<LeaderboardEntry>> {
    let entries = context.leaderboards.fetch_all().await?;

    Ok(rank_entries(entries))
}

pub async fn create(request: NewEntry, context: Arc<Context>) -> anyhow::Result<LeaderboardEntry> {
    let request = validate(request)?;

    log::info!(
        leetcode_username = request.leetcode_username.as_str(),
        codeforces_username = request.codeforces_username.as_str();
        "Fetching stats for new leaderboard entry",
    );

    let (leetcode, codeforces) = fetch_both(
        &request.leetcode_username,
        &request.codeforces_username,
        &context,
    )
    .await;

    let leetcode = leetcode.stats_or_zero();
    let codeforces = codeforces.stats_or_zero();

    if leetcode.is_empty() {
        log::warn!(
            username = request.leetcode_username.as_str();
            "LeetCode user may not exist or has no data",
        );
    }
    if codeforces.is_empty() {
        log::warn!(
            username = request.codeforces_username.as_str();
            "Codeforces user may not exist or has no data",
        );
    }

    let entry = LeaderboardEntry::new(
        request.name,
        request.leetcode_username,
        request.codeforces_username,
        leetcode,
        codeforces,
        Utc::now(),
    );

    let entry = context.leaderboards.create(entry).await?;

    log::info!(
        name = entry.name.as_str(),
        total_questions = entry.total_questions,
        rank_score = entry.rank_score;
        "Added leaderboard entry",
    );

    Ok(entry)
}

/// Refreshed entry plus the reasons any platform was not fully confirmed.
pub struct RefreshOutcome {
    pub entry: LeaderboardEntry,
    pub incomplete: Vec<String>,
}

/// Re-fetches both platforms and persists the entry.
///
/// Each field a provider confirmed overwrites the stored value. Fields it
/// could not confirm keep their stored value.
pub async fn refresh_entry(
    mut entry: LeaderboardEntry,
    context: &Context,
) -> anyhow::Result<RefreshOutcome> {
    let (leetcode, codeforces) =
        fetch_both(&entry.leetcode_username, &entry.codeforces_username, context).await;

    let incomplete: Vec<String> = [&leetcode, &codeforces]
        .into_iter()
        .filter_map(|fetch| fetch.failure_reason().map(str::to_string))
        .collect();

    let leetcode_stats = leetcode.stats_or(entry.leetcode_stats());
    let codeforces_stats = codeforces.stats_or(entry.codeforces_stats());
    entry.apply_stats(leetcode_stats, codeforces_stats, Utc::now());

    if !context.leaderboards.replace(&entry).await? {
        return Err(user_not_found());
    }

    Ok(RefreshOutcome { entry, incomplete })
}

pub async fn refresh_one(id: &str, context: Arc<Context>) -> anyhow::Result<LeaderboardEntry> {
    let id = parse_id(id)?;
    let entry = match context.leaderboards.fetch_one(id).await? {
        Some(entry) => entry,
        None => return Err(user_not_found()),
    };

    let outcome = refresh_entry(entry, &context).await?;

    for reason in &outcome.incomplete {
        log::warn!(
            name = outcome.entry.name.as_str(),
            reason = reason.as_str();
            "Kept previous stats for unconfirmed fields",
        );
    }

    Ok(outcome.entry)
}

pub async fn refresh_all(context: Arc<Context>) -> anyhow::Result<RefreshSummary> {
    let entries = context.leaderboards.fetch_all().await?;

    log::info!(
        entries = entries.len();
        "Refreshing all leaderboard entries",
    );

    let refreshes = entries.into_iter().map(|entry| {
        let context = context.clone();
        async move {
            let username = entry.name.clone();
            match refresh_entry(entry, &context).await {
                Ok(outcome) if outcome.incomplete.is_empty() => RefreshResult {
                    success: true,
                    username,
                    error: None,
                },
                Ok(outcome) => RefreshResult {
                    success: false,
                    username,
                    error: Some(outcome.incomplete.join("; ")),
                },
                Err(e) => {
                    let error = e.to_string();
                    log::error!(
                        name = username.as_str(),
                        error = error.as_str();
                        "Failed to refresh leaderboard entry",
                    );
                    RefreshResult {
                        success: false,
                        username,
                        error: Some(error),
                    }
                }
            }
        }
    });

    let summary = RefreshSummary::from_results(join_all(refreshes).await);

    log::info!(
        successful = summary.successful,
        failed = summary.failed;
        "Leaderboard refresh finished",
    );

    Ok(summary)
}

pub async fn delete(id: &str, context: Arc<Context>) -> anyhow::Result<LeaderboardEntry> {
    let id = parse_id(id)?;
    match context.leaderboards.delete(id).await? {
        Some(entry) => {
            log::info!(
                name = entry.name.as_str();
                "Deleted leaderboard entry",
            );
            Ok(entry)
        }
        None => Err(user_not_found()),
    }
}
