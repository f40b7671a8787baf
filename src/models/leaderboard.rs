use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use super::stats::{Platform, PlatformStats};
use crate::usecases::ranking::calculate_rank_score;

/// A member's row as stored in the `leaderboards` collection.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub leetcode_username: String,
    pub codeforces_username: String,

    #[serde(rename = "leetcodeURL", default)]
    pub leetcode_url: String,
    #[serde(rename = "codeforcesURL", default)]
    pub codeforces_url: String,

    #[serde(default)]
    pub leetcode_questions: u32,
    #[serde(default)]
    pub leetcode_rating: u32,
    #[serde(default)]
    pub codeforces_questions: u32,
    #[serde(default)]
    pub codeforces_rating: u32,

    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub rank_score: f64,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub last_updated: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn new(
        name: String,
        leetcode_username: String,
        codeforces_username: String,
        leetcode: PlatformStats,
        codeforces: PlatformStats,
        now: DateTime<Utc>,
    ) -> Self {
        let mut entry = Self {
            id: None,
            name,
            leetcode_url: Platform::LeetCode.profile_url(&leetcode_username),
            codeforces_url: Platform::Codeforces.profile_url(&codeforces_username),
            leetcode_username,
            codeforces_username,
            leetcode_questions: 0,
            leetcode_rating: 0,
            codeforces_questions: 0,
            codeforces_rating: 0,
            total_questions: 0,
            rank_score: 0.0,
            last_updated: now,
            created_at: now,
        };
        entry.apply_stats(leetcode, codeforces, now);
        entry
    }

    pub fn leetcode_stats(&self) -> PlatformStats {
        PlatformStats {
            questions: self.leetcode_questions,
            rating: self.leetcode_rating,
        }
    }

    pub fn codeforces_stats(&self) -> PlatformStats {
        PlatformStats {
            questions: self.codeforces_questions,
            rating: self.codeforces_rating,
        }
    }

    /// Overwrites the raw stats and recomputes every derived field.
    pub fn apply_stats(
        &mut self,
        leetcode: PlatformStats,
        codeforces: PlatformStats,
        now: DateTime<Utc>,
    ) {
        self.leetcode_questions = leetcode.questions;
        self.leetcode_rating = leetcode.rating;
        self.codeforces_questions = codeforces.questions;
        self.codeforces_rating = codeforces.rating;

        self.total_questions = leetcode.questions + codeforces.questions;
        self.rank_score = calculate_rank_score(
            leetcode.questions,
            leetcode.rating,
            codeforces.questions,
            codeforces.rating,
        );
        self.last_updated = now;
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct APILeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub leetcode_username: String,
    pub codeforces_username: String,
    #[serde(rename = "leetcodeURL")]
    pub leetcode_url: String,
    #[serde(rename = "codeforcesURL")]
    pub codeforces_url: String,
    pub leetcode_questions: u32,
    pub leetcode_rating: u32,
    pub codeforces_questions: u32,
    pub codeforces_rating: u32,
    pub total_questions: u32,
    pub rank_score: f64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl APILeaderboardEntry {
    pub fn from_entry(entry: LeaderboardEntry) -> Self {
        Self {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: entry.name,
            leetcode_username: entry.leetcode_username,
            codeforces_username: entry.codeforces_username,
            leetcode_url: entry.leetcode_url,
            codeforces_url: entry.codeforces_url,
            leetcode_questions: entry.leetcode_questions,
            leetcode_rating: entry.leetcode_rating,
            codeforces_questions: entry.codeforces_questions,
            codeforces_rating: entry.codeforces_rating,
            total_questions: entry.total_questions,
            rank_score: entry.rank_score,
            last_updated: entry.last_updated,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshResult {
    pub success: bool,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshSummary {
    pub message: String,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<RefreshResult>,
}

impl RefreshSummary {
    pub fn from_results(results: Vec<RefreshResult>) -> Self {
        let successful = results.iter().filter(|result| result.success).count();
        let failed = results.len() - successful;

        Self {
            message: format!("Refresh complete: {successful} successful, {failed} failed"),
            successful,
            failed,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(questions: u32, rating: u32) -> PlatformStats {
        PlatformStats { questions, rating }
    }

    #[test]
    fn new_entry_derives_urls_and_totals() {
        let now = Utc::now();
        let entry = LeaderboardEntry::new(
            "Ada".to_string(),
            "ada_lc".to_string(),
            "ada-cf".to_string(),
            stats(40, 1200),
            stats(10, 900),
            now,
        );

        assert_eq!(entry.leetcode_url, "https://leetcode.com/ada_lc");
        assert_eq!(entry.codeforces_url, "https://codeforces.com/profile/ada-cf");
        assert_eq!(entry.total_questions, 50);
        assert_eq!(entry.rank_score, 1025.0);
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.last_updated, now);
    }

    #[test]
    fn apply_stats_recomputes_derived_fields() {
        let created = Utc::now();
        let mut entry = LeaderboardEntry::new(
            "Ada".to_string(),
            "ada".to_string(),
            "ada".to_string(),
            stats(1, 0),
            stats(1, 0),
            created,
        );

        let later = created + chrono::Duration::minutes(5);
        entry.apply_stats(stats(7, 1600), stats(3, 1400), later);

        assert_eq!(entry.total_questions, 10);
        assert_eq!(entry.rank_score, 850.0);
        assert_eq!(entry.last_updated, later);
        assert_eq!(entry.created_at, created);
    }

    #[test]
    fn api_entry_exposes_hex_id() {
        let id = ObjectId::new();
        let mut entry = LeaderboardEntry::new(
            "Ada".to_string(),
            "ada".to_string(),
            "ada".to_string(),
            stats(0, 0),
            stats(0, 0),
            Utc::now(),
        );
        entry.id = Some(id);

        let json = serde_json::to_value(APILeaderboardEntry::from_entry(entry)).unwrap();
        assert_eq!(json["_id"], id.to_hex());
        assert_eq!(json["leetcodeURL"], "https://leetcode.com/ada");
        assert_eq!(json["rankScore"], 0.0);
    }

    #[test]
    fn summary_counts_outcomes() {
        let summary = RefreshSummary::from_results(vec![
            RefreshResult {
                success: true,
                username: "a".to_string(),
                error: None,
            },
            RefreshResult {
                success: false,
                username: "b".to_string(),
                error: Some("boom".to_string()),
            },
        ]);

        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.message, "Refresh complete: 1 successful, 1 failed");
    }
}
