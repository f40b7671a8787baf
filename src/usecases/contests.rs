use std::sync::Arc;

use chrono::Utc;

use crate::{
    context::Context,
    models::contest::{CombinedContests, Contest},
    providers::codeforces::CodeforcesResponse,
};

const UPCOMING_LIMIT: usize = 10;

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeContest {
    pub title: String,
    #[serde(default)]
    pub title_slug: String,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
}

/// The proxy has shipped all three of these shapes.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum LeetCodeContestList {
    Bare(Vec<LeetCodeContest>),
    Data { data: Vec<LeetCodeContest> },
    Contests { contests: Vec<LeetCodeContest> },
    Other(serde::de::IgnoredAny),
}

impl LeetCodeContestList {
    fn into_contests(self) -> Vec<LeetCodeContest> {
        match self {
            LeetCodeContestList::Bare(contests)
            | LeetCodeContestList::Data { data: contests }
            | LeetCodeContestList::Contests { contests } => contests,
            LeetCodeContestList::Other(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesContest {
    pub id: i64,
    pub name: String,
    pub phase: String,
    #[serde(default)]
    pub duration_seconds: i64,
    #[serde(default)]
    pub start_time_seconds: Option<i64>,
}

/// Contests starting after `now` (unix seconds), soonest first.
pub fn upcoming_leetcode(contests: Vec<LeetCodeContest>, now: i64) -> Vec<Contest> {
    let mut upcoming: Vec<(i64, LeetCodeContest)> = contests
        .into_iter()
        .filter_map(|contest| match contest.start_time {
            Some(start_time) if start_time > now => Some((start_time, contest)),
            _ => None,
        })
        .collect();
    upcoming.sort_by_key(|(start_time, _)| *start_time);

    upcoming
        .into_iter()
        .take(UPCOMING_LIMIT)
        .map(|(start_time, contest)| Contest {
            url: format!("https://leetcode.com/contest/{}", contest.title_slug),
            title: contest.title,
            start_time: start_time * 1000,
            duration: contest.duration.unwrap_or(0),
            platform: "LeetCode".to_string(),
        })
        .collect()
}

/// Contests in the `BEFORE` phase, soonest first.
pub fn upcoming_codeforces(contests: Vec<CodeforcesContest>) -> Vec<Contest> {
    let mut upcoming: Vec<CodeforcesContest> = contests
        .into_iter()
        .filter(|contest| contest.phase == "BEFORE")
        .collect();
    upcoming.sort_by_key(|contest| contest.start_time_seconds.unwrap_or(i64::MAX));

    upcoming
        .into_iter()
        .take(UPCOMING_LIMIT)
        .map(|contest| Contest {
            url: format!("https://codeforces.com/contest/{}", contest.id),
            title: contest.name,
            start_time: contest.start_time_seconds.unwrap_or(0) * 1000,
            duration: contest.duration_seconds,
            platform: "Codeforces".to_string(),
        })
        .collect()
}

pub async fn fetch_leetcode(context: Arc<Context>) -> anyhow::Result<Vec<Contest>> {
    let base_url = context.config.leetcode_api_base_url.trim_end_matches('/');
    let url = format!("{base_url}/contests");

    let list: LeetCodeContestList = context
        .http_client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(upcoming_leetcode(list.into_contests(), Utc::now().timestamp()))
}

pub async fn fetch_codeforces(context: Arc<Context>) -> anyhow::Result<Vec<Contest>> {
    let base_url = context.config.codeforces_api_base_url.trim_end_matches('/');
    let url = format!("{base_url}/contest.list");

    let response: CodeforcesResponse<Vec<CodeforcesContest>> = context
        .http_client
        .get(&url)
        .send()
        .await?
        .json()
        .await?;

    if response.status != "OK" {
        anyhow::bail!("Codeforces API returned error");
    }

    Ok(upcoming_codeforces(response.result.unwrap_or_default()))
}

pub async fn fetch_combined(context: Arc<Context>) -> CombinedContests {
    let (leetcode, codeforces) = tokio::join!(
        fetch_leetcode(context.clone()),
        fetch_codeforces(context.clone()),
    );

    let leetcode = leetcode.unwrap_or_else(|e| {
        log::error!(error = e.to_string(); "LeetCode contest feed failed");
        Vec::new()
    });
    let codeforces = codeforces.unwrap_or_else(|e| {
        log::error!(error = e.to_string(); "Codeforces contest feed failed");
        Vec::new()
    });

    CombinedContests {
        success: true,
        total: leetcode.len() + codeforces.len(),
        leetcode,
        codeforces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leetcode_contest(slug: &str, start_time: Option<i64>) -> LeetCodeContest {
        LeetCodeContest {
            title: slug.replace('-', " "),
            title_slug: slug.to_string(),
            start_time,
            duration: Some(5400),
        }
    }

    #[test]
    fn leetcode_keeps_future_contests_in_start_order() {
        let contests = vec![
            leetcode_contest("weekly-contest-3", Some(3_000)),
            leetcode_contest("weekly-contest-1", Some(500)),
            leetcode_contest("biweekly-contest-2", Some(2_000)),
            leetcode_contest("no-start", None),
        ];

        let upcoming = upcoming_leetcode(contests, 1_000);

        let urls: Vec<&str> = upcoming.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://leetcode.com/contest/biweekly-contest-2",
                "https://leetcode.com/contest/weekly-contest-3",
            ]
        );
        assert_eq!(upcoming[0].start_time, 2_000_000);
        assert_eq!(upcoming[0].platform, "LeetCode");
    }

    #[test]
    fn leetcode_list_accepts_every_shape() {
        let bare = r#"[{"title": "A", "titleSlug": "a", "startTime": 10}]"#;
        let data = r#"{"data": [{"title": "A", "titleSlug": "a", "startTime": 10}]}"#;
        let contests = r#"{"contests": [{"title": "A", "titleSlug": "a", "startTime": 10}]}"#;
        let unknown = r#"{"message": "rate limited"}"#;

        for body in [bare, data, contests] {
            let list: LeetCodeContestList = serde_json::from_str(body).unwrap();
            assert_eq!(list.into_contests().len(), 1, "{body}");
        }
        let list: LeetCodeContestList = serde_json::from_str(unknown).unwrap();
        assert!(list.into_contests().is_empty());
    }

    #[test]
    fn codeforces_keeps_before_phase_and_caps_at_ten() {
        let mut contests: Vec<CodeforcesContest> = (0..15)
            .map(|i| CodeforcesContest {
                id: 2000 + i,
                name: format!("Round {i}"),
                phase: "BEFORE".to_string(),
                duration_seconds: 7200,
                start_time_seconds: Some(10_000 - i),
            })
            .collect();
        contests.push(CodeforcesContest {
            id: 1999,
            name: "Finished".to_string(),
            phase: "FINISHED".to_string(),
            duration_seconds: 7200,
            start_time_seconds: Some(1),
        });

        let upcoming = upcoming_codeforces(contests);

        assert_eq!(upcoming.len(), 10);
        assert_eq!(upcoming[0].url, "https://codeforces.com/contest/2014");
        assert_eq!(upcoming[0].start_time, 9_986_000);
        assert!(upcoming.iter().all(|contest| contest.title != "Finished"));
    }
}
