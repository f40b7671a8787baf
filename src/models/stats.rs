use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    LeetCode,
    Codeforces,
}

impl Platform {
    pub fn profile_url(self, username: &str) -> String {
        match self {
            Platform::LeetCode => format!("https://leetcode.com/{username}"),
            Platform::Codeforces => format!("https://codeforces.com/profile/{username}"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::LeetCode => f.write_str("leetcode"),
            Platform::Codeforces => f.write_str("codeforces"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlatformStats {
    pub questions: u32,
    pub rating: u32,
}

impl PlatformStats {
    pub fn is_empty(&self) -> bool {
        self.questions == 0 && self.rating == 0
    }
}

/// Result of asking one provider about one handle.
///
/// `Partial` carries only the fields the provider actually confirmed.
/// `Unavailable` means nothing about the handle could be verified. Fields
/// that were not confirmed read as zero for callers with nothing better.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsFetch {
    Fetched(PlatformStats),
    Partial {
        questions: Option<u32>,
        rating: Option<u32>,
        reason: String,
    },
    Unavailable(String),
}

impl StatsFetch {
    /// Classifies a fetch by which fields were confirmed.
    pub fn from_parts(questions: Option<u32>, rating: Option<u32>, reason: String) -> Self {
        match (questions, rating) {
            (Some(questions), Some(rating)) => {
                StatsFetch::Fetched(PlatformStats { questions, rating })
            }
            (None, None) => StatsFetch::Unavailable(reason),
            (questions, rating) => StatsFetch::Partial {
                questions,
                rating,
                reason,
            },
        }
    }

    pub fn stats_or_zero(&self) -> PlatformStats {
        self.stats_or(PlatformStats::default())
    }

    /// Confirmed fields from this fetch, the rest from `previous`.
    pub fn stats_or(&self, previous: PlatformStats) -> PlatformStats {
        match self {
            StatsFetch::Fetched(stats) => *stats,
            StatsFetch::Partial {
                questions, rating, ..
            } => PlatformStats {
                questions: questions.unwrap_or(previous.questions),
                rating: rating.unwrap_or(previous.rating),
            },
            StatsFetch::Unavailable(_) => previous,
        }
    }

    /// Why some or all of the stats could not be confirmed.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            StatsFetch::Fetched(_) => None,
            StatsFetch::Partial { reason, .. } | StatsFetch::Unavailable(reason) => Some(reason),
        }
    }
}
