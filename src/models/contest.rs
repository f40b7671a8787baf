#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub title: String,
    /// Unix milliseconds.
    pub start_time: i64,
    /// Seconds.
    pub duration: i64,
    pub url: String,
    pub platform: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContestFeed {
    pub success: bool,
    pub contests: Vec<Contest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContestFeed {
    pub fn from_result(result: anyhow::Result<Vec<Contest>>) -> Self {
        match result {
            Ok(contests) => Self {
                success: true,
                contests,
                error: None,
            },
            Err(e) => Self {
                success: false,
                contests: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CombinedContests {
    pub success: bool,
    pub leetcode: Vec<Contest>,
    pub codeforces: Vec<Contest>,
    pub total: usize,
}
