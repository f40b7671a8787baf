use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    DependencyFailed,
    InternalServerError,
}

#[derive(Debug, serde::Serialize)]
pub struct Error {
    pub error_code: ErrorCode,
    pub user_feedback: &'static str,
    pub detail: Option<String>,
}

impl Error {
    pub fn new(error_code: ErrorCode, user_feedback: &'static str) -> Self {
        Self {
            error_code,
            user_feedback,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.user_feedback, detail),
            None => f.write_str(self.user_feedback),
        }
    }
}

impl std::error::Error for Error {}

/// Returns the domain error carried by `err`, if any.
pub fn domain_error(err: &anyhow::Error) -> Option<&Error> {
    err.downcast_ref::<Error>()
}
