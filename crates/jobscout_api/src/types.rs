use std::fmt;

use serde::Deserialize;

pub type SiteId = String;
pub type RequestId = u64;

/// Fixed message for any failure of the site-list endpoint.
pub const CONNECTIVITY_MESSAGE: &str = "Could not connect to the backend API.";

/// One job listing as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub link: String,
    pub published_date: String,
    pub deadline_date: String,
}

/// Body of a successful `/api/scrape` call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeResponse {
    pub total_jobs: u64,
    pub unique_companies: u64,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    SitesLoaded {
        request_id: RequestId,
        result: Result<Vec<SiteId>, ApiError>,
    },
    ScrapeCompleted {
        request_id: RequestId,
        result: Result<ScrapeResponse, ApiError>,
    },
}

/// A failed call. `message` is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn connectivity(kind: FailureKind) -> Self {
        Self::new(kind, CONNECTIVITY_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidBaseUrl,
    /// Non-success status from the site-list endpoint.
    Connectivity(u16),
    /// Non-success status from the scrape endpoint.
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    /// The background worker could not start its async runtime.
    Runtime,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            FailureKind::Connectivity(code) => write!(f, "site list http status {code}"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Runtime => write!(f, "async runtime unavailable"),
        }
    }
}
