use url::Url;

use crate::{JobRecord, SiteId};

pub const SEARCH_LABEL_IDLE: &str = "Search";
pub const SEARCH_LABEL_BUSY: &str = "Searching...";

/// Snapshot handed to the presentation layer. Rendering is a pure function of
/// this value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub sites: Vec<SiteId>,
    pub selected_site: Option<SiteId>,
    pub keyword: String,
    pub site_selector_enabled: bool,
    pub search_enabled: bool,
    pub search_label: &'static str,
    pub is_loading: bool,
    pub error: Option<String>,
    pub results: Option<ResultsView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub total_jobs: u64,
    pub unique_companies: u64,
    /// Number of listings actually returned, after keyword filtering.
    pub relevant_jobs: usize,
    pub jobs: Vec<JobCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub title: String,
    pub company: String,
    /// `Some` only for absolute http(s) links that can be opened in a browser.
    pub link: Option<String>,
    pub published_date: String,
    pub deadline_date: String,
}

impl JobCardView {
    pub(crate) fn from_record(job: &JobRecord) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            link: browsable_link(&job.link),
            published_date: job.published_date.clone(),
            deadline_date: job.deadline_date.clone(),
        }
    }
}

fn browsable_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| trimmed.to_string())
}
