use crate::view_model::{AppViewModel, JobCardView, ResultsView, SEARCH_LABEL_BUSY, SEARCH_LABEL_IDLE};

/// Opaque name of a scrapable source, as issued by the backend.
pub type SiteId = String;

/// Tags each outgoing request so late completions can be recognised.
pub type RequestId = u64;

/// Shown when Search is clicked with no site selected.
pub const VALIDATION_SELECT_SITE: &str = "Please select a website to scrape.";

/// One listing inside a scrape result. Fields are opaque display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub link: String,
    pub published_date: String,
    pub deadline_date: String,
}

/// Counts and listings returned by one scrape, in backend order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeResult {
    pub total_jobs: u64,
    pub unique_companies: u64,
    pub jobs: Vec<JobRecord>,
}

/// The whole mutable session. Owned by the app loop and only changed through
/// [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    sites: Vec<SiteId>,
    selected_site: Option<SiteId>,
    keyword: String,
    result: Option<ScrapeResult>,
    is_loading: bool,
    error: Option<String>,
    next_request_id: RequestId,
    pending_sites: Option<RequestId>,
    pending_scrape: Option<RequestId>,
    closed: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sites(&self) -> &[SiteId] {
        &self.sites
    }

    pub fn selected_site(&self) -> Option<&str> {
        self.selected_site.as_deref()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn result(&self) -> Option<&ScrapeResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns whether anything visible changed since the last call, and
    /// resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let search_enabled = !self.is_loading && self.selected_site.is_some();
        AppViewModel {
            sites: self.sites.clone(),
            selected_site: self.selected_site.clone(),
            keyword: self.keyword.clone(),
            site_selector_enabled: !self.sites.is_empty(),
            search_enabled,
            search_label: if self.is_loading {
                SEARCH_LABEL_BUSY
            } else {
                SEARCH_LABEL_IDLE
            },
            is_loading: self.is_loading,
            error: self.error.clone(),
            results: self.result.as_ref().map(results_view),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn begin_sites_request(&mut self) -> RequestId {
        let request_id = self.allocate_request_id();
        self.pending_sites = Some(request_id);
        request_id
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Applies a settled site-list request. Returns `false` when the
    /// completion was stale and got dropped.
    pub(crate) fn apply_sites(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<SiteId>, String>,
    ) -> bool {
        if self.closed || self.pending_sites != Some(request_id) {
            return false;
        }
        self.pending_sites = None;

        match result {
            Ok(sites) => {
                let still_listed = self
                    .selected_site
                    .as_ref()
                    .is_some_and(|selected| sites.contains(selected));
                if !still_listed {
                    self.selected_site = sites.first().cloned();
                }
                self.sites = sites;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        self.mark_dirty();
        true
    }

    /// Selects `site` if the backend listed it.
    pub(crate) fn select_site(&mut self, site: SiteId) -> bool {
        if !self.sites.contains(&site) {
            return false;
        }
        if self.selected_site.as_ref() != Some(&site) {
            self.selected_site = Some(site);
            self.mark_dirty();
        }
        true
    }

    pub(crate) fn set_keyword(&mut self, keyword: String) {
        if self.keyword != keyword {
            self.keyword = keyword;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_validation_error(&mut self) {
        self.error = Some(VALIDATION_SELECT_SITE.to_string());
        self.mark_dirty();
    }

    /// Enters the loading state for a new search and returns the request to
    /// issue. Stale output from the previous search is cleared first.
    pub(crate) fn begin_search(&mut self) -> Option<(RequestId, SiteId, String)> {
        let site = self.selected_site.clone()?;
        let request_id = self.allocate_request_id();
        self.is_loading = true;
        self.result = None;
        self.error = None;
        self.pending_scrape = Some(request_id);
        self.mark_dirty();
        Some((request_id, site, self.keyword.clone()))
    }

    /// Applies a settled scrape. Loading always ends for the matching
    /// request, whatever the outcome.
    pub(crate) fn apply_scrape(
        &mut self,
        request_id: RequestId,
        result: Result<ScrapeResult, String>,
    ) -> bool {
        if self.closed || self.pending_scrape != Some(request_id) {
            return false;
        }
        self.pending_scrape = None;

        match result {
            Ok(result) => self.result = Some(result),
            Err(message) => self.error = Some(message),
        }
        self.is_loading = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.pending_sites = None;
        self.pending_scrape = None;
    }
}

fn results_view(result: &ScrapeResult) -> ResultsView {
    ResultsView {
        total_jobs: result.total_jobs,
        unique_companies: result.unique_companies,
        relevant_jobs: result.jobs.len(),
        jobs: result.jobs.iter().map(JobCardView::from_record).collect(),
    }
}
