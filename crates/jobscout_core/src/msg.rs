use crate::{RequestId, ScrapeResult, SiteId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished starting up; loads the site list.
    Started,
    /// User asked for the site list to be fetched again.
    RefreshSites,
    /// Site list request settled. `Err` carries the user-facing message.
    SitesLoaded {
        request_id: RequestId,
        result: Result<Vec<SiteId>, String>,
    },
    /// User picked a site from the selector.
    SiteSelected(SiteId),
    /// User edited the keyword field.
    KeywordChanged(String),
    /// User clicked Search.
    SearchClicked,
    /// Scrape request settled. `Err` carries the user-facing message.
    ScrapeFinished {
        request_id: RequestId,
        result: Result<ScrapeResult, String>,
    },
    /// User closed the application.
    QuitRequested,
    /// Render tick; forces a redraw of the current state.
    Tick,
    /// Fallback for input that maps to nothing.
    NoOp,
}
