use crate::{RequestId, SiteId};

/// Side effects requested by [`crate::update`]; the app executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the list of scrapable sites.
    LoadSites { request_id: RequestId },
    /// Run one scrape. An empty `keyword` means "no keyword filter".
    Scrape {
        request_id: RequestId,
        site: SiteId,
        keyword: String,
    },
    /// The session is over; stop feeding input and exit.
    Shutdown,
}
