//! Job scout API client: typed access to the scraping backend and a
//! background worker that runs calls off the UI thread.
mod client;
mod engine;
mod types;

pub use client::{ApiSettings, JobBoardApi, ReqwestApiClient, SCRAPE_PATH, SITES_PATH};
pub use engine::ApiHandle;
pub use types::{
    ApiError, ApiEvent, FailureKind, Job, RequestId, ScrapeResponse, SiteId,
    CONNECTIVITY_MESSAGE,
};
