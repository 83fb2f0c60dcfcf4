//! Job scout core: pure search state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, JobRecord, RequestId, ScrapeResult, SiteId, VALIDATION_SELECT_SITE};
pub use update::update;
pub use view_model::{
    AppViewModel, JobCardView, ResultsView, SEARCH_LABEL_BUSY, SEARCH_LABEL_IDLE,
};
