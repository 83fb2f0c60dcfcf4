use std::sync::{mpsc, Arc};
use std::thread;

use jobscout_api::{ApiEvent, ApiHandle, JobBoardApi, ScrapeResponse};
use jobscout_core::{Effect, JobRecord, Msg, ScrapeResult};
use jobscout_logging::scout_warn;

use super::app::AppEvent;

/// Executes core effects against the backend and feeds completions back into
/// the app loop as messages.
pub struct EffectRunner {
    api: ApiHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn JobBoardApi>, app_tx: mpsc::Sender<AppEvent>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let api = ApiHandle::spawn(api, event_tx);
        spawn_event_loop(event_rx, app_tx);
        Self { api }
    }

    /// Runs the effects in order. Returns `true` once shutdown was requested.
    pub fn enqueue(&self, effects: Vec<Effect>) -> bool {
        let mut shutdown = false;
        for effect in effects {
            match effect {
                Effect::LoadSites { request_id } => self.api.list_sites(request_id),
                Effect::Scrape {
                    request_id,
                    site,
                    keyword,
                } => self.api.scrape(request_id, site, keyword),
                Effect::Shutdown => shutdown = true,
            }
        }
        shutdown
    }
}

fn spawn_event_loop(event_rx: mpsc::Receiver<ApiEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for event in event_rx {
            if app_tx.send(AppEvent::Core(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::SitesLoaded { request_id, result } => Msg::SitesLoaded {
            request_id,
            result: result.map_err(|err| {
                scout_warn!("Site list request {} failed: {}", request_id, err.kind);
                err.message
            }),
        },
        ApiEvent::ScrapeCompleted { request_id, result } => Msg::ScrapeFinished {
            request_id,
            result: result.map(map_scrape).map_err(|err| {
                scout_warn!("Scrape request {} failed: {}", request_id, err.kind);
                err.message
            }),
        },
    }
}

fn map_scrape(response: ScrapeResponse) -> ScrapeResult {
    ScrapeResult {
        total_jobs: response.total_jobs,
        unique_companies: response.unique_companies,
        jobs: response
            .jobs
            .into_iter()
            .map(|job| JobRecord {
                title: job.title,
                company: job.company,
                link: job.link,
                published_date: job.published_date,
                deadline_date: job.deadline_date,
            })
            .collect(),
    }
}
