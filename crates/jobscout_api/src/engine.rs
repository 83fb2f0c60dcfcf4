use std::sync::{mpsc, Arc};
use std::thread;

use jobscout_logging::{scout_debug, scout_error, scout_info};

use crate::{ApiError, ApiEvent, FailureKind, JobBoardApi, RequestId, SiteId};

enum ApiCommand {
    ListSites {
        request_id: RequestId,
    },
    Scrape {
        request_id: RequestId,
        site: SiteId,
        keyword: String,
    },
}

/// Runs API calls on a background tokio runtime. Every submitted call
/// produces exactly one [`ApiEvent`] on the event channel.
pub struct ApiHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
}

impl ApiHandle {
    pub fn spawn(api: Arc<dyn JobBoardApi>, event_tx: mpsc::Sender<ApiEvent>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    scout_error!("Failed to start API runtime: {}", err);
                    let reason = err.to_string();
                    // Every call still settles, so the UI never waits forever.
                    while let Ok(command) = cmd_rx.recv() {
                        let _ = event_tx.send(failed_event(command, &reason));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
            // Handle dropped: the app is exiting and nobody reads late events.
            runtime.shutdown_background();
        });

        Self { cmd_tx }
    }

    pub fn list_sites(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(ApiCommand::ListSites { request_id });
    }

    pub fn scrape(&self, request_id: RequestId, site: impl Into<SiteId>, keyword: impl Into<String>) {
        let _ = self.cmd_tx.send(ApiCommand::Scrape {
            request_id,
            site: site.into(),
            keyword: keyword.into(),
        });
    }
}

async fn handle_command(api: &dyn JobBoardApi, command: ApiCommand) -> ApiEvent {
    match command {
        ApiCommand::ListSites { request_id } => {
            scout_info!("Loading site list (request {})", request_id);
            let result = api.list_sites().await;
            ApiEvent::SitesLoaded { request_id, result }
        }
        ApiCommand::Scrape {
            request_id,
            site,
            keyword,
        } => {
            scout_debug!("Scraping {} (request {})", site, request_id);
            let result = api.scrape_jobs(&site, &keyword).await;
            ApiEvent::ScrapeCompleted { request_id, result }
        }
    }
}

fn failed_event(command: ApiCommand, reason: &str) -> ApiEvent {
    match command {
        ApiCommand::ListSites { request_id } => ApiEvent::SitesLoaded {
            request_id,
            result: Err(ApiError::connectivity(FailureKind::Runtime)),
        },
        ApiCommand::Scrape { request_id, .. } => ApiEvent::ScrapeCompleted {
            request_id,
            result: Err(ApiError::new(
                FailureKind::Runtime,
                format!("An error occurred: {reason}"),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CONNECTIVITY_MESSAGE;

    #[test]
    fn commands_settle_as_failures_without_runtime() {
        let event = failed_event(ApiCommand::ListSites { request_id: 4 }, "no threads");
        assert_eq!(
            event,
            ApiEvent::SitesLoaded {
                request_id: 4,
                result: Err(ApiError::new(FailureKind::Runtime, CONNECTIVITY_MESSAGE)),
            }
        );

        let event = failed_event(
            ApiCommand::Scrape {
                request_id: 5,
                site: "site-a".to_string(),
                keyword: String::new(),
            },
            "no threads",
        );
        match event {
            ApiEvent::ScrapeCompleted { request_id, result } => {
                assert_eq!(request_id, 5);
                let err = result.unwrap_err();
                assert_eq!(err.kind, FailureKind::Runtime);
                assert_eq!(err.message, "An error occurred: no threads");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
