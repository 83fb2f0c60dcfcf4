use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use jobscout_api::ReqwestApiClient;
use jobscout_core::{update, AppState, Effect, Msg};
use jobscout_logging::scout_info;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{self, Action, Command};
use super::ui::{layout, render};

/// Everything the app loop reacts to, in arrival order.
#[derive(Debug)]
pub(crate) enum AppEvent {
    Core(Msg),
    Input(Command),
    InputClosed,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let client = ReqwestApiClient::new(config.api_settings())
        .with_context(|| format!("cannot use backend {:?}", config.base_url))?;
    scout_info!("Using backend {}", config.base_url);

    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(Arc::new(client), app_tx.clone());
    spawn_input_reader(app_tx.clone());

    let mut app = AppLoop::new(io::stdout().lock());
    app.write_lines(&layout::header_lines())?;
    if app.handle(AppEvent::Core(Msg::Started), &runner)? {
        return Ok(());
    }

    while let Ok(event) = app_rx.recv() {
        if app.handle(event, &runner)? {
            break;
        }
    }
    scout_info!("Session closed");
    Ok(())
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if app_tx
                .send(AppEvent::Input(commands::parse_command(&line)))
                .is_err()
            {
                return;
            }
        }
        let _ = app_tx.send(AppEvent::InputClosed);
    });
}

/// Owns the session state and the output; the single mutator of state.
pub(crate) struct AppLoop<W: Write> {
    state: AppState,
    out: W,
}

impl<W: Write> AppLoop<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            state: AppState::new(),
            out,
        }
    }

    /// Applies one event. Returns `true` when the app should exit.
    pub(crate) fn handle(&mut self, event: AppEvent, runner: &EffectRunner) -> io::Result<bool> {
        let msg = match event {
            AppEvent::Core(msg) => msg,
            AppEvent::Input(command) => match commands::resolve(command, &self.state.view()) {
                Action::Dispatch(msg) => msg,
                Action::ShowHelp => {
                    self.write_lines(&layout::help_lines())?;
                    return Ok(false);
                }
                Action::Reject(reason) => {
                    writeln!(self.out, "{reason}")?;
                    self.out.flush()?;
                    return Ok(false);
                }
            },
            AppEvent::InputClosed => Msg::QuitRequested,
        };

        let effects = self.dispatch(msg)?;
        Ok(runner.enqueue(effects))
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<Vec<Effect>> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        self.state = state;

        if let Some(view) = view {
            self.write_lines(&render::render(&view))?;
        }
        Ok(effects)
    }

    pub(crate) fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jobscout_api::ApiSettings;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const SCRAPE_BODY: &str = r#"{"total_jobs":2,"unique_companies":2,"jobs":[{"title":"X","company":"Y","link":"http://jobs.example.com/x","published_date":"2024-01-01","deadline_date":"2024-02-01"}]}"#;

    fn next_event(rx: &mpsc::Receiver<AppEvent>) -> AppEvent {
        rx.recv_timeout(Duration::from_secs(5)).expect("app event")
    }

    #[tokio::test]
    async fn search_flow_renders_scraped_jobs() {
        jobscout_logging::initialize_for_tests();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sites"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"["site-a","site-b"]"#, "application/json"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/scrape"))
            .and(query_param("site", "site-a"))
            .and(query_param("keyword", "python"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(SCRAPE_BODY, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReqwestApiClient::new(ApiSettings {
            base_url: server.uri(),
            ..ApiSettings::default()
        })
        .expect("client");

        let output = tokio::task::spawn_blocking(move || {
            let (app_tx, app_rx) = mpsc::channel();
            let runner = EffectRunner::new(Arc::new(client), app_tx);
            let mut app = AppLoop::new(Vec::new());

            assert!(!app.handle(AppEvent::Core(Msg::Started), &runner).unwrap());
            let loaded = next_event(&app_rx);
            app.handle(loaded, &runner).unwrap();
            assert_eq!(app.state().selected_site(), Some("site-a"));

            app.handle(
                AppEvent::Input(Command::Keyword("python".to_string())),
                &runner,
            )
            .unwrap();
            app.handle(AppEvent::Input(Command::Search), &runner).unwrap();
            assert!(app.state().is_loading());

            let scraped = next_event(&app_rx);
            app.handle(scraped, &runner).unwrap();
            assert!(!app.state().is_loading());
            assert_eq!(app.state().error(), None);
            let result = app.state().result().expect("result");
            assert_eq!(result.total_jobs, 2);
            assert_eq!(result.jobs.len(), 1);

            assert!(app.handle(AppEvent::InputClosed, &runner).unwrap());
            String::from_utf8(app.output().clone()).expect("utf8 output")
        })
        .await
        .expect("join");

        assert!(output.contains("Scraping in progress, please wait..."));
        assert!(output.contains("Total Jobs Found: 2 | Unique Companies: 2 | Relevant Jobs Found: 1"));
        assert!(output.contains("1. X"));
    }

    #[tokio::test]
    async fn backend_failure_is_shown_as_error_banner() {
        jobscout_logging::initialize_for_tests();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sites"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ReqwestApiClient::new(ApiSettings {
            base_url: server.uri(),
            ..ApiSettings::default()
        })
        .expect("client");

        let output = tokio::task::spawn_blocking(move || {
            let (app_tx, app_rx) = mpsc::channel();
            let runner = EffectRunner::new(Arc::new(client), app_tx);
            let mut app = AppLoop::new(Vec::new());

            app.handle(AppEvent::Core(Msg::Started), &runner).unwrap();
            let loaded = next_event(&app_rx);
            app.handle(loaded, &runner).unwrap();

            // Search with nothing selected never reaches the network.
            app.handle(AppEvent::Input(Command::Search), &runner).unwrap();
            assert!(app_rx.recv_timeout(Duration::from_millis(200)).is_err());
            String::from_utf8(app.output().clone()).expect("utf8 output")
        })
        .await
        .expect("join");

        assert!(output.contains("Error: Could not connect to the backend API."));
        assert!(output.contains("Error: Please select a website to scrape."));
    }
}
