use std::sync::{mpsc, Arc};
use std::time::Duration;

use jobscout_api::{ApiEvent, ApiHandle, ApiSettings, FailureKind, ReqwestApiClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn spawn_handle(server: &MockServer) -> (ApiHandle, mpsc::Receiver<ApiEvent>) {
    let client = ReqwestApiClient::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client");
    let (event_tx, event_rx) = mpsc::channel();
    (ApiHandle::spawn(Arc::new(client), event_tx), event_rx)
}

fn next_event(rx: &mpsc::Receiver<ApiEvent>) -> ApiEvent {
    rx.recv_timeout(Duration::from_secs(5)).expect("api event")
}

#[tokio::test]
async fn handle_reports_site_list_with_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"["jobinrwanda"]"#, "application/json"))
        .mount(&server)
        .await;

    let (handle, events) = spawn_handle(&server);
    handle.list_sites(7);

    let event = tokio::task::spawn_blocking(move || next_event(&events))
        .await
        .expect("join");
    assert_eq!(
        event,
        ApiEvent::SitesLoaded {
            request_id: 7,
            result: Ok(vec!["jobinrwanda".to_string()]),
        }
    );
}

#[tokio::test]
async fn handle_reports_scrape_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scrape"))
        .and(query_param("site", "jobinrwanda"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (handle, events) = spawn_handle(&server);
    handle.scrape(3, "jobinrwanda", "");

    let event = tokio::task::spawn_blocking(move || next_event(&events))
        .await
        .expect("join");
    match event {
        ApiEvent::ScrapeCompleted { request_id, result } => {
            assert_eq!(request_id, 3);
            let err = result.unwrap_err();
            assert_eq!(err.kind, FailureKind::HttpStatus(404));
            assert_eq!(err.message, "An error occurred: Not Found");
        }
        other => panic!("unexpected event {other:?}"),
    }
}
