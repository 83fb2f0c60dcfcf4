use std::time::Duration;

use futures_util::StreamExt;
use jobscout_logging::{scout_debug, scout_warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{ApiError, FailureKind, ScrapeResponse, SiteId};

pub const SITES_PATH: &str = "api/sites";
pub const SCRAPE_PATH: &str = "api/scrape";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Backend origin, optionally with a path prefix. Endpoint paths are
    /// resolved below it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Scrapes walk several remote pages before answering.
            request_timeout: Duration::from_secs(120),
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

/// The two calls the backend offers. Each call completes or fails exactly
/// once; there are no retries.
#[async_trait::async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn list_sites(&self) -> Result<Vec<SiteId>, ApiError>;

    /// An empty `keyword` leaves the `keyword` parameter off the request.
    async fn scrape_jobs(&self, site: &str, keyword: &str) -> Result<ScrapeResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    client: reqwest::Client,
    sites_url: Url,
    scrape_url: Url,
    max_bytes: u64,
}

impl ReqwestApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = parse_base_url(&settings.base_url)?;
        let sites_url = join_endpoint(&base, SITES_PATH)?;
        let scrape_url = join_endpoint(&base, SCRAPE_PATH)?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            sites_url,
            scrape_url,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn sites_url(&self) -> &Url {
        &self.sites_url
    }

    fn scrape_request_url(&self, site: &str, keyword: &str) -> Url {
        let mut url = self.scrape_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("site", site);
            if !keyword.is_empty() {
                query.append_pair("keyword", keyword);
            }
        }
        url
    }

    async fn read_body(
        &self,
        response: reqwest::Response,
        on_transport: fn(reqwest::Error) -> ApiError,
    ) -> Result<Vec<u8>, ApiError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(on_transport)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: Option<u64>) -> ApiError {
        ApiError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual,
            },
            format!("Response from backend exceeded {} bytes.", self.max_bytes),
        )
    }
}

#[async_trait::async_trait]
impl JobBoardApi for ReqwestApiClient {
    async fn list_sites(&self) -> Result<Vec<SiteId>, ApiError> {
        let response = self
            .client
            .get(self.sites_url.clone())
            .send()
            .await
            .map_err(sites_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            scout_warn!("{} answered {}", self.sites_url, status);
            return Err(ApiError::connectivity(FailureKind::Connectivity(
                status.as_u16(),
            )));
        }

        let body = self.read_body(response, sites_transport_error).await?;
        let sites: Vec<SiteId> = decode(SITES_PATH, &body)?;
        scout_debug!("Backend lists {} site(s)", sites.len());
        Ok(sites)
    }

    async fn scrape_jobs(&self, site: &str, keyword: &str) -> Result<ScrapeResponse, ApiError> {
        let url = self.scrape_request_url(site, keyword);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(scrape_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or(status.as_str());
            scout_warn!("{} answered {}", url, status);
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("An error occurred: {status_text}"),
            ));
        }

        let body = self.read_body(response, scrape_transport_error).await?;
        let scraped: ScrapeResponse = decode(SCRAPE_PATH, &body)?;
        scout_debug!(
            "Scrape of {} returned {} job(s) of {} total",
            site,
            scraped.jobs.len(),
            scraped.total_jobs
        );
        Ok(scraped)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| {
        ApiError::new(
            FailureKind::InvalidBaseUrl,
            format!("Invalid backend URL {raw:?}: {reason}"),
        )
    };

    let mut base = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
        return Err(invalid("expected an http(s) URL".to_string()));
    }
    // Resolve endpoints below any path prefix instead of replacing its last
    // segment.
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.set_query(None);
    base.set_fragment(None);
    Ok(base)
}

fn join_endpoint(base: &Url, path: &str) -> Result<Url, ApiError> {
    base.join(path)
        .map_err(|err| ApiError::new(FailureKind::InvalidBaseUrl, err.to_string()))
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        ApiError::new(
            FailureKind::MalformedResponse,
            format!("Unexpected response from {endpoint}: {err}"),
        )
    })
}

fn transport_kind(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    }
}

fn sites_transport_error(err: reqwest::Error) -> ApiError {
    scout_warn!("Site list request failed: {}", err);
    ApiError::connectivity(transport_kind(&err))
}

fn scrape_transport_error(err: reqwest::Error) -> ApiError {
    ApiError::new(transport_kind(&err), format!("An error occurred: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str) -> ReqwestApiClient {
        ReqwestApiClient::new(ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        })
        .expect("client")
    }

    #[test]
    fn endpoints_resolve_below_path_prefix() {
        let client = client_for("http://localhost:5000/jobs");
        assert_eq!(
            client.sites_url().as_str(),
            "http://localhost:5000/jobs/api/sites"
        );
    }

    #[test]
    fn empty_keyword_is_omitted_from_query() {
        let client = client_for("http://localhost:5000");
        let url = client.scrape_request_url("jobinrwanda", "");
        assert_eq!(url.as_str(), "http://localhost:5000/api/scrape?site=jobinrwanda");
    }

    #[test]
    fn keyword_is_encoded_into_query() {
        let client = client_for("http://localhost:5000/");
        let url = client.scrape_request_url("site a", "data engineer");
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/scrape?site=site+a&keyword=data+engineer"
        );
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = ReqwestApiClient::new(ApiSettings {
            base_url: "ftp://example.com".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidBaseUrl);

        let err = ReqwestApiClient::new(ApiSettings {
            base_url: String::new(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidBaseUrl);
    }
}
