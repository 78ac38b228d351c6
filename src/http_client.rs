use crate::error::{Result, SourceError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:71.0) Gecko/20100101 Firefox/77.0";

const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Configuration for the shared outbound HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-call timeout
    pub timeout: Duration,
    pub user_agent: String,
    pub enable_gzip: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            enable_gzip: true,
        }
    }
}

/// HTTP client shared by every source. Cloning is cheap, the connection pool
/// is shared. Requests are never retried.
#[derive(Debug, Clone)]
pub struct SourceHttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl SourceHttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .gzip(config.enable_gzip)
            .brotli(config.enable_gzip)
            .default_headers(headers)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| SourceError::BuildingRequest {
                url: "<client>".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Header set sent with every request, as advertised to callers.
    pub fn default_headers(&self) -> BTreeMap<String, Vec<String>> {
        BTreeMap::from([
            ("User-Agent".to_string(), vec![self.config.user_agent.clone()]),
            ("Accept".to_string(), vec![DEFAULT_ACCEPT.to_string()]),
            ("Accept-Language".to_string(), vec![DEFAULT_ACCEPT_LANGUAGE.to_string()]),
        ])
    }

    /// Sends a GET without looking at the status code.
    pub async fn send(&self, url: &Url, cancel: &CancellationToken) -> Result<Response> {
        log::debug!("GET {}", url);

        let request = self.client.get(url.clone());
        let response = with_cancel(cancel, url.as_str(), request.send())
            .await?
            .map_err(|source| SourceError::HttpRequest {
                url: url.to_string(),
                source,
            })?;

        log::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }

    /// Sends a GET and fails on any non-success status.
    pub async fn get(&self, url: &Url, cancel: &CancellationToken) -> Result<Response> {
        let response = self.send(url, cancel).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    pub async fn get_text(&self, url: &Url, cancel: &CancellationToken) -> Result<String> {
        let response = self.get(url, cancel).await?;
        read_text(url, response, cancel).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let body = self.get_text(url, cancel).await?;
        decode_json(&body, url.as_str())
    }

    /// Pause between two requests to the same provider.
    pub async fn delay(&self, duration: Duration, cancel: &CancellationToken) -> Result<()> {
        with_cancel(cancel, "delay", tokio::time::sleep(duration)).await
    }
}

/// Reads a response body, honoring cancellation.
pub async fn read_text(
    url: &Url,
    response: Response,
    cancel: &CancellationToken,
) -> Result<String> {
    with_cancel(cancel, url.as_str(), response.text())
        .await?
        .map_err(|source| SourceError::HttpRequest {
            url: url.to_string(),
            source,
        })
}

pub fn decode_json<T: DeserializeOwned>(body: &str, context: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| SourceError::ParsingJson {
        context: context.to_string(),
        source,
    })
}

async fn with_cancel<F: Future>(
    cancel: &CancellationToken,
    stage: &str,
    fut: F,
) -> Result<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SourceError::cancelled(stage)),
        out = fut => Ok(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_carry_user_agent() {
        let client = SourceHttpClient::new().unwrap();
        let headers = client.default_headers();
        assert_eq!(headers["User-Agent"], vec![DEFAULT_USER_AGENT.to_string()]);
        assert_eq!(headers.len(), 3);
        assert_eq!(client.config().timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_cancelled_request_never_hits_network() {
        let client = SourceHttpClient::new().unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let url = Url::parse("http://192.0.2.1/unroutable").unwrap();
        let result = client.get_text(&url, &cancel).await;
        assert!(matches!(result, Err(SourceError::Cancelled { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_cancellable() {
        let client = SourceHttpClient::new().unwrap();
        let cancel = CancellationToken::new();
        assert!(client.delay(Duration::from_millis(10), &cancel).await.is_ok());

        cancel.cancel();
        let result = client.delay(Duration::from_secs(3600), &cancel).await;
        assert!(matches!(result, Err(SourceError::Cancelled { .. })));
    }

    #[test]
    fn test_decode_json_reports_context() {
        let err = decode_json::<serde_json::Value>("{not json", "feed page").unwrap_err();
        match err {
            SourceError::ParsingJson { context, .. } => assert_eq!(context, "feed page"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
