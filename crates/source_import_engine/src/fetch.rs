use std::sync::Arc;

use futures_util::StreamExt;
use import_logging::{import_debug, import_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::context::{plan_route, ExecutionContext, Route};
use crate::decode::decode_text;
use crate::{FailureKind, FetchError};

pub const DEFAULT_RELAY_PATH: &str = "/api/proxy";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Same-origin endpoint taking the target in a `url` query parameter.
    pub relay_path: String,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            relay_path: DEFAULT_RELAY_PATH.to_string(),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            user_agent: format!("source-import/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Resolves a catalog URL to its raw text. Implementations never look at the
/// payload structure.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

pub struct ReqwestFetcher {
    settings: FetchSettings,
    context: Arc<dyn ExecutionContext>,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings, context: Arc<dyn ExecutionContext>) -> Self {
        Self { settings, context }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .user_agent(self.settings.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn get_text(&self, client: &reqwest::Client, url: Url) -> Result<String, FetchError> {
        import_debug!("GET {}", url);
        let response = client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("HTTP {status}"),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        decode_text(&bytes, content_type.as_deref())
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let route = plan_route(self.context.as_ref(), &self.settings.relay_path, url)?;
        let client = self.build_client()?;

        match route {
            Route::Direct(target) => self.get_text(&client, target).await,
            Route::Relay { relay, target } => {
                let relay_err = match self.get_text(&client, relay).await {
                    Ok(text) => return Ok(text),
                    Err(err) => err,
                };
                import_warn!("Relay fetch failed ({}), retrying directly: {}", relay_err, target);
                match self.get_text(&client, target).await {
                    Ok(text) => Ok(text),
                    Err(direct_err) => Err(select_fallback_error(relay_err, direct_err)),
                }
            }
        }
    }
}

/// Picks the error surfaced when both the relay and the direct retry failed.
fn select_fallback_error(relay_err: FetchError, direct_err: FetchError) -> FetchError {
    if direct_err.kind.specificity() > relay_err.kind.specificity() {
        return direct_err;
    }
    FetchError::new(
        relay_err.kind,
        format!(
            "relay fetch failed: {}; direct retry failed: {}",
            relay_err.message, direct_err.message
        ),
    )
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
