use url::Url;

use crate::{FailureKind, FetchError};

/// Capability describing where the importer runs.
///
/// A restricted context (packaged shell, `file:` page, sandbox) cannot reach
/// the same-origin relay endpoint, so every request goes out directly.
pub trait ExecutionContext: Send + Sync {
    fn is_restricted_context(&self) -> bool;
    /// Origin requests are judged against, e.g. `https://app.example.com`.
    fn current_origin(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContext {
    origin: String,
    restricted: bool,
}

impl StaticContext {
    pub fn new(origin: impl Into<String>, restricted: bool) -> Self {
        Self {
            origin: origin.into(),
            restricted,
        }
    }

    /// A regular hosted context where the relay endpoint is available.
    pub fn browser(origin: impl Into<String>) -> Self {
        Self::new(origin, false)
    }

    pub fn restricted(origin: impl Into<String>) -> Self {
        Self::new(origin, true)
    }

    /// Derives the restricted flag from the page origin: `file:` pages and
    /// packaged `capacitor:` shells have no relay endpoint.
    pub fn from_origin(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        let restricted = Url::parse(&origin)
            .map(|url| RESTRICTED_SCHEMES.contains(&url.scheme()))
            .unwrap_or(false);
        Self::new(origin, restricted)
    }
}

const RESTRICTED_SCHEMES: &[&str] = &["file", "capacitor"];

impl ExecutionContext for StaticContext {
    fn is_restricted_context(&self) -> bool {
        self.restricted
    }

    fn current_origin(&self) -> &str {
        &self.origin
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Direct(Url),
    /// Fetch `relay` first and fall back to `target`.
    Relay { relay: Url, target: Url },
}

/// Decides how `url` is fetched from `context`.
///
/// Relative input is resolved against the current origin. Only cross-origin
/// `http(s)` targets are relayed; any other scheme is fetched directly.
pub fn plan_route(
    context: &dyn ExecutionContext,
    relay_path: &str,
    url: &str,
) -> Result<Route, FetchError> {
    let origin = Url::parse(context.current_origin()).map_err(|err| {
        FetchError::new(
            FailureKind::InvalidUrl,
            format!("invalid current origin {:?}: {err}", context.current_origin()),
        )
    })?;

    let target = origin.join(url).map_err(|err| {
        FetchError::new(FailureKind::InvalidUrl, format!("invalid url {url:?}: {err}"))
    })?;

    if target.origin() == origin.origin()
        || context.is_restricted_context()
        || !matches!(target.scheme(), "http" | "https")
    {
        return Ok(Route::Direct(target));
    }

    let mut relay = origin.join(relay_path).map_err(|err| {
        FetchError::new(
            FailureKind::InvalidUrl,
            format!("invalid relay path {relay_path:?}: {err}"),
        )
    })?;
    relay.query_pairs_mut().clear().append_pair("url", target.as_str());
    Ok(Route::Relay { relay, target })
}
