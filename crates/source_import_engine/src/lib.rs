//! Source import engine: network resolution of catalogs and import jobs.
mod context;
mod decode;
mod engine;
mod fetch;
mod pipeline;
mod types;

pub use context::{plan_route, ExecutionContext, Route, StaticContext};
pub use decode::{decode_text, DecodeError};
pub use engine::ImportHandle;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_RELAY_PATH};
pub use pipeline::{import_from_url, refresh_subscription};
pub use types::{FailureKind, FetchError, ImportError, ImportEvent, JobId};
