//! Source import core: catalog parsing, normalization and merging.
//!
//! Everything here is pure and synchronous; network access lives in
//! `source_import_engine`.
mod merge;
mod normalize;
mod parse;
mod record;
mod subscription;

pub use merge::{merge_import, merge_sources, merge_sources_with_stats, MergeStats};
pub use normalize::{is_valid_entry, normalize_entry, DEFAULT_PRIORITY};
pub use parse::{detect_envelope, parse_catalog, Envelope, ParseError};
pub use record::{ImportResult, SourceGroup, SourceRecord};
pub use subscription::{
    create_subscription, create_subscription_at, Subscription, UNNAMED_SUBSCRIPTION,
};
