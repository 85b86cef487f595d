use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const UNNAMED_SUBSCRIPTION: &str = "Untitled subscription";

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// A saved reference to a remote catalog URL with refresh metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
    pub auto_refresh: bool,
}

impl Subscription {
    /// Records a successful refresh.
    pub fn mark_refreshed(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
    }
}

pub fn create_subscription(name: &str, url: &str) -> Subscription {
    create_subscription_at(name, url, Utc::now())
}

pub fn create_subscription_at(name: &str, url: &str, now: DateTime<Utc>) -> Subscription {
    let name = match name.trim() {
        "" => UNNAMED_SUBSCRIPTION,
        trimmed => trimmed,
    };
    Subscription {
        id: format!("sub_{}_{}", now.timestamp_millis(), random_suffix()),
        name: name.to_string(),
        url: url.trim().to_string(),
        last_updated: now,
        auto_refresh: true,
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}
