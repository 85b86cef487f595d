use serde_json::{Map, Value};

use crate::{SourceGroup, SourceRecord};

pub const DEFAULT_PRIORITY: u32 = 1;

/// True when `value` has the raw catalog entry shape: an object whose `id`,
/// `name` and `baseUrl` are non-empty strings.
pub fn is_valid_entry(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| {
        required_str(obj, "id").is_some()
            && required_str(obj, "name").is_some()
            && required_str(obj, "baseUrl").is_some()
    })
}

/// Converts one raw catalog entry into a [`SourceRecord`], filling defaults
/// for every optional field. Returns `None` for entries that fail validation.
pub fn normalize_entry(value: &Value) -> Option<SourceRecord> {
    let obj = value.as_object()?;
    let id = required_str(obj, "id")?;
    let name = required_str(obj, "name")?;
    let base_url = required_str(obj, "baseUrl")?;

    Some(SourceRecord {
        id: id.to_string(),
        name: name.to_string(),
        base_url: base_url.to_string(),
        search_path: String::new(),
        detail_path: String::new(),
        // Only an explicit `false` disables.
        enabled: !matches!(obj.get("enabled"), Some(Value::Bool(false))),
        priority: obj.get("priority").map_or(DEFAULT_PRIORITY, priority_from),
        group: SourceGroup::from_tag(obj.get("group").and_then(Value::as_str)),
    })
}

fn required_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn priority_from(value: &Value) -> u32 {
    if let Some(n) = value.as_u64() {
        return match n {
            0 => DEFAULT_PRIORITY,
            n => u32::try_from(n).unwrap_or(u32::MAX),
        };
    }
    match value.as_f64() {
        Some(f) if f >= 1.0 => {
            if f >= u32::MAX as f64 {
                u32::MAX
            } else {
                f.trunc() as u32
            }
        }
        _ => DEFAULT_PRIORITY,
    }
}
