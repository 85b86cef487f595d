use serde::{Deserialize, Serialize};

/// Category tag of a source. Catalogs spell these `"normal"` and `"adult"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SourceGroup {
    #[default]
    #[serde(rename = "normal")]
    Standard,
    #[serde(rename = "adult")]
    Restricted,
}

impl SourceGroup {
    pub const RESTRICTED_TAG: &'static str = "adult";
    pub const STANDARD_TAG: &'static str = "normal";

    /// Maps a raw catalog tag onto the fixed set. Anything but the restricted
    /// marker is standard.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(Self::RESTRICTED_TAG) => SourceGroup::Restricted,
            _ => SourceGroup::Standard,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            SourceGroup::Standard => Self::STANDARD_TAG,
            SourceGroup::Restricted => Self::RESTRICTED_TAG,
        }
    }
}

/// Canonical representation of one content provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    pub id: String,
    pub name: String,
    pub base_url: String,
    /// Empty until configured after import.
    #[serde(default)]
    pub search_path: String,
    #[serde(default)]
    pub detail_path: String,
    pub enabled: bool,
    /// Lower value wins; ties fall back to collection order.
    pub priority: u32,
    #[serde(default)]
    pub group: SourceGroup,
}

/// Categorized output of one parse or fetch call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub standard: Vec<SourceRecord>,
    pub restricted: Vec<SourceRecord>,
}

impl ImportResult {
    pub fn total_count(&self) -> usize {
        self.standard.len() + self.restricted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Standard records first, then restricted, each in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceRecord> {
        self.standard.iter().chain(self.restricted.iter())
    }
}
