pub mod ordering;
pub mod requests;
pub mod text;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

pub use ordering::{display_cmp, display_order, pending_count};
pub use requests::{CreateItemRequest, MessageResponse, UpdateItemRequest};
pub use text::{TextError, validate_text};

/// Opaque identifier assigned by the store when an item is created.
#[derive(
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    schemars::JsonSchema,
)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Remind,
    Email,
    Invite,
    Prioritize,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Remind,
        Category::Email,
        Category::Invite,
        Category::Prioritize,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Remind => "remind",
            Category::Email => "email",
            Category::Invite => "invite",
            Category::Prioritize => "prioritize",
        }
    }

    /// Anything missing or unrecognised falls back to `Remind`.
    pub fn parse_lenient(raw: Option<&str>) -> Category {
        raw.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}` (expected one of remind, email, invite, prioritize)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    #[serde(alias = "_id")]
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
