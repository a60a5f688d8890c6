//! Article status handling.
//!
//! Status is a free toggle between [`ArticleStatus::Draft`] and
//! [`ArticleStatus::Published`]; there is no transition guard. Client input is
//! normalised with [`ArticleStatus::from_input`], while values read back from
//! storage go through the strict [`TryFrom<String>`] conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Wire/storage spelling of the draft status.
pub const STATUS_DRAFT: &str = "DRAFT";
/// Wire/storage spelling of the published status.
pub const STATUS_PUBLISHED: &str = "PUBLISHED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    /// Visible only to the author.
    #[default]
    Draft,
    /// Visible to every caller, including anonymous ones.
    Published,
}

impl ArticleStatus {
    /// Normalise a client-supplied status string.
    ///
    /// Only the exact string `"PUBLISHED"` publishes; anything else
    /// (including other casings) yields [`ArticleStatus::Draft`].
    pub fn from_input(raw: &str) -> Self {
        if raw == STATUS_PUBLISHED {
            Self::Published
        } else {
            Self::Draft
        }
    }

    /// Normalise an optional client-supplied status, defaulting to draft.
    pub fn from_optional_input(raw: Option<&str>) -> Self {
        raw.map(Self::from_input).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Published => STATUS_PUBLISHED,
        }
    }

    pub fn is_published(self) -> bool {
        self == Self::Published
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ArticleStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PUBLISHED => Ok(Self::Published),
            other => Err(CoreError::Internal(format!(
                "Unknown article status in storage: {other}"
            ))),
        }
    }
}
