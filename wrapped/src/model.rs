//! Wrapped data model and the client-visible load state.
//!
//! The backend payload is parsed leniently at the field level only: callers
//! get a [`ShapeError`] describing what was wrong instead of a panic, and the
//! loader turns any of them into an empty result.

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const TOP_ARTISTS_FIELD: &str = "top_artists";
const NAME_FIELD: &str = "name";

/// One entry of the personalized dataset.
///
/// `name` is the display key, but entries are never deduplicated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub name: String,
}

impl ArtistSummary {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Success body of `GET /wrapped`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedResponse {
    pub top_artists: Vec<ArtistSummary>,
}

/// Why a response body did not match [`WrappedResponse`].
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("`top_artists` is missing")]
    MissingField,
    #[error("`top_artists` is not a sequence")]
    NotASequence,
    #[error("`top_artists[{index}]` has no string `name`")]
    InvalidEntry { index: usize },
}

impl WrappedResponse {
    /// Parse a response body, validating the `top_artists` field.
    ///
    /// A `null` field counts as missing. Unknown fields are ignored, both on
    /// the envelope and on each entry.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] when the body is not JSON, the field is absent
    /// or not an array, or an entry has no string `name`.
    pub fn parse(body: &str) -> Result<Self, ShapeError> {
        let value: Value = serde_json::from_str(body)?;
        let field = value
            .get(TOP_ARTISTS_FIELD)
            .filter(|v| !v.is_null())
            .ok_or(ShapeError::MissingField)?;
        let Value::Array(entries) = field else {
            return Err(ShapeError::NotASequence);
        };

        let top_artists = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .get(NAME_FIELD)
                    .and_then(Value::as_str)
                    .map(ArtistSummary::new)
                    .ok_or(ShapeError::InvalidEntry { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { top_artists })
    }
}

/// State of the wrapped view for a single page visit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// The single request is in flight.
    #[default]
    Loading,
    /// The backend rejected the session; the gate is being re-entered.
    Redirecting,
    /// Request settled. Empty on transport failure or a malformed body.
    Loaded(Vec<ArtistSummary>),
}

impl LoadState {
    /// `true` once no further automatic transition can happen in this visit.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// Loaded artists, or an empty slice in every other state.
    #[must_use]
    pub fn artists(&self) -> &[ArtistSummary] {
        match self {
            Self::Loaded(artists) => artists,
            Self::Loading | Self::Redirecting => &[],
        }
    }
}
