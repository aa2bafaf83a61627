use serde::{Deserialize, Serialize};

use crate::lyrics::providers::{LrcLibProvider, MegalobizProvider};

/// What the caller knows about the track being searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsQuery {
    pub artist: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
}

impl LyricsQuery {
    pub fn new(artist: &str, title: &str) -> Self {
        Self {
            artist: artist.trim().to_string(),
            title: title.trim().to_string(),
            album: None,
            duration_secs: None,
        }
    }
}

/// One record returned by a provider, reduced to the fields the pipeline
/// cares about. Provider response schemas are mapped into this shape at the
/// boundary so the filter and selection logic never see raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LyricsCandidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub artist_name: String,
    pub track_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrumental: Option<bool>,
}

impl LyricsCandidate {
    /// A record with neither lyric field carries nothing selectable.
    pub fn has_any_text(&self) -> bool {
        let non_empty = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        non_empty(&self.plain_text) || non_empty(&self.synced_text)
    }
}

/// Final outcome of a search. Three states: nothing found, plain only, or
/// synchronized (which always carries a plain rendition derived from it).
/// The constructors are the only way to build one, so "synced without plain"
/// cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    plain_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    synced_text: Option<String>,
}

impl SearchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn plain(text: String) -> Self {
        Self {
            plain_text: Some(text),
            synced_text: None,
        }
    }

    pub fn synced(plain: String, lrc: String) -> Self {
        Self {
            plain_text: Some(plain),
            synced_text: Some(lrc),
        }
    }

    pub fn plain_text(&self) -> Option<&str> {
        self.plain_text.as_deref()
    }

    pub fn synced_text(&self) -> Option<&str> {
        self.synced_text.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.plain_text.is_none() && self.synced_text.is_none()
    }
}

/// Knobs for one pipeline invocation. Providers live here so tests can point
/// them at a mock server.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Per-request bound; each outbound call gets its own timeout.
    pub timeout_ms: u64,
    pub lrclib: LrcLibProvider,
    /// Secondary broad-search provider; `None` disables the fallback stage.
    pub fallback: Option<MegalobizProvider>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            lrclib: LrcLibProvider::default(),
            fallback: Some(MegalobizProvider::default()),
        }
    }
}
