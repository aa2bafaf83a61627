use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::lyrics::error::LyricsError;
use crate::lyrics::model::{LyricsCandidate, LyricsQuery};

/// Primary structured provider (lrclib.net): a keyed exact-get endpoint and a
/// free-text search endpoint, both returning the same record shape.
#[derive(Debug, Clone)]
pub struct LrcLibProvider {
    get_url: String,
    search_url: String,
}

impl Default for LrcLibProvider {
    fn default() -> Self {
        Self {
            get_url: "https://lrclib.net/api/get".to_string(),
            search_url: "https://lrclib.net/api/search".to_string(),
        }
    }
}

impl LrcLibProvider {
    pub fn with_base_url(get_url: &str, search_url: &str) -> Self {
        Self {
            get_url: get_url.trim_end_matches('/').to_string(),
            search_url: search_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exact lookup by artist + title (+ album) + duration. At most one
    /// record; 404 means the signature is unknown, which is not an error.
    pub async fn get_exact(
        &self,
        http: &Client,
        query: &LyricsQuery,
        timeout: Duration,
    ) -> Result<Option<LyricsCandidate>, LyricsError> {
        let Some(duration) = query.duration_secs else {
            return Ok(None);
        };

        let mut params: Vec<(&str, String)> = vec![
            ("artist_name", query.artist.clone()),
            ("track_name", query.title.clone()),
        ];
        if let Some(album) = query.album.as_deref().filter(|a| !a.trim().is_empty()) {
            params.push(("album_name", album.to_string()));
        }
        params.push(("duration", duration.to_string()));

        let resp = http
            .get(&self.get_url)
            .query(&params)
            .timeout(timeout)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;
        let body = resp.bytes().await?;
        let rec: LrcLibRecord = serde_json::from_slice(&body)?;

        let candidate = rec.into_candidate();
        Ok(candidate.has_any_text().then_some(candidate))
    }

    /// Free-text search: zero or more records for a single query string.
    pub async fn search(
        &self,
        http: &Client,
        q: &str,
        timeout: Duration,
    ) -> Result<Vec<LyricsCandidate>, LyricsError> {
        let resp = http
            .get(&self.search_url)
            .query(&[("q", q)])
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = resp.bytes().await?;
        let recs: Vec<LrcLibRecord> = serde_json::from_slice(&body)?;
        Ok(recs.into_iter().map(LrcLibRecord::into_candidate).collect())
    }
}

#[derive(Debug, Deserialize)]
struct LrcLibRecord {
    #[serde(default)]
    id: Option<i64>,
    #[serde(rename = "trackName", default)]
    track_name: Option<String>,
    #[serde(rename = "artistName", default)]
    artist_name: Option<String>,
    #[serde(rename = "plainLyrics", default)]
    plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics", default)]
    synced_lyrics: Option<String>,
    #[serde(default)]
    instrumental: Option<bool>,
}

impl LrcLibRecord {
    fn into_candidate(self) -> LyricsCandidate {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        LyricsCandidate {
            provider_id: self.id.map(|v| v.to_string()),
            artist_name: self.artist_name.unwrap_or_default(),
            track_name: self.track_name.unwrap_or_default(),
            plain_text: non_empty(self.plain_lyrics),
            synced_text: non_empty(self.synced_lyrics),
            instrumental: self.instrumental,
        }
    }
}
