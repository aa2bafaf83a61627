use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;

use crate::lyrics::error::LyricsError;
use crate::lyrics::model::LyricsQuery;
use crate::lyrics::util;

/// Secondary best-effort provider (megalobiz.com): scrape the search page for
/// the first lyric link, then pull the raw blob from the detail page. The
/// blob's format is undetermined; the caller classifies it.
#[derive(Debug, Clone)]
pub struct MegalobizProvider {
    search_url: String,
    base_url: String,
}

impl Default for MegalobizProvider {
    fn default() -> Self {
        Self {
            search_url: "https://www.megalobiz.com/search/all".to_string(),
            base_url: "https://www.megalobiz.com".to_string(),
        }
    }
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"href="(/lrc/maker/[^"]+)""#).expect("link regex"))
}

fn lyrics_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<span[^>]+id="lrc_[0-9]+_lyrics"[^>]*>(.+?)</span>"#)
            .expect("lyrics block regex")
    })
}

impl MegalobizProvider {
    pub fn with_base_url(search_url: &str, base_url: &str) -> Self {
        Self {
            search_url: search_url.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one raw text blob for artist + title, or `None` when the search
    /// page has no lyric link at all.
    pub async fn fetch_raw(
        &self,
        http: &Client,
        query: &LyricsQuery,
        timeout: Duration,
    ) -> Result<Option<String>, LyricsError> {
        let q = format!("{} - {}", query.artist, query.title);
        let resp = http
            .get(&self.search_url)
            .query(&[("qry", q.as_str())])
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = resp.bytes().await?;
        let html = String::from_utf8_lossy(&body);

        let Some(link) = link_re()
            .captures(&html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
        else {
            return Ok(None);
        };

        let url = if link.starts_with("http://") || link.starts_with("https://") {
            link
        } else {
            format!("{}{}", self.base_url, link)
        };

        let resp = http
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = resp.bytes().await?;
        let html = String::from_utf8_lossy(&body);

        let block = lyrics_block_re()
            .captures(&html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| LyricsError::Parse("megalobiz: missing lyric block".to_string()))?;

        let text = util::html_to_text(block);
        if text.trim().is_empty() {
            return Err(LyricsError::Parse("megalobiz: empty lyric block".to_string()));
        }
        Ok(Some(text))
    }
}
