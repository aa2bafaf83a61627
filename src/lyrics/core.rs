use std::collections::HashSet;
use std::time::Duration;

use crate::lyrics::convert;
use crate::lyrics::error::LyricsError;
use crate::lyrics::instrumental;
use crate::lyrics::match_filter;
use crate::lyrics::model::{LyricsCandidate, LyricsQuery, SearchOptions, SearchResult};
use crate::lyrics::providers::LrcLibProvider;
use crate::lyrics::timestamp;

/// Run the whole search pipeline with a freshly built HTTP client.
pub async fn search(query: &LyricsQuery, opt: SearchOptions) -> Result<SearchResult, LyricsError> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("lyrseek/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(search_with_http(&http, query, &opt).await)
}

/// Pipeline entry for callers that share a client. Infallible by design:
/// provider trouble degrades to "nothing found", never to an error.
pub async fn search_with_http(
    http: &reqwest::Client,
    query: &LyricsQuery,
    opt: &SearchOptions,
) -> SearchResult {
    let timeout = Duration::from_millis(opt.timeout_ms.max(1));

    if instrumental::title_suggests_instrumental(&query.title) {
        tracing::info!(title = %query.title, "instrumental-looking title, skipping lyric search");
        return SearchResult::none();
    }

    let candidates = search_candidates(http, &opt.lrclib, query, timeout).await;
    if !candidates.is_empty() {
        tracing::debug!(count = candidates.len(), "aggregated candidates");

        let filtered = match_filter::filter_strict(candidates, &query.artist, &query.title);
        if filtered.is_empty() {
            // Results exist but none is this song. Broadening the search from
            // here would only surface more of the same mismatches.
            tracing::warn!(
                artist = %query.artist,
                title = %query.title,
                "no candidate survived strict matching"
            );
            return SearchResult::none();
        }
        let picked = select(&filtered);
        if !picked.is_empty() {
            return picked;
        }
    }

    if let Some(fallback) = &opt.fallback {
        let raw = tokio::time::timeout(timeout, fallback.fetch_raw(http, query, timeout)).await;
        match raw {
            Ok(Ok(Some(raw))) => {
                if instrumental::is_placeholder(&raw) {
                    tracing::info!("fallback returned an instrumental placeholder");
                    return SearchResult::none();
                }
                let (plain, synced) = convert::classify_and_normalize(&raw);
                return match synced {
                    Some(lrc) => SearchResult::synced(plain, lrc),
                    None if !plain.is_empty() => SearchResult::plain(plain),
                    None => SearchResult::none(),
                };
            }
            Ok(Ok(None)) => tracing::debug!("fallback provider had no hit"),
            Ok(Err(e)) => tracing::debug!(error = %e, "fallback provider failed"),
            Err(_) => tracing::debug!("fallback provider timed out"),
        }
    }

    tracing::warn!(artist = %query.artist, title = %query.title, "lyrics not found");
    SearchResult::none()
}

/// Query the structured provider with every variant and merge the results.
/// Discovery order is preserved: the exact-get record first, then broad
/// results in variant-priority order, deduplicated by provider id. Each
/// variant failure is logged and swallowed.
pub async fn search_candidates(
    http: &reqwest::Client,
    provider: &LrcLibProvider,
    query: &LyricsQuery,
    timeout: Duration,
) -> Vec<LyricsCandidate> {
    let mut out: Vec<LyricsCandidate> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    match tokio::time::timeout(timeout, provider.get_exact(http, query, timeout)).await {
        Ok(Ok(Some(candidate))) => {
            if let Some(id) = &candidate.provider_id {
                seen.insert(id.clone());
            }
            out.push(candidate);
        }
        Ok(Ok(None)) => {}
        Ok(Err(e)) => tracing::debug!(error = %e, "exact lookup failed"),
        Err(_) => tracing::debug!("exact lookup timed out"),
    }

    for q in query_variants(query) {
        match tokio::time::timeout(timeout, provider.search(http, &q, timeout)).await {
            Ok(Ok(items)) => {
                tracing::debug!(query = %q, count = items.len(), "search variant returned");
                for item in items {
                    match &item.provider_id {
                        Some(id) if seen.contains(id) => continue,
                        Some(id) => {
                            seen.insert(id.clone());
                        }
                        None => {}
                    }
                    out.push(item);
                }
            }
            Ok(Err(e)) => tracing::debug!(query = %q, error = %e, "search variant failed"),
            Err(_) => tracing::debug!(query = %q, "search variant timed out"),
        }
    }

    out
}

/// Free-text query strings in priority order: artist+title+album when the
/// album is known, then artist+title, then the bare title (covers providers
/// that spell the artist differently).
fn query_variants(query: &LyricsQuery) -> Vec<String> {
    let mut variants = Vec::with_capacity(3);
    if let Some(album) = query.album.as_deref().filter(|a| !a.trim().is_empty()) {
        variants.push(format!("{} {} {}", query.artist, query.title, album));
    }
    variants.push(format!("{} {}", query.artist, query.title));
    variants.push(query.title.clone());
    variants
}

/// Two-pass priority: first candidate with usable synchronized text wins;
/// only when no candidate has one does plain text get a turn.
fn select(filtered: &[LyricsCandidate]) -> SearchResult {
    for candidate in filtered {
        if candidate.instrumental == Some(true) {
            continue;
        }
        let Some(synced) = candidate.synced_text.as_deref().filter(|s| !s.trim().is_empty())
        else {
            continue;
        };
        if instrumental::is_placeholder(synced) {
            tracing::debug!("skipping placeholder synced candidate");
            continue;
        }
        // Guard against mislabeled data: a "synced" field with no time tags.
        if !timestamp::token_re().is_match(synced) {
            continue;
        }
        let (plain, lrc) = convert::classify_and_normalize(synced);
        if let Some(lrc) = lrc {
            return SearchResult::synced(plain, lrc);
        }
    }

    for candidate in filtered {
        if candidate.instrumental == Some(true) {
            continue;
        }
        let Some(plain) = candidate.plain_text.as_deref().filter(|s| !s.trim().is_empty())
        else {
            continue;
        };
        if instrumental::is_placeholder(plain) {
            tracing::debug!("skipping placeholder plain candidate");
            continue;
        }
        return SearchResult::plain(plain.trim().to_string());
    }

    SearchResult::none()
}
