use std::sync::OnceLock;

use regex::Regex;

use crate::lyrics::model::LyricsCandidate;

// The filter is intentionally asymmetric. Artist names vary across providers
// (transliteration, trailing whitespace, "feat." credits), so the artist test
// is tolerant. Title must match exactly or the result may belong to a
// different song entirely, which is worse than finding nothing.

/// Keep only candidates whose artist and title both match the target.
pub fn filter_strict(
    candidates: Vec<LyricsCandidate>,
    target_artist: &str,
    target_title: &str,
) -> Vec<LyricsCandidate> {
    let artist_norm = normalize(target_artist);
    let title_norm = normalize(target_title);
    let title_base = base_title(&title_norm);

    candidates
        .into_iter()
        .filter(|c| {
            artist_matches(&normalize(&c.artist_name), &artist_norm)
                && title_matches(&normalize(&c.track_name), &title_norm, &title_base)
        })
        .collect()
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Title with any parenthesized suffix removed: "Song (Live)" -> "Song".
fn base_title(normalized: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s*\([^)]*\)\s*").expect("paren regex"));
    re.replace_all(normalized, "").trim().to_string()
}

fn artist_matches(candidate: &str, target: &str) -> bool {
    if candidate == target || candidate.contains(target) || target.contains(candidate) {
        return true;
    }
    // Transliterated names tend to agree on the first few characters
    // (Земфира / Zemfira do not, but Zemfira / Zemfira Ramazanova do).
    let c4: Vec<char> = candidate.chars().take(4).collect();
    let t4: Vec<char> = target.chars().take(4).collect();
    c4.len() == 4 && t4.len() == 4 && c4 == t4
}

fn title_matches(candidate: &str, target: &str, target_base: &str) -> bool {
    if candidate == target {
        return true;
    }
    base_title(candidate) == *target_base
}
