use std::sync::OnceLock;

use regex::Regex;

use crate::lyrics::timestamp;

// Providers sometimes return a short stand-in blob instead of lyrics for
// vocal-free tracks. Detection is deliberately anchored: exact full-line
// markers or exact bare keywords on a short body, never substring hits.

const MAX_PLACEHOLDER_LEN: usize = 30;
const MAX_PLACEHOLDER_LINES: usize = 3;

fn full_marker_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(?im)^\s*\[instrumental\]\s*$",
            r"(?im)^\s*\[инструментал\]\s*$",
            r"(?i)\[au:\s*instrumental\]",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("full marker regex"))
        .collect()
    })
}

fn keyword_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(?i)^\s*instrumental\s*$",
            r"(?i)^\s*инструментал\s*$",
            r"(?i)^\s*instrumental\s+version\s*$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("keyword regex"))
        .collect()
    })
}

/// Decide whether `text` is an instrumental placeholder rather than lyrics.
pub fn is_placeholder(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    // Markers wrapped in LRC syntax still count, so check the raw text before
    // stripping time tags.
    if full_marker_res().iter().any(|re| re.is_match(text)) {
        return true;
    }

    let body = timestamp::token_re().replace_all(text, "");
    let body = body.trim();
    if body.is_empty() {
        // Pure timecodes: empty lyrics, not a placeholder marker.
        return false;
    }

    if body.chars().count() > MAX_PLACEHOLDER_LEN {
        return false;
    }
    let line_count = body.lines().filter(|l| !l.trim().is_empty()).count();
    if line_count > MAX_PLACEHOLDER_LINES {
        return false;
    }

    keyword_res().iter().any(|re| re.is_match(body))
}

/// Pre-screen on the track title itself: an "instrumental"-flavored title
/// with no vocal counter-marker means the search can be skipped entirely.
pub fn title_suggests_instrumental(title: &str) -> bool {
    const KEYWORDS: [&str; 5] = [
        "instrumental",
        "инструментал",
        "piano version",
        "orchestral",
        "acoustic",
    ];
    const VOCAL_MARKERS: [&str; 4] = ["feat", "vocals", "with", "sung"];

    let lower = title.to_lowercase();
    KEYWORDS.iter().any(|k| lower.contains(k)) && !VOCAL_MARKERS.iter().any(|m| lower.contains(m))
}
