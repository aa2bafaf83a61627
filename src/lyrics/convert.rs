use std::sync::OnceLock;

use regex::Regex;

use crate::lyrics::timestamp;

/// Minimum timestamped lines for a blob to count as synchronized. Below this
/// the tags are treated as noise and the whole text as plain lyrics.
const MIN_SYNCED_LINES: usize = 3;

const FIRST_CUE_MIN_SPAN_MS: u64 = 500;
const CUE_GAP_MS: u64 = 500;
const LAST_CUE_SPAN_MS: u64 = 4_000;

/// Display text substituted for cues whose line is nothing but time tags.
const EMPTY_CUE_GLYPH: &str = "♪";

/// One subtitle cue. Ordered by `start_ms` in any sequence this module emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

fn leading_tag_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:\[[^\]]*\]\s*)+").expect("leading tag regex"))
}

/// Decide whether a raw provider blob is synchronized, and produce both
/// renditions. Returns `(plain, Some(lrc))` for synced input and
/// `(trimmed_raw, None)` otherwise.
pub fn classify_and_normalize(raw: &str) -> (String, Option<String>) {
    let synced_lines = raw
        .lines()
        .filter(|l| timestamp::token_re().is_match(l))
        .count();

    if synced_lines >= MIN_SYNCED_LINES {
        let lrc = normalize_lrc(raw);
        let plain = lrc_to_plain(&lrc);
        (plain, Some(lrc))
    } else {
        (raw.trim().to_string(), None)
    }
}

/// Rewrite every time tag to canonical `[mm:ss.ff]` and drop blank lines at
/// both ends. Lines without a tag pass through untouched.
pub fn normalize_lrc(text: &str) -> String {
    let mut lines: Vec<String> = text
        .lines()
        .map(|line| {
            if timestamp::token_re().is_match(line) {
                timestamp::token_re()
                    .replace_all(line, |caps: &regex::Captures<'_>| {
                        match timestamp::parse_token(&caps[0]) {
                            Some(ms) => timestamp::format_lrc(ms),
                            None => caps[0].to_string(),
                        }
                    })
                    .into_owned()
            } else {
                line.to_string()
            }
        })
        .collect();

    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Strip the leading bracket-tag run from every line.
pub fn lrc_to_plain(lrc: &str) -> String {
    lrc.lines()
        .map(|line| leading_tag_run_re().replace(line, "").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Explode synchronized text into subtitle cues. A line may carry several
/// tags, meaning the same text repeats at each of those moments. End times
/// are inferred: stop half a second before the next cue starts but never
/// shorter than half a second, and give the last cue a four second tail.
pub fn to_subtitle_cues(synced: &str) -> Vec<Cue> {
    let mut starts: Vec<(u64, String)> = Vec::new();

    for line in synced.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let tags: Vec<u64> = timestamp::token_re()
            .find_iter(line)
            .filter_map(|m| timestamp::parse_token(m.as_str()))
            .collect();
        if tags.is_empty() {
            continue;
        }
        let text = timestamp::token_re().replace_all(line, "").trim().to_string();
        let text = if text.is_empty() {
            EMPTY_CUE_GLYPH.to_string()
        } else {
            text
        };
        for ms in tags {
            starts.push((ms, text.clone()));
        }
    }

    starts.sort_by_key(|(ms, _)| *ms);
    starts.dedup();

    let mut cues = Vec::with_capacity(starts.len());
    for (i, (start_ms, text)) in starts.iter().enumerate() {
        let end_ms = match starts.get(i + 1) {
            Some((next_start, _)) => {
                (start_ms + FIRST_CUE_MIN_SPAN_MS).max(next_start.saturating_sub(CUE_GAP_MS))
            }
            None => start_ms + LAST_CUE_SPAN_MS,
        };
        cues.push(Cue {
            start_ms: *start_ms,
            end_ms,
            text: text.clone(),
        });
    }
    cues
}

/// Render cues as SubRip text. Empty input renders to an empty string.
pub fn render_srt(cues: &[Cue]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(cues.len() * 4);
    for (idx, cue) in cues.iter().enumerate() {
        out.push((idx + 1).to_string());
        out.push(format!(
            "{} --> {}",
            timestamp::format_srt(cue.start_ms as i64),
            timestamp::format_srt(cue.end_ms as i64)
        ));
        out.push(cue.text.clone());
        out.push(String::new());
    }
    out.join("\n")
}

pub fn lrc_to_srt(lrc: &str) -> String {
    render_srt(&to_subtitle_cues(lrc))
}
