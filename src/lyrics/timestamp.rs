use std::sync::OnceLock;

use regex::Regex;

/// Bracketed LRC time tag: `[mm:ss.ff]` with a 1-2 digit minute field, a
/// 2 digit second field, and an optional 1-2 digit fraction separated by
/// `.` or `:`. Interior whitespace is tolerated because some providers emit
/// `[ 00:12.30 ]`.
pub fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\s*(\d{1,2}):(\d{2})(?:[.:](\d{1,2}))?\s*\]").expect("time tag regex")
    })
}

/// Parse one time tag into milliseconds. Returns `None` when the text does
/// not contain a tag; callers pass unmatched lines through untouched.
pub fn parse_token(token: &str) -> Option<u64> {
    let caps = token_re().captures(token)?;
    let minutes: u64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u64 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let frac: u64 = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some(ms_from_parts(minutes, seconds, frac))
}

/// The fraction is hundredths of a second, clamped to two digits.
pub fn ms_from_parts(minutes: u64, seconds: u64, frac: u64) -> u64 {
    minutes * 60_000 + seconds * 1_000 + frac.min(99) * 10
}

/// Canonical LRC rendering: `[mm:ss.ff]`, hundredth-second resolution.
pub fn format_lrc(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let hundredths = (ms / 10) % 100;
    format!("[{minutes:02}:{seconds:02}.{hundredths:02}]")
}

/// SubRip timecode: `hh:mm:ss,mmm`. Negative input clamps to zero.
pub fn format_srt(ms: i64) -> String {
    let mut ms = ms.max(0);
    let hours = ms / 3_600_000;
    ms %= 3_600_000;
    let minutes = ms / 60_000;
    ms %= 60_000;
    let seconds = ms / 1_000;
    ms %= 1_000;
    format!("{hours:02}:{minutes:02}:{seconds:02},{ms:03}")
}
