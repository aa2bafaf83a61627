//! Lyrics acquisition for downloaded tracks: multi-variant search against
//! lrclib with strict artist/title filtering, a scrape-based fallback
//! provider, and conversion between LRC and plain/SubRip representations.

pub mod lyrics;
