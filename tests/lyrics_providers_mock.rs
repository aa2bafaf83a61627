use std::time::Duration;

use httpmock::Method::GET;
use httpmock::MockServer;
use lyrseek::lyrics::model::LyricsQuery;
use lyrseek::lyrics::providers::{LrcLibProvider, MegalobizProvider};

fn timeout() -> Duration {
    Duration::from_millis(1_000)
}

#[tokio::test]
async fn lrclib_get_exact_maps_record_and_treats_404_as_absent() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/get")
            .query_param("artist_name", "Adele")
            .query_param("track_name", "Hello")
            .query_param("duration", "296");
        then.status(200).body(
            r#"{"id":42,"trackName":"Hello","artistName":"Adele","plainLyrics":"Hello, it's me","syncedLyrics":null,"instrumental":false}"#,
        );
    });

    let p = LrcLibProvider::with_base_url(
        &format!("{}/api/get", server.base_url()),
        &format!("{}/api/search", server.base_url()),
    );
    let http = reqwest::Client::new();

    let mut query = LyricsQuery::new("Adele", "Hello");
    query.duration_secs = Some(296);
    let got = p.get_exact(&http, &query, timeout()).await.unwrap().unwrap();
    assert_eq!(got.provider_id.as_deref(), Some("42"));
    assert_eq!(got.plain_text.as_deref(), Some("Hello, it's me"));
    assert!(got.synced_text.is_none());
    assert_eq!(got.instrumental, Some(false));

    // Unknown signature: 404 is a miss, not an error.
    let server2 = MockServer::start();
    server2.mock(|when, then| {
        when.method(GET).path("/api/get");
        then.status(404).body(r#"{"statusCode":404,"name":"TrackNotFound"}"#);
    });
    let p2 = LrcLibProvider::with_base_url(
        &format!("{}/api/get", server2.base_url()),
        &format!("{}/api/search", server2.base_url()),
    );
    let got = p2.get_exact(&http, &query, timeout()).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn lrclib_get_exact_skips_request_without_duration() {
    // No server at all: the call must not go out.
    let p = LrcLibProvider::with_base_url("http://127.0.0.1:1/get", "http://127.0.0.1:1/search");
    let http = reqwest::Client::new();
    let query = LyricsQuery::new("Adele", "Hello");
    let got = p.get_exact(&http, &query, timeout()).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn lrclib_search_maps_records_and_blanks_empty_fields() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/search").query_param("q", "Adele Hello");
        then.status(200).body(
            r#"[
                {"id":1,"trackName":"Hello","artistName":"Adele","syncedLyrics":"[00:01.00]x","plainLyrics":"x"},
                {"id":2,"trackName":"Hello (Live)","artistName":"Adele","plainLyrics":"   "}
            ]"#,
        );
    });

    let p = LrcLibProvider::with_base_url(
        &format!("{}/api/get", server.base_url()),
        &format!("{}/api/search", server.base_url()),
    );
    let http = reqwest::Client::new();
    let got = p.search(&http, "Adele Hello", timeout()).await.unwrap();
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].synced_text.as_deref(), Some("[00:01.00]x"));
    assert!(
        got[1].plain_text.is_none(),
        "whitespace-only lyric fields are treated as absent"
    );
    assert!(!got[1].has_any_text());
}

#[tokio::test]
async fn megalobiz_scrapes_first_link_then_lyric_block() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/search/all")
            .query_param("qry", "Adele - Hello");
        then.status(200).body(
            r#"<html><a href="/lrc/maker/Adele+Hello.12345">hit</a>
               <a href="/lrc/maker/Other.99">second</a></html>"#,
        );
    });
    server.mock(|when, then| {
        when.method(GET).path("/lrc/maker/Adele+Hello.12345");
        then.status(200).body(
            r#"<div class="lyrics_details entity_more_info"><span id="lrc_12345_lyrics">[00:01.00]Hello&amp;<br/>[00:02.00]world</span></div>"#,
        );
    });

    let p = MegalobizProvider::with_base_url(
        &format!("{}/search/all", server.base_url()),
        &server.base_url(),
    );
    let http = reqwest::Client::new();
    let query = LyricsQuery::new("Adele", "Hello");
    let raw = p.fetch_raw(&http, &query, timeout()).await.unwrap().unwrap();
    assert!(raw.contains("[00:01.00]Hello&"));
    assert!(raw.contains("\n[00:02.00]world"));
}

#[tokio::test]
async fn megalobiz_no_link_is_a_miss() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search/all");
        then.status(200).body("<html>no results</html>");
    });

    let p = MegalobizProvider::with_base_url(
        &format!("{}/search/all", server.base_url()),
        &server.base_url(),
    );
    let http = reqwest::Client::new();
    let query = LyricsQuery::new("Nobody", "Nothing");
    let raw = p.fetch_raw(&http, &query, timeout()).await.unwrap();
    assert!(raw.is_none());
}
