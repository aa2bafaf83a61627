use lyrseek::lyrics::{convert, core, model};

fn usage() {
    eprintln!("lyrics search (lrclib + megalobiz fallback)");
    eprintln!("usage:");
    eprintln!("  cargo run --example lyrics_search -- \\");
    eprintln!("    --artist <ARTIST> --title <TITLE> [--album <ALBUM>] [--duration-secs <N>]");
    eprintln!("    [--timeout-ms <N>] [--no-fallback] [--srt]");
    eprintln!();
    eprintln!("examples:");
    eprintln!("  cargo run --example lyrics_search -- --artist \"Adele\" --title \"Hello\"");
    eprintln!("  cargo run --example lyrics_search -- --artist \"Zemfira\" --title \"Spasibo\" --srt");
}

fn has_flag(args: &[String], names: &[&str]) -> bool {
    args.iter().any(|a| names.iter().any(|n| *n == a))
}

fn get_flag_value(args: &[String], names: &[&str]) -> Option<String> {
    let mut i = 0;
    while i < args.len() {
        let a = args[i].as_str();
        if names.iter().any(|n| *n == a) && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
        i += 1;
    }
    None
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyrseek=debug".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if has_flag(&args, &["-h", "--help"]) {
        usage();
        return Ok(());
    }

    let artist = get_flag_value(&args, &["--artist"]).unwrap_or_default();
    let title = get_flag_value(&args, &["--title"]).unwrap_or_default();
    if artist.trim().is_empty() || title.trim().is_empty() {
        usage();
        std::process::exit(2);
    }

    let mut query = model::LyricsQuery::new(&artist, &title);
    query.album = get_flag_value(&args, &["--album"])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    query.duration_secs =
        get_flag_value(&args, &["--duration-secs", "--duration"]).and_then(|s| s.parse().ok());

    let mut opt = model::SearchOptions::default();
    if let Some(t) = get_flag_value(&args, &["--timeout-ms"]).and_then(|s| s.parse().ok()) {
        opt.timeout_ms = t;
    }
    if has_flag(&args, &["--no-fallback"]) {
        opt.fallback = None;
    }

    let result = core::search(&query, opt).await?;

    match (result.synced_text(), result.plain_text()) {
        (Some(lrc), _) => {
            eprintln!("OK: synchronized lyrics");
            if has_flag(&args, &["--srt"]) {
                println!("{}", convert::lrc_to_srt(lrc));
            } else {
                println!("{lrc}");
            }
        }
        (None, Some(plain)) => {
            eprintln!("OK: plain lyrics");
            println!("{plain}");
        }
        (None, None) => {
            eprintln!("no lyrics found for {} - {}", query.artist, query.title);
            std::process::exit(1);
        }
    }
    Ok(())
}
