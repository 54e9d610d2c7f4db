use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

pub static HASHTAG_EXPR: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());
pub static PAGE_TITLE_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<title>(.*?)</title>").unwrap());

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Pulls the video id out of a user-supplied URL.
///
/// Recognized shapes: `youtu.be/<id>`, `<host>/watch?v=<id>`,
/// `<host>/embed/<id>` and `<host>/v/<id>`. Anything else passes through
/// verbatim, the returned id may not name a real video and downstream code
/// must tolerate that.
pub fn extract_video_id(input: &str) -> String {
    let Ok(url) = Url::parse(input) else {
        warn!("could not parse {input:?} as a URL, using it as the video id");
        return input.to_string();
    };

    if let Some(host) = url.host_str() {
        if host == "youtu.be" || host.ends_with(".youtu.be") {
            if let Some(id) = url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|id| !id.is_empty())
            {
                return id.to_string();
            }
        } else if url.path().starts_with("/watch") {
            if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "v") {
                return id.into_owned();
            }
        } else if url.path().starts_with("/embed/") || url.path().starts_with("/v/") {
            if let Some(id) = url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|id| !id.is_empty())
            {
                return id.to_string();
            }
        }
    }

    warn!("no video id found in {input:?}, using the input as is");
    input.to_string()
}

pub fn extract_hashtags(description: &str) -> Vec<String> {
    HASHTAG_EXPR
        .find_iter(description)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Renders a raw seconds count as `h:mm:ss`, hours unpadded.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Renders a count with thousands separators, e.g. `1,234,567`.
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
