//! Video URL handling.
//!
//! `normalize_video_url` rewrites YouTube links typed into the insert-by-URL
//! dialog to their embed form. Vimeo links are left alone here; they are only
//! recognized when rendering, through `is_embed_host`.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Hosts whose video URLs render as an embeddable frame.
///
/// Subdomains match too (`www.youtube.com`, `m.youtube.com`).
pub const EMBED_HOSTS: &[&str] = &["youtube.com", "youtu.be", "player.vimeo.com"];

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([A-Za-z0-9_-]{11})").unwrap()
});

/// Rewrite `watch?v=ID`, `embed/ID` and `youtu.be/ID` links to
/// `https://www.youtube.com/embed/ID`. Anything else is returned unchanged.
pub fn normalize_video_url(url: &str) -> String {
    match YOUTUBE_ID_RE.captures(url).and_then(|caps| caps.get(1)) {
        Some(id) => format!("https://www.youtube.com/embed/{}", id.as_str()),
        None => url.to_owned(),
    }
}

/// Whether `src` points at a known video-sharing host.
///
/// Relative URLs and data URIs have no host and never match.
pub fn is_embed_host(src: &str) -> bool {
    let Ok(url) = Url::parse(src) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    EMBED_HOSTS.iter().any(|known| {
        host == *known
            || host
                .strip_suffix(known)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
