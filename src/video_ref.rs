use log::debug;
use url::Url;

// @module: Video reference resolution

// @const: Host of the short-link form, where the ID is the path
const SHORT_LINK_HOST: &str = "youtu.be";

// @const: Query parameter carrying the ID on watch pages
const VIDEO_QUERY_PARAM: &str = "v";

/// Turn free-form user input into a canonical video identifier.
///
/// Accepts a bare ID, a full watch URL, a short link or an embed URL.
/// Returns `None` when nothing usable is left after trimming.
pub fn resolve_id(input: &str) -> Option<String> {
    let trimmed = input.trim();

    if !input.contains("http") && !input.contains("www.") && !input.contains('/') {
        return non_empty(trimmed);
    }

    let url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(e) => {
            debug!("Input is not a parseable URL ({}), using it verbatim", e);
            return non_empty(trimmed);
        }
    };

    if url.host_str() == Some(SHORT_LINK_HOST) {
        let first = url.path_segments().and_then(|mut segments| segments.next());
        return first.and_then(non_empty);
    }

    if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == VIDEO_QUERY_PARAM) {
        return non_empty(&value);
    }

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .and_then(non_empty)
}

/// Watch-page URL for a canonical identifier
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Embeddable player URL for a canonical identifier
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
