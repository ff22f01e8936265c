/*!
 * Tests for video reference resolution
 */

use dualsub::video_ref::{embed_url, resolve_id, watch_url};

#[test]
fn test_resolve_id_withBareId_shouldReturnId() {
    assert_eq!(resolve_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
    assert_eq!(resolve_id("  dQw4w9WgXcQ \n").as_deref(), Some("dQw4w9WgXcQ"));
}

#[test]
fn test_resolve_id_withShortLink_shouldUseFirstPathSegment() {
    assert_eq!(resolve_id("https://youtu.be/abc123").as_deref(), Some("abc123"));
    assert_eq!(resolve_id("https://youtu.be/abc123?t=42").as_deref(), Some("abc123"));
}

#[test]
fn test_resolve_id_withWatchUrl_shouldUseQueryParameter() {
    assert_eq!(resolve_id("https://www.youtube.com/watch?v=xyz789").as_deref(), Some("xyz789"));
    assert_eq!(
        resolve_id("https://www.youtube.com/watch?list=PL1&v=xyz789&t=10s").as_deref(),
        Some("xyz789")
    );
}

#[test]
fn test_resolve_id_withEmbedUrl_shouldUseLastPathSegment() {
    assert_eq!(resolve_id("https://www.youtube.com/embed/emb456").as_deref(), Some("emb456"));
    assert_eq!(resolve_id("https://www.youtube.com/shorts/sh0rt/").as_deref(), Some("sh0rt"));
}

#[test]
fn test_resolve_id_withUnparseableUrl_shouldFallBackToInput() {
    assert_eq!(
        resolve_id(" www.youtube.com/watch?v=abc ").as_deref(),
        Some("www.youtube.com/watch?v=abc")
    );
}

#[test]
fn test_resolve_id_withEmptyInput_shouldFail() {
    assert_eq!(resolve_id(""), None);
    assert_eq!(resolve_id("   "), None);
    assert_eq!(resolve_id("https://youtu.be/"), None);
    assert_eq!(resolve_id("https://www.youtube.com/watch?v="), None);
}

#[test]
fn test_player_urls_shouldEmbedId() {
    assert_eq!(watch_url("abc"), "https://www.youtube.com/watch?v=abc");
    assert_eq!(embed_url("abc"), "https://www.youtube.com/embed/abc");
}
