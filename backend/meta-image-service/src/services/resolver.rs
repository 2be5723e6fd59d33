//! Meta resolver - finds a page's social preview image
//!
//! `og:image` always wins over `twitter:image`; the second is consulted only when
//! the first `og:image` tag under `head` is missing or has a blank `content`.

use crate::models::ResolvedImageRef;
use scraper::{Html, Selector};

/// Selectors in precedence order
const IMAGE_META_SELECTORS: [&str; 2] = [
    r#"head > meta[property="og:image"]"#,
    r#"head > meta[property="twitter:image"]"#,
];

/// Extract the preview image URL from raw HTML.
///
/// Only the first tag of each kind is looked at. A blank first `og:image` moves
/// on to `twitter:image`, not to a later `og:image`.
/// Parsing is best effort; malformed markup only ever results in `None`.
pub fn resolve(html: &str) -> Option<ResolvedImageRef> {
    let document = Html::parse_document(html);

    IMAGE_META_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|selector| {
            let content = document
                .select(&selector)
                .next()?
                .value()
                .attr("content")?
                .trim();
            if content.is_empty() {
                return None;
            }
            Some(ResolvedImageRef {
                uri: content.to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(html: &str) -> Option<String> {
        resolve(html).map(|r| r.uri)
    }

    #[test]
    fn test_og_image_preferred_over_twitter() {
        let html = r#"<html><head>
            <meta property="twitter:image" content="https://x/twitter.jpg">
            <meta property="og:image" content="https://x/img.jpg">
        </head><body></body></html>"#;
        assert_eq!(uri(html).as_deref(), Some("https://x/img.jpg"));
    }

    #[test]
    fn test_first_og_image_wins() {
        let html = r#"<head>
            <meta property="og:image" content="https://x/first.jpg">
            <meta property="og:image" content="https://x/second.jpg">
        </head>"#;
        assert_eq!(uri(html).as_deref(), Some("https://x/first.jpg"));
    }

    #[test]
    fn test_twitter_image_fallback() {
        let html = r#"<head><meta property="twitter:image" content="  https://x/t.png  "></head>"#;
        assert_eq!(uri(html).as_deref(), Some("https://x/t.png"));
    }

    #[test]
    fn test_blank_og_image_falls_through() {
        let html = r#"<head>
            <meta property="og:image" content="   ">
            <meta property="og:image">
            <meta property="twitter:image" content="https://x/t.png">
        </head>"#;
        assert_eq!(uri(html).as_deref(), Some("https://x/t.png"));
    }

    #[test]
    fn test_later_og_image_not_used_after_blank_first() {
        let html = r#"<head>
            <meta property="og:image" content="">
            <meta property="og:image" content="https://x/second.jpg">
            <meta property="twitter:image" content="https://x/t.png">
        </head>"#;
        assert_eq!(uri(html).as_deref(), Some("https://x/t.png"));

        let html = r#"<head>
            <meta property="og:image">
            <meta property="og:image" content="https://x/second.jpg">
        </head>"#;
        assert_eq!(uri(html), None);
    }

    #[test]
    fn test_absent_when_nothing_usable() {
        assert_eq!(uri(""), None);
        assert_eq!(
            uri(r#"<head><meta property="og:image" content=""><meta property="twitter:image" content=" "></head>"#),
            None
        );
        assert_eq!(
            uri(r#"<head><meta name="og:title" content="Hello"></head>"#),
            None
        );
    }

    #[test]
    fn test_meta_outside_head_ignored() {
        let html = r#"<html><head><title>t</title></head>
            <body><div><meta property="og:image" content="https://x/body.jpg"></div></body></html>"#;
        assert_eq!(uri(html), None);
    }

    #[test]
    fn test_malformed_html_tolerated() {
        let html = r#"<html><head><meta property="og:image" content="https://x/ok.jpg"><title>unclosed"#;
        assert_eq!(uri(html).as_deref(), Some("https://x/ok.jpg"));
        assert_eq!(uri("<<<>>> not html at all &&&"), None);
    }
}
