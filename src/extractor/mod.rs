pub mod sanitize;
pub mod slicer;

pub use sanitize::sanitize_fragment;
pub use slicer::{Fragment, slice};

use crate::fetcher::types::SiteResponse;
use crate::sites::SiteRule;

/// Slice the rule's fragment out of a fetched page and, when requested,
/// sanitize it for display. After sanitation `Fragment::html` is the cleaned
/// markup while `start`/`end` still locate the raw slice in the body.
pub fn extract(resp: &SiteResponse, rule: &SiteRule, sanitize: bool) -> Option<Fragment> {
    let mut fragment = slicer::slice(&resp.body_utf8, rule)?;
    if sanitize {
        fragment.html = sanitize::sanitize_fragment(&fragment.html, &resp.url_final);
    }
    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::types::{Charset, SiteResponse};
    use crate::sites::{SiteId, by_id};
    use bytes::Bytes;
    use chrono::Utc;
    use reqwest::StatusCode;
    use reqwest::header::HeaderMap;
    use url::Url;

    fn response_for(html: &str, url: &str) -> SiteResponse {
        SiteResponse {
            url_final: Url::parse(url).unwrap(),
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body_raw: Bytes::from(html.to_string()),
            body_utf8: html.to_string(),
            charset: Charset::Utf8,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn extract_slices_and_sanitizes() {
        let html = concat!(
            "<html><body><nav>menu</nav>",
            "<table id=\"englishResultsTable\"><tr><td>",
            "<a href=\"/en/turkish-english/defter\">defter</a>",
            "<script>track()</script></td></tr></table></body></html>",
        );
        let resp = response_for(html, "https://tureng.com/en/turkish-english/kitap");
        let rule = by_id(SiteId::Tureng);

        let fragment = extract(&resp, rule, true).unwrap();
        assert!(fragment.html.contains("defter"));
        assert!(!fragment.html.contains("<script"));
        assert!(!fragment.html.contains("menu"));
        assert!(
            fragment
                .html
                .contains("https://tureng.com/en/turkish-english/defter")
        );
    }

    #[test]
    fn extract_without_sanitize_keeps_raw_slice() {
        let html = "<table id=\"englishResultsTable\"><td>kitap</td></table>";
        let resp = response_for(html, "https://tureng.com/en/turkish-english/kitap");
        let rule = by_id(SiteId::Tureng);

        let fragment = extract(&resp, rule, false).unwrap();
        assert_eq!(fragment.html, html);
    }

    #[test]
    fn extract_is_none_when_anchor_missing() {
        let resp = response_for(
            "<html><body>no results today</body></html>",
            "https://tureng.com/en/turkish-english/xyzzy",
        );
        assert!(extract(&resp, by_id(SiteId::Tureng), true).is_none());
    }
}
