use crate::fetcher::{
    errors::FetchError,
    types::{Charset, SiteResponse},
};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{StatusCode, header::HeaderMap};
use url::Url;

/// How much of the body to inspect for a `<meta>` charset declaration.
const META_SNIFF_WINDOW: usize = 4096;

static HEADER_CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

// Matches both `<meta charset="x">` and the http-equiv Content-Type form,
// which also carries a `charset=` token inside its content attribute.
static META_CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;/>]+)"#).unwrap());

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<SiteResponse, FetchError> {
    let charset = sniff_charset(content_type, &body_bytes);
    let body_utf8 = decode_body(&body_bytes, &charset)?;

    Ok(SiteResponse {
        url_final,
        status,
        headers,
        body_raw: body_bytes,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    })
}

/// Charset precedence: Content-Type header, then a `<meta>` declaration in
/// the head of the body, then a chardetng guess over the sniff window.
fn sniff_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    if let Some(charset) = labeled_encoding(&HEADER_CHARSET_REGEX, content_type) {
        return charset;
    }

    let window = &body_bytes[..body_bytes.len().min(META_SNIFF_WINDOW)];
    let head = String::from_utf8_lossy(window);
    if let Some(charset) = labeled_encoding(&META_CHARSET_REGEX, &head) {
        return charset;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(window, false);
    Charset::from_encoding(detector.guess(None, true))
}

fn labeled_encoding(regex: &Regex, haystack: &str) -> Option<Charset> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes()).map(Charset::from_encoding)
}

fn decode_body(body_bytes: &[u8], charset: &Charset) -> Result<String, FetchError> {
    let encoding = charset.to_encoding();
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        return Err(FetchError::Charset(format!(
            "undecodable content for encoding {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}
