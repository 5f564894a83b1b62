use ammonia::Builder;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

static HREF_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"href="([^"]+)""#).unwrap());
static SRC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"src="([^"]+)""#).unwrap());

/// Prepare an extracted fragment for display.
///
/// The fragment is third-party markup headed for a rendering surface, so
/// scripts, styles and event handlers are stripped with ammonia, and
/// relative `href`/`src` attributes are resolved against the page the
/// fragment was cut from. Unresolvable URLs are left untouched.
pub fn sanitize_fragment(html: &str, base_url: &Url) -> String {
    let clean = Builder::default().clean(html).to_string();
    let resolved = resolve_attr(&HREF_REGEX, "href", &clean, base_url);
    resolve_attr(&SRC_REGEX, "src", &resolved, base_url)
}

fn resolve_attr(regex: &Regex, attr: &str, html: &str, base_url: &Url) -> String {
    regex
        .replace_all(html, |caps: &Captures| match base_url.join(&caps[1]) {
            Ok(absolute) => format!(r#"{attr}="{absolute}""#),
            Err(_) => caps[0].to_string(),
        })
        .to_string()
}
