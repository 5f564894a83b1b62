use crate::sites::{AnchorPick, FragmentEnd, SiteRule};

/// A slice of a response body bounded by structural delimiters.
///
/// `start`/`end` are byte offsets into the body the fragment was cut from.
/// The degraded flags record bound fallbacks: when no opening delimiter
/// precedes the anchor the fragment starts at the document start, and when
/// no end bound is found it runs to the end of the body. Such fragments are
/// best-effort garbage, not errors; callers decide what to do with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub html: String,
    pub start: usize,
    pub end: usize,
    pub degraded_start: bool,
    pub degraded_end: bool,
}

/// Cut the fragment described by `rule` out of a raw response body.
///
/// Returns `None` only when the anchor is absent. Never panics and never
/// allocates beyond the returned fragment; re-running on the same inputs
/// yields the same fragment.
pub fn slice(body: &str, rule: &SiteRule) -> Option<Fragment> {
    let anchor_at = match rule.anchor_pick {
        AnchorPick::First => body.find(rule.anchor),
        AnchorPick::Last => body.rfind(rule.anchor),
    }?;

    let (start, degraded_start) = match body[..anchor_at].rfind(rule.open_tag) {
        Some(at) => (at, false),
        None => (0, true),
    };

    let fragment = match rule.end {
        FragmentEnd::ClosingTag(marker) => match body[start..].find(marker) {
            Some(rel) => {
                let end = start + rel;
                let mut html = String::with_capacity(end - start + marker.len() + 1);
                html.push_str(&body[start..end]);
                html.push_str(marker);
                html.push('>');
                Fragment {
                    html,
                    start,
                    end,
                    degraded_start,
                    degraded_end: false,
                }
            }
            None => suffix_fragment(body, start, degraded_start),
        },
        FragmentEnd::LastOpenBeforeMarker(marker) => {
            // The stop marker is only meaningful after the anchor; the end
            // bound is the last open tag between the anchor and the marker.
            let end = body[anchor_at..].find(marker).and_then(|rel| {
                let stop = anchor_at + rel;
                body[anchor_at..stop]
                    .rfind(rule.open_tag)
                    .map(|open_rel| anchor_at + open_rel)
            });
            match end {
                Some(end) => Fragment {
                    html: body[start..end].to_string(),
                    start,
                    end,
                    degraded_start,
                    degraded_end: false,
                },
                None => suffix_fragment(body, start, degraded_start),
            }
        }
    };

    Some(fragment)
}

fn suffix_fragment(body: &str, start: usize, degraded_start: bool) -> Fragment {
    Fragment {
        html: body[start..].to_string(),
        start,
        end: body.len(),
        degraded_start,
        degraded_end: true,
    }
}
