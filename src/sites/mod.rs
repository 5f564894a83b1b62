//! Static per-site lookup rules.
//!
//! Each supported dictionary site gets one immutable [`SiteRule`] describing
//! where its result fragment lives in the raw response: the query URL the
//! search term is appended to, the anchor string that co-occurs with the
//! result, and the enclosing delimiters that bound the fragment. The rules
//! are data; the slicing mechanism lives in [`crate::extractor`].

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RFC 3986 unreserved characters pass through; everything else is encoded.
const TERM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    Tureng,
    Tdk,
    Oxford,
    Nisanyan,
}

impl SiteId {
    pub fn name(&self) -> &'static str {
        match self {
            SiteId::Tureng => "tureng",
            SiteId::Tdk => "tdk",
            SiteId::Oxford => "oxford",
            SiteId::Nisanyan => "nisanyan",
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown site: {0}")]
pub struct UnknownSite(pub String);

impl FromStr for SiteId {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tureng" => Ok(SiteId::Tureng),
            "tdk" => Ok(SiteId::Tdk),
            "oxford" => Ok(SiteId::Oxford),
            "nisanyan" => Ok(SiteId::Nisanyan),
            other => Err(UnknownSite(other.to_string())),
        }
    }
}

/// Which occurrence of the anchor marks the result region. The direction
/// differs per site and reflects each site's markup, so it stays explicit
/// configuration rather than a derived rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorPick {
    First,
    Last,
}

/// How the fragment's end bound is located once its start is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentEnd {
    /// Nearest occurrence of the closing-tag marker at or after the start.
    /// The marker omits the final `>` so `</table >` still matches; the
    /// emitted fragment gets `marker + ">"` appended.
    ClosingTag(&'static str),
    /// The fragment ends at the last `open_tag` occurrence preceding this
    /// marker after the anchor. Nothing is appended.
    LastOpenBeforeMarker(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct SiteRule {
    pub id: SiteId,
    pub label: &'static str,
    /// URL prefix the percent-encoded search term is appended to.
    pub query_url: &'static str,
    /// Literal substring that reliably co-occurs with the result content.
    pub anchor: &'static str,
    pub anchor_pick: AnchorPick,
    /// Opening delimiter searched backward from the anchor, e.g. `"<table"`.
    pub open_tag: &'static str,
    pub end: FragmentEnd,
}

impl SiteRule {
    /// Full query URL for a search term.
    pub fn query_url_for(&self, term: &str) -> String {
        format!("{}{}", self.query_url, utf8_percent_encode(term, TERM_ENCODE_SET))
    }
}

static SITES: [SiteRule; 4] = [
    SiteRule {
        id: SiteId::Tureng,
        label: "Tureng",
        query_url: "https://tureng.com/en/turkish-english/",
        anchor: "englishResultsTable",
        anchor_pick: AnchorPick::First,
        open_tag: "<table",
        end: FragmentEnd::ClosingTag("</table"),
    },
    SiteRule {
        id: SiteId::Tdk,
        label: "TDK",
        query_url: "https://www.tdk.gov.tr/index.php?option=com_gts&arama=gts&kelime=",
        anchor: "hor-minimalist-a",
        anchor_pick: AnchorPick::First,
        open_tag: "<table",
        end: FragmentEnd::ClosingTag("</table"),
    },
    SiteRule {
        id: SiteId::Oxford,
        label: "Oxford",
        query_url: "https://www.oxforddictionaries.com/search/?direct=1&multi=1&dictCode=english&q=",
        anchor: "senseGroup",
        anchor_pick: AnchorPick::First,
        open_tag: "<section",
        end: FragmentEnd::ClosingTag("</section"),
    },
    // Nisanyan highlights the match deep inside the entry body; the entry
    // runs from the div before the last highlight up to the author byline.
    SiteRule {
        id: SiteId::Nisanyan,
        label: "Nisanyan",
        query_url: "https://www.nisanyansozluk.com/?k=",
        anchor: "hghlght2",
        anchor_pick: AnchorPick::Last,
        open_tag: "<div",
        end: FragmentEnd::LastOpenBeforeMarker("class=\"yaz"),
    },
];

pub fn all() -> &'static [SiteRule] {
    &SITES
}

pub fn by_id(id: SiteId) -> &'static SiteRule {
    SITES
        .iter()
        .find(|rule| rule.id == id)
        .expect("every SiteId has a builtin rule")
}
