#![no_main]

use libfuzzer_sys::fuzz_target;

use sozluk::extractor::slice;
use sozluk::sites::{AnchorPick, FragmentEnd, SiteId, SiteRule};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let body = String::from_utf8_lossy(data);

    let rules = [
        SiteRule {
            id: SiteId::Tureng,
            label: "fuzz",
            query_url: "https://example.com/",
            anchor: "englishResultsTable",
            anchor_pick: AnchorPick::First,
            open_tag: "<table",
            end: FragmentEnd::ClosingTag("</table"),
        },
        SiteRule {
            id: SiteId::Nisanyan,
            label: "fuzz",
            query_url: "https://example.com/?k=",
            anchor: "hghlght2",
            anchor_pick: AnchorPick::Last,
            open_tag: "<div",
            end: FragmentEnd::LastOpenBeforeMarker("class=\"yaz"),
        },
    ];

    // Slicing must never panic regardless of input
    for rule in &rules {
        let _ = slice(&body, rule);
    }
});
