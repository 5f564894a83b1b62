use std::time::Duration;

use sozluk::lookup::LookupService;
use sozluk::sites::{AnchorPick, FragmentEnd, SiteId, SiteRule};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// Rules carry 'static strings; pointing one at a mock server means leaking
// the URL, which is fine for a test process.
fn table_rule(base: &str, route: &str, id: SiteId) -> SiteRule {
    SiteRule {
        id,
        label: "mock",
        query_url: Box::leak(format!("{base}{route}").into_boxed_str()),
        anchor: "englishResultsTable",
        anchor_pick: AnchorPick::First,
        open_tag: "<table",
        end: FragmentEnd::ClosingTag("</table"),
    }
}

fn dictionary_page(entry: &str) -> String {
    format!(
        concat!(
            "<html><head><script>analytics()</script></head><body>",
            "<nav>header chrome</nav>",
            "<table id=\"englishResultsTable\"><tr><td>",
            "<a href=\"/en/turkish-english/{entry}\">{entry}</a>",
            "</td></tr></table>",
            "<footer>footer chrome</footer></body></html>",
        ),
        entry = entry
    )
}

#[tokio::test]
async fn lookup_publishes_sanitized_fragment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lookup/kitap"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(dictionary_page("book"))
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let service = LookupService::new(true);
    service.dispatch(
        "kitap",
        table_rule(&mock_server.uri(), "/lookup/", SiteId::Tureng),
    );
    service.wait_idle().await;

    let entry = service.panel().current().expect("panel should hold the fragment");
    assert_eq!(entry.site, SiteId::Tureng);
    assert_eq!(entry.term, "kitap");
    assert!(!entry.degraded);
    assert!(entry.html.contains("book"));
    // The slice is the results table, not the surrounding page chrome.
    assert!(!entry.html.contains("header chrome"));
    assert!(!entry.html.contains("footer chrome"));
    // Sanitized for display: no scripts, links resolved to the origin.
    assert!(!entry.html.contains("<script"));
    assert!(
        entry
            .html
            .contains(&format!("{}/en/turkish-english/book", mock_server.uri()))
    );
}

#[tokio::test]
async fn slowest_lookup_owns_the_panel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fast/kitap"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(dictionary_page("fast-result"))
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow/kitap"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(dictionary_page("slow-result"))
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let service = LookupService::new(true);
    service.dispatch(
        "kitap",
        table_rule(&mock_server.uri(), "/fast/", SiteId::Tureng),
    );
    service.dispatch(
        "kitap",
        table_rule(&mock_server.uri(), "/slow/", SiteId::Tdk),
    );
    service.wait_idle().await;

    // Last write wins: the delayed response overwrote the fast one.
    let entry = service.panel().current().unwrap();
    assert_eq!(entry.site, SiteId::Tdk);
    assert!(entry.html.contains("slow-result"));
}

#[tokio::test]
async fn missing_anchor_leaves_panel_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lookup/xyzzy"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>Aradığınız kelime bulunamadı.</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let service = LookupService::new(true);
    service.dispatch(
        "xyzzy",
        table_rule(&mock_server.uri(), "/lookup/", SiteId::Tureng),
    );
    service.wait_idle().await;

    assert!(service.panel().current().is_none());
}

#[tokio::test]
async fn subscribers_see_lookup_results_land() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lookup/defter"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(dictionary_page("notebook"))
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let service = LookupService::new(true);
    let mut rx = service.panel().subscribe();

    service.dispatch(
        "defter",
        table_rule(&mock_server.uri(), "/lookup/", SiteId::Tureng),
    );

    rx.changed().await.unwrap();
    let entry = rx.borrow().clone().unwrap();
    assert_eq!(entry.term, "defter");
    assert!(entry.html.contains("notebook"));

    service.wait_idle().await;
}
