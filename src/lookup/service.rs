use crate::extractor;
use crate::fetcher;
use crate::lookup::panel::{PanelEntry, ResultsPanel};
use crate::sites::{self, SiteRule};
use tokio_util::task::TaskTracker;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// Dispatches fire-and-forget lookups and owns the shared results panel.
///
/// Each dispatch is an independent request with no ordering guarantee
/// against the others; whichever finishes last owns the panel. Failures
/// never propagate: a lookup that cannot produce a fragment logs why and
/// leaves the panel untouched.
pub struct LookupService {
    panel: ResultsPanel,
    sanitize: bool,
    tracker: TaskTracker,
}

impl LookupService {
    pub fn new(sanitize: bool) -> Self {
        Self {
            panel: ResultsPanel::new(),
            sanitize,
            tracker: TaskTracker::new(),
        }
    }

    pub fn panel(&self) -> &ResultsPanel {
        &self.panel
    }

    /// Fire one lookup against one site. Returns immediately; the result,
    /// if any, lands in the panel.
    pub fn dispatch(&self, term: &str, rule: SiteRule) {
        let term = term.to_string();
        let panel = self.panel.clone();
        let sanitize = self.sanitize;
        let lookup_id = Uuid::new_v4();
        let span = info_span!("lookup", %lookup_id, site = %rule.id, term = %term);
        self.tracker
            .spawn(run_lookup(term, rule, panel, sanitize).instrument(span));
    }

    /// Query every builtin site for the term.
    pub fn dispatch_all(&self, term: &str) {
        for rule in sites::all() {
            self.dispatch(term, *rule);
        }
    }

    /// Wait for in-flight lookups to drain. Shutdown only: the tracker is
    /// closed, so nothing can be dispatched afterwards.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}

async fn run_lookup(term: String, rule: SiteRule, panel: ResultsPanel, sanitize: bool) {
    let url = rule.query_url_for(&term);
    let resp = match fetcher::fetch(&url).await {
        Ok(resp) => resp,
        Err(err) => {
            warn!("lookup request failed: {err}");
            return;
        }
    };

    debug!(
        status = %resp.status,
        charset = ?resp.charset,
        bytes = resp.body_utf8.len(),
        "fetched {}",
        resp.url_final
    );

    let Some(fragment) = extractor::extract(&resp, &rule, sanitize) else {
        debug!("anchor {:?} not found in response", rule.anchor);
        return;
    };

    let degraded = fragment.degraded_start || fragment.degraded_end;
    if degraded {
        debug!(
            start = fragment.start,
            end = fragment.end,
            "fragment bounds degraded, publishing best-effort slice"
        );
    }

    let entry = PanelEntry::new(rule.id, term, fragment.html, degraded);
    info!(checksum = %entry.checksum, size = entry.html.len(), "publishing fragment");
    panel.publish(entry);
}
