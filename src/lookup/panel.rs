use crate::sites::SiteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// One rendered lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelEntry {
    pub site: SiteId,
    pub term: String,
    pub html: String,
    /// md5 of the fragment, for log correlation.
    pub checksum: String,
    /// The fragment's bounds fell back to the document start or end; the
    /// content is a best-effort slice.
    pub degraded: bool,
    pub rendered_at: DateTime<Utc>,
}

impl PanelEntry {
    pub fn new(site: SiteId, term: impl Into<String>, html: impl Into<String>, degraded: bool) -> Self {
        let html = html.into();
        let checksum = format!("{:x}", md5::compute(html.as_bytes()));
        Self {
            site,
            term: term.into(),
            html,
            checksum,
            degraded,
            rendered_at: Utc::now(),
        }
    }
}

/// The single display target lookups publish into.
///
/// Whichever lookup lands last owns the panel: writes overwrite
/// unconditionally, there is no merge and no ordering between sites.
/// Consumers read the current entry or subscribe for updates.
#[derive(Debug, Clone)]
pub struct ResultsPanel {
    tx: watch::Sender<Option<PanelEntry>>,
}

impl ResultsPanel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn publish(&self, entry: PanelEntry) {
        self.tx.send_replace(Some(entry));
    }

    pub fn current(&self) -> Option<PanelEntry> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<PanelEntry>> {
        self.tx.subscribe()
    }
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self::new()
    }
}
