pub mod panel;
pub mod service;

pub use panel::{PanelEntry, ResultsPanel};
pub use service::LookupService;
