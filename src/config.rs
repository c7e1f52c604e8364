//! Configuration types.

use std::time::Duration;

use crate::host::RouteId;

/// Tour orchestrator configuration.
#[derive(Debug, Clone)]
pub struct TourConfig {
    /// Storage key for the "seen" completion flag.
    pub storage_key: String,
    /// Route on which the first-visit auto-trigger is evaluated.
    pub entry_route: RouteId,
    /// Delay before an auto-triggered tour starts (lets the initial
    /// page paint finish first).
    pub auto_start_delay: Duration,
    /// How long the synchronizer waits for a step's anchor to appear
    /// after navigation settles, before falling back to a centered view.
    pub anchor_settle: Duration,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            storage_key: "exoseekr-tour-completed".to_string(),
            entry_route: RouteId::new("home"),
            auto_start_delay: Duration::from_millis(1500),
            anchor_settle: Duration::from_secs(2),
        }
    }
}
