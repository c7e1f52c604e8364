//! TourService — the process-wide control surface.
//!
//! A cloneable handle injected into whatever page chrome needs to
//! trigger the tour (help icons, menus), replacing ambient globals.
//! Also owns the first-visit auto-trigger: a delayed start scheduled
//! when the entry route mounts, cancelled if the page is torn down
//! before it fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::host::RouteId;
use crate::tour::manager::TourManager;

struct ServiceInner {
    manager: Arc<TourManager>,
    entry_route: RouteId,
    auto_start_delay: Duration,
    /// Pending auto-start timer, if one is scheduled.
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Control surface for the tour. Cheap to clone; all clones share one
/// orchestrator.
#[derive(Clone)]
pub struct TourService {
    inner: Arc<ServiceInner>,
}

impl TourService {
    /// Create the service. One instance per process; hand out clones.
    pub fn init(
        manager: Arc<TourManager>,
        entry_route: RouteId,
        auto_start_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                manager,
                entry_route,
                auto_start_delay,
                pending: Mutex::new(None),
            }),
        }
    }

    /// Start (or resume from a terminal state) and display the first step.
    pub async fn start_tour(&self) {
        self.inner.manager.start().await;
    }

    /// Clear the completion flag, then start from the beginning.
    pub async fn reset_and_start_tour(&self) {
        self.inner.manager.reset().await;
        self.inner.manager.start().await;
    }

    /// Clear the completion flag only. The tour returns to idle; the
    /// next visit to the entry route auto-triggers again.
    pub async fn clear_completion(&self) {
        self.inner.manager.reset().await;
    }

    /// First-visit auto-trigger, called once per page lifecycle when a
    /// route mounts. On the entry route, if the tour has never been
    /// seen, schedules a delayed start so it does not compete with the
    /// initial page paint.
    pub async fn on_route_mounted(&self, route: &RouteId) {
        if *route != self.inner.entry_route {
            return;
        }
        if self.inner.manager.seen().await {
            return;
        }

        let mut pending = self.inner.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let inner = self.inner.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.auto_start_delay).await;
            // Re-check: the flag may have been set (or a manual start
            // issued) while the timer was pending.
            if inner.manager.seen().await {
                return;
            }
            tracing::debug!("Auto-starting tour on first visit");
            inner.manager.start().await;
        }));
    }

    /// Cancel a scheduled auto-start when the entry route unmounts
    /// before the timer fires.
    pub async fn on_route_unmounted(&self) {
        if let Some(handle) = self.inner.pending.lock().await.take() {
            handle.abort();
            tracing::debug!("Cancelled scheduled tour auto-start");
        }
    }

    /// Tear down the service, cancelling any scheduled auto-start.
    pub async fn dispose(&self) {
        self.on_route_unmounted().await;
    }

    /// The orchestrator behind this surface, for render-layer wiring.
    pub fn manager(&self) -> Arc<TourManager> {
        self.inner.manager.clone()
    }
}
