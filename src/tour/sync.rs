//! Navigation synchronizer — gets the host onto the right page before a
//! step is considered displayable.
//!
//! The state machine advances immediately; what this module defers is
//! only the *display* of the new step. A step whose route differs from
//! the current one triggers a navigation first, and anchor resolution
//! starts only after that navigation settles. A missing anchor degrades
//! to a centered, anchorless view — the tour never blocks on the host's
//! rendering.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};

use crate::host::{AnchorResolver, Navigator, StepView};
use crate::tour::registry::{Placement, StepDescriptor};

/// How often the resolver is re-queried while waiting for a just-mounted
/// page to render the step's anchor.
const ANCHOR_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Couples step display to the host's router and anchor resolver.
pub struct NavigationSynchronizer {
    navigator: Arc<dyn Navigator>,
    resolver: Arc<dyn AnchorResolver>,
    anchor_settle: Duration,
}

impl NavigationSynchronizer {
    pub fn new(
        navigator: Arc<dyn Navigator>,
        resolver: Arc<dyn AnchorResolver>,
        anchor_settle: Duration,
    ) -> Self {
        Self {
            navigator,
            resolver,
            anchor_settle,
        }
    }

    /// Turn a step into its displayable form: navigate if the step lives
    /// on a different page, then resolve its anchor with a settle window.
    ///
    /// Never fails. Navigation errors and unresolvable anchors both fall
    /// back to a centered, anchorless view.
    pub async fn resolve(&self, step: &StepDescriptor, index: usize, total: usize) -> StepView {
        if let Some(route) = &step.route {
            let current = self.navigator.current_route().await;
            if *route != current {
                tracing::debug!(step = %step.id, from = %current, to = %route, "Navigating for step");
                if let Err(e) = self.navigator.navigate_to(route).await {
                    tracing::warn!(step = %step.id, "Navigation failed, showing step centered: {e}");
                    return Self::fallback(step, index, total);
                }
            }
        }

        let Some(selector) = &step.anchor else {
            // Full-screen step, nothing to resolve.
            return StepView {
                step: step.clone(),
                index,
                total,
                anchor: None,
                placement: step.placement,
            };
        };

        let deadline = Instant::now() + self.anchor_settle;
        loop {
            if let Some(anchor) = self.resolver.find_anchor(selector).await {
                return StepView {
                    step: step.clone(),
                    index,
                    total,
                    anchor: Some(anchor),
                    placement: step.placement,
                };
            }
            if Instant::now() >= deadline {
                tracing::warn!(
                    step = %step.id,
                    selector = %selector,
                    "Anchor not found after settle window, showing step centered"
                );
                return Self::fallback(step, index, total);
            }
            sleep(ANCHOR_POLL_INTERVAL).await;
        }
    }

    fn fallback(step: &StepDescriptor, index: usize, total: usize) -> StepView {
        StepView {
            step: step.clone(),
            index,
            total,
            anchor: None,
            placement: Placement::Center,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::error::NavigationError;
    use crate::host::{Anchor, RouteId};

    struct FakeRouter {
        current: Mutex<RouteId>,
        navigations: AtomicUsize,
        fail: bool,
    }

    impl FakeRouter {
        fn at(route: &str) -> Self {
            Self {
                current: Mutex::new(RouteId::new(route)),
                navigations: AtomicUsize::new(0),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl Navigator for FakeRouter {
        async fn current_route(&self) -> RouteId {
            self.current.lock().await.clone()
        }

        async fn navigate_to(&self, route: &RouteId) -> Result<(), NavigationError> {
            self.navigations.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NavigationError::Failed {
                    route: route.to_string(),
                    reason: "router offline".into(),
                });
            }
            *self.current.lock().await = route.clone();
            Ok(())
        }
    }

    /// Resolver that finds anchors only on the given route.
    struct RouteBoundResolver {
        router: Arc<FakeRouter>,
        anchored_route: RouteId,
    }

    #[async_trait]
    impl AnchorResolver for RouteBoundResolver {
        async fn find_anchor(&self, selector: &str) -> Option<Anchor> {
            let current = self.router.current.lock().await.clone();
            (current == self.anchored_route).then(|| Anchor::new(selector))
        }
    }

    struct NoAnchors;

    #[async_trait]
    impl AnchorResolver for NoAnchors {
        async fn find_anchor(&self, _selector: &str) -> Option<Anchor> {
            None
        }
    }

    fn upload_step() -> StepDescriptor {
        StepDescriptor::anchored(
            "upload",
            "Upload Page",
            "Ingest new light curve data.",
            "[data-tour=\"upload-link\"]",
            Placement::Bottom,
        )
        .on_route("upload")
    }

    #[tokio::test]
    async fn same_route_step_does_not_navigate() {
        let router = Arc::new(FakeRouter::at("upload"));
        let resolver = Arc::new(RouteBoundResolver {
            router: router.clone(),
            anchored_route: RouteId::new("upload"),
        });
        let sync = NavigationSynchronizer::new(
            router.clone(),
            resolver,
            Duration::from_millis(100),
        );

        let view = sync.resolve(&upload_step(), 1, 3).await;
        assert_eq!(router.navigations.load(Ordering::SeqCst), 0);
        assert!(view.anchor.is_some());
        assert_eq!(view.placement, Placement::Bottom);
    }

    #[tokio::test]
    async fn cross_route_step_navigates_before_resolving() {
        let router = Arc::new(FakeRouter::at("home"));
        let resolver = Arc::new(RouteBoundResolver {
            router: router.clone(),
            anchored_route: RouteId::new("upload"),
        });
        let sync = NavigationSynchronizer::new(
            router.clone(),
            resolver,
            Duration::from_millis(100),
        );

        let view = sync.resolve(&upload_step(), 1, 3).await;
        assert_eq!(router.navigations.load(Ordering::SeqCst), 1);
        assert_eq!(router.current.lock().await.as_str(), "upload");
        // Anchor resolved only after navigation landed on "upload"
        assert!(view.anchor.is_some());
    }

    #[tokio::test]
    async fn missing_anchor_falls_back_to_center() {
        let router = Arc::new(FakeRouter::at("upload"));
        let sync = NavigationSynchronizer::new(
            router,
            Arc::new(NoAnchors),
            Duration::from_millis(50),
        );

        let view = sync.resolve(&upload_step(), 1, 3).await;
        assert!(view.anchor.is_none());
        assert_eq!(view.placement, Placement::Center);
    }

    #[tokio::test]
    async fn navigation_failure_falls_back_to_center() {
        let router = Arc::new(FakeRouter {
            current: Mutex::new(RouteId::new("home")),
            navigations: AtomicUsize::new(0),
            fail: true,
        });
        let sync = NavigationSynchronizer::new(
            router,
            Arc::new(NoAnchors),
            Duration::from_millis(50),
        );

        let view = sync.resolve(&upload_step(), 1, 3).await;
        assert!(view.anchor.is_none());
        assert_eq!(view.placement, Placement::Center);
    }

    #[tokio::test]
    async fn fullscreen_step_skips_resolution() {
        let router = Arc::new(FakeRouter::at("home"));
        let sync = NavigationSynchronizer::new(
            router,
            Arc::new(NoAnchors),
            Duration::from_millis(50),
        );

        let step = StepDescriptor::fullscreen("welcome", "Welcome!", "Quick look around.");
        let view = sync.resolve(&step, 0, 3).await;
        assert!(view.anchor.is_none());
        assert_eq!(view.placement, Placement::Center);
    }
}
