//! TourManager — coordinates the state machine, navigation, persistence,
//! and the render layer.
//!
//! Owns the single `TourState` instance. The render layer never mutates
//! state; it reports [`UserIntent`] and the manager runs the transition,
//! writes the completion flag on terminal transitions, and emits the
//! next displayable step.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::host::{StepRenderer, UserIntent};
use crate::tour::persist::CompletionFlag;
use crate::tour::registry::StepRegistry;
use crate::tour::state::{TourState, TourStatus, Transition};
use crate::tour::sync::NavigationSynchronizer;

/// Snapshot of the tour for observers (help menus, status endpoints).
#[derive(Debug, Clone, serde::Serialize)]
pub struct TourStatusReport {
    pub status: TourStatus,
    /// Step index, present only while running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    pub step_count: usize,
    /// Whether the persisted completion flag is set.
    pub seen: bool,
}

/// Coordinates one tour: step sequencing, cross-page sync, persistence.
pub struct TourManager {
    registry: StepRegistry,
    state: RwLock<TourState>,
    flag: CompletionFlag,
    sync: NavigationSynchronizer,
    renderer: Arc<dyn StepRenderer>,
}

impl TourManager {
    pub fn new(
        registry: StepRegistry,
        flag: CompletionFlag,
        sync: NavigationSynchronizer,
        renderer: Arc<dyn StepRenderer>,
    ) -> Self {
        let state = RwLock::new(TourState::new(registry.len()));
        Self {
            registry,
            state,
            flag,
            sync,
            renderer,
        }
    }

    /// Begin a run and display the first step. Idempotent while already
    /// running: the rejected transition is logged at debug and the
    /// in-progress tour keeps its index.
    pub async fn start(&self) {
        let transition = self.state.write().await.start();
        match transition {
            Ok(Transition::MovedTo(index)) => self.show_step(index).await,
            // start never yields Finished
            Ok(Transition::Finished(_)) => {}
            Err(e) => tracing::debug!("Ignoring start: {e}"),
        }
    }

    /// Map render-layer intent onto transitions. `Close` counts as a
    /// skip: the user dismissed the tour, so it should not reappear.
    pub async fn handle_intent(&self, intent: UserIntent) {
        match intent {
            UserIntent::Next => self.advance().await,
            UserIntent::Prev => self.retreat().await,
            UserIntent::Skip | UserIntent::Close => self.skip().await,
        }
    }

    /// Move to the next step, or finish the tour from the last one.
    pub async fn advance(&self) {
        let transition = self.state.write().await.advance();
        match transition {
            Ok(Transition::MovedTo(index)) => self.show_step(index).await,
            Ok(Transition::Finished(status)) => self.finish(status).await,
            Err(e) => tracing::debug!("Ignoring advance: {e}"),
        }
    }

    /// Move back one step. No-op at the first step.
    pub async fn retreat(&self) {
        let transition = self.state.write().await.retreat();
        match transition {
            Ok(Transition::MovedTo(index)) => self.show_step(index).await,
            // retreat never yields Finished
            Ok(Transition::Finished(_)) => {}
            Err(e) => tracing::debug!("Ignoring retreat: {e}"),
        }
    }

    /// End the run early. Persists the flag like a completion.
    pub async fn skip(&self) {
        let transition = self.state.write().await.skip();
        match transition {
            Ok(Transition::Finished(status)) => self.finish(status).await,
            // skip never moves the index
            Ok(Transition::MovedTo(_)) => {}
            Err(e) => tracing::debug!("Ignoring skip: {e}"),
        }
    }

    /// Clear the persisted flag and return to `Idle`. Dismisses the
    /// visible step if a run was in progress; does not start a new run.
    pub async fn reset(&self) {
        let was_running = {
            let mut state = self.state.write().await;
            let was_running = state.status == TourStatus::Running;
            state.reset();
            was_running
        };
        self.flag.clear().await;
        if was_running {
            self.renderer.dismiss().await;
        }
        tracing::info!("Tour reset to idle, completion flag cleared");
    }

    /// Whether the completion flag reads as set.
    pub async fn seen(&self) -> bool {
        self.flag.read().await
    }

    /// Current status snapshot.
    pub async fn status(&self) -> TourStatusReport {
        let state = self.state.read().await;
        TourStatusReport {
            status: state.status,
            current_index: (state.status == TourStatus::Running).then_some(state.current_index),
            step_count: self.registry.len(),
            seen: self.flag.read().await,
        }
    }

    async fn show_step(&self, index: usize) {
        // Index comes from the state machine, which is bounded by the
        // registry length, so the lookup cannot miss.
        let Some(step) = self.registry.get(index) else {
            tracing::warn!(index, "Step index out of range, not displaying");
            return;
        };
        let view = self.sync.resolve(step, index, self.registry.len()).await;
        self.renderer.show(view).await;
    }

    async fn finish(&self, status: TourStatus) {
        // Exactly one flag write per terminal transition: the state
        // machine only yields Finished on the Running → terminal edge.
        self.flag.write(true).await;
        self.renderer.dismiss().await;
        tracing::info!(%status, "Tour finished");
    }
}

// Tests for TourManager need stub Navigator/AnchorResolver/StepRenderer
// collaborators and live at the integration level (tests/tour_flow.rs).
// The pure transition logic is covered by the state module's tests.
