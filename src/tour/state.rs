//! Tour state machine — tracks status and the current step index.
//!
//! Pure and synchronous: transitions either succeed with a [`Transition`]
//! describing what happened, or are rejected with a [`TransitionError`].
//! Side effects (persistence, rendering, navigation) belong to the
//! manager, which acts on the returned `Transition`.

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;

/// Lifecycle status of the tour.
///
/// `Idle → (start) → Running → (advance×N) → Completed`;
/// `Running → (skip) → Skipped`; terminal states re-enter `Running` only
/// through an explicit `start`, and `reset` returns any state to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourStatus {
    Idle,
    Running,
    Completed,
    Skipped,
}

impl TourStatus {
    /// Whether the tour reached a terminal state (seen to the end or
    /// explicitly skipped). Terminal transitions are what persist the
    /// completion flag.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

impl Default for TourStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for TourStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The tour is (still) running and landed on this step index.
    MovedTo(usize),
    /// The tour reached a terminal status. The caller must write the
    /// persisted flag exactly once per such transition.
    Finished(TourStatus),
}

/// Mutable tour state. Single instance, owned by the orchestrator; the
/// render layer only observes it through status reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourState {
    pub status: TourStatus,
    /// Current step index. Meaningful only while `Running`.
    pub current_index: usize,
    step_count: usize,
}

impl TourState {
    /// New idle state for a registry of `step_count` steps.
    pub fn new(step_count: usize) -> Self {
        Self {
            status: TourStatus::Idle,
            current_index: 0,
            step_count,
        }
    }

    /// Begin a run from `Idle`, `Completed`, or `Skipped`. Resets the
    /// index to 0. Rejected while already `Running` so a double `start`
    /// cannot rewind an in-progress tour.
    pub fn start(&mut self) -> Result<Transition, TransitionError> {
        if self.status == TourStatus::Running {
            return Err(TransitionError::AlreadyRunning);
        }
        self.status = TourStatus::Running;
        self.current_index = 0;
        Ok(Transition::MovedTo(0))
    }

    /// Move to the next step, or to `Completed` from the last one.
    pub fn advance(&mut self) -> Result<Transition, TransitionError> {
        if self.status != TourStatus::Running {
            return Err(TransitionError::NotRunning {
                op: "advance",
                status: self.status.to_string(),
            });
        }
        if self.current_index + 1 >= self.step_count {
            self.status = TourStatus::Completed;
            return Ok(Transition::Finished(TourStatus::Completed));
        }
        self.current_index += 1;
        Ok(Transition::MovedTo(self.current_index))
    }

    /// Move back one step. Rejected at index 0.
    pub fn retreat(&mut self) -> Result<Transition, TransitionError> {
        if self.status != TourStatus::Running {
            return Err(TransitionError::NotRunning {
                op: "retreat",
                status: self.status.to_string(),
            });
        }
        if self.current_index == 0 {
            return Err(TransitionError::AtFirstStep);
        }
        self.current_index -= 1;
        Ok(Transition::MovedTo(self.current_index))
    }

    /// End the run early, regardless of index.
    pub fn skip(&mut self) -> Result<Transition, TransitionError> {
        if self.status != TourStatus::Running {
            return Err(TransitionError::NotRunning {
                op: "skip",
                status: self.status.to_string(),
            });
        }
        self.status = TourStatus::Skipped;
        Ok(Transition::Finished(TourStatus::Skipped))
    }

    /// Return to `Idle` from any state. Does not start a new run.
    pub fn reset(&mut self) {
        self.status = TourStatus::Idle;
        self.current_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_from_idle() {
        let mut state = TourState::new(3);
        assert_eq!(state.start().unwrap(), Transition::MovedTo(0));
        assert_eq!(state.status, TourStatus::Running);
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn start_while_running_rejected() {
        let mut state = TourState::new(3);
        state.start().unwrap();
        state.advance().unwrap();
        assert_eq!(state.start().unwrap_err(), TransitionError::AlreadyRunning);
        // Index untouched by the rejected start
        assert_eq!(state.current_index, 1);
    }

    #[test]
    fn advance_n_times_completes() {
        for n in 1..=5 {
            let mut state = TourState::new(n);
            state.start().unwrap();
            for i in 1..n {
                assert_eq!(state.advance().unwrap(), Transition::MovedTo(i));
            }
            assert_eq!(
                state.advance().unwrap(),
                Transition::Finished(TourStatus::Completed),
                "tour of {n} steps should complete on advance #{n}"
            );
            assert!(state.status.is_terminal());
        }
    }

    #[test]
    fn advance_outside_running_rejected() {
        let mut state = TourState::new(2);
        assert!(matches!(
            state.advance().unwrap_err(),
            TransitionError::NotRunning { op: "advance", .. }
        ));

        state.start().unwrap();
        state.advance().unwrap();
        state.advance().unwrap(); // completes
        assert!(state.advance().is_err());
    }

    #[test]
    fn retreat_decrements_by_one() {
        let mut state = TourState::new(4);
        state.start().unwrap();
        state.advance().unwrap();
        state.advance().unwrap();
        assert_eq!(state.retreat().unwrap(), Transition::MovedTo(1));
        assert_eq!(state.retreat().unwrap(), Transition::MovedTo(0));
    }

    #[test]
    fn retreat_at_first_step_rejected() {
        let mut state = TourState::new(4);
        state.start().unwrap();
        assert_eq!(state.retreat().unwrap_err(), TransitionError::AtFirstStep);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.status, TourStatus::Running);
    }

    #[test]
    fn skip_from_any_index() {
        for skip_at in 0..4 {
            let mut state = TourState::new(4);
            state.start().unwrap();
            for _ in 0..skip_at {
                state.advance().unwrap();
            }
            assert_eq!(
                state.skip().unwrap(),
                Transition::Finished(TourStatus::Skipped)
            );
            assert_eq!(state.status, TourStatus::Skipped);
        }
    }

    #[test]
    fn terminal_states_restartable() {
        let mut state = TourState::new(2);
        state.start().unwrap();
        state.skip().unwrap();
        assert_eq!(state.start().unwrap(), Transition::MovedTo(0));
        assert_eq!(state.status, TourStatus::Running);

        state.advance().unwrap();
        state.advance().unwrap();
        assert_eq!(state.status, TourStatus::Completed);
        assert_eq!(state.start().unwrap(), Transition::MovedTo(0));
    }

    #[test]
    fn reset_from_every_state() {
        let mut state = TourState::new(3);
        state.reset();
        assert_eq!(state.status, TourStatus::Idle);

        state.start().unwrap();
        state.advance().unwrap();
        state.reset();
        assert_eq!(state.status, TourStatus::Idle);
        assert_eq!(state.current_index, 0);

        state.start().unwrap();
        state.skip().unwrap();
        state.reset();
        assert_eq!(state.status, TourStatus::Idle);
    }

    #[test]
    fn status_serde_matches_display() {
        for status in [
            TourStatus::Idle,
            TourStatus::Running,
            TourStatus::Completed,
            TourStatus::Skipped,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
