//! Guided-onboarding tour — walks a first-time user through UI
//! call-outs spanning multiple dashboard pages.
//!
//! A single state machine owns step sequencing; the synchronizer keeps
//! step display in lockstep with page navigation; completion persists
//! across sessions through the flag store. The tour is advisory overlay
//! behavior: nothing in here may ever interrupt the host dashboard.

pub mod manager;
pub mod persist;
pub mod registry;
pub mod service;
pub mod state;
pub mod sync;

pub use manager::{TourManager, TourStatusReport};
pub use persist::CompletionFlag;
pub use registry::{Placement, StepDescriptor, StepRegistry};
pub use service::TourService;
pub use state::{TourState, TourStatus, Transition};
pub use sync::NavigationSynchronizer;
