//! Host application seams — the narrow interfaces through which the tour
//! orchestrator talks to the surrounding dashboard.
//!
//! The orchestrator never touches pages, charts, or widgets directly. It
//! navigates through a [`Navigator`], locates highlight targets through an
//! [`AnchorResolver`], and emits displayable steps to a [`StepRenderer`],
//! which reports user intent back. All three are implemented by the host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::tour::registry::{Placement, StepDescriptor};

/// Identifier of a navigable page in the host application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Opaque handle to a resolved highlight target. The orchestrator only
/// passes it through to the renderer; it never inspects the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor(String);

impl Anchor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What the user asked the tour to do, reported by the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserIntent {
    Next,
    Prev,
    Skip,
    Close,
}

/// A step in displayable form: descriptor plus progress position and the
/// resolved anchor (or the centered fallback when resolution failed).
#[derive(Debug, Clone)]
pub struct StepView {
    pub step: StepDescriptor,
    /// Zero-based position within the registry.
    pub index: usize,
    /// Total number of steps, for "Step 3 of 11" progress displays.
    pub total: usize,
    /// Resolved highlight target. `None` means full-screen placement.
    pub anchor: Option<Anchor>,
    /// Effective placement. May differ from the descriptor's hint when
    /// the anchor could not be resolved and the view fell back to center.
    pub placement: Placement,
}

/// Client-side router of the host application.
///
/// `navigate_to` resolves once the new route's content is mounted, so the
/// synchronizer can safely attempt anchor resolution afterwards.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn current_route(&self) -> RouteId;

    async fn navigate_to(&self, route: &RouteId) -> Result<(), NavigationError>;
}

/// Locates the DOM element (or host-equivalent) a step should highlight.
#[async_trait]
pub trait AnchorResolver: Send + Sync {
    /// Returns `None` when no element matches the selector yet.
    async fn find_anchor(&self, selector: &str) -> Option<Anchor>;
}

/// Render layer callback contract.
///
/// The orchestrator calls `show` for every displayable state and `dismiss`
/// when the tour ends. The renderer feeds user intent back through
/// [`crate::tour::TourManager::handle_intent`]; it never mutates tour
/// state directly.
#[async_trait]
pub trait StepRenderer: Send + Sync {
    async fn show(&self, view: StepView);

    async fn dismiss(&self);
}
