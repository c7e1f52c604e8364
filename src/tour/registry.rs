//! Step registry — the ordered, immutable sequence of tour steps.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::host::RouteId;

/// Advisory placement hint for a step's call-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

/// A single tour step, defined once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// Stable identifier, unique within the registry.
    pub id: String,
    pub title: String,
    pub body: String,
    /// Locator for the element to highlight. `None` means full-screen
    /// placement with no anchor.
    pub anchor: Option<String>,
    pub placement: Placement,
    /// Page this step belongs to. `None` means "current page, no
    /// navigation required".
    pub route: Option<RouteId>,
}

impl StepDescriptor {
    /// Full-screen step with no anchor, centered.
    pub fn fullscreen(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            anchor: None,
            placement: Placement::Center,
            route: None,
        }
    }

    /// Step anchored to an element located by `selector`.
    pub fn anchored(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        selector: impl Into<String>,
        placement: Placement,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            anchor: Some(selector.into()),
            placement,
            route: None,
        }
    }

    /// Attach the route this step's anchor lives on.
    pub fn on_route(mut self, route: impl Into<RouteId>) -> Self {
        self.route = Some(route.into());
        self
    }
}

/// Ordered, immutable step sequence. Validated once at construction;
/// indices are stable for the lifetime of a running tour.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepDescriptor>,
}

impl StepRegistry {
    /// Build a registry, failing fast on an empty list, duplicate step
    /// ids, or a step routed to a page the host does not know.
    pub fn new(
        steps: Vec<StepDescriptor>,
        known_routes: &HashSet<RouteId>,
    ) -> Result<Self, ConfigError> {
        if steps.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(ConfigError::DuplicateStepId(step.id.clone()));
            }
            if let Some(route) = &step.route
                && !known_routes.contains(route)
            {
                return Err(ConfigError::UnknownRoute {
                    step_id: step.id.clone(),
                    route: route.to_string(),
                });
            }
        }

        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }
}
