use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::control_system::conflict::is_compatible;
use crate::control_system::cycle::Cycle;
use crate::control_system::route::Route;
use crate::error::ControlError;

/// For every route, the ids of the routes that may be green alongside it.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityIndex {
    compatible: HashMap<String, HashSet<String>>,
}

impl CompatibilityIndex {
    pub fn build(routes: &[Arc<Route>]) -> Self {
        let compatible = routes
            .iter()
            .map(|route| {
                let partners = routes
                    .iter()
                    .filter(|other| other.id() != route.id() && is_compatible(route, other))
                    .map(|other| other.id().to_string())
                    .collect();
                (route.id().to_string(), partners)
            })
            .collect();
        Self { compatible }
    }

    /// Whether `other` may be green while `route` is.
    pub fn allows(&self, route: &str, other: &str) -> bool {
        route == other
            || self
                .compatible
                .get(route)
                .is_some_and(|partners| partners.contains(other))
    }

    /// Both orders of the pair are allowed.
    pub fn mutually_compatible(&self, a: &str, b: &str) -> bool {
        self.allows(a, b) && self.allows(b, a)
    }

    pub fn compatible_with(&self, route: &str) -> Option<&HashSet<String>> {
        self.compatible.get(route)
    }

    /// Every pair of routes in the cycle must be allowed in both orders.
    pub fn validate_cycle(&self, cycle: &Cycle) -> Result<(), ControlError> {
        let routes = cycle.routes();
        if routes.is_empty() {
            return Err(ControlError::EmptyCycle {
                cycle: cycle.id().to_string(),
            });
        }
        for (i, a) in routes.iter().enumerate() {
            for b in &routes[i + 1..] {
                if !self.mutually_compatible(a.id(), b.id()) {
                    return Err(ControlError::IncompatibleCycle {
                        cycle: cycle.id().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.compatible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compatible.is_empty()
    }
}
