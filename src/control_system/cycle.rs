use std::sync::Arc;

use log::info;

use crate::control_system::fanout::fan_out;
use crate::control_system::route::Route;
use crate::error::ControlError;

/// Group of routes released together.
#[derive(Debug)]
pub struct Cycle {
    id: String,
    routes: Vec<Arc<Route>>,
    green_time: u64,
}

impl Cycle {
    pub fn new(id: impl Into<String>, routes: Vec<Arc<Route>>, green_time: u64) -> Self {
        Self {
            id: id.into(),
            routes,
            green_time,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Green time used in fixed mode, in seconds.
    pub fn green_time(&self) -> u64 {
        self.green_time
    }

    /// Releases the through movements. Live arrows are stopped first, and
    /// only then are the other routes turned green.
    pub async fn allow_traffic(&self) {
        if self.conditional_traffic_live() {
            info!("Cycle {} stopping conditional routes before through traffic", self.id);
            self.stop_conditional().await;
        }
        let through = self.partition(false);
        fan_out(&through, |route| async move { route.allow_traffic().await }).await;
    }

    /// Stops every route of the cycle, arrows included.
    pub async fn stop_traffic(&self) {
        fan_out(&self.routes, |route| async move { route.stop_traffic().await }).await;
    }

    pub fn force_default(&self) {
        for route in &self.routes {
            route.force_default();
        }
    }

    /// Highest pressure among the member routes.
    pub fn current_pressure(&self) -> u32 {
        self.routes
            .iter()
            .map(|route| route.current_pressure())
            .max()
            .unwrap_or(0)
    }

    /// Shows the protected-turn arrows. Refused while any through movement
    /// of this cycle is green; no head is touched in that case.
    pub async fn allow_conditional(&self) -> Result<(), ControlError> {
        if self.through_traffic_live() {
            return Err(ControlError::ConditionalWhileThroughLive {
                cycle: self.id.clone(),
            });
        }
        let conditional = self.partition(true);
        fan_out(&conditional, |route| async move { route.allow_traffic().await }).await;
        Ok(())
    }

    pub async fn stop_conditional(&self) {
        let conditional = self.partition(true);
        fan_out(&conditional, |route| async move { route.stop_traffic().await }).await;
    }

    fn partition(&self, conditional: bool) -> Vec<Arc<Route>> {
        self.routes
            .iter()
            .filter(|route| route.is_conditional() == conditional)
            .cloned()
            .collect()
    }

    fn through_traffic_live(&self) -> bool {
        self.routes
            .iter()
            .any(|route| !route.is_conditional() && route.is_green())
    }

    fn conditional_traffic_live(&self) -> bool {
        self.routes
            .iter()
            .any(|route| route.is_conditional() && route.is_green())
    }
}

impl PartialEq for Cycle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Cycle {}
