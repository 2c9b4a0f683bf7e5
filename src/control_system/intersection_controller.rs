use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::time::sleep;

use crate::config::ScheduleTimings;
use crate::control_system::compatibility::CompatibilityIndex;
use crate::control_system::cycle::Cycle;
use crate::control_system::route::Route;
use crate::control_system::route_validator::validate_route;
use crate::error::ControlError;
use crate::global_variables::{GREEN_SECS_PER_CAR, MINIMUM_GREEN_SECS, PRESSURE_THRESHOLD};
use crate::models::attributes::WorkingMode;

/// Result of one scheduling step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// `cycle` is now green and should stay so for `seconds`.
    Green { cycle: String, seconds: u64 },
    /// No cycle is left to schedule. Terminal.
    Exhausted,
}

impl Advance {
    pub fn green_seconds(&self) -> Option<u64> {
        match self {
            Advance::Green { seconds, .. } => Some(*seconds),
            Advance::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Advance::Exhausted)
    }
}

/// Green time for a cycle with `pressure` vehicles waiting.
pub fn compute_green_seconds(pressure: u32) -> u64 {
    if pressure > PRESSURE_THRESHOLD {
        MINIMUM_GREEN_SECS + u64::from(pressure) * GREEN_SECS_PER_CAR
    } else {
        MINIMUM_GREEN_SECS
    }
}

/// Right-of-way controller of a single intersection.
///
/// Owns the cycle queue and the current cycle. `advance` must be called
/// from one task at a time; it takes `&mut self` so the borrow checker
/// enforces that.
#[derive(Debug)]
pub struct IntersectionController {
    id: String,
    name: String,
    routes: Vec<Arc<Route>>,
    cycles: Vec<Arc<Cycle>>,
    compatibility: CompatibilityIndex,
    queue: VecDeque<Arc<Cycle>>,
    current: Option<Arc<Cycle>>,
    mode: WorkingMode,
    timings: ScheduleTimings,
    exhausted: bool,
}

impl IntersectionController {
    /// Validates every route and cycle and queues the cycles in order.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        routes: Vec<Arc<Route>>,
        cycles: Vec<Arc<Cycle>>,
        mode: WorkingMode,
    ) -> Result<Self, ControlError> {
        Self::with_timings(id, name, routes, cycles, mode, ScheduleTimings::default())
    }

    /// Like `new`, with explicit clearance and poll pauses. Head holds are
    /// part of each `SignalHead`.
    pub fn with_timings(
        id: impl Into<String>,
        name: impl Into<String>,
        routes: Vec<Arc<Route>>,
        cycles: Vec<Arc<Cycle>>,
        mode: WorkingMode,
        timings: ScheduleTimings,
    ) -> Result<Self, ControlError> {
        let name = name.into();
        if mode == WorkingMode::VariableSkipEmpty && timings.poll_interval_ms == 0 {
            return Err(ControlError::Config(
                "poll_interval_ms must be positive in variable_skip_empty mode".into(),
            ));
        }
        ensure_unique("route", routes.iter().map(|route| route.id()))?;
        ensure_unique("cycle", cycles.iter().map(|cycle| cycle.id()))?;
        for route in &routes {
            validate_route(route)?;
        }
        for cycle in &cycles {
            for route in cycle.routes() {
                if !routes.iter().any(|known| Arc::ptr_eq(known, route)) {
                    return Err(ControlError::UnknownReference {
                        kind: "route",
                        id: route.id().to_string(),
                    });
                }
            }
        }

        let compatibility = CompatibilityIndex::build(&routes);
        for cycle in &cycles {
            compatibility.validate_cycle(cycle)?;
        }
        if cycles.is_empty() {
            warn!("Intersection {} has no cycles to schedule", name);
        }

        let queue: VecDeque<Arc<Cycle>> = cycles.iter().cloned().collect();
        info!("Intersection {} initialized", name);
        info!("Numbers of cycles in queue: {}", queue.len());

        Ok(Self {
            id: id.into(),
            name,
            routes,
            cycles,
            compatibility,
            queue,
            current: None,
            mode,
            timings,
            exhausted: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> WorkingMode {
        self.mode
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    pub fn cycles(&self) -> &[Arc<Cycle>] {
        &self.cycles
    }

    pub fn compatibility(&self) -> &CompatibilityIndex {
        &self.compatibility
    }

    pub fn current_cycle(&self) -> Option<&Arc<Cycle>> {
        self.current.as_ref()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn queued_cycle_ids(&self) -> Vec<&str> {
        self.queue.iter().map(|cycle| cycle.id()).collect()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Ends the current cycle and starts the next one according to the
    /// working mode. Once `Exhausted` is returned every later call returns
    /// it again without touching the signals.
    pub async fn advance(&mut self) -> Advance {
        if self.exhausted {
            return Advance::Exhausted;
        }
        let stopped = self.stop_current_cycle().await;

        let next = match self.mode {
            WorkingMode::Fixed | WorkingMode::Variable => self.queue.pop_front(),
            WorkingMode::VariableSkipEmpty => self.next_non_empty(stopped.as_ref()).await,
        };
        let Some(cycle) = next else {
            info!("Intersection {} has no more cycles", self.name);
            self.exhausted = true;
            return Advance::Exhausted;
        };

        cycle.allow_traffic().await;
        info!("Intersection {} started cycle {}", self.name, cycle.id());
        let seconds = match self.mode {
            WorkingMode::Fixed => cycle.green_time(),
            WorkingMode::Variable | WorkingMode::VariableSkipEmpty => {
                compute_green_seconds(cycle.current_pressure())
            }
        };
        let id = cycle.id().to_string();
        self.current = Some(cycle);
        Advance::Green { cycle: id, seconds }
    }

    /// Puts every head of the intersection into its caution aspect.
    pub fn force_default(&self) {
        info!("Intersection {} set to default signal", self.name);
        for route in &self.routes {
            route.force_default();
        }
    }

    /// Stops the current cycle, requeues it and holds the clearance gap.
    async fn stop_current_cycle(&mut self) -> Option<Arc<Cycle>> {
        let cycle = self.current.take()?;
        cycle.stop_traffic().await;
        info!("Intersection {} ended cycle {}", self.name, cycle.id());
        self.queue.push_back(Arc::clone(&cycle));
        sleep(self.timings.clearance()).await;
        Some(cycle)
    }

    /// Rotates the queue until a cycle with waiting traffic, other than the
    /// one just stopped, comes up.
    async fn next_non_empty(&mut self, stopped: Option<&Arc<Cycle>>) -> Option<Arc<Cycle>> {
        let mut rejected_in_lap = 0;
        loop {
            let candidate = self.queue.pop_front()?;
            let pressure = candidate.current_pressure();
            let is_stopped = stopped.is_some_and(|s| Arc::ptr_eq(s, &candidate));
            // Liveness: with nothing else queued the stopped cycle may run
            // again instead of the queue stalling.
            let only_choice = is_stopped && self.queue.is_empty();
            if pressure > 0 && (!is_stopped || only_choice) {
                return Some(candidate);
            }

            debug!(
                "Intersection {} skipping cycle {} (pressure {})",
                self.name,
                candidate.id(),
                pressure
            );
            self.queue.push_back(candidate);
            rejected_in_lap += 1;
            if is_stopped || rejected_in_lap >= self.queue.len() {
                rejected_in_lap = 0;
                sleep(self.timings.poll_interval()).await;
            }
        }
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ControlError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ControlError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
