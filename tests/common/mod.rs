#![allow(dead_code)]

use std::sync::Arc;

use signal_controller::control_system::signal_head::{Lamp, Phase, SignalHead};
use signal_controller::control_system::Route;
use signal_controller::error::ActuatorError;
use signal_controller::models::{Direction, InboundLane, LaneId, OutboundLane, PedestrianLane, RouteKind};
use signal_controller::sensors::{FixedPressure, PressureSource};

/// Lamp that refuses every aspect except red.
#[derive(Debug)]
pub struct StuckRelay;

impl Lamp for StuckRelay {
    fn show(&self, head: &str, phase: Phase) -> Result<(), ActuatorError> {
        match phase {
            Phase::Red => Ok(()),
            _ => Err(ActuatorError {
                head: head.to_string(),
                phase,
                reason: "relay stuck".into(),
            }),
        }
    }
}

/// Builds a route whose lanes are private to it: `<id>-in` and
/// `<id>-out-<direction>`.
pub struct RouteBuilder {
    id: String,
    kind: RouteKind,
    from: Direction,
    to: Vec<Direction>,
    camera: Arc<dyn PressureSource>,
    heads: Vec<Arc<SignalHead>>,
    crossings: Vec<PedestrianLane>,
    conditional_turn: bool,
}

impl RouteBuilder {
    pub fn new(id: &str, kind: RouteKind, from: Direction, to: &[Direction]) -> Self {
        let head = match kind {
            RouteKind::Conditional => SignalHead::conditional_arrow(format!("{id}-head")),
            RouteKind::Through | RouteKind::Isolated => SignalHead::through(format!("{id}-head")),
        };
        Self {
            id: id.to_string(),
            kind,
            from,
            to: to.to_vec(),
            camera: Arc::new(FixedPressure::new(0)),
            heads: vec![Arc::new(head)],
            crossings: Vec::new(),
            conditional_turn: kind == RouteKind::Conditional,
        }
    }

    pub fn pressure(mut self, source: Arc<dyn PressureSource>) -> Self {
        self.camera = source;
        self
    }

    pub fn cars(self, cars: u32) -> Self {
        self.pressure(Arc::new(FixedPressure::new(cars)))
    }

    pub fn heads(mut self, heads: Vec<Arc<SignalHead>>) -> Self {
        self.heads = heads;
        self
    }

    /// Adds a pedestrian crossing over the given lanes.
    pub fn crossing(mut self, crossed: &[LaneId]) -> Self {
        let id = format!("{}-ped-{}", self.id, self.crossings.len());
        self.crossings
            .push(PedestrianLane::new(id, self.from, crossed.iter().cloned()));
        self
    }

    pub fn build(self) -> Route {
        let inbound = InboundLane::new(format!("{}-in", self.id), self.from, self.camera);
        let outbound = self
            .to
            .iter()
            .map(|dir| OutboundLane::new(out_id(&self.id, *dir).0, *dir, self.conditional_turn))
            .collect();
        Route::new(self.id, self.kind, inbound, outbound, self.heads).with_pedestrian_lanes(self.crossings)
    }

    pub fn arc(self) -> Arc<Route> {
        Arc::new(self.build())
    }
}

pub fn in_id(route: &str) -> LaneId {
    LaneId::new(format!("{route}-in"))
}

pub fn out_id(route: &str, dir: Direction) -> LaneId {
    LaneId::new(format!("{route}-out-{dir:?}"))
}

pub fn through(id: &str, from: Direction, to: &[Direction]) -> RouteBuilder {
    RouteBuilder::new(id, RouteKind::Through, from, to)
}

pub fn isolated(id: &str, from: Direction, to: &[Direction]) -> RouteBuilder {
    RouteBuilder::new(id, RouteKind::Isolated, from, to)
}

pub fn conditional(id: &str, from: Direction, to: Direction) -> RouteBuilder {
    RouteBuilder::new(id, RouteKind::Conditional, from, &[to])
}

pub fn phases(route: &Route) -> Vec<Phase> {
    route.heads().iter().map(|head| head.phase()).collect()
}
