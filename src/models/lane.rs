use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::models::attributes::Direction;
use crate::sensors::camera::PressureSource;

/// Identity of a lane. Lanes are compared by id, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneId(pub String);

impl LaneId {
    pub fn new(id: impl Into<String>) -> Self {
        LaneId(id.into())
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lane on which vehicles queue before entering the junction.
#[derive(Debug, Clone)]
pub struct InboundLane {
    pub id: LaneId,
    pub direction: Direction,
    /// Reports how many vehicles are waiting on this lane.
    pub camera: Arc<dyn PressureSource>,
}

impl InboundLane {
    pub fn new(id: impl Into<String>, direction: Direction, camera: Arc<dyn PressureSource>) -> Self {
        Self {
            id: LaneId::new(id),
            direction,
            camera,
        }
    }

    pub fn pressure(&self) -> u32 {
        self.camera.pressure()
    }
}

/// Lane on which vehicles leave the junction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLane {
    pub id: LaneId,
    pub direction: Direction,
    /// Whether a protected (arrow) turn may end on this lane.
    pub allows_conditional_turn: bool,
}

impl OutboundLane {
    pub fn new(id: impl Into<String>, direction: Direction, allows_conditional_turn: bool) -> Self {
        Self {
            id: LaneId::new(id),
            direction,
            allows_conditional_turn,
        }
    }
}

/// Pedestrian crossing. It only references the vehicle lanes it crosses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedestrianLane {
    pub id: LaneId,
    pub direction: Direction,
    crosses: HashSet<LaneId>,
}

impl PedestrianLane {
    pub fn new<I>(id: impl Into<String>, direction: Direction, crosses: I) -> Self
    where
        I: IntoIterator<Item = LaneId>,
    {
        Self {
            id: LaneId::new(id),
            direction,
            crosses: crosses.into_iter().collect(),
        }
    }

    pub fn crosses(&self, lane: &LaneId) -> bool {
        self.crosses.contains(lane)
    }

    pub fn crossing_lanes(&self) -> impl Iterator<Item = &LaneId> {
        self.crosses.iter()
    }
}
