pub mod attributes;
pub mod lane;

pub use attributes::{Direction, RouteKind, WorkingMode};
pub use lane::{InboundLane, LaneId, OutboundLane, PedestrianLane};
