use std::sync::Arc;

use crate::control_system::cycle::Cycle;
use crate::control_system::intersection_controller::IntersectionController;
use crate::control_system::route::Route;
use crate::control_system::signal_head::SignalHead;
use crate::error::ControlError;
use crate::models::attributes::Direction::{East, North, South, West};
use crate::models::attributes::{RouteKind, WorkingMode};
use crate::models::lane::{InboundLane, OutboundLane};
use crate::sensors::camera::RandomCamera;

/// Four-approach crossroads: one signal per approach, north/south and
/// east/west released in turn, empty approaches skipped.
pub fn create_demo_intersection() -> Result<IntersectionController, ControlError> {
    let camera = |id: &str| Arc::new(RandomCamera::new(id));

    let in_north = InboundLane::new("L1", North, camera("Cam1"));
    let in_south = InboundLane::new("L3", South, camera("Cam2"));
    let in_east = InboundLane::new("L5", East, camera("Cam3"));
    let in_west = InboundLane::new("L7", West, camera("Cam4"));

    let out_north = OutboundLane::new("L2", North, false);
    let out_south = OutboundLane::new("L4", South, false);
    let out_east = OutboundLane::new("L6", East, false);
    let out_west = OutboundLane::new("L8", West, false);

    let head = |id: &str| Arc::new(SignalHead::through(id));

    let r1 = Arc::new(Route::new(
        "R1",
        RouteKind::Through,
        in_north,
        vec![out_south.clone(), out_east.clone(), out_west.clone()],
        vec![head("TL1")],
    ));
    let r2 = Arc::new(Route::new(
        "R2",
        RouteKind::Through,
        in_south,
        vec![out_north.clone(), out_east.clone(), out_west.clone()],
        vec![head("TL2")],
    ));
    let r3 = Arc::new(Route::new(
        "R3",
        RouteKind::Through,
        in_east,
        vec![out_north.clone(), out_south.clone(), out_west],
        vec![head("TL3")],
    ));
    let r4 = Arc::new(Route::new(
        "R4",
        RouteKind::Through,
        in_west,
        vec![out_north, out_south, out_east],
        vec![head("TL4")],
    ));

    let c1 = Arc::new(Cycle::new("C1", vec![Arc::clone(&r1), Arc::clone(&r2)], 3));
    let c2 = Arc::new(Cycle::new("C2", vec![Arc::clone(&r3), Arc::clone(&r4)], 5));

    IntersectionController::new(
        "I1",
        "I1",
        vec![r1, r2, r3, r4],
        vec![c1, c2],
        WorkingMode::VariableSkipEmpty,
    )
}
