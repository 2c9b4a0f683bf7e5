//! Pairwise right-of-way rule between two routes.
//!
//! `is_compatible(a, b)` answers whether `b` may be green while `a` is. The
//! relation is evaluated for an ordered pair and is not guaranteed to be
//! symmetric, so callers that need mutual exclusion check both orders.

use std::sync::LazyLock;

use crate::control_system::route::Route;
use crate::models::attributes::Direction::{self, East as E, North as N, South as S, West as W};
use crate::models::attributes::RouteKind;

const ANY: &[Direction] = &[N, E, S, W];

/// `(from_a, to_a, from_b, to_b...)`: every `to_b` listed is a movement from
/// `from_b` that does not cut across the movement `from_a -> to_a`.
#[rustfmt::skip]
const NON_CROSSING_TURNS: [(Direction, Direction, Direction, &[Direction]); 64] = [
    (S, N, S, ANY), (S, N, N, &[S, W]),    (S, N, E, &[E]),       (S, N, W, &[S, W]),
    (S, S, S, ANY), (S, S, N, &[E, W, N]), (S, S, E, &[E, W, N]), (S, S, W, &[E, W, N]),
    (S, E, S, ANY), (S, E, N, &[S, W, N]), (S, E, E, &[N, S, W]), (S, E, W, &[S, N, W]),
    (S, W, S, ANY), (S, W, N, &[N, E]),    (S, W, E, &[N, E]),    (S, W, W, &[S]),

    (N, S, S, &[N, E]),    (N, S, N, ANY), (N, S, E, &[N, E]),    (N, S, W, &[W]),
    (N, N, S, &[E, W, S]), (N, N, N, ANY), (N, N, E, &[E, W, S]), (N, N, W, &[E, W, S]),
    (N, E, S, &[S, W]),    (N, E, N, ANY), (N, E, E, &[N]),       (N, E, W, &[S, W]),
    (N, W, S, &[N, E, S]), (N, W, N, ANY), (N, W, E, &[N, S, E]), (N, W, W, &[E, N, S]),

    (E, S, S, &[E]),       (E, S, N, &[N, W]),    (E, S, E, ANY), (E, S, W, &[N, W]),
    (E, N, S, &[E, W, S]), (E, N, N, &[S, W, E]), (E, N, E, ANY), (E, N, W, &[S, E, W]),
    (E, E, S, &[N, W, S]), (E, E, N, &[N, W, S]), (E, E, E, ANY), (E, E, W, &[N, W, S]),
    (E, W, S, &[S, E]),    (E, W, N, &[N]),       (E, W, E, ANY), (E, W, W, &[E, S]),

    (W, S, S, &[W, N, E]), (W, S, N, &[W, N, E]), (W, S, E, &[W, N, E]), (W, S, W, ANY),
    (W, N, S, &[E, W]),    (W, N, N, &[W]),       (W, N, E, &[S, W]),    (W, N, W, ANY),
    (W, E, S, &[S]),       (W, E, N, &[N, W]),    (W, E, E, &[N, W]),    (W, E, W, ANY),
    (W, W, S, &[N, S, E]), (W, W, N, &[N, S, W]), (W, W, E, &[N, S, W]), (W, W, W, ANY),
];

type TurnTable = [[[[bool; 4]; 4]; 4]; 4];

// Entries missing from NON_CROSSING_TURNS stay `false`: unknown means crossing.
static TURN_TABLE: LazyLock<TurnTable> = LazyLock::new(|| {
    let mut table = [[[[false; 4]; 4]; 4]; 4];
    for (from_a, to_a, from_b, to_b_list) in NON_CROSSING_TURNS {
        for to_b in to_b_list {
            table[from_a.index()][to_a.index()][from_b.index()][to_b.index()] = true;
        }
    }
    table
});

/// True when the movement `from_b -> to_b` does not cut across `from_a -> to_a`.
pub fn turns_do_not_cross(from_a: Direction, to_a: Direction, from_b: Direction, to_b: Direction) -> bool {
    TURN_TABLE[from_a.index()][to_a.index()][from_b.index()][to_b.index()]
}

/// Decides whether route `b` may be green at the same time as route `a`.
pub fn is_compatible(a: &Route, b: &Route) -> bool {
    match (a.kind(), b.kind()) {
        (RouteKind::Through, RouteKind::Through) => {
            a.inbound().direction.same_axis(b.inbound().direction)
        }
        (RouteKind::Through, RouteKind::Isolated) => {
            geometry_clear(a, b)
                && pedestrians_clear_of_route(a, b)
                && pedestrians_clear_of_inbound(b, a)
        }
        (RouteKind::Through, RouteKind::Conditional) => true,
        // An isolated route is checked against every kind, in both directions.
        (RouteKind::Isolated, _) | (RouteKind::Conditional, RouteKind::Isolated) => {
            geometry_clear(a, b)
                && pedestrians_clear_of_route(b, a)
                && pedestrians_clear_of_route(a, b)
        }
        (RouteKind::Conditional, _) => true,
    }
}

/// No shared outbound lane and no crossing pair of turning movements.
fn geometry_clear(a: &Route, b: &Route) -> bool {
    outbound_lanes_disjoint(a, b) && directions_not_crossing(a, b)
}

fn outbound_lanes_disjoint(a: &Route, b: &Route) -> bool {
    a.outbound()
        .iter()
        .all(|lane_a| b.outbound().iter().all(|lane_b| lane_a.id != lane_b.id))
}

fn directions_not_crossing(a: &Route, b: &Route) -> bool {
    let from_a = a.inbound().direction;
    let from_b = b.inbound().direction;
    a.outbound().iter().all(|out_a| {
        b.outbound()
            .iter()
            .all(|out_b| turns_do_not_cross(from_a, out_a.direction, from_b, out_b.direction))
    })
}

/// None of `walker`'s pedestrian lanes cross `route`'s inbound lane.
fn pedestrians_clear_of_inbound(route: &Route, walker: &Route) -> bool {
    let inbound = &route.inbound().id;
    walker
        .pedestrian_lanes()
        .iter()
        .all(|crossing| !crossing.crosses(inbound))
}

/// None of `walker`'s pedestrian lanes cross any of `route`'s vehicle lanes.
fn pedestrians_clear_of_route(route: &Route, walker: &Route) -> bool {
    pedestrians_clear_of_inbound(route, walker)
        && walker.pedestrian_lanes().iter().all(|crossing| {
            route
                .outbound()
                .iter()
                .all(|lane| !crossing.crosses(&lane.id))
        })
}
