//! Structural checks for a single route, run before any compatibility
//! between routes is computed.

use crate::control_system::route::Route;
use crate::error::ControlError;
use crate::models::attributes::RouteKind;
use crate::models::lane::OutboundLane;

pub fn validate_route(route: &Route) -> Result<(), ControlError> {
    if route.outbound().is_empty() {
        return Err(invalid(route, "Route must have at least one outbound lane"));
    }
    if route.heads().is_empty() {
        return Err(invalid(route, "Route must have at least one traffic light"));
    }

    match route.kind() {
        RouteKind::Through => validate_through(route),
        RouteKind::Isolated => validate_isolated(route),
        RouteKind::Conditional => validate_conditional(route),
    }
}

fn validate_through(route: &Route) -> Result<(), ControlError> {
    pedestrians_clear_of_inbound(route)?;
    if let Some(straight) = straight_lane(route) {
        if route
            .pedestrian_lanes()
            .iter()
            .any(|crossing| crossing.crosses(&straight.id))
        {
            return Err(invalid(route, "Pedestrian lane cannot cross the straight outbound lane"));
        }
    }
    Ok(())
}

fn validate_isolated(route: &Route) -> Result<(), ControlError> {
    pedestrians_clear_of_inbound(route)?;
    let crosses_outbound = route.pedestrian_lanes().iter().any(|crossing| {
        route
            .outbound()
            .iter()
            .any(|lane| crossing.crosses(&lane.id))
    });
    if crosses_outbound {
        return Err(invalid(route, "Pedestrian lane cannot cross the outbound lane"));
    }
    Ok(())
}

fn validate_conditional(route: &Route) -> Result<(), ControlError> {
    let [outbound] = route.outbound() else {
        return Err(invalid(route, "Conditional route must have exactly one outbound lane"));
    };
    if !outbound.allows_conditional_turn {
        return Err(invalid(
            route,
            "Conditional route must have an outbound lane that allows conditional turn",
        ));
    }
    if outbound.direction.same_axis(route.inbound().direction) {
        return Err(invalid(
            route,
            "Conditional route must have an outbound lane that is not in the same direction as the inbound lane",
        ));
    }
    Ok(())
}

fn pedestrians_clear_of_inbound(route: &Route) -> Result<(), ControlError> {
    let inbound = &route.inbound().id;
    if route
        .pedestrian_lanes()
        .iter()
        .any(|crossing| crossing.crosses(inbound))
    {
        return Err(invalid(route, "Pedestrian lane cannot cross the inbound lane"));
    }
    Ok(())
}

/// Outbound lane directly across the junction from the inbound lane.
fn straight_lane(route: &Route) -> Option<&OutboundLane> {
    let across = route.inbound().direction.opposite();
    route
        .outbound()
        .iter()
        .find(|lane| lane.direction == across)
}

fn invalid(route: &Route, reason: &str) -> ControlError {
    ControlError::InvalidRoute {
        route: route.id().to_string(),
        reason: reason.to_string(),
    }
}
