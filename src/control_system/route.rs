use std::sync::Arc;

use log::error;

use crate::control_system::fanout::fan_out;
use crate::control_system::signal_head::SignalHead;
use crate::global_variables::DEFAULT_ROUTE_GREEN_SECS;
use crate::models::attributes::RouteKind;
use crate::models::lane::{InboundLane, OutboundLane, PedestrianLane};

/// One controlled movement: an inbound lane, where it may go, and the heads
/// that release it.
#[derive(Debug)]
pub struct Route {
    id: String,
    kind: RouteKind,
    inbound: InboundLane,
    outbound: Vec<OutboundLane>,
    pedestrian_lanes: Vec<PedestrianLane>,
    heads: Vec<Arc<SignalHead>>,
    green_time: u64,
}

impl Route {
    pub fn new(
        id: impl Into<String>,
        kind: RouteKind,
        inbound: InboundLane,
        outbound: Vec<OutboundLane>,
        heads: Vec<Arc<SignalHead>>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            inbound,
            outbound,
            pedestrian_lanes: Vec::new(),
            heads,
            green_time: DEFAULT_ROUTE_GREEN_SECS,
        }
    }

    /// Pedestrian crossings released together with this route.
    pub fn with_pedestrian_lanes(mut self, pedestrian_lanes: Vec<PedestrianLane>) -> Self {
        self.pedestrian_lanes = pedestrian_lanes;
        self
    }

    pub fn with_green_time(mut self, seconds: u64) -> Self {
        self.green_time = seconds;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn is_conditional(&self) -> bool {
        self.kind == RouteKind::Conditional
    }

    pub fn inbound(&self) -> &InboundLane {
        &self.inbound
    }

    pub fn outbound(&self) -> &[OutboundLane] {
        &self.outbound
    }

    pub fn pedestrian_lanes(&self) -> &[PedestrianLane] {
        &self.pedestrian_lanes
    }

    pub fn heads(&self) -> &[Arc<SignalHead>] {
        &self.heads
    }

    pub fn green_time(&self) -> u64 {
        self.green_time
    }

    /// Turns every head green concurrently and returns once all are done.
    pub async fn allow_traffic(&self) {
        fan_out(&self.heads, |head| async move {
            if let Err(e) = head.allow().await {
                error!("Failed to turn traffic light {} green: {}", head.id(), e);
            }
        })
        .await;
    }

    /// Turns every head red concurrently and returns once all are done.
    pub async fn stop_traffic(&self) {
        fan_out(&self.heads, |head| async move {
            if let Err(e) = head.stop().await {
                error!("Failed to turn traffic light {} red: {}", head.id(), e);
            }
        })
        .await;
    }

    pub fn force_default(&self) {
        for head in &self.heads {
            head.force_default();
        }
    }

    /// True only when every head shows green.
    pub fn is_green(&self) -> bool {
        self.heads.iter().all(|head| head.is_green())
    }

    pub fn current_pressure(&self) -> u32 {
        self.inbound.pressure()
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Route {}
