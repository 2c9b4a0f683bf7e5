//! JSON description of an intersection and its conversion into a
//! validated controller.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::Timings;
use crate::control_system::cycle::Cycle;
use crate::control_system::intersection_controller::IntersectionController;
use crate::control_system::route::Route;
use crate::control_system::signal_head::{HeadKind, SignalHead};
use crate::error::ControlError;
use crate::models::attributes::{Direction, RouteKind, WorkingMode};
use crate::models::lane::{InboundLane, LaneId, OutboundLane, PedestrianLane};
use crate::sensors::camera::{FixedPressure, PressureSource, RandomCamera};

#[derive(Debug, Clone, Deserialize)]
pub struct TopologyConfig {
    pub id: String,
    pub name: String,
    #[serde(default = "default_mode")]
    pub mode: WorkingMode,
    #[serde(default)]
    pub timings: Timings,
    pub inbound_lanes: Vec<InboundLaneConfig>,
    pub outbound_lanes: Vec<OutboundLaneConfig>,
    #[serde(default)]
    pub pedestrian_lanes: Vec<PedestrianLaneConfig>,
    pub heads: Vec<HeadConfig>,
    pub routes: Vec<RouteConfig>,
    pub cycles: Vec<CycleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundLaneConfig {
    pub id: String,
    pub direction: Direction,
    #[serde(default)]
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CameraConfig {
    #[default]
    Random,
    Fixed {
        cars: u32,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutboundLaneConfig {
    pub id: String,
    pub direction: Direction,
    #[serde(default)]
    pub allows_conditional_turn: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PedestrianLaneConfig {
    pub id: String,
    pub direction: Direction,
    pub crosses: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadConfig {
    pub id: String,
    pub kind: HeadKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    pub id: String,
    pub kind: RouteKind,
    pub inbound: String,
    pub outbound: Vec<String>,
    pub heads: Vec<String>,
    #[serde(default)]
    pub pedestrian_lanes: Vec<String>,
    pub green_time: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CycleConfig {
    pub id: String,
    pub routes: Vec<String>,
    pub green_time: u64,
}

fn default_mode() -> WorkingMode {
    WorkingMode::VariableSkipEmpty
}

impl TopologyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ControlError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ControlError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Resolves every id reference and hands the result to
    /// `IntersectionController`, which runs its own validation.
    pub fn build(&self) -> Result<IntersectionController, ControlError> {
        if let Some(cycle) = self.cycles.iter().find(|cycle| cycle.green_time == 0) {
            if self.mode == WorkingMode::Fixed {
                return Err(ControlError::Config(format!(
                    "cycle {} needs a green time in fixed mode",
                    cycle.id
                )));
            }
        }
        let inbound = index("lane", &self.inbound_lanes, |lane| &lane.id, |lane| {
            let camera: Arc<dyn PressureSource> = match lane.camera {
                CameraConfig::Random => Arc::new(RandomCamera::new(format!("Cam-{}", lane.id))),
                CameraConfig::Fixed { cars } => Arc::new(FixedPressure::new(cars)),
            };
            InboundLane::new(lane.id.clone(), lane.direction, camera)
        })?;
        let outbound = index("lane", &self.outbound_lanes, |lane| &lane.id, |lane| {
            OutboundLane::new(lane.id.clone(), lane.direction, lane.allows_conditional_turn)
        })?;
        if let Some(lane) = self.outbound_lanes.iter().find(|lane| inbound.contains_key(&lane.id)) {
            return Err(ControlError::DuplicateId {
                kind: "lane",
                id: lane.id.clone(),
            });
        }

        let mut pedestrian = HashMap::new();
        for lane in &self.pedestrian_lanes {
            if inbound.contains_key(&lane.id) || outbound.contains_key(&lane.id) {
                return Err(ControlError::DuplicateId {
                    kind: "lane",
                    id: lane.id.clone(),
                });
            }
            for crossed in &lane.crosses {
                if !inbound.contains_key(crossed) && !outbound.contains_key(crossed) {
                    return Err(unknown("lane", crossed));
                }
            }
            let crossing = PedestrianLane::new(
                lane.id.clone(),
                lane.direction,
                lane.crosses.iter().cloned().map(LaneId),
            );
            if pedestrian.insert(lane.id.clone(), crossing).is_some() {
                return Err(ControlError::DuplicateId {
                    kind: "pedestrian lane",
                    id: lane.id.clone(),
                });
            }
        }

        let heads = index("signal head", &self.heads, |head| &head.id, |head| {
            Arc::new(SignalHead::new(head.id.clone(), head.kind).with_timings(&self.timings))
        })?;

        let mut routes = Vec::with_capacity(self.routes.len());
        let mut routes_by_id = HashMap::new();
        for config in &self.routes {
            let route = Arc::new(self.build_route(config, &inbound, &outbound, &pedestrian, &heads)?);
            routes_by_id.insert(config.id.clone(), Arc::clone(&route));
            routes.push(route);
        }

        let mut cycles = Vec::with_capacity(self.cycles.len());
        for config in &self.cycles {
            let members = config
                .routes
                .iter()
                .map(|id| lookup("route", &routes_by_id, id).map(Arc::clone))
                .collect::<Result<Vec<_>, _>>()?;
            cycles.push(Arc::new(Cycle::new(config.id.clone(), members, config.green_time)));
        }

        IntersectionController::with_timings(
            self.id.clone(),
            self.name.clone(),
            routes,
            cycles,
            self.mode,
            self.timings.schedule(),
        )
    }

    fn build_route(
        &self,
        config: &RouteConfig,
        inbound: &HashMap<String, InboundLane>,
        outbound: &HashMap<String, OutboundLane>,
        pedestrian: &HashMap<String, PedestrianLane>,
        heads: &HashMap<String, Arc<SignalHead>>,
    ) -> Result<Route, ControlError> {
        let inbound_lane = lookup("lane", inbound, &config.inbound)?.clone();
        let outbound_lanes = config
            .outbound
            .iter()
            .map(|id| lookup("lane", outbound, id).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        let route_heads = config
            .heads
            .iter()
            .map(|id| lookup("signal head", heads, id).map(Arc::clone))
            .collect::<Result<Vec<_>, _>>()?;
        let crossings = config
            .pedestrian_lanes
            .iter()
            .map(|id| lookup("pedestrian lane", pedestrian, id).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        let mut route = Route::new(
            config.id.clone(),
            config.kind,
            inbound_lane,
            outbound_lanes,
            route_heads,
        )
        .with_pedestrian_lanes(crossings);
        if let Some(seconds) = config.green_time {
            route = route.with_green_time(seconds);
        }
        Ok(route)
    }
}

fn index<C, T>(
    kind: &'static str,
    configs: &[C],
    id: impl Fn(&C) -> &String,
    make: impl Fn(&C) -> T,
) -> Result<HashMap<String, T>, ControlError> {
    let mut built = HashMap::with_capacity(configs.len());
    for config in configs {
        if built.insert(id(config).clone(), make(config)).is_some() {
            return Err(ControlError::DuplicateId {
                kind,
                id: id(config).clone(),
            });
        }
    }
    Ok(built)
}

fn lookup<'a, T>(
    kind: &'static str,
    items: &'a HashMap<String, T>,
    id: &str,
) -> Result<&'a T, ControlError> {
    items.get(id).ok_or_else(|| unknown(kind, id))
}

fn unknown(kind: &'static str, id: &str) -> ControlError {
    ControlError::UnknownReference {
        kind,
        id: id.to_string(),
    }
}
