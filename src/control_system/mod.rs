pub mod compatibility;
pub mod conflict;
pub mod cycle;
pub mod fanout;
pub mod intersection_controller;
pub mod route;
pub mod route_validator;
pub mod run_loop;
pub mod signal_head;

pub use compatibility::CompatibilityIndex;
pub use conflict::{is_compatible, turns_do_not_cross};
pub use cycle::Cycle;
pub use intersection_controller::{compute_green_seconds, Advance, IntersectionController};
pub use route::Route;
pub use route_validator::validate_route;
pub use run_loop::{run_signal_loop, LoopOutcome};
pub use signal_head::{HeadKind, Lamp, Phase, SignalHead, SimulatedLamp};
