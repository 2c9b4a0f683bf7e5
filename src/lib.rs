pub mod config;
pub mod control_system;
pub mod error;
pub mod global_variables;
pub mod models;
pub mod sensors;
pub mod topology;

pub use config::{ScheduleTimings, Timings};
pub use control_system::{Advance, Cycle, IntersectionController, Route, SignalHead};
pub use error::{ActuatorError, ControlError};
