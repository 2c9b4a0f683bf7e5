pub mod camera;

pub use camera::{FixedPressure, PressureSource, RandomCamera, ScriptedPressure};
