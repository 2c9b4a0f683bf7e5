pub mod config;
pub mod demo;

pub use config::TopologyConfig;
pub use demo::create_demo_intersection;
