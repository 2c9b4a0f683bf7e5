// Signal head holds
pub const YELLOW_DURATION_MS: u64 = 1500;
pub const PEDESTRIAN_BLINK_MS: u64 = 1000;

// Controller pauses
pub const CLEARANCE_INTERVAL_MS: u64 = 1500;
pub const PRESSURE_POLL_INTERVAL_MS: u64 = 1000;

// Green time sizing
pub const MINIMUM_GREEN_SECS: u64 = 5;
pub const GREEN_SECS_PER_CAR: u64 = 2;
pub const PRESSURE_THRESHOLD: u32 = 3;
pub const DEFAULT_ROUTE_GREEN_SECS: u64 = 10;
