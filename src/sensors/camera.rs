use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use rand::Rng;

/// Something that can tell how many vehicles wait on a lane.
pub trait PressureSource: Debug + Send + Sync {
    fn pressure(&self) -> u32;
}

/// Simulated camera. Half of the readings see an empty lane, the rest
/// report between 0 and `max_cars` vehicles.
#[derive(Debug, Clone)]
pub struct RandomCamera {
    pub id: String,
    pub max_cars: u32,
}

impl RandomCamera {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_cars: 10,
        }
    }
}

impl PressureSource for RandomCamera {
    fn pressure(&self) -> u32 {
        let mut rng = rand::rng();
        if rng.random_bool(0.5) {
            0
        } else {
            rng.random_range(0..=self.max_cars)
        }
    }
}

/// Always reports the same value until told otherwise.
#[derive(Debug, Default)]
pub struct FixedPressure {
    value: AtomicU32,
}

impl FixedPressure {
    pub fn new(value: u32) -> Self {
        Self {
            value: AtomicU32::new(value),
        }
    }

    pub fn set(&self, value: u32) {
        self.value.store(value, Ordering::Relaxed);
    }
}

impl PressureSource for FixedPressure {
    fn pressure(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Replays a fixed sequence of readings, then keeps repeating the last one.
#[derive(Debug)]
pub struct ScriptedPressure {
    readings: Mutex<VecDeque<u32>>,
    last: AtomicU32,
}

impl ScriptedPressure {
    pub fn new<I: IntoIterator<Item = u32>>(readings: I) -> Self {
        Self {
            readings: Mutex::new(readings.into_iter().collect()),
            last: AtomicU32::new(0),
        }
    }
}

impl PressureSource for ScriptedPressure {
    fn pressure(&self) -> u32 {
        let next = match self.readings.lock() {
            Ok(mut readings) => readings.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        match next {
            Some(value) => {
                self.last.store(value, Ordering::Relaxed);
                value
            }
            None => self.last.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_camera_stays_in_range() {
        let camera = RandomCamera::new("Cam1");
        for _ in 0..200 {
            assert!(camera.pressure() <= camera.max_cars);
        }
    }

    #[test]
    fn fixed_pressure_can_be_changed() {
        let source = FixedPressure::new(4);
        assert_eq!(source.pressure(), 4);
        source.set(0);
        assert_eq!(source.pressure(), 0);
    }

    #[test]
    fn scripted_pressure_repeats_last_reading() {
        let source = ScriptedPressure::new([0, 7, 3]);
        assert_eq!(source.pressure(), 0);
        assert_eq!(source.pressure(), 7);
        assert_eq!(source.pressure(), 3);
        assert_eq!(source.pressure(), 3);
    }
}
