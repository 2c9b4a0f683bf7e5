use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, error, info};
use serde::Deserialize;
use tokio::time::sleep;

use crate::config::Timings;
use crate::error::ActuatorError;

/// What a signal head controls. The set is closed; every transition below
/// matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadKind {
    /// Three-aspect vehicle signal.
    Through,
    /// Two-aspect walk / don't-walk signal.
    Pedestrian,
    /// Single green arrow for a protected turn.
    ConditionalArrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Red,
    Yellow,
    Green,
    /// Dark.
    Off,
}

/// Physical output of a signal head.
pub trait Lamp: Debug + Send + Sync {
    fn show(&self, head: &str, phase: Phase) -> Result<(), ActuatorError>;
}

/// Lamp of the simulated intersection: accepts every phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedLamp;

impl Lamp for SimulatedLamp {
    fn show(&self, head: &str, phase: Phase) -> Result<(), ActuatorError> {
        debug!("Lamp of {} now shows {:?}", head, phase);
        Ok(())
    }
}

#[derive(Debug)]
pub struct SignalHead {
    id: String,
    kind: HeadKind,
    phase: Mutex<Phase>,
    yellow: Duration,
    blink: Duration,
    lamp: Arc<dyn Lamp>,
}

impl SignalHead {
    pub fn new(id: impl Into<String>, kind: HeadKind) -> Self {
        let timings = Timings::default();
        Self {
            id: id.into(),
            kind,
            phase: Mutex::new(kind.initial_phase()),
            yellow: timings.yellow(),
            blink: timings.pedestrian_blink(),
            lamp: Arc::new(SimulatedLamp),
        }
    }

    pub fn through(id: impl Into<String>) -> Self {
        Self::new(id, HeadKind::Through)
    }

    pub fn pedestrian(id: impl Into<String>) -> Self {
        Self::new(id, HeadKind::Pedestrian)
    }

    pub fn conditional_arrow(id: impl Into<String>) -> Self {
        Self::new(id, HeadKind::ConditionalArrow)
    }

    pub fn with_timings(mut self, timings: &Timings) -> Self {
        self.yellow = timings.yellow();
        self.blink = timings.pedestrian_blink();
        self
    }

    pub fn with_lamp(mut self, lamp: Arc<dyn Lamp>) -> Self {
        self.lamp = lamp;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> HeadKind {
        self.kind
    }

    /// Last phase the lamp accepted. May lag an in-flight transition.
    pub fn phase(&self) -> Phase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_green(&self) -> bool {
        self.phase() == Phase::Green
    }

    /// Lets traffic through, holding the yellow aspect first where the head
    /// has one. The hold only suspends the calling task.
    pub async fn allow(&self) -> Result<(), ActuatorError> {
        match self.kind {
            HeadKind::Through => match self.phase() {
                Phase::Green => Ok(()),
                Phase::Red | Phase::Yellow | Phase::Off => {
                    self.show(Phase::Yellow)?;
                    sleep(self.yellow).await;
                    self.show(Phase::Green)
                }
            },
            HeadKind::Pedestrian | HeadKind::ConditionalArrow => self.show(Phase::Green),
        }
    }

    pub async fn stop(&self) -> Result<(), ActuatorError> {
        match self.kind {
            HeadKind::Through => match self.phase() {
                Phase::Red => Ok(()),
                Phase::Green | Phase::Yellow | Phase::Off => {
                    self.show(Phase::Yellow)?;
                    sleep(self.yellow).await;
                    self.show(Phase::Red)
                }
            },
            HeadKind::Pedestrian => match self.phase() {
                Phase::Red => Ok(()),
                Phase::Green => {
                    info!("Pedestrian signal {} blinking green", self.id);
                    sleep(self.blink).await;
                    self.show(Phase::Red)
                }
                Phase::Yellow | Phase::Off => self.show(Phase::Red),
            },
            HeadKind::ConditionalArrow => self.show(Phase::Off),
        }
    }

    /// Drops to the caution aspect at once. The phase is recorded even if
    /// the lamp rejects it, so the call cannot fail.
    pub fn force_default(&self) {
        let phase = self.kind.default_phase();
        if let Err(e) = self.lamp.show(&self.id, phase) {
            error!("Failed to set default signal on {}: {}", self.id, e);
        }
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
        info!("{} {} switched to {:?}", self.kind.label(), self.id, phase);
    }

    fn show(&self, phase: Phase) -> Result<(), ActuatorError> {
        self.lamp.show(&self.id, phase)?;
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
        info!("{} {} switched to {:?}", self.kind.label(), self.id, phase);
        Ok(())
    }
}

impl HeadKind {
    fn initial_phase(self) -> Phase {
        match self {
            HeadKind::Through | HeadKind::Pedestrian => Phase::Red,
            HeadKind::ConditionalArrow => Phase::Off,
        }
    }

    /// Blinking amber for vehicles, dark for everything else.
    pub fn default_phase(self) -> Phase {
        match self {
            HeadKind::Through => Phase::Yellow,
            HeadKind::Pedestrian | HeadKind::ConditionalArrow => Phase::Off,
        }
    }

    fn label(self) -> &'static str {
        match self {
            HeadKind::Through => "Traffic light",
            HeadKind::Pedestrian => "Pedestrian traffic light",
            HeadKind::ConditionalArrow => "Conditional traffic light",
        }
    }
}
