use std::future::Future;
use std::time::Duration;

use log::info;
use tokio::time::sleep;

use crate::control_system::intersection_controller::{Advance, IntersectionController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The cycle queue ran dry.
    Exhausted,
    /// Shutdown was requested while a cycle was green.
    Cancelled,
}

/// Drives `advance` until the queue is exhausted or `shutdown` resolves.
///
/// Shutdown is only observed while waiting out a green interval, so a
/// transition already in progress always completes. Either way the
/// intersection is left in its default signal.
pub async fn run_signal_loop<F>(controller: &mut IntersectionController, shutdown: F) -> LoopOutcome
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let outcome = loop {
        let seconds = match controller.advance().await {
            Advance::Green { seconds, .. } => seconds,
            Advance::Exhausted => break LoopOutcome::Exhausted,
        };
        info!(
            "Intersection {} will be green for {} seconds",
            controller.name(),
            seconds
        );
        tokio::select! {
            _ = sleep(Duration::from_secs(seconds)) => {}
            _ = &mut shutdown => break LoopOutcome::Cancelled,
        }
    };

    match outcome {
        LoopOutcome::Exhausted => info!(
            "Intersection {} has finished, set to blinking yellow",
            controller.name()
        ),
        LoopOutcome::Cancelled => info!(
            "Intersection {} stopped on request, set to blinking yellow",
            controller.name()
        ),
    }
    controller.force_default();
    outcome
}
