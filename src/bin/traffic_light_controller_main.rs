use std::env;
use std::error::Error;

use log::{error, info};
use signal_controller::control_system::run_loop::{run_signal_loop, LoopOutcome};
use signal_controller::topology::{create_demo_intersection, TopologyConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let built = match env::args().nth(1) {
        Some(path) => {
            info!("Loading intersection from {}", path);
            TopologyConfig::from_file(&path).and_then(|config| config.build())
        }
        None => create_demo_intersection(),
    };
    let mut controller = match built {
        Ok(controller) => controller,
        Err(e) => {
            error!("Intersection could not be built: {}", e);
            return Err(e.into());
        }
    };

    println!("Starting traffic controller for intersection {}...", controller.name());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    match run_signal_loop(&mut controller, shutdown).await {
        LoopOutcome::Exhausted => info!("Intersection {} has no more cycles", controller.name()),
        LoopOutcome::Cancelled => info!("Intersection {} shut down", controller.name()),
    }
    Ok(())
}
