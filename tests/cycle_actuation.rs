//! Fan-out/join behaviour of routes and cycles.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{conditional, phases, through, StuckRelay};
use signal_controller::control_system::signal_head::{Phase, SignalHead};
use signal_controller::control_system::Cycle;
use signal_controller::error::ControlError;
use signal_controller::models::Direction::{East, North, South, West};
use signal_controller::sensors::FixedPressure;
use tokio::time::Instant;

fn north_south_with_arrow() -> Cycle {
    Cycle::new(
        "C1",
        vec![
            through("N", North, &[South]).arc(),
            through("S", South, &[North]).arc(),
            conditional("A", East, North).arc(),
        ],
        10,
    )
}

#[tokio::test(start_paused = true)]
async fn allow_traffic_releases_through_routes_only() {
    let cycle = north_south_with_arrow();
    cycle.allow_traffic().await;
    let routes = cycle.routes();
    assert!(routes[0].is_green());
    assert!(routes[1].is_green());
    assert_eq!(phases(&routes[2]), vec![Phase::Off]);
}

#[tokio::test(start_paused = true)]
async fn routes_switch_in_parallel() {
    let cycle = north_south_with_arrow();
    let started = Instant::now();
    cycle.allow_traffic().await;
    // One yellow hold, not one per route.
    assert!(started.elapsed() < Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn stop_traffic_stops_everything() {
    let cycle = north_south_with_arrow();
    cycle.allow_conditional().await.unwrap();
    assert!(cycle.routes()[2].is_green());

    cycle.stop_traffic().await;
    assert_eq!(phases(&cycle.routes()[0]), vec![Phase::Red]);
    assert_eq!(phases(&cycle.routes()[1]), vec![Phase::Red]);
    assert_eq!(phases(&cycle.routes()[2]), vec![Phase::Off]);
}

#[tokio::test(start_paused = true)]
async fn conditional_refused_while_through_traffic_is_green() {
    let cycle = north_south_with_arrow();
    cycle.allow_traffic().await;
    let before: Vec<Vec<Phase>> = cycle.routes().iter().map(|r| phases(r)).collect();

    let err = cycle.allow_conditional().await.unwrap_err();
    assert!(matches!(err, ControlError::ConditionalWhileThroughLive { ref cycle } if cycle == "C1"));
    assert!(!err.is_configuration());

    let after: Vec<Vec<Phase>> = cycle.routes().iter().map(|r| phases(r)).collect();
    assert_eq!(before, after);
}

#[tokio::test(start_paused = true)]
async fn allow_traffic_clears_arrows_first() {
    let cycle = north_south_with_arrow();
    cycle.allow_conditional().await.unwrap();
    assert!(cycle.routes()[2].is_green());
    assert!(!cycle.routes()[0].is_green());

    cycle.allow_traffic().await;
    assert_eq!(phases(&cycle.routes()[2]), vec![Phase::Off]);
    assert!(cycle.routes()[0].is_green());
    assert!(cycle.routes()[1].is_green());

    cycle.stop_conditional().await;
    assert!(cycle.routes()[0].is_green());
}

#[test]
fn pressure_is_the_busiest_route() {
    let cycle = Cycle::new(
        "C1",
        vec![
            through("N", North, &[South]).cars(10).arc(),
            through("S", South, &[North]).cars(20).arc(),
        ],
        10,
    );
    assert_eq!(cycle.current_pressure(), 20);
    assert_eq!(Cycle::new("C0", vec![], 5).current_pressure(), 0);
}

#[test]
fn force_default_reaches_every_head() {
    let cycle = Cycle::new(
        "C1",
        vec![
            through("N", North, &[South])
                .heads(vec![
                    Arc::new(SignalHead::through("TL1")),
                    Arc::new(SignalHead::pedestrian("P1")),
                ])
                .arc(),
            conditional("A", East, North).arc(),
        ],
        10,
    );
    cycle.force_default();
    assert_eq!(phases(&cycle.routes()[0]), vec![Phase::Yellow, Phase::Off]);
    assert_eq!(phases(&cycle.routes()[1]), vec![Phase::Off]);
}

#[tokio::test(start_paused = true)]
async fn failing_head_does_not_hold_up_the_barrier() {
    let broken = Arc::new(SignalHead::through("TL-broken").with_lamp(Arc::new(StuckRelay)));
    let healthy = Arc::new(SignalHead::through("TL-ok"));
    let cycle = Cycle::new(
        "C1",
        vec![
            through("W", West, &[East])
                .heads(vec![Arc::clone(&broken), Arc::clone(&healthy)])
                .arc(),
            through("E", East, &[West]).arc(),
        ],
        10,
    );

    cycle.allow_traffic().await;
    assert!(healthy.is_green());
    assert_eq!(broken.phase(), Phase::Red);
    assert!(cycle.routes()[1].is_green());

    cycle.stop_traffic().await;
    assert_eq!(healthy.phase(), Phase::Red);
    assert_eq!(broken.phase(), Phase::Red);
}

#[test]
fn pressure_follows_the_camera() {
    let camera = Arc::new(FixedPressure::new(0));
    let cycle = Cycle::new(
        "C1",
        vec![through("N", North, &[South]).pressure(camera.clone()).arc()],
        10,
    );
    assert_eq!(cycle.current_pressure(), 0);
    camera.set(7);
    assert_eq!(cycle.current_pressure(), 7);
}
