#![cfg(feature = "interactive_tests")]

use fireworks_canvas::window_engine::{GlfwWindowEngine, WindowEngine};
use fireworks_canvas::Simulator;
use std::cell::RefCell;
use std::rc::Rc;

mod helpers;
use helpers::{CountingRenderer, DummyPhysic, LoggingPhysic, LoggingRenderer};

#[test]
fn test_simulator_with_dummy_engines() -> anyhow::Result<()> {
    let window_engine = GlfwWindowEngine::init(800, 600, "Test Simulator", false)?;
    let mut simulator = Simulator::new(
        DummyPhysic::default(),
        CountingRenderer::default(),
        window_engine,
    );
    assert!(simulator.step()); // Run one frame
    simulator.close();

    Ok(())
}

// Ce test vérifie l'ordre global des appels entre les moteurs
#[test]
fn test_call_order_in_simulator_step_and_close() -> anyhow::Result<()> {
    // Journal partagé entre tous les mocks
    let log = Rc::new(RefCell::new(vec![]));

    let renderer = LoggingRenderer::new(log.clone());
    let physic = LoggingPhysic::new(log.clone());
    let window_engine = GlfwWindowEngine::init(800, 600, "Test Simulator", false)?;

    let mut sim = Simulator::new(physic, renderer, window_engine);
    sim.step();
    sim.close();

    let calls = log.borrow();
    assert_eq!(
        *calls,
        vec![
            // --- Phase de step : physique avant rendu ---
            "physic.update",
            "renderer.render_frame",
            // --- Phase de close ---
            "renderer.close",
            "physic.close",
        ]
    );

    Ok(())
}

#[test]
fn test_request_stop_ends_the_loop() -> anyhow::Result<()> {
    let window_engine = GlfwWindowEngine::init(800, 600, "Test Simulator", false)?;
    let mut simulator = Simulator::new(
        DummyPhysic::default(),
        CountingRenderer::default(),
        window_engine,
    );

    assert!(simulator.step());
    simulator.request_stop();
    assert!(!simulator.step(), "no tick re-schedules after stop");
    simulator.close();

    Ok(())
}
