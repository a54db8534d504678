// Ici on importe depuis la crate lib complète
use anyhow::Result;
use log::info;

use fireworks_canvas::physic_engine::config::PhysicConfig;
use fireworks_canvas::physic_engine::physic_engine_fireworks::PhysicEngineFireworks;
use fireworks_canvas::renderer_engine::color::Hsl;
use fireworks_canvas::renderer_engine::config::RendererConfig;
use fireworks_canvas::renderer_engine::renderer::CanvasRenderer;
use fireworks_canvas::utils::show_rust_core_dependencies;
use fireworks_canvas::window_engine::{GlfwWindowEngine, WindowEngine};
use fireworks_canvas::Simulator;

/// Main entry point for the Fireworks Canvas application.
fn main() -> Result<()> {
    env_logger::init();

    info!("🎆 Starting Fireworks Canvas...");

    show_rust_core_dependencies();

    let physic_config = PhysicConfig::from_file("assets/config/physic.toml").unwrap_or_default();
    info!("Physic config loaded:\n{:#?}", physic_config);

    let renderer_config =
        RendererConfig::from_file("assets/config/renderer.toml").unwrap_or_default();
    info!("Renderer config loaded:\n{:#?}", renderer_config);

    let window_width = 1024;
    let window_height = 800;

    // 1. Init Window & Context
    let window_engine = GlfwWindowEngine::init(
        window_width,
        window_height,
        "Fireworks Canvas",
        renderer_config.vsync,
    )?;

    // 2. Init Renderer (now that GL context is ready)
    let renderer_engine = CanvasRenderer::new(window_width, window_height, renderer_config)?;

    // 3. Init Physic
    let physic_engine = PhysicEngineFireworks::new(
        &physic_config,
        window_width as f32,
        window_height as f32,
    );

    // 4. Init Simulator
    info!("🎆 Click anywhere to launch a firework");
    let mut simulator = Simulator::new(physic_engine, renderer_engine, window_engine);
    simulator.set_launch_observer(|accent: Hsl| {
        info!(
            "🎨 Accent color: hsl({:.0}, {:.0}%, {:.0}%)",
            accent.hue, accent.saturation, accent.lightness
        );
    });

    simulator.run()?;
    simulator.close();

    Ok(())
}
