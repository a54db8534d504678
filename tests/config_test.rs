use fireworks_canvas::physic_engine::config::PhysicConfig;
use fireworks_canvas::renderer_engine::config::RendererConfig;
use std::io::Write;

#[test]
fn test_physic_config_defaults_match_tuning_constants() {
    let config = PhysicConfig::default();
    assert_eq!(config.particles_per_burst, 80);
    assert_eq!(config.particle_speed, 4.0);
    assert_eq!(config.particle_speed_variance, 2.0);
    assert_eq!(config.firework_speed, 5.0);
    assert_eq!(config.firework_accel, 1.05);
    assert_eq!(config.arrival_threshold, 10.0);
    assert_eq!(config.friction, 0.98);
    assert_eq!(config.gravity, 0.1);
    assert_eq!(config.alpha_decay, 0.015);
    assert_eq!(config.brightness_min, 50.0);
    assert_eq!(config.brightness_max, 80.0);
}

#[test]
fn test_physic_config_loads_from_shipped_file() {
    // le fichier livré dans assets/ doit rester chargeable et aligné sur les
    // valeurs par défaut
    let config = PhysicConfig::from_file("assets/config/physic.toml")
        .expect("shipped config must parse");
    let defaults = PhysicConfig::default();
    assert_eq!(config.particles_per_burst, defaults.particles_per_burst);
    assert_eq!(config.firework_accel, defaults.firework_accel);
    assert_eq!(config.alpha_decay, defaults.alpha_decay);
    assert_eq!(config.max_fireworks, defaults.max_fireworks);
}

#[test]
fn test_physic_config_from_custom_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"
max_fireworks = 8
max_bursts = 4
particles_per_burst = 16
firework_speed = 2.5
firework_accel = 1.1
arrival_threshold = 5.0
particle_speed = 3.0
particle_speed_variance = 1.0
friction = 0.95
gravity = 0.2
alpha_decay = 0.05
brightness_min = 40.0
brightness_max = 90.0
reference_fps = 30.0
"#
    )?;

    let config = PhysicConfig::from_file(file.path().to_str().unwrap())?;
    assert_eq!(config.max_fireworks, 8);
    assert_eq!(config.particles_per_burst, 16);
    assert_eq!(config.firework_accel, 1.1);
    assert_eq!(config.reference_fps, 30.0);
    Ok(())
}

#[test]
fn test_physic_config_missing_file_errors() {
    // les appelants retombent alors sur unwrap_or_default()
    assert!(PhysicConfig::from_file("does/not/exist.toml").is_err());
}

#[test]
fn test_physic_config_malformed_file_errors() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "max_fireworks = \"not a number\"")?;
    assert!(PhysicConfig::from_file(file.path().to_str().unwrap()).is_err());
    Ok(())
}

#[test]
fn test_renderer_config_save_and_reload() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("renderer.toml");
    let path = path.to_str().unwrap();

    let mut config = RendererConfig::default();
    config.clear_opacity = 0.25;
    config.particle_radius = 3.0;
    config.vsync = false;
    config.save_to_file(path)?;

    let reloaded = RendererConfig::from_file(path)?;
    assert_eq!(reloaded.clear_opacity, 0.25);
    assert_eq!(reloaded.particle_radius, 3.0);
    assert!(!reloaded.vsync);
    Ok(())
}

#[test]
fn test_renderer_config_defaults() {
    let config = RendererConfig::default();
    assert_eq!(config.clear_opacity, 0.1);
    assert_eq!(config.particle_radius, 2.0);
    assert!(config.vsync);
}
