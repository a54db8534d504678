use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PhysicConfig {
    pub max_fireworks: usize,
    pub max_bursts: usize,
    pub particles_per_burst: usize,

    pub firework_speed: f32,
    pub firework_accel: f32,
    pub arrival_threshold: f32,

    pub particle_speed: f32,
    pub particle_speed_variance: f32,
    pub friction: f32,
    pub gravity: f32,
    pub alpha_decay: f32,

    pub brightness_min: f32,
    pub brightness_max: f32,

    /// Cadence de référence : update(dt) avec dt = 1.0 correspond à une frame
    /// à cette cadence.
    pub reference_fps: f32,
}

impl Default for PhysicConfig {
    fn default() -> Self {
        Self {
            max_fireworks: 64,
            max_bursts: 48,
            particles_per_burst: 80,
            firework_speed: 5.0,
            firework_accel: 1.05,
            arrival_threshold: 10.0,
            particle_speed: 4.0,
            particle_speed_variance: 2.0,
            friction: 0.98,
            gravity: 0.1,
            alpha_decay: 0.015,
            brightness_min: 50.0,
            brightness_max: 80.0,
            reference_fps: 60.0,
        }
    }
}

impl PhysicConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
