use rand::Rng;

use crate::physic_engine::config::PhysicConfig;
use glam::Vec2;

/// Fragment d'explosion.
///
/// L'angle est stocké en degrés (converti en radians au moment du
/// déplacement); l'alpha sert à la fois d'opacité visuelle et de signal de
/// vie : alpha ≤ 0 ⇒ particule morte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Particle {
    pub pos: Vec2,
    pub angle_deg: f32,
    pub speed: f32,
    pub alpha: f32,
    pub hue: f32,
    pub brightness: f32,
    pub active: bool,
}

impl Particle {
    /// Amorce une particule au point d'explosion
    pub fn spawn(rng: &mut impl Rng, pos: Vec2, cfg: &PhysicConfig) -> Self {
        Self {
            pos,
            angle_deg: rng.random_range(0.0..360.0),
            speed: rng.random_range(
                (cfg.particle_speed - cfg.particle_speed_variance)
                    ..=(cfg.particle_speed + cfg.particle_speed_variance),
            ),
            alpha: 1.0,
            hue: rng.random_range(0.0..360.0),
            brightness: rng.random_range(cfg.brightness_min..=cfg.brightness_max),
            active: true,
        }
    }

    /// Avance la particule d'un pas `dt` (en frames de référence).
    ///
    /// La gravité est un biais additif vers le bas, indépendant de la
    /// vitesse et de la friction.
    #[inline(always)]
    pub fn advance(&mut self, dt: f32, cfg: &PhysicConfig) {
        if !self.active {
            return;
        }

        self.pos += Vec2::from_angle(self.angle_deg.to_radians()) * (self.speed * dt);
        self.speed *= cfg.friction.powf(dt);
        self.pos.y += cfg.gravity * dt;
        self.alpha -= cfg.alpha_decay * dt;

        if self.alpha <= 0.0 {
            self.active = false;
        }
    }
}
