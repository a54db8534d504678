use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::physic_engine::config::PhysicConfig;
use glam::Vec2;

/// Compteur global pour générer des ID uniques pour les fireworks
pub static FIREWORK_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Représentation d’une fusée
///
/// La trajectoire est un rayon rectiligne : l'angle est figé au lancement
/// (atan2 origine → cible) et n'est jamais recalculé. Seule la vitesse
/// évolue, multipliée par le facteur d'accélération à chaque pas.
#[derive(Debug, Clone)]
pub struct Firework {
    /// ID unique de la fusée (croissant avec l'ordre de lancement)
    pub id: u64,

    /// Position actuelle
    pub pos: Vec2,

    /// Point de lancement, figé à la création (ancre du trait de traînée)
    pub origin: Vec2,

    /// Point d'arrivée, figé à la création
    pub target: Vec2,

    /// Vitesse scalaire le long du rayon
    pub speed: f32,

    /// Direction du rayon, en radians
    pub angle: f32,

    /// Couleur (teinte [0, 360), luminosité en %)
    pub hue: f32,
    pub brightness: f32,

    /// Slot actif ou libre
    pub active: bool,
}

impl Default for Firework {
    fn default() -> Self {
        Self::new()
    }
}

impl Firework {
    /// Crée un slot de fusée (non actif)
    pub fn new() -> Self {
        Self {
            id: 0,
            pos: Vec2::default(),
            origin: Vec2::default(),
            target: Vec2::default(),
            speed: 0.0,
            angle: 0.0,
            hue: 0.0,
            brightness: 0.0,
            active: false,
        }
    }

    /// Réinitialise un slot inactif pour un nouveau lancement, sans réallocation
    pub fn reset(
        &mut self,
        cfg: &PhysicConfig,
        rng: &mut impl Rng,
        origin: Vec2,
        target: Vec2,
    ) {
        let direction = target - origin;

        self.id = FIREWORK_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.pos = origin;
        self.origin = origin;
        self.target = target;
        self.speed = cfg.firework_speed;
        self.angle = direction.y.atan2(direction.x);
        self.hue = rng.random_range(0.0..360.0);
        self.brightness = rng.random_range(cfg.brightness_min..=cfg.brightness_max);
        self.active = true;
    }

    /// Avance la fusée d'un pas `dt` (en frames de référence, dt = 1.0 pour
    /// une frame nominale).
    ///
    /// Le test d'arrivée précède le déplacement : l'explosion a lieu à la
    /// dernière position rendue, la fusée et son explosion ne coexistent
    /// jamais à l'écran. Retourne la position d'explosion quand la cible
    /// est atteinte; le slot est alors désactivé.
    #[inline(always)]
    pub fn advance(&mut self, dt: f32, cfg: &PhysicConfig) -> Option<Vec2> {
        if !self.active {
            return None;
        }

        if self.pos.distance(self.target) < cfg.arrival_threshold {
            self.active = false;
            return Some(self.pos);
        }

        self.pos += Vec2::from_angle(self.angle) * (self.speed * dt);
        // rampe exponentielle : speed × accel^dt (dt = 0 ⇒ identité)
        self.speed *= cfg.firework_accel.powf(dt);
        None
    }
}
