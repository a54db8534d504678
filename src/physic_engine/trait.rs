use glam::Vec2;

use crate::physic_engine::config::PhysicConfig;
use crate::physic_engine::firework::Firework;
use crate::physic_engine::particle::Particle;
use crate::physic_engine::types::{LaunchInfo, UpdateResult};

pub trait PhysicEngineIterator {
    /// Retourne un itérateur sur les fusées actives (en vol, non explosées).
    fn iter_active_fireworks<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Firework> + 'a>;

    /// Retourne un itérateur sur les particules actives (alpha > 0).
    fn iter_active_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a>;
}

/// 🔧 Trait `PhysicEngine`
///
/// Interface commune des moteurs de simulation. On retourne des itérateurs
/// dynamiquement dispatchés (`Box<dyn Iterator<...>>`) plutôt que des types
/// d'itérateurs concrets : les signatures restent simples et stables, quelle
/// que soit la complexité du pipeline interne (`Filter`, `FlatMap`, etc.),
/// au prix d'une petite allocation par appel — négligeable à l'échelle d'une
/// frame.
pub trait PhysicEngine {
    /// Ajuste les bornes de la surface (si la fenêtre de rendu change de
    /// taille). Les objets existants sont ramenés dans les nouvelles bornes.
    fn set_surface_size(&mut self, width: f32, height: f32);

    /// Lance une fusée de `origin` vers `target` (coordonnées déjà bornées
    /// dans la surface par l'appelant). Retourne `None` uniquement si le
    /// moteur n'a aucune capacité (max_fireworks = 0).
    fn launch(&mut self, origin: Vec2, target: Vec2) -> Option<LaunchInfo>;

    /// Avance la simulation d'un pas `dt` (en frames de référence).
    /// Retourne un `UpdateResult` contenant les explosions du tick.
    fn update(&mut self, dt: f32) -> UpdateResult<'_>;

    /// Ferme / libère le moteur.
    fn close(&mut self) {} // Par défaut, fait rien.

    fn reload_config(&mut self, config: &PhysicConfig) -> bool;

    fn get_config(&self) -> &PhysicConfig;

    /// Nombre de fusées en vol
    fn fireworks_count(&self) -> usize;

    /// Nombre de particules vivantes
    fn particles_count(&self) -> usize;
}

pub trait PhysicEngineFull: PhysicEngine + PhysicEngineIterator {}
