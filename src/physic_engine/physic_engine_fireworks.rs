use generational_arena::{Arena, Index};
use log::{debug, info};
use std::collections::VecDeque;
use std::ops::Range;
use std::sync::atomic::Ordering;

use crate::physic_engine::{
    config::PhysicConfig,
    firework::{Firework, FIREWORK_ID_COUNTER},
    particle::Particle,
    particle_pool::ParticlePool,
    types::{BurstEvent, LaunchInfo, UpdateResult},
    PhysicEngine, PhysicEngineFull, PhysicEngineIterator,
};
use glam::Vec2;
use rand::Rng;

#[derive(Debug)]
pub struct PhysicEngineFireworks {
    fireworks: Arena<Firework>,  // Slots pour toutes les fusées
    active_indices: Vec<Index>,  // Itération rapide sur les fusées en vol
    free_indices: Vec<Index>,    // Slots disponibles à réutiliser
    burst_events: Vec<BurstEvent>,

    particles: ParticlePool,
    live_blocks: VecDeque<Range<usize>>, // Blocs d'explosion vivants, du plus ancien au plus récent

    surface_size: Vec2,
    rng: rand::rngs::ThreadRng,

    config: PhysicConfig,
}

impl PhysicEngineFireworks {
    pub fn new(config: &PhysicConfig, surface_width: f32, surface_height: f32) -> Self {
        let mut fireworks = Arena::with_capacity(config.max_fireworks);
        let mut free_indices = Vec::with_capacity(config.max_fireworks);

        // Pré-remplissage des slots dans l’arena et free_indices
        for _ in 0..config.max_fireworks {
            let idx = fireworks.insert(Firework::new());
            free_indices.push(idx);
        }

        // reset counter for firework ids
        FIREWORK_ID_COUNTER.store(0, Ordering::Relaxed);

        // au plus une explosion par fusée et par tick
        let burst_events = vec![BurstEvent::default(); config.max_fireworks];

        Self {
            fireworks,
            active_indices: Vec::with_capacity(config.max_fireworks),
            free_indices,
            burst_events,
            particles: ParticlePool::new(config.max_bursts, config.particles_per_burst),
            live_blocks: VecDeque::with_capacity(config.max_bursts),
            surface_size: Vec2::new(surface_width, surface_height),
            rng: rand::rng(),
            config: config.clone(),
        }
    }

    fn reload_config(&mut self, new_config: &PhysicConfig) -> bool {
        let capacity_updated = new_config.max_fireworks != self.config.max_fireworks
            || new_config.max_bursts != self.config.max_bursts
            || new_config.particles_per_burst != self.config.particles_per_burst;
        self.config = new_config.clone();

        if capacity_updated {
            info!(
                "Reinitializing physics buffers: {} firework slots, {} burst blocks × {}",
                new_config.max_fireworks, new_config.max_bursts, new_config.particles_per_burst
            );
            self.burst_events = vec![BurstEvent::default(); new_config.max_fireworks];

            // Réinitialisation des slots et des blocs : tout repart vide
            self.fireworks.clear();
            self.active_indices.clear();
            self.free_indices.clear();
            for _ in 0..new_config.max_fireworks {
                let idx = self.fireworks.insert(Firework::new());
                self.free_indices.push(idx);
            }

            self.particles =
                ParticlePool::new(new_config.max_bursts, new_config.particles_per_burst);
            self.live_blocks.clear();
        }

        capacity_updated
    }

    /// Choisit un slot pour un nouveau lancement : un slot libre si possible,
    /// sinon la plus ancienne fusée en vol est recyclée (remplacement
    /// silencieux, jamais de croissance ni de panique).
    fn acquire_slot(&mut self) -> Option<Index> {
        if let Some(idx) = self.free_indices.pop() {
            return Some(idx);
        }

        // active_indices n'est pas trié par âge (swap_remove), on cherche
        // l'id minimal
        let pos = self
            .active_indices
            .iter()
            .enumerate()
            .min_by_key(|(_, &idx)| self.fireworks[idx].id)
            .map(|(pos, _)| pos)?;
        let idx = self.active_indices.swap_remove(pos);
        debug!("♻️ Firework slots exhausted, recycling {:?}", idx);
        Some(idx)
    }

    /// Désactive une fusée explosée et rend son slot réutilisable
    fn deactivate_firework(&mut self, idx: Index) {
        // Retire de active_indices en O(1) grâce à swap_remove
        if let Some(pos) = self.active_indices.iter().position(|&i| i == idx) {
            self.active_indices.swap_remove(pos);
        }
        self.free_indices.push(idx);
    }

    /// Amorce un bloc de 80 particules au point d'explosion. Si le pool est
    /// à sec, le plus ancien bloc vivant est réécrit sur place.
    fn spawn_burst(
        pool: &mut ParticlePool,
        live_blocks: &mut VecDeque<Range<usize>>,
        rng: &mut impl Rng,
        cfg: &PhysicConfig,
        pos: Vec2,
    ) -> usize {
        let Some(range) = pool.allocate_block().or_else(|| live_blocks.pop_front()) else {
            return 0;
        };

        for p in pool.get_particles_mut(&range) {
            *p = Particle::spawn(rng, pos, cfg);
        }

        let spawned = range.len();
        live_blocks.push_back(range);
        spawned
    }

    fn update(&mut self, dt: f32) -> UpdateResult<'_> {
        let mut burst_count = 0;

        // --- Phase 1 : fusées ---
        // La désactivation est différée : on itère sur la liste des indices
        // actifs, on ne la modifie qu'après la passe.
        let mut to_deactivate = Vec::new();
        for &idx in &self.active_indices {
            let Some(firework) = self.fireworks.get_mut(idx) else {
                continue;
            };

            if let Some(burst_pos) = firework.advance(dt, &self.config) {
                let spawned = Self::spawn_burst(
                    &mut self.particles,
                    &mut self.live_blocks,
                    &mut self.rng,
                    &self.config,
                    burst_pos,
                );
                // explosion et destruction sont atomiques dans le tick :
                // la fusée et son explosion ne coexistent jamais à l'écran
                self.burst_events[burst_count] = BurstEvent {
                    pos: burst_pos,
                    particles: spawned,
                };
                burst_count += 1;
                to_deactivate.push(idx);
            }
        }
        for idx in to_deactivate {
            self.deactivate_firework(idx);
        }

        // --- Phase 2 : particules ---
        // Les particules nées pendant la phase 1 avancent dès ce tick,
        // comme le reste de la population.
        let mut expired_blocks = Vec::new();
        for range in &self.live_blocks {
            let mut any_active = false;
            for p in self.particles.get_particles_mut(range) {
                p.advance(dt, &self.config);
                any_active |= p.active;
            }
            if !any_active {
                expired_blocks.push(range.clone());
            }
        }
        for range in expired_blocks {
            if let Some(pos) = self.live_blocks.iter().position(|r| *r == range) {
                self.live_blocks.remove(pos);
            }
            self.particles.free_block(range);
        }

        UpdateResult {
            bursts: &self.burst_events[..burst_count],
        }
    }
}

// ==================================
// Trait PhysicEngine
// ==================================
impl PhysicEngineIterator for PhysicEngineFireworks {
    /// Itère sur les fusées en vol.
    ///
    /// Pipeline d’itérateurs paresseux, zéro allocation au-delà du `Box` :
    /// la liste d'indices actifs évite de balayer l'arena entière.
    fn iter_active_fireworks<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Firework> + 'a> {
        Box::new(
            self.active_indices
                .iter()
                .filter_map(move |&idx| self.fireworks.get(idx))
                .filter(|fw| fw.active),
        )
    }

    /// Itère sur les particules vivantes de tous les blocs d'explosion.
    ///
    /// Le filtre `active` garantit qu'aucune particule d'alpha ≤ 0 n'est
    /// jamais présentée au renderer.
    fn iter_active_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a> {
        Box::new(
            self.live_blocks
                .iter()
                .flat_map(move |range| self.particles.get_particles(range))
                .filter(|p| p.active),
        )
    }
}

impl PhysicEngine for PhysicEngineFireworks {
    fn set_surface_size(&mut self, width: f32, height: f32) {
        self.surface_size = Vec2::new(width, height);

        // clamp-in-place : les objets existants sont ramenés dans les
        // nouvelles bornes plutôt que remis à l'échelle
        let bounds = self.surface_size;
        for &idx in &self.active_indices {
            if let Some(fw) = self.fireworks.get_mut(idx) {
                fw.pos = fw.pos.clamp(Vec2::ZERO, bounds);
                fw.target = fw.target.clamp(Vec2::ZERO, bounds);
            }
        }
        for range in &self.live_blocks {
            for p in self.particles.get_particles_mut(range) {
                if p.active {
                    p.pos = p.pos.clamp(Vec2::ZERO, bounds);
                }
            }
        }
    }

    fn launch(&mut self, origin: Vec2, target: Vec2) -> Option<LaunchInfo> {
        let idx = self.acquire_slot()?;

        let firework = &mut self.fireworks[idx];
        firework.reset(&self.config, &mut self.rng, origin, target);
        let info = LaunchInfo {
            id: firework.id,
            hue: firework.hue,
            brightness: firework.brightness,
        };

        self.active_indices.push(idx);
        debug!(
            "🚀 Firework {} launched: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            info.id, origin.x, origin.y, target.x, target.y
        );
        Some(info)
    }

    fn update(&mut self, dt: f32) -> UpdateResult<'_> {
        self.update(dt)
    }

    fn close(&mut self) {
        self.active_indices.clear();
        self.free_indices.clear();
        self.fireworks.clear();
        self.live_blocks.clear();
        debug!("PhysicEngineFireworks closed and reset.");
    }

    fn reload_config(&mut self, config: &PhysicConfig) -> bool {
        self.reload_config(config)
    }

    fn get_config(&self) -> &PhysicConfig {
        &self.config
    }

    fn fireworks_count(&self) -> usize {
        self.active_indices.len()
    }

    fn particles_count(&self) -> usize {
        self.live_blocks
            .iter()
            .flat_map(|range| self.particles.get_particles(range))
            .filter(|p| p.active)
            .count()
    }
}

impl PhysicEngineFull for PhysicEngineFireworks {}

// ==================================
// Helpers pour tests
// ==================================
#[cfg(any(test, feature = "test_helpers"))]
pub trait PhysicEngineTestHelpers {
    fn live_blocks_count(&self) -> usize;
    fn free_firework_slots(&self) -> usize;
}

#[cfg(any(test, feature = "test_helpers"))]
impl PhysicEngineTestHelpers for PhysicEngineFireworks {
    fn live_blocks_count(&self) -> usize {
        self.live_blocks.len()
    }

    fn free_firework_slots(&self) -> usize {
        self.free_indices.len()
    }
}
