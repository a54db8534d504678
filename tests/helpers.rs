use fireworks_canvas::physic_engine::config::PhysicConfig;
use fireworks_canvas::physic_engine::firework::Firework;
use fireworks_canvas::physic_engine::particle::Particle;
use fireworks_canvas::physic_engine::types::{LaunchInfo, UpdateResult};
use fireworks_canvas::physic_engine::{PhysicEngine, PhysicEngineFull, PhysicEngineIterator};
use fireworks_canvas::renderer_engine::RendererEngine;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

// ==================================
// Moteurs factices pour les tests du simulateur et des seams de traits
// ==================================

#[allow(dead_code)]
#[derive(Default)]
pub struct DummyPhysic {
    config: PhysicConfig,
}

impl PhysicEngine for DummyPhysic {
    fn set_surface_size(&mut self, _width: f32, _height: f32) {}
    fn launch(&mut self, _origin: Vec2, _target: Vec2) -> Option<LaunchInfo> {
        None
    }
    fn update(&mut self, _dt: f32) -> UpdateResult<'_> {
        UpdateResult { bursts: &[] }
    }
    fn reload_config(&mut self, _config: &PhysicConfig) -> bool {
        false
    }
    fn get_config(&self) -> &PhysicConfig {
        &self.config
    }
    fn fireworks_count(&self) -> usize {
        0
    }
    fn particles_count(&self) -> usize {
        0
    }
}

impl PhysicEngineIterator for DummyPhysic {
    fn iter_active_fireworks<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Firework> + 'a> {
        Box::new(std::iter::empty())
    }
    fn iter_active_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a> {
        Box::new(std::iter::empty())
    }
}

impl PhysicEngineFull for DummyPhysic {}

/// Renderer sans GL : compte les objets que le moteur physique expose,
/// exactement comme le vrai renderer les dessinerait.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingRenderer {
    pub frames: Vec<usize>,
}

impl RendererEngine for CountingRenderer {
    fn render_frame<P: PhysicEngineFull>(&mut self, physic: &P) -> usize {
        let drawn =
            physic.iter_active_fireworks().count() + physic.iter_active_particles().count();
        self.frames.push(drawn);
        drawn
    }
    fn set_surface_size(&mut self, _width: i32, _height: i32) {}
    fn close(&mut self) {}
}

// ==================================
// Mocks avec journal partagé (ordre des appels)
// ==================================

#[allow(dead_code)]
pub struct LoggingRenderer {
    log: Rc<RefCell<Vec<String>>>,
}

#[allow(dead_code)]
impl LoggingRenderer {
    pub fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self { log }
    }
}

impl RendererEngine for LoggingRenderer {
    fn render_frame<P: PhysicEngineFull>(&mut self, _physic: &P) -> usize {
        self.log.borrow_mut().push("renderer.render_frame".into());
        0
    }
    // resize peut arriver dès la création de la fenêtre selon la
    // plateforme, on ne le journalise pas
    fn set_surface_size(&mut self, _width: i32, _height: i32) {}
    fn close(&mut self) {
        self.log.borrow_mut().push("renderer.close".into());
    }
}

#[allow(dead_code)]
pub struct LoggingPhysic {
    log: Rc<RefCell<Vec<String>>>,
    config: PhysicConfig,
}

#[allow(dead_code)]
impl LoggingPhysic {
    pub fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            log,
            config: PhysicConfig::default(),
        }
    }
}

impl PhysicEngine for LoggingPhysic {
    fn set_surface_size(&mut self, _width: f32, _height: f32) {}
    fn launch(&mut self, _origin: Vec2, _target: Vec2) -> Option<LaunchInfo> {
        self.log.borrow_mut().push("physic.launch".into());
        None
    }
    fn update(&mut self, _dt: f32) -> UpdateResult<'_> {
        self.log.borrow_mut().push("physic.update".into());
        UpdateResult { bursts: &[] }
    }
    fn close(&mut self) {
        self.log.borrow_mut().push("physic.close".into());
    }
    fn reload_config(&mut self, _config: &PhysicConfig) -> bool {
        false
    }
    fn get_config(&self) -> &PhysicConfig {
        &self.config
    }
    fn fireworks_count(&self) -> usize {
        0
    }
    fn particles_count(&self) -> usize {
        0
    }
}

impl PhysicEngineIterator for LoggingPhysic {
    fn iter_active_fireworks<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Firework> + 'a> {
        Box::new(std::iter::empty())
    }
    fn iter_active_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a> {
        Box::new(std::iter::empty())
    }
}

impl PhysicEngineFull for LoggingPhysic {}
