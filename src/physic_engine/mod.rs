pub mod r#trait;
pub use r#trait::{PhysicEngine, PhysicEngineFull, PhysicEngineIterator};

pub mod types;
pub use self::types::{BurstEvent, LaunchInfo, UpdateResult};

pub mod firework;
pub use self::firework::Firework;

pub mod particle;
pub use self::particle::Particle;

pub mod particle_pool;
pub use self::particle_pool::ParticlePool;

pub mod config;
pub use self::config::PhysicConfig;

pub mod physic_engine_fireworks;
pub use self::physic_engine_fireworks::PhysicEngineFireworks;
