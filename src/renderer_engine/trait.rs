use crate::physic_engine::PhysicEngineFull;

pub trait RendererEngine {
    /// Compose et présente une frame à partir de l'état courant du moteur
    /// physique. Retourne le nombre d'objets dessinés.
    fn render_frame<P: PhysicEngineFull>(&mut self, physic: &P) -> usize;

    /// Réaction au redimensionnement de la surface
    fn set_surface_size(&mut self, width: i32, height: i32);

    fn close(&mut self);
}
