use anyhow::Result;

pub type WindowEvents = glfw::GlfwReceiver<(f64, glfw::WindowEvent)>;

/// Liaison plateforme minimale : fenêtre, contexte GL, cadence des frames.
///
/// `swap_buffers` est la primitive de cadencement : avec la vsync active,
/// l'appel suspend jusqu'au prochain rafraîchissement écran — pas d'attente
/// active dans la boucle de tick.
pub trait WindowEngine {
    fn init(width: i32, height: i32, title: &str, vsync: bool) -> Result<Self>
    where
        Self: Sized;

    fn poll_events(&mut self);
    fn swap_buffers(&mut self);
    fn should_close(&self) -> bool;
    fn set_should_close(&mut self, value: bool);
    fn get_size(&self) -> (i32, i32);
    fn get_events(&self) -> &WindowEvents;
}
