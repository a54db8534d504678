use crate::physic_engine::{config::PhysicConfig, PhysicEngineFull};
use crate::renderer_engine::{color::Hsl, RendererEngine};
use crate::window_engine::WindowEngine;
use glam::Vec2;
use glfw::{Action, Key, MouseButtonLeft};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Observateur de couleur d'accent, notifié à chaque lancement.
/// Purement cosmétique : la simulation ne relit jamais cette valeur.
pub type LaunchObserver = Box<dyn FnMut(Hsl)>;

/// Orchestrateur de la boucle de tick.
///
/// Chaque tick suit un ordre fixe : drainage des événements d'entrée →
/// `physic.update(dt)` (fusées puis particules) → `renderer.render_frame` →
/// swap. Les lancements déclenchés par clic ne font qu'insérer dans la
/// population de fusées, entre deux ticks — jamais pendant une traversée.
pub struct Simulator<P, R, W>
where
    P: PhysicEngineFull,
    R: RendererEngine,
    W: WindowEngine,
{
    physic_engine: P,
    renderer_engine: R,
    window_engine: W,

    launch_observer: Option<LaunchObserver>,

    // Input state
    cursor_pos: (f64, f64),
    surface_size_f32: (f32, f32),

    // Loop state
    frames: u64,
    last_time: Instant,
    fps_avg: f32,
    fps_avg_iter: f32,
    last_log: Instant,
    first_frame: bool,
}

impl<P, R, W> Simulator<P, R, W>
where
    P: PhysicEngineFull,
    R: RendererEngine,
    W: WindowEngine,
{
    pub fn new(physic_engine: P, renderer_engine: R, window_engine: W) -> Self {
        let window_size = window_engine.get_size();

        Self {
            physic_engine,
            renderer_engine,
            window_engine,
            launch_observer: None,
            cursor_pos: (0.0, 0.0),
            surface_size_f32: (window_size.0 as f32, window_size.1 as f32),
            frames: 0,
            last_time: Instant::now(),
            fps_avg: 0.0,
            fps_avg_iter: 0.0,
            last_log: Instant::now(),
            first_frame: true,
        }
    }

    /// Enregistre l'observateur notifié à chaque lancement avec la couleur
    /// d'accent (même teinte aléatoire que les objets, s=100%, l=50%).
    pub fn set_launch_observer(&mut self, observer: impl FnMut(Hsl) + 'static) {
        self.launch_observer = Some(Box::new(observer));
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        while self.step() {}
        Ok(())
    }

    /// Demande l'arrêt de la boucle : le prochain `step` renverra false.
    pub fn request_stop(&mut self) {
        self.window_engine.set_should_close(true);
    }

    pub fn step(&mut self) -> bool {
        if self.window_engine.should_close() {
            return false;
        }

        let mut reload_config = false;

        // Window events
        self.window_engine.poll_events();

        // Collect events into a Vec to avoid borrow checker issues
        let events: Vec<_> = glfw::flush_messages(self.window_engine.get_events()).collect();

        for (_, event) in events {
            match event {
                glfw::WindowEvent::FramebufferSize(w, h) => {
                    self.renderer_engine.set_surface_size(w, h);
                    self.physic_engine.set_surface_size(w as f32, h as f32);
                    self.surface_size_f32 = (w as f32, h as f32);
                    info!("🖥️ Surface resized: {} x {}", w, h);
                }
                glfw::WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    self.window_engine.set_should_close(true);
                }
                glfw::WindowEvent::Key(Key::R, _, Action::Press, _) => {
                    reload_config = true;
                }
                glfw::WindowEvent::CursorPos(x, y) => {
                    self.cursor_pos = (x, y);
                }
                glfw::WindowEvent::MouseButton(MouseButtonLeft, Action::Press, _) => {
                    self.launch_at_cursor();
                }
                _ => {}
            }
        }
        if reload_config {
            self.reload_config();
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_time).as_secs_f32();
        self.last_time = now;
        self.frames += 1;

        // 🔹 Calcul FPS instantané
        let fps = if delta > 0.0 { 1.0 / delta } else { 0.0 };

        // dt en frames de référence : 1.0 à la cadence nominale
        let dt = delta * self.physic_engine.get_config().reference_fps;
        let update_result = self.physic_engine.update(dt);
        for burst in update_result.bursts {
            debug!(
                "💥 Burst: {} particles at ({:.1}, {:.1})",
                burst.particles, burst.pos.x, burst.pos.y
            );
        }

        // Render frame
        let drawn = self.renderer_engine.render_frame(&self.physic_engine);

        // moyenne pondérée EMA
        let alpha = 0.15;
        self.fps_avg = alpha * fps + (1.0 - alpha) * self.fps_avg;
        // moyenne simple itérative
        let n_frames = 100;
        self.fps_avg_iter = (self.fps_avg_iter * (n_frames - 1) as f32 + fps) / n_frames as f32;

        // affichage périodique
        if self.last_log.elapsed() >= Duration::from_secs(5) {
            info!("FPS moyen (EMA): {:.2}", self.fps_avg);
            info!("FPS moyen (iter): {:.2}", self.fps_avg_iter);
            info!(
                "Objects drawn: {} ({} fireworks, {} particles)",
                drawn,
                self.physic_engine.fireworks_count(),
                self.physic_engine.particles_count()
            );
            self.last_log = Instant::now();
        }

        self.window_engine.swap_buffers();

        if self.first_frame {
            info!("🚀 First frame rendered");
            self.first_frame = false;
        }

        true
    }

    /// Lance une fusée du bas-centre de la surface vers la position du
    /// curseur, bornée dans la surface.
    fn launch_at_cursor(&mut self) {
        let (w, h) = self.surface_size_f32;
        let origin = Vec2::new(w / 2.0, h);
        let target = Vec2::new(
            (self.cursor_pos.0 as f32).clamp(0.0, w),
            (self.cursor_pos.1 as f32).clamp(0.0, h),
        );

        if let Some(launch) = self.physic_engine.launch(origin, target) {
            debug!(
                "🚀 Launch {} towards ({:.1}, {:.1})",
                launch.id, target.x, target.y
            );
            if let Some(observer) = &mut self.launch_observer {
                observer(Hsl::new(launch.hue, 100.0, 50.0));
            }
        }
    }

    pub fn reload_config(&mut self) {
        let physic_config =
            PhysicConfig::from_file("assets/config/physic.toml").unwrap_or_default();
        info!("Physic config loaded:\n{:#?}", physic_config);
        self.physic_engine.reload_config(&physic_config);
    }

    pub fn close(&mut self) {
        self.renderer_engine.close();
        self.physic_engine.close();
        // Window engine cleanup happens automatically when dropped
    }

    pub fn renderer_engine(&self) -> &R {
        &self.renderer_engine
    }

    pub fn physic_engine(&self) -> &P {
        &self.physic_engine
    }
}
