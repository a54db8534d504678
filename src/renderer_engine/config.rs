use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Opacité du voile noir composité à chaque frame (effet de traînée) :
    /// ne vide jamais complètement la surface.
    pub clear_opacity: f32,

    /// Rayon du disque dessiné par particule, en pixels
    pub particle_radius: f32,

    /// Synchronisation du swap sur le rafraîchissement écran
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_opacity: 0.1,
            particle_radius: 2.0,
            vsync: true,
        }
    }
}

impl RendererConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
