pub mod r#trait;
pub use r#trait::RendererEngine;

pub mod canvas;
pub use self::canvas::Canvas;

pub mod color;
pub use self::color::{Hsl, Rgba};

pub mod config;
pub use self::config::RendererConfig;

pub mod renderer;
pub use self::renderer::CanvasRenderer;

pub mod tools;
pub use self::tools::show_opengl_context_info;
