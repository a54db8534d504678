use anyhow::{anyhow, Result};
use gl::types::*;
use log::{debug, info};

use crate::cstr;
use crate::physic_engine::PhysicEngineFull;
use crate::renderer_engine::{
    canvas::Canvas, color::Hsl, config::RendererConfig, tools::try_compile_program, RendererEngine,
};
use crate::utils::HumanBytes;

/// Quad plein écran (triangle strip) : position NDC + coordonnée texture.
/// Le v est inversé pour que la ligne 0 du canvas (haut de la surface,
/// convention canvas 2D) s'affiche en haut de la fenêtre.
#[rustfmt::skip]
const QUAD_VERTICES: [f32; 16] = [
    // pos        // uv
    -1.0, -1.0,   0.0, 1.0,
     1.0, -1.0,   1.0, 1.0,
    -1.0,  1.0,   0.0, 0.0,
     1.0,  1.0,   1.0, 0.0,
];

fn src_shaders_canvas_blit() -> (&'static str, &'static str) {
    (
        r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec2 aUv;

out vec2 vUv;

void main() {
    vUv = aUv;
    gl_Position = vec4(aPos, 0.0, 1.0);
}
"#,
        r#"#version 330 core
in vec2 vUv;
out vec4 FragColor;

uniform sampler2D uCanvas;

void main() {
    FragColor = texture(uCanvas, vUv);
}
"#,
    )
}

/// Compositeur de frames.
///
/// Possède la surface de dessin persistante (`Canvas`) et la présente à
/// l'écran via OpenGL : le buffer CPU est poussé dans une texture, dessinée
/// sur un quad plein écran. Tout le dessin (voile, traits, disques) se fait
/// côté canvas; OpenGL ne sert qu'au blit.
pub struct CanvasRenderer {
    canvas: Canvas,
    config: RendererConfig,

    texture_id: u32,
    vao: u32,
    vbo_quad: u32,
    shader_program: u32,
    loc_canvas: i32,
}

impl CanvasRenderer {
    /// Crée le renderer. Le contexte OpenGL doit déjà être actif.
    pub fn new(width: i32, height: i32, config: RendererConfig) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(anyhow!("Invalid surface size: {} x {}", width, height));
        }

        let canvas = Canvas::new(width as usize, height as usize);
        info!(
            "🖼️ Canvas allocated: {} x {} ({})",
            width,
            height,
            canvas.byte_size().human_bytes()
        );

        let (vertex_src, fragment_src) = src_shaders_canvas_blit();
        let shader_program =
            unsafe { try_compile_program(vertex_src, fragment_src) }.map_err(|e| anyhow!(e))?;

        let loc_canvas = unsafe { gl::GetUniformLocation(shader_program, cstr!("uCanvas")) };

        let mut texture_id = 0;
        let mut vao = 0;
        let mut vbo_quad = 0;

        unsafe {
            // Texture cible du canvas, réallouée à chaque resize
            gl::GenTextures(1, &mut texture_id);
            gl::BindTexture(gl::TEXTURE_2D, texture_id);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                width,
                height,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                std::ptr::null(),
            );

            // VAO/VBO du quad plein écran
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);
            gl::GenBuffers(1, &mut vbo_quad);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo_quad);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(&QUAD_VERTICES) as GLsizeiptr,
                QUAD_VERTICES.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            let stride = (4 * std::mem::size_of::<f32>()) as GLsizei;
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, std::ptr::null());
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                1,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (2 * std::mem::size_of::<f32>()) as *const _,
            );
            gl::EnableVertexAttribArray(1);

            gl::BindVertexArray(0);
        }

        Ok(Self {
            canvas,
            config,
            texture_id,
            vao,
            vbo_quad,
            shader_program,
            loc_canvas,
        })
    }

    /// Accès au canvas (lecture seule), utile aux assertions de tests
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Pousse le buffer CPU vers la texture et dessine le quad
    fn present(&self) {
        let (w, h) = (self.canvas.width() as i32, self.canvas.height() as i32);
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.texture_id);
            gl::TexSubImage2D(
                gl::TEXTURE_2D,
                0,
                0,
                0,
                w,
                h,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                self.canvas.as_bytes().as_ptr() as *const _,
            );

            gl::UseProgram(self.shader_program);
            gl::ActiveTexture(gl::TEXTURE0);
            gl::Uniform1i(self.loc_canvas, 0);
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLE_STRIP, 0, 4);
            gl::BindVertexArray(0);
        }
    }
}

impl RendererEngine for CanvasRenderer {
    /// Compose la frame : voile de fondu, puis un trait par fusée (de
    /// l'origine de tir à la position courante), puis un disque par
    /// particule — les particules par-dessus les traînées.
    /// Retourne le nombre d'objets dessinés.
    fn render_frame<P: PhysicEngineFull>(&mut self, physic: &P) -> usize {
        self.canvas.fade(self.config.clear_opacity);

        let mut drawn = 0;
        for firework in physic.iter_active_fireworks() {
            let color = Hsl::new(firework.hue, 100.0, firework.brightness).to_rgba(1.0);
            self.canvas.stroke_line(firework.origin, firework.pos, color);
            drawn += 1;
        }
        for particle in physic.iter_active_particles() {
            let color =
                Hsl::new(particle.hue, 100.0, particle.brightness).to_rgba(particle.alpha);
            self.canvas
                .fill_disk(particle.pos, self.config.particle_radius, color);
            drawn += 1;
        }

        self.present();
        drawn
    }

    /// Réalloue la surface à la nouvelle taille. L'historique des traînées
    /// repart du noir; le voile le reconstruit en quelques frames.
    fn set_surface_size(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }

        self.canvas = Canvas::new(width as usize, height as usize);
        info!(
            "🖼️ Canvas reallocated: {} x {} ({})",
            width,
            height,
            self.canvas.byte_size().human_bytes()
        );

        unsafe {
            gl::Viewport(0, 0, width, height);
            gl::BindTexture(gl::TEXTURE_2D, self.texture_id);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                width,
                height,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                std::ptr::null(),
            );
        }
    }

    fn close(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo_quad);
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteTextures(1, &self.texture_id);
            gl::DeleteProgram(self.shader_program);
        }
        debug!("CanvasRenderer closed.");
    }
}
