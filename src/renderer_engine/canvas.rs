use crate::renderer_engine::color::Rgba;
use glam::Vec2;

/// Surface de dessin persistante.
///
/// C'est l'équivalent CPU d'un contexte 2D : un buffer RGBA opaque qui n'est
/// **jamais effacé** entre deux frames. Le seul mécanisme de nettoyage est
/// `fade`, qui composite un voile noir translucide sur toute la surface —
/// le contenu des frames précédentes s'atténue géométriquement au lieu de
/// disparaître, ce qui produit les traînées.
///
/// Trois primitives suffisent à la simulation : le voile, un trait de ligne
/// (traînée de fusée), un disque plein (particule). Tout le blending se fait
/// ici, côté CPU; le buffer part ensuite tel quel vers une texture OpenGL.
#[derive(Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Canvas {
    /// Crée une surface opaque, entièrement noire.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Taille du buffer en octets (pour les logs d'allocation)
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Rgba>()
    }

    /// Vue brute du buffer, prête pour `glTexSubImage2D`
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Lecture d'un pixel (hors bornes ⇒ noir), surtout utile aux tests
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::BLACK;
        }
        self.pixels[y * self.width + x]
    }

    /// Composite un voile noir d'opacité `opacity` sur toute la surface.
    ///
    /// Équivaut à un fillRect rgba(0,0,0,opacity) : chaque canal est
    /// multiplié par (1 − opacity). La troncature entière garantit que les
    /// traînées finissent par s'éteindre complètement au noir.
    pub fn fade(&mut self, opacity: f32) {
        let factor = (1.0 - opacity).clamp(0.0, 1.0);
        for px in &mut self.pixels {
            px.r = (px.r as f32 * factor) as u8;
            px.g = (px.g as f32 * factor) as u8;
            px.b = (px.b as f32 * factor) as u8;
        }
    }

    /// Compose `color` sur le pixel (x, y) en source-over.
    /// Les pixels hors surface sont ignorés (clipping par pixel).
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let dst = &mut self.pixels[y as usize * self.width + x as usize];

        let a = color.a as f32 / 255.0;
        dst.r = (color.r as f32 * a + dst.r as f32 * (1.0 - a)).round() as u8;
        dst.g = (color.g as f32 * a + dst.g as f32 * (1.0 - a)).round() as u8;
        dst.b = (color.b as f32 * a + dst.b as f32 * (1.0 - a)).round() as u8;
        // la surface reste opaque
        dst.a = 255;
    }

    /// Trace un segment de `from` à `to` (Bresenham, épaisseur 1 pixel).
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        let mut x0 = from.x.round() as i32;
        let mut y0 = from.y.round() as i32;
        let x1 = to.x.round() as i32;
        let y1 = to.y.round() as i32;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Remplit un disque de rayon `radius` centré sur `center`.
    pub fn fill_disk(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let r = radius.max(0.0);
        let r2 = r * r;
        let x_min = (center.x - r).floor() as i32;
        let x_max = (center.x + r).ceil() as i32;
        let y_min = (center.y - r).floor() as i32;
        let y_max = (center.y + r).ceil() as i32;

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f32 - center.x;
                let dy = y as f32 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }
}
