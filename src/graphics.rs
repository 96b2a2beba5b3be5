use crate::math::{apply_lighting, calculate_light_intensity, edge_function, normalize, Vec3};
use crate::vertex::Vertex;
use druid::Color;

/// RGBA8 color buffer with a matching depth buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    depth: Vec<f64>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            depth: vec![f64::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            *self = Framebuffer::new(width, height);
        }
    }

    /// Fills every pixel with `color` and resets the depth buffer
    pub fn clear(&mut self, color: Color) {
        let (r, g, b, a) = color.as_rgba8();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[r, g, b, a]);
        }
        self.depth.fill(f64::INFINITY);
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        let p = &self.pixels[offset..offset + 4];
        Some((p[0], p[1], p[2], p[3]))
    }

    fn put(&mut self, offset: usize, color: Color) {
        let (r, g, b, a) = color.as_rgba8();
        let pixel_offset = offset * 4;
        self.pixels[pixel_offset..pixel_offset + 4].copy_from_slice(&[r, g, b, a]);
    }
}

/// Lighting parameters shared by every triangle of one actor
pub struct Shading<'a> {
    pub light_position: &'a Vec3,
    pub color: &'a Vec3,
    pub ambient: f64,
    pub diffuse: f64,
}

/// Draws a triangle with per-pixel lighting
pub fn draw_triangle(v0: &Vertex, v1: &Vertex, v2: &Vertex, frame: &mut Framebuffer, shading: &Shading) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }

    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0) as usize;
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(frame.width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0) as usize;
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(frame.height as f64 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as usize, max_y as usize);

    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area == 0.0 {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Normalizing by the signed area makes both windings positive inside.
            let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
            let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
            let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
            let offset = y * frame.width + x;
            if depth >= frame.depth[offset] {
                continue;
            }
            frame.depth[offset] = depth;

            let interpolate = |a: &Vec3, b: &Vec3, c: &Vec3| {
                [
                    a[0] * w0 + b[0] * w1 + c[0] * w2,
                    a[1] * w0 + b[1] * w1 + c[1] * w2,
                    a[2] * w0 + b[2] * w1 + c[2] * w2,
                ]
            };
            let position = interpolate(&v0.position, &v1.position, &v2.position);
            let normal = normalize(&interpolate(&v0.normal, &v1.normal, &v2.normal));

            let intensity = calculate_light_intensity(
                &normal,
                &position,
                shading.light_position,
                shading.ambient,
                shading.diffuse,
            );
            frame.put(offset, apply_lighting(shading.color, intensity));
        }
    }
}

/// Draws a line between two points in the pixel buffer using Bresenham's algorithm
pub fn draw_line(from: [f64; 2], to: [f64; 2], frame: &mut Framebuffer, color: Color) {
    let (mut x0, mut y0, x1, y1) = (
        from[0].round() as isize,
        from[1].round() as isize,
        to[0].round() as isize,
        to[1].round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        if x0 >= 0 && x0 < frame.width as isize && y0 >= 0 && y0 < frame.height as isize {
            let offset = y0 as usize * frame.width + x0 as usize;
            frame.put(offset, color.clone());
        }

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
