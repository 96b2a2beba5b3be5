//! The scene: actors, background and the camera looking at them

use crate::actor::{Actor, Representation};
use crate::camera::Camera;
use crate::graphics::{draw_line, draw_triangle, Framebuffer, Shading};
use crate::math::{to_color, Vec3};
use crate::mesh::Bounds;
use crate::vertex::Vertex;

/// Headlight sits at the camera, which is the origin of camera space
const HEADLIGHT: Vec3 = [0.0, 0.0, 0.0];

#[derive(Debug, Clone, Default)]
pub struct Scene {
    actors: Vec<Actor>,
    background: Vec3,
    camera: Camera,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut [Actor] {
        &mut self.actors
    }

    pub fn set_background(&mut self, color: Vec3) {
        self.background = color;
    }

    pub fn background(&self) -> Vec3 {
        self.background
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Union of the bounds of every actor
    pub fn bounds(&self) -> Option<Bounds> {
        self.actors
            .iter()
            .filter_map(Actor::bounds)
            .reduce(|mut acc, b| {
                for axis in 0..3 {
                    acc[axis * 2] = acc[axis * 2].min(b[axis * 2]);
                    acc[axis * 2 + 1] = acc[axis * 2 + 1].max(b[axis * 2 + 1]);
                }
                acc
            })
    }

    /// Frames the camera around every actor in the scene
    pub fn reset_camera(&mut self) {
        match self.bounds() {
            Some(bounds) => self.camera.reset(&bounds),
            None => tracing::warn!("cannot reset camera, scene has no visible actors"),
        }
    }

    /// Renders the scene into `frame`
    pub fn render(&self, frame: &mut Framebuffer) {
        frame.clear(to_color(&self.background));
        let (width, height) = (frame.width() as f64, frame.height() as f64);

        for actor in &self.actors {
            let mesh = actor.mesh();
            let property = actor.property();

            let vertices: Vec<Option<Vertex>> = mesh
                .points
                .iter()
                .zip(&mesh.normals)
                .map(|(point, normal)| {
                    let position = self.camera.to_camera_space(&actor.to_world(point));
                    let normal = self.camera.direction_to_camera_space(&actor.to_world(normal));
                    let (screen_position, depth) = self.camera.project(&position, width, height)?;
                    Some(Vertex {
                        position,
                        screen_position,
                        depth,
                        normal,
                    })
                })
                .collect();

            match property.representation {
                Representation::Surface => {
                    let shading = Shading {
                        light_position: &HEADLIGHT,
                        color: &property.color,
                        ambient: property.ambient,
                        diffuse: property.diffuse,
                    };
                    for [a, b, c] in mesh.triangles() {
                        if let (Some(v0), Some(v1), Some(v2)) = (&vertices[a], &vertices[b], &vertices[c]) {
                            draw_triangle(v0, v1, v2, frame, &shading);
                        }
                    }
                }
                Representation::Wireframe => {
                    let color = to_color(&property.color);
                    for (a, b) in mesh.edges() {
                        if let (Some(v0), Some(v1)) = (&vertices[a], &vertices[b]) {
                            draw_line(v0.screen_position, v1.screen_position, frame, color.clone());
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::CylinderSource;

    fn cap_facing_camera() -> Scene {
        let mut actor = Actor::new(CylinderSource::new(8).build());
        actor.property_mut().color = [0.8, 0.1, 0.1];
        // Bring the top cap (+Y) round to face the camera on +Z.
        actor.rotate_x(90.0);
        let mut scene = Scene::new();
        scene.add_actor(actor);
        scene.set_background([0.1, 0.2, 0.4]);
        scene.reset_camera();
        scene
    }

    #[test]
    fn empty_scene_keeps_camera() {
        let mut scene = Scene::new();
        scene.reset_camera();
        assert_eq!(scene.camera(), &Camera::default());
        assert!(scene.bounds().is_none());
    }

    #[test]
    fn bounds_cover_all_actors() {
        let mut scene = Scene::new();
        scene.add_actor(Actor::new(CylinderSource::new(8).build()));
        let mut wide = CylinderSource::new(8);
        wide.radius = 2.0;
        scene.add_actor(Actor::new(wide.build()));
        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds[1], 2.0);
        assert_eq!(bounds[3], 0.5);
    }

    #[test]
    fn render_shows_surface_over_background() {
        let scene = cap_facing_camera();
        let mut frame = Framebuffer::new(300, 300);
        scene.render(&mut frame);
        assert_eq!(frame.pixel(0, 0), Some((26, 51, 102, 255)));
        // Facing the headlight the cap is lit at (almost) full intensity.
        let (r, g, b, a) = frame.pixel(150, 150).unwrap();
        assert_eq!((r, a), (204, 255));
        assert!((25..=26).contains(&g) && (25..=26).contains(&b));
    }

    #[test]
    fn wireframe_leaves_faces_empty() {
        let mut scene = cap_facing_camera();
        scene.actors_mut()[0].property_mut().representation = Representation::Wireframe;
        let mut frame = Framebuffer::new(300, 300);
        scene.render(&mut frame);
        assert_eq!(frame.pixel(150, 150), Some((26, 51, 102, 255)));
        let edge_pixels = frame
            .pixels()
            .chunks_exact(4)
            .filter(|p| p[..3] == [204, 26, 26])
            .count();
        assert!(edge_pixels > 0);
    }
}
