//! Renderable objects: a mesh bound to surface properties and an orientation

use crate::math::{multiply_matrices, multiply_matrix_vector, rotation_x, rotation_y, Mat3, Vec3, IDENTITY};
use crate::mesh::{Bounds, PolyMesh};
use druid::Data;

/// How an actor's polygons are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Data)]
pub enum Representation {
    Surface,
    Wireframe,
}

/// Surface properties used when shading an actor
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub color: Vec3,
    pub ambient: f64,
    pub diffuse: f64,
    pub representation: Representation,
}

impl Default for Property {
    fn default() -> Self {
        Property {
            color: [1.0, 1.0, 1.0],
            ambient: 0.0,
            diffuse: 1.0,
            representation: Representation::Surface,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Actor {
    mesh: PolyMesh,
    property: Property,
    orientation: Mat3,
}

impl Actor {
    pub fn new(mesh: PolyMesh) -> Self {
        Actor {
            mesh,
            property: Property::default(),
            orientation: IDENTITY,
        }
    }

    pub fn mesh(&self) -> &PolyMesh {
        &self.mesh
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn property_mut(&mut self) -> &mut Property {
        &mut self.property
    }

    #[cfg(test)]
    pub fn orientation(&self) -> &Mat3 {
        &self.orientation
    }

    /// Rotates about the actor's own X axis, which earlier rotations may have moved
    pub fn rotate_x(&mut self, degrees: f64) {
        self.orientation = multiply_matrices(&self.orientation, &rotation_x(degrees));
    }

    /// Rotates about the actor's own Y axis, which earlier rotations may have moved
    pub fn rotate_y(&mut self, degrees: f64) {
        self.orientation = multiply_matrices(&self.orientation, &rotation_y(degrees));
    }

    /// Maps a mesh point or normal into world coordinates
    pub fn to_world(&self, v: &Vec3) -> Vec3 {
        multiply_matrix_vector(&self.orientation, v)
    }

    /// World-space bounds of the eight transformed corners of the mesh bounds
    pub fn bounds(&self) -> Option<Bounds> {
        let b = self.mesh.bounds()?;
        let mut world: Option<Bounds> = None;
        for &x in &b[0..2] {
            for &y in &b[2..4] {
                for &z in &b[4..6] {
                    let p = self.to_world(&[x, y, z]);
                    world = Some(match world {
                        None => [p[0], p[0], p[1], p[1], p[2], p[2]],
                        Some(mut acc) => {
                            for axis in 0..3 {
                                acc[axis * 2] = acc[axis * 2].min(p[axis]);
                                acc[axis * 2 + 1] = acc[axis * 2 + 1].max(p[axis]);
                            }
                            acc
                        }
                    });
                }
            }
        }
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{length, sub};
    use crate::mesh::CylinderSource;
    use approx::assert_relative_eq;

    #[test]
    fn color_is_kept_exactly() {
        let mut actor = Actor::new(CylinderSource::new(8).build());
        actor.property_mut().color = [0.8, 0.1, 0.1];
        assert_eq!(actor.property().color, [0.8, 0.1, 0.1]);
    }

    #[test]
    fn rotation_order_is_observable() {
        let mesh = CylinderSource::new(8).build();
        let mut xy = Actor::new(mesh.clone());
        xy.rotate_x(30.0);
        xy.rotate_y(-45.0);
        let mut yx = Actor::new(mesh);
        yx.rotate_y(-45.0);
        yx.rotate_x(30.0);

        let rim = [0.5, 0.5, 0.0];
        assert!(length(&sub(&xy.to_world(&rim), &yx.to_world(&rim))) > 1e-3);
    }

    #[test]
    fn rotations_use_the_actor_axes() {
        let mut actor = Actor::new(CylinderSource::new(8).build());
        actor.rotate_x(90.0);
        actor.rotate_y(90.0);
        // Y now points along world Z, so the second turn spins about world Z.
        let p = actor.to_world(&[1.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rotated_bounds_grow() {
        let mut actor = Actor::new(CylinderSource::new(8).build());
        actor.rotate_y(45.0);
        let b = actor.bounds().unwrap();
        assert_relative_eq!(b[1], 0.5 * 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(b[3], 0.5, epsilon = 1e-12);
    }
}
