//! Polygonal meshes and the cylinder source that generates them

use crate::math::Vec3;
use std::f64::consts::PI;

/// Axis-aligned bounds stored as `[xmin, xmax, ymin, ymax, zmin, zmax]`
pub type Bounds = [f64; 6];

/// A polygon mesh with one normal per point
#[derive(Debug, Clone, PartialEq)]
pub struct PolyMesh {
    pub points: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub polygons: Vec<Vec<usize>>,
    side_facets: usize,
}

impl PolyMesh {
    /// Number of circumferential facets around the mesh
    pub fn side_facet_count(&self) -> usize {
        self.side_facets
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Bounds of all points, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let mut bounds = [first[0], first[0], first[1], first[1], first[2], first[2]];
        for p in &self.points[1..] {
            for axis in 0..3 {
                bounds[axis * 2] = bounds[axis * 2].min(p[axis]);
                bounds[axis * 2 + 1] = bounds[axis * 2 + 1].max(p[axis]);
            }
        }
        Some(bounds)
    }

    /// Fan-triangulates every polygon into point index triples
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.polygons.iter().flat_map(|polygon| {
            (1..polygon.len().saturating_sub(1))
                .map(move |i| [polygon[0], polygon[i], polygon[i + 1]])
        })
    }

    /// Polygon edges as point index pairs, closing each loop
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.polygons.iter().flat_map(|polygon| {
            let n = polygon.len();
            (0..n).map(move |i| (polygon[i], polygon[(i + 1) % n]))
        })
    }
}

/// Generates a capped prism approximating a cylinder along the Y axis
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderSource {
    pub resolution: usize,
    pub height: f64,
    pub radius: f64,
    pub center: Vec3,
    pub capping: bool,
}

impl CylinderSource {
    pub fn new(resolution: usize) -> Self {
        CylinderSource {
            resolution,
            height: 1.0,
            radius: 0.5,
            center: [0.0; 3],
            capping: true,
        }
    }

    pub fn build(&self) -> PolyMesh {
        let res = self.resolution;
        let angle = 2.0 * PI / res as f64;
        let half = 0.5 * self.height;
        let [cx, cy, cz] = self.center;

        let mut points = Vec::with_capacity(4 * res);
        let mut normals = Vec::with_capacity(4 * res);
        let mut polygons = Vec::with_capacity(res + 2);

        // Side points come in (bottom, top) pairs sharing the radial normal.
        for i in 0..res {
            let (s, c) = (i as f64 * angle).sin_cos();
            let normal = [c, 0.0, -s];
            let x = c * self.radius + cx;
            let z = -s * self.radius + cz;
            points.push([x, cy - half, z]);
            points.push([x, cy + half, z]);
            normals.push(normal);
            normals.push(normal);
        }
        for i in 0..res {
            let bottom = 2 * i;
            polygons.push(vec![
                bottom,
                bottom + 1,
                (bottom + 3) % (2 * res),
                (bottom + 2) % (2 * res),
            ]);
        }

        if self.capping {
            let top_start = points.len();
            for i in 0..res {
                let (s, c) = (i as f64 * angle).sin_cos();
                points.push([c * self.radius + cx, cy + half, -s * self.radius + cz]);
                normals.push([0.0, 1.0, 0.0]);
            }
            let bottom_start = points.len();
            for i in 0..res {
                let (s, c) = (i as f64 * angle).sin_cos();
                points.push([c * self.radius + cx, cy - half, -s * self.radius + cz]);
                normals.push([0.0, -1.0, 0.0]);
            }
            polygons.push((top_start..bottom_start).collect());
            polygons.push((bottom_start..points.len()).rev().collect());
        }

        PolyMesh {
            points,
            normals,
            polygons,
            side_facets: res,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn octagonal_prism_has_eight_facets() {
        let mesh = CylinderSource::new(8).build();
        assert_eq!(mesh.side_facet_count(), 8);
        assert_eq!(mesh.polygon_count(), 10);
        assert_eq!(mesh.points.len(), 32);
        assert_eq!(mesh.normals.len(), mesh.points.len());
        assert!(mesh.polygons[..8].iter().all(|p| p.len() == 4));
        assert_eq!(mesh.polygons[8].len(), 8);
    }

    #[test]
    fn uncapped_cylinder_has_only_sides() {
        let mut source = CylinderSource::new(5);
        source.capping = false;
        let mesh = source.build();
        assert_eq!(mesh.polygon_count(), 5);
        assert_eq!(mesh.triangles().count(), 10);
    }

    #[test]
    fn last_facet_wraps_to_first_points() {
        let mesh = CylinderSource::new(6).build();
        assert_eq!(mesh.polygons[5], vec![10, 11, 1, 0]);
    }

    #[test]
    fn bounds_follow_radius_and_height() {
        let bounds = CylinderSource::new(8).build().bounds().unwrap();
        assert_relative_eq!(bounds[0], -0.5);
        assert_relative_eq!(bounds[1], 0.5);
        assert_relative_eq!(bounds[2], -0.5);
        assert_relative_eq!(bounds[3], 0.5);
        assert_relative_eq!(bounds[4], -0.5, epsilon = 1e-12);
        assert_relative_eq!(bounds[5], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn triangulation_covers_caps() {
        let mesh = CylinderSource::new(8).build();
        // 8 quads -> 16, two octagons -> 6 each
        assert_eq!(mesh.triangles().count(), 28);
        assert_eq!(mesh.edges().count(), 8 * 4 + 2 * 8);
    }
}
