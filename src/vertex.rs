use crate::math::Vec3;

/// Vertex ready for rasterization, with camera-space position and normal
pub struct Vertex {
    pub position: Vec3,
    pub screen_position: [f64; 2],
    pub depth: f64,
    pub normal: Vec3,
}
