//! Perspective camera with auto-framing and trackball motions

use crate::math::{
    add, cross, dot, length, multiply_matrix_vector, normalize, rotation_about_axis, scale, sub,
    Vec3,
};
use crate::mesh::Bounds;

const DEFAULT_VIEW_ANGLE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    focal_point: Vec3,
    view_up: Vec3,
    /// Vertical view angle in degrees
    view_angle: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            position: [0.0, 0.0, 1.0],
            focal_point: [0.0, 0.0, 0.0],
            view_up: [0.0, 1.0, 0.0],
            view_angle: DEFAULT_VIEW_ANGLE,
        }
    }
}

impl Camera {
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    pub fn view_up(&self) -> Vec3 {
        self.view_up
    }

    pub fn view_angle(&self) -> f64 {
        self.view_angle
    }

    pub fn distance(&self) -> f64 {
        length(&sub(&self.position, &self.focal_point))
    }

    /// Unit vector from the camera towards the focal point
    pub fn direction_of_projection(&self) -> Vec3 {
        normalize(&sub(&self.focal_point, &self.position))
    }

    /// Unit vector from the focal point towards the camera
    pub fn view_plane_normal(&self) -> Vec3 {
        scale(&self.direction_of_projection(), -1.0)
    }

    fn right(&self) -> Vec3 {
        normalize(&cross(&self.direction_of_projection(), &self.view_up))
    }

    /// Places the camera so a sphere around `bounds` fills the view, keeping the
    /// current viewing direction.
    pub fn reset(&mut self, bounds: &Bounds) {
        let center = [
            (bounds[0] + bounds[1]) / 2.0,
            (bounds[2] + bounds[3]) / 2.0,
            (bounds[4] + bounds[5]) / 2.0,
        ];
        let w = [bounds[1] - bounds[0], bounds[3] - bounds[2], bounds[5] - bounds[4]];
        let mut radius = dot(&w, &w);
        if radius == 0.0 {
            radius = 1.0;
        }
        let radius = radius.sqrt() * 0.5;
        let distance = radius / (self.view_angle.to_radians() * 0.5).sin();

        let vn = self.view_plane_normal();
        if dot(&self.view_up, &vn).abs() > 0.999 {
            tracing::warn!("view up parallel to view plane normal, resetting view up");
            self.view_up = [-self.view_up[2], self.view_up[0], self.view_up[1]];
        }

        self.focal_point = center;
        self.position = add(&center, &scale(&vn, distance));
        tracing::debug!(?center, radius, distance, "camera reset");
    }

    /// Pixels per world unit at unit depth for a viewport `height` pixels tall
    pub fn projection_scale(&self, height: f64) -> f64 {
        (height / 2.0) / (self.view_angle.to_radians() / 2.0).tan()
    }

    /// Multiplies the projection scale by `factor` by narrowing the view angle
    pub fn zoom(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let half = (self.view_angle.to_radians() / 2.0).tan();
        self.view_angle = 2.0 * (half / factor).atan().to_degrees();
    }

    /// Moves the camera towards (`factor` > 1) or away from the focal point
    pub fn dolly(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let distance = self.distance() / factor;
        self.position = sub(
            &self.focal_point,
            &scale(&self.direction_of_projection(), distance),
        );
    }

    /// Rotates the position about the view up vector centered at the focal point
    pub fn azimuth(&mut self, degrees: f64) {
        let rotation = rotation_about_axis(&self.view_up, degrees);
        let offset = sub(&self.position, &self.focal_point);
        self.position = add(&self.focal_point, &multiply_matrix_vector(&rotation, &offset));
    }

    /// Rotates the position about the camera's horizontal axis centered at the focal point
    pub fn elevation(&mut self, degrees: f64) {
        let axis = scale(&self.right(), -1.0);
        let rotation = rotation_about_axis(&axis, degrees);
        let offset = sub(&self.position, &self.focal_point);
        self.position = add(&self.focal_point, &multiply_matrix_vector(&rotation, &offset));
    }

    /// Rotates the view up vector about the direction of projection
    pub fn roll(&mut self, degrees: f64) {
        let rotation = rotation_about_axis(&self.direction_of_projection(), degrees);
        self.view_up = multiply_matrix_vector(&rotation, &self.view_up);
    }

    /// Recomputes view up so it is perpendicular to the direction of projection
    pub fn orthogonalize_view_up(&mut self) {
        let dop = self.direction_of_projection();
        self.view_up = normalize(&cross(&self.right(), &dop));
    }

    /// Shifts position and focal point so the scene follows a screen-space drag
    pub fn pan(&mut self, dx: f64, dy: f64, height: f64) {
        let world_per_pixel = self.distance() / self.projection_scale(height);
        let up = normalize(&cross(&self.right(), &self.direction_of_projection()));
        let motion = add(
            &scale(&self.right(), -dx * world_per_pixel),
            &scale(&up, dy * world_per_pixel),
        );
        self.position = add(&self.position, &motion);
        self.focal_point = add(&self.focal_point, &motion);
    }

    /// Coordinates relative to the camera: x right, y up, looking down -z
    pub fn to_camera_space(&self, point: &Vec3) -> Vec3 {
        self.direction_to_camera_space(&sub(point, &self.position))
    }

    /// Expresses a direction in the camera basis without translating it
    pub fn direction_to_camera_space(&self, direction: &Vec3) -> Vec3 {
        let right = self.right();
        let dop = self.direction_of_projection();
        let up = cross(&right, &dop);
        [dot(direction, &right), dot(direction, &up), -dot(direction, &dop)]
    }

    /// Points closer than this are not rasterized
    pub fn near_plane(&self) -> f64 {
        self.distance() * 0.01
    }

    /// Projects a camera-space point to pixel coordinates and depth
    pub fn project(&self, camera_point: &Vec3, width: f64, height: f64) -> Option<([f64; 2], f64)> {
        let depth = -camera_point[2];
        if depth <= self.near_plane() {
            return None;
        }
        let s = self.projection_scale(height);
        Some((
            [
                width / 2.0 + s * camera_point[0] / depth,
                height / 2.0 - s * camera_point[1] / depth,
            ],
            depth,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const UNIT_BOUNDS: Bounds = [-0.5, 0.5, -0.5, 0.5, -0.5, 0.5];

    #[test]
    fn reset_centers_and_fits() {
        let mut camera = Camera::default();
        camera.reset(&[1.0, 3.0, -1.0, 1.0, 0.0, 0.0]);
        assert_eq!(camera.focal_point(), [2.0, 0.0, 0.0]);
        let radius = 8f64.sqrt() * 0.5;
        assert_relative_eq!(camera.distance(), radius / 15f64.to_radians().sin(), epsilon = 1e-12);
        assert_relative_eq!(camera.view_plane_normal()[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn reset_handles_degenerate_bounds() {
        let mut camera = Camera::default();
        camera.reset(&[0.0; 6]);
        assert_relative_eq!(camera.distance(), 0.5 / 15f64.to_radians().sin(), epsilon = 1e-12);
    }

    #[test]
    fn zoom_multiplies_fitted_scale() {
        let mut camera = Camera::default();
        camera.reset(&UNIT_BOUNDS);
        let fitted = camera.projection_scale(300.0);
        camera.zoom(1.5);
        assert_relative_eq!(camera.projection_scale(300.0), fitted * 1.5, max_relative = 1e-12);
        // the camera does not move
        assert_relative_eq!(camera.distance(), 0.5 * 3f64.sqrt() / 15f64.to_radians().sin(), epsilon = 1e-12);
    }

    #[test]
    fn zoom_ignores_non_positive_factor() {
        let mut camera = Camera::default();
        camera.zoom(0.0);
        assert_eq!(camera.view_angle(), 30.0);
    }

    #[test]
    fn dolly_moves_towards_focal_point() {
        let mut camera = Camera::default();
        camera.reset(&UNIT_BOUNDS);
        let before = camera.distance();
        camera.dolly(2.0);
        assert_relative_eq!(camera.distance(), before / 2.0, epsilon = 1e-12);
        assert_eq!(camera.focal_point(), [0.0; 3]);
    }

    #[test]
    fn azimuth_keeps_distance() {
        let mut camera = Camera::default();
        camera.azimuth(90.0);
        let p = camera.position();
        assert_relative_eq!(p[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(camera.distance(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn elevation_raises_camera() {
        let mut camera = Camera::default();
        camera.elevation(30.0);
        camera.orthogonalize_view_up();
        assert!(camera.position()[1] > 0.0);
        assert_relative_eq!(dot(&camera.view_up(), &camera.direction_of_projection()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn roll_turns_view_up() {
        let mut camera = Camera::default();
        camera.roll(90.0);
        let up = camera.view_up();
        assert_relative_eq!(up[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(up[0].abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn pan_moves_both_points() {
        let mut camera = Camera::default();
        camera.pan(10.0, 0.0, 300.0);
        assert!(camera.focal_point()[0] < 0.0);
        assert_relative_eq!(camera.distance(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn focal_point_projects_to_center() {
        let mut camera = Camera::default();
        camera.reset(&UNIT_BOUNDS);
        let p = camera.to_camera_space(&camera.focal_point());
        let (screen, depth) = camera.project(&p, 300.0, 200.0).unwrap();
        assert_relative_eq!(screen[0], 150.0, epsilon = 1e-9);
        assert_relative_eq!(screen[1], 100.0, epsilon = 1e-9);
        assert_relative_eq!(depth, camera.distance(), epsilon = 1e-12);
    }

    #[test]
    fn points_behind_camera_are_rejected() {
        let camera = Camera::default();
        let p = camera.to_camera_space(&[0.0, 0.0, 2.0]);
        assert!(camera.project(&p, 100.0, 100.0).is_none());
    }
}
