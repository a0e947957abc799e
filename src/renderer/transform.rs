use nalgebra_glm as glm;

use crate::settings::RenderSettings;

/// Model, view and projection matrices plus the spin that drives the model
/// matrix. The view is fixed at construction; everything else is rebuilt by
/// [`TransformState::update`] once per drawn frame.
#[derive(Debug, Clone)]
pub struct TransformState {
    model: glm::Mat4,
    view: glm::Mat4,
    projection: glm::Mat4,
    mvp: glm::Mat4,
    /// Accumulated spin in degrees. Never wrapped; reduced mod 360 only for the matrix.
    rotation_degrees: f64,
    angular_velocity: f32,
    fov_y: f32,
    near: f32,
    far: f32,
}

impl TransformState {
    pub fn new(settings: &RenderSettings) -> Self {
        let eye = glm::vec3(0.0, 0.0, settings.camera_distance);
        let view = glm::look_at(&eye, &glm::vec3(0.0, 0.0, 0.0), &glm::vec3(0.0, 1.0, 0.0));
        Self {
            model: glm::Mat4::identity(),
            view,
            projection: glm::Mat4::identity(),
            mvp: view,
            rotation_degrees: 0.0,
            angular_velocity: settings.angular_velocity,
            fov_y: settings.fov_y_degrees.to_radians(),
            near: settings.near_plane,
            far: settings.far_plane,
        }
    }

    /// Rebuild projection from the viewport, spin the model by
    /// `angular_velocity * delta_seconds`, and recompose the MVP.
    pub fn update(&mut self, viewport_width: u32, viewport_height: u32, delta_seconds: f32) {
        let aspect = viewport_width.max(1) as f32 / viewport_height.max(1) as f32;
        self.projection = glm::perspective(aspect, self.fov_y, self.near, self.far);

        self.rotation_degrees += f64::from(delta_seconds) * f64::from(self.angular_velocity);
        let angle = self.rotation_degrees.rem_euclid(360.0).to_radians() as f32;
        self.model = glm::rotate_y(&glm::Mat4::identity(), angle);

        self.mvp = self.projection * self.view * self.model;
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn model(&self) -> &glm::Mat4 {
        &self.model
    }

    pub fn view(&self) -> &glm::Mat4 {
        &self.view
    }

    pub fn projection(&self) -> &glm::Mat4 {
        &self.projection
    }

    pub fn mvp(&self) -> &glm::Mat4 {
        &self.mvp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_accumulates_per_frame() {
        let mut transform = TransformState::new(&RenderSettings::default());
        let mut angles = Vec::new();
        for _ in 0..3 {
            transform.update(800, 600, 0.1);
            angles.push(transform.rotation_degrees());
        }
        assert!((angles[0] - 2.0).abs() < 1e-5);
        assert!((angles[1] - 4.0).abs() < 1e-5);
        assert!((angles[2] - 6.0).abs() < 1e-5);
    }

    #[test]
    fn view_places_origin_in_front_of_camera() {
        let transform = TransformState::new(&RenderSettings::default());
        let origin = transform.view() * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((origin.z + 5.0).abs() < 1e-5);
        assert!(origin.x.abs() < 1e-5);
    }

    #[test]
    fn mvp_is_projection_view_model() {
        let mut transform = TransformState::new(&RenderSettings::default());
        transform.update(640, 480, 4.5);
        let expected = transform.projection() * transform.view() * transform.model();
        assert!(transform
            .mvp()
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| (a - b).abs() < 1e-6));
    }

    #[test]
    fn quarter_turn_maps_x_axis_onto_negative_z() {
        let mut transform = TransformState::new(&RenderSettings::default());
        // 20 deg/s for 4.5 s
        transform.update(100, 100, 4.5);
        let p = transform.model() * glm::vec4(1.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn spin_keeps_increasing_after_a_long_run() {
        let mut transform = TransformState::new(&RenderSettings::default());
        transform.update(800, 600, 419_430.4);
        let before = transform.rotation_degrees();
        transform.update(800, 600, 0.016);
        let after = transform.rotation_degrees();
        assert!(after > before);
        assert!((after - before - 0.32).abs() < 1e-6);
    }

    #[test]
    fn quarter_turn_holds_after_many_revolutions() {
        let mut transform = TransformState::new(&RenderSettings::default());
        // 1000 full turns plus 90 degrees
        transform.update(100, 100, 18_004.5);
        let p = transform.model() * glm::vec4(1.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn projection_tracks_aspect_ratio() {
        let mut transform = TransformState::new(&RenderSettings::default());
        transform.update(800, 400, 0.0);
        let wide = *transform.projection();
        transform.update(400, 400, 0.0);
        let square = *transform.projection();
        assert!((wide[(0, 0)] * 2.0 - square[(0, 0)]).abs() < 1e-5);
        assert!((wide[(1, 1)] - square[(1, 1)]).abs() < 1e-5);
    }

    #[test]
    fn zero_height_viewport_does_not_divide_by_zero() {
        let mut transform = TransformState::new(&RenderSettings::default());
        transform.update(800, 0, 0.016);
        assert!(transform.mvp().iter().all(|v| v.is_finite()));
    }
}
