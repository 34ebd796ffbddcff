use glam::{Mat4, Vec3};

/// Fly camera with position, yaw, pitch, and projection parameters.
///
/// Forward/backward/strafe movement is projected onto the ground plane so
/// walking the terrain never changes altitude; vertical motion goes through
/// `move_up`/`move_down` only.
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(50.0, 15.0, 50.0),
            yaw: -90.0_f32.to_radians(),
            pitch: -20.0_f32.to_radians(),
            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.01,
            far: 1000.0,
            speed: 10.0,
            sensitivity: 0.002,
        }
    }
}

impl FlyCamera {
    /// View direction including pitch.
    pub fn direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// View direction projected onto the ground plane.
    pub fn ground_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.ground_forward().cross(Vec3::Y).normalize()
    }

    pub fn move_forward(&mut self, dt: f32) {
        self.position += self.ground_forward() * self.speed * dt;
    }

    pub fn move_backward(&mut self, dt: f32) {
        self.position -= self.ground_forward() * self.speed * dt;
    }

    pub fn move_left(&mut self, dt: f32) {
        self.position -= self.right() * self.speed * dt;
    }

    pub fn move_right(&mut self, dt: f32) {
        self.position += self.right() * self.speed * dt;
    }

    pub fn move_up(&mut self, dt: f32) {
        self.position.y += self.speed * dt;
    }

    pub fn move_down(&mut self, dt: f32) {
        self.position.y -= self.speed * dt;
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_produces_valid_matrix() {
        let cam = FlyCamera::default();
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn ground_movement_keeps_altitude() {
        let mut cam = FlyCamera::default();
        let y = cam.position.y;
        cam.move_forward(1.0);
        cam.move_left(0.5);
        assert_eq!(cam.position.y, y);
        assert_ne!(cam.position, FlyCamera::default().position);
    }

    #[test]
    fn vertical_movement_changes_only_altitude() {
        let mut cam = FlyCamera::default();
        let start = cam.position;
        cam.move_up(1.0);
        assert_eq!(cam.position.x, start.x);
        assert_eq!(cam.position.z, start.z);
        assert!(cam.position.y > start.y);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut cam = FlyCamera::default();
        cam.rotate(0.0, -100_000.0);
        assert!(cam.pitch <= 89.0_f32.to_radians());
        cam.rotate(0.0, 100_000.0);
        assert!(cam.pitch >= -89.0_f32.to_radians());
    }

    #[test]
    fn view_projection_is_deterministic() {
        let cam = FlyCamera::default();
        assert_eq!(
            cam.view_projection().to_cols_array(),
            cam.view_projection().to_cols_array()
        );
    }
}
