// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orbit camera control
//!
//! The camera moves on a sphere around the world origin in response to
//! pointer drags, scales its position on scroll, and can re-frame itself
//! around a bounding volume. The camera is owned by the host scene and is
//! passed into every controller operation, so the controller itself only
//! holds the transient drag session.
//!
//! Spherical convention (Y up): `x = r sinφ sinθ`, `y = r cosφ`,
//! `z = r sinφ cosθ`, with φ measured from +Y and θ from +Z towards +X.

use crate::bounds::BoundingBox;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Radians of rotation per pixel of pointer movement
pub const ROTATE_SENSITIVITY: f64 = 0.01;
/// Minimum distance of the polar angle from either pole
pub const POLAR_EPSILON: f64 = 0.1;
/// Position scale applied when zooming out
pub const ZOOM_OUT_FACTOR: f64 = 1.1;
/// Position scale applied when zooming in
pub const ZOOM_IN_FACTOR: f64 = 0.9;

/// Initial camera placement of the viewer
pub const DEFAULT_CAMERA_POSITION: [f64; 3] = [10.0, 10.0, 10.0];

/// Perspective camera state as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Position in world space
    pub position: Point3<f64>,
    /// Point the camera looks at
    pub target: Point3<f64>,
    /// Up direction
    pub up: Vector3<f64>,
}

impl Camera {
    /// Create a camera at `position` looking at the origin
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            target: Point3::origin(),
            up: Vector3::y(),
        }
    }

    /// Re-orient the camera towards `target`
    #[inline]
    pub fn look_at(&mut self, target: Point3<f64>) {
        self.target = target;
    }

    /// Unit view direction (zero when position and target coincide)
    pub fn direction(&self) -> Vector3<f64> {
        (self.target - self.position)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Distance between position and target
    pub fn distance_to_target(&self) -> f64 {
        nalgebra::distance(&self.position, &self.target)
    }
}

impl Default for Camera {
    fn default() -> Self {
        let [x, y, z] = DEFAULT_CAMERA_POSITION;
        Self::new(Point3::new(x, y, z))
    }
}

/// Spherical coordinates relative to the orbit target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the target
    pub radius: f64,
    /// Polar angle from +Y
    pub phi: f64,
    /// Azimuth around +Y
    pub theta: f64,
}

impl Spherical {
    pub fn new(radius: f64, phi: f64, theta: f64) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert a Cartesian offset to spherical coordinates.
    /// The zero vector maps to radius, phi and theta of zero.
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        let radius = v.norm();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    /// Convert back to a Cartesian offset
    pub fn to_vector(&self) -> Vector3<f64> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Clamp phi into `[epsilon, PI - epsilon]`
    #[inline]
    pub fn clamp_phi(&mut self, epsilon: f64) {
        self.phi = self.phi.clamp(epsilon, PI - epsilon);
    }
}

/// Tuning constants for [`OrbitControls`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    /// Radians per pixel of drag
    pub sensitivity: f64,
    /// Polar angle margin kept from each pole
    pub min_polar_angle: f64,
    /// Scale applied on zoom-out
    pub zoom_out_factor: f64,
    /// Scale applied on zoom-in
    pub zoom_in_factor: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            sensitivity: ROTATE_SENSITIVITY,
            min_polar_angle: POLAR_EPSILON,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            zoom_in_factor: ZOOM_IN_FACTOR,
        }
    }
}

/// Transient mouse-down-to-mouse-up state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DragSession {
    active: bool,
    last_x: f64,
    last_y: f64,
}

/// Orbit camera controller
///
/// Drags rotate the camera around the world origin, preserving its
/// distance. Zoom scales the absolute position vector, so after
/// [`fit_to_bounds`](Self::fit_to_bounds) has aimed the camera at an
/// off-origin center, zooming also translates the camera, and the next
/// drag re-aims it at the origin.
#[derive(Debug, Clone, Default)]
pub struct OrbitControls {
    config: OrbitConfig,
    drag: DragSession,
}

impl OrbitControls {
    /// Create a controller with default tuning
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with custom tuning
    pub fn with_config(config: OrbitConfig) -> Self {
        Self {
            config,
            drag: DragSession::default(),
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Whether a drag session is active
    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Start a drag session at the given pointer position
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag = DragSession {
            active: true,
            last_x: x,
            last_y: y,
        };
    }

    /// Rotate the camera by the pointer movement since the last event.
    /// Does nothing when no drag session is active.
    pub fn continue_drag(&mut self, camera: &mut Camera, x: f64, y: f64) {
        if !self.drag.active {
            return;
        }

        let delta_x = x - self.drag.last_x;
        let delta_y = y - self.drag.last_y;

        let mut spherical = Spherical::from_vector(&camera.position.coords);
        spherical.theta -= delta_x * self.config.sensitivity;
        spherical.phi += delta_y * self.config.sensitivity;
        spherical.clamp_phi(self.config.min_polar_angle);

        camera.position = Point3::from(spherical.to_vector());
        camera.look_at(Point3::origin());

        self.drag.last_x = x;
        self.drag.last_y = y;
    }

    /// End the drag session. Idempotent.
    pub fn end_drag(&mut self) {
        self.drag.active = false;
    }

    /// Scale the camera position: `direction > 0` zooms out, `< 0` zooms in,
    /// zero leaves the camera untouched.
    ///
    /// Zoom factors do not invert each other: one step out followed by one
    /// step in leaves the position at 0.99 of where it started.
    pub fn zoom(&self, camera: &mut Camera, direction: f64) {
        let scale = if direction > 0.0 {
            self.config.zoom_out_factor
        } else if direction < 0.0 {
            self.config.zoom_in_factor
        } else {
            return;
        };
        camera.position.coords *= scale;
    }

    /// Apply a scroll-wheel `deltaY` (positive = scroll down = zoom out)
    #[inline]
    pub fn wheel(&self, camera: &mut Camera, delta_y: f64) {
        self.zoom(camera, delta_y);
    }

    /// Place the camera at `center + (d, d, d)` where `d` is the largest
    /// extent of `bounds`, looking at the center. No-op for empty bounds.
    ///
    /// The full box is in view for fields of view of 90 degrees or more;
    /// narrower cameras get an approximate framing.
    pub fn fit_to_bounds(&self, camera: &mut Camera, bounds: &BoundingBox) {
        if bounds.is_empty() {
            return;
        }

        let center = bounds.center();
        let max_dim = bounds.max_dimension();

        camera.position = center + Vector3::repeat(max_dim);
        camera.look_at(center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spherical_round_trip() {
        let v = Vector3::new(3.0, -2.0, 5.0);
        let back = Spherical::from_vector(&v).to_vector();
        assert_relative_eq!(back, v, epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_zero_vector() {
        let s = Spherical::from_vector(&Vector3::zeros());
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_spherical_axes() {
        let up = Spherical::from_vector(&Vector3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(up.radius, 2.0);
        assert_relative_eq!(up.phi, 0.0);

        let front = Spherical::from_vector(&Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(front.phi, PI / 2.0);
        assert_relative_eq!(front.theta, 0.0);
    }

    #[test]
    fn test_begin_drag_leaves_camera_untouched() {
        let mut controls = OrbitControls::new();
        let camera = Camera::default();
        controls.begin_drag(40.0, 12.0);
        assert!(controls.is_dragging());
        assert_eq!(camera, Camera::default());
    }

    #[test]
    fn test_horizontal_drag_rotates_azimuth() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 10.0));

        controls.begin_drag(0.0, 0.0);
        controls.continue_drag(&mut camera, -50.0, 0.0);

        let s = Spherical::from_vector(&camera.position.coords);
        assert_relative_eq!(s.theta, 0.5, epsilon = 1e-12);
        assert_relative_eq!(s.phi, PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(s.radius, 10.0, epsilon = 1e-12);
        assert_eq!(camera.target, Point3::origin());
    }

    #[test]
    fn test_drag_updates_reference_point() {
        let mut controls = OrbitControls::new();
        let mut a = Camera::new(Point3::new(0.0, 0.0, 10.0));
        let mut b = a;

        controls.begin_drag(0.0, 0.0);
        controls.continue_drag(&mut a, 10.0, 0.0);
        controls.continue_drag(&mut a, 20.0, 0.0);

        let mut single = OrbitControls::new();
        single.begin_drag(0.0, 0.0);
        single.continue_drag(&mut b, 20.0, 0.0);

        assert_relative_eq!(a.position, b.position, epsilon = 1e-12);
    }

    #[test]
    fn test_end_drag_is_idempotent() {
        let mut controls = OrbitControls::new();
        controls.begin_drag(1.0, 1.0);
        controls.end_drag();
        controls.end_drag();
        assert!(!controls.is_dragging());
    }

    #[test]
    fn test_zoom_direction() {
        let controls = OrbitControls::new();
        let mut camera = Camera::new(Point3::new(1.0, 2.0, 3.0));

        controls.zoom(&mut camera, 1.0);
        assert_relative_eq!(camera.position, Point3::new(1.1, 2.2, 3.3), epsilon = 1e-12);

        let mut camera = Camera::new(Point3::new(1.0, 2.0, 3.0));
        controls.zoom(&mut camera, -3.0);
        assert_relative_eq!(camera.position, Point3::new(0.9, 1.8, 2.7), epsilon = 1e-12);

        let mut camera = Camera::new(Point3::new(1.0, 2.0, 3.0));
        controls.zoom(&mut camera, 0.0);
        assert_eq!(camera.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_zoom_scales_absolute_position_not_target_offset() {
        let controls = OrbitControls::new();
        let mut camera = Camera::new(Point3::new(3.0, 3.0, 3.0));
        camera.look_at(Point3::new(1.0, 1.0, 1.0));

        controls.zoom(&mut camera, 1.0);

        // Offset to the target grows from 2 to 2.3 per axis: zoom plus a shift
        assert_relative_eq!(camera.position, Point3::new(3.3, 3.3, 3.3), epsilon = 1e-12);
        assert_eq!(camera.target, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_custom_config() {
        let mut controls = OrbitControls::with_config(OrbitConfig {
            zoom_out_factor: 2.0,
            ..OrbitConfig::default()
        });
        let mut camera = Camera::new(Point3::new(1.0, 0.0, 0.0));
        controls.wheel(&mut camera, 120.0);
        assert_eq!(camera.position, Point3::new(2.0, 0.0, 0.0));

        controls.begin_drag(0.0, 0.0);
        assert!(controls.is_dragging());
    }

    #[test]
    fn test_camera_direction() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(camera.direction(), Vector3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(camera.distance_to_target(), 5.0);

        let degenerate = Camera::new(Point3::origin());
        assert_eq!(degenerate.direction(), Vector3::zeros());
    }
}
