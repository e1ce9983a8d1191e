//! Camera and view management
//!
//! This module provides the orbit camera used to look at a specimen:
//! - [`CameraView`]: origin, rotation and distance of the eye
//! - [`Camera`]: interactive controller with a home view to reset to

use lin_alg::f32::Vec3;
use specimen_settings::CameraSettings;
use std::f32::consts::PI;

use crate::transform::Quat;

/// Near clipping distance used for projection
const NEAR_PLANE: f32 = 0.1;

/// Orbit view state
///
/// The eye sits at `origin + rotation * (0, 0, distance)` and looks at `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraView {
    /// Center of rotation in world space
    pub origin: Vec3,
    /// Orientation of the eye around the origin
    pub rotation: Quat,
    /// Distance from the origin to the eye
    pub distance: f32,
    /// Vertical field of view (degrees)
    pub fov: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            origin: Vec3::new(0.0, 0.0, 0.0),
            rotation: Quat::identity(),
            distance: 20.0,
            fov: 45.0,
        }
    }
}

impl CameraView {
    /// Get the camera position in world space
    pub fn world_position(&self) -> Vec3 {
        self.origin + self.rotation.rotate(Vec3::new(0.0, 0.0, self.distance))
    }
}

/// Interactive camera controller
#[derive(Debug, Clone, Default)]
pub struct Camera {
    view: CameraView,
    /// View restored by [`Camera::reset_view`]
    home: CameraView,
}

impl Camera {
    /// Create a camera with default view
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera using configured defaults
    pub fn with_settings(settings: &CameraSettings) -> Self {
        let view = CameraView {
            fov: settings.fov,
            ..CameraView::default()
        };
        Self {
            home: view.clone(),
            view,
        }
    }

    pub fn view(&self) -> &CameraView {
        &self.view
    }

    pub fn set_view(&mut self, view: CameraView) {
        self.view = view;
    }

    pub fn home(&self) -> &CameraView {
        &self.home
    }

    /// Get the camera position in world space
    pub fn world_position(&self) -> Vec3 {
        self.view.world_position()
    }

    /// Orbit around the origin (radians)
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let yaw = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), yaw);
        let pitch = Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), pitch);
        self.view.rotation = (yaw * self.view.rotation * pitch).normalized();
    }

    /// Scale the distance to the origin
    pub fn zoom(&mut self, factor: f32) {
        if factor > 0.0 {
            self.view.distance = (self.view.distance * factor).max(NEAR_PLANE * 2.0);
        }
    }

    /// Frame a bounding box, resetting rotation
    pub fn fit_to(&mut self, bbox_min: Vec3, bbox_max: Vec3, settings: &CameraSettings) {
        let center = Vec3::new(
            (bbox_min.x + bbox_max.x) * 0.5,
            (bbox_min.y + bbox_max.y) * 0.5,
            (bbox_min.z + bbox_max.z) * 0.5,
        );
        let radius = (bbox_max - bbox_min).magnitude() * 0.5;

        let fov_rad = settings.fov * PI / 180.0;
        let distance = radius / (fov_rad * 0.5).sin() * settings.fit_padding;

        self.view = CameraView {
            origin: center,
            rotation: Quat::identity(),
            distance: distance.max(settings.min_distance),
            fov: settings.fov,
        };
    }

    /// Record the current view as the home view
    pub fn set_home(&mut self) {
        self.home = self.view.clone();
    }

    /// Return to the home view
    pub fn reset_view(&mut self) {
        self.view = self.home.clone();
    }

    /// Project a world point to viewport pixels (origin top-left)
    ///
    /// Returns `None` for points at or behind the near plane.
    pub fn project(&self, point: Vec3, viewport: [f32; 2]) -> Option<[f32; 2]> {
        let [width, height] = viewport;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        // Camera space looks down -z
        let local = self.view.rotation.conjugate().rotate(point - self.world_position());
        let depth = -local.z;
        if depth <= NEAR_PLANE {
            return None;
        }

        let f = 1.0 / (self.view.fov * PI / 180.0 * 0.5).tan();
        let aspect = width / height;
        let ndc_x = local.x * f / aspect / depth;
        let ndc_y = local.y * f / depth;

        Some([(ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height])
    }
}
