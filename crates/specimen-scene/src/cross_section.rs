//! Cross-section cut through the specimen

use lin_alg::f32::Vec3;

/// Plane `normal . p = offset`; points on the normal's side are cut away
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Default for ClipPlane {
    /// Vertical cut through the origin, removing the +z half
    fn default() -> Self {
        Self {
            normal: Vec3::new(0.0, 0.0, 1.0),
            offset: 0.0,
        }
    }
}

impl ClipPlane {
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self {
            normal: normal.to_normalized(),
            offset,
        }
    }

    /// Signed distance of a point from the plane
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }

    /// Whether a world point survives the cut
    pub fn keeps(&self, point: Vec3) -> bool {
        self.distance(point) <= 0.0
    }
}

/// Cross-section state of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrossSection {
    pub enabled: bool,
    pub plane: ClipPlane,
}

impl CrossSection {
    /// Flip the cut on or off, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Whether a world point is drawn under the current state
    pub fn keeps(&self, point: Vec3) -> bool {
        !self.enabled || self.plane.keeps(point)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut cs = CrossSection::default();
        assert!(!cs.enabled);
        assert!(cs.toggle());
        assert!(!cs.toggle());
    }

    #[test]
    fn test_keeps_only_when_enabled() {
        let mut cs = CrossSection::default();
        let front = Vec3::new(0.0, 0.0, 2.0);
        let back = Vec3::new(0.0, 0.0, -2.0);

        assert!(cs.keeps(front));
        cs.toggle();
        assert!(!cs.keeps(front));
        assert!(cs.keeps(back));
    }

    #[test]
    fn test_plane_normalizes() {
        let plane = ClipPlane::new(Vec3::new(3.0, 0.0, 0.0), 1.0);
        assert_eq!(plane.distance(Vec3::new(4.0, 0.0, 0.0)), 3.0);
        assert!(plane.keeps(Vec3::new(0.5, 9.0, 9.0)));
    }
}
