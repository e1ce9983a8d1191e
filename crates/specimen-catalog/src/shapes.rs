//! Shared geometry helpers for the built-in specimens

use lin_alg::f32::Vec3;
use specimen_scene::{MeshData, NodeSpec, Primitive, Quat};

/// Opaque color from 0-255 components
pub fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Rotation about the vertical axis
pub fn about_y(angle: f32) -> Quat {
    Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), angle)
}

/// Rotation about the x axis
pub fn about_x(angle: f32) -> Quat {
    Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), angle)
}

pub fn sphere(name: impl Into<String>, radius: f32, color: [f32; 4]) -> NodeSpec {
    NodeSpec::mesh(name, MeshData::new(Primitive::Sphere { radius }, color))
}

pub fn cuboid(name: impl Into<String>, size: [f32; 3], color: [f32; 4]) -> NodeSpec {
    NodeSpec::mesh(name, MeshData::new(Primitive::Cuboid { size }, color))
}

pub fn cylinder(name: impl Into<String>, radius: f32, height: f32, color: [f32; 4]) -> NodeSpec {
    NodeSpec::mesh(name, MeshData::new(Primitive::Cylinder { radius, height }, color))
}

pub fn cone(name: impl Into<String>, radius: f32, height: f32, color: [f32; 4]) -> NodeSpec {
    NodeSpec::mesh(name, MeshData::new(Primitive::Cone { radius, height }, color))
}

pub fn torus(name: impl Into<String>, radius: f32, tube: f32, color: [f32; 4]) -> NodeSpec {
    NodeSpec::mesh(name, MeshData::new(Primitive::Torus { radius, tube }, color))
}

/// Points evenly spaced on a circle in the xz plane
pub fn ring_points(count: usize, radius: f32, y: f32) -> impl Iterator<Item = (f32, Vec3)> {
    (0..count).map(move |i| {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU;
        (angle, Vec3::new(radius * angle.cos(), y, radius * angle.sin()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(255, 0, 51), [1.0, 0.0, 0.2, 1.0]);
    }

    #[test]
    fn test_ring_points() {
        let points: Vec<_> = ring_points(4, 2.0, 1.0).collect();
        assert_eq!(points.len(), 4);
        assert!((points[0].1.x - 2.0).abs() < 1e-6);
        assert!((points[1].1.z - 2.0).abs() < 1e-6);
        assert!(points.iter().all(|(_, p)| p.y == 1.0));
    }
}
