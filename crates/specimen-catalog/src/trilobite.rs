//! Trilobite: three-lobed Paleozoic arthropod

use lin_alg::f32::Vec3;
use specimen_scene::{NodeSpec, SpecimenFactory, SpecimenModel};

use crate::shapes::{about_x, cone, cuboid, cylinder, rgb, sphere};

/// Thoracic segments between head and tail shields
const THORAX_SEGMENTS: usize = 9;
const SEGMENT_LENGTH: f32 = 0.45;
/// Position of the head shield along the body axis
const HEAD_Z: f32 = 2.6;

pub struct Trilobite;

impl Trilobite {
    fn cephalon() -> NodeSpec {
        let shield = rgb(92, 78, 64);

        NodeSpec::group("cephalon")
            .at(Vec3::new(0.0, 0.0, HEAD_Z))
            .with_child(cylinder("head_shield", 1.8, 0.3, shield))
            .with_child(sphere("glabella", 0.55, rgb(110, 94, 76)).at(Vec3::new(0.0, 0.3, 0.2)))
            .with_child(
                cone("genal_spine_left", 0.12, 2.0, shield)
                    .rotated(about_x(-std::f32::consts::FRAC_PI_2))
                    .at(Vec3::new(-1.7, 0.0, -1.0)),
            )
            .with_child(
                cone("genal_spine_right", 0.12, 2.0, shield)
                    .rotated(about_x(-std::f32::consts::FRAC_PI_2))
                    .at(Vec3::new(1.7, 0.0, -1.0)),
            )
    }

    /// Eyes sit on the head shield but toggle on their own
    fn eyes() -> NodeSpec {
        let eye = rgb(60, 52, 44);
        NodeSpec::group("eyes")
            .at(Vec3::new(0.0, 0.0, HEAD_Z))
            .with_child(sphere("eye_left", 0.25, eye).at(Vec3::new(-0.9, 0.35, 0.0)))
            .with_child(sphere("eye_right", 0.25, eye).at(Vec3::new(0.9, 0.35, 0.0)))
    }

    fn thorax() -> NodeSpec {
        let axis = rgb(120, 100, 80);
        let pleura = rgb(98, 84, 68);
        let start = 1.6;

        let mut thorax = NodeSpec::group("thorax");
        for i in 0..THORAX_SEGMENTS {
            let z = start - i as f32 * SEGMENT_LENGTH;
            let n = i + 1;
            let segment = NodeSpec::group(format!("segment_{}", n))
                .at(Vec3::new(0.0, 0.0, z))
                .with_child(cuboid(format!("axial_ring_{}", n), [0.8, 0.35, 0.4], axis))
                .with_child(
                    cuboid(format!("pleura_left_{}", n), [1.3, 0.2, 0.38], pleura)
                        .at(Vec3::new(-1.05, -0.05, 0.0)),
                )
                .with_child(
                    cuboid(format!("pleura_right_{}", n), [1.3, 0.2, 0.38], pleura)
                        .at(Vec3::new(1.05, -0.05, 0.0)),
                );
            thorax = thorax.with_child(segment);
        }
        thorax
    }

    fn pygidium() -> NodeSpec {
        let z = 1.6 - THORAX_SEGMENTS as f32 * SEGMENT_LENGTH - 0.4;
        NodeSpec::group("pygidium")
            .at(Vec3::new(0.0, 0.0, z))
            .with_child(cylinder("tail_shield", 1.2, 0.25, rgb(92, 78, 64)))
    }
}

impl SpecimenFactory for Trilobite {
    fn key(&self) -> &str {
        "trilobite"
    }

    fn display_name(&self) -> &str {
        "Trilobite"
    }

    fn build(&self) -> SpecimenModel {
        let root = NodeSpec::group("trilobite")
            .with_child(Self::cephalon())
            .with_child(Self::eyes())
            .with_child(Self::thorax())
            .with_child(Self::pygidium());

        SpecimenModel::new(root)
            .component("cephalon", "Cephalon (Head)", "cephalon")
            .component("eyes", "Compound Eyes", "eyes")
            .component("thorax", "Thorax", "thorax")
            .component("pygidium", "Pygidium (Tail)", "pygidium")
            .label("cephalon", "Glabella", Vec3::new(0.0, 0.9, 0.2))
            .label("cephalon", "Genal spine", Vec3::new(-1.7, 0.0, -2.0))
            .label("eyes", "Compound eye", Vec3::new(-0.9, 0.7, 0.0))
            .label("thorax", "Axial lobe", Vec3::new(0.0, 0.5, 0.0))
            .label("thorax", "Pleural lobe", Vec3::new(1.4, 0.2, 0.0))
            .label("pygidium", "Pygidium", Vec3::new(0.0, 0.4, 0.0))
            .description(include_str!("../descriptions/trilobite.md"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_is_valid() {
        let model = Trilobite.build();
        model.validate().unwrap();
        assert_eq!(model.components.len(), 4);
        assert_eq!(model.label_count(), 6);
        assert!(model.root.find(&format!("segment_{}", THORAX_SEGMENTS)).is_some());
    }

    #[test]
    fn test_node_names_unique() {
        let model = Trilobite.build();
        let mut names = Vec::new();
        model.root.walk(&mut |n| names.push(n.name.clone()));
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
