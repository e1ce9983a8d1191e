//! Amethyst geode: hollow volcanic nodule lined with quartz crystals

use lin_alg::f32::Vec3;
use specimen_scene::{NodeSpec, Quat, SpecimenFactory, SpecimenModel};

use crate::shapes::{about_y, cone, rgb, ring_points, sphere, torus};

const RIND_RADIUS: f32 = 3.0;
/// Crystal rings from the rim towards the cavity floor: (count, ring radius, height)
const CRYSTAL_RINGS: [(usize, f32, f32); 3] = [(10, 2.2, 0.6), (8, 1.7, -0.2), (6, 1.0, -1.0)];

pub struct Geode;

impl Geode {
    fn crystals() -> NodeSpec {
        let violet = rgb(138, 84, 178);
        let mut crystals = NodeSpec::group("crystals");

        for (ring, (count, radius, y)) in CRYSTAL_RINGS.iter().enumerate() {
            let mut group = NodeSpec::group(format!("crystal_ring_{}", ring + 1));
            for (i, (angle, position)) in ring_points(*count, *radius, *y).enumerate() {
                // Point inward and up, towards the cavity center
                let inward = Quat::from_axis_angle(Vec3::new(angle.sin(), 0.0, -angle.cos()), 0.9);
                group = group.with_child(
                    cone(format!("crystal_{}_{}", ring + 1, i + 1), 0.22, 0.8, violet)
                        .rotated(inward * about_y(angle))
                        .at(position),
                );
            }
            crystals = crystals.with_child(group);
        }
        crystals
    }

    fn agate() -> NodeSpec {
        let bands = [rgb(214, 206, 222), rgb(182, 176, 196), rgb(226, 222, 230)];
        let mut agate = NodeSpec::group("agate");
        for (i, color) in bands.into_iter().enumerate() {
            let radius = RIND_RADIUS - 0.35 - i as f32 * 0.18;
            agate = agate.with_child(torus(format!("agate_band_{}", i + 1), radius, 0.08, color));
        }
        agate
    }
}

impl SpecimenFactory for Geode {
    fn key(&self) -> &str {
        "geode"
    }

    fn display_name(&self) -> &str {
        "Amethyst Geode"
    }

    fn build(&self) -> SpecimenModel {
        let root = NodeSpec::group("geode")
            .with_child(
                NodeSpec::group("rind")
                    .with_child(sphere("rind_shell", RIND_RADIUS, rgb(120, 112, 104))),
            )
            .with_child(Self::agate())
            .with_child(Self::crystals());

        SpecimenModel::new(root)
            .component("rind", "Outer Rind", "rind")
            .component("agate", "Agate Banding", "agate")
            .component("crystals", "Amethyst Crystals", "crystals")
            .label("rind", "Basalt rind", Vec3::new(0.0, RIND_RADIUS + 0.2, 0.0))
            .label("agate", "Chalcedony band", Vec3::new(RIND_RADIUS - 0.35, 0.0, 0.0))
            .label("crystals", "Crystal point", Vec3::new(0.0, 0.6, 2.2))
            .label("crystals", "Cavity", Vec3::new(0.0, 0.0, 0.0))
            .description(include_str!("../descriptions/geode.md"))
    }
}
