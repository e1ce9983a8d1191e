//! Ammonite: coiled, chambered cephalopod shell

use lin_alg::f32::Vec3;
use specimen_scene::{NodeSpec, SpecimenFactory, SpecimenModel};

use crate::shapes::{about_x, about_y, cylinder, rgb, ring_points, sphere, torus};

/// Number of whorls in the shell coil
const WHORLS: usize = 4;
/// Ratio between successive whorl sizes
const WHORL_RATIO: f32 = 0.62;
/// Septa per whorl
const SEPTA_PER_WHORL: usize = 8;

pub struct Ammonite;

impl Ammonite {
    fn shell() -> NodeSpec {
        let color = rgb(196, 164, 120);
        let mut shell = NodeSpec::group("shell");
        let mut radius = 3.0;
        let mut offset = 0.0;

        for i in 0..WHORLS {
            let tube = radius * 0.3;
            shell = shell.with_child(
                torus(format!("whorl_{}", i + 1), radius, tube, color)
                    .at(Vec3::new(offset, 0.0, 0.0)),
            );
            offset -= radius * (1.0 - WHORL_RATIO) * 0.5;
            radius *= WHORL_RATIO;
        }

        // Body chamber flare at the open end of the outer whorl
        shell.with_child(
            torus("aperture", 0.95, 0.18, rgb(174, 140, 98))
                .rotated(about_x(std::f32::consts::FRAC_PI_2))
                .at(Vec3::new(3.0, 0.0, 0.0)),
        )
    }

    fn septa() -> NodeSpec {
        let color = rgb(232, 220, 196);
        let mut chambers = NodeSpec::group("chambers");
        for (i, (angle, position)) in ring_points(SEPTA_PER_WHORL, 3.0, 0.0).enumerate() {
            chambers = chambers.with_child(
                cylinder(format!("septum_{}", i + 1), 0.85, 0.05, color)
                    .rotated(about_y(-angle) * about_x(std::f32::consts::FRAC_PI_2))
                    .at(position),
            );
        }
        NodeSpec::group("septa").with_child(chambers)
    }

    fn sutures() -> NodeSpec {
        let color = rgb(110, 82, 52);
        let mut sutures = NodeSpec::group("sutures");
        for (i, (_, position)) in ring_points(SEPTA_PER_WHORL, 3.9, 0.0).enumerate() {
            sutures =
                sutures.with_child(sphere(format!("suture_{}", i + 1), 0.12, color).at(position));
        }
        sutures
    }
}

impl SpecimenFactory for Ammonite {
    fn key(&self) -> &str {
        "ammonite"
    }

    fn display_name(&self) -> &str {
        "Ammonite"
    }

    fn build(&self) -> SpecimenModel {
        let root = NodeSpec::group("ammonite")
            .with_child(Self::shell())
            .with_child(Self::septa())
            .with_child(torus("siphuncle", 2.6, 0.08, rgb(150, 60, 48)))
            .with_child(Self::sutures());

        SpecimenModel::new(root)
            .component("shell", "Shell", "shell")
            .component("septa", "Septa & Chambers", "septa")
            .component("siphuncle", "Siphuncle", "siphuncle")
            .hidden_component("sutures", "Suture Lines", "sutures")
            .label("shell", "Body chamber", Vec3::new(3.0, 1.1, 0.0))
            .label("shell", "Aperture", Vec3::new(3.0, 0.0, 1.0))
            .label("shell", "Protoconch", Vec3::new(-1.2, 0.3, 0.0))
            .label("septa", "Septum", Vec3::new(0.0, 0.0, 3.0))
            .label("siphuncle", "Siphuncle", Vec3::new(-2.6, 0.0, 0.0))
            .label("sutures", "Suture line", Vec3::new(0.0, 0.0, -3.9))
            .description(include_str!("../descriptions/ammonite.md"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_is_valid() {
        let model = Ammonite.build();
        model.validate().unwrap();
        assert_eq!(model.components.len(), 4);
        assert_eq!(model.label_count(), 6);
        assert!(model.root.find("septum_8").is_some());
        assert!(model.root.find(&format!("whorl_{}", WHORLS)).is_some());
    }
}
