//! Built-in specimens
//!
//! Factories for the specimens shipped with the viewer:
//!
//! - [`Ammonite`] - coiled cephalopod shell with septa and siphuncle
//! - [`Trilobite`] - three-lobed arthropod exoskeleton
//! - [`Geode`] - amethyst geode with rind, agate bands and crystals
//!
//! Each factory returns a [`SpecimenModel`](specimen_scene::SpecimenModel)
//! with its components, labels and Markdown description.

mod ammonite;
mod geode;
mod shapes;
mod trilobite;

pub use ammonite::Ammonite;
pub use geode::Geode;
pub use trilobite::Trilobite;

use specimen_scene::SpecimenCatalog;

/// Catalog with every built-in specimen, in menu order
pub fn builtin_catalog() -> SpecimenCatalog {
    let mut catalog = SpecimenCatalog::new();
    catalog.register(Ammonite);
    catalog.register(Trilobite);
    catalog.register(Geode);
    log::debug!("Registered {} built-in specimens", catalog.len());
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = builtin_catalog();
        assert_eq!(
            catalog.keys().collect::<Vec<_>>(),
            vec!["ammonite", "trilobite", "geode"]
        );
        for factory in catalog.iter() {
            factory.build().validate().unwrap();
        }
    }
}
