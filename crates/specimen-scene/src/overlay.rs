//! Screen-space overlay elements
//!
//! The overlay is the 2D layer drawn on top of the 3D view. Each label owns
//! exactly one element here; the element carries what the label looks like on
//! screen this frame.

use std::fmt;

use ahash::AHashMap;

/// Handle to an overlay element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Display state of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Shown,
    Hidden,
}

impl Display {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Display::Shown
        } else {
            Display::Hidden
        }
    }

    pub fn is_shown(&self) -> bool {
        *self == Display::Shown
    }
}

/// A positioned screen element
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayElement {
    pub text: String,
    pub opacity: f32,
    pub display: Display,
    /// Pixel position, `None` until laid out or when off-screen
    pub position: Option<[f32; 2]>,
}

/// The overlay layer
#[derive(Debug, Default)]
pub struct Overlay {
    elements: AHashMap<ElementId, OverlayElement>,
    /// Attachment order, used for stacking
    order: Vec<ElementId>,
    next_id: u32,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new element
    pub fn create(&mut self, text: impl Into<String>, display: Display) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            OverlayElement {
                text: text.into(),
                opacity: 1.0,
                display,
                position: None,
            },
        );
        self.order.push(id);
        id
    }

    /// Detach an element; returns false if it was not attached
    pub fn detach(&mut self, id: ElementId) -> bool {
        if self.elements.remove(&id).is_some() {
            self.order.retain(|e| *e != id);
            true
        } else {
            false
        }
    }

    /// Detach several elements with a single pass over the stacking order
    ///
    /// Returns how many of them were attached.
    pub fn detach_all(&mut self, ids: impl IntoIterator<Item = ElementId>) -> usize {
        let before = self.elements.len();
        for id in ids {
            self.elements.remove(&id);
        }
        let detached = before - self.elements.len();
        if detached > 0 {
            let elements = &self.elements;
            self.order.retain(|id| elements.contains_key(id));
        }
        detached
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&OverlayElement> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut OverlayElement> {
        self.elements.get_mut(&id)
    }

    /// Number of attached elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Attached elements in stacking order
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &OverlayElement)> {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id).map(|e| (*id, e)))
    }
}
