//! Turns browser state into what the viewport and caption should show.

use log::debug;

use crate::browser::{AssetIndex, BrowserSnapshot, Category, Orientation, PreviewKind, RefreshLevel};
use crate::catalog::{AssetCatalog, AssetHandle, AssetLookup};

/// Caption used when the entry has no name or does not exist
pub const PLACEHOLDER_CAPTION: &str = "Select a category:";

const MEMBERS_SUFFIX: &str = " (Members)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Nothing to draw (catalog miss)
    Hidden,
    Graphic(AssetHandle),
    Model {
        model: AssetHandle,
        orientation: Orientation,
    },
    /// All parts share one orientation
    Composite {
        parts: Vec<AssetHandle>,
        orientation: Orientation,
    },
}

impl Preview {
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Preview::Model { orientation, .. } | Preview::Composite { orientation, .. } => {
                Some(*orientation)
            }
            Preview::Hidden | Preview::Graphic(_) => None,
        }
    }

    /// Asset handles this preview puts on screen
    pub fn handles(&self) -> &[AssetHandle] {
        match self {
            Preview::Hidden => &[],
            Preview::Graphic(handle) | Preview::Model { model: handle, .. } => {
                std::slice::from_ref(handle)
            }
            Preview::Composite { parts, .. } => parts,
        }
    }

    fn set_orientation(&mut self, next: Orientation) {
        match self {
            Preview::Model { orientation, .. } | Preview::Composite { orientation, .. } => {
                *orientation = next;
            }
            Preview::Hidden | Preview::Graphic(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedView {
    pub category: Category,
    pub index: AssetIndex,
    pub preview: Preview,
    pub caption: String,
}

/// Build the full view for a snapshot
pub fn project(snapshot: &BrowserSnapshot, catalog: &impl AssetCatalog) -> ProjectedView {
    ProjectedView {
        category: snapshot.category,
        index: snapshot.index,
        preview: preview(snapshot, catalog),
        caption: caption(snapshot.category, snapshot.index, catalog),
    }
}

fn preview(snapshot: &BrowserSnapshot, catalog: &impl AssetCatalog) -> Preview {
    let Some(lookup) = catalog.lookup(snapshot.category, snapshot.index) else {
        return Preview::Hidden;
    };
    let orientation = snapshot.orientation;
    match (snapshot.category.preview_kind(), lookup) {
        (PreviewKind::Graphic, lookup) => match lookup.handles().first() {
            Some(handle) => Preview::Graphic(*handle),
            None => Preview::Hidden,
        },
        (PreviewKind::Model, lookup) => match lookup.handles().first() {
            Some(handle) => Preview::Model {
                model: *handle,
                orientation,
            },
            None => Preview::Hidden,
        },
        (PreviewKind::Composite, AssetLookup::Parts(parts)) if !parts.is_empty() => {
            Preview::Composite { parts, orientation }
        }
        (PreviewKind::Composite, AssetLookup::Single(handle)) => Preview::Composite {
            parts: vec![handle],
            orientation,
        },
        (PreviewKind::Composite, AssetLookup::Parts(_)) => Preview::Hidden,
    }
}

/// Caption text for an entry. Misses fall back to the placeholder.
pub fn caption(category: Category, index: AssetIndex, catalog: &impl AssetCatalog) -> String {
    let name = match category {
        Category::Items => catalog
            .name(category, index)
            .map(|name| name.replace(MEMBERS_SUFFIX, "")),
        Category::Npcs | Category::Chatheads => catalog.name(category, index).map(str::to_string),
        Category::Sprites | Category::Models => None,
    };
    name.unwrap_or_else(|| PLACEHOLDER_CAPTION.to_string())
}

/// Part handles currently on screen. Swapping in a new set reports the ones
/// that have to come down before the next preview is drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartTracker {
    shown: Vec<AssetHandle>,
}

impl PartTracker {
    pub fn shown(&self) -> &[AssetHandle] {
        &self.shown
    }

    /// Record `next` as on screen and return the previous handles not in it
    pub fn replace(&mut self, next: &[AssetHandle]) -> Vec<AssetHandle> {
        let stale = self
            .shown
            .iter()
            .copied()
            .filter(|handle| !next.contains(handle))
            .collect();
        self.shown = next.to_vec();
        stale
    }

    pub fn clear(&mut self) -> Vec<AssetHandle> {
        std::mem::take(&mut self.shown)
    }
}

/// Holds the view currently on screen and rebuilds as much of it as a refresh asks for
#[derive(Debug, Clone, Default)]
pub struct ViewProjector {
    view: Option<ProjectedView>,
    parts: PartTracker,
}

impl ViewProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&ProjectedView> {
        self.view.as_ref()
    }

    pub fn parts(&self) -> &PartTracker {
        &self.parts
    }

    /// Drop the view. Returns every handle that was on screen.
    pub fn clear(&mut self) -> Vec<AssetHandle> {
        self.view = None;
        self.parts.clear()
    }

    /// Apply a refresh and return the handles that are no longer shown.
    /// A closed browser (no snapshot) clears the view instead of failing.
    pub fn apply(
        &mut self,
        level: RefreshLevel,
        snapshot: Option<&BrowserSnapshot>,
        catalog: &impl AssetCatalog,
    ) -> Vec<AssetHandle> {
        let Some(snapshot) = snapshot else {
            return self.clear();
        };

        if level == RefreshLevel::Viewport {
            if let Some(view) = self.view.as_mut() {
                if view.category == snapshot.category && view.index == snapshot.index {
                    view.preview.set_orientation(snapshot.orientation);
                    return Vec::new();
                }
            }
        }

        let view = project(snapshot, catalog);
        let stale = self.parts.replace(view.preview.handles());
        debug!(
            "projected {:?} #{} ({} parts, {} stale)",
            view.category,
            view.index,
            view.preview.handles().len(),
            stale.len()
        );
        self.view = Some(view);
        stale
    }
}
