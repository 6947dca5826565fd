use serde::{Deserialize, Serialize};

/// The fixed set of browsable asset groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Sprites,
    Models,
    Npcs,
    Chatheads,
    Items,
}

/// How a category's assets are previewed in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Flat image, orientation does not apply
    Graphic,
    /// One 3D model
    Model,
    /// Several model parts drawn together at the same orientation
    Composite,
}

impl Category {
    /// Tab order
    pub const ALL: [Category; 5] = [
        Category::Sprites,
        Category::Models,
        Category::Npcs,
        Category::Chatheads,
        Category::Items,
    ];

    /// Stable identifier, also used in the category label
    pub fn name(self) -> &'static str {
        match self {
            Category::Sprites => "Sprites",
            Category::Models => "Models",
            Category::Npcs => "Npcs",
            Category::Chatheads => "Chatheads",
            Category::Items => "Items",
        }
    }

    /// Text shown on the category tab
    pub fn tab_label(self) -> &'static str {
        match self {
            Category::Npcs => "NPCs",
            other => other.name(),
        }
    }

    pub fn preview_kind(self) -> PreviewKind {
        match self {
            Category::Sprites => PreviewKind::Graphic,
            Category::Models | Category::Chatheads | Category::Items => PreviewKind::Model,
            Category::Npcs => PreviewKind::Composite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sprites() {
        assert_eq!(Category::default(), Category::Sprites);
        assert_eq!(Category::ALL[0], Category::Sprites);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Npcs.name(), "Npcs");
        assert_eq!(Category::Npcs.tab_label(), "NPCs");
        assert_eq!(Category::Chatheads.tab_label(), "Chatheads");
    }

    #[test]
    fn test_preview_kinds() {
        assert_eq!(Category::Sprites.preview_kind(), PreviewKind::Graphic);
        assert_eq!(Category::Npcs.preview_kind(), PreviewKind::Composite);
        for category in [Category::Models, Category::Chatheads, Category::Items] {
            assert_eq!(category.preview_kind(), PreviewKind::Model);
        }
    }
}
