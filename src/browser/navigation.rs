use std::collections::HashMap;

use super::category::Category;

/// Index of one asset within a category
pub type AssetIndex = u32;

/// Last-viewed index per category. Categories never visited read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    indices: HashMap<Category, AssetIndex>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_index(&self, category: Category) -> AssetIndex {
        self.indices.get(&category).copied().unwrap_or(0)
    }

    /// Store `value`, floored at 0. Values past the index type saturate.
    pub fn set_index(&mut self, category: Category, value: i64) {
        let clamped = value.clamp(0, AssetIndex::MAX as i64) as AssetIndex;
        self.indices.insert(category, clamped);
    }

    /// Move the stored index by a signed delta and return the new index
    pub fn step(&mut self, category: Category, delta: i64) -> AssetIndex {
        let current = self.get_index(category) as i64;
        self.set_index(category, current.saturating_add(delta));
        self.get_index(category)
    }
}
