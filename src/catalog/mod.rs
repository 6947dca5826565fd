//! Read-only asset catalog the browser looks entries up in.

mod demo;

pub use demo::DemoCatalog;

use crate::browser::{AssetIndex, Category};

/// Identifier of one graphic or model in the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetHandle(pub u32);

/// What a catalog entry resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLookup {
    Single(AssetHandle),
    /// Several model parts rendered together (NPCs)
    Parts(Vec<AssetHandle>),
}

impl AssetLookup {
    pub fn handles(&self) -> &[AssetHandle] {
        match self {
            AssetLookup::Single(handle) => std::slice::from_ref(handle),
            AssetLookup::Parts(parts) => parts,
        }
    }
}

/// Query-only view of the asset store. A miss is a normal outcome, not an error.
pub trait AssetCatalog {
    fn lookup(&self, category: Category, index: AssetIndex) -> Option<AssetLookup>;

    /// Display name for categories that carry one (items, NPCs, chatheads)
    fn name(&self, category: Category, index: AssetIndex) -> Option<&str>;
}
