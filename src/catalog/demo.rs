use crate::browser::{AssetIndex, Category};

use super::{AssetCatalog, AssetHandle, AssetLookup};

const SPRITE_COUNT: u32 = 2048;
const MODEL_COUNT: u32 = 1024;
const NPC_COUNT: u32 = 320;
const ITEM_COUNT: u32 = 480;

const NPC_TITLES: [&str; 8] = [
    "Guard", "Banker", "Goblin", "Wizard", "Cow", "Farmer", "Thief", "Monk",
];
const NPC_PLACES: [&str; 5] = ["", "Varrock ", "Falador ", "Draynor ", "Lumbridge "];

const ITEM_MATERIALS: [&str; 6] = ["Bronze", "Iron", "Steel", "Mithril", "Adamant", "Rune"];
const ITEM_KINDS: [&str; 8] = [
    "dagger", "sword", "scimitar", "longsword", "mace", "axe", "pickaxe", "full helm",
];

#[derive(Debug, Clone)]
struct NpcEntry {
    name: String,
    models: Vec<AssetHandle>,
}

/// Deterministic in-memory catalog with generated entries.
/// Indices past each category's size are misses.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    npcs: Vec<NpcEntry>,
    items: Vec<String>,
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoCatalog {
    pub fn new() -> Self {
        let npcs = (0..NPC_COUNT).map(generate_npc).collect();
        let items = (0..ITEM_COUNT).map(generate_item_name).collect();
        Self { npcs, items }
    }

    /// Number of entries in a category
    pub fn len(&self, category: Category) -> u32 {
        match category {
            Category::Sprites => SPRITE_COUNT,
            Category::Models => MODEL_COUNT,
            Category::Npcs | Category::Chatheads => self.npcs.len() as u32,
            Category::Items => self.items.len() as u32,
        }
    }

    fn npc(&self, index: AssetIndex) -> Option<&NpcEntry> {
        self.npcs.get(index as usize)
    }
}

fn generate_npc(index: u32) -> NpcEntry {
    let title = NPC_TITLES[(index as usize) % NPC_TITLES.len()];
    let place = NPC_PLACES[(index as usize / NPC_TITLES.len()) % NPC_PLACES.len()];
    // every eighth NPC has no models, like scenery-only definitions
    let part_count = if index % 8 == 7 { 0 } else { 1 + index % 3 };
    let models = (0..part_count)
        .map(|part| AssetHandle((index * 3 + part) % MODEL_COUNT))
        .collect();
    NpcEntry {
        name: format!("{place}{title}"),
        models,
    }
}

fn generate_item_name(index: u32) -> String {
    let material = ITEM_MATERIALS[(index as usize / ITEM_KINDS.len()) % ITEM_MATERIALS.len()];
    let kind = ITEM_KINDS[(index as usize) % ITEM_KINDS.len()];
    if index % 5 == 4 {
        format!("{material} {kind} (Members)")
    } else {
        format!("{material} {kind}")
    }
}

impl AssetCatalog for DemoCatalog {
    fn lookup(&self, category: Category, index: AssetIndex) -> Option<AssetLookup> {
        if index >= self.len(category) {
            return None;
        }
        match category {
            Category::Sprites | Category::Models | Category::Items | Category::Chatheads => {
                Some(AssetLookup::Single(AssetHandle(index)))
            }
            Category::Npcs => {
                let npc = self.npc(index)?;
                if npc.models.is_empty() {
                    None
                } else {
                    Some(AssetLookup::Parts(npc.models.clone()))
                }
            }
        }
    }

    fn name(&self, category: Category, index: AssetIndex) -> Option<&str> {
        match category {
            Category::Items => self.items.get(index as usize).map(String::as_str),
            Category::Npcs | Category::Chatheads => self.npc(index).map(|npc| npc.name.as_str()),
            Category::Sprites | Category::Models => None,
        }
    }
}
