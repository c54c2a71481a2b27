use crate::config::html;
use serde::{Deserialize, Serialize};

/// Everything the player can hold
/// - tools (Axe, Pickaxe) gate what can be harvested, they are never spent
/// - resources (Wood, Stone) only ever go up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    Axe,
    Pickaxe,
    Wood,
    Stone,
}

impl Item {
    pub const ALL: [Item; 4] = [Item::Axe, Item::Pickaxe, Item::Wood, Item::Stone];

    pub fn name(&self) -> &'static str {
        match self {
            Item::Axe => "axe",
            Item::Pickaxe => "pickaxe",
            Item::Wood => "wood",
            Item::Stone => "stone",
        }
    }

    /// id of the DOM element mirroring this count
    pub fn element_id(&self) -> &'static str {
        match self {
            Item::Axe => html::AXE_COUNT_ID,
            Item::Pickaxe => html::PICKAXE_COUNT_ID,
            Item::Wood => html::WOOD_COUNT_ID,
            Item::Stone => html::STONE_COUNT_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Inventory {
    pub axe: u32,
    pub pickaxe: u32,
    pub wood: u32,
    pub stone: u32,
}

impl Default for Inventory {
    /// one of each tool, no resources
    fn default() -> Self {
        Inventory {
            axe: 1,
            pickaxe: 1,
            wood: 0,
            stone: 0,
        }
    }
}

impl Inventory {
    pub fn count(&self, item: Item) -> u32 {
        match item {
            Item::Axe => self.axe,
            Item::Pickaxe => self.pickaxe,
            Item::Wood => self.wood,
            Item::Stone => self.stone,
        }
    }

    pub fn set(&mut self, item: Item, count: u32) {
        *self.slot(item) = count;
    }

    pub fn add(&mut self, item: Item) {
        let slot = self.slot(item);
        *slot = slot.saturating_add(1);
    }

    /// non-zero count means the tool is equipped
    pub fn has(&self, item: Item) -> bool {
        self.count(item) > 0
    }

    pub fn counts(&self) -> impl Iterator<Item = (Item, u32)> + '_ {
        Item::ALL.into_iter().map(move |item| (item, self.count(item)))
    }

    fn slot(&mut self, item: Item) -> &mut u32 {
        match item {
            Item::Axe => &mut self.axe,
            Item::Pickaxe => &mut self.pickaxe,
            Item::Wood => &mut self.wood,
            Item::Stone => &mut self.stone,
        }
    }
}

/// Seam between the simulation and whatever presents it
/// - the DOM view in `ui` is the real one
/// - tests plug in a recorder
pub trait InventoryObserver {
    fn on_inventory_changed(&mut self, inventory: &Inventory);
    fn on_item_collected(&mut self, item: Item);
}

/// Observer that ignores everything, handy when nothing is listening
pub struct NoopObserver;

impl InventoryObserver for NoopObserver {
    fn on_inventory_changed(&mut self, _inventory: &Inventory) {}
    fn on_item_collected(&mut self, _item: Item) {}
}
