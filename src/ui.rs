use crate::browser;
use crate::config::html;
use crate::inventory::{Inventory, InventoryObserver, Item};
use anyhow::{anyhow, Context, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Mirrors the inventory into the page
/// - one text element per item, resolved once up front
/// - the pulse replays the `item-collected` css transition
pub struct DomInventoryView {
    elements: Vec<(Item, Element)>,
}

impl DomInventoryView {
    pub fn new(document: &Document) -> Result<Self> {
        let elements = Item::ALL
            .iter()
            .map(|item| {
                browser::element_by_id(document, item.element_id())
                    .map(|element| (*item, element))
                    .with_context(|| format!("Missing inventory element #{}", item.element_id()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DomInventoryView { elements })
    }

    fn element(&self, item: Item) -> Option<&Element> {
        self.elements
            .iter()
            .find(|(candidate, _)| *candidate == item)
            .map(|(_, element)| element)
    }

    pub fn sync(&self, inventory: &Inventory) {
        for (item, element) in &self.elements {
            element.set_text_content(Some(&inventory.count(*item).to_string()));
        }
    }

    /// remove -> reflow -> add, otherwise a class that is already set
    /// would not restart its transition
    pub fn pulse(&self, item: Item) -> Result<()> {
        let element = self
            .element(item)
            .ok_or_else(|| anyhow!("No element bound for {}", item.name()))?;
        let classes = element.class_list();
        classes
            .remove_1(html::COLLECTED_CLASS)
            .map_err(|err| anyhow!("Could not remove class : {:#?}", err))?;
        // reading layout forces the style recalculation
        if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
            let _ = html_element.offset_width();
        }
        classes
            .add_1(html::COLLECTED_CLASS)
            .map_err(|err| anyhow!("Could not add class : {:#?}", err))
    }
}

impl InventoryObserver for DomInventoryView {
    fn on_inventory_changed(&mut self, inventory: &Inventory) {
        self.sync(inventory);
    }

    fn on_item_collected(&mut self, item: Item) {
        if let Err(err) = self.pulse(item) {
            log!("Collect pulse for {} failed : {:#?}", item.name(), err);
        }
    }
}
