// ==================== Imports ====================
use wasm_bindgen::prelude::*;

#[macro_use]
mod browser;
pub mod bridge;
pub mod config;
pub mod engine;
mod game;
pub mod interaction;
pub mod inventory;
pub mod movement;
pub mod physics;
pub mod sprite;
pub mod ui;
pub mod world;

use engine::GameLoop;
use game::Harvest;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - exposes the (empty) shell bridge
/// - generates textures and builds the field
/// - starts the frame loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    log!("Harvest Field starting");

    if let Err(err) = bridge::expose() {
        log!("Shell bridge unavailable : {:#?}", err);
    }

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(Harvest::new()).await {
            log!("Could not start game : {:#?}", err);
        }
    });

    Ok(())
}
