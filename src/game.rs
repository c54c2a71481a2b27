use crate::browser;
use crate::config::{html, BACKGROUND_COLOR, FRAME_SIZE};
use crate::engine::input::KeyState;
use crate::engine::{Game, Renderer};
use crate::sprite::TextureCache;
use crate::ui::DomInventoryView;
use crate::world::{self, Session, WorldLayout};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// TABLE
/// ┌──────────────────────── Harvest Field lifecycle ────────────────────────┐
/// │                                                                         │
/// │    ┌─────────────┐  initialize  ┌─────────────┐   update / draw         │
/// │    │   Loading   ├─────────────►│   Loaded    ├──────────┐              │
/// │    │  (Setup)    │    ONCE      │  (Running)  │◄─────────┘              │
/// │    └─────────────┘              └─────────────┘   every frame           │
/// │                                                                         │
/// ├──────────────────────── initialize ─────────────────────────────────────┤
/// │  1. TextureCache::generate()   player / tree / rock offscreen canvases  │
/// │  2. world.json or default      WorldLayout                              │
/// │  3. world::build()             session + first inventory sync           │
/// ├──────────────────────── update (fixed 1/60 s step) ─────────────────────┤
/// │  KeyState ─► KeyBindings ─► Session::tick ─► DomInventoryView           │
/// └─────────────────────────────────────────────────────────────────────────┘
pub enum Harvest {
    Loading,
    Loaded(HarvestField),
}

pub struct HarvestField {
    session: Session,
    textures: TextureCache,
    view: DomInventoryView,
}

impl Harvest {
    pub fn new() -> Self {
        Harvest::Loading
    }

    /// `world.json` next to the page wins, otherwise the built-in table
    async fn load_layout() -> WorldLayout {
        match browser::fetch_json::<WorldLayout>(html::LAYOUT_PATH).await {
            Ok(layout) => {
                log!("Loaded layout from {}", html::LAYOUT_PATH);
                layout
            }
            Err(err) => {
                log!("Using default layout ({:#})", err);
                WorldLayout::default()
            }
        }
    }
}

impl Default for Harvest {
    fn default() -> Self {
        Harvest::new()
    }
}

#[async_trait(?Send)]
impl Game for Harvest {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Harvest::Loading => {
                // textures strictly before any entity
                let textures = TextureCache::generate()?;
                let layout = Self::load_layout().await;
                let mut view = DomInventoryView::new(&browser::document()?)?;
                let session = world::build(&layout, &mut view);
                log!(
                    "Field ready : {} trees, {} rocks",
                    session.trees.len(),
                    session.rocks.len()
                );
                Ok(Box::new(Harvest::Loaded(HarvestField {
                    session,
                    textures,
                    view,
                })))
            }
            Harvest::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, keystate: &mut KeyState) {
        if let Harvest::Loaded(field) = self {
            let controls = field.session.bindings.read(keystate);
            let harvested = field
                .session
                .tick(&controls, FRAME_SIZE / 1000.0, &mut field.view);
            for item in harvested {
                log!(
                    "Harvested {:?} at ({}, {})",
                    item.kind,
                    item.position.x,
                    item.position.y
                );
            }
        }
    }

    fn draw(&mut self, renderer: &Renderer) {
        if let Harvest::Loaded(field) = self {
            renderer.clear(BACKGROUND_COLOR);
            // back to front
            for item in field.session.draw_list() {
                match field.textures.get(item.key) {
                    Ok(texture) => {
                        renderer.draw_texture(texture, item.position, item.origin, item.rotation)
                    }
                    Err(err) => log!("{:#}", err),
                }
            }
        }
    }
}
