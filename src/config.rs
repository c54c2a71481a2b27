// ==================== Constants ====================
// Everything the field is tuned by lives here, so the rest of the crate
// never carries a magic number of its own.

/// Canvas / world dimensions in pixels
pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const BACKGROUND_COLOR: &str = "#2d2d2d";

// length of a simulation step in milliseconds
pub const FRAME_SIZE: f32 = 1.0 / 60.0 * 1000.0;

pub mod player {
    /// units per second along each held axis
    pub const SPEED: f32 = 160.0;
    /// one-pole smoothing factor applied to the facing angle every tick
    pub const ROTATION_SMOOTHING: f32 = 0.15;
    pub const START_X: f32 = 400.0;
    pub const START_Y: f32 = 300.0;
    /// pivot near the feet, as a fraction of the sprite box
    pub const ORIGIN_X: f32 = 0.5;
    pub const ORIGIN_Y: f32 = 0.75;
}

/// harvest range, compared with a strict `<`
pub const INTERACTION_DISTANCE: f32 = 50.0;

pub mod keys {
    pub const UP: &str = "KeyW";
    pub const DOWN: &str = "KeyS";
    pub const LEFT: &str = "KeyA";
    pub const RIGHT: &str = "KeyD";
    pub const INTERACT: &str = "Space";
}

// Constants related to HTML elements
pub mod html {
    pub const CANVAS_ID: &str = "canvas";
    pub const CONTEXT_2D: &str = "2d";
    pub const COLLECTED_CLASS: &str = "item-collected";
    pub const LAYOUT_PATH: &str = "world.json";

    /// inventory count elements
    pub const AXE_COUNT_ID: &str = "axe-count";
    pub const PICKAXE_COUNT_ID: &str = "pickaxe-count";
    pub const WOOD_COUNT_ID: &str = "wood-count";
    pub const STONE_COUNT_ID: &str = "stone-count";
}
