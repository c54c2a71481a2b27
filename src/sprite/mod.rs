// TABLE:
// ┌──────────────────────────────────────────────────────────────────────────┐
// │                     Where a sprite comes from                            │
// ├────────────────┬──────────────────────┬──────────────────────────────────┤
// │   Code File    │   Code Component     │         What it does             │
// ├────────────────┼──────────────────────┼──────────────────────────────────┤
// │                │ DrawOp               │ one vector instruction           │
// │   mod.rs       │ SpriteTexture trait  │ key + size + list of DrawOps     │
// │                │ paint()              │ replays ops on any Painter       │
// │                │ TextureCache         │ offscreen canvas per key         │
// ├────────────────┼──────────────────────┼──────────────────────────────────┤
// │                │ PlayerSprite         │ body, head, facing dot           │
// │  field.rs      │ TreeSprite           │ trunk + three foliage layers     │
// │                │ RockSprite           │ hexagon + highlight facet        │
// ├────────────────┼──────────────────────┼──────────────────────────────────┤
// │  canvas.rs     │ CanvasPainter        │ Painter over a 2d context        │
// └────────────────┴──────────────────────┴──────────────────────────────────┘
pub mod canvas;
pub mod field;

use crate::browser;
use crate::engine::Size;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use web_sys::HtmlCanvasElement;

pub use self::field::{PlayerSprite, RockSprite, TreeSprite};

/// 0xRRGGBB
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }

    /// css `rgba(...)` string with `alpha` baked in
    pub fn css(&self, alpha: f32) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({}, {}, {}, {})", r, g, b, alpha)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawOp {
    FillStyle { color: Color, alpha: f32 },
    LineStyle { width: f32, color: Color, alpha: f32 },
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    FillCircle { x: f32, y: f32, radius: f32 },
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadraticCurveTo { cpx: f32, cpy: f32, x: f32, y: f32 },
    ClosePath,
    Fill,
    StrokePath,
    Translate { x: f32, y: f32 },
}

/// Anything that can execute a DrawOp
/// - `canvas::CanvasPainter` draws for real
/// - tests record what they were asked to do
pub trait Painter {
    fn apply(&mut self, op: &DrawOp) -> Result<()>;
}

/// Replay every op in order, stopping at the first failure
pub fn paint(ops: &[DrawOp], painter: &mut impl Painter) -> Result<()> {
    ops.iter().try_for_each(|op| painter.apply(op))
}

/// A procedurally drawn texture: fixed key, fixed size, fixed instructions
pub trait SpriteTexture {
    const KEY: &'static str;
    const SIZE: Size;

    fn ops() -> Vec<DrawOp>;
}

/// Textures rendered once at startup and looked up by key afterwards
pub struct TextureCache {
    textures: HashMap<&'static str, HtmlCanvasElement>,
}

impl TextureCache {
    /// Paint every field sprite into its own offscreen canvas
    pub fn generate() -> Result<Self> {
        let mut cache = TextureCache {
            textures: HashMap::new(),
        };
        cache.register::<PlayerSprite>()?;
        cache.register::<TreeSprite>()?;
        cache.register::<RockSprite>()?;
        log!("Generated {} textures", cache.textures.len());
        Ok(cache)
    }

    fn register<S: SpriteTexture>(&mut self) -> Result<()> {
        let canvas = browser::new_canvas(S::SIZE.width as u32, S::SIZE.height as u32)?;
        let mut painter = canvas::CanvasPainter::new(browser::context_of(&canvas)?);
        paint(&S::ops(), &mut painter)
            .map_err(|err| anyhow!("Failed to paint texture '{}' : {:#?}", S::KEY, err))?;
        self.textures.insert(S::KEY, canvas);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&HtmlCanvasElement> {
        self.textures
            .get(key)
            .ok_or_else(|| anyhow!("No texture registered under '{}'", key))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tracks the translated extent of every coordinate it is handed
    struct BoundsPainter {
        offset: (f32, f32),
        min: (f32, f32),
        max: (f32, f32),
        open_path: bool,
        unclosed: usize,
    }

    impl BoundsPainter {
        fn new() -> Self {
            BoundsPainter {
                offset: (0.0, 0.0),
                min: (f32::MAX, f32::MAX),
                max: (f32::MIN, f32::MIN),
                open_path: false,
                unclosed: 0,
            }
        }

        fn include(&mut self, x: f32, y: f32) {
            let (x, y) = (x + self.offset.0, y + self.offset.1);
            self.min = (self.min.0.min(x), self.min.1.min(y));
            self.max = (self.max.0.max(x), self.max.1.max(y));
        }
    }

    impl Painter for BoundsPainter {
        fn apply(&mut self, op: &DrawOp) -> Result<()> {
            match *op {
                DrawOp::Translate { x, y } => {
                    self.offset = (self.offset.0 + x, self.offset.1 + y);
                }
                DrawOp::FillRect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    self.include(x, y);
                    self.include(x + width, y + height);
                }
                DrawOp::FillCircle { x, y, radius } => {
                    self.include(x - radius, y - radius);
                    self.include(x + radius, y + radius);
                }
                DrawOp::MoveTo { x, y } | DrawOp::LineTo { x, y } => self.include(x, y),
                DrawOp::QuadraticCurveTo { cpx, cpy, x, y } => {
                    self.include(cpx, cpy);
                    self.include(x, y);
                }
                DrawOp::BeginPath => {
                    if self.open_path {
                        self.unclosed += 1;
                    }
                    self.open_path = true;
                }
                DrawOp::Fill | DrawOp::StrokePath => self.open_path = false,
                DrawOp::FillStyle { .. } | DrawOp::LineStyle { .. } | DrawOp::ClosePath => {}
            }
            Ok(())
        }
    }

    fn bounds_of<S: SpriteTexture>() -> BoundsPainter {
        let mut painter = BoundsPainter::new();
        paint(&S::ops(), &mut painter).unwrap();
        painter
    }

    fn assert_fits<S: SpriteTexture>() {
        let bounds = bounds_of::<S>();
        assert!(bounds.min.0 >= 0.0 && bounds.min.1 >= 0.0, "{} min {:?}", S::KEY, bounds.min);
        assert!(
            bounds.max.0 <= S::SIZE.width && bounds.max.1 <= S::SIZE.height,
            "{} max {:?}",
            S::KEY,
            bounds.max
        );
    }

    #[test]
    fn obstacle_textures_fit_their_bitmaps() {
        assert_fits::<TreeSprite>();
        assert_fits::<RockSprite>();
    }

    #[test]
    fn every_path_is_finished() {
        for painter in [
            bounds_of::<PlayerSprite>(),
            bounds_of::<TreeSprite>(),
            bounds_of::<RockSprite>(),
        ] {
            assert_eq!(painter.unclosed, 0);
            assert!(!painter.open_path);
        }
    }

    #[test]
    fn player_is_drawn_around_its_pivot() {
        let first = PlayerSprite::ops()[0];
        assert_eq!(first, DrawOp::Translate { x: 16.0, y: 24.0 });
    }

    #[test]
    fn ops_are_deterministic() {
        assert_eq!(TreeSprite::ops(), TreeSprite::ops());
        assert_eq!(RockSprite::ops(), RockSprite::ops());
    }

    #[test]
    fn sizes_match_the_sprite_sheet() {
        assert_eq!((PlayerSprite::SIZE.width, PlayerSprite::SIZE.height), (32.0, 32.0));
        assert_eq!((TreeSprite::SIZE.width, TreeSprite::SIZE.height), (56.0, 80.0));
        assert_eq!((RockSprite::SIZE.width, RockSprite::SIZE.height), (32.0, 32.0));
    }

    #[test]
    fn color_to_css() {
        assert_eq!(Color(0x8b4513).css(1.0), "rgba(139, 69, 19, 1)");
        assert_eq!(Color(0x90ee90).css(0.4), "rgba(144, 238, 144, 0.4)");
    }
}
