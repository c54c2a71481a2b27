use crate::browser;
use crate::config::{self, FRAME_SIZE};
use anyhow::{anyhow, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::ops::{Add, Mul, Sub};
use std::rc::Rc;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use self::input::KeyState;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn update(&mut self, keystate: &mut KeyState);
    fn draw(&mut self, renderer: &Renderer);
}

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f32,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut keyevent_receiver = input::prepare_input()?;
        let mut game = game.initialize().await?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
        };
        let renderer = Renderer {
            context: browser::context()?,
        };
        let mut keystate = KeyState::new();

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            input::process_input(&mut keystate, &mut keyevent_receiver);

            game_loop.accumulated_delta += (perf - game_loop.last_frame) as f32;
            while game_loop.accumulated_delta > FRAME_SIZE {
                game.update(&mut keystate);
                game_loop.accumulated_delta -= FRAME_SIZE;
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);

            if let Some(closure) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(closure) {
                    log!("GameLoop: {:#?}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

/// 2d point / vector in world units, y grows downwards
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: Point) -> f32 {
        (other - *self).length()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Axis aligned box, `position` is the top left corner
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    /// box of `size` whose `origin` fraction sits on `anchor`
    pub fn anchored(anchor: Point, size: Size, origin: Point) -> Self {
        Rect::new(
            Point::new(
                anchor.x - size.width * origin.x,
                anchor.y - size.height * origin.y,
            ),
            size,
        )
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(
            0.0,
            0.0,
            config::WORLD_WIDTH.into(),
            config::WORLD_HEIGHT.into(),
        );
    }

    /// Draw a pre-rendered texture so that its `origin` fraction lands on
    /// `position`, rotated around that same point
    pub fn draw_texture(
        &self,
        texture: &HtmlCanvasElement,
        position: Point,
        origin: Point,
        rotation: f32,
    ) {
        let width = texture.width() as f64;
        let height = texture.height() as f64;
        self.context.save();
        let drawn = self
            .context
            .translate(position.x.into(), position.y.into())
            .and_then(|_| self.context.rotate(rotation.into()))
            .and_then(|_| {
                self.context.draw_image_with_html_canvas_element(
                    texture,
                    -width * f64::from(origin.x),
                    -height * f64::from(origin.y),
                )
            });
        self.context.restore();
        if let Err(err) = drawn {
            log!("Renderer: could not draw texture {:#?}", err);
        }
    }
}

pub mod input {
    use crate::browser;
    use crate::config::keys;
    use anyhow::{anyhow, Result};
    use futures::channel::mpsc::{unbounded, UnboundedReceiver};
    use std::collections::HashSet;
    use wasm_bindgen::JsCast;

    const BOUND_KEYS: [&str; 5] = [keys::UP, keys::DOWN, keys::LEFT, keys::RIGHT, keys::INTERACT];

    #[derive(Debug)]
    pub enum KeyPress {
        KeyUp(String),
        KeyDown(String),
    }

    /// Level state of every key, keyed by `KeyboardEvent.code`
    /// - `just_pressed` latches each up -> down transition until a step
    ///   consumes it, so a tap shorter than one frame still registers
    #[derive(Debug, Default)]
    pub struct KeyState {
        pressed_keys: HashSet<String>,
        just_pressed: HashSet<String>,
    }

    impl KeyState {
        pub fn new() -> Self {
            KeyState::default()
        }

        pub fn is_pressed(&self, code: &str) -> bool {
            self.pressed_keys.contains(code)
        }

        pub fn set_pressed(&mut self, code: &str) {
            // auto-repeat keydowns arrive while the key is already held
            if self.pressed_keys.insert(code.to_string()) {
                self.just_pressed.insert(code.to_string());
            }
        }

        /// true once per press of `code`, even if it was released since
        pub fn take_just_pressed(&mut self, code: &str) -> bool {
            self.just_pressed.remove(code)
        }

        pub fn set_released(&mut self, code: &str) {
            self.pressed_keys.remove(code);
        }
    }

    /// Hook keyboard listeners on the window and hand back the receiving
    /// end, the game loop drains it once per animation frame
    pub fn prepare_input() -> Result<UnboundedReceiver<KeyPress>> {
        let (keydown_sender, keyevent_receiver) = unbounded();
        let keyup_sender = keydown_sender.clone();

        let onkeydown = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if BOUND_KEYS.contains(&event.code().as_str()) {
                event.prevent_default();
            }
            let _ = keydown_sender.unbounded_send(KeyPress::KeyDown(event.code()));
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        let onkeyup = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            let _ = keyup_sender.unbounded_send(KeyPress::KeyUp(event.code()));
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        let window = browser::window().map_err(|err| anyhow!("No input target : {:#?}", err))?;
        window.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
        window.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
        // listeners live as long as the page
        onkeydown.forget();
        onkeyup.forget();

        Ok(keyevent_receiver)
    }

    pub fn process_input(state: &mut KeyState, receiver: &mut UnboundedReceiver<KeyPress>) {
        // try_recv : Err when nothing is queued or every sender is gone
        while let Ok(press) = receiver.try_recv() {
            match press {
                KeyPress::KeyDown(code) => state.set_pressed(&code),
                KeyPress::KeyUp(code) => state.set_released(&code),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn processes_queued_presses_in_order() {
            let (sender, mut receiver) = unbounded();
            sender.unbounded_send(KeyPress::KeyDown("KeyW".into())).unwrap();
            sender.unbounded_send(KeyPress::KeyDown("KeyD".into())).unwrap();
            sender.unbounded_send(KeyPress::KeyUp("KeyW".into())).unwrap();

            let mut state = KeyState::new();
            process_input(&mut state, &mut receiver);

            assert!(!state.is_pressed("KeyW"));
            assert!(state.is_pressed("KeyD"));
        }

        #[test]
        fn empty_queue_leaves_state_alone() {
            let (_sender, mut receiver) = unbounded::<KeyPress>();
            let mut state = KeyState::new();
            state.set_pressed("Space");
            process_input(&mut state, &mut receiver);
            assert!(state.is_pressed("Space"));
        }

        #[test]
        fn tap_within_one_frame_is_latched_once() {
            let (sender, mut receiver) = unbounded();
            sender.unbounded_send(KeyPress::KeyDown("Space".into())).unwrap();
            sender.unbounded_send(KeyPress::KeyUp("Space".into())).unwrap();

            let mut state = KeyState::new();
            process_input(&mut state, &mut receiver);

            assert!(!state.is_pressed("Space"));
            assert!(state.take_just_pressed("Space"));
            assert!(!state.take_just_pressed("Space"));
        }

        #[test]
        fn repeated_keydown_while_held_does_not_latch_again() {
            let (sender, mut receiver) = unbounded();
            sender.unbounded_send(KeyPress::KeyDown("Space".into())).unwrap();
            let mut state = KeyState::new();
            process_input(&mut state, &mut receiver);
            assert!(state.take_just_pressed("Space"));

            sender.unbounded_send(KeyPress::KeyDown("Space".into())).unwrap();
            process_input(&mut state, &mut receiver);
            assert!(state.is_pressed("Space"));
            assert!(!state.take_just_pressed("Space"));
        }
    }
}
