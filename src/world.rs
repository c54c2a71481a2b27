use crate::config::{self, keys};
use crate::engine::input::KeyState;
use crate::engine::{Point, Rect, Size};
use crate::interaction::{self, Harvested};
use crate::inventory::{Inventory, InventoryObserver, Item};
use crate::movement::{self, Controls};
use crate::physics;
use crate::sprite::{PlayerSprite, RockSprite, SpriteTexture, TreeSprite};
use serde::{Deserialize, Serialize};

/// ┌──────────── Obstacle rules ────────────┐
/// │  Kind  │  Yields  │  Needs   │ Texture │
/// ├────────┼──────────┼──────────┼─────────┤
/// │  Tree  │  Wood    │  Axe     │  tree   │
/// │  Rock  │  Stone   │  Pickaxe │  rock   │
/// └────────┴──────────┴──────────┴─────────┘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Tree,
    Rock,
}

impl ObstacleKind {
    pub fn resource(&self) -> Item {
        match self {
            ObstacleKind::Tree => Item::Wood,
            ObstacleKind::Rock => Item::Stone,
        }
    }

    pub fn tool(&self) -> Item {
        match self {
            ObstacleKind::Tree => Item::Axe,
            ObstacleKind::Rock => Item::Pickaxe,
        }
    }

    pub fn texture_key(&self) -> &'static str {
        match self {
            ObstacleKind::Tree => TreeSprite::KEY,
            ObstacleKind::Rock => RockSprite::KEY,
        }
    }

    /// static body matches the texture
    pub fn size(&self) -> Size {
        match self {
            ObstacleKind::Tree => TreeSprite::SIZE,
            ObstacleKind::Rock => RockSprite::SIZE,
        }
    }
}

/// Static, harvestable world entity
/// - position is fixed for its whole life, so it stays private
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    kind: ObstacleKind,
    position: Point,
}

impl Obstacle {
    const ORIGIN: Point = Point { x: 0.5, y: 0.5 };

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// lower on screen draws on top
    pub fn depth(&self) -> f32 {
        self.position.y
    }

    pub fn body(&self) -> Rect {
        Rect::anchored(self.position, self.kind.size(), Self::ORIGIN)
    }
}

/// Owned collection of one kind of obstacle
#[derive(Debug, Clone)]
pub struct ObstacleGroup {
    kind: ObstacleKind,
    members: Vec<Obstacle>,
}

impl ObstacleGroup {
    pub fn new(kind: ObstacleKind) -> Self {
        ObstacleGroup {
            kind,
            members: Vec::new(),
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn spawn(&mut self, position: Point) {
        self.members.push(Obstacle {
            kind: self.kind,
            position,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Remove every member matching `predicate` and hand them back in order
    pub fn take_where(&mut self, mut predicate: impl FnMut(&Obstacle) -> bool) -> Vec<Obstacle> {
        let mut taken = Vec::new();
        self.members.retain(|obstacle| {
            if predicate(obstacle) {
                taken.push(*obstacle);
                false
            } else {
                true
            }
        });
        taken
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Point,
    pub velocity: Point,
    /// radians, 0 faces up
    pub rotation: f32,
}

impl Player {
    pub const ORIGIN: Point = Point {
        x: config::player::ORIGIN_X,
        y: config::player::ORIGIN_Y,
    };

    pub fn new(position: Point) -> Self {
        Player {
            position,
            velocity: Point::ZERO,
            rotation: 0.0,
        }
    }

    pub fn depth(&self) -> f32 {
        self.position.y
    }

    pub fn body(&self) -> Rect {
        Rect::anchored(self.position, PlayerSprite::SIZE, Self::ORIGIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Placement {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
}

impl Placement {
    fn new(kind: ObstacleKind, x: f32, y: f32) -> Self {
        Placement { kind, x, y }
    }
}

/// Declarative description of a field, loadable from `world.json`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldLayout {
    pub player_start: Point,
    pub obstacles: Vec<Placement>,
    pub inventory: Inventory,
}

impl Default for WorldLayout {
    fn default() -> Self {
        use ObstacleKind::*;
        WorldLayout {
            player_start: Point::new(config::player::START_X, config::player::START_Y),
            obstacles: vec![
                Placement::new(Tree, 120.0, 120.0),
                Placement::new(Tree, 680.0, 120.0),
                Placement::new(Tree, 120.0, 480.0),
                Placement::new(Tree, 680.0, 480.0),
                Placement::new(Tree, 400.0, 300.0),
                Placement::new(Rock, 200.0, 200.0),
                Placement::new(Rock, 600.0, 200.0),
                Placement::new(Rock, 200.0, 400.0),
                Placement::new(Rock, 600.0, 400.0),
            ],
            inventory: Inventory::default(),
        }
    }
}

/// Logical actions, keyed by `KeyboardEvent.code`
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub interact: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            up: keys::UP.into(),
            down: keys::DOWN.into(),
            left: keys::LEFT.into(),
            right: keys::RIGHT.into(),
            interact: keys::INTERACT.into(),
        }
    }
}

impl KeyBindings {
    /// Directions follow the held keys, interact consumes the press latch
    pub fn read(&self, keystate: &mut KeyState) -> Controls {
        Controls {
            up: keystate.is_pressed(&self.up),
            down: keystate.is_pressed(&self.down),
            left: keystate.is_pressed(&self.left),
            right: keystate.is_pressed(&self.right),
            interact: keystate.take_just_pressed(&self.interact),
        }
    }
}

/// One entry of the painter's list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub key: &'static str,
    pub position: Point,
    pub origin: Point,
    pub rotation: f32,
    pub depth: f32,
}

/// Everything a running field owns
/// - mutated only from `tick`, once per simulation step
pub struct Session {
    pub player: Player,
    pub trees: ObstacleGroup,
    pub rocks: ObstacleGroup,
    pub inventory: Inventory,
    pub bindings: KeyBindings,
    /// groups the player cannot walk through
    colliders: Vec<ObstacleKind>,
}

/// Build a fresh session from `layout` and push the starting inventory to
/// `observer`
pub fn build(layout: &WorldLayout, observer: &mut dyn InventoryObserver) -> Session {
    let mut trees = ObstacleGroup::new(ObstacleKind::Tree);
    let mut rocks = ObstacleGroup::new(ObstacleKind::Rock);
    for placement in &layout.obstacles {
        let position = Point::new(placement.x, placement.y);
        match placement.kind {
            ObstacleKind::Tree => trees.spawn(position),
            ObstacleKind::Rock => rocks.spawn(position),
        }
    }

    let mut session = Session {
        player: Player::new(layout.player_start),
        trees,
        rocks,
        inventory: layout.inventory,
        bindings: KeyBindings::default(),
        colliders: Vec::new(),
    };
    session.add_collider(ObstacleKind::Tree);
    session.add_collider(ObstacleKind::Rock);

    observer.on_inventory_changed(&session.inventory);
    session
}

impl Session {
    pub fn add_collider(&mut self, kind: ObstacleKind) {
        if !self.colliders.contains(&kind) {
            self.colliders.push(kind);
        }
    }

    pub fn group(&self, kind: ObstacleKind) -> &ObstacleGroup {
        match kind {
            ObstacleKind::Tree => &self.trees,
            ObstacleKind::Rock => &self.rocks,
        }
    }

    /// Static bodies of every group the player collides with
    pub fn solid_bodies(&self) -> Vec<Rect> {
        self.colliders
            .iter()
            .flat_map(|kind| self.group(*kind).iter().map(Obstacle::body))
            .collect()
    }

    /// One simulation step
    /// 1. keys -> velocity + facing
    /// 2. interact when the key was pressed since the last step
    /// 3. integrate, separate from obstacles, clamp to the field
    pub fn tick(
        &mut self,
        controls: &Controls,
        dt: f32,
        observer: &mut dyn InventoryObserver,
    ) -> Vec<Harvested> {
        movement::steer(&mut self.player, controls);

        let harvested = if controls.interact {
            interaction::harvest(self, observer)
        } else {
            Vec::new()
        };

        let bodies = self.solid_bodies();
        physics::step(&mut self.player, &bodies, physics::world_bounds(), dt);
        harvested
    }

    /// Player and obstacles, ordered back to front
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut items: Vec<DrawItem> = self
            .trees
            .iter()
            .chain(self.rocks.iter())
            .map(|obstacle| DrawItem {
                key: obstacle.kind().texture_key(),
                position: obstacle.position(),
                origin: Obstacle::ORIGIN,
                rotation: 0.0,
                depth: obstacle.depth(),
            })
            .collect();
        items.push(DrawItem {
            key: PlayerSprite::KEY,
            position: self.player.position,
            origin: Player::ORIGIN,
            rotation: self.player.rotation,
            depth: self.player.depth(),
        });
        // stable, so equal depths keep creation order
        items.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::tests::{Notice, Recorder};
    use crate::inventory::NoopObserver;

    fn session() -> Session {
        build(&WorldLayout::default(), &mut NoopObserver)
    }

    #[test]
    fn default_layout_places_five_trees_and_four_rocks() {
        let session = session();
        assert_eq!(session.trees.len(), 5);
        assert_eq!(session.rocks.len(), 4);
        assert_eq!(session.player.position, Point::new(400.0, 300.0));
    }

    #[test]
    fn obstacles_are_layered_by_y() {
        let session = session();
        for obstacle in session.trees.iter().chain(session.rocks.iter()) {
            assert_eq!(obstacle.depth(), obstacle.position().y);
        }
        let depths: Vec<f32> = session.draw_list().iter().map(|item| item.depth).collect();
        assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn build_announces_starting_inventory_once() {
        let mut recorder = Recorder::default();
        let session = build(&WorldLayout::default(), &mut recorder);
        assert_eq!(recorder.notices, vec![Notice::Changed(session.inventory)]);
    }

    #[test]
    fn both_groups_block_the_player() {
        let session = session();
        assert_eq!(session.solid_bodies().len(), 9);
    }

    #[test]
    fn synthetic_layout_is_honoured() {
        let layout = WorldLayout {
            player_start: Point::new(10.0, 10.0),
            obstacles: vec![Placement::new(ObstacleKind::Rock, 50.0, 60.0)],
            inventory: Inventory::default(),
        };
        let session = build(&layout, &mut NoopObserver);
        assert!(session.trees.is_empty());
        assert_eq!(session.rocks.iter().next().unwrap().position(), Point::new(50.0, 60.0));
    }

    #[test]
    fn take_where_removes_only_matches() {
        let mut group = ObstacleGroup::new(ObstacleKind::Tree);
        group.spawn(Point::new(0.0, 0.0));
        group.spawn(Point::new(100.0, 0.0));
        let taken = group.take_where(|obstacle| obstacle.position().x > 50.0);
        assert_eq!(taken.len(), 1);
        assert_eq!(group.len(), 1);
        assert_eq!(group.iter().next().unwrap().position().x, 0.0);
    }

    #[test]
    fn bindings_read_level_state() {
        let mut keystate = KeyState::new();
        keystate.set_pressed("KeyW");
        keystate.set_pressed("Space");
        let bindings = KeyBindings::default();
        let controls = bindings.read(&mut keystate);
        assert!(controls.up && controls.interact);
        assert!(!controls.down && !controls.left && !controls.right);

        // still held on the next step : movement stays, interact does not repeat
        let controls = bindings.read(&mut keystate);
        assert!(controls.up && !controls.interact);
    }

    #[test]
    fn obstacle_kind_rules() {
        assert_eq!(ObstacleKind::Tree.tool(), Item::Axe);
        assert_eq!(ObstacleKind::Tree.resource(), Item::Wood);
        assert_eq!(ObstacleKind::Rock.tool(), Item::Pickaxe);
        assert_eq!(ObstacleKind::Rock.resource(), Item::Stone);
    }
}
