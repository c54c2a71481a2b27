use crate::config::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::engine::{Point, Rect, Size};
use crate::world::Player;

/// ┌────────────── Per step ──────────────┐
/// │ 1. position += velocity * dt         │
/// │ 2. push out of every static body     │
/// │ 3. clamp the body inside the field   │
/// └──────────────────────────────────────┘
/// Bodies never rotate, only the sprite does
pub fn step(player: &mut Player, solids: &[Rect], bounds: Rect, dt: f32) {
    integrate(player, dt);
    for solid in solids {
        separate(player, solid);
    }
    clamp_to_bounds(player, &bounds);
}

pub fn world_bounds() -> Rect {
    Rect::new(
        Point::ZERO,
        Size {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        },
    )
}

/// `dt` in seconds
pub fn integrate(player: &mut Player, dt: f32) {
    player.position = player.position + player.velocity * dt;
}

/// Push the player out of `solid` along the shallowest axis and stop
/// movement along it, returns whether they were touching
pub fn separate(player: &mut Player, solid: &Rect) -> bool {
    let body = player.body();
    if !body.intersects(solid) {
        return false;
    }

    let push_x = shallowest(solid.left() - body.right(), solid.right() - body.left());
    let push_y = shallowest(solid.top() - body.bottom(), solid.bottom() - body.top());

    if push_x.abs() <= push_y.abs() {
        player.position.x += push_x;
        player.velocity.x = 0.0;
    } else {
        player.position.y += push_y;
        player.velocity.y = 0.0;
    }
    true
}

/// of a negative and a positive push, the one with the smaller reach
/// - ties go negative (left / up)
fn shallowest(negative: f32, positive: f32) -> f32 {
    if -negative <= positive {
        negative
    } else {
        positive
    }
}

pub fn clamp_to_bounds(player: &mut Player, bounds: &Rect) {
    let body = player.body();
    if body.left() < bounds.left() {
        player.position.x += bounds.left() - body.left();
        player.velocity.x = 0.0;
    } else if body.right() > bounds.right() {
        player.position.x -= body.right() - bounds.right();
        player.velocity.x = 0.0;
    }
    if body.top() < bounds.top() {
        player.position.y += bounds.top() - body.top();
        player.velocity.y = 0.0;
    } else if body.bottom() > bounds.bottom() {
        player.position.y -= body.bottom() - bounds.bottom();
        player.velocity.y = 0.0;
    }
}
