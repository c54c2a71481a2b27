use super::{Color, DrawOp, SpriteTexture};
use crate::engine::Size;

use DrawOp::*;

fn fill_style(color: u32, alpha: f32) -> DrawOp {
    FillStyle {
        color: Color(color),
        alpha,
    }
}

/// Closed, filled polygon starting at `from`
fn filled_polygon(from: (f32, f32), points: &[(f32, f32)]) -> Vec<DrawOp> {
    let mut ops = vec![BeginPath, MoveTo { x: from.0, y: from.1 }];
    ops.extend(points.iter().map(|&(x, y)| LineTo { x, y }));
    ops.extend([ClosePath, Fill]);
    ops
}

/// Closed, filled shape made of quadratic curves
/// - `curves` are (cpx, cpy, x, y)
fn filled_curves(from: (f32, f32), curves: &[(f32, f32, f32, f32)]) -> Vec<DrawOp> {
    let mut ops = vec![BeginPath, MoveTo { x: from.0, y: from.1 }];
    ops.extend(
        curves
            .iter()
            .map(|&(cpx, cpy, x, y)| QuadraticCurveTo { cpx, cpy, x, y }),
    );
    ops.extend([ClosePath, Fill]);
    ops
}

/// Top-down person facing "up" at rotation 0
/// - drawn around the pivot (0.5, 0.75) so rotation turns on the feet
pub struct PlayerSprite;

impl SpriteTexture for PlayerSprite {
    const KEY: &'static str = "player";
    const SIZE: Size = Size {
        width: 32.0,
        height: 32.0,
    };

    fn ops() -> Vec<DrawOp> {
        vec![
            Translate { x: 16.0, y: 24.0 },
            // body
            fill_style(0x4287f5, 1.0),
            FillRect {
                x: -8.0,
                y: -16.0,
                width: 16.0,
                height: 24.0,
            },
            // head
            fill_style(0xffd700, 1.0),
            FillCircle {
                x: 0.0,
                y: -20.0,
                radius: 6.0,
            },
            // direction indicator
            fill_style(0xff0000, 1.0),
            FillCircle {
                x: 0.0,
                y: -24.0,
                radius: 2.0,
            },
        ]
    }
}

pub struct TreeSprite;

impl SpriteTexture for TreeSprite {
    const KEY: &'static str = "tree";
    const SIZE: Size = Size {
        width: 56.0,
        height: 80.0,
    };

    fn ops() -> Vec<DrawOp> {
        let mut ops = vec![
            Translate { x: 28.0, y: 38.0 },
            // trunk
            fill_style(0x8b4513, 1.0),
            FillRect {
                x: -12.0,
                y: 0.0,
                width: 24.0,
                height: 40.0,
            },
            // bark grain
            LineStyle {
                width: 2.0,
                color: Color(0x654321),
                alpha: 0.5,
            },
            BeginPath,
        ];
        for &(from, to) in &[
            ((-8.0, 5.0), (-6.0, 15.0)),
            ((-4.0, 20.0), (-2.0, 30.0)),
            ((8.0, 8.0), (6.0, 18.0)),
            ((4.0, 25.0), (2.0, 35.0)),
        ] {
            ops.push(MoveTo { x: from.0, y: from.1 });
            ops.push(LineTo { x: to.0, y: to.1 });
        }
        ops.push(StrokePath);

        // foliage, darkest at the bottom
        for &(color, alpha, base, shoulder, crown) in &[
            (0x1b512d, 1.0, (28.0, 40.0), (24.0, 20.0, 20.0, 15.0), -35.0),
            (0x228b22, 0.9, (24.0, 35.0), (20.0, 15.0, 16.0, 10.0), -30.0),
            (0x32cd32, 0.8, (20.0, 30.0), (16.0, 10.0, 12.0, 5.0), -25.0),
        ] {
            let (half, bottom) = base;
            let (cx, cy, sx, sy) = shoulder;
            ops.push(fill_style(color, alpha));
            ops.extend(filled_curves(
                (-half, bottom),
                &[
                    (-cx, cy, -sx, sy),
                    (0.0, crown, sx, sy),
                    (cx, cy, half, bottom),
                ],
            ));
        }

        // highlight
        ops.push(fill_style(0x90ee90, 0.4));
        ops.extend(filled_curves(
            (-10.0, 15.0),
            &[
                (0.0, -15.0, 10.0, 15.0),
                (5.0, 20.0, 0.0, 18.0),
                (-5.0, 20.0, -10.0, 15.0),
            ],
        ));
        ops
    }
}

pub struct RockSprite;

impl SpriteTexture for RockSprite {
    const KEY: &'static str = "rock";
    const SIZE: Size = Size {
        width: 32.0,
        height: 32.0,
    };

    fn ops() -> Vec<DrawOp> {
        let mut ops = vec![Translate { x: 16.0, y: 16.0 }, fill_style(0x808080, 1.0)];
        ops.extend(filled_polygon(
            (-16.0, 8.0),
            &[
                (-8.0, -16.0),
                (8.0, -16.0),
                (16.0, 8.0),
                (8.0, 16.0),
                (-8.0, 16.0),
            ],
        ));
        // lighter facet for depth
        ops.push(fill_style(0xa9a9a9, 0.5));
        ops.extend(filled_polygon(
            (-8.0, -8.0),
            &[(0.0, -12.0), (8.0, -8.0), (0.0, -4.0)],
        ));
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_has_three_foliage_layers_and_a_highlight() {
        let fills = TreeSprite::ops()
            .into_iter()
            .filter(|op| matches!(op, DrawOp::Fill))
            .count();
        assert_eq!(fills, 4);
    }

    #[test]
    fn rock_is_a_hexagon() {
        let ops = RockSprite::ops();
        let first_fill = ops.iter().position(|op| matches!(op, DrawOp::Fill)).unwrap();
        let corners = ops[..first_fill]
            .iter()
            .filter(|op| matches!(op, DrawOp::MoveTo { .. } | DrawOp::LineTo { .. }))
            .count();
        assert_eq!(corners, 6);
    }
}
