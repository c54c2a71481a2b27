use super::{DrawOp, Painter};
use anyhow::{anyhow, Result};
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

pub struct CanvasPainter {
    context: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        CanvasPainter { context }
    }
}

impl Painter for CanvasPainter {
    fn apply(&mut self, op: &DrawOp) -> Result<()> {
        let ctx = &self.context;
        match *op {
            DrawOp::FillStyle { color, alpha } => ctx.set_fill_style_str(&color.css(alpha)),
            DrawOp::LineStyle {
                width,
                color,
                alpha,
            } => {
                ctx.set_line_width(width.into());
                ctx.set_stroke_style_str(&color.css(alpha));
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
            } => ctx.fill_rect(x.into(), y.into(), width.into(), height.into()),
            // a circle is its own path, same as any other fill
            DrawOp::FillCircle { x, y, radius } => {
                ctx.begin_path();
                ctx.arc(x.into(), y.into(), radius.into(), 0.0, TAU)
                    .map_err(|err| anyhow!("arc failed : {:#?}", err))?;
                ctx.fill();
            }
            DrawOp::BeginPath => ctx.begin_path(),
            DrawOp::MoveTo { x, y } => ctx.move_to(x.into(), y.into()),
            DrawOp::LineTo { x, y } => ctx.line_to(x.into(), y.into()),
            DrawOp::QuadraticCurveTo { cpx, cpy, x, y } => {
                ctx.quadratic_curve_to(cpx.into(), cpy.into(), x.into(), y.into())
            }
            DrawOp::ClosePath => ctx.close_path(),
            DrawOp::Fill => ctx.fill(),
            DrawOp::StrokePath => ctx.stroke(),
            DrawOp::Translate { x, y } => ctx
                .translate(x.into(), y.into())
                .map_err(|err| anyhow!("translate failed : {:#?}", err))?,
        }
        Ok(())
    }
}
