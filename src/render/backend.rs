use crate::compile::plan::{AdPlan, DrawOp, ImageRole, Paint, TextRun};
use crate::effects::filter::FilterChain;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::AdResult;

/// Drawing capabilities shared by the raster and vector backends.
///
/// Backends receive operations already in surface coordinates and hold no drawing state between
/// calls; everything a draw needs travels in its arguments.
pub trait PaintBackend {
    /// Draw a decoded image scaled into `dest` after running `filter` on it.
    fn draw_image(&mut self, role: ImageRole, dest: Rect, filter: &FilterChain) -> AdResult<()>;

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> AdResult<()>;

    /// Stroke a rectangle outline centered on its edges.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) -> AdResult<()>;

    /// Draw a text run with all of its passes.
    fn draw_text(&mut self, run: &TextRun) -> AdResult<()>;

    /// Stroke a straight segment with butt caps.
    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) -> AdResult<()>;
}

/// Feed every operation of `plan` to `backend`, in order.
pub fn execute_plan<B: PaintBackend + ?Sized>(backend: &mut B, plan: &AdPlan) -> AdResult<()> {
    for op in &plan.ops {
        match op {
            DrawOp::Image { role, dest, filter } => backend.draw_image(*role, *dest, filter)?,
            DrawOp::FillRect { rect, paint } => backend.fill_rect(*rect, paint)?,
            DrawOp::StrokeRect { rect, color, width } => {
                backend.stroke_rect(*rect, *color, *width)?
            }
            DrawOp::Text(run) => backend.draw_text(run)?,
            DrawOp::Line {
                from,
                to,
                color,
                width,
            } => backend.stroke_line(*from, *to, *color, *width)?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
