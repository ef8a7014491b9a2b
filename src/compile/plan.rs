use crate::effects::filter::FilterChain;
use crate::effects::text::TextPass;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect};
use crate::layout::resolver::TextAlign;
use crate::style::model::{FontWeight, FrameEffect, LayoutId};

/// Which decoded image an [`DrawOp::Image`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageRole {
    /// The base photo.
    Base,
    /// The optional logo.
    Logo,
}

/// Fill paint for rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Uniform color (alpha already includes the background opacity).
    Solid(Color),
    /// Two-stop linear gradient in surface coordinates.
    LinearGradient {
        /// Gradient start point.
        start: Point,
        /// Gradient end point.
        end: Point,
        /// Color at `start`.
        from: Color,
        /// Color at `end`.
        to: Color,
    },
}

/// A fully resolved text draw. Every piece of drawing state travels with the run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Text after case transforms.
    pub text: String,
    /// Anchor in surface coordinates; the run is vertically centered on `anchor.y`.
    pub anchor: Point,
    /// Horizontal alignment around `anchor.x`.
    pub align: TextAlign,
    /// Font size in px.
    pub font_size: f64,
    /// Font weight.
    pub weight: FontWeight,
    /// CSS font-family stack.
    pub font_family: String,
    /// Extra advance per character in px, already scaled.
    pub letter_spacing: f64,
    /// Paint passes, bottom to top.
    pub passes: Vec<TextPass>,
}

/// One drawing operation in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Draw a decoded image scaled into `dest`, running `filter` on its pixels first.
    Image {
        /// Which image to draw.
        role: ImageRole,
        /// Destination rectangle.
        dest: Rect,
        /// Pixel filters; identity for the logo.
        filter: FilterChain,
    },
    /// Fill a rectangle.
    FillRect {
        /// Rectangle to fill.
        rect: Rect,
        /// Fill paint.
        paint: Paint,
    },
    /// Stroke a rectangle outline centered on its edges.
    StrokeRect {
        /// Rectangle to outline.
        rect: Rect,
        /// Stroke color.
        color: Color,
        /// Stroke width in px.
        width: f64,
    },
    /// Draw a text run with all its passes.
    Text(TextRun),
    /// Stroke a straight segment.
    Line {
        /// Segment start.
        from: Point,
        /// Segment end.
        to: Point,
        /// Stroke color.
        color: Color,
        /// Stroke width in px.
        width: f64,
    },
}

/// Backend-agnostic drawing plan for one ad.
///
/// Both backends execute the same plan, so geometry and effect decisions are made exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct AdPlan {
    /// Surface width in whole px (content plus bleed).
    pub width: u32,
    /// Surface height in whole px (content plus bleed).
    pub height: u32,
    /// Render scale.
    pub scale: f64,
    /// Bleed margin in px on each side; `0.0` outside print mode.
    pub bleed: f64,
    /// Unbled content rectangle in surface coordinates.
    pub content: Rect,
    /// Layout used; `None` is the fallback banner.
    pub layout: Option<LayoutId>,
    /// Viewer hint carried through to the artifact.
    pub frame_effect: FrameEffect,
    /// Operations in paint order.
    pub ops: Vec<DrawOp>,
}

impl AdPlan {
    /// Number of crop-mark segments in the plan.
    pub fn crop_mark_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    /// Text runs in paint order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }
}
