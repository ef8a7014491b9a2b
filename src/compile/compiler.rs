use crate::compile::plan::{AdPlan, DrawOp, ImageRole, Paint, TextRun};
use crate::effects::filter::FilterChain;
use crate::effects::text::{apply_text_transform, text_passes};
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{AdError, AdResult};
use crate::layout::resolver::{TextRole, TextSlot, resolve_layout};
use crate::style::details::BusinessDetails;
use crate::style::model::{FontWeight, LayoutId, StyleConfig};

/// Print bleed at scale 1, in px.
pub const PRINT_BLEED_PX: f64 = 37.5;
/// Crop-mark length as a fraction of the bleed.
pub const CROP_MARK_FRACTION: f64 = 0.6;
/// Border widths are expressed per this many px of base image width.
const BORDER_UNIT_WIDTH: f64 = 1000.0;

/// Options for [`compile_ad`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompileOpts {
    /// Multiplier applied to every absolute measurement.
    pub scale: f64,
    /// Add bleed and crop marks.
    pub print_marks: bool,
    /// Only `bottom-banner` gets its panel and text; every other layout gets a single
    /// full-canvas background fill instead.
    pub banner_only: bool,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            scale: 1.0,
            print_marks: false,
            banner_only: false,
        }
    }
}

/// Compile style, details and image sizes into a drawing plan.
///
/// This is pure: it never touches pixels. `base` is the natural size of the base image and
/// `logo` the natural size of the logo, if any.
pub fn compile_ad(
    style: &StyleConfig,
    details: &BusinessDetails,
    base: Size,
    logo: Option<Size>,
    opts: CompileOpts,
) -> AdResult<AdPlan> {
    let s = opts.scale;
    if !s.is_finite() || s <= 0.0 {
        return Err(AdError::validation(format!("scale must be finite and > 0, got {s}")));
    }

    let bleed = if opts.print_marks { PRINT_BLEED_PX * s } else { 0.0 };
    let w = base.w() * s;
    let h = base.h() * s;
    let surface_w = (w + 2.0 * bleed).floor();
    let surface_h = (h + 2.0 * bleed).floor();
    let max = f64::from(u32::MAX);
    if surface_w < 1.0 || surface_h < 1.0 || surface_w > max || surface_h > max {
        return Err(AdError::surface(format!(
            "surface {surface_w}x{surface_h} is out of range"
        )));
    }

    let layout = style.layout_id();
    let region = resolve_layout(layout, w, h, &style.padding, logo);
    let origin = Point::new(bleed, bleed);
    let content = Rect::new(bleed, bleed, bleed + w, bleed + h);
    let to_surface = |r: Rect| r + origin.to_vec2();
    let border_unit = base.w() / BORDER_UNIT_WIDTH * s;

    let mut ops = Vec::with_capacity(8);
    ops.push(DrawOp::Image {
        role: ImageRole::Base,
        dest: content,
        filter: FilterChain::from_style(style, s),
    });

    let paint = panel_paint(style, content);
    let legacy_fill = opts.banner_only && layout != Some(LayoutId::BottomBanner);
    if legacy_fill {
        ops.push(DrawOp::FillRect {
            rect: content,
            paint,
        });
    } else {
        for panel in &region.panels {
            let rect = to_surface(panel.rect);
            ops.push(DrawOp::FillRect { rect, paint });
            if panel.outlined && style.border_width > 0.0 {
                ops.push(DrawOp::StrokeRect {
                    rect,
                    color: style.border_color,
                    width: style.border_width / 2.0 * border_unit,
                });
            }
        }
        for slot in &region.texts {
            if let Some(run) = text_run(style, details, slot, origin, s) {
                ops.push(DrawOp::Text(run));
            }
        }
    }

    if let Some(dest) = region.logo {
        ops.push(DrawOp::Image {
            role: ImageRole::Logo,
            dest: to_surface(dest),
            filter: FilterChain::default(),
        });
    }

    if style.border_width > 0.0 {
        ops.push(DrawOp::StrokeRect {
            rect: content,
            color: style.border_color,
            width: style.border_width * border_unit,
        });
    }

    if opts.print_marks {
        crop_marks(&mut ops, surface_w, surface_h, bleed, s);
    }

    tracing::debug!(
        width = surface_w,
        height = surface_h,
        ops = ops.len(),
        layout = layout.map_or("fallback", LayoutId::as_str),
        "compiled ad plan"
    );

    Ok(AdPlan {
        width: surface_w as u32,
        height: surface_h as u32,
        scale: s,
        bleed,
        content,
        layout,
        frame_effect: style.frame_effect,
        ops,
    })
}

fn panel_paint(style: &StyleConfig, content: Rect) -> Paint {
    let op = style.background_opacity;
    if style.use_gradient {
        Paint::LinearGradient {
            start: Point::new(content.x0, content.y0),
            end: Point::new(content.x1, content.y1),
            from: style.background_gradient_start.with_opacity(op),
            to: style.background_gradient_end.with_opacity(op),
        }
    } else {
        Paint::Solid(style.background_color.with_opacity(op))
    }
}

fn slot_text(details: &BusinessDetails, role: TextRole) -> Option<String> {
    let present = |v: &str| (!v.trim().is_empty()).then(|| v.to_owned());
    match role {
        TextRole::Company => Some(details.company_name.clone()),
        TextRole::ContactLine => present(&details.contact_line()),
        TextRole::TelLabel => present(&details.tel).map(|t| format!("Tel: {t}")),
        TextRole::EmailLabel => present(&details.email).map(|e| format!("Email: {e}")),
    }
}

fn text_run(
    style: &StyleConfig,
    details: &BusinessDetails,
    slot: &TextSlot,
    origin: Point,
    scale: f64,
) -> Option<TextRun> {
    let raw = slot_text(details, slot.role)?;
    let weight = if slot.force_bold {
        FontWeight::BOLD
    } else {
        style.font_weight
    };
    Some(TextRun {
        text: apply_text_transform(&raw, style.text_transform),
        anchor: slot.anchor + origin.to_vec2(),
        align: slot.align,
        font_size: slot.font_size,
        weight,
        font_family: style.font_family.clone(),
        letter_spacing: style.letter_spacing * scale,
        passes: text_passes(style.text_effect, style.font_color, scale),
    })
}

fn crop_marks(ops: &mut Vec<DrawOp>, sw: f64, sh: f64, bleed: f64, scale: f64) {
    let len = bleed * CROP_MARK_FRACTION;
    let segments = [
        // top-left
        ((0.0, bleed), (len, bleed)),
        ((bleed, 0.0), (bleed, len)),
        // top-right
        ((sw - len, bleed), (sw, bleed)),
        ((sw - bleed, 0.0), (sw - bleed, len)),
        // bottom-left
        ((0.0, sh - bleed), (len, sh - bleed)),
        ((bleed, sh - len), (bleed, sh)),
        // bottom-right
        ((sw - len, sh - bleed), (sw, sh - bleed)),
        ((sw - bleed, sh - len), (sw - bleed, sh)),
    ];
    for ((x0, y0), (x1, y1)) in segments {
        ops.push(DrawOp::Line {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
            color: Color::BLACK,
            width: scale,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
