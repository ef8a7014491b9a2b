//! Layout templates: pure geometry for panels, text anchors and the logo.
//!
//! All outputs are in *content space*: `(0, 0)` is the top-left of the unbled ad and
//! `(width, height)` its bottom-right, already multiplied by the render scale.

use crate::foundation::core::{Point, Rect, Size};
use crate::style::model::{LayoutId, Padding};

/// Height of the banner panels as a fraction of the canvas height.
pub const BANNER_FRACTION: f64 = 0.15;
/// Maximum logo extent as a fraction of the canvas width and height.
pub const LOGO_MAX_FRACTION: f64 = 0.15;

/// Horizontal alignment of a text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor is the left edge of the text.
    Left,
    /// Anchor is the horizontal center of the text.
    Center,
    /// Anchor is the right edge of the text.
    Right,
}

/// What a text slot displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    /// The company name.
    Company,
    /// Phone and email joined with `" | "`.
    ContactLine,
    /// `Tel: <tel>`, only when a phone number is present.
    TelLabel,
    /// `Email: <email>`, only when an email is present.
    EmailLabel,
}

/// A filled background panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    /// Panel bounds.
    pub rect: Rect,
    /// Whether the panel also gets a border-colored outline.
    pub outlined: bool,
}

/// A text anchor; text is vertically centered on `anchor.y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextSlot {
    /// Content shown in this slot.
    pub role: TextRole,
    /// Anchor point.
    pub anchor: Point,
    /// Horizontal alignment relative to the anchor.
    pub align: TextAlign,
    /// Font size in px.
    pub font_size: f64,
    /// Forces a bold weight regardless of the style.
    pub force_bold: bool,
}

/// Geometry for one render call.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutRegion {
    /// The layout that produced this region; `None` is the fallback banner.
    pub layout: Option<LayoutId>,
    /// Background panels, in paint order.
    pub panels: Vec<PanelRect>,
    /// Text slots, in paint order.
    pub texts: Vec<TextSlot>,
    /// Logo destination, present only when a logo was supplied.
    pub logo: Option<Rect>,
}

/// Padding resolved to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaddingPx {
    /// Pixels from the top edge.
    pub top: f64,
    /// Pixels from the right edge.
    pub right: f64,
    /// Pixels from the bottom edge.
    pub bottom: f64,
    /// Pixels from the left edge.
    pub left: f64,
}

impl PaddingPx {
    /// Convert percentages; top/bottom use `height`, left/right use `width`. No clamping.
    pub fn from_percent(p: &Padding, width: f64, height: f64) -> Self {
        Self {
            top: height * (p.top / 100.0),
            right: width * (p.right / 100.0),
            bottom: height * (p.bottom / 100.0),
            left: width * (p.left / 100.0),
        }
    }
}

/// Resolve a layout template for a `width × height` content area.
///
/// Unknown or absent layouts (`None`) produce the fallback banner. The logo anchor is
/// independent of the layout.
pub fn resolve_layout(
    layout: Option<LayoutId>,
    width: f64,
    height: f64,
    padding: &Padding,
    logo: Option<Size>,
) -> LayoutRegion {
    let pad = PaddingPx::from_percent(padding, width, height);
    let (w, h) = (width, height);

    let mut panels = Vec::with_capacity(1);
    let mut texts = Vec::with_capacity(3);
    let mut panel = |rect: Rect, outlined: bool| panels.push(PanelRect { rect, outlined });
    let mut text = |role, x: f64, y: f64, align, font_size| {
        texts.push(TextSlot {
            role,
            anchor: Point::new(x, y),
            align,
            font_size,
            force_bold: false,
        })
    };

    match layout {
        Some(LayoutId::BottomBanner) => {
            let bh = h * BANNER_FRACTION;
            panel(Rect::new(0.0, h - bh, w, h), false);
            let y = h - bh / 2.0;
            text(TextRole::Company, pad.left, y, TextAlign::Left, bh * 0.3);
            text(TextRole::ContactLine, w - pad.right, y, TextAlign::Right, bh * 0.2);
        }
        Some(LayoutId::TopBanner) => {
            let bh = h * BANNER_FRACTION;
            panel(Rect::new(0.0, 0.0, w, bh), false);
            let y = bh / 2.0;
            text(TextRole::Company, pad.left, y, TextAlign::Left, bh * 0.3);
            text(TextRole::ContactLine, w - pad.right, y, TextAlign::Right, bh * 0.2);
        }
        Some(LayoutId::CornerBox) => {
            let (bw, bh) = (w * 0.45, h * 0.3);
            let (x, y) = (pad.left, h - pad.bottom - bh);
            panel(Rect::new(x, y, x + bw, y + bh), false);
            let tx = x + bw * 0.08;
            text(TextRole::Company, tx, y + bh * 0.35, TextAlign::Left, bh * 0.25);
            text(TextRole::ContactLine, tx, y + bh * 0.7, TextAlign::Left, bh * 0.15);
        }
        Some(LayoutId::SplitLeft) => {
            panel(Rect::new(0.0, 0.0, w * 0.4, h), false);
            let band = h * BANNER_FRACTION;
            let mid = h / 2.0;
            text(TextRole::Company, pad.left, mid - band * 0.25, TextAlign::Left, band * 0.3);
            text(TextRole::ContactLine, pad.left, mid + band * 0.25, TextAlign::Left, band * 0.2);
        }
        Some(LayoutId::SplitVertical) => {
            let bh = h * 0.35;
            let top = h - bh;
            panel(Rect::new(0.0, top, w, h), false);
            let avail = bh - pad.top - pad.bottom;
            let cx = w / 2.0;
            text(TextRole::Company, cx, top + pad.top + avail * 0.3, TextAlign::Center, bh * 0.25);
            text(TextRole::ContactLine, cx, top + pad.top + avail * 0.7, TextAlign::Center, bh * 0.15);
        }
        Some(LayoutId::Overlap) => {
            let (bw, bh) = (w * 0.7, h * 0.25);
            let (x, y) = ((w - bw) / 2.0, h * 0.65);
            panel(Rect::new(x, y, x + bw, y + bh), true);
            let avail = bh - pad.top - pad.bottom;
            let cx = w / 2.0;
            text(TextRole::Company, cx, y + pad.top + avail * 0.35, TextAlign::Center, bh * 0.3);
            text(TextRole::ContactLine, cx, y + pad.top + avail * 0.7, TextAlign::Center, bh * 0.2);
        }
        Some(LayoutId::Header2Col) => {
            let bh = h * 0.2;
            panel(Rect::new(0.0, 0.0, w, bh), false);
            let avail = bh - pad.top - pad.bottom;
            text(TextRole::Company, w / 2.0, pad.top + avail / 2.0, TextAlign::Center, bh * 0.4);
            let row_y = bh + pad.top;
            let size = h * 0.05;
            text(TextRole::TelLabel, pad.left, row_y, TextAlign::Left, size);
            text(TextRole::EmailLabel, w / 2.0 + pad.left, row_y, TextAlign::Left, size);
        }
        None => {
            let bh = h * BANNER_FRACTION;
            panel(Rect::new(0.0, h - bh, w, h), false);
            text(TextRole::Company, pad.left, h - bh / 2.0, TextAlign::Left, bh * 0.3);
        }
    }
    if layout.is_none() {
        for slot in &mut texts {
            slot.force_bold = true;
        }
    }

    LayoutRegion {
        layout,
        panels,
        texts,
        logo: logo.map(|l| logo_anchor(w, h, &pad, l)),
    }
}

/// Top-right logo placement, scaled by `min(1, 0.15·W / logoW, 0.15·H / logoH)`.
pub fn logo_anchor(width: f64, height: f64, pad: &PaddingPx, logo: Size) -> Rect {
    let s = logo_scale(width, height, logo);
    let lw = logo.w() * s;
    let lh = logo.h() * s;
    let x = width - lw - pad.right;
    let y = pad.top;
    Rect::new(x, y, x + lw, y + lh)
}

/// Uniform logo scale; never enlarges the logo.
pub fn logo_scale(width: f64, height: f64, logo: Size) -> f64 {
    1f64.min(LOGO_MAX_FRACTION * width / logo.w())
        .min(LOGO_MAX_FRACTION * height / logo.h())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolver.rs"]
mod tests;
