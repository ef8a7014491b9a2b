use std::borrow::Cow;

use crate::assets::loader::FontBytes;
use crate::foundation::core::Rect;
use crate::foundation::error::{AdError, AdResult};
use crate::layout::resolver::TextAlign;
use crate::style::model::FontWeight;

/// A glyph positioned relative to the line box's top-left corner, `y` on the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PlacedGlyph {
    pub(crate) id: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// Shaped single-line text ready to be painted.
#[derive(Clone, Debug)]
pub(crate) struct ShapedLine {
    pub(crate) glyphs: Vec<PlacedGlyph>,
    pub(crate) font_size: f32,
    pub(crate) width: f64,
    pub(crate) height: f64,
    /// Distance from the top of the line box to the middle of the em box.
    pub(crate) middle: f64,
}

impl ShapedLine {
    /// Top-left corner that puts the run at `anchor` with the given alignment and a middle
    /// baseline.
    pub(crate) fn origin(&self, anchor_x: f64, anchor_y: f64, align: TextAlign) -> (f64, f64) {
        let x = match align {
            TextAlign::Left => anchor_x,
            TextAlign::Center => anchor_x - self.width / 2.0,
            TextAlign::Right => anchor_x - self.width,
        };
        (x, anchor_y - self.middle)
    }

    /// Line box at the given origin.
    pub(crate) fn bounds(&self, origin: (f64, f64)) -> Rect {
        Rect::new(
            origin.0,
            origin.1,
            origin.0 + self.width,
            origin.1 + self.height,
        )
    }
}

/// Parley shaping contexts bound to one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Register `font` and prepare fresh contexts.
    pub(crate) fn new(font: &FontBytes) -> AdResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.0.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| AdError::load("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AdError::load("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.0.to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` on a single unbroken line.
    pub(crate) fn shape(
        &mut self,
        text: &str,
        size_px: f32,
        weight: FontWeight,
        letter_spacing: f32,
    ) -> AdResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AdError::validation("font size must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(weight.0)),
        ));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(letter_spacing));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        let mut middle = f64::from(size_px) / 2.0;
        for (i, line) in layout.lines().enumerate() {
            if i == 0 {
                let m = line.metrics();
                middle = f64::from(m.baseline) - f64::from(m.ascent - m.descent) / 2.0;
            }
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        Ok(ShapedLine {
            glyphs,
            font_size: size_px,
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            middle,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
