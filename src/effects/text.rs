use crate::foundation::color::Color;
use crate::foundation::core::Vec2;
use crate::style::model::{TextEffect, TextTransform};

/// Apply a case transform in a single pass.
///
/// `Capitalize` uppercases the first character of every whitespace-separated word and leaves the
/// rest of the word untouched.
pub fn apply_text_transform(text: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => text.to_owned(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
        TextTransform::Capitalize => {
            let mut out = String::with_capacity(text.len());
            let mut word_start = true;
            for ch in text.chars() {
                if ch.is_whitespace() {
                    word_start = true;
                    out.push(ch);
                } else if word_start {
                    word_start = false;
                    out.extend(ch.to_uppercase());
                } else {
                    out.push(ch);
                }
            }
            out
        }
    }
}

/// How a pass paints glyph outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PassMode {
    /// Filled glyphs.
    Fill,
    /// Stroked glyph outlines.
    Stroke {
        /// Stroke width in px.
        width: f64,
    },
}

/// One paint of a text run. Effects expand into several passes painted in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextPass {
    /// Offset from the run origin.
    pub offset: Vec2,
    /// Paint color.
    pub color: Color,
    /// Fill or stroke.
    pub mode: PassMode,
    /// Gaussian standard deviation in px; `0.0` is sharp.
    pub blur_sigma: f64,
}

impl TextPass {
    fn fill(color: Color) -> Self {
        Self {
            offset: Vec2::ZERO,
            color,
            mode: PassMode::Fill,
            blur_sigma: 0.0,
        }
    }

    fn shadow(color: Color, offset: Vec2, blur: f64) -> Self {
        Self {
            offset,
            color,
            mode: PassMode::Fill,
            blur_sigma: canvas_blur_sigma(blur),
        }
    }
}

/// Canvas `shadowBlur` is twice the Gaussian standard deviation.
pub fn canvas_blur_sigma(shadow_blur: f64) -> f64 {
    (shadow_blur / 2.0).max(0.0)
}

const SHADOW_COLOR: Color = Color::rgba(0, 0, 0, 128);
const EXTRUDE_FAR: Color = Color::rgb(0x33, 0x33, 0x33);
const EXTRUDE_NEAR: Color = Color::rgb(0x55, 0x55, 0x55);

/// Expand a text effect into explicit paint passes, last pass on top.
pub fn text_passes(effect: TextEffect, fill: Color, scale: f64) -> Vec<TextPass> {
    let s = scale;
    match effect {
        TextEffect::None => vec![TextPass::fill(fill)],
        TextEffect::Shadow => vec![
            TextPass::shadow(SHADOW_COLOR, Vec2::new(2.0 * s, 2.0 * s), 5.0 * s),
            TextPass::fill(fill),
        ],
        TextEffect::Extrude3d => vec![
            TextPass {
                offset: Vec2::new(2.0 * s, 2.0 * s),
                ..TextPass::fill(EXTRUDE_FAR)
            },
            TextPass {
                offset: Vec2::new(s, s),
                ..TextPass::fill(EXTRUDE_NEAR)
            },
            TextPass::fill(fill),
        ],
        TextEffect::Outline => vec![
            TextPass {
                mode: PassMode::Stroke { width: 2.0 * s },
                ..TextPass::fill(Color::BLACK)
            },
            TextPass::fill(fill),
        ],
        TextEffect::Glow => {
            let glow = TextPass::shadow(fill, Vec2::ZERO, 10.0 * s);
            vec![glow, TextPass::fill(fill), glow, TextPass::fill(fill)]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/text.rs"]
mod tests;
