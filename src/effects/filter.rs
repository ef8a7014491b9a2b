//! Base-image filter pipeline.
//!
//! Order is fixed: one categorical filter, then brightness, contrast and saturate, then the
//! optional duotone remap. Matrix steps follow the CSS Filter Effects definitions and work on
//! unpremultiplied color.

use crate::effects::blur::{EdgeMode, blur_rgba8_premul};
use crate::foundation::color::Color;
use crate::foundation::core::{premul_channel, unpremul_rgb};
use crate::foundation::error::{AdError, AdResult};
use crate::style::model::{ImageFilter, StyleConfig};

/// Blur radius of the categorical `blur` filter at scale 1, in px.
pub const BLUR_FILTER_PX: f64 = 5.0;

/// Row-major 4x5 color matrix; the fifth column is an offset in `[0, 1]` units.
pub type ColorMatrix = [f32; 20];

const IDENTITY: ColorMatrix = [
    1.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
];

/// One step of the pipeline before the duotone remap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterStep {
    /// Full desaturation with Rec.709 weights.
    Grayscale,
    /// Full sepia tone.
    Sepia,
    /// Full inversion.
    Invert,
    /// Gaussian blur with the given standard deviation in surface px.
    Blur {
        /// Standard deviation in px.
        sigma: f64,
    },
    /// Channel multiplier; `1.0` is identity.
    Brightness(f64),
    /// Contrast around mid-gray; `1.0` is identity.
    Contrast(f64),
    /// Saturation; `1.0` is identity.
    Saturate(f64),
}

impl FilterStep {
    /// Color matrix for this step; `None` for blur.
    pub fn matrix(self) -> Option<ColorMatrix> {
        let m = match self {
            Self::Grayscale => saturate_matrix(0.0),
            Self::Sepia => [
                0.393, 0.769, 0.189, 0.0, 0.0, //
                0.349, 0.686, 0.168, 0.0, 0.0, //
                0.272, 0.534, 0.131, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
            Self::Invert => [
                -1.0, 0.0, 0.0, 0.0, 1.0, //
                0.0, -1.0, 0.0, 0.0, 1.0, //
                0.0, 0.0, -1.0, 0.0, 1.0, //
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
            Self::Blur { .. } => return None,
            Self::Brightness(b) => {
                let b = b as f32;
                let mut m = IDENTITY;
                m[0] = b;
                m[6] = b;
                m[12] = b;
                m
            }
            Self::Contrast(c) => {
                let c = c as f32;
                let off = 0.5 - 0.5 * c;
                let mut m = IDENTITY;
                for row in 0..3 {
                    m[row * 5 + row] = c;
                    m[row * 5 + 4] = off;
                }
                m
            }
            Self::Saturate(s) => saturate_matrix(s as f32),
        };
        Some(m)
    }

    /// CSS filter function, e.g. `brightness(120%)`.
    pub fn css(self) -> String {
        match self {
            Self::Grayscale => "grayscale(100%)".to_owned(),
            Self::Sepia => "sepia(100%)".to_owned(),
            Self::Invert => "invert(100%)".to_owned(),
            Self::Blur { sigma } => format!("blur({}px)", fmt_num(sigma)),
            Self::Brightness(v) => format!("brightness({}%)", fmt_num(v * 100.0)),
            Self::Contrast(v) => format!("contrast({}%)", fmt_num(v * 100.0)),
            Self::Saturate(v) => format!("saturate({}%)", fmt_num(v * 100.0)),
        }
    }
}

fn saturate_matrix(s: f32) -> ColorMatrix {
    [
        0.2126 + 0.7874 * s,
        0.7152 - 0.7152 * s,
        0.0722 - 0.0722 * s,
        0.0,
        0.0,
        0.2126 - 0.2126 * s,
        0.7152 + 0.2848 * s,
        0.0722 - 0.0722 * s,
        0.0,
        0.0,
        0.2126 - 0.2126 * s,
        0.7152 - 0.7152 * s,
        0.0722 + 0.9278 * s,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

pub(crate) fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == r.trunc() {
        format!("{}", r as i64)
    } else {
        format!("{r}")
    }
}

/// Two-color luminance remap applied after every other filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Duotone {
    /// Color for black (L = 0).
    pub shadow: Color,
    /// Color for white (L = 255).
    pub highlight: Color,
}

/// Resolved filter pipeline for one render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterChain {
    /// Steps in application order.
    pub steps: Vec<FilterStep>,
    /// Remap applied after `steps`.
    pub duotone: Option<Duotone>,
}

impl FilterChain {
    /// Build the chain for `style`; `scale` sizes the categorical blur.
    pub fn from_style(style: &StyleConfig, scale: f64) -> Self {
        let mut steps = Vec::new();
        match style.image_filter {
            ImageFilter::None | ImageFilter::Duotone => {}
            ImageFilter::Grayscale => steps.push(FilterStep::Grayscale),
            ImageFilter::Sepia => steps.push(FilterStep::Sepia),
            ImageFilter::Invert => steps.push(FilterStep::Invert),
            ImageFilter::Blur => steps.push(FilterStep::Blur {
                sigma: BLUR_FILTER_PX * scale,
            }),
        }
        let pct = |v: f64| v / 100.0;
        if style.brightness != 100.0 {
            steps.push(FilterStep::Brightness(pct(style.brightness)));
        }
        if style.contrast != 100.0 {
            steps.push(FilterStep::Contrast(pct(style.contrast)));
        }
        if style.saturate != 100.0 {
            steps.push(FilterStep::Saturate(pct(style.saturate)));
        }
        let duotone = (style.image_filter == ImageFilter::Duotone).then_some(Duotone {
            shadow: style.duotone_color1,
            highlight: style.duotone_color2,
        });
        Self { steps, duotone }
    }

    /// Whether the chain leaves pixels untouched.
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty() && self.duotone.is_none()
    }

    /// CSS `filter` value for the steps (duotone excluded), or `None` when there are none.
    pub fn css(&self) -> Option<String> {
        if self.steps.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.steps.iter().map(|s| s.css()).collect();
        Some(parts.join(" "))
    }

    /// Run the steps on a premultiplied RGBA8 buffer; the duotone remap is not applied.
    pub fn apply_steps(&self, rgba: &mut Vec<u8>, width: u32, height: u32) -> AdResult<()> {
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(AdError::validation("filter buffer does not match its dimensions"));
        }
        for step in &self.steps {
            match step.matrix() {
                Some(m) => color_matrix_rgba8_premul_in_place(rgba, m),
                None => {
                    if let FilterStep::Blur { sigma } = *step {
                        *rgba =
                            blur_rgba8_premul(rgba, width, height, sigma, EdgeMode::Clamp)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Apply a color matrix to premultiplied pixels.
pub fn color_matrix_rgba8_premul_in_place(rgba: &mut [u8], m: ColorMatrix) {
    for px in rgba.chunks_exact_mut(4) {
        let pa = f32::from(px[3]) / 255.0;
        let inv_a = if pa > 0.0 { 1.0 / pa } else { 0.0 };
        let r = f32::from(px[0]) / 255.0 * inv_a;
        let g = f32::from(px[1]) / 255.0 * inv_a;
        let b = f32::from(px[2]) / 255.0 * inv_a;
        let a = pa;

        let row = |i: usize| {
            (m[i] * r + m[i + 1] * g + m[i + 2] * b + m[i + 3] * a + m[i + 4]).clamp(0.0, 1.0)
        };
        let (out_r, out_g, out_b, out_a) = (row(0), row(5), row(10), row(15));

        let q = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        px[0] = q(out_r * out_a);
        px[1] = q(out_g * out_a);
        px[2] = q(out_b * out_a);
        px[3] = q(out_a);
    }
}

/// BT.601 luma of a straight RGB triple, in `[0, 255]`.
pub fn luma_bt601(r: u8, g: u8, b: u8) -> f64 {
    let sum = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    f64::from(sum) / 1000.0
}

/// `c1 + (c2 - c1) · luma / 255`, rounded to nearest.
pub fn duotone_channel(c1: u8, c2: u8, luma: f64) -> u8 {
    let n = luma / 255.0;
    let c1 = f64::from(c1);
    let c2 = f64::from(c2);
    (c1 + (c2 - c1) * n).round().clamp(0.0, 255.0) as u8
}

/// Remap premultiplied pixels between the two duotone colors, keeping alpha.
pub fn duotone_rgba8_premul_in_place(rgba: &mut [u8], duo: Duotone) {
    let (c1, c2) = (duo.shadow, duo.highlight);
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        if a == 0 {
            continue;
        }
        let [r, g, b] = unpremul_rgb([px[0], px[1], px[2]], a);
        let l = luma_bt601(r, g, b);
        px[0] = premul_channel(duotone_channel(c1.r, c2.r, l), a);
        px[1] = premul_channel(duotone_channel(c1.g, c2.g, l), a);
        px[2] = premul_channel(duotone_channel(c1.b, c2.b, l), a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
