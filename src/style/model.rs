use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{AdError, AdResult};

/// The fixed set of layout templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutId {
    /// Full-width panel along the bottom edge.
    #[serde(rename = "bottom-banner")]
    BottomBanner,
    /// Full-width panel along the top edge.
    #[serde(rename = "top-banner")]
    TopBanner,
    /// Inset box in the bottom-left corner.
    #[serde(rename = "corner-box")]
    CornerBox,
    /// Full-height panel on the left side.
    #[serde(rename = "split-left")]
    SplitLeft,
    /// Tall panel covering the lower third.
    #[serde(rename = "split-vertical")]
    SplitVertical,
    /// Centered box overlapping the lower half of the image.
    #[serde(rename = "overlap")]
    Overlap,
    /// Header bar with a two-column contact row below it.
    #[serde(rename = "header-2col")]
    Header2Col,
}

impl LayoutId {
    /// Every layout id, in presentation order.
    pub const ALL: [LayoutId; 7] = [
        LayoutId::BottomBanner,
        LayoutId::TopBanner,
        LayoutId::CornerBox,
        LayoutId::SplitLeft,
        LayoutId::SplitVertical,
        LayoutId::Overlap,
        LayoutId::Header2Col,
    ];

    /// Parse a layout id; unknown ids yield `None` and select the fallback layout.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bottom-banner" => Some(Self::BottomBanner),
            "top-banner" => Some(Self::TopBanner),
            "corner-box" => Some(Self::CornerBox),
            "split-left" => Some(Self::SplitLeft),
            "split-vertical" => Some(Self::SplitVertical),
            "overlap" => Some(Self::Overlap),
            "header-2col" => Some(Self::Header2Col),
            _ => None,
        }
    }

    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomBanner => "bottom-banner",
            Self::TopBanner => "top-banner",
            Self::CornerBox => "corner-box",
            Self::SplitLeft => "split-left",
            Self::SplitVertical => "split-vertical",
            Self::Overlap => "overlap",
            Self::Header2Col => "header-2col",
        }
    }
}

/// Case transform applied to text before drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Text is drawn as given.
    #[default]
    None,
    /// All characters uppercased.
    Uppercase,
    /// All characters lowercased.
    Lowercase,
    /// First letter of each whitespace-separated word uppercased.
    Capitalize,
}

/// Decoration effect applied when drawing text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEffect {
    /// Plain fill.
    #[default]
    None,
    /// Soft black drop shadow.
    Shadow,
    /// Stacked darker fills simulating extrusion.
    #[serde(rename = "3d")]
    Extrude3d,
    /// Black stroke under the fill.
    Outline,
    /// Blurred halo in the text color.
    Glow,
}

/// Categorical filter applied to the base image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFilter {
    /// No categorical filter.
    #[default]
    None,
    /// Full desaturation.
    Grayscale,
    /// Full sepia toning.
    Sepia,
    /// Color inversion.
    Invert,
    /// Fixed 5px Gaussian blur (scaled by the render scale).
    Blur,
    /// Two-color luminance remap.
    Duotone,
}

/// Presentation hint for viewers; never rendered into the artifact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameEffect {
    /// Flat presentation.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Tilted presentation with CSS perspective.
    #[serde(rename = "3d-perspective")]
    Perspective3d,
}

impl FrameEffect {
    /// CSS for the viewer as `(container perspective, artifact transform)`.
    pub fn viewer_css(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::None => None,
            Self::Perspective3d => Some(("perspective(1000px)", "rotateY(-10deg) rotateX(5deg)")),
        }
    }
}

/// CSS-style numeric font weight (100..=900).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Regular weight.
    pub const NORMAL: Self = Self(400);
    /// Bold weight.
    pub const BOLD: Self = Self(700);

    /// Parse CSS keywords (`normal`, `bold`, `bolder`, `lighter`) or a numeric weight.
    pub fn parse(s: &str) -> AdResult<Self> {
        match s.trim() {
            "normal" => Ok(Self::NORMAL),
            "bold" => Ok(Self::BOLD),
            "bolder" => Ok(Self(900)),
            "lighter" => Ok(Self(100)),
            other => {
                let n: u16 = other
                    .parse()
                    .map_err(|_| AdError::validation(format!("invalid font weight \"{other}\"")))?;
                Self::from_number(n)
            }
        }
    }

    fn from_number(n: u16) -> AdResult<Self> {
        if !(100..=900).contains(&n) {
            return Err(AdError::validation(format!(
                "font weight {n} must be within 100..=900"
            )));
        }
        Ok(Self(n))
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl Serialize for FontWeight {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match *self {
            Self::NORMAL => serializer.serialize_str("normal"),
            Self::BOLD => serializer.serialize_str("bold"),
            Self(n) => serializer.collect_str(&n),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(u16),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(n) => Self::from_number(n).map_err(serde::de::Error::custom),
            Repr::Str(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Padding as percentages: top/bottom of canvas height, left/right of canvas width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Percent of height.
    pub top: f64,
    /// Percent of width.
    pub right: f64,
    /// Percent of height.
    pub bottom: f64,
    /// Percent of width.
    pub left: f64,
}

impl Padding {
    /// Same percentage on every side.
    pub fn uniform(pct: f64) -> Self {
        Self {
            top: pct,
            right: pct,
            bottom: pct,
            left: pct,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(4.0)
    }
}

/// Full style configuration for one render call.
///
/// Supplied whole per call and never mutated while rendering. Every field is optional in JSON;
/// missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    /// Layout id; `None` and unknown ids select the fallback banner.
    pub layout: Option<String>,
    /// CSS font-family stack, emitted verbatim into vector output.
    pub font_family: String,
    /// Text fill color.
    pub font_color: Color,
    /// Text weight.
    pub font_weight: FontWeight,
    /// Case transform.
    pub text_transform: TextTransform,
    /// Extra spacing between characters, in px at scale 1.
    pub letter_spacing: f64,
    /// Text decoration effect.
    pub text_effect: TextEffect,
    /// Solid panel color.
    pub background_color: Color,
    /// Panel opacity in `[0, 1]`.
    pub background_opacity: f64,
    /// Fill panels with a diagonal gradient instead of the solid color.
    pub use_gradient: bool,
    /// Gradient color at the top-left corner.
    pub background_gradient_start: Color,
    /// Gradient color at the bottom-right corner.
    pub background_gradient_end: Color,
    /// Categorical image filter.
    pub image_filter: ImageFilter,
    /// Brightness percent (100 = unchanged).
    pub brightness: f64,
    /// Contrast percent (100 = unchanged).
    pub contrast: f64,
    /// Saturation percent (100 = unchanged).
    pub saturate: f64,
    /// Duotone color mapped to black.
    pub duotone_color1: Color,
    /// Duotone color mapped to white.
    pub duotone_color2: Color,
    /// Border stroke color.
    pub border_color: Color,
    /// Border width in thousandths of the base image width; 0 disables the border.
    pub border_width: f64,
    /// Viewer presentation hint.
    pub frame_effect: FrameEffect,
    /// Text and logo insets.
    pub padding: Padding,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            layout: None,
            font_family: "Helvetica, sans-serif".to_owned(),
            font_color: Color::WHITE,
            font_weight: FontWeight::NORMAL,
            text_transform: TextTransform::None,
            letter_spacing: 0.0,
            text_effect: TextEffect::None,
            background_color: Color::BLACK,
            background_opacity: 0.7,
            use_gradient: false,
            background_gradient_start: Color::BLACK,
            background_gradient_end: Color::rgb(0x4b, 0x00, 0x82),
            image_filter: ImageFilter::None,
            brightness: 100.0,
            contrast: 100.0,
            saturate: 100.0,
            duotone_color1: Color::rgb(0, 0, 255),
            duotone_color2: Color::rgb(255, 255, 0),
            border_color: Color::WHITE,
            border_width: 0.0,
            frame_effect: FrameEffect::None,
            padding: Padding::default(),
        }
    }
}

impl StyleConfig {
    /// Parse a style from JSON text and validate it.
    pub fn from_json_str(s: &str) -> AdResult<Self> {
        let style: Self = serde_json::from_str(s)
            .map_err(|e| AdError::validation(format!("invalid style json: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Read, parse and validate a style JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> AdResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read style '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Builder-style layout selection.
    pub fn with_layout(mut self, layout: LayoutId) -> Self {
        self.layout = Some(layout.as_str().to_owned());
        self
    }

    /// Resolved layout; `None` means the fallback banner.
    pub fn layout_id(&self) -> Option<LayoutId> {
        self.layout.as_deref().and_then(LayoutId::parse)
    }

    /// Check numeric ranges. Padding is only checked for sign and finiteness.
    pub fn validate(&self) -> AdResult<()> {
        if !self.background_opacity.is_finite() || !(0.0..=1.0).contains(&self.background_opacity)
        {
            return Err(AdError::validation("backgroundOpacity must be within [0, 1]"));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(AdError::validation("borderWidth must be finite and >= 0"));
        }
        if !self.letter_spacing.is_finite() {
            return Err(AdError::validation("letterSpacing must be finite"));
        }
        for (name, v) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturate", self.saturate),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(AdError::validation(format!("{name} must be finite and >= 0")));
            }
        }
        let p = self.padding;
        for (name, v) in [
            ("padding.top", p.top),
            ("padding.right", p.right),
            ("padding.bottom", p.bottom),
            ("padding.left", p.left),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(AdError::validation(format!("{name} must be finite and >= 0")));
            }
        }
        if self.font_family.trim().is_empty() {
            return Err(AdError::validation("fontFamily must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/model.rs"]
mod tests;
