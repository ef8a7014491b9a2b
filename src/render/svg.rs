//! SVG vector backend.
//!
//! Produces one self-contained document: images are inlined as base64 data URIs and every
//! filter, gradient and blur lives in `<defs>`.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;

use base64::Engine as _;

use crate::assets::decode::DecodedImage;
use crate::assets::loader::AssetSet;
use crate::compile::plan::{ImageRole, Paint, TextRun};
use crate::effects::filter::{Duotone, FilterChain, fmt_num};
use crate::effects::text::PassMode;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{AdError, AdResult};
use crate::layout::resolver::TextAlign;
use crate::render::backend::PaintBackend;

/// How much of the layout the vector backend reproduces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VectorParity {
    /// Every layout emits its panels and text, matching the raster output.
    #[default]
    Full,
    /// Only `bottom-banner` gets panel and text; other layouts get a full-canvas background.
    BottomBannerOnly,
}

impl VectorParity {
    pub(crate) fn banner_only(self) -> bool {
        self == Self::BottomBannerOnly
    }
}

const DUOTONE_ID: &str = "duotone";

/// Backend that writes SVG markup instead of pixels.
pub struct VectorBackend {
    width: u32,
    height: u32,
    defs: String,
    body: String,
    base: Arc<DecodedImage>,
    logo: Option<Arc<DecodedImage>>,
    duotone: Option<Duotone>,
    gradients: Vec<(Paint, String)>,
    blurs: Vec<(u64, String)>,
}

impl VectorBackend {
    /// Start a `width × height` document.
    pub fn new(width: u32, height: u32, assets: &AssetSet) -> Self {
        Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
            base: Arc::clone(&assets.base),
            logo: assets.logo.clone(),
            duotone: None,
            gradients: Vec::new(),
            blurs: Vec::new(),
        }
    }

    /// Close the document and return it as UTF-8 text.
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.defs.len() + self.body.len() + 256);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        out.push('\n');
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn ensure_duotone(&mut self, duo: Duotone) -> AdResult<()> {
        match self.duotone {
            Some(existing) if existing == duo => return Ok(()),
            Some(_) => {
                return Err(AdError::validation(
                    "a document supports a single duotone pair",
                ));
            }
            None => {}
        }
        let (c1, c2) = (duo.shadow.unit_rgb(), duo.highlight.unit_rgb());
        let _ = writeln!(
            self.defs,
            r#"<filter id="{DUOTONE_ID}" color-interpolation-filters="sRGB" x="0" y="0" width="100%" height="100%">"#
        );
        self.defs.push_str(
            r#"<feColorMatrix type="matrix" values="0.299 0.587 0.114 0 0 0.299 0.587 0.114 0 0 0.299 0.587 0.114 0 0 0 0 0 1 0"/>"#,
        );
        self.defs.push_str("\n<feComponentTransfer>\n");
        for (i, func) in ["feFuncR", "feFuncG", "feFuncB"].into_iter().enumerate() {
            let _ = writeln!(
                self.defs,
                r#"<{func} type="table" tableValues="{} {}"/>"#,
                fmt_num(c1[i]),
                fmt_num(c2[i])
            );
        }
        self.defs.push_str("</feComponentTransfer>\n</filter>\n");
        self.duotone = Some(duo);
        Ok(())
    }

    fn gradient_id(&mut self, paint: &Paint) -> String {
        if let Some((_, id)) = self.gradients.iter().find(|(p, _)| p == paint) {
            return id.clone();
        }
        let id = format!("panel-gradient-{}", self.gradients.len());
        if let Paint::LinearGradient {
            start,
            end,
            from,
            to,
        } = *paint
        {
            let _ = writeln!(
                self.defs,
                r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}"><stop offset="0" {}/><stop offset="1" {}/></linearGradient>"#,
                fmt_num(start.x),
                fmt_num(start.y),
                fmt_num(end.x),
                fmt_num(end.y),
                stop_attrs(from),
                stop_attrs(to),
            );
        }
        self.gradients.push((*paint, id.clone()));
        id
    }

    fn blur_id(&mut self, sigma: f64) -> String {
        let key = sigma.to_bits();
        if let Some((_, id)) = self.blurs.iter().find(|(k, _)| *k == key) {
            return id.clone();
        }
        let id = format!("text-blur-{}", self.blurs.len());
        let _ = writeln!(
            self.defs,
            r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
            fmt_num(sigma)
        );
        self.blurs.push((key, id.clone()));
        id
    }
}

impl PaintBackend for VectorBackend {
    fn draw_image(&mut self, role: ImageRole, dest: Rect, filter: &FilterChain) -> AdResult<()> {
        let img = match role {
            ImageRole::Base => Arc::clone(&self.base),
            ImageRole::Logo => self
                .logo
                .clone()
                .ok_or_else(|| AdError::surface("plan draws a logo but none was loaded"))?,
        };

        let mut filters: Vec<String> = filter.css().into_iter().collect();
        if let Some(duo) = filter.duotone {
            self.ensure_duotone(duo)?;
            filters.push(format!("url(#{DUOTONE_ID})"));
        }
        let filter_attr = if filters.is_empty() {
            String::new()
        } else {
            format!(r#" filter="{}""#, filters.join(" "))
        };

        let data = base64::engine::general_purpose::STANDARD.encode(&img.encoded);
        let _ = writeln!(
            self.body,
            r#"<image href="data:{};base64,{data}" {} preserveAspectRatio="none"{filter_attr}/>"#,
            escape_xml(&img.mime),
            rect_attrs(dest),
        );
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> AdResult<()> {
        let fill = match *paint {
            Paint::Solid(c) => paint_attrs("fill", c),
            Paint::LinearGradient { .. } => format!(r#"fill="url(#{})""#, self.gradient_id(paint)),
        };
        let _ = writeln!(self.body, "<rect {} {fill}/>", rect_attrs(rect));
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) -> AdResult<()> {
        let _ = writeln!(
            self.body,
            r#"<rect {} fill="none" {} stroke-width="{}"/>"#,
            rect_attrs(rect),
            paint_attrs("stroke", color),
            fmt_num(width)
        );
        Ok(())
    }

    fn draw_text(&mut self, run: &TextRun) -> AdResult<()> {
        let anchor = match run.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let text = escape_xml(&run.text);
        for pass in &run.passes {
            let x = run.anchor.x + pass.offset.x;
            let y = run.anchor.y + pass.offset.y;
            let paint = match pass.mode {
                PassMode::Fill => paint_attrs("fill", pass.color),
                PassMode::Stroke { width } => format!(
                    r#"fill="none" {} stroke-width="{}""#,
                    paint_attrs("stroke", pass.color),
                    fmt_num(width)
                ),
            };
            let filter = if pass.blur_sigma > 0.0 {
                format!(r#" filter="url(#{})""#, self.blur_id(pass.blur_sigma))
            } else {
                String::new()
            };
            let spacing = if run.letter_spacing != 0.0 {
                format!(r#" letter-spacing="{}""#, fmt_num(run.letter_spacing))
            } else {
                String::new()
            };
            let _ = writeln!(
                self.body,
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}"{spacing} text-anchor="{anchor}" dominant-baseline="middle" {paint}{filter}>{text}</text>"#,
                fmt_num(x),
                fmt_num(y),
                escape_xml(&run.font_family),
                fmt_num(run.font_size),
                run.weight.0,
            );
        }
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) -> AdResult<()> {
        let _ = writeln!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {} stroke-width="{}"/>"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            paint_attrs("stroke", color),
            fmt_num(width)
        );
        Ok(())
    }
}

fn rect_attrs(r: Rect) -> String {
    format!(
        r#"x="{}" y="{}" width="{}" height="{}""#,
        fmt_num(r.x0),
        fmt_num(r.y0),
        fmt_num(r.width()),
        fmt_num(r.height())
    )
}

fn paint_attrs(kind: &str, c: Color) -> String {
    if c.a == 255 {
        format!(r#"{kind}="{}""#, c.to_hex_rgb())
    } else {
        format!(
            r#"{kind}="{}" {kind}-opacity="{}""#,
            c.to_hex_rgb(),
            fmt_num(c.opacity())
        )
    }
}

fn stop_attrs(c: Color) -> String {
    format!(
        r#"stop-color="{}" stop-opacity="{}""#,
        c.to_hex_rgb(),
        fmt_num(c.opacity())
    )
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
