use std::collections::HashMap;
use std::sync::Arc;

use vello_cpu::kurbo as ck;

use crate::assets::decode::DecodedImage;
use crate::assets::loader::AssetSet;
use crate::compile::plan::{ImageRole, Paint, TextRun};
use crate::effects::blur::{EdgeMode, blur_radius, blur_rgba8_premul};
use crate::effects::filter::{FilterChain, duotone_rgba8_premul_in_place};
use crate::effects::text::PassMode;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{AdError, AdResult};
use crate::render::backend::PaintBackend;
use crate::render::surface::RasterSurface;
use crate::render::text::{ShapedLine, TextLayoutEngine};
use crate::style::model::FrameEffect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    from: [u8; 4],
    to: [u8; 4],
    w: u32,
    h: u32,
}

/// CPU raster backend powered by `vello_cpu`, with text shaped by `parley`.
///
/// Holds only `Arc` handles into the caller's [`AssetSet`]; dropping the backend releases them.
pub struct RasterBackend {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    base: Arc<DecodedImage>,
    logo: Option<Arc<DecodedImage>>,
    text: Option<TextLayoutEngine>,
    warned_missing_font: bool,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

impl RasterBackend {
    /// Allocate a transparent `width × height` surface.
    pub fn new(width: u32, height: u32, assets: &AssetSet) -> AdResult<Self> {
        let (w, h) = surface_dims(width, height)?;
        let text = match &assets.font {
            Some(font) => Some(TextLayoutEngine::new(font)?),
            None => None,
        };
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            base: Arc::clone(&assets.base),
            logo: assets.logo.clone(),
            text,
            warned_missing_font: false,
            gradient_cache: HashMap::new(),
        })
    }

    /// Rasterize everything drawn so far into a [`RasterSurface`].
    pub fn finish(mut self, frame_effect: FrameEffect) -> AdResult<RasterSurface> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        RasterSurface::from_premul(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
            frame_effect,
        )
    }

    fn image_for(&self, role: ImageRole) -> AdResult<&DecodedImage> {
        match role {
            ImageRole::Base => Ok(&self.base),
            ImageRole::Logo => self
                .logo
                .as_deref()
                .ok_or_else(|| AdError::surface("plan draws a logo but none was loaded")),
        }
    }

    fn paint_image(&mut self, image: vello_cpu::Image, at: Point, w: f64, h: f64) {
        self.ctx.set_transform(ck::Affine::translate((at.x, at.y)));
        self.ctx.set_paint(image);
        self.ctx.fill_rect(&ck::Rect::new(0.0, 0.0, w, h));
    }

    fn gradient_paint(
        &mut self,
        from: Color,
        to: Color,
        w: u32,
        h: u32,
    ) -> AdResult<vello_cpu::Image> {
        let key = GradientKey {
            from: [from.r, from.g, from.b, from.a],
            to: [to.r, to.g, to.b, to.a],
            w,
            h,
        };
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }
        let (fw, fh) = (f64::from(w), f64::from(h));
        let len2 = (fw * fw + fh * fh).max(f64::EPSILON);
        let mut bytes = vec![0u8; (w as usize) * (h as usize) * 4];
        for y in 0..h {
            for x in 0..w {
                let t = ((f64::from(x) + 0.5) * fw + (f64::from(y) + 0.5) * fh) / len2;
                let c = from.lerp(to, t).to_premul();
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }

    fn paint_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        line: &ShapedLine,
        at: Point,
        color: Color,
        mode: PassMode,
    ) {
        let ctx = &mut self.ctx;
        ctx.set_transform(ck::Affine::translate((at.x, at.y)));
        ctx.set_paint(peniko_color(color));
        let glyphs = line.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        match mode {
            PassMode::Fill => {
                ctx.glyph_run(font)
                    .font_size(line.font_size)
                    .fill_glyphs(glyphs);
            }
            PassMode::Stroke { width } => {
                ctx.set_stroke(ck::Stroke::new(width));
                ctx.glyph_run(font)
                    .font_size(line.font_size)
                    .stroke_glyphs(glyphs);
            }
        }
    }
}

impl PaintBackend for RasterBackend {
    #[tracing::instrument(level = "debug", skip(self, filter))]
    fn draw_image(&mut self, role: ImageRole, dest: Rect, filter: &FilterChain) -> AdResult<()> {
        let img = self.image_for(role)?;
        let (iw, ih) = (img.size.w(), img.size.h());
        let source = rgba_premul_to_image(&img.rgba8_premul, img.size.width, img.size.height)?;
        let sx = dest.width() / iw;
        let sy = dest.height() / ih;

        if filter.is_identity() {
            self.ctx.set_transform(
                ck::Affine::translate((dest.x0, dest.y0)) * ck::Affine::scale_non_uniform(sx, sy),
            );
            self.ctx.set_paint(source);
            self.ctx.fill_rect(&ck::Rect::new(0.0, 0.0, iw, ih));
            return Ok(());
        }

        // Filters run at destination resolution so blur radii are in surface px.
        let (ow, oh) = surface_dims(
            dest.width().ceil().max(1.0) as u32,
            dest.height().ceil().max(1.0) as u32,
        )?;
        let mut bytes = render_offscreen(ow, oh, |ctx| {
            ctx.set_transform(ck::Affine::scale_non_uniform(sx, sy));
            ctx.set_paint(source);
            ctx.fill_rect(&ck::Rect::new(0.0, 0.0, iw, ih));
        });
        filter.apply_steps(&mut bytes, u32::from(ow), u32::from(oh))?;
        if let Some(duo) = filter.duotone {
            duotone_rgba8_premul_in_place(&mut bytes, duo);
        }
        let filtered = rgba_premul_to_image(&bytes, u32::from(ow), u32::from(oh))?;
        self.paint_image(filtered, Point::new(dest.x0, dest.y0), dest.width(), dest.height());
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> AdResult<()> {
        match *paint {
            Paint::Solid(c) => {
                self.ctx.set_transform(ck::Affine::IDENTITY);
                self.ctx.set_paint(peniko_color(c));
                self.ctx.fill_rect(&to_ck_rect(rect));
            }
            Paint::LinearGradient {
                start,
                end,
                from,
                to,
            } => {
                let gw = (end.x - start.x).abs().ceil().max(1.0) as u32;
                let gh = (end.y - start.y).abs().ceil().max(1.0) as u32;
                let img = self.gradient_paint(from, to, gw, gh)?;
                self.ctx
                    .set_transform(ck::Affine::translate((start.x, start.y)));
                self.ctx.set_paint(img);
                let local = rect - start.to_vec2();
                self.ctx.fill_rect(&to_ck_rect(local));
            }
        }
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) -> AdResult<()> {
        if width <= 0.0 {
            return Ok(());
        }
        self.ctx.set_transform(ck::Affine::IDENTITY);
        self.ctx.set_stroke(ck::Stroke::new(width));
        self.ctx.set_paint(peniko_color(color));
        self.ctx.stroke_rect(&to_ck_rect(rect));
        Ok(())
    }

    fn draw_text(&mut self, run: &TextRun) -> AdResult<()> {
        let Some(engine) = self.text.as_mut() else {
            if !self.warned_missing_font {
                tracing::warn!("no font supplied; raster text is skipped");
                self.warned_missing_font = true;
            }
            return Ok(());
        };
        let line = engine.shape(
            &run.text,
            run.font_size as f32,
            run.weight,
            run.letter_spacing as f32,
        )?;
        let font = engine.font().clone();
        let origin = line.origin(run.anchor.x, run.anchor.y, run.align);

        for pass in &run.passes {
            let at = Point::new(origin.0 + pass.offset.x, origin.1 + pass.offset.y);
            if pass.blur_sigma <= 0.0 {
                self.paint_glyphs(&font, &line, at, pass.color, pass.mode);
                continue;
            }

            // Blurred passes are painted offscreen, blurred, then drawn back as an image.
            let pad = f64::from(blur_radius(pass.blur_sigma)) + f64::from(line.font_size);
            let bounds = line.bounds((at.x, at.y)).inflate(pad, pad);
            let x0 = bounds.x0.floor();
            let y0 = bounds.y0.floor();
            let (ow, oh) = surface_dims(
                (bounds.x1.ceil() - x0).max(1.0) as u32,
                (bounds.y1.ceil() - y0).max(1.0) as u32,
            )?;
            let local = Point::new(at.x - x0, at.y - y0);
            let glyphs: Vec<vello_cpu::Glyph> = line
                .glyphs
                .iter()
                .map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
                .collect();
            let bytes = render_offscreen(ow, oh, |ctx| {
                ctx.set_transform(ck::Affine::translate((local.x, local.y)));
                ctx.set_paint(peniko_color(pass.color));
                ctx.glyph_run(&font)
                    .font_size(line.font_size)
                    .fill_glyphs(glyphs.into_iter());
            });
            let blurred = blur_rgba8_premul(
                &bytes,
                u32::from(ow),
                u32::from(oh),
                pass.blur_sigma,
                EdgeMode::Transparent,
            )?;
            let img = rgba_premul_to_image(&blurred, u32::from(ow), u32::from(oh))?;
            self.paint_image(img, Point::new(x0, y0), f64::from(ow), f64::from(oh));
        }
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) -> AdResult<()> {
        let mut path = ck::BezPath::new();
        path.move_to(ck::Point::new(from.x, from.y));
        path.line_to(ck::Point::new(to.x, to.y));
        self.ctx.set_transform(ck::Affine::IDENTITY);
        self.ctx.set_stroke(ck::Stroke::new(width));
        self.ctx.set_paint(peniko_color(color));
        self.ctx.stroke_path(&path);
        Ok(())
    }
}

fn surface_dims(width: u32, height: u32) -> AdResult<(u16, u16)> {
    let w = u16::try_from(width);
    let h = u16::try_from(height);
    match (w, h) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(AdError::surface(format!(
            "cannot allocate a {width}x{height} surface (each side must be 1..=65535 px)"
        ))),
    }
}

fn render_offscreen(
    w: u16,
    h: u16,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) -> Vec<u8> {
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    draw(&mut ctx);
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    pixmap.data_as_u8_slice().to_vec()
}

fn peniko_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn to_ck_rect(r: Rect) -> ck::Rect {
    ck::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> AdResult<vello_cpu::Pixmap> {
    let (w, h) = surface_dims(width, height)?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(AdError::surface("pixmap byte length mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> AdResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
