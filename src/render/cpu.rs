//! Offline rasterizer surface on `vello_cpu`.
//!
//! Rects and gradients are filled directly into the frame. Images and glyphs go through a
//! `vello_cpu` context rendered into a scratch pixmap, then composited over the frame.
//! Consecutive text draws that share a shadow are rasterized as one batch; on flush the batch
//! alpha is blurred into its drop shadow, which lands under the batch.

use crate::assets::decode::BackgroundImage;
use crate::foundation::core::{Point, Rect, Rgba, SurfaceSize, Vec2};
use crate::foundation::error::{CalwallError, CalwallResult};
use crate::render::blur::{blur_mask, radius_for_sigma};
use crate::render::composite::{PixelRect, over_region_in_place, over_with_in_place};
use crate::render::surface::{DrawSurface, Frame, Paint, Shadow, TextAlign, TextBaseline, TextStyle};
use crate::text::engine::TextEngine;
use crate::text::fonts::FontRegistry;
use crate::text::measure::{FontSpec, TextMeasure};
use std::sync::Arc;

/// Glyph ink can overhang the advance box by a little.
const GLYPH_OVERHANG_PX: f64 = 2.0;
const IMAGE_CACHE_SLOTS: usize = 2;

struct TextBatch {
    shadow: Option<Shadow>,
    bounds: Rect,
}

pub struct CpuSurface {
    size: SurfaceSize,
    frame: Vec<u8>,
    ctx: vello_cpu::RenderContext,
    scratch: vello_cpu::Pixmap,
    text: TextEngine,
    batch: Option<TextBatch>,
    images: Vec<(BackgroundImage, vello_cpu::Image)>,
}

impl CpuSurface {
    /// A transparent surface of `size`.
    pub fn new(size: SurfaceSize, fonts: FontRegistry) -> CalwallResult<Self> {
        let (w, h) = dims_u16(size)?;
        Ok(Self {
            size,
            frame: vec![0u8; size.pixel_count() * 4],
            ctx: vello_cpu::RenderContext::new(w, h),
            scratch: vello_cpu::Pixmap::new(w, h),
            text: TextEngine::new(fonts),
            batch: None,
            images: Vec::new(),
        })
    }

    /// Flush pending draws and hand over the premultiplied frame.
    pub fn finish(mut self) -> CalwallResult<Frame> {
        self.flush_text()?;
        Frame::new(self.size, self.frame)
    }

    fn render_scratch(&mut self) {
        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        self.ctx.reset();
    }

    fn image_paint(&mut self, image: &BackgroundImage) -> CalwallResult<vello_cpu::Image> {
        if let Some((_, paint)) = self.images.iter().find(|(i, _)| i.same_pixels(image)) {
            return Ok(paint.clone());
        }
        let pixmap = pixmap_from_premul_bytes(&image.to_premul(), image.width(), image.height())?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        if self.images.len() >= IMAGE_CACHE_SLOTS {
            self.images.remove(0);
        }
        self.images.push((image.clone(), paint.clone()));
        Ok(paint)
    }

    fn flush_text(&mut self) -> CalwallResult<()> {
        let Some(batch) = self.batch.take() else {
            return Ok(());
        };
        self.render_scratch();
        if let Some(shadow) = batch.shadow {
            self.composite_shadow(batch.bounds, &shadow)?;
        }
        let region = PixelRect::covering(batch.bounds, self.size);
        over_region_in_place(
            &mut self.frame,
            self.scratch.data_as_u8_slice(),
            self.size,
            region,
            1.0,
        )
    }

    /// Blur the scratch alpha inside `bounds` and composite it, tinted and offset, onto the frame.
    fn composite_shadow(&mut self, bounds: Rect, shadow: &Shadow) -> CalwallResult<()> {
        let sigma = (shadow.blur / 2.0) as f32;
        let pad = f64::from(radius_for_sigma(sigma)) + 1.0;
        let src = PixelRect::covering(bounds.inflate(pad, pad), self.size);
        if src.is_empty() || shadow.color.a <= 0.0 {
            return Ok(());
        }

        let (mw, mh) = (src.width(), src.height());
        let stride = self.size.width as usize * 4;
        let pixels = self.scratch.data_as_u8_slice();
        let mut mask = Vec::with_capacity(mw as usize * mh as usize);
        for y in src.y0..src.y1 {
            let row = y as usize * stride;
            for x in src.x0..src.x1 {
                mask.push(pixels[row + x as usize * 4 + 3]);
            }
        }
        let mask = blur_mask(&mask, mw, mh, sigma)?;

        let dx = shadow.offset.x.round() as i64;
        let dy = shadow.offset.y.round() as i64;
        let dst = PixelRect::covering(
            Rect::new(
                f64::from(src.x0),
                f64::from(src.y0),
                f64::from(src.x1),
                f64::from(src.y1),
            ) + Vec2::new(dx as f64, dy as f64),
            self.size,
        );
        let base = shadow.color;
        over_with_in_place(&mut self.frame, self.size, dst, |x, y| {
            let mx = i64::from(x) - dx - i64::from(src.x0);
            let my = i64::from(y) - dy - i64::from(src.y0);
            if mx < 0 || my < 0 || mx >= i64::from(mw) || my >= i64::from(mh) {
                return [0; 4];
            }
            let coverage = f32::from(mask[my as usize * mw as usize + mx as usize]) / 255.0;
            Rgba {
                a: base.a * coverage,
                ..base
            }
            .to_premul()
            .to_array()
        })
    }
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64> {
        self.text.measure(text, font)
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> CalwallResult<()> {
        self.flush_text()?;
        let region = PixelRect::from_rect(rect, self.size);
        match paint {
            Paint::Solid(c) => {
                let px = c.to_premul().to_array();
                over_with_in_place(&mut self.frame, self.size, region, |_, _| px)
            }
            gradient => over_with_in_place(&mut self.frame, self.size, region, |x, y| {
                gradient
                    .color_at(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5))
                    .to_premul()
                    .to_array()
            }),
        }
    }

    fn draw_image(
        &mut self,
        image: &BackgroundImage,
        dest: Rect,
        opacity: f32,
    ) -> CalwallResult<()> {
        self.flush_text()?;
        let region = PixelRect::covering(dest, self.size);
        if region.is_empty() || opacity <= 0.0 {
            return Ok(());
        }
        let paint = self.image_paint(image)?;
        let (iw, ih) = (f64::from(image.width()), f64::from(image.height()));

        self.ctx.reset();
        self.ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
                * vello_cpu::kurbo::Affine::scale_non_uniform(
                    dest.width() / iw,
                    dest.height() / ih,
                ),
        );
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        self.render_scratch();

        over_region_in_place(
            &mut self.frame,
            self.scratch.data_as_u8_slice(),
            self.size,
            region,
            opacity,
        )
    }

    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> CalwallResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let shaped = self.text.shape(text, &style.font)?;

        let x = match style.align {
            TextAlign::Left => origin.x,
            TextAlign::Center => origin.x - shaped.width / 2.0,
            TextAlign::Right => origin.x - shaped.width,
        };
        let baseline = match style.baseline {
            TextBaseline::Alphabetic => origin.y,
            TextBaseline::Top => origin.y + shaped.ascent,
        };

        if self
            .batch
            .as_ref()
            .is_some_and(|b| b.shadow != style.shadow)
        {
            self.flush_text()?;
        }
        if self.batch.is_none() {
            self.ctx.reset();
        }

        let alpha = (style.color.a * style.opacity.clamp(0.0, 1.0)).clamp(0.0, 1.0);
        let color = Rgba {
            a: alpha,
            ..style.color
        };
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, baseline)));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r,
            color.g,
            color.b,
            color.alpha_u8(),
        ));
        self.ctx
            .glyph_run(&shaped.font)
            .font_size(shaped.size_px)
            .fill_glyphs(shaped.glyphs.into_iter());

        let ink = Rect::new(
            x,
            baseline - shaped.ascent,
            x + shaped.width,
            baseline + shaped.descent,
        )
        .inflate(GLYPH_OVERHANG_PX + style.font.size_px * 0.1, GLYPH_OVERHANG_PX);
        match &mut self.batch {
            Some(batch) => batch.bounds = batch.bounds.union(ink),
            None => {
                self.batch = Some(TextBatch {
                    shadow: style.shadow,
                    bounds: ink,
                })
            }
        }
        Ok(())
    }

    fn snapshot(&mut self) -> CalwallResult<Option<Frame>> {
        self.flush_text()?;
        Frame::new(self.size, self.frame.clone()).map(Some)
    }
}

fn dims_u16(size: SurfaceSize) -> CalwallResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| CalwallError::render("surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| CalwallError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> CalwallResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(SurfaceSize { width, height })?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(CalwallError::render("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(bytes.len() / 4);
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
