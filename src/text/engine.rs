use std::collections::HashMap;

use crate::foundation::error::{CalwallError, CalwallResult};
use crate::text::fonts::FontRegistry;
use crate::text::measure::{FontSpec, TextMeasure};

/// One registry family, isolated in its own font collection so that faces sharing an internal
/// family name never shadow each other.
struct LoadedFace {
    /// Family name as fontique knows it.
    stack_name: String,
    font_ctx: parley::FontContext,
    data: vello_cpu::peniko::FontData,
}

/// A single shaped line with glyph positions relative to its left edge and baseline.
#[derive(Clone)]
pub struct ShapedLine {
    pub font: vello_cpu::peniko::FontData,
    pub size_px: f32,
    pub glyphs: Vec<vello_cpu::Glyph>,
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

/// Parley-backed shaping over the faces of a [`FontRegistry`].
///
/// Each surface owns its engine; the registry itself is shared.
pub struct TextEngine {
    fonts: FontRegistry,
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<String, LoadedFace>,
}

impl TextEngine {
    pub fn new(fonts: FontRegistry) -> Self {
        Self {
            fonts,
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    fn load_face(fonts: &FontRegistry, family: &str) -> CalwallResult<LoadedFace> {
        let (resolved, bytes) = fonts.resolve(family)?;
        if resolved != family {
            tracing::warn!(
                requested = family,
                fallback = %resolved,
                "font not registered, using fallback"
            );
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CalwallError::render(format!("font data for '{resolved}' contains no font family"))
        })?;
        let stack_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CalwallError::render(format!("font '{resolved}' has no family name")))?
            .to_string();

        Ok(LoadedFace {
            stack_name,
            font_ctx,
            data: vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(bytes.to_vec()),
                0,
            ),
        })
    }

    fn layout(
        &mut self,
        text: &str,
        font: &FontSpec,
    ) -> CalwallResult<(parley::Layout<()>, vello_cpu::peniko::FontData)> {
        let size_px = font.checked_size_f32()?;
        if !self.faces.contains_key(&font.family) {
            let face = Self::load_face(&self.fonts, &font.family)?;
            self.faces.insert(font.family.clone(), face);
        }
        let Self { faces, layout_ctx, .. } = self;
        let face = faces
            .get_mut(&font.family)
            .ok_or_else(|| CalwallError::render(format!("font '{}' not loaded", font.family)))?;

        let stack_name = face.stack_name.clone();
        let mut builder = layout_ctx.ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(stack_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::FontWeight::new(f32::from(font.weight.0)),
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok((layout, face.data.clone()))
    }

    /// Shape `text` as one line. Glyph `y` is relative to the first baseline.
    pub fn shape(&mut self, text: &str, font: &FontSpec) -> CalwallResult<ShapedLine> {
        let (layout, data) = self.layout(text, font)?;
        let size_px = font.checked_size_f32()?;

        let mut glyphs = Vec::with_capacity(text.len());
        let mut first_baseline = None;
        let mut ascent = f64::from(size_px) * 0.8;
        let mut descent = f64::from(size_px) * 0.2;
        for line in layout.lines() {
            let metrics = line.metrics();
            let base = *first_baseline.get_or_insert_with(|| {
                ascent = f64::from(metrics.ascent);
                descent = f64::from(metrics.descent);
                metrics.baseline
            });
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let mut x = run.offset();
                let y = run.baseline() - base;
                for g in run.glyphs() {
                    glyphs.push(vello_cpu::Glyph {
                        id: g.id,
                        x: x + g.x,
                        y: y - g.y,
                    });
                    x += g.advance;
                }
            }
        }

        Ok(ShapedLine {
            font: data,
            size_px,
            glyphs,
            width: f64::from(layout.full_width()),
            ascent,
            descent,
        })
    }
}

impl TextMeasure for TextEngine {
    fn measure(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64> {
        if text.is_empty() {
            font.checked_size_f32()?;
            return Ok(0.0);
        }
        let (layout, _) = self.layout(text, font)?;
        Ok(f64::from(layout.full_width()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
