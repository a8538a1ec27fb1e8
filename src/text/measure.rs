use crate::foundation::error::{CalwallError, CalwallResult};

/// Numeric font weight (CSS scale, 100..=900).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMI_BOLD: Self = Self(600);
}

/// Family, size and weight of a single text draw or measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size_px: f64, weight: FontWeight) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight,
        }
    }

    pub fn with_size(&self, size_px: f64) -> Self {
        Self {
            size_px,
            ..self.clone()
        }
    }

    pub(crate) fn checked_size_f32(&self) -> CalwallResult<f32> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(CalwallError::render(format!(
                "font size {} must be finite and > 0",
                self.size_px
            )));
        }
        Ok(self.size_px as f32)
    }
}

/// Advance-width measurement of a text run.
pub trait TextMeasure {
    /// Width in pixels of `text` set in `font`, without any extra tracking.
    fn measure(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64>;
}

/// Font-free measurement where every char advances `advance_em * size`.
///
/// Used by display-list hosts that measure on their own side and by deterministic tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub advance_em: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64> {
        font.checked_size_f32()?;
        Ok(text.chars().count() as f64 * self.advance_em * font.size_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
