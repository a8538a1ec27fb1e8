use crate::foundation::core::Rgb8;
use crate::foundation::error::{CalwallError, CalwallResult};

/// Token separating the title family from the body family in [`WallpaperConfig::font_family`].
pub const FONT_PAIR_DELIMITER: &str = "||";

pub const MIN_CALENDAR_SCALE: f64 = 0.5;
pub const MAX_CALENDAR_SCALE: f64 = 1.5;

const MAX_OVERLAY_FONT_SIZE: f64 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderFormat {
    #[default]
    Full,
    Short,
    Numeric,
    NumericFullYear,
    NumericShortYear,
    ShortShortYear,
    ShortFullYear,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Desktop,
    Mobile,
}

/// Horizontal placement component of an [`OverlayPosition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAnchor {
    Left,
    Center,
    Right,
}

/// Vertical placement component of an [`OverlayPosition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAnchor {
    Top,
    Middle,
    Bottom,
}

/// One of the nine overlay anchor zones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPosition {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[serde(alias = "center")]
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl OverlayPosition {
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    pub fn h_anchor(self) -> HAnchor {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => HAnchor::Left,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => HAnchor::Right,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => HAnchor::Center,
        }
    }

    pub fn v_anchor(self) -> VAnchor {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VAnchor::Top,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VAnchor::Bottom,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => VAnchor::Middle,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_unit_f64() -> f64 {
    1.0
}

/// Free-form text drawn in one of nine zones over the wallpaper.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub content: String,
    /// Multiplier over the base overlay size (4% of the surface height).
    #[serde(default = "default_unit_f64")]
    pub font_size: f64,
    #[serde(default)]
    pub font: String,
    /// Draw with the title family instead of `font`.
    #[serde(default = "default_true")]
    pub use_typography_font: bool,
    #[serde(default)]
    pub position: OverlayPosition,
}

impl TextOverlay {
    pub fn is_active(&self) -> bool {
        self.enabled && !self.content.trim().is_empty()
    }
}

/// Title and body font families resolved from [`WallpaperConfig::font_family`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontPair {
    pub title: String,
    pub body: String,
}

impl FontPair {
    pub fn parse(font_family: &str) -> CalwallResult<Self> {
        let (title, body) = match font_family.split_once(FONT_PAIR_DELIMITER) {
            Some((t, b)) => (t.trim(), b.trim()),
            None => (font_family.trim(), font_family.trim()),
        };
        if title.is_empty() || body.is_empty() {
            return Err(CalwallError::invalid_config(format!(
                "fontFamily '{font_family}' must name a non-empty title and body family"
            )));
        }
        Ok(Self {
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    /// Inverse of [`FontPair::parse`]; a single family when both halves match.
    pub fn encode(&self) -> String {
        if self.title == self.body {
            self.title.clone()
        } else {
            format!("{}{FONT_PAIR_DELIMITER}{}", self.title, self.body)
        }
    }
}

/// Everything that determines one wallpaper composition.
///
/// A config is never mutated by the engine; every render recomputes all pixel positions from it
/// and the requested surface size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallpaperConfig {
    /// Zero-based month (0 = January).
    pub month: u8,
    pub year: i32,
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub header_format: HeaderFormat,
    /// `#RRGGBB`.
    pub text_color: String,
    /// Replace `text_color` with the luminance-derived choice when a background is present.
    #[serde(default)]
    pub auto_text_color: bool,
    pub font_family: String,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default = "default_unit_f64")]
    pub calendar_scale: f64,
    #[serde(default)]
    pub text_overlay: Option<TextOverlay>,
}

impl WallpaperConfig {
    /// A centered desktop calendar for `(year, month)` in white text.
    pub fn new(year: i32, month: u8, font_family: impl Into<String>) -> Self {
        Self {
            month,
            year,
            week_start: WeekStart::default(),
            header_format: HeaderFormat::default(),
            text_color: Rgb8::WHITE.to_hex(),
            auto_text_color: false,
            font_family: font_family.into(),
            offset_x: 0.0,
            offset_y: 0.0,
            view_mode: ViewMode::default(),
            calendar_scale: 1.0,
            text_overlay: None,
        }
    }

    pub fn from_json(s: &str) -> CalwallResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| CalwallError::invalid_config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CalwallResult<()> {
        if self.month > 11 {
            return Err(CalwallError::invalid_config(format!(
                "month {} out of range 0..=11",
                self.month
            )));
        }
        if !(1..=9999).contains(&self.year) {
            return Err(CalwallError::invalid_config(format!(
                "year {} out of range 1..=9999",
                self.year
            )));
        }
        Rgb8::parse_hex(&self.text_color)?;
        FontPair::parse(&self.font_family)?;
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(CalwallError::invalid_config("offsetX/offsetY must be finite"));
        }
        if !self.calendar_scale.is_finite()
            || !(MIN_CALENDAR_SCALE..=MAX_CALENDAR_SCALE).contains(&self.calendar_scale)
        {
            return Err(CalwallError::invalid_config(format!(
                "calendarScale {} out of range {MIN_CALENDAR_SCALE}..={MAX_CALENDAR_SCALE}",
                self.calendar_scale
            )));
        }
        if let Some(overlay) = &self.text_overlay {
            if !overlay.font_size.is_finite()
                || overlay.font_size <= 0.0
                || overlay.font_size > MAX_OVERLAY_FONT_SIZE
            {
                return Err(CalwallError::invalid_config(format!(
                    "textOverlay.fontSize {} must be in (0, {MAX_OVERLAY_FONT_SIZE}]",
                    overlay.font_size
                )));
            }
            if overlay.is_active() && !overlay.use_typography_font && overlay.font.trim().is_empty()
            {
                return Err(CalwallError::invalid_config(
                    "textOverlay.font must be set when useTypographyFont is false",
                ));
            }
        }
        Ok(())
    }

    pub fn text_rgb(&self) -> CalwallResult<Rgb8> {
        Rgb8::parse_hex(&self.text_color)
    }

    pub fn fonts(&self) -> CalwallResult<FontPair> {
        FontPair::parse(&self.font_family)
    }

    /// Offsets clamped to `[-1, 1]`.
    pub fn clamped_offsets(&self) -> (f64, f64) {
        (self.offset_x.clamp(-1.0, 1.0), self.offset_y.clamp(-1.0, 1.0))
    }

    /// Overlay, if enabled with non-empty content.
    pub fn active_overlay(&self) -> Option<&TextOverlay> {
        self.text_overlay.as_ref().filter(|o| o.is_active())
    }

    /// Every font family this config draws with (deduplicated, title first).
    pub fn required_families(&self) -> CalwallResult<Vec<String>> {
        let pair = self.fonts()?;
        let mut out = vec![pair.title.clone()];
        if pair.body != pair.title {
            out.push(pair.body);
        }
        if let Some(overlay) = self.active_overlay()
            && !overlay.use_typography_font
        {
            let family = overlay.font.trim().to_string();
            if !out.contains(&family) {
                out.push(family);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
