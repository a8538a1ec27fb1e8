use std::time::Duration;

use crate::analysis::luminance::DEFAULT_LUMINANCE_THRESHOLD;
use crate::config::model::ViewMode;
use crate::foundation::core::{Rgb8, SurfaceSize};
use crate::foundation::error::{CalwallError, CalwallResult};

/// Engine options that are not part of a wallpaper's identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    /// Bounded wait for font families before falling back.
    pub font_wait: Duration,
    /// Flat fill used when no background image is supplied.
    pub fill_rgb: Rgb8,
    /// Average luminance below this selects light text.
    pub luminance_threshold: f64,
    /// Duration of the preview cross-fade between backgrounds.
    pub crossfade: Duration,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            font_wait: Duration::from_millis(3000),
            fill_rgb: Rgb8::BLACK,
            luminance_threshold: DEFAULT_LUMINANCE_THRESHOLD,
            crossfade: Duration::from_millis(400),
        }
    }
}

impl RenderOpts {
    /// Defaults overridden by `CALWALL_FONT_WAIT_MS`, `CALWALL_LUMINANCE_THRESHOLD` and
    /// `CALWALL_CROSSFADE_MS`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(ms) = env_parse::<u64>("CALWALL_FONT_WAIT_MS") {
            opts.font_wait = Duration::from_millis(ms);
        }
        if let Some(t) = env_parse::<f64>("CALWALL_LUMINANCE_THRESHOLD")
            .filter(|t| t.is_finite() && (0.0..=1.0).contains(t))
        {
            opts.luminance_threshold = t;
        }
        if let Some(ms) = env_parse::<u64>("CALWALL_CROSSFADE_MS") {
            opts.crossfade = Duration::from_millis(ms);
        }
        opts
    }

    pub fn validate(&self) -> CalwallResult<()> {
        if !self.luminance_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.luminance_threshold)
        {
            return Err(CalwallError::invalid_config(
                "luminance threshold must be within 0..=1",
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

/// The export sizes offered to callers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
pub enum ExportPreset {
    #[serde(rename = "desktop-hd")]
    #[value(name = "desktop-hd")]
    DesktopHd,
    #[serde(rename = "desktop-fhd")]
    #[value(name = "desktop-fhd")]
    DesktopFhd,
    #[serde(rename = "desktop-4k")]
    #[value(name = "desktop-4k")]
    Desktop4k,
    #[serde(rename = "mobile-hd")]
    #[value(name = "mobile-hd")]
    MobileHd,
    #[serde(rename = "mobile-fhd")]
    #[value(name = "mobile-fhd")]
    MobileFhd,
    #[serde(rename = "mobile-qhd")]
    #[value(name = "mobile-qhd")]
    MobileQhd,
}

impl ExportPreset {
    pub fn all() -> [Self; 6] {
        [
            Self::DesktopHd,
            Self::DesktopFhd,
            Self::Desktop4k,
            Self::MobileHd,
            Self::MobileFhd,
            Self::MobileQhd,
        ]
    }

    pub fn for_view(view: ViewMode) -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|p| p.view_mode() == view)
            .collect()
    }

    pub fn size(self) -> SurfaceSize {
        let (width, height) = match self {
            Self::DesktopHd => (1280, 720),
            Self::DesktopFhd => (1920, 1080),
            Self::Desktop4k => (3840, 2160),
            Self::MobileHd => (720, 1280),
            Self::MobileFhd => (1080, 1920),
            Self::MobileQhd => (1440, 2560),
        };
        SurfaceSize { width, height }
    }

    pub fn view_mode(self) -> ViewMode {
        match self {
            Self::DesktopHd | Self::DesktopFhd | Self::Desktop4k => ViewMode::Desktop,
            Self::MobileHd | Self::MobileFhd | Self::MobileQhd => ViewMode::Mobile,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::DesktopHd => "desktop-hd",
            Self::DesktopFhd => "desktop-fhd",
            Self::Desktop4k => "desktop-4k",
            Self::MobileHd => "mobile-hd",
            Self::MobileFhd => "mobile-fhd",
            Self::MobileQhd => "mobile-qhd",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/opts.rs"]
mod tests;
