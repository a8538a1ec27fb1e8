//! Resolution-independent placement of the calendar block and overlay safe-area.
//!
//! Vertical quantities are fractions of the surface height and the grid width is a fraction of
//! the surface width, so the same config lands in the same relative place at any output size.

use crate::config::model::ViewMode;
use crate::foundation::core::{Point, Rect, SurfaceSize, Vec2};

/// Per-view-mode proportions. Every `*_frac` value is multiplied by the calendar scale except
/// `title_y_frac`, which anchors the block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewProfile {
    /// Grid width as a fraction of the surface width.
    pub grid_width_frac: f64,
    /// Title baseline as a fraction of the surface height.
    pub title_y_frac: f64,
    pub title_size_frac: f64,
    /// Distance from the title baseline to the weekday-label baseline.
    pub weekday_gap_frac: f64,
    pub label_size_frac: f64,
    /// Distance from the weekday-label baseline to the first date row baseline.
    pub grid_gap_frac: f64,
    pub row_height_frac: f64,
    pub date_size_frac: f64,
}

pub const DESKTOP_PROFILE: ViewProfile = ViewProfile {
    grid_width_frac: 0.25,
    title_y_frac: 0.34,
    title_size_frac: 0.06,
    weekday_gap_frac: 0.075,
    label_size_frac: 0.016,
    grid_gap_frac: 0.05,
    row_height_frac: 0.045,
    date_size_frac: 0.02,
};

pub const MOBILE_PROFILE: ViewProfile = ViewProfile {
    grid_width_frac: 0.35,
    title_y_frac: 0.40,
    title_size_frac: 0.045,
    weekday_gap_frac: 0.055,
    label_size_frac: 0.013,
    grid_gap_frac: 0.04,
    row_height_frac: 0.036,
    date_size_frac: 0.016,
};

impl ViewProfile {
    pub fn for_mode(mode: ViewMode) -> &'static Self {
        match mode {
            ViewMode::Desktop => &DESKTOP_PROFILE,
            ViewMode::Mobile => &MOBILE_PROFILE,
        }
    }
}

/// Fraction of the height the block travels at `offsetY = ±1`.
pub const VERTICAL_TRAVEL_FRAC: f64 = 0.3;
/// Upward nudge per unit of scale above 1.
pub const SCALE_LIFT: f64 = -0.5;
/// Overlay safe-area margin on every side.
pub const SAFE_AREA_MARGIN_FRAC: f64 = 0.05;
/// Overlay base font size before the overlay multiplier and calendar scale.
pub const OVERLAY_SIZE_FRAC: f64 = 0.04;
/// Title may shrink to this fraction of its nominal size and no further.
pub const TITLE_MIN_SIZE_RATIO: f64 = 0.5;

/// Inputs of the planner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutInput {
    pub size: SurfaceSize,
    pub view_mode: ViewMode,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Absolute pixel geometry of one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub size: SurfaceSize,
    pub scale: f64,
    /// Pixel displacement applied to the whole calendar block.
    pub shift: Vec2,
    /// Horizontal center and alphabetic baseline of the month title.
    pub title_anchor: Point,
    pub title_size: f64,
    pub title_min_size: f64,
    /// Width the title must fit (the grid width).
    pub title_max_width: f64,
    pub weekday_baseline_y: f64,
    pub label_size: f64,
    /// Baseline of the first date row.
    pub grid_top_y: f64,
    pub row_height: f64,
    pub date_size: f64,
    pub grid_left_x: f64,
    pub grid_width: f64,
    pub column_width: f64,
    pub overlay_safe_area: Rect,
    pub overlay_base_size: f64,
}

impl Layout {
    pub fn column_center_x(&self, col: u8) -> f64 {
        self.grid_left_x + self.column_width * (f64::from(col) + 0.5)
    }

    pub fn row_baseline_y(&self, row: u8) -> f64 {
        self.grid_top_y + self.row_height * f64::from(row)
    }
}

/// Effective vertical offset: clamped input plus the scale compensation, clamped again.
pub fn effective_offset_y(offset_y: f64, scale: f64) -> f64 {
    (offset_y.clamp(-1.0, 1.0) + (scale - 1.0) * SCALE_LIFT).clamp(-1.0, 1.0)
}

/// Compute every layout rectangle for one render. Pure; nothing is cached between calls.
pub fn plan_layout(input: &LayoutInput) -> Layout {
    let profile = ViewProfile::for_mode(input.view_mode);
    let w = input.size.width_f64();
    let h = input.size.height_f64();
    let scale = input.scale;

    let offset_x = input.offset_x.clamp(-1.0, 1.0);
    let offset_y = effective_offset_y(input.offset_y, scale);

    let grid_width = profile.grid_width_frac * w * scale;
    let start_x = (w - grid_width) / 2.0;
    let shift = Vec2::new(offset_x * start_x, offset_y * VERTICAL_TRAVEL_FRAC * h);

    let title_y = profile.title_y_frac * h + shift.y;
    let title_size = profile.title_size_frac * h * scale;
    let weekday_baseline_y = title_y + profile.weekday_gap_frac * h * scale;
    let grid_top_y = weekday_baseline_y + profile.grid_gap_frac * h * scale;

    let margin_x = SAFE_AREA_MARGIN_FRAC * w;
    let margin_y = SAFE_AREA_MARGIN_FRAC * h;

    Layout {
        size: input.size,
        scale,
        shift,
        title_anchor: Point::new(w / 2.0 + shift.x, title_y),
        title_size,
        title_min_size: title_size * TITLE_MIN_SIZE_RATIO,
        title_max_width: grid_width,
        weekday_baseline_y,
        label_size: profile.label_size_frac * h * scale,
        grid_top_y,
        row_height: profile.row_height_frac * h * scale,
        date_size: profile.date_size_frac * h * scale,
        grid_left_x: start_x + shift.x,
        grid_width,
        column_width: grid_width / 7.0,
        overlay_safe_area: Rect::new(margin_x, margin_y, w - margin_x, h - margin_y),
        overlay_base_size: OVERLAY_SIZE_FRAC * h * scale,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
