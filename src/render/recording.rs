use crate::assets::decode::BackgroundImage;
use crate::foundation::core::{Point, Rect, SurfaceSize};
use crate::foundation::error::CalwallResult;
use crate::render::surface::{DrawSurface, Frame, Paint, TextStyle};
use crate::text::measure::{FontSpec, MonospaceMeasure, TextMeasure};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    DrawImage {
        /// Pixel size of the source bitmap.
        source: SurfaceSize,
        dest: Rect,
        opacity: f32,
    },
    FillText {
        text: String,
        origin: Point,
        style: TextStyle,
    },
}

/// Display-list surface for interactive hosts that rasterize on their own side.
///
/// Text is measured through the supplied [`TextMeasure`], which should agree with the host's
/// own measurement.
pub struct RecordingSurface<M = MonospaceMeasure> {
    size: SurfaceSize,
    measure: M,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface<MonospaceMeasure> {
    pub fn new(size: SurfaceSize) -> Self {
        Self::with_measure(size, MonospaceMeasure::default())
    }
}

impl<M: TextMeasure> RecordingSurface<M> {
    pub fn with_measure(size: SurfaceSize, measure: M) -> Self {
        Self {
            size,
            measure,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Texts drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, &TextStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText {
                text,
                origin,
                style,
            } => Some((text.as_str(), *origin, style)),
            _ => None,
        })
    }
}

impl<M: TextMeasure> DrawSurface for RecordingSurface<M> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64> {
        self.measure.measure(text, font)
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> CalwallResult<()> {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &BackgroundImage,
        dest: Rect,
        opacity: f32,
    ) -> CalwallResult<()> {
        self.commands.push(DrawCommand::DrawImage {
            source: image.size(),
            dest,
            opacity,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> CalwallResult<()> {
        style.font.checked_size_f32()?;
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
        Ok(())
    }

    fn snapshot(&mut self) -> CalwallResult<Option<Frame>> {
        Ok(None)
    }
}
