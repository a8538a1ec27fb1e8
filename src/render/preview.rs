//! Interactive preview driver.
//!
//! A host feeds config changes, background loads and display-refresh ticks into a
//! [`PreviewSession`] and calls [`PreviewSession::render`] whenever
//! [`PreviewSession::needs_redraw`] says so. Nothing here blocks: decoding and font loading
//! happen outside, and only the newest background load may commit.

use std::time::Duration;

use crate::analysis::luminance::{ContrastReading, analyze_contrast};
use crate::assets::decode::BackgroundImage;
use crate::config::model::WallpaperConfig;
use crate::config::opts::RenderOpts;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::CalwallResult;
use crate::render::background::{BackgroundLayer, draw_background};
use crate::render::compose::{Composed, Scene, TextColorChoice, compose};
use crate::render::surface::DrawSurface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewState {
    Idle,
    BackgroundLoading,
    Analyzing,
    Compositing,
    Done,
}

/// Proof of which background load a completion belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AnalysisKey {
    image: usize,
    size: SurfaceSize,
}

#[derive(Clone, Debug)]
struct Crossfade {
    from: BackgroundImage,
    elapsed: Duration,
}

/// Result of one [`PreviewSession::render`].
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewFrame {
    pub composed: Composed,
    /// Reading behind an automatic text color, fresh or cached.
    pub contrast: Option<ContrastReading>,
    /// Whether this pass ran the analysis step.
    pub analyzed: bool,
}

#[derive(Debug)]
pub struct PreviewSession {
    opts: RenderOpts,
    state: PreviewState,
    generation: u64,
    pending: Option<u64>,
    config: Option<WallpaperConfig>,
    background: Option<BackgroundImage>,
    fade: Option<Crossfade>,
    analysis: Option<(AnalysisKey, Option<ContrastReading>)>,
}

impl PreviewSession {
    pub fn new(opts: RenderOpts) -> Self {
        Self {
            opts,
            state: PreviewState::Idle,
            generation: 0,
            pending: None,
            config: None,
            background: None,
            fade: None,
            analysis: None,
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    pub fn config(&self) -> Option<&WallpaperConfig> {
        self.config.as_ref()
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// Replace the config. The background and its analysis are kept.
    pub fn set_config(&mut self, config: WallpaperConfig) -> CalwallResult<()> {
        config.validate()?;
        self.config = Some(config);
        if self.pending.is_none() && self.state != PreviewState::Analyzing {
            advance(&mut self.state, PreviewState::Compositing);
        }
        Ok(())
    }

    /// Start a background load. Any load still in flight becomes stale.
    pub fn begin_background_load(&mut self) -> LoadTicket {
        self.generation += 1;
        if let Some(stale) = self.pending.replace(self.generation) {
            tracing::debug!(stale, generation = self.generation, "superseding background load");
        }
        advance(&mut self.state, PreviewState::BackgroundLoading);
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Commit the outcome of the load `ticket` was issued for.
    ///
    /// Returns `Ok(false)` and changes nothing when a newer load was started since. A failed
    /// load keeps the current background and returns its error.
    pub fn complete_background_load(
        &mut self,
        ticket: LoadTicket,
        result: CalwallResult<BackgroundImage>,
    ) -> CalwallResult<bool> {
        if self.pending != Some(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.generation,
                "ignoring stale background load"
            );
            return Ok(false);
        }
        self.pending = None;

        let image = match result {
            Ok(image) => image,
            Err(e) => {
                self.settle();
                return Err(e);
            }
        };

        if self
            .background
            .as_ref()
            .is_some_and(|current| current.same_pixels(&image))
        {
            self.settle();
            return Ok(true);
        }

        let previous = self.background.replace(image);
        self.analysis = None;
        self.start_fade(previous);
        advance(&mut self.state, PreviewState::Analyzing);
        Ok(true)
    }

    /// Drop the background (fading it out) and cancel any load in flight.
    pub fn clear_background(&mut self) {
        self.generation += 1;
        self.pending = None;
        let previous = self.background.take();
        self.analysis = None;
        if previous.is_some() {
            self.start_fade(previous);
        }
        self.settle();
    }

    /// Advance the cross-fade by one display-refresh interval.
    ///
    /// Returns whether the fade was running and a new frame should be drawn.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(fade) = self.fade.as_mut() else {
            return false;
        };
        fade.elapsed = fade.elapsed.saturating_add(elapsed);
        if fade.elapsed >= self.opts.crossfade {
            tracing::debug!("cross-fade finished");
            self.fade = None;
        }
        if self.state == PreviewState::Done {
            advance(&mut self.state, PreviewState::Compositing);
        }
        true
    }

    /// How far the new background has faded in, `0..=1`, while a fade runs.
    pub fn fade_progress(&self) -> Option<f32> {
        let fade = self.fade.as_ref()?;
        let total = self.opts.crossfade.as_secs_f64();
        if total <= 0.0 {
            return Some(1.0);
        }
        Some((fade.elapsed.as_secs_f64() / total).clamp(0.0, 1.0) as f32)
    }

    pub fn needs_redraw(&self) -> bool {
        self.config.is_some()
            && (self.fade.is_some()
                || matches!(
                    self.state,
                    PreviewState::Analyzing | PreviewState::Compositing
                ))
    }

    /// Draw the current preview onto `surface`. `Ok(None)` until a config is set.
    ///
    /// Automatic text color is analyzed once per background and surface size. The analysis
    /// pass draws the new background alone and reads it back before the full composition.
    #[tracing::instrument(skip(self, surface), fields(state = ?self.state))]
    pub fn render<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> CalwallResult<Option<PreviewFrame>> {
        let Some(config) = self.config.as_ref() else {
            return Ok(None);
        };
        let threshold = self.opts.luminance_threshold;
        let fill = self.opts.fill_rgb;

        let mut text_color = TextColorChoice::for_config(config, threshold)?;
        let mut contrast = None;
        let mut analyzed = false;
        if let TextColorChoice::Auto { fallback, .. } = text_color
            && let Some(image) = self.background.as_ref()
        {
            let key = AnalysisKey {
                image: image.id(),
                size: surface.size(),
            };
            let reading = match self.analysis.filter(|(k, _)| *k == key) {
                Some((_, cached)) => cached,
                None => {
                    advance(&mut self.state, PreviewState::Analyzing);
                    draw_background(surface, &BackgroundLayer::new(Some(image), fill))?;
                    let reading = match surface.snapshot()? {
                        Some(frame) => Some(analyze_contrast(&frame.data, frame.size, threshold)?),
                        None => None,
                    };
                    self.analysis = Some((key, reading));
                    analyzed = true;
                    reading
                }
            };
            contrast = reading;
            text_color = TextColorChoice::Fixed(reading.map_or(fallback, |r| r.text_color()));
        }

        advance(&mut self.state, PreviewState::Compositing);
        let mut layer = BackgroundLayer::new(self.background.as_ref(), fill);
        if let (Some(fade), Some(t)) = (self.fade.as_ref(), self.fade_progress()) {
            layer.fade_from = Some((&fade.from, t));
        }
        let mut composed = compose(
            surface,
            &Scene {
                config,
                background: layer,
                text_color,
            },
        )?;
        composed.contrast = contrast;

        let next = if self.pending.is_some() {
            PreviewState::BackgroundLoading
        } else {
            PreviewState::Done
        };
        advance(&mut self.state, next);
        Ok(Some(PreviewFrame {
            composed,
            contrast,
            analyzed,
        }))
    }

    fn start_fade(&mut self, from: Option<BackgroundImage>) {
        self.fade = from
            .filter(|_| !self.opts.crossfade.is_zero())
            .map(|from| Crossfade {
                from,
                elapsed: Duration::ZERO,
            });
    }

    fn settle(&mut self) {
        let next = if self.config.is_some() {
            PreviewState::Compositing
        } else {
            PreviewState::Idle
        };
        advance(&mut self.state, next);
    }
}

fn advance(state: &mut PreviewState, next: PreviewState) {
    if *state != next {
        tracing::debug!(from = ?*state, to = ?next, "preview state");
        *state = next;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
