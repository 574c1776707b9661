use super::accumulate::{accumulate, StopReason};
use super::fill::{BoxSize, FillRange, TextBoxConfig};
use crate::script::{is_complex, is_line_break};
use crate::{
    BoundingBox, Compositor, FontConfig, ImageCompositor, MeasuredLayer, Px, RenderError, Shaper,
};
use rand::Rng;

/// Which rendering strategy produced a [`FittedText`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// The whole run was rendered by a single shaper call
    Shaped,
    /// Characters were rendered one by one and composited
    PerCharacter,
}

/// Text that was fitted into a box
#[derive(Debug, Clone)]
pub struct FittedText {
    /// The rendered text, scaled so that its height matches the box height
    pub layer: MeasuredLayer,
    /// The characters that made it into `layer`, trimmed of surrounding whitespace
    pub text: String,
    pub mode: RenderMode,
}

/// Fits a single line of text into a box.
///
/// Text is accepted character by character for as long as it stays within a
/// randomly sampled fraction of the box width, then rendered at the box
/// height. Scripts that need contextual shaping (see [`crate::script`]) are
/// rendered as one unit; everything else, and complex text the shaper cannot
/// render as a unit, is rendered glyph by glyph and composited.
///
/// Shaper failures are never surfaced: they shorten the accepted text, or drop
/// individual characters. When nothing can be placed, fitting returns `None`.
pub struct TextBox<S, C = ImageCompositor> {
    fill: FillRange,
    shaper: S,
    compositor: C,
}

impl<S: Shaper> TextBox<S> {
    pub fn new(fill: FillRange, shaper: S) -> TextBox<S> {
        TextBox {
            fill,
            shaper,
            compositor: ImageCompositor,
        }
    }

    pub fn from_config(config: &TextBoxConfig, shaper: S) -> TextBox<S> {
        TextBox::new(config.fill, shaper)
    }
}

impl<S: Shaper, C: Compositor> TextBox<S, C> {
    /// Replace the compositor used to merge per-character layers
    pub fn with_compositor<D: Compositor>(self, compositor: D) -> TextBox<S, D> {
        TextBox {
            fill: self.fill,
            shaper: self.shaper,
            compositor,
        }
    }

    pub fn fill(&self) -> FillRange {
        self.fill
    }

    pub fn shaper(&self) -> &S {
        &self.shaper
    }

    /// Fit as much of the first line of `text` as possible into `size`.
    ///
    /// `font` is rendered at the box height; its other parameters are passed
    /// through to the shaper. The fill ratio is the only value drawn from `rng`.
    ///
    /// Returns `None` when nothing fits. That includes the per-character path
    /// keeping only whitespace: such a run is reported as no fit rather than as
    /// a layer with empty text, so a fitted text is never empty.
    pub fn fit<R: Rng>(
        &self,
        size: BoxSize,
        text: &str,
        font: &FontConfig,
        rng: &mut R,
    ) -> Option<FittedText> {
        let fill = self.fill.sample(rng);
        self.fit_with_fill(size, text, font, fill)
    }

    /// [`TextBox::fit`] with a fixed fill ratio instead of a sampled one
    pub fn fit_with_fill(
        &self,
        size: BoxSize,
        text: &str,
        font: &FontConfig,
        fill: f32,
    ) -> Option<FittedText> {
        let target_width = size.target_width(fill);
        let font = font.sized(size.font_size());

        let run = accumulate(text, target_width, size.height, &font, &self.shaper);
        log::debug!(
            "accepted {:?} within {} ({:?})",
            run.text,
            target_width,
            run.stop
        );
        if run.text.trim().is_empty() {
            return None;
        }

        if is_complex(run.text) {
            match self.render_shaped(run.text, size.height, &font) {
                Ok(layer) => {
                    return Some(FittedText {
                        layer,
                        text: run.text.trim().to_string(),
                        mode: RenderMode::Shaped,
                    })
                }
                Err(err) => {
                    log::warn!(
                        "failed to render {:?} as a unit, falling back to glyphs: {err}",
                        run.text
                    );
                }
            }
        }

        let fitted = self.render_per_character(run.text, size.height, &font);
        if fitted.is_none() && run.stop == StopReason::Forced {
            log::debug!("forced run {:?} could not be rendered either", run.text);
        }
        fitted
    }

    fn render_shaped(
        &self,
        text: &str,
        height: Px,
        font: &FontConfig,
    ) -> Result<MeasuredLayer, RenderError> {
        let mut layer = self.shaper.render(text, font)?;
        let scale = height.ratio_to(layer.height());
        layer.set_bbox(BoundingBox::at_origin(
            layer.width() * scale,
            layer.height() * scale,
        ));
        Ok(layer)
    }

    fn render_per_character(&self, text: &str, height: Px, font: &FontConfig) -> Option<FittedText> {
        let mut left = Px(0.0);
        let mut layers: Vec<MeasuredLayer> = Vec::with_capacity(text.len());
        let mut chars = String::with_capacity(text.len());

        for ch in text.chars().filter(|&ch| !is_line_break(ch)) {
            let mut buf = [0u8; 4];
            let glyph: &str = ch.encode_utf8(&mut buf);

            let mut layer = match self.shaper.render(glyph, font) {
                Ok(layer) => layer,
                Err(err) => {
                    log::warn!("dropping {ch:?}: {err}");
                    continue;
                }
            };

            let scale = height.ratio_to(layer.height());
            layer.set_bbox(BoundingBox::new(
                left,
                Px(0.0),
                layer.width() * scale,
                layer.height() * scale,
            ));
            left = layer.right();

            layers.push(layer);
            chars.push(ch);
        }

        let text = chars.trim();
        if layers.is_empty() || text.is_empty() {
            return None;
        }

        Some(FittedText {
            text: text.to_string(),
            layer: self.compositor.merge(layers),
            mode: RenderMode::PerCharacter,
        })
    }
}
