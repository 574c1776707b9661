use crate::script::{is_combining_mark, is_line_break};
use crate::{Font, FontConfig, MeasuredLayer, Px, RenderError};
use image::{GrayImage, RgbaImage};
use rustybuzz::{Direction, Language, Script, UnicodeBuffer};
use std::str::FromStr;
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;

/// Turns a string and font parameters into a measured raster layer.
///
/// A shaper must report geometry for single characters as well as longer
/// runs, and signals strings it cannot lay out with a [`RenderError`] rather
/// than panicking. Shapers are treated as stateless: the same input must
/// measure the same way every time.
pub trait Shaper {
    fn render(&self, text: &str, font: &FontConfig) -> Result<MeasuredLayer, RenderError>;
}

impl<F> Shaper for F
where
    F: Fn(&str, &FontConfig) -> Result<MeasuredLayer, RenderError>,
{
    fn render(&self, text: &str, font: &FontConfig) -> Result<MeasuredLayer, RenderError> {
        self(text, font)
    }
}

/// A glyph after shaping, positioned in pixels relative to the start of the
/// run's baseline. `y` grows upwards.
#[derive(Debug, Copy, Clone, PartialEq)]
struct PlacedGlyph {
    id: u16,
    x: f32,
    y: f32,
}

#[derive(Debug, Clone)]
struct ShapedRun {
    glyphs: Vec<PlacedGlyph>,
    advance: Px,
}

/// A [`Shaper`] over a single TrueType/OpenType face.
///
/// Runs are shaped with HarfBuzz (via rustybuzz), so ligatures, Arabic
/// joining forms and right-to-left ordering come out as the font intends, and
/// the shaped glyphs are rasterised with swash.
///
/// Script, language and direction are guessed from the text. They can be
/// overridden through the font configuration's `script` (ISO 15924, e.g.
/// `arab`), `language` (BCP 47, e.g. `ar`) and `direction` (`ltr` or `rtl`)
/// options.
///
/// A run is rejected if it contains a line break, starts with a combining mark
/// (there is no base to attach it to), or needs a glyph the face lacks.
pub struct TtfShaper {
    font: Font,
}

impl TtfShaper {
    pub fn new(font: Font) -> TtfShaper {
        TtfShaper { font }
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    fn shape(&self, text: &str, config: &FontConfig) -> Result<ShapedRun, RenderError> {
        let face = rustybuzz::Face::from_slice(self.font.data(), 0)
            .ok_or_else(|| RenderError::Raster("font cannot be shaped".into()))?;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        if let Some(script) = config.options.get("script") {
            match Script::from_str(script) {
                Ok(script) => buffer.set_script(script),
                Err(_) => log::warn!("ignoring unknown script {script:?}"),
            }
        }
        if let Some(language) = config.options.get("language") {
            match Language::from_str(language) {
                Ok(language) => buffer.set_language(language),
                Err(_) => log::warn!("ignoring unknown language {language:?}"),
            }
        }
        match config.options.get("direction").map(String::as_str) {
            Some("ltr") => buffer.set_direction(Direction::LeftToRight),
            Some("rtl") => buffer.set_direction(Direction::RightToLeft),
            Some(other) => log::warn!("ignoring unknown direction {other:?}"),
            None => {}
        }

        let output = rustybuzz::shape(&face, &[], buffer);
        let scale = self.font.units_to_px(Px::from(config.size));

        let mut pen = 0.0f32;
        let mut glyphs = Vec::with_capacity(output.glyph_infos().len());
        for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
            if info.glyph_id == 0 {
                // clusters are byte offsets into the input
                let ch = text
                    .get(info.cluster as usize..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(RenderError::MissingGlyph(ch));
            }

            glyphs.push(PlacedGlyph {
                id: info.glyph_id as u16,
                x: pen + pos.x_offset as f32 * scale,
                y: pos.y_offset as f32 * scale,
            });
            pen += pos.x_advance as f32 * scale;
        }

        Ok(ShapedRun {
            glyphs,
            advance: Px(pen),
        })
    }

    /// Alpha coverage of the shaped run on a `width` x `height` canvas whose
    /// baseline sits `ascent` pixels below the top
    fn rasterise(
        &self,
        run: &ShapedRun,
        size: u32,
        ascent: Px,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, RenderError> {
        let font = swash::FontRef::from_index(self.font.data(), 0)
            .ok_or_else(|| RenderError::Raster("font cannot be rasterised".into()))?;

        let mut context = ScaleContext::new();
        let mut scaler = context.builder(font).size(size as f32).hint(false).build();

        let mut coverage = GrayImage::new(width, height);
        for glyph in run.glyphs.iter() {
            // glyphs without outlines, such as spaces, only advance the pen
            let Some(mask) = Render::new(&[Source::Outline])
                .format(Format::Alpha)
                .render(&mut scaler, glyph.id)
            else {
                continue;
            };
            if !matches!(mask.content, Content::Mask) {
                continue;
            }

            let left = glyph.x.round() as i64 + mask.placement.left as i64;
            let top = (ascent.0 - glyph.y).round() as i64 - mask.placement.top as i64;
            let mask_width = mask.placement.width as usize;

            for (i, &alpha) in mask.data.iter().enumerate() {
                let x = left + (i % mask_width) as i64;
                let y = top + (i / mask_width) as i64;
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    continue;
                }
                let pixel = coverage.get_pixel_mut(x as u32, y as u32);
                // joined glyphs overlap; keep the stronger coverage
                pixel.0[0] = pixel.0[0].max(alpha);
            }
        }

        Ok(coverage)
    }
}

impl Shaper for TtfShaper {
    fn render(&self, text: &str, config: &FontConfig) -> Result<MeasuredLayer, RenderError> {
        if config.size == 0 {
            return Err(RenderError::InvalidSize(config.size));
        }
        let first = text.chars().next().ok_or(RenderError::EmptyText)?;
        if is_combining_mark(first) {
            return Err(RenderError::UnsupportedSequence(text.to_string()));
        }
        if let Some(ch) = text.chars().find(|&ch| is_line_break(ch)) {
            return Err(RenderError::MissingGlyph(ch));
        }

        let run = self.shape(text, config)?;

        let size = Px::from(config.size);
        let (width, height) = (run.advance.ceil_u32(), self.font.line_height(size).ceil_u32());
        if width == 0 || height == 0 {
            return Err(RenderError::Raster(format!(
                "{text:?} has no extent at size {}",
                config.size
            )));
        }

        let coverage = self.rasterise(&run, config.size, self.font.ascent(size), width, height)?;
        let image = RgbaImage::from_fn(width, height, |x, y| {
            config
                .colour
                .with_coverage(coverage.get_pixel(x, y).0[0] as f32 / 255.0)
        });

        // geometry is whole pixels so compositing never resamples the raster
        Ok(MeasuredLayer::new(image))
    }
}
