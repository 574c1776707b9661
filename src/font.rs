use crate::{Colour, Px, TextBoxError};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed font face. Fonts can be TTF or OTF fonts; only the first face of a
/// collection is used.
///
/// Font resolution is left to callers: a [`TtfShaper`](crate::TtfShaper) is
/// built around exactly one `Font`.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, TextBoxError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Read and parse a font file
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, TextBoxError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::load(bytes)
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.lookup_name(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.lookup_name(owned_ttf_parser::name_id::FAMILY)
    }

    fn lookup_name(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Px) -> f32 {
        size.0 / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given pixel size
    pub fn ascent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face.as_face_ref().ascender() as f32)
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given pixel size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face.as_face_ref().descender() as f32)
    }

    /// The height of one line of text without leading, `ascent - descent`
    pub fn line_height(&self, size: Px) -> Px {
        self.ascent(size) - self.descent(size)
    }

    /// The raw font file, for shaping and rasterising
    pub fn data(&self) -> &[u8] {
        self.face.as_slice()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The scale from font units to pixels at the given size
    pub fn units_to_px(&self, size: Px) -> f32 {
        self.scaling(size)
    }
}

/// Rendering parameters handed to a [`Shaper`](crate::Shaper).
///
/// The fitter overwrites `size` with the target box height; everything else is
/// passed through to the shaper untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FontConfig {
    /// Pixel size of the font
    pub size: u32,
    /// Fill colour of the glyphs
    pub colour: Colour,
    /// Shaper-specific parameters this crate does not interpret
    pub options: BTreeMap<String, String>,
}

impl FontConfig {
    pub fn new(colour: Colour) -> FontConfig {
        FontConfig {
            size: 0,
            colour,
            options: BTreeMap::new(),
        }
    }

    /// Add a shaper-specific parameter
    pub fn with_option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> FontConfig {
        self.options.insert(key.into(), value.into());
        self
    }

    /// A copy of this configuration with the pixel size replaced
    pub fn sized(&self, size: u32) -> FontConfig {
        FontConfig {
            size,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let result = Font::load(vec![0u8; 64]);
        assert!(matches!(result, Err(TextBoxError::FaceParsing(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Font::load_from_disk("/nonexistent/font.ttf");
        assert!(matches!(result, Err(TextBoxError::Io(_))));
    }

    #[test]
    fn sizing_keeps_other_parameters() {
        let config = FontConfig::new(crate::colours::RED).with_option("weight", "bold");
        let sized = config.sized(32);
        assert_eq!(sized.size, 32);
        assert_eq!(sized.colour, crate::colours::RED);
        assert_eq!(sized.options.get("weight").map(String::as_str), Some("bold"));
        assert_eq!(config.size, 0);
    }
}
