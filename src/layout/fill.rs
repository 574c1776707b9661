use crate::{Px, TextBoxError};
use rand::Rng;
use serde::Deserialize;

/// The fraction of a box's width that text is allowed to occupy, sampled
/// uniformly per fitted box. Both bounds lie in `(0, 1]` and `low <= high`.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(try_from = "[f32; 2]")]
pub struct FillRange {
    low: f32,
    high: f32,
}

impl FillRange {
    /// Create a fill range, rejecting bounds outside of `(0, 1]` or in the wrong order
    pub fn new(low: f32, high: f32) -> Result<FillRange, TextBoxError> {
        // written so that NaN fails every comparison
        let valid = low > 0.0 && low <= high && high <= 1.0;
        if !valid {
            return Err(TextBoxError::InvalidFillRange { low, high });
        }
        Ok(FillRange { low, high })
    }

    /// A range that always yields the same fill ratio
    pub fn exact(fill: f32) -> Result<FillRange, TextBoxError> {
        FillRange::new(fill, fill)
    }

    /// Always target the full box width
    pub fn full() -> FillRange {
        FillRange {
            low: 1.0,
            high: 1.0,
        }
    }

    pub fn low(&self) -> f32 {
        self.low
    }

    pub fn high(&self) -> f32 {
        self.high
    }

    /// Draw a fill ratio uniformly from `[low, high]`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.low == self.high {
            return self.low;
        }
        self.low + (self.high - self.low) * rng.gen::<f32>()
    }
}

impl Default for FillRange {
    fn default() -> Self {
        FillRange::full()
    }
}

impl TryFrom<[f32; 2]> for FillRange {
    type Error = TextBoxError;

    fn try_from(bounds: [f32; 2]) -> Result<Self, Self::Error> {
        let [low, high] = bounds;
        FillRange::new(low, high)
    }
}

/// Settings for a [`TextBox`](crate::layout::TextBox), as found in a generator
/// configuration file
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize)]
pub struct TextBoxConfig {
    #[serde(default)]
    pub fill: FillRange,
}

/// The rectangle text is fitted into. The height sets the font's pixel size;
/// the width only caps how much text is accepted.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BoxSize {
    pub width: Px,
    pub height: Px,
}

impl BoxSize {
    pub fn new(width: f32, height: f32) -> BoxSize {
        BoxSize {
            width: Px(width),
            height: Px(height),
        }
    }

    /// The width budget for a given fill ratio: never narrower than one box
    /// height, never wider than the box. If the box is taller than it is wide,
    /// the box width wins.
    pub fn target_width(&self, fill: f32) -> Px {
        (self.width * fill).max(self.height).min(self.width)
    }

    /// The pixel size fonts are rendered at
    pub fn font_size(&self) -> u32 {
        self.height.round_u32()
    }
}

impl From<(f32, f32)> for BoxSize {
    fn from(size: (f32, f32)) -> Self {
        BoxSize::new(size.0, size.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_invalid_bounds() {
        assert!(FillRange::new(0.0, 1.0).is_err());
        assert!(FillRange::new(0.8, 0.5).is_err());
        assert!(FillRange::new(0.5, 1.5).is_err());
        assert!(FillRange::new(f32::NAN, 1.0).is_err());
        assert!(FillRange::new(0.5, 0.5).is_ok());
        assert!(FillRange::new(0.1, 1.0).is_ok());
    }

    #[test]
    fn samples_stay_in_range() {
        let range = FillRange::new(0.25, 0.75).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let fill = range.sample(&mut rng);
            assert!((0.25..=0.75).contains(&fill), "{fill} out of range");
        }
    }

    #[test]
    fn exact_range_is_deterministic() {
        let range = FillRange::exact(0.6).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(range.sample(&mut rng), 0.6);
        assert_eq!(range.sample(&mut rng), 0.6);
    }

    #[test]
    fn target_width_is_clipped() {
        let size = BoxSize::new(200.0, 20.0);
        assert_eq!(size.target_width(1.0), Px(200.0));
        assert_eq!(size.target_width(0.5), Px(100.0));
        // never below one box height
        assert_eq!(size.target_width(0.05), Px(20.0));
    }

    #[test]
    fn tall_boxes_target_their_width() {
        let size = BoxSize::new(10.0, 40.0);
        assert_eq!(size.target_width(0.5), Px(10.0));
    }

    #[test]
    fn font_size_rounds_height() {
        assert_eq!(BoxSize::new(100.0, 19.6).font_size(), 20);
        assert_eq!(BoxSize::new(100.0, 19.4).font_size(), 19);
    }

    #[test]
    fn config_parses_fill_pairs() {
        let config: TextBoxConfig = serde_json::from_str(r#"{ "fill": [0.5, 1.0] }"#).unwrap();
        assert_eq!(config.fill, FillRange::new(0.5, 1.0).unwrap());

        let config: TextBoxConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.fill, FillRange::full());

        let bad = serde_json::from_str::<TextBoxConfig>(r#"{ "fill": [1.0, 0.5] }"#);
        assert!(bad.is_err());
    }
}
