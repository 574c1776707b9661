use derive_more::{Add, AddAssign, Display, From, Into, Mul, MulAssign, Sub, Sum};

/// A length in output pixels. Layers are rasterised at whole-pixel sizes but
/// laid out with fractional geometry, so lengths stay floating point until a
/// raster is actually produced.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    Mul,
    MulAssign,
    Sum,
    From,
    Into,
    Display,
)]
#[display("{_0}px")]
pub struct Px(pub f32);

impl Px {
    /// The ratio `self / other`, or `1.0` when `other` is zero
    pub fn ratio_to(self, other: Px) -> f32 {
        if other.0 > 0.0 {
            self.0 / other.0
        } else {
            1.0
        }
    }

    /// Round to the nearest whole pixel, saturating at zero
    pub fn round_u32(self) -> u32 {
        self.0.round().max(0.0) as u32
    }

    /// Round up to the nearest whole pixel, saturating at zero
    pub fn ceil_u32(self) -> u32 {
        self.0.ceil().max(0.0) as u32
    }

    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }
}

impl From<u32> for Px {
    fn from(value: u32) -> Self {
        Px(value as f32)
    }
}
