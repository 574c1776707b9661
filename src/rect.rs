use crate::units::*;

/// An axis-aligned box in layer space, specified by its top-left corner and its
/// size. The y axis grows downwards, as in raster images.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    /// The x-coordinate of the left edge.
    pub left: Px,
    /// The y-coordinate of the top edge.
    pub top: Px,
    /// The horizontal extent of the box.
    pub width: Px,
    /// The vertical extent of the box.
    pub height: Px,
}

impl BoundingBox {
    pub fn new(left: Px, top: Px, width: Px, height: Px) -> BoundingBox {
        BoundingBox {
            left,
            top,
            width,
            height,
        }
    }

    /// A box of the given size anchored at the origin
    pub fn at_origin(width: Px, height: Px) -> BoundingBox {
        BoundingBox::new(Px(0.0), Px(0.0), width, height)
    }

    /// The x-coordinate of the right edge (`left + width`)
    pub fn right(&self) -> Px {
        self.left + self.width
    }

    /// The y-coordinate of the bottom edge (`top + height`)
    pub fn bottom(&self) -> Px {
        self.top + self.height
    }

    /// The smallest box containing both `self` and `other`
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(left, top, right - left, bottom - top)
    }
}

impl From<(f32, f32, f32, f32)> for BoundingBox {
    fn from(b: (f32, f32, f32, f32)) -> Self {
        BoundingBox {
            left: Px(b.0),
            top: Px(b.1),
            width: Px(b.2),
            height: Px(b.3),
        }
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(b: [f32; 4]) -> Self {
        let [left, top, width, height] = b;
        BoundingBox::from((left, top, width, height))
    }
}

impl From<BoundingBox> for (f32, f32, f32, f32) {
    fn from(b: BoundingBox) -> Self {
        (b.left.0, b.top.0, b.width.0, b.height.0)
    }
}
