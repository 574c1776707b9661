use crate::{MeasuredLayer, Px};
use image::{imageops, RgbaImage};

/// Merges an ordered sequence of positioned layers into one.
///
/// Implementations must keep each layer's bounding box as set by the caller:
/// no reordering and no clipping.
pub trait Compositor {
    fn merge(&self, layers: Vec<MeasuredLayer>) -> MeasuredLayer;
}

impl<F> Compositor for F
where
    F: Fn(Vec<MeasuredLayer>) -> MeasuredLayer,
{
    fn merge(&self, layers: Vec<MeasuredLayer>) -> MeasuredLayer {
        self(layers)
    }
}

/// Composites layers onto a transparent canvas covering the union of their
/// bounding boxes. Later layers are drawn over earlier ones.
#[derive(Debug, Default, Copy, Clone)]
pub struct ImageCompositor;

impl Compositor for ImageCompositor {
    fn merge(&self, layers: Vec<MeasuredLayer>) -> MeasuredLayer {
        let Some(bounds) = layers
            .iter()
            .map(|layer| *layer.bbox())
            .reduce(|acc, bbox| acc.union(&bbox))
        else {
            return MeasuredLayer::blank(Px(0.0), Px(0.0));
        };

        let mut canvas = RgbaImage::new(bounds.width.ceil_u32(), bounds.height.ceil_u32());
        for layer in layers.iter() {
            let raster = layer.render();
            let x = (layer.left() - bounds.left).0.round() as i64;
            let y = (layer.top() - bounds.top).0.round() as i64;
            imageops::overlay(&mut canvas, &raster, x, y);
        }

        MeasuredLayer::with_geometry(canvas, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundingBox;
    use image::Rgba;

    fn solid(width: u32, height: u32, value: u8) -> MeasuredLayer {
        MeasuredLayer::new(RgbaImage::from_pixel(width, height, Rgba([value, 0, 0, 255])))
    }

    #[test]
    fn merge_spans_all_layers() {
        let a = solid(10, 20, 1);
        let mut b = solid(10, 20, 2);
        b.set_bbox(BoundingBox::from((10.0, 0.0, 15.0, 20.0)));

        let merged = ImageCompositor.merge(vec![a, b]);
        assert_eq!(merged.width(), Px(25.0));
        assert_eq!(merged.height(), Px(20.0));
        assert_eq!(merged.image().dimensions(), (25, 20));
        assert_eq!(merged.image().get_pixel(5, 5).0[0], 1);
        assert_eq!(merged.image().get_pixel(20, 5).0[0], 2);
    }

    #[test]
    fn merge_preserves_offset_origin() {
        let mut a = solid(4, 4, 1);
        a.set_bbox(BoundingBox::from((6.0, 2.0, 4.0, 4.0)));
        let merged = ImageCompositor.merge(vec![a]);
        assert_eq!(merged.left(), Px(6.0));
        assert_eq!(merged.top(), Px(2.0));
        assert_eq!(merged.right(), Px(10.0));
    }

    #[test]
    fn merging_nothing_is_empty() {
        let merged = ImageCompositor.merge(Vec::new());
        assert_eq!(merged.width(), Px(0.0));
        assert_eq!(merged.image().dimensions(), (0, 0));
    }
}
