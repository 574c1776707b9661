use crate::{BoundingBox, Px, TextBoxError};
use image::{imageops, RgbaImage};
use std::path::Path;

/// A rendered unit of text: a raster plus the box it occupies in layer space.
///
/// The bounding box is authoritative for geometry. It starts out matching the
/// raster's intrinsic size at the origin, and may later be moved or rescaled
/// without touching the pixels; the raster is resampled to the box only when
/// it is composited or exported with [`MeasuredLayer::render`].
#[derive(Debug, Clone)]
pub struct MeasuredLayer {
    image: RgbaImage,
    bbox: BoundingBox,
}

impl MeasuredLayer {
    /// Wrap a raster, placing it at the origin at its intrinsic size
    pub fn new(image: RgbaImage) -> MeasuredLayer {
        let bbox = BoundingBox::at_origin(Px::from(image.width()), Px::from(image.height()));
        MeasuredLayer { image, bbox }
    }

    /// Wrap a raster whose logical geometry differs from its pixel size, e.g.
    /// text whose advance width is fractional
    pub fn with_geometry(image: RgbaImage, bbox: BoundingBox) -> MeasuredLayer {
        MeasuredLayer { image, bbox }
    }

    /// A fully transparent layer with the given logical size
    pub fn blank(width: Px, height: Px) -> MeasuredLayer {
        let image = RgbaImage::new(width.ceil_u32(), height.ceil_u32());
        MeasuredLayer::with_geometry(image, BoundingBox::at_origin(width, height))
    }

    pub fn width(&self) -> Px {
        self.bbox.width
    }

    pub fn height(&self) -> Px {
        self.bbox.height
    }

    pub fn left(&self) -> Px {
        self.bbox.left
    }

    pub fn top(&self) -> Px {
        self.bbox.top
    }

    /// The x-coordinate of the layer's right edge
    pub fn right(&self) -> Px {
        self.bbox.right()
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn set_bbox(&mut self, bbox: BoundingBox) {
        self.bbox = bbox;
    }

    /// The raster as produced, before any rescaling to the bounding box
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The raster resampled to the bounding box's size
    pub fn render(&self) -> RgbaImage {
        let width = self.bbox.width.round_u32();
        let height = self.bbox.height.round_u32();

        if width == self.image.width() && height == self.image.height() {
            return self.image.clone();
        }
        if width == 0 || height == 0 || self.image.width() == 0 || self.image.height() == 0 {
            return RgbaImage::new(width, height);
        }

        imageops::resize(&self.image, width, height, imageops::FilterType::Triangle)
    }

    /// Render the layer and write it to disk, in the format implied by the
    /// file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TextBoxError> {
        self.render().save(path.as_ref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn new_layer_sits_at_origin() {
        let layer = MeasuredLayer::new(RgbaImage::new(12, 30));
        assert_eq!(layer.width(), Px(12.0));
        assert_eq!(layer.height(), Px(30.0));
        assert_eq!(layer.right(), Px(12.0));
    }

    #[test]
    fn moving_the_box_moves_the_right_edge() {
        let mut layer = MeasuredLayer::blank(Px(10.0), Px(20.0));
        layer.set_bbox(BoundingBox::from((15.0, 0.0, 5.0, 10.0)));
        assert_eq!(layer.left(), Px(15.0));
        assert_eq!(layer.right(), Px(20.0));
        // pixels are untouched until rendered
        assert_eq!(layer.image().dimensions(), (10, 20));
    }

    #[test]
    fn render_resamples_to_the_box() {
        let mut layer = MeasuredLayer::new(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        layer.set_bbox(BoundingBox::from((0.0, 0.0, 8.0, 2.0)));
        let rendered = layer.render();
        assert_eq!(rendered.dimensions(), (8, 2));
        assert!(rendered.get_pixel(3, 1).0[3] > 250);
    }

    #[test]
    fn save_failures_are_image_errors() {
        let layer = MeasuredLayer::new(RgbaImage::new(2, 2));
        let result = layer.save("/nonexistent/directory/layer.png");
        assert!(matches!(result, Err(TextBoxError::Image(_))), "{result:?}");
    }

    #[test]
    fn degenerate_boxes_render_empty() {
        let mut layer = MeasuredLayer::new(RgbaImage::new(4, 4));
        layer.set_bbox(BoundingBox::from((0.0, 0.0, 0.0, 4.0)));
        assert_eq!(layer.render().dimensions(), (0, 4));
    }
}
