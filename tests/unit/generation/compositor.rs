//! Tests for canvas compositing

#[cfg(test)]
mod tests {
    use crate::common::{Fixture, write_png};
    use image::{Rgba, RgbaImage};
    use layermix::MixerError;
    use layermix::generation::compositor::Compositor;

    #[test]
    fn test_new_canvas_is_transparent() {
        let compositor = Compositor::new((3, 2));
        let canvas = compositor.canvas();
        assert_eq!(canvas.dimensions(), (3, 2));
        assert!(canvas.pixels().all(|pixel| pixel.0 == [0, 0, 0, 0]));
    }

    // Tests upper opaque layers cover lower ones
    // Verified by stacking in reverse order
    #[test]
    fn test_opaque_layer_covers_lower_layer() {
        let mut compositor = Compositor::new((2, 2));
        compositor.stack(&RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
        compositor.stack(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255])));

        let image = compositor.into_image();
        assert_eq!(image.get_pixel(1, 1).0, [0, 0, 255, 255]);
    }

    // Tests transparent pixels of an upper layer leave the lower layer visible
    // Verified by copying pixels instead of blending
    #[test]
    fn test_transparent_layer_keeps_lower_layer() {
        let mut compositor = Compositor::new((2, 2));
        compositor.stack(&RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255])));
        compositor.stack(&RgbaImage::new(2, 2));

        assert_eq!(compositor.canvas().get_pixel(0, 0).0, [0, 255, 0, 255]);
    }

    // Tests smaller layers are anchored top-left and larger ones are clipped
    // Verified by centring layers on the canvas
    #[test]
    fn test_layers_anchor_top_left() {
        let mut compositor = Compositor::new((4, 4));
        compositor.stack(&RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255])));
        compositor.stack(&RgbaImage::from_pixel(8, 1, Rgba([1, 2, 3, 255])));

        let canvas = compositor.canvas();
        assert_eq!(canvas.dimensions(), (4, 4));
        assert_eq!(canvas.get_pixel(0, 0).0, [1, 2, 3, 255]);
        assert_eq!(canvas.get_pixel(1, 1).0, [9, 9, 9, 255]);
        assert_eq!(canvas.get_pixel(3, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_stack_file_decodes_png() {
        let fixture = Fixture::new();
        let path = fixture.root().join("layer.png");
        write_png(&path, (2, 2), [10, 20, 30, 255]);

        let mut compositor = Compositor::new((2, 2));
        assert!(compositor.stack_file(&path).is_ok());
        assert_eq!(compositor.canvas().get_pixel(0, 1).0, [10, 20, 30, 255]);
    }

    // Tests undecodable variants surface as image load errors
    // Verified by skipping layers that fail to decode
    #[test]
    fn test_stack_file_reports_bad_image() {
        let fixture = Fixture::new();
        let path = fixture.file("broken.png", "not a png");

        let mut compositor = Compositor::new((2, 2));
        assert!(matches!(
            compositor.stack_file(&path),
            Err(MixerError::ImageLoad { .. })
        ));
    }
}
