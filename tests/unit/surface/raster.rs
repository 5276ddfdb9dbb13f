use super::*;
use crate::geometry::shape::RectShape;

fn filled_rect() -> Shape {
    Shape::Rectangle(RectShape {
        left: 8.0,
        top: 8.0,
        width: 48.0,
        height: 48.0,
        stroke: "#ff0000".to_string(),
        stroke_width: 4.0,
        fill: Some("#ff0000".to_string()),
        scale_x: 1.0,
        scale_y: 1.0,
    })
}

#[test]
fn snapshot_has_surface_dimensions_and_ink() {
    let mut s = RasterSurface::new(RenderedBox::new(64.0, 64.0)).unwrap();
    s.add_shape(filled_rect()).unwrap();
    let frame = s.snapshot().unwrap();
    assert_eq!(frame.width, 64);
    assert_eq!(frame.height, 64);
    assert_eq!(frame.data.len(), 64 * 64 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.iter().any(|&b| b != 0), "expected drawn pixels");
}

#[test]
fn empty_surface_renders_transparent() {
    let mut s = RasterSurface::new(RenderedBox::new(32.0, 32.0)).unwrap();
    let frame = s.snapshot().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn unmeasurable_boxes_are_rejected() {
    assert!(RasterSurface::new(RenderedBox::new(0.0, 64.0)).is_err());
    let mut s = RasterSurface::new(RenderedBox::new(64.0, 64.0)).unwrap();
    assert!(s.resize(RenderedBox::new(64.0, 0.0)).is_err());
}

#[test]
fn disposed_surface_rejects_snapshots() {
    let mut s = RasterSurface::new(RenderedBox::new(64.0, 64.0)).unwrap();
    s.dispose();
    assert!(s.is_disposed());
    assert!(s.snapshot().is_err());
    assert!(s.add_shape(filled_rect()).is_err());
}

#[test]
fn hex_colors_parse_with_white_fallback() {
    assert_eq!(css_hex_rgba("#ff0000"), [255, 0, 0, 255]);
    assert_eq!(css_hex_rgba("#f00"), [255, 0, 0, 255]);
    assert_eq!(css_hex_rgba("#11223344"), [17, 34, 51, 68]);
    assert_eq!(css_hex_rgba("tomato"), [255, 255, 255, 255]);
    assert_eq!(css_hex_rgba("#12"), [255, 255, 255, 255]);
}
