use super::*;
use crate::geometry::shape::{CircleShape, LineShape, PathShape, RectShape, TextShape};

fn all_shape_kinds() -> Vec<Shape> {
    vec![
        Shape::Path(PathShape {
            left: 10.0,
            top: 20.0,
            points: vec![[10.0, 20.0], [34.5, 81.25], [200.0, 140.0]],
            stroke: "#ff0000".to_string(),
            stroke_width: 4.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }),
        Shape::Circle(CircleShape {
            left: 300.0,
            top: 40.0,
            radius: 55.0,
            stroke: "#00ff00".to_string(),
            stroke_width: 2.0,
            fill: Some("#00ff0020".to_string()),
            scale_x: 1.5,
            scale_y: 0.75,
        }),
        Shape::Rectangle(RectShape {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
            stroke: "#0000ff".to_string(),
            stroke_width: 3.0,
            fill: None,
            scale_x: 1.0,
            scale_y: 1.0,
        }),
        Shape::Line(LineShape {
            left: 12.0,
            top: 400.0,
            width: 120.0,
            height: -33.0,
            stroke: "#abcdef".to_string(),
            stroke_width: 1.5,
            scale_x: 1.0,
            scale_y: 1.0,
        }),
        Shape::Text(TextShape {
            left: 640.0,
            top: 360.0,
            text: "wrong shade of blue".to_string(),
            font_size: 24.0,
            fill: "#ffffff".to_string(),
            scale_x: 1.0,
            scale_y: 1.0,
        }),
    ]
}

fn assert_shape_approx_eq(a: &Shape, b: &Shape) {
    let av = serde_json::to_value(a).unwrap();
    let bv = serde_json::to_value(b).unwrap();
    let (ao, bo) = (av.as_object().unwrap(), bv.as_object().unwrap());
    assert_eq!(ao.len(), bo.len());
    for (key, val) in ao {
        match (val.as_f64(), bo[key].as_f64()) {
            (Some(x), Some(y)) => {
                assert!((x - y).abs() < 1e-9, "field {key}: {x} vs {y}");
            }
            _ => assert_eq!(val, &bo[key], "field {key}"),
        }
    }
}

#[test]
fn round_trip_preserves_every_shape_kind() {
    for rendered in [
        RenderedBox::new(960.0, 540.0),
        RenderedBox::new(1280.0, 720.0),
        RenderedBox::new(333.0, 777.0),
    ] {
        let shapes = all_shape_kinds();
        let back = from_reference(&to_reference(&shapes, rendered), rendered);
        for (a, b) in shapes.iter().zip(&back) {
            assert_shape_approx_eq(a, b);
        }
    }
}

#[test]
fn half_size_surface_doubles_into_reference_units() {
    // 960x540 is exactly half the 1920x1080 reference on both axes.
    let rendered = RenderedBox::new(960.0, 540.0);
    let drawn = vec![Shape::Rectangle(RectShape {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
        stroke: "#ff0000".to_string(),
        stroke_width: 4.0,
        fill: None,
        scale_x: 1.0,
        scale_y: 1.0,
    })];
    let reference = to_reference(&drawn, rendered);
    let Shape::Rectangle(r) = &reference[0] else {
        panic!("expected rectangle")
    };
    assert_eq!(r.left, 200.0);
    assert_eq!(r.top, 100.0);
    assert_eq!(r.width, 400.0);
    assert_eq!(r.height, 200.0);
}

#[test]
fn existing_scale_factors_are_multiplied_not_replaced() {
    let rendered = RenderedBox::new(960.0, 540.0);
    let shapes = all_shape_kinds();
    let reference = to_reference(&shapes, rendered);
    let Shape::Circle(c) = &reference[1] else {
        panic!("expected circle")
    };
    assert_eq!(c.scale_x, 1.5 * 2.0);
    assert_eq!(c.scale_y, 0.75 * 2.0);
    // Radius scales on the x axis.
    assert_eq!(c.radius, 110.0);
}

#[test]
fn path_points_scale_per_axis() {
    let rendered = RenderedBox::new(960.0, 540.0);
    let shapes = all_shape_kinds();
    let reference = to_reference(&shapes, rendered);
    let Shape::Path(p) = &reference[0] else {
        panic!("expected path")
    };
    assert_eq!(p.points[1], [69.0, 162.5]);
}

#[test]
fn zero_dimension_is_a_no_op_never_a_divide() {
    let shapes = all_shape_kinds();
    for degenerate in [
        RenderedBox::new(0.0, 540.0),
        RenderedBox::new(960.0, 0.0),
        RenderedBox::new(0.0, 0.0),
        RenderedBox::new(f64::NAN, 540.0),
    ] {
        assert_eq!(to_reference(&shapes, degenerate), shapes);
        assert_eq!(from_reference(&shapes, degenerate), shapes);
    }
}
