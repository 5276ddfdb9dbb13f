use super::*;
use crate::geometry::shape::{PathShape, TextShape};

#[test]
fn replay_style_recolors_and_rescales_strokes() {
    let style = ReplayStyle {
        stroke: "#00ffff".to_string(),
        width_scale: 2.0,
    };
    let shapes = vec![Shape::Path(PathShape {
        left: 0.0,
        top: 0.0,
        points: vec![[0.0, 0.0]],
        stroke: "#ff0000".to_string(),
        stroke_width: 4.0,
        scale_x: 1.0,
        scale_y: 1.0,
    })];
    let styled = style.apply(&shapes);
    let Shape::Path(p) = &styled[0] else {
        panic!("expected path")
    };
    assert_eq!(p.stroke, "#00ffff");
    assert_eq!(p.stroke_width, 8.0);
}

#[test]
fn replay_style_recolors_text_fill() {
    let style = ReplayStyle::default();
    let shapes = vec![Shape::Text(TextShape {
        left: 0.0,
        top: 0.0,
        text: "hi".to_string(),
        font_size: 24.0,
        fill: "#ff0000".to_string(),
        scale_x: 1.0,
        scale_y: 1.0,
    })];
    let styled = style.apply(&shapes);
    assert_eq!(styled[0].stroke(), style.stroke);
}
