use super::*;

fn brush() -> BrushStyle {
    BrushStyle {
        color: "#112233".to_string(),
        width: 5.0,
    }
}

#[test]
fn pen_accumulates_while_down_and_commits_on_up() {
    let mut engine = GestureEngine::new();
    engine.set_tool(Tool::Pen);
    let brush = brush();

    assert_eq!(
        engine.pointer(PointerEvent::Down(Point::new(10.0, 20.0)), &brush),
        GestureOutcome::InProgress
    );
    assert_eq!(
        engine.pointer(PointerEvent::Move(Point::new(15.0, 5.0)), &brush),
        GestureOutcome::InProgress
    );
    let outcome = engine.pointer(PointerEvent::Up(Point::new(30.0, 25.0)), &brush);
    let GestureOutcome::Committed(Shape::Path(path)) = outcome else {
        panic!("expected committed path, got {outcome:?}")
    };
    assert_eq!(path.points, vec![[10.0, 20.0], [15.0, 5.0], [30.0, 25.0]]);
    // Anchor is the bounding-box minimum of the samples.
    assert_eq!(path.left, 10.0);
    assert_eq!(path.top, 5.0);
    assert_eq!(path.stroke, "#112233");
    assert_eq!(path.stroke_width, 5.0);
}

#[test]
fn pen_moves_without_down_are_ignored() {
    let mut engine = GestureEngine::new();
    engine.set_tool(Tool::Pen);
    assert_eq!(
        engine.pointer(PointerEvent::Move(Point::new(1.0, 1.0)), &brush()),
        GestureOutcome::Idle
    );
    assert_eq!(
        engine.pointer(PointerEvent::Up(Point::new(1.0, 1.0)), &brush()),
        GestureOutcome::Idle
    );
}

#[test]
fn discrete_tools_create_once_per_down() {
    let mut engine = GestureEngine::new();
    engine.set_tool(Tool::Rectangle);
    let brush = brush();

    let outcome = engine.pointer(PointerEvent::Down(Point::new(100.0, 100.0)), &brush);
    let GestureOutcome::Committed(Shape::Rectangle(rect)) = outcome else {
        panic!("expected committed rectangle")
    };
    // Centered on the click point at the default size.
    assert_eq!(rect.left, 100.0 - DEFAULT_RECT_WIDTH / 2.0);
    assert_eq!(rect.top, 100.0 - DEFAULT_RECT_HEIGHT / 2.0);
    assert_eq!(rect.width, DEFAULT_RECT_WIDTH);
    assert_eq!(rect.height, DEFAULT_RECT_HEIGHT);

    // The drag that follows manipulates the created object on the surface;
    // it must not create again.
    assert_eq!(
        engine.pointer(PointerEvent::Move(Point::new(120.0, 120.0)), &brush),
        GestureOutcome::Idle
    );
    assert_eq!(
        engine.pointer(PointerEvent::Up(Point::new(120.0, 120.0)), &brush),
        GestureOutcome::Idle
    );
}

#[test]
fn circle_is_centered_on_the_click() {
    let mut engine = GestureEngine::new();
    engine.set_tool(Tool::Circle);
    let outcome = engine.pointer(PointerEvent::Down(Point::new(50.0, 60.0)), &brush());
    let GestureOutcome::Committed(Shape::Circle(c)) = outcome else {
        panic!("expected committed circle")
    };
    assert_eq!(c.left, 50.0 - DEFAULT_CIRCLE_RADIUS);
    assert_eq!(c.top, 60.0 - DEFAULT_CIRCLE_RADIUS);
    assert_eq!(c.radius, DEFAULT_CIRCLE_RADIUS);
}

#[test]
fn text_inserts_an_empty_editable_node_at_the_click() {
    let mut engine = GestureEngine::new();
    engine.set_tool(Tool::Text);
    let outcome = engine.pointer(PointerEvent::Down(Point::new(7.0, 9.0)), &brush());
    let GestureOutcome::Committed(Shape::Text(t)) = outcome else {
        panic!("expected committed text")
    };
    assert_eq!((t.left, t.top), (7.0, 9.0));
    assert!(t.text.is_empty());
    assert_eq!(t.font_size, DEFAULT_FONT_SIZE);
}

#[test]
fn select_tool_creates_nothing() {
    let mut engine = GestureEngine::new();
    assert_eq!(engine.tool(), Tool::Select);
    for event in [
        PointerEvent::Down(Point::new(0.0, 0.0)),
        PointerEvent::Move(Point::new(1.0, 1.0)),
        PointerEvent::Up(Point::new(1.0, 1.0)),
    ] {
        assert_eq!(engine.pointer(event, &brush()), GestureOutcome::Idle);
    }
}

#[test]
fn switching_tools_cancels_an_open_stroke() {
    let mut engine = GestureEngine::new();
    engine.set_tool(Tool::Pen);
    engine.pointer(PointerEvent::Down(Point::new(0.0, 0.0)), &brush());
    engine.set_tool(Tool::Circle);
    // The up that would have committed the stroke is now idle.
    assert_eq!(
        engine.pointer(PointerEvent::Up(Point::new(5.0, 5.0)), &brush()),
        GestureOutcome::Idle
    );
}
