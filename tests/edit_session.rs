use std::path::Path;

use shapedraw::edit::{EditSession, SessionState};
use shapedraw::geom::VertexRef;
use shapedraw::path::{Frame, PlotArea};
use shapedraw::shape::io_json::read_shapes_json;
use shapedraw::shape::{
    read_context, DragMode, DrawContext, Geometry, Layer, Segment, ShapeDescriptor, ShapeStyle,
};

fn fixture_shapes() -> Vec<ShapeDescriptor> {
    read_shapes_json(Path::new("tests/fixtures/shapes.json")).expect("read shapes fixture")
}

fn closed_path(path: &str) -> ShapeDescriptor {
    ShapeDescriptor::new(
        Geometry::Path {
            path: path.to_string(),
        },
        "pixel",
        "pixel",
        &ShapeStyle::default(),
        true,
    )
}

#[test]
fn rect_drag_commits_only_the_moved_edge() {
    let shapes = fixture_shapes();
    let mut session = EditSession::activate(&shapes[0], DrawContext::default(), 0);

    assert!(session.on_drag_start(VertexRef::new(0, 2)));
    let live = session.on_drag_move(5.0, 0.0).expect("dragging");
    assert_eq!(live, "M0,0L0,10L25,10L25,0L0,0Z");
    assert!(session.on_drag_end());
    assert_eq!(session.state(), &SessionState::Committing);

    let updated = session.commit(&shapes).expect("shape list changed");
    assert_eq!(session.state(), &SessionState::Idle);
    assert_eq!(updated.len(), 2);

    let segment = updated[0].geometry.segment().expect("rect keeps corners");
    assert_eq!(segment.x0.as_number(), Some(0.0));
    assert_eq!(segment.y0.as_number(), Some(0.0));
    assert_eq!(segment.x1.as_number(), Some(25.0));
    assert_eq!(segment.y1.as_number(), Some(10.0));

    assert_eq!(updated[0].layer, Layer::Below);
    assert_eq!(updated[0].opacity, 0.5);
    assert_eq!(updated[0].line.color, "red");
    assert_eq!(updated[0].fillcolor.as_deref(), Some("blue"));
    assert_eq!(updated[1], shapes[1]);
}

#[test]
fn rect_drag_back_to_start_changes_nothing() {
    let shapes = fixture_shapes();
    let mut session = EditSession::activate(&shapes[0], DrawContext::default(), 0);

    session.on_drag_start(VertexRef::new(0, 0));
    session.on_drag_move(40.0, 40.0);
    session.on_drag_move(0.0, 0.0);
    session.on_drag_end();

    assert!(session.commit(&shapes).is_none());
}

#[test]
fn untouched_ellipse_commits_no_changes() {
    let ellipse = ShapeDescriptor::new(
        Geometry::Ellipse(Segment::new(10.0, 20.0, 50.0, 40.0)),
        "pixel",
        "pixel",
        &ShapeStyle::default(),
        true,
    );
    let shapes = vec![ellipse];
    let mut session = EditSession::activate(&shapes[0], DrawContext::default(), 0);
    assert_eq!(session.polygons()[0].len(), 32);

    session.on_drag_start(VertexRef::new(0, 3));
    session.on_drag_move(0.0, 0.0);
    session.on_drag_end();

    assert!(session.commit(&shapes).is_none());
}

#[test]
fn untouched_paper_ellipse_commits_no_changes() {
    let frame = Frame::Paper(PlotArea {
        left: 0.0,
        top: 0.0,
        width: 100.0,
        height: 50.0,
    });
    let ellipse = ShapeDescriptor::new(
        Geometry::Ellipse(Segment::new(0.1, 0.1, 0.5, 0.3)),
        "paper",
        "paper",
        &ShapeStyle::default(),
        true,
    );
    let shapes = vec![ellipse];
    let context = DrawContext::new(DragMode::Ellipse, frame);
    let mut session = EditSession::activate(&shapes[0], context, 0);

    assert!(session.on_drag_start(VertexRef::new(0, 0)));
    session.on_drag_move(0.0, 0.0);
    assert!(session.on_drag_end());

    assert!(session.commit(&shapes).is_none());
}

#[test]
fn click_on_reversed_ellipse_commits_no_changes() {
    let ellipse = ShapeDescriptor::new(
        Geometry::Ellipse(Segment::new(50.0, 40.0, 10.0, 20.0)),
        "pixel",
        "pixel",
        &ShapeStyle::default(),
        true,
    );
    let shapes = vec![ellipse];
    let mut session = EditSession::activate(&shapes[0], DrawContext::default(), 0);

    assert!(session.on_drag_start(VertexRef::new(0, 8)));
    assert!(session.on_drag_end());

    assert!(session.commit(&shapes).is_none());
}

#[test]
fn double_activation_deletes_freeform_vertex() {
    let shapes = vec![closed_path("M0,0L10,0L10,10L0,10L-5,5L0,0Z")];
    let mut session = EditSession::activate(&shapes[0], DrawContext::default(), 0);

    assert!(session.on_activate_count(VertexRef::new(0, 4), 1).is_none());
    assert_eq!(session.state(), &SessionState::Idle);

    let live = session
        .on_activate_count(VertexRef::new(0, 4), 2)
        .expect("vertex deleted");
    assert_eq!(live, "M0,0L10,0L10,10L0,10L0,0Z");

    let updated = session.commit(&shapes).expect("shape list changed");
    assert_eq!(
        updated[0].geometry.path(),
        Some("M0,0L10,0L10,10L0,10L0,0Z")
    );
    assert_eq!(updated[0].fillcolor.as_deref(), Some("rgba(0,0,0,0)"));
}

#[test]
fn gestures_out_of_order_are_ignored() {
    let shapes = vec![closed_path("M0,0L5,5L10,0Z")];
    let mut session = EditSession::activate(&shapes[0], DrawContext::default(), 0);

    assert!(session.on_drag_move(1.0, 1.0).is_none());
    assert!(!session.on_drag_end());
    assert!(session.commit(&shapes).is_none());
    assert!(!session.on_drag_start(VertexRef::new(0, 9)));

    assert!(session.on_drag_start(VertexRef::new(0, 1)));
    assert!(!session.on_drag_start(VertexRef::new(0, 0)));
    assert!(session.on_activate_count(VertexRef::new(0, 1), 2).is_none());
}

#[test]
fn date_axis_path_edits_write_date_strings() {
    let context = read_context(Path::new("tests/fixtures/dates.context.json"))
        .expect("read date context");
    let shapes = vec![ShapeDescriptor::new(
        Geometry::Path {
            path: "M2024-03-01,10L2024-03-01 12:00,5L2024-03-02,0L2024-03-01,10Z".to_string(),
        },
        "x",
        "y",
        &context.style,
        true,
    )];

    let mut session = EditSession::activate(&shapes[0], context, 0);
    assert_eq!(session.path(), "M0,0L120,50L240,100L0,0Z");

    session.on_drag_start(VertexRef::new(0, 1));
    assert_eq!(
        session.on_drag_move(0.0, 50.0).as_deref(),
        Some("M0,0L120,100L240,100L0,0Z")
    );
    session.on_drag_end();

    let updated = session.commit(&shapes).expect("shape list changed");
    assert_eq!(
        updated[0].geometry.path(),
        Some("M2024-03-01,10L2024-03-01 12:00,0L2024-03-02,0L2024-03-01,10Z")
    );
    assert_eq!(updated[0].xref, "x");
}
