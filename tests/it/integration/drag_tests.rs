//! Pointer gesture tests: resizing, moving and drawing.

use crate::helpers::{
    assert_committed, committed, control, drag, frame, handle, EventLog, TestCropperBuilder,
};
use cropwidget::{CropEvent, Direction, EventKind, MouseButton, Point, PointerInput, Rect, Surface};

#[test]
fn test_corner_drag_keeps_aspect_ratio() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([100.0, 100.0, 100.0, 50.0]);
    cropper.update_selection_settings(id, |s| s.aspect_ratio = 2.0);
    assert_committed(&cropper, id, Rect::from_xywh(100.0, 100.0, 100.0, 50.0));

    let log = EventLog::attach(&mut cropper);
    let se = handle(&cropper, id, Direction::SE);
    assert!(drag(&mut cropper, se, (200.0, 150.0), (300.0, 150.0)));

    let rect = committed(&cropper, id);
    assert_eq!(rect, Rect::from_xywh(100.0, 100.0, 200.0, 100.0));
    assert_eq!((rect.x2, rect.y2), (300.0, 200.0));
    assert_eq!(log.names(), vec!["cropstart", "cropmove", "cropend", "cropfocus"]);
    assert_eq!(
        log.of(EventKind::End),
        vec![CropEvent::End { selection: id, rect }]
    );
}

#[test]
fn test_move_drag_is_clamped_to_container() {
    let (mut cropper, id) = TestCropperBuilder::new()
        .with_size(400.0, 300.0)
        .build_with_selection([300.0, 200.0, 80.0, 80.0]);

    let body = frame(&cropper, id);
    drag(&mut cropper, body, (340.0, 240.0), (500.0, 400.0));
    assert_committed(&cropper, id, Rect::from_xywh(320.0, 220.0, 80.0, 80.0));

    drag(&mut cropper, body, (340.0, 240.0), (-100.0, -100.0));
    assert_committed(&cropper, id, Rect::from_xywh(0.0, 0.0, 80.0, 80.0));
}

#[test]
fn test_edge_insets_bound_the_drag() {
    let (mut cropper, id) = TestCropperBuilder::new()
        .with_options(|o| {
            o.edge.n = 20.0;
            o.edge.w = 30.0;
        })
        .build_with_selection([50.0, 50.0, 100.0, 100.0]);

    let body = frame(&cropper, id);
    drag(&mut cropper, body, (100.0, 100.0), (0.0, 0.0));
    assert_committed(&cropper, id, Rect::from_xywh(30.0, 20.0, 100.0, 100.0));
}

#[test]
fn test_resize_stops_at_min_size() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([100.0, 100.0, 100.0, 100.0]);

    let east = handle(&cropper, id, Direction::E);
    drag(&mut cropper, east, (200.0, 150.0), (50.0, 150.0));
    assert_committed(&cropper, id, Rect::from_xywh(100.0, 100.0, 8.0, 100.0));
}

#[test]
fn test_drag_bar_resizes_one_edge() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([100.0, 100.0, 100.0, 100.0]);

    let north = control(&cropper, id, "jcrop-dragbar", Direction::N);
    drag(&mut cropper, north, (150.0, 100.0), (170.0, 60.0));
    assert_committed(&cropper, id, Rect::from_xywh(100.0, 60.0, 100.0, 140.0));
}

#[test]
fn test_draw_creates_selection_on_empty_stage() {
    let mut cropper = TestCropperBuilder::new().build();
    let container = cropper.container();

    assert!(drag(&mut cropper, container, (50.0, 60.0), (150.0, 120.0)));
    assert_eq!(cropper.ui().len(), 1);
    assert_eq!(cropper.get_selection(), Rect::from_xywh(50.0, 60.0, 100.0, 60.0));
}

#[test]
fn test_draw_towards_top_left() {
    let mut cropper = TestCropperBuilder::new().build();
    let container = cropper.container();

    drag(&mut cropper, container, (200.0, 200.0), (100.0, 150.0));
    assert_eq!(cropper.get_selection(), Rect::from_xywh(100.0, 150.0, 100.0, 50.0));
}

#[test]
fn test_page_origin_is_subtracted() {
    let mut cropper = TestCropperBuilder::new().with_origin(100.0, 50.0).build();
    let container = cropper.container();

    drag(&mut cropper, container, (150.0, 110.0), (250.0, 170.0));
    assert_eq!(cropper.get_selection(), Rect::from_xywh(50.0, 60.0, 100.0, 60.0));
}

#[test]
fn test_draw_refused_when_allow_select_off() {
    let mut cropper = TestCropperBuilder::new()
        .with_options(|o| o.allow_select = false)
        .build();
    let container = cropper.container();

    assert!(!drag(&mut cropper, container, (10.0, 10.0), (100.0, 100.0)));
    assert!(cropper.ui().is_empty());
}

#[test]
fn test_click_without_motion_ends_once() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([10.0, 10.0, 50.0, 50.0]);
    let log = EventLog::attach(&mut cropper);

    let body = frame(&cropper, id);
    assert!(cropper.pointer_down(body, &PointerInput::mouse(20.0, 20.0)));
    assert!(cropper.pointer_up(&PointerInput::mouse(20.0, 20.0)));
    assert!(!cropper.pointer_up(&PointerInput::mouse(20.0, 20.0)));

    assert_eq!(log.names(), vec!["cropend", "cropfocus"]);
    assert_committed(&cropper, id, Rect::from_xywh(10.0, 10.0, 50.0, 50.0));
}

#[test]
fn test_start_emitted_once_per_gesture() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([10.0, 10.0, 50.0, 50.0]);
    let log = EventLog::attach(&mut cropper);

    let body = frame(&cropper, id);
    cropper.pointer_down(body, &PointerInput::mouse(20.0, 20.0));
    for step in 1..=3 {
        let p = 20.0 + step as f64 * 5.0;
        assert!(cropper.pointer_move(&PointerInput::mouse(p, p)));
    }
    cropper.pointer_up(&PointerInput::mouse(35.0, 35.0));

    assert_eq!(log.count(EventKind::Start), 1);
    assert_eq!(log.count(EventKind::Move), 3);
    assert_eq!(log.count(EventKind::End), 1);
    assert_committed(&cropper, id, Rect::from_xywh(25.0, 25.0, 50.0, 50.0));
}

#[test]
fn test_document_listeners_bound_only_during_gesture() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([10.0, 10.0, 50.0, 50.0]);
    let body = frame(&cropper, id);

    cropper.pointer_down(body, &PointerInput::mouse(20.0, 20.0));
    assert_eq!(cropper.surface().document_listeners(), 1);
    assert!(cropper.selection(id).unwrap().is_dragging());

    cropper.pointer_up(&PointerInput::mouse(20.0, 20.0));
    assert_eq!(cropper.surface().document_listeners(), 0);
    assert!(!cropper.pointer_move(&PointerInput::mouse(40.0, 40.0)));
}

#[test]
fn test_capabilities_gate_gestures() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([100.0, 100.0, 100.0, 100.0]);
    cropper.update_selection_settings(id, |s| s.can_drag = false);

    let body = frame(&cropper, id);
    assert!(!drag(&mut cropper, body, (150.0, 150.0), (200.0, 200.0)));
    assert_eq!(cropper.surface().document_listeners(), 0);
    assert!(cropper.surface().has_class(
        cropper.selection(id).unwrap().element().unwrap(),
        "jcrop-nodrag"
    ));

    let se = handle(&cropper, id, Direction::SE);
    assert!(drag(&mut cropper, se, (200.0, 200.0), (220.0, 220.0)));
    assert_committed(&cropper, id, Rect::from_xywh(100.0, 100.0, 120.0, 120.0));

    cropper.update_selection_settings(id, |s| s.can_resize = false);
    assert!(!drag(&mut cropper, se, (220.0, 220.0), (300.0, 300.0)));
}

#[test]
fn test_secondary_button_is_ignored() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([10.0, 10.0, 50.0, 50.0]);
    let body = frame(&cropper, id);

    let input = PointerInput::Mouse {
        page: Point::new(20.0, 20.0),
        button: MouseButton::Secondary,
    };
    assert!(!cropper.pointer_down(body, &input));
    assert!(!cropper.selection(id).unwrap().is_dragging());
}

#[test]
fn test_dragging_inactive_selection_activates_it() {
    let mut cropper = TestCropperBuilder::new()
        .with_options(|o| o.multi = true)
        .build();
    let first = cropper.new_selection();
    cropper.set_select(&[10.0, 10.0, 50.0, 50.0]).unwrap();
    let second = cropper.new_selection();
    cropper.set_select(&[200.0, 200.0, 50.0, 50.0]).unwrap();
    assert_eq!(cropper.ui().selection(), Some(second));

    let body = frame(&cropper, first);
    drag(&mut cropper, body, (20.0, 20.0), (40.0, 30.0));

    assert_eq!(cropper.ui().selection(), Some(first));
    assert_eq!(cropper.ui().ids(), vec![first, second]);
    assert_committed(&cropper, first, Rect::from_xywh(30.0, 20.0, 50.0, 50.0));
    assert_committed(&cropper, second, Rect::from_xywh(200.0, 200.0, 50.0, 50.0));
}
