//! Display/true scale: box fitting, trueSize and image replacement.

use crate::helpers::{drag, handle, EventLog, TestCropper, TestCropperBuilder};
use cropwidget::{
    CropEvent, Cropper, Direction, EventKind, MemorySurface, NodeId, Options, Rect, Size, Surface,
};

/// Controller wrapped around an `<img>` inside a `<body>`.
fn image_cropper(natural: Size, f: impl FnOnce(&mut Options)) -> (TestCropper, NodeId, NodeId) {
    let mut surface = MemorySurface::new();
    let body = surface.create_element("body", &[]);
    let image = surface.create_sized("img", &[("id", "photo")], natural);
    surface.append(body, image);

    let mut options = Options::default();
    f(&mut options);
    let cropper = Cropper::from_image(surface, image, natural, options).unwrap();
    (cropper, body, image)
}

#[test]
fn test_oversized_image_fits_box() {
    let (cropper, body, image) = image_cropper(Size::new(800.0, 600.0), |o| {
        o.box_width = Some(400.0);
        o.box_height = Some(400.0);
    });

    let container = cropper.container();
    assert_eq!(cropper.surface().children(body), &[container]);
    assert_eq!(cropper.surface().parent(image), Some(container));
    assert_eq!(cropper.container_size(), Size::new(400.0, 300.0));
    assert_eq!(cropper.surface().style(image, "width"), Some("400px"));
    assert_eq!(cropper.image().unwrap().display, Size::new(400.0, 300.0));
    assert_eq!((cropper.options().xscale, cropper.options().yscale), (2.0, 2.0));
}

#[test]
fn test_selection_reported_in_true_scale() {
    let (mut cropper, _, _) = image_cropper(Size::new(800.0, 600.0), |o| {
        o.box_width = Some(400.0);
        o.box_height = Some(400.0);
    });
    let id = cropper.new_selection();
    let log = EventLog::attach(&mut cropper);

    cropper.set_select(&[100.0, 100.0, 200.0, 200.0]).unwrap();
    assert_eq!(cropper.get_selection(), Rect::from_xywh(50.0, 50.0, 100.0, 100.0));
    assert_eq!(cropper.true_selection(), Rect::from_xywh(100.0, 100.0, 200.0, 200.0));
    assert_eq!(
        log.of(EventKind::Move),
        vec![CropEvent::Move {
            selection: id,
            rect: Rect::from_xywh(100.0, 100.0, 200.0, 200.0),
        }]
    );
}

#[test]
fn test_image_within_box_is_unscaled() {
    let (cropper, _, image) = image_cropper(Size::new(300.0, 200.0), |o| {
        o.box_width = Some(400.0);
        o.box_height = Some(400.0);
    });
    assert_eq!(cropper.container_size(), Size::new(300.0, 200.0));
    assert_eq!(cropper.options().scale().x, 1.0);
    assert_eq!(cropper.surface().style(image, "display"), Some("block"));
}

#[test]
fn test_true_size_sets_scale() {
    let (mut cropper, id) = TestCropperBuilder::new()
        .with_options(|o| o.true_size = Some([1000.0, 1000.0]))
        .build_with_selection([200.0, 200.0, 400.0, 400.0]);
    assert_eq!(cropper.get_selection(), Rect::from_xywh(100.0, 100.0, 200.0, 200.0));

    let log = EventLog::attach(&mut cropper);
    let se = handle(&cropper, id, Direction::SE);
    drag(&mut cropper, se, (300.0, 300.0), (350.0, 350.0));

    assert_eq!(cropper.get_selection(), Rect::from_xywh(100.0, 100.0, 250.0, 250.0));
    assert_eq!(
        log.of(EventKind::End)[0].rect(),
        Some(Rect::from_xywh(200.0, 200.0, 500.0, 500.0))
    );
}

#[test]
fn test_scale_helpers_match_options() {
    let cropper = TestCropperBuilder::new()
        .with_options(|o| {
            o.xscale = 2.0;
            o.yscale = 4.0;
        })
        .build();
    let display = Rect::from_xywh(10.0, 10.0, 20.0, 20.0);
    let true_rect = cropper.unscale(&display);
    assert_eq!(true_rect, Rect::from_xywh(20.0, 40.0, 40.0, 80.0));
    assert_eq!(cropper.scale(&true_rect), display);
}

#[test]
fn test_set_image_recomputes_scale() {
    let (mut cropper, _, image) = image_cropper(Size::new(800.0, 600.0), |o| {
        o.box_width = Some(400.0);
        o.box_height = Some(400.0);
    });
    let log = EventLog::attach(&mut cropper);

    assert!(cropper.set_image(400.0, 200.0));
    assert_eq!(cropper.container_size(), Size::new(400.0, 200.0));
    assert_eq!(cropper.options().scale().x, 1.0);
    assert_eq!(
        log.of(EventKind::Image),
        vec![CropEvent::Image {
            image: Some(image),
            width: 400.0,
            height: 200.0,
        }]
    );

    assert!(cropper.set_image(1600.0, 1200.0));
    assert_eq!(cropper.container_size(), Size::new(400.0, 300.0));
    assert_eq!(cropper.options().scale().y, 4.0);
}

#[test]
fn test_set_image_recommits_each_selection_once() {
    for (width, height) in [(1600.0, 1200.0), (300.0, 200.0)] {
        let (mut cropper, _, _) = image_cropper(Size::new(800.0, 600.0), |o| {
            o.box_width = Some(400.0);
            o.box_height = Some(400.0);
        });
        cropper.new_selection();
        cropper.set_select(&[100.0, 100.0, 200.0, 200.0]).unwrap();
        let log = EventLog::attach(&mut cropper);

        assert!(cropper.set_image(width, height));
        assert_eq!(log.count(EventKind::Move), 1, "{width}x{height}");
        assert_eq!(log.count(EventKind::Image), 1);
    }
}

#[test]
fn test_set_image_without_image_is_ignored() {
    let mut cropper = TestCropperBuilder::new().build();
    assert!(!cropper.set_image(100.0, 100.0));
}

#[test]
fn test_selection_follows_smaller_container() {
    let (mut cropper, id) = TestCropperBuilder::new().build_with_selection([300.0, 300.0, 150.0, 150.0]);
    cropper.resize_container(400.0, 400.0);

    let rect = cropper.selection(id).unwrap().get();
    assert_eq!(rect, Rect::from_xywh(300.0, 300.0, 100.0, 100.0));
    let container = cropper.container();
    assert_eq!(cropper.surface().size(container), Size::new(400.0, 400.0));
}

#[test]
fn test_destroy_puts_image_back() {
    let (mut cropper, body, image) = image_cropper(Size::new(800.0, 600.0), |o| {
        o.box_width = Some(400.0);
    });
    let container = cropper.container();
    cropper.new_selection();

    cropper.destroy();
    assert_eq!(cropper.surface().children(body), &[image]);
    assert_eq!(cropper.surface().parent(container), None);
    assert_eq!(cropper.surface().style(image, "display"), Some(""));
}
