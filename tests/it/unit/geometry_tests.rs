//! Rect, scale and box-fitting tests.

use cropwidget::{largest_box, CropError, Point, Rect, Scale};

#[test]
fn test_scale_and_unscale_are_inverse() {
    let scale = Scale::new(2.0, 0.5);
    let true_rect = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);

    let display = scale.scale(&true_rect);
    assert_eq!(display, Rect::from_xywh(5.0, 40.0, 15.0, 80.0));
    assert!(scale.unscale(&display).approx_eq(&true_rect, 1e-9));
}

#[test]
fn test_round_trip_with_non_dyadic_factors() {
    let factors = [(1.7, 1.3), (0.3, 3.0), (3.0 / 7.0, 1000.0 / 3.0), (1.1, 0.9)];
    let rects = [
        Rect::from_xywh(0.1, 0.2, 0.3, 0.7),
        Rect::from_xywh(12.34, 56.78, 98.76, 54.32),
        Rect::from_xywh(333.3, 0.0, 166.7, 499.9),
    ];
    for (xs, ys) in factors {
        let scale = Scale::new(xs, ys);
        for rect in rects {
            let there_and_back = scale.scale(&scale.unscale(&rect));
            assert!(there_and_back.approx_eq(&rect, 1e-9), "{xs}x{ys}: {there_and_back:?}");
            assert!(there_and_back.is_consistent(1e-9));

            let back_and_there = scale.unscale(&scale.scale(&rect));
            assert!(back_and_there.approx_eq(&rect, 1e-9), "{xs}x{ys}: {back_and_there:?}");
        }
    }
}

#[test]
fn test_invalid_scale_factors_fall_back_to_identity() {
    assert_eq!(Scale::new(0.0, f64::NAN), Scale::IDENTITY);
    assert_eq!(Scale::new(-3.0, f64::INFINITY), Scale::IDENTITY);
    assert_eq!(Scale::default(), Scale::IDENTITY);
}

#[test]
fn test_largest_box() {
    assert_eq!(largest_box(2.0, 400.0, 400.0), (400.0, 200.0));
    assert_eq!(largest_box(0.5, 400.0, 400.0), (200.0, 400.0));
    assert_eq!(largest_box(800.0 / 600.0, 400.0, 400.0), (400.0, 300.0));
}

#[test]
fn test_spanning_orders_corners() {
    let r = Rect::spanning(Point::new(80.0, 10.0), Point::new(20.0, 50.0));
    assert_eq!(r, Rect::from_edges(20.0, 10.0, 80.0, 50.0));
    assert_eq!((r.w, r.h), (60.0, 40.0));
}

#[test]
fn test_wrap_from_xywh() {
    let r = Rect::wrap_from_xywh(&[10.0, 10.0, 100.0, 50.0]).unwrap();
    assert_eq!(r.to_xywh(), [10.0, 10.0, 100.0, 50.0]);
    assert_eq!((r.x2, r.y2), (110.0, 60.0));

    let err = Rect::wrap_from_xywh(&[1.0, 2.0]).unwrap_err();
    assert!(matches!(err, CropError::InvalidCoordinates { len: 2 }));
    insta::assert_snapshot!(err.to_string(), @"coordinate array must have 4 values, got 2");
}

#[test]
fn test_contains_includes_edges() {
    let r = Rect::from_xywh(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(Point::new(10.0, 30.0)));
    assert!(r.contains(Point::new(15.0, 15.0)));
    assert!(!r.contains(Point::new(31.0, 15.0)));
}

#[test]
fn test_lerp_halfway() {
    let from = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
    let to = Rect::from_xywh(100.0, 50.0, 200.0, 100.0);
    assert_eq!(Rect::lerp(&from, &to, 0.5), Rect::from_xywh(50.0, 25.0, 150.0, 100.0));
    assert_eq!(Rect::lerp(&from, &to, 2.0), to);
}
