//! Committed geometry through the default filter pipeline with fractional
//! inputs.

use crate::helpers::{committed, drag, frame, handle, TestCropper, TestCropperBuilder};
use cropwidget::{Direction, NodeId, Rect, SelectionId};

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next()
    }
}

fn control_for(cropper: &TestCropper, id: SelectionId, direction: Direction) -> NodeId {
    if direction == Direction::Move {
        frame(cropper, id)
    } else {
        handle(cropper, id, direction)
    }
}

fn assert_inside(rect: Rect, width: f64, height: f64) {
    assert!(rect.is_consistent(1e-9), "inconsistent {rect:?}");
    assert!(rect.w >= 0.0 && rect.h >= 0.0, "negative size {rect:?}");
    assert!(rect.x >= -1e-9 && rect.y >= -1e-9, "past top-left {rect:?}");
    assert!(rect.x2 <= width + 1e-9 && rect.y2 <= height + 1e-9, "past container {rect:?}");
}

#[test]
fn test_east_drag_keeps_fractional_ratio() {
    let (mut cropper, id) =
        TestCropperBuilder::new().build_with_selection([100.0, 100.0, 90.0, 60.0]);
    cropper.update_selection_settings(id, |s| s.aspect_ratio = 1.5);

    let east = handle(&cropper, id, Direction::E);
    drag(&mut cropper, east, (190.0, 130.0), (201.0, 130.0));

    let rect = committed(&cropper, id);
    assert_eq!((rect.x, rect.y, rect.w), (100.0, 100.0, 101.0));
    assert!((rect.w / rect.h - 1.5).abs() < 1e-9, "{rect:?}");
}

#[test]
fn test_ratio_holds_for_every_direction() {
    let deltas = [(11.3, -7.7), (-13.9, 4.1), (23.7, 17.3), (-5.5, -31.25)];
    for ratio in [1.5, 4.0 / 3.0, 0.7] {
        for direction in Direction::ALL {
            for (dx, dy) in deltas {
                let (mut cropper, id) =
                    TestCropperBuilder::new().build_with_selection([150.0, 150.0, 120.0, 120.0]);
                cropper.update_selection_settings(id, |s| s.aspect_ratio = ratio);

                let target = control_for(&cropper, id, direction);
                drag(&mut cropper, target, (200.0, 200.0), (200.0 + dx, 200.0 + dy));

                let rect = committed(&cropper, id);
                assert_inside(rect, 500.0, 500.0);
                assert!(
                    (rect.w / rect.h - ratio).abs() < 1e-9,
                    "ratio {ratio} {direction} ({dx}, {dy}): {rect:?}"
                );
            }
        }
    }
}

#[test]
fn test_half_pixels_at_far_edges_stay_inside() {
    let (cropper, id) = TestCropperBuilder::new().build_with_selection([0.5, 0.0, 499.5, 50.0]);
    assert_eq!(committed(&cropper, id), Rect::from_edges(1.0, 0.0, 500.0, 50.0));

    let (cropper, id) = TestCropperBuilder::new().build_with_selection([10.0, 0.5, 50.0, 499.5]);
    assert_eq!(committed(&cropper, id), Rect::from_edges(10.0, 1.0, 60.0, 500.0));
}

#[test]
fn test_random_updates_commit_consistent_rects() {
    let mut rng = Lcg(0x5eed);
    let (mut cropper, id) = TestCropperBuilder::new()
        .with_size(500.0, 400.0)
        .with_options(|o| o.true_size = Some([850.0, 520.0]))
        .build_with_selection([100.0, 100.0, 200.0, 200.0]);

    for step in 0..200 {
        if step % 2 == 0 {
            let values = [
                rng.range(-100.0, 900.0),
                rng.range(-100.0, 600.0),
                rng.range(0.0, 500.0),
                rng.range(0.0, 400.0),
            ];
            cropper.set_select(&values).unwrap();
        } else {
            let direction = Direction::ALL[(rng.next() * 9.0) as usize % 9];
            let target = control_for(&cropper, id, direction);
            let to = (rng.range(-50.0, 550.0), rng.range(-50.0, 450.0));
            drag(&mut cropper, target, (250.0, 200.0), to);
        }

        let rect = committed(&cropper, id);
        assert_inside(rect, 500.0, 400.0);
        assert!(cropper.true_selection().is_consistent(1e-9));
    }
}
