//! Unit tests for perf module.

use crate::helpers::{drag, frame, TestCropperBuilder};
use cropwidget::perf::{measure, OperationStats};
use std::cell::Cell;

#[test]
fn test_stats_window_keeps_recent_samples() {
    let mut stats = OperationStats::default();
    for ms in 1..=150 {
        stats.record(ms as f64);
    }
    assert_eq!(stats.count(), 150);
    assert_eq!(stats.min_ms(), 1.0);
    assert_eq!(stats.max_ms(), 150.0);
    // only the last 100 samples (51..=150) are averaged
    assert_eq!(stats.average(), 100.5);

    stats.reset();
    assert_eq!(stats.count(), 0);
    assert_eq!(stats.p95(), 0.0);
}

#[test]
fn test_measure_uses_supplied_clock() {
    let now = Cell::new(10.0);
    let (value, elapsed) = measure(
        || now.get(),
        || {
            now.set(14.5);
            "done"
        },
    );
    assert_eq!(value, "done");
    assert_eq!(elapsed, 4.5);
}

#[test]
fn test_pointer_moves_are_timed() {
    let (mut cropper, id) = TestCropperBuilder::new().build_with_selection([10.0, 10.0, 50.0, 50.0]);
    assert_eq!(cropper.move_stats().count(), 0);

    let body = frame(&cropper, id);
    drag(&mut cropper, body, (20.0, 20.0), (30.0, 30.0));
    assert_eq!(cropper.move_stats().count(), 1);
    // the headless clock does not advance on its own
    assert_eq!(cropper.move_stats().max_ms(), 0.0);
}
