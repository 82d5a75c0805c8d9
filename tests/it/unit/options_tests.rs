//! Option defaults, JSON shape and deep merge.

use cropwidget::options::Edge;
use cropwidget::{CropError, Options};
use serde_json::json;

#[test]
fn test_defaults() {
    let options = Options::default();
    assert!(options.allow_select && options.can_drag && options.can_resize);
    assert!(!options.multi);
    assert_eq!(options.min_size, [8.0, 8.0]);
    assert_eq!(options.max_size, [0.0, 0.0]);
    assert_eq!(options.aspect_ratio, 0.0);
    assert_eq!(options.anim_duration, 400.0);
    assert_eq!(options.handles.len(), 8);
    assert_eq!(options.scale().x, 1.0);
}

#[test]
fn snapshot_edge_serialization() {
    let edge = Edge {
        n: 10.0,
        ..Default::default()
    };
    let json = serde_json::to_string(&edge).unwrap();
    insta::assert_snapshot!(json, @r#"{"n":10.0,"s":0.0,"e":0.0,"w":0.0}"#);
}

#[test]
fn test_keys_are_camel_case() {
    let value = serde_json::to_value(Options::default()).unwrap();
    assert!(value.get("aspectRatio").is_some());
    assert!(value.get("applyFilters").is_some());
    assert!(value["css"].get("dragBars").is_some());
    assert!(value.get("aspect_ratio").is_none());
}

#[test]
fn test_merged_patches_nested_objects() {
    let merged = Options::default()
        .merged(json!({
            "multi": true,
            "edge": { "n": 20 },
            "css": { "focus": "has-focus" }
        }))
        .unwrap();

    assert!(merged.multi);
    assert_eq!(merged.edge.n, 20.0);
    assert_eq!(merged.edge.s, 0.0);
    assert_eq!(merged.css.focus, "has-focus");
    assert_eq!(merged.css.current, "jcrop-current");
}

#[test]
fn test_merged_rejects_wrong_types() {
    let err = Options::default()
        .merged(json!({ "aspectRatio": "wide" }))
        .unwrap_err();
    assert!(matches!(err, CropError::InvalidOptions(_)));
}
