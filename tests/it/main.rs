//! Single test binary entry point.
//!
//! Every integration test is compiled into this one binary to keep linking
//! cheap.
//!
//! Structure:
//! - helpers: Controller builder, event recorder and gesture helpers
//! - integration: Gesture and command workflows against a headless surface
//! - unit: Public API of single components

mod helpers;
