//! Process-wide name -> constructor table for filters.
//!
//! The built-in filters are registered on first access. Hosts may add their
//! own with [`register_filter`] before constructing a controller; names listed
//! in `applyFilters` that are not registered are skipped.

use super::{
    BackoffFilter, ConstrainFilter, ExtentFilter, RatioFilter, RoundFilter, ShadeFilter,
    SharedFilter,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Builds a fresh filter instance.
pub type FilterConstructor = fn() -> SharedFilter;

static REGISTRY: Lazy<RwLock<HashMap<String, FilterConstructor>>> = Lazy::new(|| {
    let builtins: [(&str, FilterConstructor); 6] = [
        ("constrain", || Rc::new(ConstrainFilter) as SharedFilter),
        ("extent", || Rc::new(ExtentFilter) as SharedFilter),
        ("ratio", || Rc::new(RatioFilter) as SharedFilter),
        ("backoff", || Rc::new(BackoffFilter) as SharedFilter),
        ("round", || Rc::new(RoundFilter) as SharedFilter),
        ("shader", || Rc::new(ShadeFilter) as SharedFilter),
    ];
    RwLock::new(
        builtins
            .into_iter()
            .map(|(name, ctor)| (name.to_string(), ctor))
            .collect(),
    )
});

/// Register (or replace) a filter constructor under `name`.
pub fn register_filter(name: impl Into<String>, constructor: FilterConstructor) {
    let name = name.into();
    debug!(filter = %name, "register filter");
    REGISTRY.write().insert(name, constructor);
}

/// Constructor registered under `name`, if any.
pub fn filter_constructor(name: &str) -> Option<FilterConstructor> {
    REGISTRY.read().get(name).copied()
}

/// Names of every registered filter, sorted.
pub fn registered_filters() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY.read().keys().cloned().collect();
    names.sort();
    names
}
