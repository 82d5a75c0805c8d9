//! Filter pipeline applied to every candidate rect before it is committed.
//!
//! Filters run in ascending [`Filter::priority`]; equal priorities keep
//! insertion order. Each stage receives the previous stage's output.
//!
//! | tag         | priority | effect                                          |
//! |-------------|----------|-------------------------------------------------|
//! | `constrain` | 10       | clamp edges to the container (minus edge insets)|
//! | `extent`    | 12       | enforce min/max size                            |
//! | `ratio`     | 20       | aspect-ratio lock                               |
//! | `backoff`   | 22       | revert to the last rect if below minimum        |
//! | `round`     | 90       | integer coordinates                             |
//! | `shader`    | 100      | move the shade overlay (rect unchanged)         |
//!
//! A filter only sees the selection through a shared reference and has no
//! access to the controller, so it cannot commit a rect itself.

mod backoff;
mod constrain;
mod extent;
mod ratio;
mod registry;
mod round;
mod shade;

pub use backoff::BackoffFilter;
pub use constrain::ConstrainFilter;
pub use extent::ExtentFilter;
pub use ratio::RatioFilter;
pub use registry::{filter_constructor, register_filter, registered_filters, FilterConstructor};
pub use round::RoundFilter;
pub use shade::ShadeFilter;

use crate::geometry::{Rect, Size};
use crate::input::Direction;
use crate::profile_scope;
use crate::selection::Selection;
use crate::stage::Stage;
use crate::surface::Surface;
use std::rc::Rc;

/// What a filter may look at and touch while it runs.
pub struct FilterContext<'a> {
    pub selection: &'a Selection,
    /// Container size in display units
    pub container: Size,
    pub stage: &'a mut Stage,
    pub surface: &'a mut dyn Surface,
}

impl FilterContext<'_> {
    /// Area a selection may occupy: the container shrunk by the selection's
    /// edge insets.
    pub fn bounds(&self) -> Rect {
        let edge = &self.selection.settings().edge;
        Rect::from_edges(
            edge.w,
            edge.n,
            self.container.width - edge.e,
            self.container.height - edge.s,
        )
    }
}

/// One stage of the pipeline.
pub trait Filter {
    /// Name used for removal by tag and in logs.
    fn tag(&self) -> &str;

    fn priority(&self) -> i32;

    /// Transform a candidate rect. The result is re-derived before the next
    /// stage trusts its `x2`/`y2`.
    fn apply(&self, rect: Rect, direction: Direction, ctx: &mut FilterContext<'_>) -> Rect;

    /// Called once when the filter joins a controller or selection.
    fn init(&self) {}

    /// Called when the filter is removed.
    fn destroy(&self) {}

    /// Called when the owning selection refreshes.
    fn refresh(&self, _ctx: &mut FilterContext<'_>) {}
}

/// Filter instances are shared between the controller and its selections.
pub type SharedFilter = Rc<dyn Filter>;

/// Stable sort by ascending priority.
pub fn sort(filters: &mut [SharedFilter]) {
    filters.sort_by_key(|f| f.priority());
}

/// Run `filters` in order over `rect`.
pub fn run(
    filters: &[SharedFilter],
    rect: Rect,
    direction: Direction,
    ctx: &mut FilterContext<'_>,
) -> Rect {
    profile_scope!("filter_pipeline");
    filters
        .iter()
        .fold(rect, |acc, filter| filter.apply(acc, direction, ctx).rederive())
}
