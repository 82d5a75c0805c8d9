use super::{Filter, FilterContext};
use crate::constants::SHADE_PRIORITY;
use crate::geometry::Rect;
use crate::input::Direction;

/// Keeps the shade overlay framed around the active, linked selection.
///
/// Runs last and returns its input unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShadeFilter;

impl Filter for ShadeFilter {
    fn tag(&self) -> &str {
        "shader"
    }

    fn priority(&self) -> i32 {
        SHADE_PRIORITY
    }

    fn apply(&self, rect: Rect, _direction: Direction, ctx: &mut FilterContext<'_>) -> Rect {
        if ctx.selection.is_active() && ctx.selection.linked() {
            ctx.stage.update(&mut *ctx.surface, ctx.container, &rect);
        }
        rect
    }

    fn refresh(&self, ctx: &mut FilterContext<'_>) {
        if !ctx.selection.is_active() {
            return;
        }
        ctx.stage.show(&mut *ctx.surface);
        let rect = ctx.selection.get();
        ctx.stage.update(&mut *ctx.surface, ctx.container, &rect);
    }
}
