//! Coordinate conversion for pointer input.
//!
//! Pointer events arrive in page coordinates; drag geometry works in
//! container-local display coordinates. Scroll is folded into the container's
//! page origin by the surface.

use crate::geometry::{Point, Rect};
use crate::surface::{NodeId, Surface};

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a page position to container-local coordinates
    #[inline]
    pub fn page_to_local(page: Point, container_origin: Point) -> Point {
        Point::new(page.x - container_origin.x, page.y - container_origin.y)
    }

    /// Convert a container-local position back to page coordinates
    #[inline]
    pub fn local_to_page(local: Point, container_origin: Point) -> Point {
        Point::new(local.x + container_origin.x, local.y + container_origin.y)
    }

    /// Page position to container-local, reading the origin from the surface
    #[inline]
    pub fn to_container(surface: &dyn Surface, container: NodeId, page: Point) -> Point {
        Self::page_to_local(page, surface.page_origin(container))
    }

    /// Square of `size` centered on `center`, clipped to `bounds`
    pub fn centered_box(center: Point, size: f64, bounds: &Rect) -> Rect {
        let half = size / 2.0;
        Rect::from_edges(
            (center.x - half).max(bounds.x),
            (center.y - half).max(bounds.y),
            (center.x + half).min(bounds.x2),
            (center.y + half).min(bounds.y2),
        )
    }
}
