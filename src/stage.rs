//! Shade overlay darkening the area outside the active selection.

use crate::geometry::{Rect, Size};
use crate::surface::{NodeId, Surface};
use tracing::trace;

const SIDES: [&str; 4] = ["north", "east", "south", "west"];

/// Four absolutely positioned shades around the active selection.
#[derive(Debug)]
pub struct Stage {
    /// North, east, south, west
    shades: [NodeId; 4],
    visible: bool,
}

impl Stage {
    /// Create the shades inside `container`, hidden.
    pub fn new(
        surface: &mut dyn Surface,
        container: NodeId,
        css: &str,
        color: &str,
        opacity: f64,
    ) -> Self {
        let shades = SIDES.map(|side| {
            let class = format!("{css} {}", side_classes(css, side));
            let shade = surface.create_element("div", &[("class", class.as_str())]);
            surface.append(container, shade);
            shade
        });
        let mut stage = Self {
            shades,
            visible: false,
        };
        for shade in stage.shades {
            surface.set_style(
                shade,
                &[
                    ("position", "absolute".into()),
                    ("z-index", "5".into()),
                    ("display", "none".into()),
                ],
            );
        }
        stage.set_color(surface, color, opacity);
        stage
    }

    pub fn shades(&self) -> [NodeId; 4] {
        self.shades
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_color(&mut self, surface: &mut dyn Surface, color: &str, opacity: f64) {
        for shade in self.shades {
            surface.set_style(
                shade,
                &[
                    ("background-color", color.to_string()),
                    ("opacity", opacity.to_string()),
                ],
            );
        }
    }

    /// Position the shades around `rect`. Ignored while hidden.
    pub fn update(&mut self, surface: &mut dyn Surface, container: Size, rect: &Rect) {
        if !self.visible {
            return;
        }
        trace!(x = rect.x, y = rect.y, w = rect.w, h = rect.h, "update shades");

        let right = rect.x + rect.w;
        let bottom = rect.y + rect.h;
        let boxes = [
            (0.0, 0.0, container.width, rect.y),
            (right, rect.y, container.width - right, rect.h),
            (0.0, bottom, container.width, container.height - bottom),
            (0.0, rect.y, rect.x, rect.h),
        ];
        for (shade, (left, top, width, height)) in self.shades.into_iter().zip(boxes) {
            surface.set_style(
                shade,
                &[
                    ("left", px(left)),
                    ("top", px(top)),
                    ("width", px(width.max(0.0))),
                    ("height", px(height.max(0.0))),
                ],
            );
        }
    }

    pub fn show(&mut self, surface: &mut dyn Surface) {
        if self.visible {
            return;
        }
        for shade in self.shades {
            surface.set_style(shade, &[("display", "block".into())]);
        }
        self.visible = true;
    }

    pub fn hide(&mut self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        for shade in self.shades {
            surface.set_style(shade, &[("display", "none".into())]);
        }
        self.visible = false;
    }

    /// Remove the shade elements.
    pub fn destroy(&mut self, surface: &mut dyn Surface) {
        for shade in self.shades {
            surface.remove(shade);
        }
        self.visible = false;
    }
}

fn side_classes(css: &str, side: &str) -> String {
    css.split_whitespace()
        .map(|c| format!("{c}-{side}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn px(v: f64) -> String {
    format!("{v}px")
}
