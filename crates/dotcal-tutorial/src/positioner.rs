#![forbid(unsafe_code)]

//! Pointer-style popover positioning for tour steps.
//!
//! [`Positioner`] turns a measured [`Step`] into the top-left corner of the
//! popover box and the placement actually used. The computation runs in three
//! stages:
//!
//! 1. [`point_on_target`](Positioner::point_on_target): the point on the target
//!    the arrow touches, shifted up by the fixed navigation bar.
//! 2. [`box_origin`](Positioner::box_origin): the box origin that puts the
//!    arrow corner of the box on that point.
//! 3. [`resolve_placement`](Positioner::resolve_placement): if the candidate
//!    box leaves the viewport, pick the corner that keeps it on screen.
//!
//! The box is the measured content grown by one arrow height on each side.
//! Positioning is total: a step whose target is not mounted yet sits at the
//! origin with its declared placement.
//!
//! # Example
//!
//! ```ignore
//! let positioner = Positioner::new(Viewport::new(1280.0, 800.0));
//! let resolved = positioner.position(&step, Size::new(320.0, 140.0));
//! draw_popover(resolved.origin, resolved.placement);
//! ```

use dotcal_core::geometry::{Coordinate, DomRect, Size, Viewport};

use crate::config::{DEFAULT_ARROW_HEIGHT, DEFAULT_ARROW_WIDTH, DEFAULT_NAV_OFFSET};
use crate::step::{Edge, EdgeEnd, Placement, Side, Step};

/// Geometry constants for the popover and its arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionerConfig {
    /// Height of the pointer arrow.
    pub arrow_height: f64,
    /// Half-width of the arrow base.
    pub arrow_width: f64,
    /// Height of the fixed top navigation bar.
    pub nav_offset: f64,
}

impl Default for PositionerConfig {
    fn default() -> Self {
        Self {
            arrow_height: DEFAULT_ARROW_HEIGHT,
            arrow_width: DEFAULT_ARROW_WIDTH,
            nav_offset: DEFAULT_NAV_OFFSET,
        }
    }
}

impl PositionerConfig {
    /// Distance from the arrow corner to the arrow tip along the edge.
    #[inline]
    pub fn padding(&self) -> f64 {
        3.0 * self.arrow_height
    }

    /// Total box size for measured content.
    #[inline]
    pub fn box_size(&self, content: Size) -> Size {
        content.expand(2.0 * self.arrow_height)
    }
}

/// Output of [`Positioner::position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// Top-left corner of the popover box.
    pub origin: Coordinate,
    /// Placement after viewport correction.
    pub placement: Placement,
}

/// Computes popover positions against a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Positioner {
    pub viewport: Viewport,
    pub config: PositionerConfig,
}

impl Positioner {
    /// Create a positioner with the default geometry.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            config: PositionerConfig::default(),
        }
    }

    /// Replace the geometry constants.
    #[must_use]
    pub fn config(mut self, config: PositionerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the navigation bar offset.
    #[must_use]
    pub fn nav_offset(mut self, offset: f64) -> Self {
        self.config.nav_offset = offset;
        self
    }

    /// Set the arrow dimensions.
    #[must_use]
    pub fn arrow(mut self, height: f64, width: f64) -> Self {
        self.config.arrow_height = height;
        self.config.arrow_width = width;
        self
    }

    /// The point on the step target the arrow touches.
    ///
    /// Returns [`Coordinate::ZERO`] when the target has not been measured.
    pub fn point_on_target(&self, step: &Step) -> Coordinate {
        let Some(rect) = step.target else {
            return Coordinate::ZERO;
        };
        let top = rect.top - self.config.nav_offset;
        match step.side {
            Side::Left => Coordinate::new(rect.left, top + rect.height / 2.0),
            Side::Right => Coordinate::new(rect.right(), top + rect.height / 2.0),
            Side::Top => Coordinate::new(rect.center_x(), top),
            Side::Bottom => Coordinate::new(rect.center_x(), top + rect.height),
            Side::Center => Coordinate::new(rect.center_x(), top + rect.height / 2.0),
        }
    }

    /// Box origin that puts the arrow of `placement` on `point`.
    pub fn box_origin(&self, placement: Placement, point: Coordinate, box_size: Size) -> Coordinate {
        let p = self.config.padding();
        let Size { width, height } = box_size;
        let Coordinate { x, y } = point;
        match placement {
            Placement::TopLeft => Coordinate::new(x - p, y),
            Placement::TopRight => Coordinate::new(x - width + p, y),
            Placement::RightTop => Coordinate::new(x - width, y - p),
            Placement::RightBottom => Coordinate::new(x - width, y - height + p),
            Placement::BottomRight => Coordinate::new(x - width + p, y - height),
            Placement::BottomLeft => Coordinate::new(x - p, y - height),
            Placement::LeftBottom => Coordinate::new(x, y - height + p),
            Placement::LeftTop => Coordinate::new(x, y - p),
        }
    }

    /// Arrow tip for a box at `origin`; the inverse of [`box_origin`](Self::box_origin).
    pub fn pointer_tip(&self, placement: Placement, origin: Coordinate, box_size: Size) -> Coordinate {
        let p = self.config.padding();
        let Size { width, height } = box_size;
        let Coordinate { x, y } = origin;
        match placement {
            Placement::TopLeft => Coordinate::new(x + p, y),
            Placement::TopRight => Coordinate::new(x + width - p, y),
            Placement::RightTop => Coordinate::new(x + width, y + p),
            Placement::RightBottom => Coordinate::new(x + width, y + height - p),
            Placement::BottomRight => Coordinate::new(x + width - p, y + height),
            Placement::BottomLeft => Coordinate::new(x + p, y + height),
            Placement::LeftBottom => Coordinate::new(x, y + height - p),
            Placement::LeftTop => Coordinate::new(x, y + p),
        }
    }

    /// Pick the placement to use for a candidate box.
    ///
    /// The first overflowing side decides, checked top, bottom, left, right.
    /// Vertical overflow keeps the arrow on the top/bottom edge and picks the
    /// end by comparing the target's left edge with the window centre;
    /// horizontal overflow does the same with the target's top edge. If the
    /// chosen placement still overflows, the first other placement that fits
    /// wins. A candidate fully on screen keeps the declared placement.
    pub fn resolve_placement(&self, step: &Step, candidate: Coordinate, box_size: Size) -> Placement {
        let vp = self.viewport;
        if vp.contains_box(candidate, box_size) {
            return step.placement;
        }

        let target = step.target.unwrap_or_default();
        let horizontal_end = end_from(target.left < vp.center_x());
        let vertical_end = end_from(target.top < vp.center_y());

        let ruled = if candidate.y < 0.0 {
            Placement::new(Edge::Top, horizontal_end)
        } else if candidate.y + box_size.height > vp.height {
            Placement::new(Edge::Bottom, horizontal_end)
        } else if candidate.x < 0.0 {
            Placement::new(Edge::Left, vertical_end)
        } else {
            Placement::new(Edge::Right, vertical_end)
        };

        let point = self.point_on_target(step);
        let fits = |placement: Placement| {
            vp.contains_box(self.box_origin(placement, point, box_size), box_size)
        };
        if fits(ruled) {
            return ruled;
        }

        let mirrored = ruled.mirrored();
        [ruled.other_end(), mirrored, mirrored.other_end()]
            .into_iter()
            .chain(Placement::ALL)
            .find(|&placement| fits(placement))
            .unwrap_or(ruled)
    }

    /// Position the popover for `step` with the given content size.
    pub fn position(&self, step: &Step, content: Size) -> Resolved {
        if step.target.is_none() {
            return Resolved {
                origin: Coordinate::ZERO,
                placement: step.placement,
            };
        }

        let box_size = self.config.box_size(content);
        let point = self.point_on_target(step);
        let candidate = self.box_origin(step.placement, point, box_size);
        let placement = self.resolve_placement(step, candidate, box_size);
        let origin = if placement == step.placement {
            candidate
        } else {
            self.box_origin(placement, point, box_size)
        };

        if placement != step.placement {
            tracing::trace!(
                message = "positioner.flip",
                step = step.index,
                declared = ?step.placement,
                resolved = ?placement
            );
        }

        Resolved { origin, placement }
    }

    /// Whether a target must be scrolled before the popover can point at it.
    pub fn needs_scroll(&self, target: &DomRect) -> bool {
        self.viewport.is_out_of_view(target)
    }
}

fn end_from(leading: bool) -> EdgeEnd {
    if leading {
        EdgeEnd::Leading
    } else {
        EdgeEnd::Trailing
    }
}
