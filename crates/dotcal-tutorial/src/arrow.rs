#![forbid(unsafe_code)]

//! Arrow drawn on the popover edge.
//!
//! The arrow is two stacked triangles: an accent-coloured outer triangle and a
//! slightly smaller white one on top, offset inwards so only an accent outline
//! remains visible. Each layer is positioned relative to the popover box the
//! way an absolutely positioned element is, with one horizontal and one
//! vertical inset measured from a box edge.

use std::fmt;

use dotcal_core::geometry::{Coordinate, Size};

use crate::positioner::PositionerConfig;
use crate::step::{Edge, EdgeEnd, Placement};

/// How much smaller the inner triangle is than the outer one.
const INNER_SHRINK: f64 = 5.0;

/// Distance between the outer triangle and the box edge it sits on.
const OUTER_FROM_EDGE: f64 = 3.0;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Brand accent used for the arrow outline.
    pub const ACCENT: Self = Self::new(0xFA, 0x8B, 0x26);
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Direction the triangle tip points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointing {
    Up,
    Right,
    Down,
    Left,
}

impl Pointing {
    fn from_edge(edge: Edge) -> Self {
        match edge {
            Edge::Top => Self::Up,
            Edge::Right => Self::Right,
            Edge::Bottom => Self::Down,
            Edge::Left => Self::Left,
        }
    }
}

/// Horizontal inset from the box's left or right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalInset {
    Left(f64),
    Right(f64),
}

/// Vertical inset from the box's top or bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalInset {
    Top(f64),
    Bottom(f64),
}

/// One triangle of the arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowLayer {
    pub pointing: Pointing,
    /// Half of the triangle base (the transparent borders).
    pub half_base: f64,
    /// Triangle height (the coloured border).
    pub height: f64,
    pub color: Rgb,
    pub horizontal: HorizontalInset,
    pub vertical: VerticalInset,
}

impl ArrowLayer {
    fn new(placement: Placement, half_base: f64, height: f64, along: f64, from_edge: f64, color: Rgb) -> Self {
        let edge = placement.edge();
        let end = placement.end();
        let (horizontal, vertical) = match edge {
            Edge::Top | Edge::Bottom => {
                let h = match end {
                    EdgeEnd::Leading => HorizontalInset::Left(along),
                    EdgeEnd::Trailing => HorizontalInset::Right(along),
                };
                let v = if edge == Edge::Top {
                    VerticalInset::Top(from_edge)
                } else {
                    VerticalInset::Bottom(from_edge)
                };
                (h, v)
            }
            Edge::Left | Edge::Right => {
                let h = if edge == Edge::Left {
                    HorizontalInset::Left(from_edge)
                } else {
                    HorizontalInset::Right(from_edge)
                };
                let v = match end {
                    EdgeEnd::Leading => VerticalInset::Top(along),
                    EdgeEnd::Trailing => VerticalInset::Bottom(along),
                };
                (h, v)
            }
        };
        Self {
            pointing: Pointing::from_edge(edge),
            half_base,
            height,
            color,
            horizontal,
            vertical,
        }
    }

    /// Bounding size of the triangle.
    pub fn size(&self) -> Size {
        match self.pointing {
            Pointing::Up | Pointing::Down => Size::new(2.0 * self.half_base, self.height),
            Pointing::Left | Pointing::Right => Size::new(self.height, 2.0 * self.half_base),
        }
    }

    /// Top-left corner of the triangle's bounding box inside a box of `box_size`.
    pub fn origin_in(&self, box_size: Size) -> Coordinate {
        let size = self.size();
        let x = match self.horizontal {
            HorizontalInset::Left(d) => d,
            HorizontalInset::Right(d) => box_size.width - d - size.width,
        };
        let y = match self.vertical {
            VerticalInset::Top(d) => d,
            VerticalInset::Bottom(d) => box_size.height - d - size.height,
        };
        Coordinate::new(x, y)
    }
}

/// Both layers of the arrow for one resolved placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    pub placement: Placement,
    pub outer: ArrowLayer,
    pub inner: ArrowLayer,
}

impl ArrowGeometry {
    /// Compute the arrow for `placement`.
    pub fn new(placement: Placement, config: &PositionerConfig) -> Self {
        let along = 2.0 * config.arrow_height;
        let outer = ArrowLayer::new(
            placement,
            config.arrow_width,
            config.arrow_height,
            along,
            OUTER_FROM_EDGE,
            Rgb::ACCENT,
        );
        let inner = ArrowLayer::new(
            placement,
            config.arrow_width - INNER_SHRINK,
            config.arrow_height - INNER_SHRINK,
            along + INNER_SHRINK,
            OUTER_FROM_EDGE + INNER_SHRINK + 1.0,
            Rgb::WHITE,
        );
        Self {
            placement,
            outer,
            inner,
        }
    }
}
