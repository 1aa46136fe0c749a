#![forbid(unsafe_code)]

//! Tour steps and the enums that describe how a popover attaches to them.
//!
//! A [`StepDefinition`] is the static part of a step (copy, placement, side).
//! A [`Step`] is what the positioner consumes: the definition joined with the
//! target's bounding box measured during the current render. Steps are rebuilt
//! on every render and never cached.

use dotcal_core::geometry::DomRect;
use serde::{Deserialize, Serialize};

/// Which side of the target element the pointer touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    /// Midpoint of the target on both axes.
    Center,
}

/// An edge of the popover box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Which end of an edge the pointer sits near.
///
/// `Leading` is the left end of a horizontal edge or the top end of a
/// vertical edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    Leading,
    Trailing,
}

/// Which corner of the popover box holds the pointer.
///
/// The first word names the edge the arrow is drawn on, the second the end
/// of that edge it sits near. `TopLeft` therefore hangs the box below and to
/// the right of the point it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    TopLeft,
    TopRight,
    RightTop,
    RightBottom,
    BottomRight,
    BottomLeft,
    LeftBottom,
    LeftTop,
}

impl Placement {
    /// Every placement, clockwise starting from the top-left corner.
    pub const ALL: [Placement; 8] = [
        Placement::TopLeft,
        Placement::TopRight,
        Placement::RightTop,
        Placement::RightBottom,
        Placement::BottomRight,
        Placement::BottomLeft,
        Placement::LeftBottom,
        Placement::LeftTop,
    ];

    /// Build a placement from its edge and end.
    pub const fn new(edge: Edge, end: EdgeEnd) -> Self {
        match (edge, end) {
            (Edge::Top, EdgeEnd::Leading) => Self::TopLeft,
            (Edge::Top, EdgeEnd::Trailing) => Self::TopRight,
            (Edge::Right, EdgeEnd::Leading) => Self::RightTop,
            (Edge::Right, EdgeEnd::Trailing) => Self::RightBottom,
            (Edge::Bottom, EdgeEnd::Leading) => Self::BottomLeft,
            (Edge::Bottom, EdgeEnd::Trailing) => Self::BottomRight,
            (Edge::Left, EdgeEnd::Leading) => Self::LeftTop,
            (Edge::Left, EdgeEnd::Trailing) => Self::LeftBottom,
        }
    }

    /// Edge of the box the arrow is drawn on.
    pub const fn edge(self) -> Edge {
        match self {
            Self::TopLeft | Self::TopRight => Edge::Top,
            Self::RightTop | Self::RightBottom => Edge::Right,
            Self::BottomRight | Self::BottomLeft => Edge::Bottom,
            Self::LeftBottom | Self::LeftTop => Edge::Left,
        }
    }

    /// End of the edge the arrow sits near.
    pub const fn end(self) -> EdgeEnd {
        match self {
            Self::TopLeft | Self::BottomLeft | Self::RightTop | Self::LeftTop => EdgeEnd::Leading,
            Self::TopRight | Self::BottomRight | Self::RightBottom | Self::LeftBottom => {
                EdgeEnd::Trailing
            }
        }
    }

    /// Same end, opposite edge (`TopLeft` <-> `BottomLeft`, `RightTop` <-> `LeftTop`).
    #[must_use]
    pub const fn mirrored(self) -> Self {
        let edge = match self.edge() {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        };
        Self::new(edge, self.end())
    }

    /// Same edge, other end (`TopLeft` <-> `TopRight`).
    #[must_use]
    pub const fn other_end(self) -> Self {
        let end = match self.end() {
            EdgeEnd::Leading => EdgeEnd::Trailing,
            EdgeEnd::Trailing => EdgeEnd::Leading,
        };
        Self::new(self.edge(), end)
    }

    /// Whether the arrow sits on a horizontal (top/bottom) edge.
    pub const fn is_vertical(self) -> bool {
        matches!(self.edge(), Edge::Top | Edge::Bottom)
    }
}

/// Static description of one tour step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub header: String,
    pub text: String,
    /// Placement used when the box fits on screen.
    pub placement: Placement,
    /// Side of the target the pointer touches.
    pub side: Side,
}

impl StepDefinition {
    /// Create a definition.
    pub fn new(
        header: impl Into<String>,
        text: impl Into<String>,
        placement: Placement,
        side: Side,
    ) -> Self {
        Self {
            header: header.into(),
            text: text.into(),
            placement,
            side,
        }
    }

    /// Join the definition with a fresh measurement of its target.
    pub fn measure(&self, index: usize, target: Option<DomRect>) -> Step {
        Step {
            index,
            target,
            side: self.side,
            placement: self.placement,
            header: self.header.clone(),
            text: self.text.clone(),
        }
    }
}

/// A step as seen by one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// 1-based position in the tour.
    pub index: usize,
    /// Bounding box of the target, `None` if it is not mounted yet.
    pub target: Option<DomRect>,
    pub side: Side,
    /// Declared placement, before any viewport correction.
    pub placement: Placement,
    pub header: String,
    pub text: String,
}

impl Step {
    /// Create a step with no copy, mostly useful in tests.
    pub fn new(index: usize, side: Side, placement: Placement) -> Self {
        Self {
            index,
            target: None,
            side,
            placement,
            header: String::new(),
            text: String::new(),
        }
    }

    /// Set the measured target box.
    #[must_use]
    pub fn target(mut self, rect: DomRect) -> Self {
        self.target = Some(rect);
        self
    }

    /// Build the steps for one render from definitions and measurements.
    ///
    /// Indices are assigned 1..=N in definition order. Missing measurements
    /// (a shorter iterator) leave the target unset.
    pub fn measure_all<I>(definitions: &[StepDefinition], rects: I) -> Vec<Step>
    where
        I: IntoIterator<Item = Option<DomRect>>,
    {
        let mut rects = rects.into_iter();
        definitions
            .iter()
            .enumerate()
            .map(|(i, def)| def.measure(i + 1, rects.next().flatten()))
            .collect()
    }
}

/// Find the step with the given 1-based index.
pub fn find_step(steps: &[Step], index: usize) -> Option<&Step> {
    steps.iter().find(|step| step.index == index)
}

/// The scheduler page walkthrough shown to new users.
pub fn scheduler_tour() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(
            "Welcome to your Dotcal",
            "From here you can see your availability and instantly schedule meetings.",
            Placement::TopLeft,
            Side::Bottom,
        ),
        StepDefinition::new(
            "See it in action",
            "When you click a connection or group, you will see when you're all available.",
            Placement::LeftTop,
            Side::Right,
        ),
        StepDefinition::new(
            "This is your scheduler",
            "You can click on a time that everyone is free to instantly schedule a meeting.",
            Placement::RightTop,
            Side::Center,
        ),
        StepDefinition::new(
            "See who's here",
            "See connection status of everyone and diagnose any availability issues.",
            Placement::TopRight,
            Side::Bottom,
        ),
        StepDefinition::new(
            "Add your first connection",
            "Share your connection link or send a direct invite to start scheduling today.",
            Placement::LeftTop,
            Side::Right,
        ),
    ]
}
