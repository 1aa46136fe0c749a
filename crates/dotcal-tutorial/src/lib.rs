#![forbid(unsafe_code)]

//! Onboarding tour overlay for the Dotcal scheduler.
//!
//! # Role in Dotcal
//! `dotcal-tutorial` walks a new user through the scheduler page with a
//! pointer-style popover anchored to one element per step.
//!
//! # Primary responsibilities
//! - **Positioner**: popover origin and placement from a measured target,
//!   corrected so the box stays inside the viewport.
//! - **Tour**: step index and overlay lifecycle, including the
//!   scroll-into-view detour and its debounce.
//! - **Arrow**: the two-layer triangle drawn on the popover edge.
//! - **Transitions**: overlay fade and the popover move between steps.
//!
//! # How it fits in the system
//! The host measures targets and content every render, builds [`Step`]s,
//! and asks [`Tour::frame`] for an [`OverlayFrame`]. User input and timers go
//! through [`Tour`]; the [`TourEffect`]s it returns are performed by the host.

pub mod arrow;
pub mod config;
pub mod positioner;
pub mod scroll_settle;
pub mod step;
pub mod tour;
pub mod transition;

pub use arrow::{ArrowGeometry, ArrowLayer, Rgb};
pub use config::{ConfigError, TutorialConfig};
pub use positioner::{Positioner, PositionerConfig, Resolved};
pub use scroll_settle::ScrollSettle;
pub use step::{Edge, EdgeEnd, Placement, Side, Step, StepDefinition, find_step, scheduler_tour};
pub use tour::{OverlayFrame, Tour, TourEffect, TourMsg, TourPhase};
pub use transition::{Easing, OverlayPhase, OverlayTransition, StepMove, TransitionTimings};
