#![forbid(unsafe_code)]

//! Core: geometry, preference storage, and logging setup.
//!
//! # Role in Dotcal UI
//! `dotcal-core` holds the pieces every other crate leans on: pixel-space
//! geometry for measured page elements, the [`PreferenceStore`] capability
//! that replaces ambient browser storage, and a single place to install a
//! `tracing` subscriber.
//!
//! [`PreferenceStore`]: preferences::PreferenceStore

pub mod geometry;
pub mod logging;
pub mod preferences;

pub use geometry::{Coordinate, DomRect, Size, Viewport};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceError, PreferenceStore};
