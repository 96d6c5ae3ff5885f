//! Display abstraction and widgets for Beacon devices
//!
//! This crate provides:
//! - `GraphicsBackend` trait for rectangle-capable display drivers
//!   (TFT panels, OLEDs, a recording mock in tests)
//! - `SignalLadder` — the ascending bar-graph widget used for signal
//!   strength
//!
//! # Architecture
//!
//! Widgets never talk to hardware directly. They issue rectangle
//! primitives through `GraphicsBackend`, so the same widget renders on
//! any driver that can fill and outline rectangles. Colors are opaque
//! handles (packed pixel values, palette indices) meaningful only to
//! the driver.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod ladder;

// Re-export key types
pub use backend::{DisplayError, GraphicsBackend};
pub use ladder::{LadderError, SignalLadder};
