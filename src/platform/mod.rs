//! Platform abstraction layer
//!
//! Backends (desktop window, console controller, scripted demo) translate
//! their raw devices into an [`InputState`] once per render frame.

pub mod input;

pub use input::{DemoPilot, InputState};
