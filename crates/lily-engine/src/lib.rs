//! Lily engine crate.
//!
//! A small 2D renderer: GPU device + window runtime, a sprite render queue,
//! an orthographic camera and per-object transforms.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod logging;
pub mod math;
pub mod paint;
pub mod render;
pub mod scene;
