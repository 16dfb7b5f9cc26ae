//! Color types shared between scene submission and renderers.

mod color;

pub use color::Color;
