//! Window + event-loop runtime.
//!
//! Owns the winit event loop, the single application window and its `Gpu`,
//! and drives the application's per-frame callback.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
