//! Engine-facing contracts.
//!
//! Defines the stable interface between the window runtime and applications:
//! the `App` trait and the per-frame context handed to it.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
