//! Scene types: what the application submits for drawing.
//!
//! Responsibilities:
//! - per-object transforms (eager model-matrix recompute)
//! - the orthographic camera
//! - the FIFO render queue drained by the renderer once per frame

mod camera;
mod queue;
mod sprite;
mod transform;

pub use camera::Camera;
pub use queue::{RenderQueue, SpriteCmd};
pub use sprite::Sprite;
pub use transform::Transform;
