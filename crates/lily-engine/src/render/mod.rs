//! GPU rendering subsystem.
//!
//! The sprite renderer consumes the scene's `RenderQueue` and issues wgpu
//! commands. It owns its GPU resources (pipeline, camera uniform, quad mesh,
//! instance buffer).
//!
//! Convention:
//! - CPU geometry lives in world units; the camera's projection-view matrix
//!   converts to clip space in the vertex shader.

mod ctx;
mod mesh;
mod shader;
mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{AttributeInfo, IndexBuffer, Mesh, VertexBuffer, VertexLayout};
pub use shader::Shader;
pub use sprite::SpriteRenderer;
