use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};

use crate::render::{IndexBuffer, Mesh, RenderCtx, RenderTarget, Shader, VertexBuffer, VertexLayout};
use crate::scene::{Camera, RenderQueue, SpriteCmd};

/// Unit quad centered at the origin, spanning [-0.5, 0.5] in x/y.
const QUAD_VERTICES: [[f32; 3]; 4] = [
    [-0.5, -0.5, 0.0],
    [-0.5, 0.5, 0.0],
    [0.5, 0.5, 0.0],
    [0.5, -0.5, 0.0],
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    projection_view: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl SpriteInstance {
    /// CPU-side conversion of one queued sprite. Colors are clamped here so
    /// out-of-range channels never reach the GPU.
    fn from_cmd(cmd: &SpriteCmd) -> Self {
        Self {
            model: cmd.model.to_cols_array_2d(),
            color: cmd.color.clamped().to_array(),
        }
    }

    // Locations 2..=5 are the model matrix columns, 6 is the color;
    // location 0 is the quad position (location 1 is reserved for UVs).
    fn layout() -> VertexLayout {
        VertexLayout::from_formats(
            wgpu::VertexStepMode::Instance,
            2,
            &[
                wgpu::VertexFormat::Float32x4,
                wgpu::VertexFormat::Float32x4,
                wgpu::VertexFormat::Float32x4,
                wgpu::VertexFormat::Float32x4,
                wgpu::VertexFormat::Float32x4,
            ],
        )
    }
}

/// Renders queued sprites as instanced colored quads.
///
/// GPU resources are created lazily on first use and the pipeline is rebuilt
/// if the surface format changes. The instance buffer grows in powers of two
/// and is reused across frames.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    quad: Option<Mesh>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    instances: Vec<SpriteInstance>,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains `queue` and draws every submission in FIFO order with the given
    /// camera.
    ///
    /// Resource creation failures (shader compilation) are reported once per
    /// call site via the returned error; the queue is drained regardless so a
    /// failing frame does not accumulate stale submissions.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        queue: &mut RenderQueue,
        camera: &Camera,
    ) -> Result<()> {
        self.instances.clear();
        self.instances
            .extend(queue.drain().map(|cmd| SpriteInstance::from_cmd(&cmd)));

        if self.instances.is_empty() {
            return Ok(());
        }

        self.ensure_quad(ctx);
        self.ensure_pipeline(ctx)?;
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, self.instances.len());

        // Uploads happen before the pass borrows the buffers.
        if let Some(ubo) = self.camera_ubo.as_ref() {
            let u = CameraUniform {
                projection_view: camera.projection_view().to_cols_array_2d(),
            };
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return Ok(()) };
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return Ok(()) };
        let Some(bind_group) = self.bind_group.as_ref() else { return Ok(()) };
        let Some(quad) = self.quad.as_ref() else { return Ok(()) };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lily sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(quad.slot_count(), instance_vbo.slice(..));
        quad.draw(&mut rpass, 0..self.instances.len() as u32);

        Ok(())
    }

    fn ensure_quad(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_some() {
            return;
        }

        let layout = VertexLayout::from_formats(
            wgpu::VertexStepMode::Vertex,
            0,
            &[wgpu::VertexFormat::Float32x3],
        );

        let vbo = VertexBuffer::new(ctx.device, "lily sprite quad vbo", &QUAD_VERTICES, layout);
        let ibo = IndexBuffer::from_u16(ctx.device, "lily sprite quad ibo", &QUAD_INDICES);

        self.quad = Some(Mesh::new(vec![vbo]).with_index_buffer(ibo));
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return Ok(());
        }

        let shader = Shader::from_wgsl(
            ctx.device,
            "lily sprite shader",
            include_str!("shaders/sprite.wgsl"),
        )
        .context("sprite pipeline setup failed")?;

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("lily sprite bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: camera_ubo_min_binding_size(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("lily sprite pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let quad = self.quad.as_ref().context("quad mesh not initialized")?;
        let instance_layout = SpriteInstance::layout();

        let mut buffers = quad.vertex_layouts();
        buffers.push(instance_layout.buffer_layout());

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lily sprite pipeline"),
            layout: Some(&pipeline_layout),

            vertex: shader.vertex_state(&buffers),

            fragment: Some(shader.fragment_state(&[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(straight_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })])),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings are tied to the old layout; recreate them lazily.
        self.bind_group = None;
        self.camera_ubo = None;

        Ok(())
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lily sprite camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lily sprite bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<SpriteInstance>()) as u64;

        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lily sprite instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// `CameraUniform` is a mat4 (64 bytes), so the size is non-zero by
/// construction; centralising this avoids `.unwrap()` at the pipeline site.
fn camera_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use glam::Mat4;

    // ── instance conversion (CPU-side, no device needed) ──────────────────

    #[test]
    fn instance_upload_clamps_out_of_range_colors() {
        let cmd = SpriteCmd {
            model: Mat4::IDENTITY,
            color: Color::new(2.0, -1.0, 0.5, 1.5),
        };

        let instance = SpriteInstance::from_cmd(&cmd);
        assert_eq!(instance.color, [1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn instance_carries_model_matrix_columns() {
        let model = Mat4::from_translation(glam::Vec3::new(3.0, 4.0, 0.0));
        let cmd = SpriteCmd {
            model,
            color: Color::WHITE,
        };

        let instance = SpriteInstance::from_cmd(&cmd);
        assert_eq!(instance.model, model.to_cols_array_2d());
    }
}
