use std::ops::Range;

use wgpu::util::DeviceExt;

/// One vertex attribute slot: where it lands in the shader and how its bytes
/// are interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    pub shader_location: u32,
    pub format: wgpu::VertexFormat,
    /// Byte offset from the start of the element.
    pub offset: u64,
}

/// Ordered attribute list for one vertex buffer.
///
/// Offsets and the element stride are derived from the attribute formats, so
/// layouts stay consistent with the data they describe.
#[derive(Debug, Clone)]
pub struct VertexLayout {
    attributes: Vec<wgpu::VertexAttribute>,
    stride: u64,
    step_mode: wgpu::VertexStepMode,
}

impl VertexLayout {
    /// Builds a tightly packed layout from formats, assigning consecutive
    /// shader locations starting at `first_location`.
    pub fn from_formats(
        step_mode: wgpu::VertexStepMode,
        first_location: u32,
        formats: &[wgpu::VertexFormat],
    ) -> Self {
        let mut attributes = Vec::with_capacity(formats.len());
        let mut offset = 0u64;

        for (i, format) in formats.iter().enumerate() {
            attributes.push(wgpu::VertexAttribute {
                format: *format,
                offset,
                shader_location: first_location + i as u32,
            });
            offset += format.size();
        }

        Self {
            attributes,
            stride: offset,
            step_mode,
        }
    }

    /// Builds a layout from explicit attribute descriptors.
    ///
    /// The stride is the end of the furthest attribute; descriptors may be
    /// sparse or out of order.
    pub fn from_attributes(step_mode: wgpu::VertexStepMode, infos: &[AttributeInfo]) -> Self {
        let attributes: Vec<wgpu::VertexAttribute> = infos
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: a.format,
                offset: a.offset,
                shader_location: a.shader_location,
            })
            .collect();

        let stride = attributes
            .iter()
            .map(|a| a.offset + a.format.size())
            .max()
            .unwrap_or(0);

        Self {
            attributes,
            stride,
            step_mode,
        }
    }

    #[inline]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    #[inline]
    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    /// The wgpu layout, borrowing this layout's attribute storage.
    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: self.step_mode,
            attributes: &self.attributes,
        }
    }
}

/// A device-side vertex buffer plus the layout describing its bytes.
///
/// The underlying GPU buffer is released when this value drops.
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
    layout: VertexLayout,
    vertex_count: u32,
}

impl VertexBuffer {
    /// Uploads `contents` (any POD vertex type) as a vertex buffer.
    ///
    /// `contents` must be a whole number of elements of `layout.stride()`.
    pub fn new<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        contents: &[T],
        layout: VertexLayout,
    ) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(contents);
        debug_assert!(
            layout.stride() > 0 && bytes.len() as u64 % layout.stride() == 0,
            "vertex data is not a whole number of elements"
        );
        let vertex_count = (bytes.len() as u64 / layout.stride().max(1)) as u32;

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            buffer,
            layout,
            vertex_count,
        }
    }

    #[inline]
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// A device-side index buffer (`u16` or `u32` indices).
pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
    format: wgpu::IndexFormat,
}

impl IndexBuffer {
    pub fn from_u16(device: &wgpu::Device, label: &str, indices: &[u16]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            buffer,
            count: indices.len() as u32,
            format: wgpu::IndexFormat::Uint16,
        }
    }

    pub fn from_u32(device: &wgpu::Device, label: &str, indices: &[u32]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            buffer,
            count: indices.len() as u32,
            format: wgpu::IndexFormat::Uint32,
        }
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn format(&self) -> wgpu::IndexFormat {
        self.format
    }
}

/// One or more vertex buffers plus an optional index buffer.
///
/// Buffer-to-slot assignment is fixed at construction: vertex buffers occupy
/// consecutive slots starting at 0. There is no re-binding protocol; build a
/// new mesh for a different composition.
pub struct Mesh {
    vertex_buffers: Vec<VertexBuffer>,
    index_buffer: Option<IndexBuffer>,
}

impl Mesh {
    pub fn new(vertex_buffers: Vec<VertexBuffer>) -> Self {
        debug_assert!(!vertex_buffers.is_empty(), "mesh needs at least one vertex buffer");
        Self {
            vertex_buffers,
            index_buffer: None,
        }
    }

    pub fn with_index_buffer(mut self, index_buffer: IndexBuffer) -> Self {
        self.index_buffer = Some(index_buffer);
        self
    }

    /// Layouts for pipeline creation, in slot order.
    pub fn vertex_layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.vertex_buffers
            .iter()
            .map(|vb| vb.layout().buffer_layout())
            .collect()
    }

    /// Number of vertex-buffer slots this mesh occupies (further buffers, e.g.
    /// per-instance data, start at this slot).
    #[inline]
    pub fn slot_count(&self) -> u32 {
        self.vertex_buffers.len() as u32
    }

    #[inline]
    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.index_buffer.as_ref()
    }

    /// Binds all vertex buffers (and the index buffer, if any) to the pass.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        for (slot, vb) in self.vertex_buffers.iter().enumerate() {
            rpass.set_vertex_buffer(slot as u32, vb.buffer().slice(..));
        }
        if let Some(ib) = &self.index_buffer {
            rpass.set_index_buffer(ib.buffer.slice(..), ib.format);
        }
    }

    /// Binds and draws the whole mesh for the given instance range.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, instances: Range<u32>) {
        self.bind(rpass);
        match &self.index_buffer {
            Some(ib) => rpass.draw_indexed(0..ib.count, 0, instances),
            None => {
                let count = self.vertex_buffers[0].vertex_count();
                rpass.draw(0..count, instances);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::VertexFormat;

    // ── layout construction (CPU-side, no device needed) ──────────────────

    #[test]
    fn from_formats_packs_offsets_tightly() {
        let layout = VertexLayout::from_formats(
            wgpu::VertexStepMode::Vertex,
            0,
            &[VertexFormat::Float32x3, VertexFormat::Float32x4],
        );

        let attrs = layout.attributes();
        assert_eq!(attrs[0].offset, 0);
        assert_eq!(attrs[0].shader_location, 0);
        assert_eq!(attrs[1].offset, 12);
        assert_eq!(attrs[1].shader_location, 1);
        assert_eq!(layout.stride(), 12 + 16);
    }

    #[test]
    fn from_formats_respects_first_location() {
        let layout = VertexLayout::from_formats(
            wgpu::VertexStepMode::Instance,
            2,
            &[VertexFormat::Float32x4, VertexFormat::Float32x4],
        );

        let locations: Vec<u32> = layout.attributes().iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![2, 3]);
    }

    #[test]
    fn from_attributes_derives_stride_from_furthest_attribute() {
        let layout = VertexLayout::from_attributes(
            wgpu::VertexStepMode::Vertex,
            &[
                AttributeInfo {
                    shader_location: 1,
                    format: VertexFormat::Float32x2,
                    offset: 16,
                },
                AttributeInfo {
                    shader_location: 0,
                    format: VertexFormat::Float32x4,
                    offset: 0,
                },
            ],
        );

        assert_eq!(layout.stride(), 16 + 8);
    }

    #[test]
    fn buffer_layout_reflects_step_mode() {
        let layout = VertexLayout::from_formats(
            wgpu::VertexStepMode::Instance,
            0,
            &[VertexFormat::Float32x2],
        );
        assert_eq!(layout.buffer_layout().step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.buffer_layout().array_stride, 8);
    }
}
