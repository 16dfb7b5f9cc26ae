use anyhow::Result;

/// A compiled WGSL shader module carrying both stages.
///
/// Construction validates the source eagerly: wgpu reports WGSL errors through
/// an error scope rather than a return value, so one is pushed around module
/// creation and surfaced as an error here. Immutable after construction.
pub struct Shader {
    name: String,
    module: wgpu::ShaderModule,
    vs_entry: String,
    fs_entry: String,
}

impl Shader {
    /// Compiles a WGSL module with the default `vs_main`/`fs_main` entry points.
    pub fn from_wgsl(device: &wgpu::Device, name: &str, source: &str) -> Result<Self> {
        Self::from_wgsl_with_entries(device, name, source, "vs_main", "fs_main")
    }

    /// Compiles a WGSL module with explicit entry-point names.
    pub fn from_wgsl_with_entries(
        device: &wgpu::Device,
        name: &str,
        source: &str,
        vs_entry: &str,
        fs_entry: &str,
    ) -> Result<Self> {
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        // pop_error_scope resolves once the module has been processed.
        if let Some(err) = pollster::block_on(scope.pop()) {
            anyhow::bail!("failed to compile shader '{name}': {err}");
        }

        Ok(Self {
            name: name.to_string(),
            module,
            vs_entry: vs_entry.to_string(),
            fs_entry: fs_entry.to_string(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }

    /// Vertex state for pipeline creation.
    pub fn vertex_state<'a>(
        &'a self,
        buffers: &'a [wgpu::VertexBufferLayout<'a>],
    ) -> wgpu::VertexState<'a> {
        wgpu::VertexState {
            module: &self.module,
            entry_point: Some(&self.vs_entry),
            compilation_options: Default::default(),
            buffers,
        }
    }

    /// Fragment state for pipeline creation.
    pub fn fragment_state<'a>(
        &'a self,
        targets: &'a [Option<wgpu::ColorTargetState>],
    ) -> wgpu::FragmentState<'a> {
        wgpu::FragmentState {
            module: &self.module,
            entry_point: Some(&self.fs_entry),
            compilation_options: Default::default(),
            targets,
        }
    }
}
