/// Surface and device options for `Gpu::new`.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format if the surface offers one.
    pub prefer_srgb: bool,

    /// Swap behavior. `Fifo` by default; `AutoNoVsync` runs uncapped where the
    /// platform allows. Explicit modes the surface lacks degrade to `Fifo`.
    pub present_mode: wgpu::PresentMode,

    /// `None` takes the first mode the surface reports.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Storage textures and compute shaders are core; nothing extra is needed.
    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Frames the CPU may queue ahead of presentation (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    pub fn with_present_mode(mut self, present_mode: wgpu::PresentMode) -> Self {
        self.present_mode = present_mode;
        self
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
