use crate::coords::Viewport;
use crate::device::Gpu;

/// Borrowed GPU handles a renderer needs to build or record work.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Color target format for render pipelines drawing to the surface.
    pub surface_format: wgpu::TextureFormat,
    /// Surface extent in physical pixels.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    /// Snapshot of `gpu` as it is configured right now.
    pub fn from_gpu(gpu: &'a Gpu<'_>) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            viewport: gpu.viewport(),
        }
    }
}

/// Frame encoder plus the swapchain view passes draw into.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
