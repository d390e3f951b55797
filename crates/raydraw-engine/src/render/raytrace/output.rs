use crate::coords::Viewport;

/// Format of the raytraced image: storage-writable and filterable.
pub const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Compute workgroup edge; must match `@workgroup_size` in the compute shader.
pub const WORKGROUP_SIZE: u32 = 16;

/// Workgroups needed to cover `extent` with one invocation per pixel.
pub fn workgroup_counts(extent: Viewport) -> (u32, u32, u32) {
    (
        extent.width.div_ceil(WORKGROUP_SIZE),
        extent.height.div_ceil(WORKGROUP_SIZE),
        1,
    )
}

/// What to do with the output image for a requested extent.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExtentPlan {
    /// Current image already matches.
    Keep,
    /// Destroy the current image (if any) and allocate one of the new size.
    Recreate,
    /// Zero-sized request; leave everything as is and skip the dispatch.
    Skip,
}

/// Decides how to bring an image of `current` extent to `requested`.
pub fn plan_extent(current: Option<Viewport>, requested: Viewport) -> ExtentPlan {
    if !requested.is_valid() {
        return ExtentPlan::Skip;
    }
    match current {
        Some(extent) if extent == requested => ExtentPlan::Keep,
        _ => ExtentPlan::Recreate,
    }
}

/// GPU image the compute pass writes into and the blit pass samples.
pub struct OutputImage {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    extent: Viewport,
}

impl OutputImage {
    pub fn new(device: &wgpu::Device, extent: Viewport) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("raydraw output image"),
            size: wgpu::Extent3d {
                width: extent.width,
                height: extent.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OUTPUT_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            extent,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn extent(&self) -> Viewport {
        self.extent
    }
}

impl Drop for OutputImage {
    fn drop(&mut self) {
        self.texture.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cover_full_hd() {
        // 1080 / 16 = 67.5, so the last row of groups is partial.
        assert_eq!(workgroup_counts(Viewport::new(1920, 1080)), (120, 68, 1));
    }

    #[test]
    fn counts_round_up() {
        assert_eq!(workgroup_counts(Viewport::new(800, 600)), (50, 38, 1));
        assert_eq!(workgroup_counts(Viewport::new(1, 1)), (1, 1, 1));
        assert_eq!(workgroup_counts(Viewport::new(16, 17)), (1, 2, 1));
    }

    #[test]
    fn counts_match_integer_formula() {
        for (w, h) in [(0, 0), (15, 31), (1023, 769), (4096, 2160)] {
            let (gx, gy, gz) = workgroup_counts(Viewport::new(w, h));
            assert_eq!((gx, gy, gz), ((w + 15) / 16, (h + 15) / 16, 1));
        }
    }

    #[test]
    fn first_request_allocates() {
        assert_eq!(plan_extent(None, Viewport::new(1920, 1080)), ExtentPlan::Recreate);
    }

    #[test]
    fn resize_recreates_then_keeps() {
        let full_hd = Viewport::new(1920, 1080);
        let small = Viewport::new(800, 600);

        assert_eq!(plan_extent(Some(full_hd), small), ExtentPlan::Recreate);
        assert_eq!(plan_extent(Some(small), small), ExtentPlan::Keep);
    }

    #[test]
    fn zero_extent_skips() {
        let full_hd = Viewport::new(1920, 1080);
        assert_eq!(plan_extent(Some(full_hd), Viewport::new(0, 600)), ExtentPlan::Skip);
        assert_eq!(plan_extent(None, Viewport::new(0, 0)), ExtentPlan::Skip);
    }
}
