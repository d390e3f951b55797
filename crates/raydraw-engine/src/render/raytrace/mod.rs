//! Compute-shader raytracer.
//!
//! Each frame runs two passes: a compute dispatch that writes one texel per
//! pixel into the output image, then a fullscreen-triangle blit that samples
//! it onto the surface. The output image always matches the surface extent.

mod output;
mod uniform;

pub use output::{
    plan_extent, workgroup_counts, ExtentPlan, OutputImage, OUTPUT_FORMAT, WORKGROUP_SIZE,
};
pub use uniform::RaytraceUniform;

use crate::coords::Viewport;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::SceneState;
use crate::shader::{validated_pipeline, ShaderProgram, ShaderResult};

/// Output image plus the bind groups that reference it.
struct OutputBindings {
    image: OutputImage,
    compute_bind_group: wgpu::BindGroup,
    blit_bind_group: wgpu::BindGroup,
}

pub struct RaytraceRenderer {
    compute_pipeline: wgpu::ComputePipeline,
    compute_bgl: wgpu::BindGroupLayout,

    blit_pipeline: wgpu::RenderPipeline,
    blit_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    uniform_buffer: wgpu::Buffer,

    output: Option<OutputBindings>,
}

impl RaytraceRenderer {
    /// Builds both pipelines. `compute` must be a compute program, `blit` a
    /// vertex + fragment program. The output image is allocated lazily by
    /// `ensure_extent`.
    pub fn new(
        ctx: &RenderCtx<'_>,
        compute: &ShaderProgram,
        blit: &ShaderProgram,
    ) -> ShaderResult<Self> {
        let compute_stage = compute.compute()?;
        let (blit_vs, blit_fs) = blit.graphics()?;

        // ── compute ─────────────────────────────────────────────────────────

        let compute_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("raydraw raytrace bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: OUTPUT_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<RaytraceUniform>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let compute_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("raydraw raytrace pipeline layout"),
            bind_group_layouts: &[&compute_bgl],
            immediate_size: 0,
        });

        let compute_pipeline = validated_pipeline(ctx.device, "raytrace pipeline", || {
            ctx.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("raydraw raytrace pipeline"),
                layout: Some(&compute_layout),
                module: &compute_stage.module,
                entry_point: Some(compute_stage.entry_point.as_str()),
                compilation_options: Default::default(),
                cache: None,
            })
        })?;

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("raydraw raytrace ubo"),
            size: std::mem::size_of::<RaytraceUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // ── blit ────────────────────────────────────────────────────────────

        let blit_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("raydraw blit bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let blit_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("raydraw blit pipeline layout"),
            bind_group_layouts: &[&blit_bgl],
            immediate_size: 0,
        });

        let blit_pipeline = validated_pipeline(ctx.device, "blit pipeline", || {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("raydraw blit pipeline"),
                layout: Some(&blit_layout),
                vertex: wgpu::VertexState {
                    module: &blit_vs.module,
                    entry_point: Some(blit_vs.entry_point.as_str()),
                    compilation_options: Default::default(),
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &blit_fs.module,
                    entry_point: Some(blit_fs.entry_point.as_str()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
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
            })
        })?;

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("raydraw blit sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            compute_pipeline,
            compute_bgl,
            blit_pipeline,
            blit_bgl,
            sampler,
            uniform_buffer,
            output: None,
        })
    }

    /// Extent of the current output image, if one is allocated.
    pub fn output_extent(&self) -> Option<Viewport> {
        self.output.as_ref().map(|o| o.image.extent())
    }

    /// Makes the output image match `viewport`, reallocating when it differs.
    ///
    /// Returns true when a new image was allocated. Zero extents keep the
    /// current image.
    pub fn ensure_extent(&mut self, ctx: &RenderCtx<'_>, viewport: Viewport) -> bool {
        match plan_extent(self.output_extent(), viewport) {
            ExtentPlan::Keep | ExtentPlan::Skip => false,
            ExtentPlan::Recreate => {
                // Old image and its bind groups go first.
                self.output = None;
                self.output = Some(self.create_output(ctx.device, viewport));
                log::info!(
                    "output image re-provisioned at {}x{}",
                    viewport.width,
                    viewport.height
                );
                true
            }
        }
    }

    /// Raytraces `scene` into the output image and blits it to `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &SceneState) {
        self.ensure_extent(ctx, scene.viewport());
        let Some(output) = self.output.as_ref() else { return };

        let uniform = RaytraceUniform::from_scene(scene);
        ctx.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        let (gx, gy, gz) = workgroup_counts(output.image.extent());
        {
            let mut cpass = target.encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("raydraw raytrace pass"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&self.compute_pipeline);
            cpass.set_bind_group(0, &output.compute_bind_group, &[]);
            cpass.dispatch_workgroups(gx, gy, gz);
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("raydraw blit pass"),
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

        rpass.set_pipeline(&self.blit_pipeline);
        rpass.set_bind_group(0, &output.blit_bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn create_output(&self, device: &wgpu::Device, extent: Viewport) -> OutputBindings {
        let image = OutputImage::new(device, extent);

        let compute_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("raydraw raytrace bind group"),
            layout: &self.compute_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(image.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let blit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("raydraw blit bind group"),
            layout: &self.blit_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(image.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        OutputBindings {
            image,
            compute_bind_group,
            blit_bind_group,
        }
    }
}
