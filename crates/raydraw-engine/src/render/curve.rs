use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{validated_pipeline, ShaderProgram, ShaderResult};

/// Number of sample points along the curve.
pub const CURVE_SEGMENTS: usize = 100;

/// Sampled x interval.
pub const CURVE_X_MIN: f32 = -2.0;
pub const CURVE_X_MAX: f32 = 4.0;

/// Divisor that brings the curve's y values into clip space.
pub const CURVE_Y_SCALE: f32 = 20.0;

/// `y = -2x³ + 5x² - 7x + 9`
pub fn cubic(x: f32) -> f32 {
    -2.0 * x.powi(3) + 5.0 * x.powi(2) - 7.0 * x + 9.0
}

/// Samples the cubic at `segments` evenly spaced x values in
/// `[CURVE_X_MIN, CURVE_X_MAX]` and maps them to NDC.
///
/// x spans `[-1, 1]` exactly; y is `cubic(x) / CURVE_Y_SCALE` and may leave
/// clip space near the ends of the interval. Fewer than two points yield an
/// empty strip.
pub fn curve_vertices(segments: usize) -> Vec<CurveVertex> {
    if segments < 2 {
        return Vec::new();
    }

    let span = CURVE_X_MAX - CURVE_X_MIN;
    (0..segments)
        .map(|i| {
            let x = CURVE_X_MIN + span * i as f32 / (segments - 1) as f32;
            CurveVertex {
                pos: [
                    (x - CURVE_X_MIN) / span * 2.0 - 1.0,
                    cubic(x) / CURVE_Y_SCALE,
                ],
            }
        })
        .collect()
}

/// Draws the static cubic as a line strip on top of the cleared surface.
pub struct CurveRenderer {
    pipeline: wgpu::RenderPipeline,
    vbo: wgpu::Buffer,
    vertex_count: u32,
}

impl CurveRenderer {
    /// Builds the pipeline from a linked vertex + fragment program and uploads
    /// the curve once.
    pub fn new(ctx: &RenderCtx<'_>, program: &ShaderProgram) -> ShaderResult<Self> {
        let (vertex, fragment) = program.graphics()?;

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("raydraw curve pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = validated_pipeline(ctx.device, "curve pipeline", || {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("raydraw curve pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &vertex.module,
                    entry_point: Some(vertex.entry_point.as_str()),
                    compilation_options: Default::default(),
                    buffers: &[CurveVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &fragment.module,
                    entry_point: Some(fragment.entry_point.as_str()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineStrip,
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

        let vertices = curve_vertices(CURVE_SEGMENTS);
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("raydraw curve vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!("curve uploaded: {} vertices", vertices.len());

        Ok(Self {
            pipeline,
            vbo,
            vertex_count: vertices.len() as u32,
        })
    }

    pub fn render(&self, target: &mut RenderTarget<'_>) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("raydraw curve pass"),
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

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// One curve point in NDC (8 bytes, location 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CurveVertex {
    pub pos: [f32; 2],
}

impl CurveVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CurveVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn cubic_reference_points() {
        assert!(approx(cubic(0.0), 9.0));
        assert!(approx(cubic(1.0), 5.0));
        assert!(approx(cubic(-2.0), 59.0));
        assert!(approx(cubic(4.0), -67.0));
    }

    #[test]
    fn endpoints_map_to_clip_edges() {
        let v = curve_vertices(CURVE_SEGMENTS);
        assert_eq!(v.len(), 100);

        assert!(approx(v[0].pos[0], -1.0));
        assert!(approx(v[0].pos[1], 59.0 / 20.0));

        let last = v[99];
        assert!(approx(last.pos[0], 1.0));
        assert!(approx(last.pos[1], -67.0 / 20.0));
    }

    #[test]
    fn x_is_strictly_increasing() {
        let v = curve_vertices(CURVE_SEGMENTS);
        assert!(v.windows(2).all(|w| w[0].pos[0] < w[1].pos[0]));
    }

    #[test]
    fn two_points_span_interval() {
        let v = curve_vertices(2);
        assert_eq!(v.len(), 2);
        assert!(approx(v[0].pos[0], -1.0));
        assert!(approx(v[1].pos[0], 1.0));
    }

    #[test]
    fn degenerate_counts_are_empty() {
        assert!(curve_vertices(0).is_empty());
        assert!(curve_vertices(1).is_empty());
    }
}
