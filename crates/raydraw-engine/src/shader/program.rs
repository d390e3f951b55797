use std::borrow::Cow;

use super::error::{ShaderError, ShaderResult};
use super::scope::{self, capabilities_for};
use super::source::{ShaderSources, ShaderStage};

/// A stage that parsed and validated, with the entry point found for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStage {
    pub stage: ShaderStage,
    pub entry_point: String,
}

/// Parses and validates WGSL for one stage without touching the GPU.
///
/// Validation assumes a device without optional features, so shaders that
/// need e.g. `f64` are rejected. The source must declare an entry point for
/// `stage`; the first one found is used.
pub fn validate_stage(stage: ShaderStage, source: &str) -> ShaderResult<ValidatedStage> {
    validate_stage_for(stage, source, wgpu::Features::empty())
}

/// Same as [`validate_stage`] for a device opened with `features`.
pub fn validate_stage_for(
    stage: ShaderStage,
    source: &str,
    features: wgpu::Features,
) -> ShaderResult<ValidatedStage> {
    validate_with_origin(stage, source, "<inline>", capabilities_for(features))
}

fn validate_with_origin(
    stage: ShaderStage,
    source: &str,
    origin: &str,
    capabilities: naga::valid::Capabilities,
) -> ShaderResult<ValidatedStage> {
    let Some(naga_stage) = stage.naga() else {
        return Err(ShaderError::UnsupportedStage(stage));
    };

    let compile_error = |diagnostic: String| ShaderError::Compile {
        stage,
        origin: origin.to_string(),
        diagnostic,
    };

    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| compile_error(e.emit_to_string(source)))?;

    naga::valid::Validator::new(naga::valid::ValidationFlags::all(), capabilities)
    .validate(&module)
    .map_err(|e| compile_error(e.emit_to_string(source)))?;

    let entry = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga_stage)
        .ok_or_else(|| compile_error(format!("no @{stage} entry point declared")))?;

    Ok(ValidatedStage {
        stage,
        entry_point: entry.name.clone(),
    })
}

/// Entry points of a program whose stage set links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramLayout {
    Graphics { vertex: String, fragment: String },
    Compute { compute: String },
}

/// Checks that validated stages form a program: either vertex + fragment,
/// or compute on its own.
pub fn link(stages: &[ValidatedStage]) -> ShaderResult<ProgramLayout> {
    let find = |stage: ShaderStage| {
        stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.entry_point.clone())
    };
    let fail = |reason: &str| {
        Err(ShaderError::Link {
            reason: reason.to_string(),
        })
    };

    if stages.is_empty() {
        return fail("no shader stages supplied");
    }
    if let Some(s) = stages.iter().find(|s| s.stage == ShaderStage::Geometry) {
        return Err(ShaderError::UnsupportedStage(s.stage));
    }

    match (find(ShaderStage::Vertex), find(ShaderStage::Fragment), find(ShaderStage::Compute)) {
        (None, None, Some(compute)) => Ok(ProgramLayout::Compute { compute }),
        (Some(vertex), Some(fragment), None) => Ok(ProgramLayout::Graphics { vertex, fragment }),
        (_, _, Some(_)) => fail("compute stage cannot be combined with graphics stages"),
        (Some(_), None, None) => fail("vertex stage has no fragment stage to feed"),
        (None, Some(_), None) => fail("fragment stage has no vertex stage"),
        (None, None, None) => fail("no shader stages supplied"),
    }
}

/// GPU shader module plus the entry point to bind.
#[derive(Debug)]
pub struct CompiledStage {
    pub module: wgpu::ShaderModule,
    pub entry_point: String,
}

/// A linked, GPU-ready shader program.
#[derive(Debug)]
pub enum ShaderProgram {
    Graphics {
        vertex: CompiledStage,
        fragment: CompiledStage,
    },
    Compute {
        compute: CompiledStage,
    },
}

impl ShaderProgram {
    /// Compiles every stage in `sources` against the features `device` was
    /// opened with, links them, then creates the shader modules on `device`.
    ///
    /// Module creation runs in a validation error scope; a rejection comes
    /// back as `ShaderError::Compile` for that stage.
    pub fn compile(device: &wgpu::Device, label: &str, sources: &ShaderSources) -> ShaderResult<Self> {
        let capabilities = capabilities_for(device.features());
        let validated = sources
            .iter()
            .map(|(stage, src)| validate_with_origin(stage, &src.text, &src.origin(), capabilities))
            .collect::<ShaderResult<Vec<_>>>()
            .inspect_err(|e| log::error!("{label}: {e}"))?;

        let layout = link(&validated).inspect_err(|e| log::error!("{label}: {e}"))?;

        let create = |stage: ShaderStage, entry_point: String| -> ShaderResult<CompiledStage> {
            // link() only succeeds for stages present in `sources`
            let src = sources.get(stage);
            let text = src.map(|s| s.text.as_str()).unwrap_or_default();
            let (module, error) = scope::validated(device, || {
                device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(&format!("{label} {stage}")),
                    source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(text)),
                })
            });

            match error {
                None => Ok(CompiledStage { module, entry_point }),
                Some(err) => {
                    let err = ShaderError::Compile {
                        stage,
                        origin: src.map(|s| s.origin()).unwrap_or_default(),
                        diagnostic: err.to_string(),
                    };
                    log::error!("{label}: {err}");
                    Err(err)
                }
            }
        };

        let program = match layout {
            ProgramLayout::Graphics { vertex, fragment } => ShaderProgram::Graphics {
                vertex: create(ShaderStage::Vertex, vertex)?,
                fragment: create(ShaderStage::Fragment, fragment)?,
            },
            ProgramLayout::Compute { compute } => ShaderProgram::Compute {
                compute: create(ShaderStage::Compute, compute)?,
            },
        };
        log::info!("built shader program '{label}'");
        Ok(program)
    }

    /// Vertex and fragment stages, or a link error for compute programs.
    pub fn graphics(&self) -> ShaderResult<(&CompiledStage, &CompiledStage)> {
        match self {
            ShaderProgram::Graphics { vertex, fragment } => Ok((vertex, fragment)),
            ShaderProgram::Compute { .. } => Err(ShaderError::Link {
                reason: "expected a vertex + fragment program, found compute".to_string(),
            }),
        }
    }

    /// Compute stage, or a link error for graphics programs.
    pub fn compute(&self) -> ShaderResult<&CompiledStage> {
        match self {
            ShaderProgram::Compute { compute } => Ok(compute),
            ShaderProgram::Graphics { .. } => Err(ShaderError::Link {
                reason: "expected a compute program, found vertex + fragment".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPHICS: &str = r#"
@vertex
fn vs_main(@location(0) pos: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(pos, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;

    const COMPUTE: &str = r#"
@group(0) @binding(0) var out_image: texture_storage_2d<rgba16float, write>;

@compute @workgroup_size(16, 16, 1)
fn cs_main(@builtin(global_invocation_id) id: vec3<u32>) {
    textureStore(out_image, vec2<i32>(id.xy), vec4<f32>(0.0, 0.0, 0.0, 1.0));
}
"#;

    const FLOAT64: &str = r#"
@group(0) @binding(0) var<storage, read_write> result: array<f32>;

@compute @workgroup_size(1, 1, 1)
fn cs_main() {
    var acc: f64 = 2.0lf;
    acc = acc * 3.0lf;
    result[0] = f32(acc);
}
"#;

    fn stage(stage: ShaderStage, entry: &str) -> ValidatedStage {
        ValidatedStage {
            stage,
            entry_point: entry.to_string(),
        }
    }

    #[test]
    fn finds_entry_points() {
        assert_eq!(validate_stage(ShaderStage::Vertex, GRAPHICS).unwrap().entry_point, "vs_main");
        assert_eq!(validate_stage(ShaderStage::Fragment, GRAPHICS).unwrap().entry_point, "fs_main");
        assert_eq!(validate_stage(ShaderStage::Compute, COMPUTE).unwrap().entry_point, "cs_main");
    }

    #[test]
    fn syntax_error_reports_stage_and_diagnostic() {
        let err = validate_stage(ShaderStage::Fragment, "@fragment fn fs_main( {").unwrap_err();
        match err {
            ShaderError::Compile {
                stage,
                origin,
                diagnostic,
            } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert_eq!(origin, "<inline>");
                assert!(!diagnostic.is_empty());
            }
            other => panic!("expected Compile, got {other:?}"),
        }
    }

    #[test]
    fn validation_error_is_compile_error() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = validate_stage(ShaderStage::Fragment, src).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn missing_entry_point_for_stage() {
        let err = validate_stage(ShaderStage::Vertex, COMPUTE).unwrap_err();
        match err {
            ShaderError::Compile { diagnostic, .. } => assert!(diagnostic.contains("@vertex")),
            other => panic!("expected Compile, got {other:?}"),
        }
    }

    #[test]
    fn geometry_is_unsupported() {
        let err = validate_stage(ShaderStage::Geometry, GRAPHICS).unwrap_err();
        assert!(matches!(err, ShaderError::UnsupportedStage(ShaderStage::Geometry)));
    }

    #[test]
    fn feature_gated_shader_needs_the_feature() {
        let err = validate_stage(ShaderStage::Compute, FLOAT64).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Compute, .. }));

        let ok = validate_stage_for(ShaderStage::Compute, FLOAT64, wgpu::Features::SHADER_F64).unwrap();
        assert_eq!(ok.entry_point, "cs_main");
    }

    #[test]
    fn links_graphics_pair() {
        let layout = link(&[
            stage(ShaderStage::Vertex, "vs_main"),
            stage(ShaderStage::Fragment, "fs_main"),
        ])
        .unwrap();
        assert_eq!(
            layout,
            ProgramLayout::Graphics {
                vertex: "vs_main".into(),
                fragment: "fs_main".into()
            }
        );
    }

    #[test]
    fn links_compute_alone() {
        let layout = link(&[stage(ShaderStage::Compute, "cs_main")]).unwrap();
        assert_eq!(layout, ProgramLayout::Compute { compute: "cs_main".into() });
    }

    #[test]
    fn link_rejects_bad_stage_sets() {
        let cases: Vec<Vec<ValidatedStage>> = vec![
            vec![],
            vec![stage(ShaderStage::Vertex, "vs_main")],
            vec![stage(ShaderStage::Fragment, "fs_main")],
            vec![
                stage(ShaderStage::Vertex, "vs_main"),
                stage(ShaderStage::Fragment, "fs_main"),
                stage(ShaderStage::Compute, "cs_main"),
            ],
        ];
        for stages in cases {
            assert!(
                matches!(link(&stages), Err(ShaderError::Link { .. })),
                "expected link failure for {stages:?}"
            );
        }
    }

    #[test]
    fn compile_error_message_names_stage() {
        let err = validate_stage(ShaderStage::Vertex, "fn").unwrap_err();
        assert!(err.to_string().starts_with("vertex shader (<inline>) failed to compile"));
    }
}
