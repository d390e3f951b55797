//! Shader program builder.
//!
//! Loads WGSL source text from disk, compiles each stage (naga front end +
//! validator against the device's features, so diagnostics carry source
//! spans), checks that the stage set
//! forms a usable program ("link"), then creates the GPU shader modules.
//! Every failure is returned as a `ShaderError`; callers choose the policy.

mod error;
mod program;
mod scope;
mod source;

pub use error::{ShaderError, ShaderResult};
pub(crate) use scope::validated_pipeline;
pub use program::{link, validate_stage, validate_stage_for, CompiledStage, ProgramLayout, ShaderProgram, ValidatedStage};
pub use scope::capabilities_for;
pub use source::{load_source, ShaderSources, ShaderStage, StageSource};
