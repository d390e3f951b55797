use std::path::PathBuf;

use thiserror::Error;

use super::source::ShaderStage;

/// Shader loading and program building failures.
#[derive(Error, Debug)]
pub enum ShaderError {
    /// Source file could not be read.
    #[error("failed to read shader source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stage failed to parse or validate, or lacks an entry point for its stage.
    #[error("{stage} shader ({origin}) failed to compile:\n{diagnostic}")]
    Compile {
        stage: ShaderStage,
        /// File path, or `<inline>` for sources passed as text.
        origin: String,
        diagnostic: String,
    },

    /// The stage set does not form a program.
    #[error("shader program failed to link: {reason}")]
    Link { reason: String },

    /// The GPU API has no equivalent of this stage.
    #[error("{0} shaders are not supported by the GPU backend")]
    UnsupportedStage(ShaderStage),
}

pub type ShaderResult<T> = std::result::Result<T, ShaderError>;
