use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::{ShaderError, ShaderResult};

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    Compute,
}

impl ShaderStage {
    /// Matching naga stage; `None` for stages the GPU API does not have.
    pub(crate) fn naga(self) -> Option<naga::ShaderStage> {
        match self {
            ShaderStage::Vertex => Some(naga::ShaderStage::Vertex),
            ShaderStage::Fragment => Some(naga::ShaderStage::Fragment),
            ShaderStage::Compute => Some(naga::ShaderStage::Compute),
            ShaderStage::Geometry => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// Reads a shader source file as UTF-8 text.
pub fn load_source(path: impl AsRef<Path>) -> ShaderResult<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| {
        log::error!("cannot read shader source {}: {source}", path.display());
        ShaderError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Source text of one stage plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSource {
    pub path: Option<PathBuf>,
    pub text: String,
}

impl StageSource {
    /// Human-readable origin used in diagnostics.
    pub fn origin(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => "<inline>".to_string(),
        }
    }
}

/// Stage → source mapping handed to `ShaderProgram::compile`.
///
/// One file may serve several stages (WGSL keeps vertex and fragment entry
/// points side by side); it is then listed once per stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderSources {
    stages: BTreeMap<ShaderStage, StageSource>,
}

impl ShaderSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `(stage, path)` pair from disk.
    pub fn load<P: AsRef<Path>>(paths: &[(ShaderStage, P)]) -> ShaderResult<Self> {
        paths
            .iter()
            .try_fold(Self::new(), |sources, (stage, path)| sources.with_file(*stage, path))
    }

    /// Adds a stage from in-memory text.
    pub fn with_source(mut self, stage: ShaderStage, text: impl Into<String>) -> Self {
        self.stages.insert(
            stage,
            StageSource {
                path: None,
                text: text.into(),
            },
        );
        self
    }

    /// Adds a stage read from `path`.
    pub fn with_file(mut self, stage: ShaderStage, path: impl AsRef<Path>) -> ShaderResult<Self> {
        let path = path.as_ref();
        let text = load_source(path)?;
        log::debug!("loaded {stage} shader from {}", path.display());
        self.stages.insert(
            stage,
            StageSource {
                path: Some(path.to_path_buf()),
                text,
            },
        );
        Ok(self)
    }

    pub fn get(&self, stage: ShaderStage) -> Option<&StageSource> {
        self.stages.get(&stage)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShaderStage, &StageSource)> {
        self.stages.iter().map(|(stage, src)| (*stage, src))
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
