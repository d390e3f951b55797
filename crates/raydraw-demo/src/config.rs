use std::path::{Path, PathBuf};

use glam::Vec3;
use winit::dpi::PhysicalSize;

use raydraw_engine::camera::CameraControllerConfig;
use raydraw_engine::device::GpuInit;
use raydraw_engine::window::RuntimeConfig;

/// Overrides the directory shader files are loaded from.
pub const SHADER_DIR_ENV: &str = "RAYDRAW_SHADER_DIR";

/// Settings shared by both demo programs.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    /// Window client area in physical pixels.
    pub width: u32,
    pub height: u32,
    pub present_mode: wgpu::PresentMode,
    pub clear_color: wgpu::Color,
    pub shader_dir: PathBuf,
    pub camera_position: Vec3,
    pub controller: CameraControllerConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "raydraw".to_string(),
            width: 1920,
            height: 1080,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            shader_dir: default_shader_dir(),
            camera_position: Vec3::new(0.0, 1.0, 3.0),
            controller: CameraControllerConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn curve() -> Self {
        Self::default().title("raydraw curve")
    }

    pub fn raytrace() -> Self {
        Self::default().title("raydraw raytrace")
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shader_dir = dir.into();
        self
    }

    /// Path of a shader file inside `shader_dir`.
    pub fn shader_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.shader_dir.join(file)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: PhysicalSize::new(self.width, self.height),
            ..RuntimeConfig::default()
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit::default().with_present_mode(self.present_mode)
    }
}

/// `$RAYDRAW_SHADER_DIR` when set, else the `shaders/` directory of this crate.
fn default_shader_dir() -> PathBuf {
    std::env::var_os(SHADER_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders"))
}

#[cfg(test)]
mod tests {
    use raydraw_engine::shader::{validate_stage, ShaderSources, ShaderStage};

    use super::*;

    fn bundled() -> DemoConfig {
        DemoConfig::default().shader_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders"))
    }

    #[test]
    fn defaults_match_reference_window() {
        let config = DemoConfig::raytrace();
        let runtime = config.runtime_config();
        assert_eq!(runtime.initial_size, PhysicalSize::new(1920, 1080));
        assert_eq!(runtime.title, "raydraw raytrace");
        assert_eq!(config.gpu_init().present_mode, wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn builder_overrides() {
        let config = DemoConfig::curve().size(800, 600).shader_dir("/tmp/shaders");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.shader_path("curve.wgsl"), PathBuf::from("/tmp/shaders/curve.wgsl"));
    }

    #[test]
    fn bundled_shaders_validate() {
        let config = bundled();
        let cases = [
            ("curve.wgsl", ShaderStage::Vertex, "vs_main"),
            ("curve.wgsl", ShaderStage::Fragment, "fs_main"),
            ("blit.wgsl", ShaderStage::Vertex, "vs_main"),
            ("blit.wgsl", ShaderStage::Fragment, "fs_main"),
            ("raytrace.wgsl", ShaderStage::Compute, "cs_main"),
        ];

        for (file, stage, entry) in cases {
            let sources = ShaderSources::new()
                .with_file(stage, config.shader_path(file))
                .unwrap();
            let source = &sources.get(stage).unwrap().text;
            let validated = validate_stage(stage, source)
                .unwrap_or_else(|e| panic!("{file}: {e}"));
            assert_eq!(validated.entry_point, entry);
        }
    }
}
