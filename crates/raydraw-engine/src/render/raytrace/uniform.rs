use bytemuck::{Pod, Zeroable};

use crate::scene::SceneState;

/// Per-frame parameters for the compute shader (96 bytes, std140-compatible).
///
///  offset  0  camera_pos    vec3  + time
///  offset 16  camera_front  vec3  + aspect
///  offset 32  camera_right  vec3  + pad
///  offset 48  camera_up     vec3  + pad
///  offset 64  light_pos     vec3  + pad
///  offset 80  resolution    vec2  + pad
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RaytraceUniform {
    pub camera_pos: [f32; 3],
    pub time: f32,
    pub camera_front: [f32; 3],
    pub aspect: f32,
    pub camera_right: [f32; 3],
    pub _pad0: f32,
    pub camera_up: [f32; 3],
    pub _pad1: f32,
    pub light_pos: [f32; 3],
    pub _pad2: f32,
    pub resolution: [f32; 2],
    pub _pad3: [f32; 2],
}

impl RaytraceUniform {
    pub fn from_scene(scene: &SceneState) -> Self {
        let camera = &scene.camera;
        let viewport = scene.viewport();

        Self {
            camera_pos: camera.position().to_array(),
            time: scene.time,
            camera_front: camera.front().to_array(),
            aspect: viewport.aspect(),
            camera_right: camera.right().to_array(),
            _pad0: 0.0,
            camera_up: camera.up().to_array(),
            _pad1: 0.0,
            light_pos: scene.light_position.to_array(),
            _pad2: 0.0,
            resolution: [viewport.width as f32, viewport.height as f32],
            _pad3: [0.0; 2],
        }
    }
}
