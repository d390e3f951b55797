use glam::Vec3;

/// Position of the animated point light at `t` seconds.
///
/// Drifts in a slow loop above and around the sphere cluster at z = -8.
pub fn orbiting_light(t: f32) -> Vec3 {
    Vec3::new(
        3.0 * (t * 0.5).sin(),
        4.0 + (t * 0.7).sin(),
        -8.0 + (t * 0.5).cos(),
    )
}
