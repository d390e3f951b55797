use super::error::{ShaderError, ShaderResult};

/// Naga validator capabilities a device with `features` can run.
///
/// The baseline is what core WebGPU guarantees; optional shader features
/// only widen it when the device was opened with them.
pub fn capabilities_for(features: wgpu::Features) -> naga::valid::Capabilities {
    use naga::valid::Capabilities as Caps;

    let mut caps = Caps::default();
    caps.set(Caps::FLOAT64, features.contains(wgpu::Features::SHADER_F64));
    caps.set(Caps::SHADER_FLOAT16, features.contains(wgpu::Features::SHADER_F16));
    caps.set(Caps::SHADER_INT64, features.contains(wgpu::Features::SHADER_INT64));
    caps.set(
        Caps::PRIMITIVE_INDEX,
        features.contains(wgpu::Features::SHADER_PRIMITIVE_INDEX),
    );
    caps.set(
        Caps::DUAL_SOURCE_BLENDING,
        features.contains(wgpu::Features::DUAL_SOURCE_BLENDING),
    );
    caps
}

/// Runs `create` inside a validation error scope on `device`.
///
/// wgpu reports invalid descriptors through the device error handler, which
/// panics by default; the scope turns them into a value instead.
pub(crate) fn validated<T>(
    device: &wgpu::Device,
    create: impl FnOnce() -> T,
) -> (T, Option<wgpu::Error>) {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    let error = pollster::block_on(scope.pop());
    (value, error)
}

/// Like [`validated`], mapping a captured error to `ShaderError::Link`.
///
/// Used for pipeline creation, where the failure is a mismatch between the
/// shader interface and the layout or targets it is bound to.
pub(crate) fn validated_pipeline<T>(
    device: &wgpu::Device,
    label: &str,
    create: impl FnOnce() -> T,
) -> ShaderResult<T> {
    match validated(device, create) {
        (value, None) => Ok(value),
        (_, Some(err)) => {
            let err = ShaderError::Link {
                reason: format!("{label}: {err}"),
            };
            log::error!("{err}");
            Err(err)
        }
    }
}
