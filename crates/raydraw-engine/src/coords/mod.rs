//! Screen-space geometry shared by the runtime, scene state and renderers.

mod viewport;

pub use viewport::Viewport;
