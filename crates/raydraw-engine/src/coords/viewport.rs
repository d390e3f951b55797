/// Drawable area in physical pixels.
///
/// Screen-sized GPU resources (the raytrace output image, dispatch grids) are
/// sized from this.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// False while the window is minimized (zero-sized).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height; 1.0 for an invalid viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }
}
