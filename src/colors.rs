//! Named colors used by the bundled presets.

use palette::{Srgb, Srgba};

pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
pub const PINK: Srgb = Srgb::new(1.0, 0.753, 0.796);
pub const GRAY: Srgb = Srgb::new(0.5, 0.5, 0.5);
pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

/// Attaches an opacity to an opaque color.
///
/// Opacity is clamped to 0.0-1.0 so interpolation rounding never leaks an
/// out-of-range alpha to the surface.
#[inline]
pub fn with_opacity(color: Srgb, opacity: f32) -> Srgba {
    Srgba::new(color.red, color.green, color.blue, opacity.clamp(0.0, 1.0))
}

/// Compares two colors component-wise with a tolerance.
pub fn approx_eq(a: Srgb, b: Srgb, epsilon: f32) -> bool {
    let close = |x: f32, y: f32| x - y < epsilon && y - x < epsilon;
    close(a.red, b.red) && close(a.green, b.green) && close(a.blue, b.blue)
}
