//! Miscellaneous math functions

/// Wraps a signed coordinate onto the range `0..len` using floored (true)
/// modulo, so that `-1` maps to `len - 1`.
///
/// # Panics
///
/// This function panics if `len` is zero.
#[inline]
pub fn wrap(coord: isize, len: usize) -> usize {
    assert!(len > 0, "Cannot wrap onto an empty axis");
    coord.rem_euclid(len as isize) as usize
}

/// Gaussian bump centered on `mu`, rescaled to the range `[-1, 1]`.
///
/// Returns `1.0` when `u == mu` and approaches `-1.0` far away from `mu`.
#[inline]
pub fn gaussian_growth(u: f64, mu: f64, sigma: f64) -> f64 {
    let diff = u - mu;
    2.0 * (-diff * diff / (2.0 * sigma * sigma)).exp() - 1.0
}

/// Smooth shell function on `(0, 1)`, peaking at `1.0` when `r == 0.5` and
/// zero outside the open interval.
#[inline]
pub fn exponential_shell(r: f64) -> f64 {
    if r <= 0.0 || r >= 1.0 {
        0.0
    } else {
        (4.0 - 1.0 / (r * (1.0 - r))).exp()
    }
}

/// Perceived luminance of an 8-bit sRGB color, in the range `[0, 1]`.
pub fn luminance(color: colorous::Color) -> f64 {
    (0.2126 * color.r as f64 + 0.7152 * color.g as f64 + 0.0722 * color.b as f64) / 255.0
}
