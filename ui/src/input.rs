//! Conversion of pixel coordinates (as produced by a click on a scaled-up view
//! of the grid) into cell coordinates.

use std::fmt;
use std::str::FromStr;

/// Pixel position on a view where each cell is drawn as a square of
/// `dilation` pixels along each side.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelPos {
    pub x: usize,
    pub y: usize,
}
impl PixelPos {
    /// Returns the cell containing this pixel.
    ///
    /// # Panics
    ///
    /// This function panics if `dilation` is zero.
    pub fn to_cell(self, dilation: usize) -> (isize, isize) {
        assert!(dilation > 0, "Dilation must be positive");
        ((self.x / dilation) as isize, (self.y / dilation) as isize)
    }
}
impl fmt::Display for PixelPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
impl FromStr for PixelPos {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected PX,PY; got {:?}", s))?;
        let parse = |n: &str| {
            n.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid pixel coordinate {:?}: {}", n, e))
        };
        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}
