/// Glyphs from darkest to brightest.
pub const DEFAULT_GLYPH_RAMP: &str = " .:-=+*#%@";

#[derive(Debug)]
pub struct GfxConfig {
    /// Number of pixels along each side of a cell.
    pub dilation: usize,
    /// Glyphs used to draw cells, from darkest to brightest.
    pub glyphs: Vec<char>,
    /// Whether to draw cells using 24-bit ANSI background colors instead of
    /// glyphs.
    pub true_color: bool,
    /// Whether to clear the terminal before drawing each frame.
    pub clear_screen: bool,
}
impl Default for GfxConfig {
    fn default() -> Self {
        Self {
            dilation: 8,
            glyphs: DEFAULT_GLYPH_RAMP.chars().collect(),
            true_color: false,
            clear_screen: true,
        }
    }
}
impl GfxConfig {
    /// Returns the glyph for a luminance in the range `[0, 1]`. Values outside
    /// that range are clamped.
    pub fn glyph(&self, luminance: f64) -> char {
        let max = self.glyphs.len().saturating_sub(1);
        let idx = (luminance.max(0.0).min(1.0) * max as f64).round() as usize;
        self.glyphs.get(idx.min(max)).copied().unwrap_or(' ')
    }
}
