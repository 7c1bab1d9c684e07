//! Glyphs for drawing stars.

/// Star glyphs from smallest to largest.
pub const STAR_CHARS: &[char] = &['·', '.', '+', '*', '✧', '✦'];

/// Pick a glyph for a star of the given size (1.0 to 3.5).
pub fn star_glyph(size: f32) -> char {
    let t = ((size - 1.0) / 2.5).clamp(0.0, 1.0);
    let idx = (t * STAR_CHARS.len() as f32) as usize;
    STAR_CHARS[idx.min(STAR_CHARS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_glyph_covers_range() {
        assert_eq!(star_glyph(1.0), '·');
        assert_eq!(star_glyph(3.49), '✦');
        assert_eq!(star_glyph(10.0), '✦');
        assert_eq!(star_glyph(0.0), '·');
    }
}
