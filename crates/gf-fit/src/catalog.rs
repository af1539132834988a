//! Glyph catalogs: ordered `(GlyphId, GlyphMask)` collections.
//!
//! Catalog order is the selector's primary tie-break, so builders push
//! glyphs in a fixed order and [`GlyphCatalog::push_unique`] keeps the first
//! of any duplicate masks.

use gf_core::block::{CELL_HEIGHT, CELL_PIXELS, CELL_WIDTH, GlyphId, GlyphMask};
use gf_core::error::{FitError, InputFault};

use crate::cp437;
use crate::masks::{self, cell_mask};

/// Bytes of a raw 8×8 font dump: 256 glyphs of 8 row bytes.
pub const FONT_BYTES: usize = 256 * CELL_HEIGHT;

/// Side of the reference ASCII bitmaps.
const SHAPE_SIDE: usize = 5;

/// 5×5 reference bitmaps (row-major, LSB first).
const ASCII_SHAPES: &[(char, u32)] = &[
    (' ', 0b00000_00000_00000_00000_00000),
    ('.', 0b00100_00000_00000_00000_00000),
    (',', 0b00010_00100_00000_00000_00000),
    ('\'', 0b00000_00000_00000_00100_00100),
    ('`', 0b00000_00000_00000_00100_00010),
    (':', 0b00000_00100_00000_00100_00000),
    (';', 0b00010_00100_00000_00100_00000),
    ('-', 0b00000_00000_11111_00000_00000),
    ('_', 0b11111_00000_00000_00000_00000),
    ('=', 0b00000_11111_00000_11111_00000),
    ('~', 0b00000_01000_10101_00010_00000),
    ('^', 0b00000_00000_10001_01010_00100),
    ('"', 0b00000_00000_00000_01010_01010),
    ('|', 0b00100_00100_00100_00100_00100),
    ('+', 0b00100_00100_11111_00100_00100),
    ('*', 0b10101_01110_11111_01110_10101),
    ('/', 0b00001_00010_00100_01000_10000),
    ('\\', 0b10000_01000_00100_00010_00001),
    ('(', 0b01000_00100_00100_00100_01000),
    (')', 0b00010_00100_00100_00100_00010),
    ('[', 0b01100_00100_00100_00100_01100),
    (']', 0b00110_00100_00100_00100_00110),
    ('<', 0b01000_00100_00010_00100_01000),
    ('>', 0b00010_00100_01000_00100_00010),
    ('x', 0b01010_00100_01010_10001_00000),
    ('o', 0b01110_10001_10001_01110_00000),
    ('O', 0b01110_10001_10001_10001_01110),
    ('0', 0b01110_10011_10101_11001_01110),
    ('#', 0b01010_11111_01010_11111_01010),
    ('%', 0b11001_11010_00100_01011_10011),
    ('&', 0b10110_01001_00110_01001_00110),
    ('$', 0b01111_10100_01110_00101_11110),
    ('@', 0b01110_10001_11101_10001_01110),
    ('A', 0b10001_10001_11111_10001_01110),
    ('H', 0b10001_10001_11111_10001_10001),
    ('L', 0b11111_00001_00001_00001_00001),
    ('M', 0b10001_10001_10101_11011_10001),
    ('N', 0b10001_11001_10101_10011_10001),
    ('T', 0b00100_00100_00100_00100_11111),
    ('U', 0b01110_10001_10001_10001_10001),
    ('V', 0b00100_01010_10001_10001_10001),
    ('W', 0b10001_11011_10101_10001_10001),
    ('X', 0b10001_01010_00100_01010_10001),
    ('Y', 0b00100_00100_00100_01010_10001),
];

/// One catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<const N: usize> {
    /// Caller-defined identifier.
    pub id: GlyphId,
    /// Foreground positions.
    pub mask: GlyphMask<N>,
}

/// Ordered glyph catalog for blocks of `N` pixels.
///
/// # Example
/// ```
/// use gf_core::block::{GlyphId, GlyphMask};
/// use gf_fit::catalog::GlyphCatalog;
///
/// let mut catalog = GlyphCatalog::<4>::new();
/// catalog.push(GlyphId(7), GlyphMask::full());
/// assert!(!catalog.push_unique(GlyphId(8), GlyphMask::full()));
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphCatalog<const N: usize> {
    glyphs: Vec<Glyph<N>>,
}

impl<const N: usize> GlyphCatalog<N> {
    #[must_use]
    pub fn new() -> Self {
        Self { glyphs: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            glyphs: Vec::with_capacity(capacity),
        }
    }

    /// Append a glyph, even if its mask is already present.
    pub fn push(&mut self, id: GlyphId, mask: GlyphMask<N>) {
        self.glyphs.push(Glyph { id, mask });
    }

    /// Append a glyph unless an earlier entry has the same mask.
    ///
    /// Returns whether the glyph was added.
    pub fn push_unique(&mut self, id: GlyphId, mask: GlyphMask<N>) -> bool {
        if self.glyphs.iter().any(|g| g.mask == mask) {
            return false;
        }
        self.push(id, mask);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at catalog index `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Glyph<N>> {
        self.glyphs.get(index)
    }

    /// Glyphs in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Glyph<N>> {
        self.glyphs.iter()
    }
}

impl<const N: usize> FromIterator<(GlyphId, GlyphMask<N>)> for GlyphCatalog<N> {
    fn from_iter<I: IntoIterator<Item = (GlyphId, GlyphMask<N>)>>(iter: I) -> Self {
        Self {
            glyphs: iter
                .into_iter()
                .map(|(id, mask)| Glyph { id, mask })
                .collect(),
        }
    }
}

impl<'a, const N: usize> IntoIterator for &'a GlyphCatalog<N> {
    type Item = &'a Glyph<N>;
    type IntoIter = std::slice::Iter<'a, Glyph<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.glyphs.iter()
    }
}

impl GlyphCatalog<CELL_PIXELS> {
    /// Unicode block elements: quadrants (space and full block included),
    /// eighth blocks, one-eighth edges and sextants, duplicates dropped.
    ///
    /// # Example
    /// ```
    /// use gf_fit::catalog::GlyphCatalog;
    /// let catalog = GlyphCatalog::blocks();
    /// assert_eq!(catalog.get(0).and_then(|g| g.id.as_char()), Some(' '));
    /// ```
    #[must_use]
    pub fn blocks() -> Self {
        let elements = masks::block_elements();
        let mut catalog = Self::with_capacity(elements.len());
        for (ch, mask) in elements {
            catalog.push_unique(GlyphId::from(ch), mask);
        }
        catalog
    }

    /// Printable ASCII shapes, 5×5 bitmaps scaled nearest-neighbour to the cell.
    #[must_use]
    pub fn ascii() -> Self {
        let mut catalog = Self::with_capacity(ASCII_SHAPES.len());
        for &(ch, bitmap) in ASCII_SHAPES {
            let mask = cell_mask(|x, y| {
                let sx = x * SHAPE_SIDE / CELL_WIDTH;
                let sy = y * SHAPE_SIDE / CELL_HEIGHT;
                bitmap & (1 << (sy * SHAPE_SIDE + sx)) != 0
            });
            catalog.push_unique(GlyphId::from(ch), mask);
        }
        catalog
    }

    /// Glyphs of a raw 8×8 CP437 font dump: 256 glyphs × 8 row bytes, the
    /// most significant bit of each row byte being the leftmost pixel.
    ///
    /// Codes without a printable character are skipped, as are glyphs whose
    /// bitmap repeats an earlier one.
    ///
    /// # Errors
    /// Returns [`InputFault::FontLength`] unless `font` holds exactly
    /// [`FONT_BYTES`] bytes.
    pub fn from_cp437_font(font: &[u8]) -> Result<Self, FitError> {
        if font.len() != FONT_BYTES {
            return Err(InputFault::FontLength {
                expected: FONT_BYTES,
                actual: font.len(),
            }
            .into());
        }

        let mut catalog = Self::with_capacity(256);
        for (code, rows) in (0..=u8::MAX).zip(font.chunks_exact(CELL_HEIGHT)) {
            let Some(ch) = cp437::to_char(code) else {
                continue;
            };
            let mask = cell_mask(|x, y| rows[y] & (0x80 >> x) != 0);
            catalog.push_unique(GlyphId::from(ch), mask);
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(catalog: &GlyphCatalog<CELL_PIXELS>) -> Vec<char> {
        catalog.iter().filter_map(|g| g.id.as_char()).collect()
    }

    #[test]
    fn blocks_are_unique_and_ordered() {
        let catalog = GlyphCatalog::blocks();
        let chars = chars(&catalog);
        assert_eq!(&chars[..2], &[' ', '▘']);
        assert!(chars.contains(&'█'));
        assert!(chars.contains(&'▁'));
        assert!(chars.contains(&'\u{1FB00}'));
        // ▄ and ▌ already came in as quadrants.
        assert_eq!(chars.iter().filter(|&&c| c == '▄').count(), 1);
        // The two full-width sextants repeat ▃ and ▅.
        assert!(!chars.contains(&'\u{1FB2D}'));
        assert!(!chars.contains(&'\u{1FB39}'));
        // 16 quadrants + 6 + 6 eighths + 2 edges + 58 sextants.
        assert_eq!(catalog.len(), 88);
        for (i, a) in catalog.iter().enumerate() {
            for b in catalog.iter().skip(i + 1) {
                assert_ne!(a.mask, b.mask);
            }
        }
    }

    #[test]
    fn ascii_scales_to_cell() {
        let catalog = GlyphCatalog::ascii();
        assert_eq!(catalog.len(), ASCII_SHAPES.len());
        let dash = catalog
            .iter()
            .find(|g| g.id.as_char() == Some('-'))
            .map(|g| g.mask);
        // Source row 2 covers cell rows 4 (4*5/8 = 2) only: 8 pixels.
        assert_eq!(dash.map(|m| m.foreground_count()), Some(CELL_WIDTH));
        let pipe = catalog
            .iter()
            .find(|g| g.id.as_char() == Some('|'))
            .map(|g| g.mask);
        // Source column 2 covers cell columns 4 only, on every row.
        assert_eq!(pipe.map(|m| m.foreground_count()), Some(CELL_HEIGHT));
    }

    #[test]
    fn font_length_is_checked() {
        assert_eq!(
            GlyphCatalog::from_cp437_font(&[0; 100]),
            Err(FitError::InvalidInput(InputFault::FontLength {
                expected: FONT_BYTES,
                actual: 100,
            }))
        );
    }

    #[test]
    fn font_bits_are_msb_first() -> Result<(), FitError> {
        let mut font = vec![0u8; FONT_BYTES];
        // 'A': one pixel, top-left.
        font[usize::from(b'A') * 8] = 0x80;
        // 0xDB (█): solid.
        font[0xDB * 8..0xDC * 8].fill(0xFF);
        let catalog = GlyphCatalog::from_cp437_font(&font)?;

        // 0x20 is the first printable code with the empty bitmap; the other
        // empty glyphs are dropped as duplicates.
        let chars = chars(&catalog);
        assert_eq!(chars, vec![' ', 'A', '█']);
        let a = catalog.get(1).map(|g| g.mask);
        assert_eq!(a, Some(GlyphMask::from_bits(1)));
        Ok(())
    }
}
