use crate::error::{FitError, InputFault};
use crate::pixel::{ColorPair, Pixel};

/// Cell width in pixels.
pub const CELL_WIDTH: usize = 8;
/// Cell height in pixels.
pub const CELL_HEIGHT: usize = 8;
/// Pixels per cell. Shared by every block and every mask of the built-in catalogs.
pub const CELL_PIXELS: usize = CELL_WIDTH * CELL_HEIGHT;

/// Lane value of a foreground mask position.
pub const LANE_FG: u32 = u32::MAX;
/// Lane value of a background mask position.
pub const LANE_BG: u32 = 0;

/// Bloc de pixels d'une cellule terminal, row-major, longueur fixe `N`.
///
/// # Example
/// ```
/// use gf_core::block::PixelBlock;
/// use gf_core::pixel::Pixel;
///
/// let block = PixelBlock::<4>::filled(Pixel::WHITE);
/// assert_eq!(block.len(), 4);
/// assert!(PixelBlock::<4>::try_from_slice(&[Pixel::BLACK; 3]).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBlock<const N: usize> {
    pixels: [Pixel; N],
}

/// Block of one 8×8 cell.
pub type CellBlock = PixelBlock<CELL_PIXELS>;

impl<const N: usize> PixelBlock<N> {
    /// Wrap an array of exactly `N` pixels.
    #[must_use]
    pub const fn new(pixels: [Pixel; N]) -> Self {
        Self { pixels }
    }

    /// Every position set to `pixel`.
    #[must_use]
    pub const fn filled(pixel: Pixel) -> Self {
        Self { pixels: [pixel; N] }
    }

    /// Build a block from pixel `i` = `f(i)`.
    #[must_use]
    pub fn from_fn(f: impl FnMut(usize) -> Pixel) -> Self {
        Self {
            pixels: std::array::from_fn(f),
        }
    }

    /// Copy a slice that must hold exactly `N` pixels.
    ///
    /// # Errors
    /// Returns [`InputFault::BlockLength`] when the slice length is not `N`.
    pub fn try_from_slice(pixels: &[Pixel]) -> Result<Self, FitError> {
        let pixels: [Pixel; N] = pixels.try_into().map_err(|_| InputFault::BlockLength {
            expected: N,
            actual: pixels.len(),
        })?;
        Ok(Self { pixels })
    }

    /// Pixel count, always `N`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn len(&self) -> usize {
        N
    }

    /// True only for the degenerate zero-sized block.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Pixels in row-major order.
    #[inline(always)]
    #[must_use]
    pub fn as_slice(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at position `i`.
    ///
    /// # Panics
    /// Panics if `i >= N`.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, i: usize) -> Pixel {
        self.pixels[i]
    }

    /// Mutable access for block extractors filling a reused block.
    #[inline(always)]
    pub fn pixels_mut(&mut self) -> &mut [Pixel; N] {
        &mut self.pixels
    }
}

impl<const N: usize> TryFrom<&[Pixel]> for PixelBlock<N> {
    type Error = FitError;

    fn try_from(pixels: &[Pixel]) -> Result<Self, Self::Error> {
        Self::try_from_slice(pixels)
    }
}

/// Masque d'un glyphe : pour chaque position, premier plan ou fond.
///
/// Stocké sous forme de lanes 32 bits (`0` ou `0xFFFF_FFFF`) pour que les
/// kernels vectoriels chargent le masque tel quel, aligné pixel par pixel.
///
/// # Example
/// ```
/// use gf_core::block::GlyphMask;
///
/// let mask = GlyphMask::<4>::from_bits(0b0101);
/// assert!(mask.is_foreground(0));
/// assert!(!mask.is_foreground(1));
/// assert_eq!(mask.inverted().foreground_count(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphMask<const N: usize> {
    lanes: [u32; N],
}

/// Mask of one 8×8 cell.
pub type CellMask = GlyphMask<CELL_PIXELS>;

impl<const N: usize> GlyphMask<N> {
    /// Mask with every position in the background.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lanes: [LANE_BG; N],
        }
    }

    /// Mask with every position in the foreground.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            lanes: [LANE_FG; N],
        }
    }

    /// Build a mask from position `i` = `f(i)`.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        Self {
            lanes: std::array::from_fn(|i| lane(f(i))),
        }
    }

    /// Build from exactly `N` booleans.
    #[must_use]
    pub fn from_bools(bits: &[bool; N]) -> Self {
        Self::from_fn(|i| bits[i])
    }

    /// Build from a slice that must hold exactly `N` booleans.
    ///
    /// # Errors
    /// Returns [`InputFault::MaskLength`] when the slice length is not `N`.
    pub fn try_from_bools(bits: &[bool]) -> Result<Self, FitError> {
        if bits.len() != N {
            return Err(InputFault::MaskLength {
                expected: N,
                actual: bits.len(),
            }
            .into());
        }
        Ok(Self::from_fn(|i| bits[i]))
    }

    /// Build from a bitmap where bit `i` is position `i`. Positions past 63
    /// are background.
    #[must_use]
    pub fn from_bits(bits: u64) -> Self {
        Self::from_fn(|i| i < 64 && bits & (1 << i) != 0)
    }

    /// Whether position `i` takes the foreground color.
    ///
    /// # Panics
    /// Panics if `i >= N`.
    #[inline(always)]
    #[must_use]
    pub fn is_foreground(&self, i: usize) -> bool {
        self.lanes[i] != LANE_BG
    }

    /// Foreground and background exchanged at every position.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            lanes: self.lanes.map(|l| !l),
        }
    }

    /// Number of foreground positions.
    #[must_use]
    pub fn foreground_count(&self) -> usize {
        self.lanes.iter().filter(|&&l| l != LANE_BG).count()
    }

    /// Raw per-position lanes.
    #[inline(always)]
    #[must_use]
    pub fn lanes(&self) -> &[u32] {
        &self.lanes
    }

    /// Iterate positions as booleans.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.lanes.iter().map(|&l| l != LANE_BG)
    }
}

#[inline(always)]
const fn lane(foreground: bool) -> u32 {
    if foreground { LANE_FG } else { LANE_BG }
}

/// Opaque glyph handle, stable for the lifetime of a catalog.
///
/// Built-in catalogs use the glyph's Unicode scalar value.
///
/// # Example
/// ```
/// use gf_core::block::GlyphId;
/// assert_eq!(GlyphId::from('█').as_char(), Some('█'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub u32);

impl GlyphId {
    /// Interpret the id as a Unicode scalar value.
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

impl From<char> for GlyphId {
    fn from(ch: char) -> Self {
        Self(ch as u32)
    }
}

/// Résultat de la recherche pour un bloc : glyphe, couleurs, erreur résiduelle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Winning glyph.
    pub glyph: GlyphId,
    /// Catalog index of the winning glyph.
    pub index: usize,
    /// Winning color pair.
    pub pair: ColorPair,
    /// Residual fitting error: sum of squared color-channel differences.
    pub error: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_rejects_wrong_length() {
        let err = PixelBlock::<4>::try_from_slice(&[Pixel::BLACK; 5]);
        assert_eq!(
            err,
            Err(FitError::InvalidInput(InputFault::BlockLength {
                expected: 4,
                actual: 5
            }))
        );
    }

    #[test]
    fn mask_rejects_wrong_length() {
        let err = GlyphMask::<4>::try_from_bools(&[true, false]);
        assert_eq!(
            err,
            Err(FitError::InvalidInput(InputFault::MaskLength {
                expected: 4,
                actual: 2
            }))
        );
    }

    #[test]
    fn mask_lanes_are_all_or_nothing() {
        let mask = GlyphMask::<3>::from_bools(&[true, false, true]);
        assert_eq!(mask.lanes(), &[LANE_FG, LANE_BG, LANE_FG]);
        assert_eq!(mask.inverted().lanes(), &[LANE_BG, LANE_FG, LANE_BG]);
    }

    #[test]
    fn bits_past_64_are_background() {
        let mask = GlyphMask::<70>::from_bits(u64::MAX);
        assert_eq!(mask.foreground_count(), 64);
        assert!(!mask.is_foreground(69));
    }

    #[test]
    fn cell_geometry() {
        assert_eq!(CELL_PIXELS, 64);
        assert_eq!(CellMask::full().foreground_count(), CELL_PIXELS);
        assert_eq!(CellMask::empty().foreground_count(), 0);
    }
}
