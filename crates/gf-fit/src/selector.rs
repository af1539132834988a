//! Best-fit search over a glyph catalog.
//!
//! The scan order is glyph catalog index ascending, then candidate pair index
//! ascending. A candidate replaces the current best only when its error is
//! strictly lower, so on equal error the earlier candidate wins and the
//! result is identical whichever kernel level is bound.

use gf_core::block::{PixelBlock, Selection};
use gf_core::error::{FitError, InputFault};
use gf_core::pixel::ColorPair;

use crate::candidates;
use crate::catalog::GlyphCatalog;
use crate::dispatch::Kernel;

/// Selector over a borrowed catalog.
///
/// Holds no mutable state: one selector can serve every worker thread.
///
/// # Example
/// ```
/// use gf_core::block::{GlyphId, GlyphMask, PixelBlock};
/// use gf_core::pixel::{ColorPair, Pixel};
/// use gf_fit::catalog::GlyphCatalog;
/// use gf_fit::dispatch::Kernel;
/// use gf_fit::selector::Selector;
///
/// let catalog: GlyphCatalog<2> = [
///     (GlyphId(0), GlyphMask::empty()),
///     (GlyphId(1), GlyphMask::from_bools(&[true, false])),
/// ]
/// .into_iter()
/// .collect();
/// let selector = Selector::new(Kernel::detect(), &catalog)?;
/// let block = PixelBlock::new([Pixel::WHITE, Pixel::BLACK]);
/// let best = selector.best_fit(&block, &[ColorPair::new(Pixel::WHITE, Pixel::BLACK)])?;
/// assert_eq!((best.glyph, best.error), (GlyphId(1), 0));
/// # Ok::<(), gf_core::error::FitError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Selector<'c, const N: usize> {
    kernel: Kernel,
    catalog: &'c GlyphCatalog<N>,
}

impl<'c, const N: usize> Selector<'c, N> {
    /// # Errors
    /// Returns [`InputFault::EmptyCatalog`] if `catalog` has no glyphs.
    pub fn new(kernel: Kernel, catalog: &'c GlyphCatalog<N>) -> Result<Self, FitError> {
        if catalog.is_empty() {
            return Err(InputFault::EmptyCatalog.into());
        }
        Ok(Self { kernel, catalog })
    }

    #[must_use]
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    #[must_use]
    pub fn catalog(&self) -> &'c GlyphCatalog<N> {
        self.catalog
    }

    /// Minimum-error (glyph, pair) over the catalog crossed with `pairs`.
    ///
    /// # Errors
    /// Returns [`InputFault::NoColorPairs`] if `pairs` is empty.
    pub fn best_fit(
        &self,
        block: &PixelBlock<N>,
        pairs: &[ColorPair],
    ) -> Result<Selection, FitError> {
        if pairs.is_empty() {
            return Err(InputFault::NoColorPairs.into());
        }

        let mut best: Option<Selection> = None;
        'scan: for (index, glyph) in self.catalog.iter().enumerate() {
            for &pair in pairs {
                let error = self.kernel.error(block, pair, &glyph.mask);
                if best.is_none_or(|b| error < b.error) {
                    best = Some(Selection {
                        glyph: glyph.id,
                        index,
                        pair,
                        error,
                    });
                    // Nothing scores below zero.
                    if error == 0 {
                        break 'scan;
                    }
                }
            }
        }
        best.ok_or_else(|| InputFault::EmptyCatalog.into())
    }

    /// Minimum-error glyph where each glyph is scored in the pair of its own
    /// foreground and background mean colors.
    ///
    /// # Errors
    /// Never fails for a selector built by [`Selector::new`]; the result type
    /// mirrors [`Selector::best_fit`].
    pub fn best_fit_mean_colors(&self, block: &PixelBlock<N>) -> Result<Selection, FitError> {
        let mut best: Option<Selection> = None;
        for (index, glyph) in self.catalog.iter().enumerate() {
            let pair = candidates::mean_colors(block, &glyph.mask);
            let error = self.kernel.error(block, pair, &glyph.mask);
            if best.is_none_or(|b| error < b.error) {
                best = Some(Selection {
                    glyph: glyph.id,
                    index,
                    pair,
                    error,
                });
                if error == 0 {
                    break;
                }
            }
        }
        best.ok_or_else(|| InputFault::EmptyCatalog.into())
    }
}

/// One-off best fit of `block` against `catalog` × `pairs`.
///
/// # Errors
/// Returns [`InputFault::EmptyCatalog`] or [`InputFault::NoColorPairs`] for
/// an empty search space.
pub fn select<const N: usize>(
    kernel: Kernel,
    block: &PixelBlock<N>,
    catalog: &GlyphCatalog<N>,
    pairs: &[ColorPair],
) -> Result<Selection, FitError> {
    Selector::new(kernel, catalog)?.best_fit(block, pairs)
}
