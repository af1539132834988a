use gf_core::block::{CELL_PIXELS, CellBlock, Selection};
use gf_core::config::PairMode;
use gf_core::error::FitError;
use gf_core::frame::{Cell, CellGrid, FrameBuffer};
use gf_core::pixel::Pixel;
use rayon::prelude::*;

use crate::candidates;
use crate::catalog::GlyphCatalog;
use crate::dispatch::Kernel;
use crate::selector::Selector;

/// Compositor : ajuste chaque cellule 8×8 d'une frame sur le catalogue.
///
/// # Example
/// ```
/// use gf_core::config::PairMode;
/// use gf_core::frame::{CellGrid, FrameBuffer};
/// use gf_fit::catalog::GlyphCatalog;
/// use gf_fit::compositor::Compositor;
/// use gf_fit::dispatch::Kernel;
///
/// let compositor = Compositor::new(Kernel::detect(), GlyphCatalog::blocks(), PairMode::MaskMeans)?;
/// let frame = FrameBuffer::new(16, 8);
/// let mut grid = CellGrid::new(2, 1);
/// compositor.process(&frame, &mut grid)?;
/// # Ok::<(), gf_core::error::FitError>(())
/// ```
#[derive(Debug)]
pub struct Compositor {
    kernel: Kernel,
    catalog: GlyphCatalog<CELL_PIXELS>,
    pair_mode: PairMode,
}

impl Compositor {
    /// # Errors
    /// Returns [`gf_core::error::InputFault::EmptyCatalog`] for an empty catalog.
    pub fn new(
        kernel: Kernel,
        catalog: GlyphCatalog<CELL_PIXELS>,
        pair_mode: PairMode,
    ) -> Result<Self, FitError> {
        Selector::new(kernel, &catalog)?;
        Ok(Self {
            kernel,
            catalog,
            pair_mode,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &GlyphCatalog<CELL_PIXELS> {
        &self.catalog
    }

    /// Best glyph and colors for one cell block.
    ///
    /// # Errors
    /// Propagates selector input errors.
    pub fn fit_cell(&self, block: &CellBlock) -> Result<Selection, FitError> {
        let selector = Selector::new(self.kernel, &self.catalog)?;
        match self.pair_mode {
            PairMode::MaskMeans => selector.best_fit_mean_colors(block),
            PairMode::LumaExtremes => selector.best_fit(block, &candidates::luma_extremes(block)),
        }
    }

    /// Fit every cell of `grid` from `frame`, one grid row per rayon task.
    ///
    /// Cells past the frame's right or bottom edge repeat its last column/row.
    ///
    /// # Errors
    /// Propagates selector input errors.
    pub fn process(&self, frame: &FrameBuffer, grid: &mut CellGrid) -> Result<(), FitError> {
        let width = usize::from(grid.width.max(1));
        grid.cells
            .par_chunks_mut(width)
            .enumerate()
            .try_for_each(|(cy, row)| {
                let mut block = CellBlock::filled(Pixel::BLACK);
                for (cx, cell) in row.iter_mut().enumerate() {
                    frame.extract_cell(cx as u16, cy as u16, &mut block);
                    let best = self.fit_cell(&block)?;
                    *cell = Cell {
                        ch: best.glyph.as_char().unwrap_or(' '),
                        fg: best.pair.fg,
                        bg: best.pair.bg,
                        error: best.error,
                    };
                }
                Ok(())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone_frame() -> FrameBuffer {
        let mut frame = FrameBuffer::new(16, 8);
        for y in 0..8 {
            for x in 0..16 {
                // Left cell: top half red. Right cell: left half blue.
                let lit = if x < 8 { y < 4 } else { x < 12 };
                let p = if lit {
                    Pixel::rgb(220, 30, 30)
                } else {
                    Pixel::rgb(10, 10, 40)
                };
                frame.set_pixel(x, y, p);
            }
        }
        frame
    }

    #[test]
    fn halves_are_recovered_exactly() -> Result<(), FitError> {
        let compositor =
            Compositor::new(Kernel::detect(), GlyphCatalog::blocks(), PairMode::MaskMeans)?;
        let mut grid = CellGrid::new(2, 1);
        compositor.process(&two_tone_frame(), &mut grid)?;
        assert_eq!(grid.get(0, 0).ch, '▀');
        assert_eq!(grid.get(1, 0).ch, '▌');
        assert_eq!(grid.total_error(), 0);
        assert_eq!(grid.get(0, 0).fg, Pixel::rgb(220, 30, 30));
        Ok(())
    }

    #[test]
    fn luma_extremes_mode_is_exact_on_two_tones() -> Result<(), FitError> {
        let compositor = Compositor::new(
            Kernel::scalar(),
            GlyphCatalog::blocks(),
            PairMode::LumaExtremes,
        )?;
        let mut grid = CellGrid::new(2, 1);
        compositor.process(&two_tone_frame(), &mut grid)?;
        assert_eq!(grid.total_error(), 0);
        Ok(())
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = Compositor::new(Kernel::scalar(), GlyphCatalog::new(), PairMode::MaskMeans);
        assert!(err.is_err());
    }

    #[test]
    fn every_level_fills_the_same_grid() -> Result<(), FitError> {
        let mut frame = FrameBuffer::new(40, 24);
        for y in 0..24u32 {
            for x in 0..40u32 {
                frame.set_pixel(x, y, Pixel::rgb((x * 6) as u8, (y * 10) as u8, ((x ^ y) * 5) as u8));
            }
        }
        let (w, h) = frame.cell_dimensions();
        let mut reference = CellGrid::new(w, h);
        Compositor::new(Kernel::scalar(), GlyphCatalog::blocks(), PairMode::MaskMeans)?
            .process(&frame, &mut reference)?;

        for level in Kernel::available_levels() {
            let mut grid = CellGrid::new(w, h);
            Compositor::new(Kernel::with_level(level)?, GlyphCatalog::blocks(), PairMode::MaskMeans)?
                .process(&frame, &mut grid)?;
            assert_eq!(grid.cells, reference.cells, "{level}");
        }
        Ok(())
    }
}
