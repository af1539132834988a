use crate::block::{CELL_HEIGHT, CELL_WIDTH, CellBlock};
use crate::pixel::Pixel;

/// Buffer de pixels réutilisable, RGBA row-major, 4 octets par pixel.
///
/// # Example
/// ```
/// use gf_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer pré-alloué aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use gf_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Accès au pixel (x, y). Out-of-range reads return transparent black.
    ///
    /// # Example
    /// ```
    /// use gf_core::frame::FrameBuffer;
    /// use gf_core::pixel::Pixel;
    /// let fb = FrameBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), Pixel::new(0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(idx..idx + 4) {
            Some(&[r, g, b, a]) => Pixel::new(r, g, b, a),
            _ => Pixel::default(),
        }
    }

    /// Write pixel (x, y). Out-of-range writes are ignored.
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, p: Pixel) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if let Some(dst) = self.data.get_mut(idx..idx + 4) {
            dst.copy_from_slice(&p.channels());
        }
    }

    /// Number of whole or partial cells covering the frame, (columns, rows).
    #[must_use]
    pub fn cell_dimensions(&self) -> (u16, u16) {
        (
            self.width.div_ceil(CELL_WIDTH as u32).min(u32::from(u16::MAX)) as u16,
            self.height.div_ceil(CELL_HEIGHT as u32).min(u32::from(u16::MAX)) as u16,
        )
    }

    /// Extract the 8×8 block of cell (cx, cy) into `block`.
    ///
    /// Cells overhanging the right or bottom edge repeat the last column/row.
    ///
    /// # Example
    /// ```
    /// use gf_core::block::CellBlock;
    /// use gf_core::frame::FrameBuffer;
    /// use gf_core::pixel::Pixel;
    ///
    /// let mut fb = FrameBuffer::new(8, 8);
    /// fb.set_pixel(7, 7, Pixel::WHITE);
    /// let mut block = CellBlock::filled(Pixel::BLACK);
    /// fb.extract_cell(0, 0, &mut block);
    /// assert_eq!(block.pixel(63), Pixel::WHITE);
    /// ```
    pub fn extract_cell(&self, cx: u16, cy: u16, block: &mut CellBlock) {
        if self.width == 0 || self.height == 0 {
            *block = CellBlock::filled(Pixel::default());
            return;
        }
        let x0 = u32::from(cx) * CELL_WIDTH as u32;
        let y0 = u32::from(cy) * CELL_HEIGHT as u32;
        let max_x = self.width - 1;
        let max_y = self.height - 1;

        let pixels = block.pixels_mut();
        for dy in 0..CELL_HEIGHT {
            let y = (y0 + dy as u32).min(max_y);
            for dx in 0..CELL_WIDTH {
                let x = (x0 + dx as u32).min(max_x);
                pixels[dy * CELL_WIDTH + dx] = self.pixel(x, y);
            }
        }
    }
}

/// Une cellule de sortie : glyphe choisi et ses deux couleurs.
///
/// # Example
/// ```
/// use gf_core::frame::Cell;
/// let cell = Cell::default();
/// assert_eq!(cell.ch, ' ');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground.
    pub fg: Pixel,
    /// Couleur background.
    pub bg: Pixel,
    /// Erreur résiduelle du meilleur ajustement.
    pub error: u64,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Pixel::WHITE,
            bg: Pixel::BLACK,
            error: 0,
        }
    }
}

/// Grille de sortie. Pré-allouée, réutilisée chaque frame.
///
/// # Example
/// ```
/// use gf_core::frame::{Cell, CellGrid};
/// let mut grid = CellGrid::new(80, 24);
/// grid.set(0, 0, Cell { ch: '▀', ..Cell::default() });
/// assert_eq!(grid.get(0, 0).ch, '▀');
/// ```
#[derive(Clone, Debug)]
pub struct CellGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<Cell>,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl CellGrid {
    /// Crée une grille pré-allouée.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &Cell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate rows of cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Sum of residual errors over the grid.
    #[must_use]
    pub fn total_error(&self) -> u64 {
        self.cells.iter().map(|c| c.error).sum()
    }
}
