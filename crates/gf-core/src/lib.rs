//! Types partagés du moteur glyphfit.
//!
//! Pixels, blocs, masques de glyphes, erreurs et configuration utilisés
//! par tout le workspace.

pub mod block;
pub mod config;
pub mod error;
pub mod frame;
pub mod level;
pub mod pixel;

pub use block::{
    CELL_HEIGHT, CELL_PIXELS, CELL_WIDTH, CellBlock, CellMask, GlyphId, GlyphMask, PixelBlock,
    Selection,
};
pub use config::FitConfig;
pub use error::{FitError, InputFault};
pub use frame::{Cell, CellGrid, FrameBuffer};
pub use level::KernelLevel;
pub use pixel::{ColorPair, Pixel};
