//! Moteur d'ajustement de glyphes.
//!
//! For each cell-sized pixel block, find the glyph mask and foreground /
//! background color pair with the smallest squared color error.
//!
//! - [`kernel`]: the error kernel, scalar reference plus SSE2 / AVX2 / NEON.
//! - [`dispatch`]: runtime selection of the fastest kernel, bound once.
//! - [`selector`]: argmin over catalog × color pairs.
//! - [`catalog`], [`masks`], [`cp437`]: glyph mask catalogs.
//! - [`candidates`]: color pairs derived from the block.
//! - [`compositor`]: whole-frame fitting on rayon.

pub mod candidates;
pub mod catalog;
pub mod compositor;
pub mod cp437;
pub mod dispatch;
pub mod kernel;
pub mod masks;
pub mod selector;

pub use catalog::{Glyph, GlyphCatalog};
pub use compositor::Compositor;
pub use dispatch::Kernel;
pub use selector::{Selector, select};
