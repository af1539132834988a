//! Masques 8×8 des éléments de bloc Unicode.
//!
//! Every mask here is row-major over a [`CELL_WIDTH`] × [`CELL_HEIGHT`] cell,
//! `true` where the glyph draws ink.

use gf_core::block::{CELL_HEIGHT, CELL_WIDTH, CellMask};

/// 16 quadrant block characters (2×2 sub-cells).
///
/// Index = bitmap: bit0=TL, bit1=TR, bit2=BL, bit3=BR.
pub const QUADRANT_CHARS: [char; 16] = [
    ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
];

/// Build a cell mask from `f(x, y)`.
#[must_use]
pub fn cell_mask(f: impl Fn(usize, usize) -> bool) -> CellMask {
    CellMask::from_fn(|i| f(i % CELL_WIDTH, i / CELL_WIDTH))
}

/// Mask of quadrant bitmap `bits` (see [`QUADRANT_CHARS`]).
#[must_use]
pub fn quadrant(bits: u8) -> CellMask {
    cell_mask(|x, y| {
        let col = usize::from(x >= CELL_WIDTH / 2);
        let row = usize::from(y >= CELL_HEIGHT / 2);
        bits & (1 << (row * 2 + col)) != 0
    })
}

/// Sextant row of pixel row `y`. Eight rows split 3 / 2 / 3.
const fn sextant_row(y: usize) -> usize {
    match y {
        0..=2 => 0,
        3..=4 => 1,
        _ => 2,
    }
}

/// Unicode sextant for bitmap `bits`, bit `row * 2 + col` set per lit sub-cell.
///
/// Returns `None` for the four bitmaps Unicode leaves to other blocks: empty,
/// full, left column (`▌`) and right column (`▐`).
///
/// # Example
/// ```
/// use gf_fit::masks::sextant_char;
/// assert_eq!(sextant_char(0b000001), Some('\u{1FB00}'));
/// assert_eq!(sextant_char(0b111110), Some('\u{1FB3B}'));
/// assert_eq!(sextant_char(0b010101), None);
/// ```
#[must_use]
pub fn sextant_char(bits: u8) -> Option<char> {
    match bits {
        0 | 21 | 42 | 63.. => None,
        _ => {
            let skipped = u32::from(bits > 21) + u32::from(bits > 42);
            char::from_u32(0x1FB00 + u32::from(bits) - 1 - skipped)
        }
    }
}

/// Mask of sextant bitmap `bits` (see [`sextant_char`]).
#[must_use]
pub fn sextant(bits: u8) -> CellMask {
    cell_mask(|x, y| {
        let col = usize::from(x >= CELL_WIDTH / 2);
        bits & (1 << (sextant_row(y) * 2 + col)) != 0
    })
}

/// Every block element with its mask: quadrants, halves, eighth blocks, the
/// two one-eighth edges and the sextants.
///
/// Entries can share a mask (`▄` is both a quadrant and four eighths).
#[must_use]
pub fn block_elements() -> Vec<(char, CellMask)> {
    let mut out = Vec::with_capacity(96);

    for (bits, &ch) in (0u8..).zip(QUADRANT_CHARS.iter()) {
        out.push((ch, quadrant(bits)));
    }

    // ▁▂▃▄▅▆▇ : lower k eighths.
    for k in 1..CELL_HEIGHT {
        if let Some(ch) = char::from_u32(0x2580 + k as u32) {
            out.push((ch, cell_mask(|_, y| y >= CELL_HEIGHT - k)));
        }
    }
    // ▉▊▋▌▍▎▏ : left k eighths.
    for k in 1..CELL_WIDTH {
        if let Some(ch) = char::from_u32(0x2590 - k as u32) {
            out.push((ch, cell_mask(|x, _| x < k)));
        }
    }
    out.push(('▔', cell_mask(|_, y| y < 1)));
    out.push(('▕', cell_mask(|x, _| x >= CELL_WIDTH - 1)));

    for bits in 1..63u8 {
        if let Some(ch) = sextant_char(bits) {
            out.push((ch, sextant(bits)));
        }
    }
    out
}
