//! Candidate color pairs derived from the block itself.

use gf_core::block::{GlyphMask, PixelBlock};
use gf_core::pixel::{ColorPair, Pixel};

/// Running RGB sum of a set of pixels.
#[derive(Default)]
struct ColorSum {
    r: u64,
    g: u64,
    b: u64,
    count: u64,
}

impl ColorSum {
    fn add(&mut self, p: Pixel) {
        self.r += u64::from(p.r);
        self.g += u64::from(p.g);
        self.b += u64::from(p.b);
        self.count += 1;
    }

    /// Rounded mean, `None` for an empty set.
    fn mean(&self) -> Option<Pixel> {
        if self.count == 0 {
            return None;
        }
        let half = self.count / 2;
        let avg = |sum: u64| ((sum + half) / self.count) as u8;
        Some(Pixel::rgb(avg(self.r), avg(self.g), avg(self.b)))
    }
}

/// Pair made of the rounded mean color of the foreground positions and of
/// the background positions of `mask`.
///
/// When one side is empty it takes the other side's mean, so a full or empty
/// mask yields a pair of two equal colors.
///
/// # Example
/// ```
/// use gf_core::block::{GlyphMask, PixelBlock};
/// use gf_core::pixel::{ColorPair, Pixel};
/// use gf_fit::candidates::mean_colors;
///
/// let block = PixelBlock::new([Pixel::WHITE, Pixel::BLACK]);
/// let mask = GlyphMask::from_bools(&[true, false]);
/// assert_eq!(mean_colors(&block, &mask), ColorPair::new(Pixel::WHITE, Pixel::BLACK));
/// ```
#[must_use]
pub fn mean_colors<const N: usize>(block: &PixelBlock<N>, mask: &GlyphMask<N>) -> ColorPair {
    let mut fg = ColorSum::default();
    let mut bg = ColorSum::default();
    for (&p, foreground) in block.as_slice().iter().zip(mask.iter()) {
        if foreground {
            fg.add(p);
        } else {
            bg.add(p);
        }
    }
    match (fg.mean(), bg.mean()) {
        (Some(f), Some(b)) => ColorPair::new(f, b),
        (Some(c), None) | (None, Some(c)) => ColorPair::new(c, c),
        (None, None) => ColorPair::new(Pixel::BLACK, Pixel::BLACK),
    }
}

/// Two ranked pairs from the luminance extremes of the block: brightest
/// pixel on darkest, then the same pair swapped.
///
/// Ties on luminance keep the earliest pixel.
#[must_use]
pub fn luma_extremes<const N: usize>(block: &PixelBlock<N>) -> [ColorPair; 2] {
    let mut bright = block.as_slice().first().copied().unwrap_or_default();
    let mut dark = bright;
    for &p in block.as_slice() {
        if p.luminance() > bright.luminance() {
            bright = p;
        }
        if p.luminance() < dark.luminance() {
            dark = p;
        }
    }
    let pair = ColorPair::new(bright, dark);
    [pair, pair.swapped()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn means_round_to_nearest() {
        let block = PixelBlock::new([
            Pixel::rgb(10, 0, 255),
            Pixel::rgb(11, 1, 254),
            Pixel::rgb(100, 100, 100),
            Pixel::rgb(0, 0, 0),
        ]);
        let mask = GlyphMask::from_bools(&[true, true, false, false]);
        let pair = mean_colors(&block, &mask);
        // 10.5 → 11, 0.5 → 1, 254.5 → 255.
        assert_eq!(pair.fg, Pixel::rgb(11, 1, 255));
        assert_eq!(pair.bg, Pixel::rgb(50, 50, 50));
    }

    #[test]
    fn empty_side_copies_the_other() {
        let block = PixelBlock::new([Pixel::rgb(2, 4, 6), Pixel::rgb(4, 8, 12)]);
        let pair = mean_colors(&block, &GlyphMask::full());
        assert_eq!(pair.fg, Pixel::rgb(3, 6, 9));
        assert_eq!(pair.bg, pair.fg);
        assert_eq!(mean_colors(&block, &GlyphMask::empty()), pair);
    }

    #[test]
    fn extremes_rank_bright_first() {
        let grey = Pixel::rgb(128, 128, 128);
        let block = PixelBlock::new([grey, Pixel::WHITE, Pixel::BLACK, grey]);
        let [first, second] = luma_extremes(&block);
        assert_eq!(first, ColorPair::new(Pixel::WHITE, Pixel::BLACK));
        assert_eq!(second, first.swapped());
    }

    #[test]
    fn uniform_block_gives_equal_colors() {
        let block = PixelBlock::<8>::filled(Pixel::rgb(9, 9, 9));
        let [pair, _] = luma_extremes(&block);
        assert_eq!(pair.fg, pair.bg);
    }
}
