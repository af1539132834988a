use gf_core::pixel::{ColorPair, Pixel};

/// Scalar reference kernel. Defines the ground truth for every vector variant.
///
/// # Example
/// ```
/// use gf_core::block::{LANE_BG, LANE_FG};
/// use gf_core::pixel::{ColorPair, Pixel};
/// use gf_fit::kernel::scalar::calc_error;
///
/// let pixels = [Pixel::rgb(10, 0, 0), Pixel::rgb(0, 0, 0)];
/// let pair = ColorPair::new(Pixel::rgb(12, 0, 0), Pixel::BLACK);
/// assert_eq!(calc_error(&pixels, pair, &[LANE_FG, LANE_BG]), 4);
/// ```
#[inline]
#[must_use]
pub fn calc_error(pixels: &[Pixel], pair: ColorPair, mask: &[u32]) -> u64 {
    debug_assert_eq!(pixels.len(), mask.len());
    pixels
        .iter()
        .zip(mask)
        .map(|(&p, &m)| u64::from(pair.pick(m != 0).distance_sq(p)))
        .sum()
}
