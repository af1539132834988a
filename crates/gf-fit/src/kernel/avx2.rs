//! AVX2: 8 pixels per step, four pixels per 16×i16 register.

use std::arch::x86_64::{
    __m128i, __m256i, _mm_set1_epi32, _mm256_add_epi32, _mm256_and_si256, _mm256_andnot_si256,
    _mm256_cvtepi8_epi16, _mm256_cvtepu8_epi16, _mm256_cvtepu16_epi32, _mm256_extracti128_si256,
    _mm256_loadu_si256, _mm256_mullo_epi16, _mm256_or_si256, _mm256_setzero_si256,
    _mm256_storeu_si256, _mm256_sub_epi16,
};

use gf_core::pixel::{ColorPair, Pixel};

use super::{FLUSH_STEPS, scalar};

const STEP: usize = 8;

/// # Safety
/// The CPU must support AVX2. `pixels` and `mask` must have the same length.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn calc_error(pixels: &[Pixel], pair: ColorPair, mask: &[u32]) -> u64 {
    debug_assert_eq!(pixels.len(), mask.len());
    let body = pixels.len().min(mask.len()) / STEP * STEP;
    let mut total = 0u64;

    // SAFETY: AVX2 is enabled for this function. Each unaligned load reads
    // 32 bytes from a chunk of exactly STEP pixels or STEP mask lanes.
    unsafe {
        // Broadcast colors widen to 4 pixels' worth of i16 channels.
        let fg = _mm256_cvtepu8_epi16(_mm_set1_epi32(pair.fg.to_u32() as i32));
        let bg = _mm256_cvtepu8_epi16(_mm_set1_epi32(pair.bg.to_u32() as i32));
        let mut acc = _mm256_setzero_si256();

        let steps = pixels[..body]
            .chunks_exact(STEP)
            .zip(mask[..body].chunks_exact(STEP));
        for (i, (px, mk)) in steps.enumerate() {
            let pixels_8x = _mm256_loadu_si256(px.as_ptr().cast::<__m256i>());
            let mask_8x = _mm256_loadu_si256(mk.as_ptr().cast::<__m256i>());

            let d0 = quad_error(
                _mm256_extracti128_si256::<0>(pixels_8x),
                _mm256_extracti128_si256::<0>(mask_8x),
                fg,
                bg,
            );
            let d1 = quad_error(
                _mm256_extracti128_si256::<1>(pixels_8x),
                _mm256_extracti128_si256::<1>(mask_8x),
                fg,
                bg,
            );
            acc = _mm256_add_epi32(acc, d0);
            acc = _mm256_add_epi32(acc, d1);

            if (i + 1) % FLUSH_STEPS == 0 {
                total += color_sum(acc);
                acc = _mm256_setzero_si256();
            }
        }
        total += color_sum(acc);
    }

    total + scalar::calc_error(&pixels[body..], pair, &mask[body..])
}

/// Squared differences of four pixels, folded to 8×u32 laid out as two
/// pixels' channels (R, G, B, A, R, G, B, A).
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn quad_error(p: __m128i, m: __m128i, fg: __m256i, bg: __m256i) -> __m256i {
    let p = _mm256_cvtepu8_epi16(p);
    // Sign extension maps mask bytes 0x00/0xFF to words 0x0000/0xFFFF.
    let m = _mm256_cvtepi8_epi16(m);
    let d_fg = _mm256_and_si256(m, _mm256_sub_epi16(fg, p));
    let d_bg = _mm256_andnot_si256(m, _mm256_sub_epi16(bg, p));
    let d = _mm256_or_si256(d_fg, d_bg);
    let sq = _mm256_mullo_epi16(d, d);
    _mm256_add_epi32(
        _mm256_cvtepu16_epi32(_mm256_extracti128_si256::<0>(sq)),
        _mm256_cvtepu16_epi32(_mm256_extracti128_si256::<1>(sq)),
    )
}

/// Horizontal sum skipping the alpha lanes 3 and 7.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn color_sum(acc: __m256i) -> u64 {
    let mut e = [0u32; 8];
    // SAFETY: `e` is 32 writable bytes.
    unsafe { _mm256_storeu_si256(e.as_mut_ptr().cast::<__m256i>(), acc) };
    [e[0], e[1], e[2], e[4], e[5], e[6]]
        .into_iter()
        .map(u64::from)
        .sum()
}
