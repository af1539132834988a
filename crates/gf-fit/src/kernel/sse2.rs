//! SSE2: 4 pixels per step, two pixels per 8×i16 register.

use std::arch::x86_64::{
    __m128i, _mm_add_epi32, _mm_and_si128, _mm_andnot_si128, _mm_loadu_si128, _mm_mullo_epi16,
    _mm_or_si128, _mm_set1_epi32, _mm_setzero_si128, _mm_storeu_si128, _mm_sub_epi16,
    _mm_unpackhi_epi8, _mm_unpackhi_epi16, _mm_unpacklo_epi8, _mm_unpacklo_epi16,
};

use gf_core::pixel::{ColorPair, Pixel};

use super::{FLUSH_STEPS, scalar};

const STEP: usize = 4;

/// # Safety
/// The CPU must support SSE2. `pixels` and `mask` must have the same length.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn calc_error(pixels: &[Pixel], pair: ColorPair, mask: &[u32]) -> u64 {
    debug_assert_eq!(pixels.len(), mask.len());
    let body = pixels.len().min(mask.len()) / STEP * STEP;
    let mut total = 0u64;

    // SAFETY: SSE2 is enabled for this function. Each unaligned load reads
    // 16 bytes from a chunk of exactly STEP pixels (4 bytes each) or STEP
    // mask lanes (4 bytes each).
    unsafe {
        let zero = _mm_setzero_si128();
        let fg = _mm_unpacklo_epi8(_mm_set1_epi32(pair.fg.to_u32() as i32), zero);
        let bg = _mm_unpacklo_epi8(_mm_set1_epi32(pair.bg.to_u32() as i32), zero);
        let mut acc = zero;

        let steps = pixels[..body]
            .chunks_exact(STEP)
            .zip(mask[..body].chunks_exact(STEP));
        for (i, (px, mk)) in steps.enumerate() {
            let p = _mm_loadu_si128(px.as_ptr().cast::<__m128i>());
            let m = _mm_loadu_si128(mk.as_ptr().cast::<__m128i>());

            // Byte-doubling the mask turns each 0x00/0xFF byte into a
            // 0x0000/0xFFFF word aligned with the widened channels.
            let lo = pair_error(
                _mm_unpacklo_epi8(p, zero),
                _mm_unpacklo_epi8(m, m),
                fg,
                bg,
            );
            let hi = pair_error(
                _mm_unpackhi_epi8(p, zero),
                _mm_unpackhi_epi8(m, m),
                fg,
                bg,
            );
            acc = _mm_add_epi32(acc, _mm_add_epi32(lo, hi));

            if (i + 1) % FLUSH_STEPS == 0 {
                total += color_sum(acc);
                acc = zero;
            }
        }
        total += color_sum(acc);
    }

    total + scalar::calc_error(&pixels[body..], pair, &mask[body..])
}

/// Squared differences of two pixels, summed per channel into 4×u32 (R, G, B, A).
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn pair_error(p: __m128i, m: __m128i, fg: __m128i, bg: __m128i) -> __m128i {
    let zero = _mm_setzero_si128();
    let d_fg = _mm_and_si128(m, _mm_sub_epi16(fg, p));
    let d_bg = _mm_andnot_si128(m, _mm_sub_epi16(bg, p));
    let d = _mm_or_si128(d_fg, d_bg);
    // |d| <= 255, so d² fits the low 16 bits unsigned.
    let sq = _mm_mullo_epi16(d, d);
    _mm_add_epi32(_mm_unpacklo_epi16(sq, zero), _mm_unpackhi_epi16(sq, zero))
}

/// Horizontal sum of lanes R, G, B. Lane 3 is alpha.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn color_sum(acc: __m128i) -> u64 {
    let mut lanes = [0u32; 4];
    // SAFETY: `lanes` is 16 writable bytes.
    unsafe { _mm_storeu_si128(lanes.as_mut_ptr().cast::<__m128i>(), acc) };
    u64::from(lanes[0]) + u64::from(lanes[1]) + u64::from(lanes[2])
}
