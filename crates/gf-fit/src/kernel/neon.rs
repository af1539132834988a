//! NEON: 4 pixels per step, two pixels per 8×i16 register.

use std::arch::aarch64::{
    int16x8_t, int32x4_t, uint8x8_t, vbslq_s16, vdup_n_u32, vdupq_n_s32, vget_high_s16,
    vget_high_u8, vget_low_s16, vget_low_u8, vgetq_lane_s32, vld1q_u8, vmlal_s16, vmovl_s8,
    vmovl_u8, vreinterpret_s8_u8, vreinterpret_u8_u32, vreinterpretq_s16_u16,
    vreinterpretq_u16_s16, vsubq_s16,
};

use gf_core::pixel::{ColorPair, Pixel};

use super::{FLUSH_STEPS, scalar};

const STEP: usize = 4;

/// # Safety
/// The CPU must support NEON. `pixels` and `mask` must have the same length.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn calc_error(pixels: &[Pixel], pair: ColorPair, mask: &[u32]) -> u64 {
    debug_assert_eq!(pixels.len(), mask.len());
    let body = pixels.len().min(mask.len()) / STEP * STEP;
    let mut total = 0u64;

    // SAFETY: NEON is enabled for this function. Each load reads 16 bytes
    // from a chunk of exactly STEP pixels or STEP mask lanes.
    unsafe {
        let fg = broadcast(pair.fg);
        let bg = broadcast(pair.bg);
        let mut acc = vdupq_n_s32(0);

        let steps = pixels[..body]
            .chunks_exact(STEP)
            .zip(mask[..body].chunks_exact(STEP));
        for (i, (px, mk)) in steps.enumerate() {
            let p = vld1q_u8(px.as_ptr().cast::<u8>());
            let m = vld1q_u8(mk.as_ptr().cast::<u8>());
            acc = pair_error(acc, vget_low_u8(p), vget_low_u8(m), fg, bg);
            acc = pair_error(acc, vget_high_u8(p), vget_high_u8(m), fg, bg);

            if (i + 1) % FLUSH_STEPS == 0 {
                total += color_sum(acc);
                acc = vdupq_n_s32(0);
            }
        }
        total += color_sum(acc);
    }

    total + scalar::calc_error(&pixels[body..], pair, &mask[body..])
}

/// One color as two pixels of i16 channels.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn broadcast(color: Pixel) -> int16x8_t {
    vreinterpretq_s16_u16(vmovl_u8(vreinterpret_u8_u32(vdup_n_u32(color.to_u32()))))
}

/// Accumulate the squared differences of two pixels into 4×i32 (R, G, B, A).
#[inline]
#[target_feature(enable = "neon")]
unsafe fn pair_error(
    acc: int32x4_t,
    p: uint8x8_t,
    m: uint8x8_t,
    fg: int16x8_t,
    bg: int16x8_t,
) -> int32x4_t {
    let p = vreinterpretq_s16_u16(vmovl_u8(p));
    let m = vreinterpretq_u16_s16(vmovl_s8(vreinterpret_s8_u8(m)));
    let d = vbslq_s16(m, vsubq_s16(fg, p), vsubq_s16(bg, p));
    let acc = vmlal_s16(acc, vget_low_s16(d), vget_low_s16(d));
    vmlal_s16(acc, vget_high_s16(d), vget_high_s16(d))
}

/// Horizontal sum of lanes R, G, B. Lane 3 is alpha.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn color_sum(acc: int32x4_t) -> u64 {
    let r = vgetq_lane_s32::<0>(acc);
    let g = vgetq_lane_s32::<1>(acc);
    let b = vgetq_lane_s32::<2>(acc);
    r as u64 + g as u64 + b as u64
}
