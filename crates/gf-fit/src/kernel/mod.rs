//! Error kernels: fitting error of a (block, color pair, glyph mask) triple.
//!
//! error = Σ over positions i, Σ over color channels c of (candidate(i, c) − actual(i, c))²
//! where candidate is the foreground color under a set mask bit, the
//! background color otherwise. Alpha is never counted.
//!
//! Every variant returns exactly the integer [`scalar::calc_error`] returns.
//! Vector variants run whole steps of 4 or 8 pixels and hand the remainder
//! to the scalar loop.

use gf_core::pixel::{ColorPair, Pixel};

pub mod scalar;

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
pub(crate) mod avx2;
#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
pub(crate) mod sse2;

#[cfg(target_arch = "aarch64")]
#[allow(unsafe_code)]
pub(crate) mod neon;

/// Vector steps between two flushes of the 32-bit lane accumulators into the
/// 64-bit total. Each step adds at most 4 × 255² per lane, so 4096 steps stay
/// below `i32::MAX`.
pub(crate) const FLUSH_STEPS: usize = 4096;

/// Kernel entry point: `(pixels, pair, mask lanes) -> error`.
///
/// # Safety
/// Implementations may require a CPU feature; callers must only invoke a
/// pointer resolved for a level the host supports. `pixels` and `mask` must
/// have the same length and every mask lane must be `0` or `u32::MAX`.
pub(crate) type KernelFn = unsafe fn(&[Pixel], ColorPair, &[u32]) -> u64;
