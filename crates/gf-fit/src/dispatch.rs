//! Runtime kernel selection.
//!
//! The host CPU is probed once; the fastest supported variant is resolved to
//! a function pointer and fixed for the rest of the process. Callers hold a
//! [`Kernel`] handle (it is `Copy`) and pay one indirect call per evaluation,
//! no per-call branching.

use std::fmt;
use std::sync::OnceLock;

use gf_core::block::{GlyphMask, PixelBlock};
use gf_core::config::KernelChoice;
use gf_core::error::FitError;
use gf_core::level::KernelLevel;
use gf_core::pixel::ColorPair;

#[cfg(target_arch = "aarch64")]
use crate::kernel::neon;
use crate::kernel::{KernelFn, scalar};
#[cfg(target_arch = "x86_64")]
use crate::kernel::{avx2, sse2};

/// A resolved error kernel.
///
/// Only constructible for a level the host supports, which is what makes
/// [`Kernel::error`] safe to call.
///
/// # Example
/// ```
/// use gf_core::block::{GlyphMask, PixelBlock};
/// use gf_core::pixel::{ColorPair, Pixel};
/// use gf_fit::dispatch::Kernel;
///
/// let kernel = Kernel::detect();
/// let block = PixelBlock::<4>::filled(Pixel::WHITE);
/// let pair = ColorPair::new(Pixel::WHITE, Pixel::BLACK);
/// assert_eq!(kernel.error(&block, pair, &GlyphMask::full()), 0);
/// ```
#[derive(Clone, Copy)]
pub struct Kernel {
    level: KernelLevel,
    func: KernelFn,
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel").field("level", &self.level).finish()
    }
}

impl PartialEq for Kernel {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
    }
}

impl Eq for Kernel {}

impl Kernel {
    /// The scalar reference. Available on every host.
    #[must_use]
    pub fn scalar() -> Self {
        Self {
            level: KernelLevel::Scalar,
            func: scalar::calc_error as KernelFn,
        }
    }

    /// Fastest variant the host supports, falling back to narrower vectors
    /// and finally the scalar reference.
    #[must_use]
    pub fn detect() -> Self {
        KernelLevel::ALL
            .into_iter()
            .find_map(|level| Self::with_level(level).ok())
            .unwrap_or_else(Self::scalar)
    }

    /// A specific variant.
    ///
    /// # Errors
    /// Returns [`FitError::UnsupportedHardware`] if the host cannot run it.
    pub fn with_level(level: KernelLevel) -> Result<Self, FitError> {
        if !is_supported(level) {
            return Err(FitError::UnsupportedHardware { level });
        }
        Ok(Self {
            level,
            func: resolve(level),
        })
    }

    /// Resolve a configured choice.
    ///
    /// # Errors
    /// Returns [`FitError::UnsupportedHardware`] for a forced level the host
    /// cannot run.
    pub fn from_choice(choice: KernelChoice) -> Result<Self, FitError> {
        match choice.level() {
            None => Ok(Self::detect()),
            Some(level) => Self::with_level(level),
        }
    }

    /// Every level this host can run, widest first.
    #[must_use]
    pub fn available_levels() -> Vec<KernelLevel> {
        KernelLevel::ALL
            .into_iter()
            .filter(|&level| is_supported(level))
            .collect()
    }

    /// Level this handle runs.
    #[must_use]
    pub fn level(&self) -> KernelLevel {
        self.level
    }

    /// Fitting error of `block` rendered as `mask` in `pair`.
    #[inline(always)]
    #[must_use]
    #[allow(unsafe_code)]
    pub fn error<const N: usize>(
        &self,
        block: &PixelBlock<N>,
        pair: ColorPair,
        mask: &GlyphMask<N>,
    ) -> u64 {
        // SAFETY: `func` was resolved for `self.level`, which `is_supported`
        // confirmed on this host when the handle was built. Block and mask
        // both hold exactly N entries and mask lanes are 0 or u32::MAX.
        unsafe { (self.func)(block.as_slice(), pair, mask.lanes()) }
    }
}

fn is_supported(level: KernelLevel) -> bool {
    match level {
        KernelLevel::Scalar => true,
        #[cfg(target_arch = "x86_64")]
        KernelLevel::Sse2 => std::arch::is_x86_feature_detected!("sse2"),
        #[cfg(target_arch = "x86_64")]
        KernelLevel::Avx2 => std::arch::is_x86_feature_detected!("avx2"),
        #[cfg(target_arch = "aarch64")]
        KernelLevel::Neon => std::arch::is_aarch64_feature_detected!("neon"),
        _ => false,
    }
}

fn resolve(level: KernelLevel) -> KernelFn {
    match level {
        #[cfg(target_arch = "x86_64")]
        KernelLevel::Avx2 => avx2::calc_error as KernelFn,
        #[cfg(target_arch = "x86_64")]
        KernelLevel::Sse2 => sse2::calc_error as KernelFn,
        #[cfg(target_arch = "aarch64")]
        KernelLevel::Neon => neon::calc_error as KernelFn,
        _ => scalar::calc_error as KernelFn,
    }
}

/// Process-wide binding, written once.
static ACTIVE: OnceLock<Kernel> = OnceLock::new();

/// Bind the process-wide kernel from configuration.
///
/// The first successful call (or the first [`active`] call) fixes the
/// binding. Later calls return the existing binding unchanged.
///
/// # Errors
/// Returns [`FitError::UnsupportedHardware`] for a forced level the host
/// cannot run. Nothing is bound in that case.
pub fn bind(choice: KernelChoice) -> Result<Kernel, FitError> {
    let wanted = Kernel::from_choice(choice)?;
    let bound = *ACTIVE.get_or_init(|| {
        log::info!(
            "Kernel d'erreur : {} ({} pixels par pas)",
            wanted.level,
            wanted.level.lanes()
        );
        wanted
    });
    if bound != wanted {
        log::warn!(
            "Kernel déjà fixé à {}, {} ignoré",
            bound.level,
            wanted.level
        );
    }
    Ok(bound)
}

/// The process-wide kernel, detecting and binding it on first use.
#[must_use]
pub fn active() -> Kernel {
    *ACTIVE.get_or_init(|| {
        let kernel = Kernel::detect();
        log::info!(
            "Kernel d'erreur : {} ({} pixels par pas)",
            kernel.level,
            kernel.level.lanes()
        );
        kernel
    })
}

#[cfg(test)]
mod tests {
    use gf_core::pixel::Pixel;

    use super::*;

    #[test]
    fn scalar_is_always_available() {
        assert!(Kernel::available_levels().contains(&KernelLevel::Scalar));
        assert_eq!(Kernel::scalar().level(), KernelLevel::Scalar);
    }

    #[test]
    fn detect_picks_first_available() {
        let levels = Kernel::available_levels();
        assert_eq!(Some(&Kernel::detect().level()), levels.first());
    }

    #[test]
    fn unsupported_level_is_reported() {
        #[cfg(target_arch = "x86_64")]
        let foreign = KernelLevel::Neon;
        #[cfg(not(target_arch = "x86_64"))]
        let foreign = KernelLevel::Avx2;
        assert_eq!(
            Kernel::with_level(foreign),
            Err(FitError::UnsupportedHardware { level: foreign })
        );
    }

    #[test]
    fn auto_choice_matches_detect() -> Result<(), FitError> {
        assert_eq!(Kernel::from_choice(KernelChoice::Auto)?, Kernel::detect());
        assert_eq!(
            Kernel::from_choice(KernelChoice::Scalar)?,
            Kernel::scalar()
        );
        Ok(())
    }

    #[test]
    fn binding_is_fixed_once() -> Result<(), FitError> {
        let first = active();
        assert_eq!(bind(KernelChoice::Auto)?, first);
        assert_eq!(bind(KernelChoice::Scalar)?, first);
        assert_eq!(active(), first);
        Ok(())
    }

    #[test]
    fn every_level_agrees_on_a_gradient() -> Result<(), FitError> {
        let block = PixelBlock::<64>::from_fn(|i| {
            let v = (i * 4) as u8;
            Pixel::new(v, 255 - v, v / 2, v)
        });
        let mask = GlyphMask::from_bits(0x0F0F_F0F0_3C3C_C3C3);
        let pair = ColorPair::new(Pixel::rgb(250, 3, 128), Pixel::rgb(1, 200, 60));
        let expected = Kernel::scalar().error(&block, pair, &mask);
        for level in Kernel::available_levels() {
            assert_eq!(
                Kernel::with_level(level)?.error(&block, pair, &mask),
                expected,
                "{level} diverges from scalar"
            );
        }
        Ok(())
    }
}
