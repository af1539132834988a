use std::fmt;

use serde::{Deserialize, Serialize};

/// Vector capability a kernel variant needs.
///
/// # Example
/// ```
/// use gf_core::level::KernelLevel;
/// assert_eq!(KernelLevel::Avx2.to_string(), "avx2");
/// assert_eq!(KernelLevel::Avx2.lanes(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelLevel {
    /// Plain per-pixel loop. Runs everywhere.
    Scalar,
    /// x86_64 SSE2, 4 pixels per step.
    Sse2,
    /// x86_64 AVX2, 8 pixels per step.
    Avx2,
    /// aarch64 NEON, 4 pixels per step.
    Neon,
}

impl KernelLevel {
    /// Every level, widest first within each architecture.
    pub const ALL: [Self; 4] = [Self::Avx2, Self::Sse2, Self::Neon, Self::Scalar];

    /// Lowercase name, as used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse2 => "sse2",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
        }
    }

    /// Pixels consumed per vector step.
    #[must_use]
    pub const fn lanes(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Sse2 | Self::Neon => 4,
            Self::Avx2 => 8,
        }
    }
}

impl fmt::Display for KernelLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
