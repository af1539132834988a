use thiserror::Error;

use crate::level::KernelLevel;

/// Errors returned by the fitting engine.
///
/// Every operation either yields a complete result or one of these; there is
/// no partial output and nothing to retry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    /// Malformed shapes at the boundary of a public operation.
    #[error("Entrée invalide : {0}")]
    InvalidInput(#[from] InputFault),

    /// A kernel level was requested that the host CPU cannot run.
    #[error("Kernel {level} non supporté par ce processeur")]
    UnsupportedHardware {
        /// Requested level.
        level: KernelLevel,
    },
}

/// What exactly was wrong with the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFault {
    /// Pixel block length differs from the cell size.
    #[error("pixel block has {actual} pixels, expected {expected}")]
    BlockLength {
        /// Cell pixel count.
        expected: usize,
        /// Length received.
        actual: usize,
    },

    /// Glyph mask length differs from the cell size.
    #[error("glyph mask has {actual} positions, expected {expected}")]
    MaskLength {
        /// Cell pixel count.
        expected: usize,
        /// Length received.
        actual: usize,
    },

    /// The selector was handed a catalog with no glyphs.
    #[error("glyph catalog is empty")]
    EmptyCatalog,

    /// The selector was handed no candidate color pairs.
    #[error("no candidate color pairs")]
    NoColorPairs,

    /// Raw font data of the wrong size.
    #[error("font data is {actual} bytes, expected {expected}")]
    FontLength {
        /// Required byte count.
        expected: usize,
        /// Byte count received.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_fault_converts() {
        let err: FitError = InputFault::EmptyCatalog.into();
        assert_eq!(err, FitError::InvalidInput(InputFault::EmptyCatalog));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn hardware_error_names_level() {
        let err = FitError::UnsupportedHardware {
            level: KernelLevel::Avx2,
        };
        assert!(err.to_string().contains("avx2"));
    }
}
