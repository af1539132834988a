use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::level::KernelLevel;

/// Configuration du moteur d'ajustement et de la sortie.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gf_core::config::{FitConfig, KernelChoice};
/// let config = FitConfig::default();
/// assert_eq!(config.kernel, KernelChoice::Auto);
/// assert_eq!(config.columns, 80);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FitConfig {
    // === Moteur ===
    /// Kernel variant to bind at startup.
    pub kernel: KernelChoice,
    /// Glyph catalog to search.
    pub catalog: CatalogKind,
    /// Raw 8×8 CP437 font dump, required by `CatalogKind::Font`.
    pub font_path: Option<PathBuf>,
    /// Where candidate color pairs come from.
    pub pair_mode: PairMode,
    /// Worker threads for frame fitting. 0 = rayon default.
    pub threads: usize,

    // === Sortie ===
    /// Output width in terminal cells.
    pub columns: u16,
    /// Terminal cell width / height (typiquement 0.5 pour les polices terminal).
    pub font_ratio: f32,
}

/// Kernel selection policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelChoice {
    /// Fastest variant the host supports.
    #[default]
    Auto,
    /// Scalar reference.
    Scalar,
    /// x86_64 SSE2.
    Sse2,
    /// x86_64 AVX2.
    Avx2,
    /// aarch64 NEON.
    Neon,
}

impl KernelChoice {
    /// The forced level, if any.
    #[must_use]
    pub const fn level(self) -> Option<KernelLevel> {
        match self {
            Self::Auto => None,
            Self::Scalar => Some(KernelLevel::Scalar),
            Self::Sse2 => Some(KernelLevel::Sse2),
            Self::Avx2 => Some(KernelLevel::Avx2),
            Self::Neon => Some(KernelLevel::Neon),
        }
    }

    /// Parse a command-line name ("auto", "scalar", "sse2", "avx2", "neon").
    ///
    /// # Example
    /// ```
    /// use gf_core::config::KernelChoice;
    /// assert_eq!(KernelChoice::parse("AVX2"), Some(KernelChoice::Avx2));
    /// assert_eq!(KernelChoice::parse("mmx"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "scalar" => Some(Self::Scalar),
            "sse2" => Some(Self::Sse2),
            "avx2" => Some(Self::Avx2),
            "neon" => Some(Self::Neon),
            _ => None,
        }
    }
}

/// Built-in glyph catalogs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Block elements: halves, quadrants, sextants, eighths.
    #[default]
    Blocks,
    /// Printable ASCII shapes.
    Ascii,
    /// Glyphs of a raw CP437 bitmap font (`font_path`).
    Font,
}

impl CatalogKind {
    /// Parse a command-line name ("blocks", "ascii", "font").
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "blocks" => Some(Self::Blocks),
            "ascii" => Some(Self::Ascii),
            "font" => Some(Self::Font),
            _ => None,
        }
    }
}

/// Source of candidate color pairs per cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairMode {
    /// Per glyph: mean of the pixels under the mask, mean of the rest.
    #[default]
    MaskMeans,
    /// Per cell: brightest pixel as foreground, darkest as background, plus the swap.
    LumaExtremes,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            kernel: KernelChoice::Auto,
            catalog: CatalogKind::Blocks,
            font_path: None,
            pair_mode: PairMode::MaskMeans,
            threads: 0,
            columns: 80,
            font_ratio: 0.5,
        }
    }
}

impl FitConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.columns = self.columns.clamp(1, 1000);
        self.font_ratio = if self.font_ratio.is_finite() {
            self.font_ratio.clamp(0.1, 2.0)
        } else {
            0.5
        };
        self.threads = self.threads.min(256);
    }
}

/// Top-level TOML structure.
#[derive(Deserialize)]
struct ConfigFile {
    fit: Option<FitSection>,
    output: Option<OutputSection>,
}

/// `[fit]` section, all fields optional.
#[derive(Deserialize)]
struct FitSection {
    kernel: Option<KernelChoice>,
    catalog: Option<CatalogKind>,
    font_path: Option<PathBuf>,
    pair_mode: Option<PairMode>,
    threads: Option<usize>,
}

/// `[output]` section, all fields optional.
#[derive(Deserialize)]
struct OutputSection {
    columns: Option<u16>,
    font_ratio: Option<f32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gf_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<FitConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use gf_core::config::{parse_config, CatalogKind};
/// let config = parse_config("[fit]\ncatalog = \"ascii\"\n").unwrap();
/// assert_eq!(config.catalog, CatalogKind::Ascii);
/// ```
pub fn parse_config(content: &str) -> Result<FitConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = FitConfig::default();

    if let Some(f) = file.fit {
        if let Some(v) = f.kernel {
            config.kernel = v;
        }
        if let Some(v) = f.catalog {
            config.catalog = v;
        }
        if let Some(v) = f.font_path {
            config.font_path = Some(v);
        }
        if let Some(v) = f.pair_mode {
            config.pair_mode = v;
        }
        if let Some(v) = f.threads {
            config.threads = v;
        }
    }

    if let Some(o) = file.output {
        if let Some(v) = o.columns {
            config.columns = v;
        }
        if let Some(v) = o.font_ratio {
            config.font_ratio = v;
        }
    }

    if config.catalog == CatalogKind::Font && config.font_path.is_none() {
        log::warn!("catalog = \"font\" sans font_path, retour au catalogue blocks");
        config.catalog = CatalogKind::Blocks;
    }

    config.clamp_all();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() -> Result<()> {
        assert_eq!(parse_config("")?, FitConfig::default());
        Ok(())
    }

    #[test]
    fn sections_merge_over_defaults() -> Result<()> {
        let config = parse_config(
            "[fit]\nkernel = \"scalar\"\npair_mode = \"luma_extremes\"\n\n[output]\ncolumns = 120\n",
        )?;
        assert_eq!(config.kernel, KernelChoice::Scalar);
        assert_eq!(config.pair_mode, PairMode::LumaExtremes);
        assert_eq!(config.columns, 120);
        assert_eq!(config.catalog, CatalogKind::Blocks);
        assert!((config.font_ratio - 0.5).abs() < f32::EPSILON);
        Ok(())
    }

    #[test]
    fn out_of_range_values_are_clamped() -> Result<()> {
        let config = parse_config("[output]\ncolumns = 0\nfont_ratio = 9.0\n")?;
        assert_eq!(config.columns, 1);
        assert!((config.font_ratio - 2.0).abs() < f32::EPSILON);
        Ok(())
    }

    #[test]
    fn font_catalog_without_path_falls_back() -> Result<()> {
        let config = parse_config("[fit]\ncatalog = \"font\"\n")?;
        assert_eq!(config.catalog, CatalogKind::Blocks);
        Ok(())
    }

    #[test]
    fn unknown_kernel_is_rejected() {
        assert!(parse_config("[fit]\nkernel = \"mmx\"\n").is_err());
    }

    #[test]
    fn load_from_disk() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[fit]\ncatalog = \"font\"\nfont_path = \"vga.f08\"")?;
        let config = load_config(file.path())?;
        assert_eq!(config.catalog, CatalogKind::Font);
        assert_eq!(config.font_path, Some(PathBuf::from("vga.f08")));
        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let msg = load_config(Path::new("/nonexistent/glyphfit.toml"))
            .err()
            .map(|e| format!("{e:#}"))
            .unwrap_or_default();
        assert!(msg.contains("glyphfit.toml"));
    }
}
