use std::io::BufWriter;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use gf_core::block::CELL_PIXELS;
use gf_core::config::{CatalogKind, FitConfig, KernelChoice};
use gf_core::frame::CellGrid;
use gf_fit::catalog::GlyphCatalog;
use gf_fit::compositor::Compositor;
use gf_fit::dispatch;

pub mod ansi;
pub mod cli;
pub mod source;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    apply_overrides(&cli, &mut config);

    // 4. Pool rayon
    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("Impossible de configurer le pool de threads")?;
    }

    // 5. Kernel, fixé une fois pour tout le processus
    let kernel = dispatch::bind(config.kernel)?;

    // 6. Catalogue
    let catalog = build_catalog(&config)?;
    log::info!("Catalogue : {} glyphes", catalog.len());

    // 7. Source
    let start = Instant::now();
    let frame = source::load_image(&cli.image)?;
    let (columns, rows) =
        source::grid_size(frame.width, frame.height, config.columns, config.font_ratio);
    let frame = source::Resizer::new().fit_to_grid(&frame, columns, rows)?;
    log::info!(
        "Image {} chargée en {:.1?} ({columns}×{rows} cellules)",
        cli.image.display(),
        start.elapsed()
    );

    // 8. Ajustement
    let start = Instant::now();
    let compositor = Compositor::new(kernel, catalog, config.pair_mode)?;
    let mut grid = CellGrid::new(columns, rows);
    compositor.process(&frame, &mut grid)?;
    log::info!(
        "Ajustement en {:.1?}, erreur totale {}",
        start.elapsed(),
        grid.total_error()
    );

    // 9. Sortie
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    ansi::write_grid(&mut out, &grid)
}

/// Config file if present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<FitConfig> {
    if cli.config.exists() {
        gf_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(FitConfig::default())
    }
}

fn apply_overrides(cli: &cli::Cli, config: &mut FitConfig) {
    if let Some(ref name) = cli.kernel {
        config.kernel = KernelChoice::parse(name).unwrap_or_else(|| {
            log::warn!("Kernel inconnu '{name}', utilisation du défaut.");
            config.kernel
        });
    }
    if let Some(ref name) = cli.catalog {
        config.catalog = CatalogKind::parse(name).unwrap_or_else(|| {
            log::warn!("Catalogue inconnu '{name}', utilisation du défaut.");
            config.catalog
        });
    }
    if let Some(ref path) = cli.font {
        config.font_path = Some(path.clone());
        config.catalog = CatalogKind::Font;
    }
    if let Some(columns) = cli.columns {
        config.columns = columns;
    }
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if config.catalog == CatalogKind::Font && config.font_path.is_none() {
        log::warn!("--catalog font sans --font, retour au catalogue blocks");
        config.catalog = CatalogKind::Blocks;
    }
    config.clamp_all();
}

fn build_catalog(config: &FitConfig) -> Result<GlyphCatalog<CELL_PIXELS>> {
    match (config.catalog, config.font_path.as_deref()) {
        (CatalogKind::Ascii, _) => Ok(GlyphCatalog::ascii()),
        (CatalogKind::Font, Some(path)) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Impossible de lire la police {}", path.display()))?;
            GlyphCatalog::from_cp437_font(&bytes)
                .with_context(|| format!("Police invalide : {}", path.display()))
        }
        (CatalogKind::Blocks | CatalogKind::Font, _) => Ok(GlyphCatalog::blocks()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn parse(args: &[&str]) -> cli::Cli {
        let mut argv = vec!["glyphfit", "--image", "x.png"];
        argv.extend_from_slice(args);
        cli::Cli::parse_from(argv)
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = FitConfig::default();
        apply_overrides(
            &parse(&["--kernel", "scalar", "--catalog", "ascii", "--columns", "5000"]),
            &mut config,
        );
        assert_eq!(config.kernel, KernelChoice::Scalar);
        assert_eq!(config.catalog, CatalogKind::Ascii);
        assert_eq!(config.columns, 1000);
    }

    #[test]
    fn unknown_names_keep_previous_values() {
        let mut config = FitConfig {
            kernel: KernelChoice::Sse2,
            ..FitConfig::default()
        };
        apply_overrides(&parse(&["--kernel", "mmx", "--catalog", "emoji"]), &mut config);
        assert_eq!(config.kernel, KernelChoice::Sse2);
        assert_eq!(config.catalog, CatalogKind::Blocks);
    }

    #[test]
    fn font_flag_selects_font_catalog() {
        let mut config = FitConfig::default();
        apply_overrides(&parse(&["--font", "f.bin"]), &mut config);
        assert_eq!(config.catalog, CatalogKind::Font);
        assert_eq!(config.font_path, Some(PathBuf::from("f.bin")));

        let mut config = FitConfig::default();
        apply_overrides(&parse(&["--catalog", "font"]), &mut config);
        assert_eq!(config.catalog, CatalogKind::Blocks);
    }

    #[test]
    fn bad_font_file_is_reported() -> Result<()> {
        let missing = std::env::temp_dir().join("glyphfit-missing-font.bin");
        let config = FitConfig {
            catalog: CatalogKind::Font,
            font_path: Some(missing),
            ..FitConfig::default()
        };
        assert!(build_catalog(&config).is_err());
        assert_eq!(
            build_catalog(&FitConfig::default())?.len(),
            GlyphCatalog::blocks().len()
        );
        Ok(())
    }
}
