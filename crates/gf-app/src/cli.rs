use std::path::PathBuf;

use clap::Parser;

/// glyphfit : image → glyphes + couleurs terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Kernel : auto, scalar, sse2, avx2, neon.
    #[arg(long)]
    pub kernel: Option<String>,

    /// Catalogue de glyphes : blocks, ascii, font.
    #[arg(long)]
    pub catalog: Option<String>,

    /// Police brute 8×8 CP437 (implique --catalog font).
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Largeur de sortie en cellules.
    #[arg(long)]
    pub columns: Option<u16>,

    /// Threads de calcul (0 = un par cœur).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
