use std::io::Write;

use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use gf_core::frame::CellGrid;
use gf_core::pixel::Pixel;

fn rgb(p: Pixel) -> Color {
    Color::Rgb {
        r: p.r,
        g: p.g,
        b: p.b,
    }
}

/// Écrit la grille en ANSI truecolor, une ligne terminal par rangée.
///
/// Color escapes are only emitted when a color changes from the previous cell.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn write_grid(out: &mut impl Write, grid: &CellGrid) -> Result<()> {
    for row in grid.rows() {
        let mut current: Option<(Pixel, Pixel)> = None;
        for cell in row {
            if current != Some((cell.fg, cell.bg)) {
                queue!(out, SetForegroundColor(rgb(cell.fg)), SetBackgroundColor(rgb(cell.bg)))?;
                current = Some((cell.fg, cell.bg));
            }
            queue!(out, Print(cell.ch))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()?;
    Ok(())
}
