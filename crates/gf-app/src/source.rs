use std::path::Path;

use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer as FirResizer};
use gf_core::block::{CELL_HEIGHT, CELL_WIDTH};
use gf_core::frame::FrameBuffer;

/// Charge une image depuis le disque en RGBA8.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}

/// Grid size in cells for an image of `width` × `height` pixels shown on
/// `columns` terminal columns whose cells are `font_ratio` as wide as tall.
#[must_use]
pub fn grid_size(width: u32, height: u32, columns: u16, font_ratio: f32) -> (u16, u16) {
    let columns = columns.max(1);
    if width == 0 || height == 0 {
        return (columns, 1);
    }
    let rows = (f32::from(columns) * height as f32 / width as f32 * font_ratio).round();
    (columns, rows.clamp(1.0, f32::from(u16::MAX)) as u16)
}

/// Resizer réutilisable wrappant fast_image_resize.
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (fast_image_resize wants `&mut` on it).
    src_buf: Vec<u8>,
}

impl Resizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new(),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<()> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .context("Dimensions source invalides")?;
        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .context("Dimensions destination invalides")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Échec du redimensionnement")?;
        Ok(())
    }

    /// Resize `src` to exactly `columns × rows` cells of 8×8 pixels.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    pub fn fit_to_grid(&mut self, src: &FrameBuffer, columns: u16, rows: u16) -> Result<FrameBuffer> {
        let mut dst = FrameBuffer::new(
            u32::from(columns) * CELL_WIDTH as u32,
            u32::from(rows) * CELL_HEIGHT as u32,
        );
        self.resize_into(src, &mut dst)?;
        Ok(dst)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}
