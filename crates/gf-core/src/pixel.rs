use serde::{Deserialize, Serialize};

/// Channels stored per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Channels counted by the fitting error. Alpha carries no visual meaning
/// in a terminal cell and is never scored.
pub const COLOR_CHANNELS: usize = 3;

/// Un pixel RGBA 8 bits par canal.
///
/// `#[repr(C)]` fixe l'ordre mémoire R, G, B, A : les kernels vectoriels
/// chargent directement des tranches de `Pixel` comme des octets.
///
/// # Example
/// ```
/// use gf_core::pixel::Pixel;
/// let p = Pixel::rgb(255, 128, 0);
/// assert_eq!(p.a, 255);
/// assert_eq!(p.to_u32().to_le_bytes(), [255, 128, 0, 255]);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Pixel {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha. Stored, never scored.
    pub a: u8,
}

impl Pixel {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build a pixel from all four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque pixel.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels in memory order.
    #[inline(always)]
    #[must_use]
    pub const fn channels(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }

    /// Pack the four channels so that the little-endian bytes of the result
    /// match the pixel's memory layout.
    #[inline(always)]
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.channels())
    }

    /// Sum of squared per-channel differences over the color channels.
    ///
    /// # Example
    /// ```
    /// use gf_core::pixel::Pixel;
    /// let a = Pixel::new(10, 20, 30, 0);
    /// let b = Pixel::new(13, 16, 30, 255);
    /// assert_eq!(a.distance_sq(b), 9 + 16);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn distance_sq(self, other: Self) -> u32 {
        let a = self.channels();
        let b = other.channels();
        let mut sum = 0u32;
        for c in 0..COLOR_CHANNELS {
            let d = i32::from(a[c]) - i32::from(b[c]);
            sum += (d * d) as u32;
        }
        sum
    }

    /// Luminance perceptuelle BT.709, poids entiers.
    ///
    /// # Example
    /// ```
    /// use gf_core::pixel::Pixel;
    /// assert_eq!(Pixel::WHITE.luminance(), 255);
    /// assert_eq!(Pixel::BLACK.luminance(), 0);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(self) -> u8 {
        ((u32::from(self.r) * 2126 + u32::from(self.g) * 7152 + u32::from(self.b) * 722) / 10000)
            as u8
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

/// Foreground/background candidate colors for one cell.
///
/// # Example
/// ```
/// use gf_core::pixel::{ColorPair, Pixel};
/// let pair = ColorPair::new(Pixel::WHITE, Pixel::BLACK);
/// assert_eq!(pair.swapped().fg, Pixel::BLACK);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ColorPair {
    /// Color of mask positions set to foreground.
    pub fg: Pixel,
    /// Color of every other position.
    pub bg: Pixel,
}

impl ColorPair {
    /// Build a pair.
    #[must_use]
    pub const fn new(fg: Pixel, bg: Pixel) -> Self {
        Self { fg, bg }
    }

    /// Same pair with the roles exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            fg: self.bg,
            bg: self.fg,
        }
    }

    /// Candidate color for a position, given its mask bit.
    #[inline(always)]
    #[must_use]
    pub const fn pick(self, foreground: bool) -> Pixel {
        if foreground { self.fg } else { self.bg }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_not_scored() {
        let a = Pixel::new(1, 2, 3, 0);
        let b = Pixel::new(1, 2, 3, 255);
        assert_eq!(a.distance_sq(b), 0);
    }

    #[test]
    fn distance_is_symmetric_and_bounded() {
        let max = Pixel::new(255, 255, 255, 255);
        let min = Pixel::new(0, 0, 0, 0);
        assert_eq!(max.distance_sq(min), 3 * 255 * 255);
        assert_eq!(min.distance_sq(max), max.distance_sq(min));
    }

    #[test]
    fn memory_layout_matches_packing() {
        let p = Pixel::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(p.to_u32(), 0x4433_2211);
        assert_eq!(std::mem::size_of::<Pixel>(), CHANNELS);
    }

    #[test]
    fn pick_follows_mask_bit() {
        let pair = ColorPair::new(Pixel::WHITE, Pixel::BLACK);
        assert_eq!(pair.pick(true), Pixel::WHITE);
        assert_eq!(pair.pick(false), Pixel::BLACK);
    }
}
