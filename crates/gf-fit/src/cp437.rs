//! IBM code page 437 → Unicode, for labelling glyphs of raw PC bitmap fonts.

/// Characters of codes 0x80..=0xFE.
const UPPER_HALF: [char; 127] = [
    // 0x80
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■',
];

/// Unicode character drawn by CP437 code `code`.
///
/// Control codes (0x00–0x1F), DEL (0x7F) and 0xFF (non-breaking space) have
/// no printable glyph and map to `None`.
///
/// # Example
/// ```
/// use gf_fit::cp437::to_char;
/// assert_eq!(to_char(b'A'), Some('A'));
/// assert_eq!(to_char(0xDB), Some('█'));
/// assert_eq!(to_char(0x07), None);
/// ```
#[must_use]
pub fn to_char(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E => Some(char::from(code)),
        0x80..=0xFE => Some(UPPER_HALF[usize::from(code - 0x80)]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_count() {
        assert_eq!((0..=255u8).filter_map(to_char).count(), 95 + 127);
    }

    #[test]
    fn block_elements_land_where_expected() {
        assert_eq!(to_char(0xB0), Some('░'));
        assert_eq!(to_char(0xDC), Some('▄'));
        assert_eq!(to_char(0xDF), Some('▀'));
        assert_eq!(to_char(0xFE), Some('■'));
        assert_eq!(to_char(0xFF), None);
        assert_eq!(to_char(0x7F), None);
    }
}
