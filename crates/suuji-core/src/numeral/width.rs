//! Full-width / half-width conversion for the ASCII printable range.

const WIDTH_OFFSET: u32 = 0xFEE0;
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Convert full-width characters (Ｕ+FF01..Ｕ+FF5E and the ideographic space)
/// to their ASCII counterparts. Other characters pass through.
pub fn full_width_to_half_width(input: &str) -> String {
    input.chars().map(to_half_width).collect()
}

/// Convert ASCII printable characters to their full-width counterparts.
pub fn half_width_to_full_width(input: &str) -> String {
    input.chars().map(to_full_width).collect()
}

pub fn to_half_width(character: char) -> char {
    match character {
        IDEOGRAPHIC_SPACE => ' ',
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(character as u32 - WIDTH_OFFSET).unwrap_or(character),
        _ => character,
    }
}

pub fn to_full_width(character: char) -> char {
    match character {
        ' ' => IDEOGRAPHIC_SPACE,
        '\u{21}'..='\u{7E}' => char::from_u32(character as u32 + WIDTH_OFFSET).unwrap_or(character),
        _ => character,
    }
}
