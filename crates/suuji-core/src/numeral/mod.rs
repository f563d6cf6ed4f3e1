//! Japanese numeral handling.
//!
//! - [`table`]: the static numeral alphabet and derived character sets
//! - [`convert`]: the conversion engine (traditional, western, mixed)
//! - [`width`]: full-width / half-width normalisation

pub mod convert;
pub mod table;
pub mod width;

pub use convert::{
    below_ten_thousand, clean_mixed, convert, dirty_mixed, traditional_style, western_style,
    ConversionStyle,
};
pub use table::{digit_value, is_numeral, lookup, CharacterValue, NumeralType};
pub use width::{full_width_to_half_width, half_width_to_full_width};
