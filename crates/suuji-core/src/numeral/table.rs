//! Static numeral table: every recognised kanji numeral with its magnitude and class.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::NumeralError;

/// Grammatical class of a numeral character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralType {
    /// 〇, 零 and the decimal digit zero.
    Zero,
    /// A digit from one to nine.
    Regular,
    /// Positional multiplier below ten thousand (十, 百, 千).
    Unit,
    /// Scale multiplier from ten thousand upwards (万, 億, 兆, 京).
    Multiple,
}

/// A numeral character together with its magnitude and class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterValue {
    pub character: char,
    pub value: i64,
    pub kind: NumeralType,
}

impl CharacterValue {
    const fn new(character: char, value: i64, kind: NumeralType) -> Self {
        Self {
            character,
            value,
            kind,
        }
    }

    /// True for Unit and Multiple characters.
    pub fn is_power_of_ten(&self) -> bool {
        matches!(self.kind, NumeralType::Unit | NumeralType::Multiple)
    }
}

use NumeralType::{Multiple, Regular, Unit, Zero};

/// The numeral alphabet.
pub static NUMERALS: [CharacterValue; 23] = [
    CharacterValue::new('〇', 0, Zero),
    CharacterValue::new('零', 0, Zero),
    CharacterValue::new('一', 1, Regular),
    CharacterValue::new('二', 2, Regular),
    CharacterValue::new('三', 3, Regular),
    CharacterValue::new('四', 4, Regular),
    CharacterValue::new('五', 5, Regular),
    CharacterValue::new('六', 6, Regular),
    CharacterValue::new('七', 7, Regular),
    CharacterValue::new('八', 8, Regular),
    CharacterValue::new('九', 9, Regular),
    CharacterValue::new('十', 10, Unit),
    CharacterValue::new('百', 100, Unit),
    CharacterValue::new('千', 1_000, Unit),
    CharacterValue::new('万', 10_000, Multiple),
    CharacterValue::new('億', 100_000_000, Multiple),
    CharacterValue::new('兆', 1_000_000_000_000, Multiple),
    CharacterValue::new('京', 10_000_000_000_000_000, Multiple),
    // Formal forms used on contracts and banknotes
    CharacterValue::new('壱', 1, Regular),
    CharacterValue::new('弐', 2, Regular),
    CharacterValue::new('参', 3, Regular),
    CharacterValue::new('拾', 10, Unit),
    CharacterValue::new('萬', 10_000, Multiple),
];

lazy_static! {
    /// Every character of the numeral alphabet.
    pub static ref ALL_NUMERALS: Vec<char> = NUMERALS.iter().map(|n| n.character).collect();

    /// Unit and Multiple characters; their presence marks a traditional numeral.
    pub static ref POWERS_OF_TEN: Vec<char> = NUMERALS
        .iter()
        .filter(|n| n.is_power_of_ten())
        .map(|n| n.character)
        .collect();

    /// Multiple characters; traditional numerals are split on these.
    pub static ref MULTIPLES: Vec<char> = NUMERALS
        .iter()
        .filter(|n| n.kind == Multiple)
        .map(|n| n.character)
        .collect();

    /// Kanji that stand for a single digit (Zero and Regular).
    pub static ref KANJI_DIGITS: Vec<char> = kanji_in_range(0, 9);
}

/// Look up a character in the numeral alphabet.
pub fn lookup(character: char) -> Option<CharacterValue> {
    NUMERALS.iter().find(|n| n.character == character).copied()
}

/// Kanji whose magnitude lies in `low..=high`, in table order.
pub fn kanji_in_range(low: i64, high: i64) -> Vec<char> {
    NUMERALS
        .iter()
        .filter(|n| (low..=high).contains(&n.value))
        .map(|n| n.character)
        .collect()
}

/// Value of an ASCII or full-width decimal digit.
pub fn decimal_digit(character: char) -> Option<i64> {
    match character {
        '0'..='9' => Some(character as i64 - '0' as i64),
        '０'..='９' => Some(character as i64 - '０' as i64),
        _ => None,
    }
}

/// True if the character belongs to the numeral alphabet or is a decimal digit.
pub fn is_numeral(character: char) -> bool {
    decimal_digit(character).is_some() || lookup(character).is_some()
}

/// True if the character is a Unit or Multiple.
pub fn is_power_of_ten(character: char) -> bool {
    lookup(character).is_some_and(|n| n.is_power_of_ten())
}

/// Resolve a kanji numeral or a decimal digit.
///
/// Decimal zero maps to [`NumeralType::Zero`], other decimal digits to
/// [`NumeralType::Regular`].
pub fn digit_value(character: char) -> Result<CharacterValue, NumeralError> {
    if let Some(numeral) = lookup(character) {
        return Ok(numeral);
    }

    match decimal_digit(character) {
        Some(0) => Ok(CharacterValue::new(character, 0, Zero)),
        Some(value) => Ok(CharacterValue::new(character, value, Regular)),
        None => Err(NumeralError::UnrecognizedCharacter {
            character,
            input: character.to_string(),
        }),
    }
}
