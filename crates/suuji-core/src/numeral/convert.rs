//! Numeral conversion engine.
//!
//! Japanese text writes numbers in two incompatible ways:
//! - traditional style, where magnitude is spelled out with units and
//!   multipliers (二千三百, 47176百万)
//! - western style, a positional digit string where each kanji stands for one
//!   digit (二〇一九)
//!
//! Both can be mixed freely with ASCII and full-width digits. The dispatchers
//! [`clean_mixed`] and [`dirty_mixed`] pick the right strategy; the lower level
//! functions are exposed for callers that already know the style.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::table::{decimal_digit, digit_value, is_numeral, is_power_of_ten, lookup, NumeralType};
use crate::error::NumeralError;

/// Result type for numeral conversion.
pub type Result<T> = std::result::Result<T, NumeralError>;

const TEN_THOUSAND: i64 = 10_000;

/// Conversion strategy selectable by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionStyle {
    /// Strip noise, then dispatch.
    Dirty,
    /// Dispatch on numeral-only input.
    Clean,
    /// Positional-value numerals (二百万).
    Traditional,
    /// Digit-by-digit numerals (弐〇〇〇).
    Western,
    /// Values in `0..10000`.
    BelowTenThousand,
}

/// Convert `input` with the given strategy.
pub fn convert(input: &str, style: ConversionStyle) -> Result<i64> {
    match style {
        ConversionStyle::Dirty => dirty_mixed(input),
        ConversionStyle::Clean => clean_mixed(input),
        ConversionStyle::Traditional => traditional_style(input),
        ConversionStyle::Western => western_style(input),
        ConversionStyle::BelowTenThousand => below_ten_thousand(input),
    }
}

/// Convert a numeral whose value lies in `0..10000`.
///
/// Plain decimal strings (ASCII or full-width, optionally signed) are parsed
/// directly. Anything else is read as a traditional fragment, where every
/// digit must be followed by a unit unless it ends the string (二百五十五).
pub fn below_ten_thousand(input: &str) -> Result<i64> {
    if input.is_empty() {
        return Err(NumeralError::Empty);
    }

    let value = match plain_integer(input) {
        Some(parsed) => parsed?,
        None => traditional_fragment(input)?,
    };

    if value < 0 {
        return Err(NumeralError::Negative(input.to_string()));
    }
    if value >= TEN_THOUSAND {
        return Err(NumeralError::AboveTenThousand(input.to_string()));
    }

    Ok(value)
}

fn traditional_fragment(input: &str) -> Result<i64> {
    let characters: Vec<char> = input.chars().collect();
    let last_index = characters.len() - 1;

    let mut total = 0i64;
    let mut multiplier = 1i64;
    let mut remainder = 0i64;
    let mut previous: Option<NumeralType> = None;
    let mut last_unit = TEN_THOUSAND;

    for (index, &character) in characters.iter().enumerate() {
        let numeral = digit_value(character).map_err(|_| NumeralError::UnrecognizedCharacter {
            character,
            input: input.to_string(),
        })?;

        match numeral.kind {
            NumeralType::Multiple => {
                return Err(NumeralError::MultipleNotAllowed(input.to_string()));
            }
            NumeralType::Zero if characters.len() > 1 => {
                return Err(NumeralError::StrayZero(input.to_string()));
            }
            NumeralType::Regular if previous == Some(NumeralType::Regular) => {
                return Err(NumeralError::RepeatedRegular(input.to_string()));
            }
            NumeralType::Unit if numeral.value >= last_unit => {
                return Err(NumeralError::UnitOutOfOrder(input.to_string()));
            }
            NumeralType::Unit => last_unit = numeral.value,
            _ => {}
        }

        match (numeral.kind, index == last_index) {
            // 二百五十五 -> the trailing 五
            (NumeralType::Regular, true) => remainder = numeral.value,
            (NumeralType::Regular, false) => multiplier = numeral.value,
            (NumeralType::Unit, true) => total += numeral.value * multiplier,
            (NumeralType::Unit, false) => {
                total += numeral.value * multiplier;
                // 二千百 reads as 二千一百
                multiplier = 1;
            }
            _ => {}
        }

        previous = Some(numeral.kind);
    }

    Ok(total + remainder)
}

/// Convert a numeral that contains at least one unit or multiplier.
///
/// The string is split on multipliers (三百五十万二百 -> 三百五十 / 万 / 二百) and
/// each group is folded into the total. A group may start with a decimal run
/// that scales the rest of the group, so 47176百万 is 47176 × 100 × 10000.
pub fn traditional_style(input: &str) -> Result<i64> {
    if input.is_empty() {
        return Err(NumeralError::Empty);
    }
    if is_decimal(input) {
        return Err(NumeralError::NotTraditional(input.to_string()));
    }
    if let Some(character) = input.chars().find(|c| !is_numeral(*c)) {
        return Err(NumeralError::UnrecognizedCharacter {
            character,
            input: input.to_string(),
        });
    }

    let tokens = split_on_multiples(input);
    if tokens.is_empty() {
        return Err(NumeralError::NoParsableToken(input.to_string()));
    }

    let overflow = || NumeralError::Overflow(input.to_string());

    let mut total = 0i64;
    // A bare multiplier (万) or a western prefix (200万) scales by the base
    let mut base = 1i64;

    for token in tokens {
        if let Some(multiple) = single_multiple(token) {
            let scaled = base.checked_mul(multiple).ok_or_else(overflow)?;
            total = total.checked_add(scaled).ok_or_else(overflow)?;
            base = 0;
        } else if is_decimal(token) {
            base = plain_integer(token).ok_or_else(overflow)??;
        } else {
            base = mixed_group(token)?;
        }
    }

    total.checked_add(base).ok_or_else(overflow)
}

/// Resolve a group that mixes a leading decimal run with kanji (47176百, ９千２百).
fn mixed_group(token: &str) -> Result<i64> {
    let split_at = token
        .char_indices()
        .find(|(_, c)| decimal_digit(*c).is_none())
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    let (digits, fragment) = token.split_at(split_at);

    let prefix = if digits.is_empty() {
        1
    } else {
        plain_integer(digits).unwrap_or_else(|| Err(NumeralError::Overflow(token.to_string())))?
    };
    let fragment_value = below_ten_thousand(fragment)?;

    if prefix > fragment_value {
        trace!(token, prefix, fragment_value, "decimal run scales the fragment");
        prefix
            .checked_mul(fragment_value)
            .ok_or_else(|| NumeralError::Overflow(token.to_string()))
    } else {
        // The leading digit belongs to the fragment itself, as in ９千２百３十４
        below_ten_thousand(token)
    }
}

fn split_on_multiples(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (index, character) in input.char_indices() {
        if lookup(character).is_some_and(|n| n.kind == NumeralType::Multiple) {
            if start < index {
                tokens.push(&input[start..index]);
            }
            let end = index + character.len_utf8();
            tokens.push(&input[index..end]);
            start = end;
        }
    }
    if start < input.len() {
        tokens.push(&input[start..]);
    }

    tokens
}

fn single_multiple(token: &str) -> Option<i64> {
    let mut characters = token.chars();
    let character = characters.next()?;
    if characters.next().is_some() {
        return None;
    }
    lookup(character)
        .filter(|n| n.kind == NumeralType::Multiple)
        .map(|n| n.value)
}

/// Convert a digit-by-digit kanji numeral such as 弐〇〇〇 or 一九九九.
///
/// Only kanji digits are accepted; decimal digits, units and multipliers are
/// rejected. Different spellings of the same digit may be mixed (弐〇零).
pub fn western_style(input: &str) -> Result<i64> {
    if input.is_empty() {
        return Err(NumeralError::Empty);
    }

    let mut value = 0i64;
    for character in input.chars() {
        let numeral = lookup(character).ok_or_else(|| NumeralError::UnrecognizedCharacter {
            character,
            input: input.to_string(),
        })?;

        match numeral.kind {
            NumeralType::Zero | NumeralType::Regular => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(numeral.value))
                    .ok_or_else(|| NumeralError::Overflow(input.to_string()))?;
            }
            NumeralType::Unit | NumeralType::Multiple => {
                return Err(NumeralError::UnitNotAllowed(input.to_string()));
            }
        }
    }

    Ok(value)
}

/// Convert a numeral made only of kanji numerals and decimal digits.
pub fn clean_mixed(input: &str) -> Result<i64> {
    if input.is_empty() {
        return Err(NumeralError::Empty);
    }

    if input.chars().any(is_power_of_ten) {
        trace!(input, "dispatching to traditional style");
        return traditional_style(input);
    }

    match plain_integer(input) {
        Some(value) => value,
        None => {
            trace!(input, "dispatching to western style");
            western_style(input)
        }
    }
}

/// Convert a numeral embedded in noise such as separators, currency marks or
/// unrelated text ("JPY47,176百万", "1999年").
///
/// Only numeral characters and decimal digits are kept before dispatching.
pub fn dirty_mixed(input: &str) -> Result<i64> {
    if input.is_empty() {
        return Err(NumeralError::Empty);
    }

    let cleaned: String = input.chars().filter(|c| is_numeral(*c)).collect();
    if cleaned.is_empty() {
        return Err(NumeralError::NoParsableToken(input.to_string()));
    }

    clean_mixed(&cleaned)
}

fn is_decimal(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| decimal_digit(c).is_some())
}

/// Parse an optionally signed string of ASCII or full-width digits.
///
/// Returns `None` when the input is not a plain decimal number.
fn plain_integer(input: &str) -> Option<Result<i64>> {
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if !is_decimal(digits) {
        return None;
    }

    let mut value = 0i64;
    for character in digits.chars() {
        let digit = decimal_digit(character)?;
        value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(value) => value,
            None => return Some(Err(NumeralError::Overflow(input.to_string()))),
        };
    }

    Some(Ok(if negative { -value } else { value }))
}
