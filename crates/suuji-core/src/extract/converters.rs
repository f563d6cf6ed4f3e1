//! Field converters shared by the extractors.
//!
//! Every converter maps an empty capture to [`FieldValue::Absent`].

use super::{FieldValue, Result};
use crate::error::ExtractionError;
use crate::models::config::{relative_offset, RelativeToken};
use crate::models::{Day, Era, Month, PostalCode, TimeDecorator, Year};
use crate::numeral::table::{decimal_digit, lookup, NumeralType};
use crate::numeral::{clean_mixed, dirty_mixed};

/// Keep the raw capture.
pub fn text(raw: &str) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }
    Ok(FieldValue::Text(raw.to_string()))
}

/// Year: relative word, era year (平成三一年, 令和元年) or a numeral.
pub fn parse_year(
    raw: &str,
    relative: &[RelativeToken],
    eras: &[Era],
    suffixes: &[String],
    first_era_year: &[String],
) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }

    if let Some(offset) = relative_offset(relative, raw) {
        return Ok(FieldValue::Year(Year::relative(offset)));
    }

    if let Some(era) = eras.iter().find(|e| raw.starts_with(e.name.as_str())) {
        let era_year = strip_any_suffix(&raw[era.name.len()..], suffixes);
        let value = if first_era_year.iter().any(|token| token == era_year) {
            1
        } else {
            dirty_mixed(era_year).map_err(|e| ExtractionError::numeral("year", e))?
        };
        let year = era.to_gregorian(value).ok_or_else(|| {
            ExtractionError::invalid("year", raw, format!("{} has no year {value}", era.name))
        })?;
        return Ok(FieldValue::Year(Year::absolute(year)));
    }

    let value = dirty_mixed(raw).map_err(|e| ExtractionError::numeral("year", e))?;
    Ok(FieldValue::Year(Year::absolute(value)))
}

/// Month: relative word or a numeral in `1..=12`.
pub fn parse_month(raw: &str, relative: &[RelativeToken]) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }

    if let Some(offset) = relative_offset(relative, raw) {
        return Ok(FieldValue::Month(Month::relative(offset)));
    }

    let value = dirty_mixed(raw).map_err(|e| ExtractionError::numeral("month", e))?;
    if !(1..=12).contains(&value) {
        return Err(ExtractionError::invalid("month", raw, "not between 1 and 12"));
    }
    Ok(FieldValue::Month(Month::absolute(value)))
}

/// Day of month: a numeral in `1..=31`.
pub fn parse_day(raw: &str) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }

    let value = dirty_mixed(raw).map_err(|e| ExtractionError::numeral("day", e))?;
    if !(1..=31).contains(&value) {
        return Err(ExtractionError::invalid("day", raw, "not between 1 and 31"));
    }
    Ok(FieldValue::Day(Day::absolute(value)))
}

/// AM/PM decorator.
pub fn parse_time_decorator(raw: &str, am: &[String], pm: &[String]) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }
    if am.iter().any(|token| token == raw) {
        return Ok(FieldValue::Decorator(TimeDecorator::Am));
    }
    if pm.iter().any(|token| token == raw) {
        return Ok(FieldValue::Decorator(TimeDecorator::Pm));
    }
    Err(ExtractionError::UnknownToken {
        field: "time decorator".to_string(),
        value: raw.to_string(),
    })
}

pub fn parse_time_hour(raw: &str) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }
    let hour = clean_mixed(raw).map_err(|e| ExtractionError::numeral("hour", e))?;
    Ok(FieldValue::Integer(hour))
}

/// Minutes, with the half-hour token (半) read as 30.
pub fn parse_time_minute(raw: &str, half_hour: &[String]) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }
    if half_hour.iter().any(|token| token == raw) {
        return Ok(FieldValue::Integer(30));
    }
    let minute = clean_mixed(raw).map_err(|e| ExtractionError::numeral("minute", e))?;
    Ok(FieldValue::Integer(minute))
}

/// Postal code written with any mix of ASCII, full-width and kanji digits.
///
/// Characters that are not single digits (separators) are dropped.
pub fn parse_postal_code(raw: &str) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }

    let digits: String = raw.chars().filter_map(single_digit).collect();
    PostalCode::from_string(&digits).map(FieldValue::PostalCode)
}

/// Phone number reduced to its ASCII digits.
pub fn parse_phone_number(raw: &str) -> Result<FieldValue> {
    if raw.is_empty() {
        return Ok(FieldValue::Absent);
    }

    let digits: String = raw
        .chars()
        .filter_map(|c| decimal_digit(c).and_then(|d| char::from_digit(d as u32, 10)))
        .collect();
    if digits.is_empty() {
        return Err(ExtractionError::invalid("phone number", raw, "contains no digits"));
    }
    Ok(FieldValue::Text(digits))
}

fn single_digit(character: char) -> Option<char> {
    let value = match decimal_digit(character) {
        Some(value) => value,
        None => lookup(character)
            .filter(|n| matches!(n.kind, NumeralType::Zero | NumeralType::Regular))?
            .value,
    };
    char::from_digit(u32::try_from(value).ok()?, 10)
}

fn strip_any_suffix<'a>(value: &'a str, suffixes: &[String]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix.as_str()))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{Prefixes, SpecialValues, Suffixes};
    use crate::models::default_eras;
    use pretty_assertions::assert_eq;

    fn year(raw: &str) -> Result<FieldValue> {
        let prefixes = Prefixes::default();
        let suffixes = Suffixes::default();
        let special = SpecialValues::default();
        parse_year(raw, &prefixes.relative_year, &default_eras(), &suffixes.year, &special.first_era_year)
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(year("").unwrap(), FieldValue::Absent);
        assert_eq!(year("2019-").unwrap(), FieldValue::Year(Year::absolute(2019)));
        assert_eq!(year("二〇一九年").unwrap(), FieldValue::Year(Year::absolute(2019)));
        assert_eq!(year("平成三一年").unwrap(), FieldValue::Year(Year::absolute(2019)));
        assert_eq!(year("令和元年").unwrap(), FieldValue::Year(Year::absolute(2019)));
        assert_eq!(year("昭和64年").unwrap(), FieldValue::Year(Year::absolute(1989)));
        assert_eq!(year("来年").unwrap(), FieldValue::Year(Year::relative(1)));
        assert_eq!(year("去年").unwrap(), FieldValue::Year(Year::relative(-1)));
    }

    #[test]
    fn test_parse_year_outside_era() {
        assert!(matches!(year("平成三二年"), Err(ExtractionError::InvalidValue { .. })));
        assert!(matches!(year("大正〇年"), Err(ExtractionError::InvalidValue { .. })));
        assert!(year("令和百年").is_ok());
    }

    #[test]
    fn test_parse_month_and_day() {
        let relative = Prefixes::default().relative_month;
        assert_eq!(parse_month("十二月", &relative).unwrap(), FieldValue::Month(Month::absolute(12)));
        assert_eq!(parse_month("04", &relative).unwrap(), FieldValue::Month(Month::absolute(4)));
        assert_eq!(parse_month("来月", &relative).unwrap(), FieldValue::Month(Month::relative(1)));
        assert!(parse_month("13月", &relative).is_err());

        assert_eq!(parse_day("三十一日").unwrap(), FieldValue::Day(Day::absolute(31)));
        assert_eq!(parse_day("03").unwrap(), FieldValue::Day(Day::absolute(3)));
        assert!(parse_day("0").is_err());
        assert!(parse_day("32日").is_err());
    }

    #[test]
    fn test_parse_time_fields() {
        let prefixes = Prefixes::default();
        let half = SpecialValues::default().half_hour;

        assert_eq!(
            parse_time_decorator("午後", &prefixes.time_am, &prefixes.time_pm).unwrap(),
            FieldValue::Decorator(TimeDecorator::Pm)
        );
        assert!(matches!(
            parse_time_decorator("夕方", &prefixes.time_am, &prefixes.time_pm),
            Err(ExtractionError::UnknownToken { .. })
        ));
        assert_eq!(parse_time_hour("十一").unwrap(), FieldValue::Integer(11));
        assert_eq!(parse_time_minute("半", &half).unwrap(), FieldValue::Integer(30));
        assert_eq!(parse_time_minute("四十五", &half).unwrap(), FieldValue::Integer(45));
        assert_eq!(parse_time_minute("", &half).unwrap(), FieldValue::Absent);
    }

    #[test]
    fn test_parse_postal_code() {
        let expected = FieldValue::PostalCode(PostalCode::from_string("1012412").unwrap());
        assert_eq!(parse_postal_code("一〇一の二四一二").unwrap(), expected);
        assert_eq!(parse_postal_code("１０１－２４１２").unwrap(), expected);
        assert_eq!(parse_postal_code("101-2412").unwrap(), expected);
        assert!(parse_postal_code("101-241").is_err());
    }

    #[test]
    fn test_parse_phone_number() {
        assert_eq!(
            parse_phone_number("008170-1234-5678").unwrap(),
            FieldValue::Text("00817012345678".to_string())
        );
        assert_eq!(
            parse_phone_number("（０３）１２３４ー５６７８").unwrap(),
            FieldValue::Text("0312345678".to_string())
        );
    }
}
