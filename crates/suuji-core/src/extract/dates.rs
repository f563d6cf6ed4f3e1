//! Date extraction (2019-04-03, 平成三一年四月三日, 来年十二月三十一日).

use lazy_static::lazy_static;

use super::converters::{parse_day, parse_month, parse_year, text};
use super::handler::PatternHandler;
use super::patterns::date_pattern;
use super::{EntityExtractor, ExtractedMatch, FieldValue, Fields, Result};
use crate::error::ExtractionError;
use crate::models::{default_eras, CompositeDate, Era, LocaleTables, SuujiConfig};

pub const DATE_STRING: &str = "date_string";
pub const DATE_YEAR: &str = "date_year";
pub const DATE_MONTH: &str = "date_month";
pub const DATE_DAY: &str = "date_day";
/// Assembled [`CompositeDate`].
pub const DATE: &str = "date";

const DATE_YEAR_NUMERIC: &str = "date_year_numeric";
const DATE_MONTH_NUMERIC: &str = "date_month_numeric";
const DATE_DAY_NUMERIC: &str = "date_day_numeric";
const DATE_DAY_LIKE: &str = "date_day_like";

lazy_static! {
    static ref DEFAULT_DATE_EXTRACTOR: DateExtractor =
        DateExtractor::new(&LocaleTables::default(), &default_eras()).unwrap();
}

/// Date field extractor.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    handler: PatternHandler,
}

impl DateExtractor {
    /// Build an extractor from locale tables and an era table.
    pub fn new(locale: &LocaleTables, eras: &[Era]) -> Result<Self> {
        let relative_year = locale.prefixes.relative_year.clone();
        let relative_month = locale.prefixes.relative_month.clone();
        let year_suffixes = locale.suffixes.year.clone();
        let first_era_year = locale.special_values.first_era_year.clone();
        let eras = eras.to_vec();

        let handler = PatternHandler::new("date", &date_pattern(locale, &eras))?
            .with_converter(DATE_STRING, text)
            .with_converter(DATE_YEAR, move |raw| {
                parse_year(raw, &relative_year, &eras, &year_suffixes, &first_era_year)
            })
            .with_converter(DATE_YEAR_NUMERIC, |raw| parse_year(raw, &[], &[], &[], &[]))
            .with_converter(DATE_MONTH, move |raw| parse_month(raw, &relative_month))
            .with_converter(DATE_MONTH_NUMERIC, |raw| parse_month(raw, &[]))
            .with_converter(DATE_DAY, parse_day)
            .with_converter(DATE_DAY_NUMERIC, parse_day)
            .with_converter(DATE_DAY_LIKE, text)
            .with_post_processor(assemble_date)
            .with_numeral_boundaries(true);

        Ok(Self { handler })
    }

    pub fn from_config(config: &SuujiConfig) -> Result<Self> {
        Self::new(&config.locale, &config.eras)
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        DEFAULT_DATE_EXTRACTOR.clone()
    }
}

impl EntityExtractor for DateExtractor {
    type Output = CompositeDate;

    fn handler(&self) -> &PatternHandler {
        &self.handler
    }

    fn value_of(&self, extracted: &ExtractedMatch) -> Option<CompositeDate> {
        extracted.get(DATE).and_then(FieldValue::as_date)
    }
}

/// Fold the numeric-form groups into `date_month`/`date_day` and add the composite date.
fn assemble_date(fields: &mut Fields) -> Result<()> {
    if let Some(FieldValue::Text(counter)) = fields.remove(DATE_DAY_LIKE) {
        return Err(ExtractionError::invalid("day", counter, "a day count, not a day of month"));
    }

    let numeric_fields = [
        (DATE_YEAR_NUMERIC, DATE_YEAR),
        (DATE_MONTH_NUMERIC, DATE_MONTH),
        (DATE_DAY_NUMERIC, DATE_DAY),
    ];
    for (numeric, field) in numeric_fields {
        match fields.remove(numeric) {
            Some(value) if !value.is_absent() => {
                fields.insert(field.to_string(), value);
            }
            _ => {}
        }
    }

    let component = |name: &str| fields.get(name).cloned().unwrap_or(FieldValue::Absent);
    let year = component(DATE_YEAR).as_year();
    let month = component(DATE_MONTH).as_month();
    let day = component(DATE_DAY).as_day();

    if month.is_none() {
        return Err(ExtractionError::MissingField(DATE_MONTH.to_string()));
    }

    fields.insert(DATE.to_string(), FieldValue::Date(CompositeDate::new(year, month, day)));
    Ok(())
}

/// All dates in `text`, using the built-in Japanese tables.
pub fn extract_all_dates(text: &str) -> Vec<ExtractedMatch> {
    DEFAULT_DATE_EXTRACTOR.matches(text)
}

/// Composite dates in `text`.
pub fn extract_dates(text: &str) -> Vec<CompositeDate> {
    DEFAULT_DATE_EXTRACTOR
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, Month, Year};
    use pretty_assertions::assert_eq;

    fn expected(
        span: (usize, usize),
        string: &str,
        year: Option<Year>,
        month: Month,
        day: Option<Day>,
    ) -> ExtractedMatch {
        let optional = |value: Option<FieldValue>| value.unwrap_or(FieldValue::Absent);
        let mut fields = Fields::new();
        fields.insert(DATE_STRING.to_string(), FieldValue::Text(string.to_string()));
        fields.insert(DATE_YEAR.to_string(), optional(year.map(FieldValue::Year)));
        fields.insert(DATE_MONTH.to_string(), FieldValue::Month(month));
        fields.insert(DATE_DAY.to_string(), optional(day.map(FieldValue::Day)));
        let date = CompositeDate::new(year, Some(month), day);
        fields.insert(DATE.to_string(), FieldValue::Date(date));
        ExtractedMatch::new(span, fields)
    }

    #[test]
    fn test_extract_single_date_western_numbers() {
        let extracted = extract_all_dates("今日は2019-04-03です。");
        assert_eq!(
            extracted,
            vec![expected(
                (3, 13),
                "2019-04-03",
                Some(Year::absolute(2019)),
                Month::absolute(4),
                Some(Day::absolute(3))
            )]
        );
    }

    #[test]
    fn test_extract_single_date_kanji_numbers() {
        let extracted = extract_all_dates("今日は平成三一年四月三日です。");
        assert_eq!(
            extracted,
            vec![expected(
                (3, 12),
                "平成三一年四月三日",
                Some(Year::absolute(2019)),
                Month::absolute(4),
                Some(Day::absolute(3))
            )]
        );
    }

    #[test]
    fn test_extract_relative_years() {
        let years = [("去年", -1), ("今年", 0), ("本年", 0), ("来年", 1), ("再来年", 2)];

        for (relative_year, offset) in years {
            let text = format!("次は{relative_year}十二月三十一日ではありません。");
            let end = 2 + relative_year.chars().count() + 7;
            assert_eq!(
                extract_all_dates(&text),
                vec![expected(
                    (2, end),
                    &format!("{relative_year}十二月三十一日"),
                    Some(Year::relative(offset)),
                    Month::absolute(12),
                    Some(Day::absolute(31))
                )],
                "{relative_year}"
            );
        }
    }

    #[test]
    fn test_extract_relative_months() {
        let months = [("前月", -1), ("今月", 0), ("来月", 1)];

        for (relative_month, offset) in months {
            let text = format!("次は{relative_month}1日ではありません。");
            let end = 2 + relative_month.chars().count() + 2;
            assert_eq!(
                extract_all_dates(&text),
                vec![expected(
                    (2, end),
                    &format!("{relative_month}1日"),
                    None,
                    Month::relative(offset),
                    Some(Day::absolute(1))
                )],
                "{relative_month}"
            );
        }
    }

    #[test]
    fn test_month_without_day() {
        let dates = extract_dates("令和元年五月に改元された。");
        assert_eq!(
            dates,
            vec![CompositeDate::new(Some(Year::absolute(2019)), Some(Month::absolute(5)), None)]
        );
    }

    #[test]
    fn test_year_alone_is_not_a_date() {
        assert!(extract_dates("2019年に入社").is_empty());
        assert!(extract_dates("来年もよろしく").is_empty());
        assert!(extract_dates("二〇一九年度の予算").is_empty());

        assert_eq!(
            extract_dates("来年三月に"),
            vec![CompositeDate::new(Some(Year::relative(1)), Some(Month::absolute(3)), None)]
        );
    }

    #[test]
    fn test_day_counters_are_rejected() {
        assert!(extract_dates("四月三日間の休み").is_empty());
        assert!(extract_dates("四月三日目").is_empty());

        let results = DateExtractor::default().search("四月三日間");
        assert!(matches!(results.as_slice(), [Err(ExtractionError::InvalidValue { .. })]));
    }

    #[test]
    fn test_numbers_inside_longer_runs_are_ignored() {
        assert!(extract_dates("番号は12019-04-03です").is_empty());
        assert!(extract_dates("電話 008170-1234-5678").is_empty());
    }

    #[test]
    fn test_multiple_dates_in_order() {
        let dates = extract_dates("1999/03/20から二〇〇〇年三月二十日まで");
        assert_eq!(
            dates,
            vec![
                CompositeDate::new(
                    Some(Year::absolute(1999)),
                    Some(Month::absolute(3)),
                    Some(Day::absolute(20))
                ),
                CompositeDate::new(
                    Some(Year::absolute(2000)),
                    Some(Month::absolute(3)),
                    Some(Day::absolute(20))
                ),
            ]
        );
    }

    #[test]
    fn test_custom_era_table() {
        let eras = vec![Era::new("明治", 1867, Some(45))];
        let extractor = DateExtractor::new(&LocaleTables::default(), &eras).unwrap();
        let date = extractor.extract("明治四十五年七月三十日").unwrap();
        assert_eq!(date.value.year, Some(Year::absolute(1912)));
        assert_eq!(date.source, "明治四十五年七月三十日");
    }
}
