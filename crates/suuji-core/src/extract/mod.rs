//! Pattern-based entity extraction from Japanese text.
//!
//! Every extractor wraps a [`PatternHandler`]: a regex with named groups, a
//! converter per group and an optional post-processor that assembles the
//! converted fields into a composite value.

pub mod converters;
pub mod dates;
pub mod handler;
pub mod parser;
pub mod patterns;
pub mod phone_numbers;
pub mod postal_codes;
pub mod times;

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;

use crate::error::ExtractionError;
use crate::models::{CompositeDate, Day, Month, PostalCode, TimeDecorator, Year};

pub use dates::{extract_all_dates, extract_dates, DateExtractor};
pub use handler::PatternHandler;
pub use parser::{DocumentParser, ExtractionReport, ResolvedDate};
pub use phone_numbers::{extract_all_phone_numbers, extract_phone_numbers, PhoneNumberExtractor};
pub use postal_codes::{extract_all_postal_codes, extract_postal_codes, PostalCodeExtractor};
pub use times::{extract_all_times, extract_times, TimeExtractor};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Converted fields of one match, keyed by group name.
pub type Fields = BTreeMap<String, FieldValue>;

/// A converted field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The group did not take part in the match.
    Absent,
    Text(String),
    Integer(i64),
    PostalCode(PostalCode),
    Year(Year),
    Month(Month),
    Day(Day),
    Date(CompositeDate),
    Decorator(TimeDecorator),
    Time(NaiveTime),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_postal_code(&self) -> Option<PostalCode> {
        match self {
            FieldValue::PostalCode(code) => Some(*code),
            _ => None,
        }
    }

    pub fn as_year(&self) -> Option<Year> {
        match self {
            FieldValue::Year(year) => Some(*year),
            _ => None,
        }
    }

    pub fn as_month(&self) -> Option<Month> {
        match self {
            FieldValue::Month(month) => Some(*month),
            _ => None,
        }
    }

    pub fn as_day(&self) -> Option<Day> {
        match self {
            FieldValue::Day(day) => Some(*day),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<CompositeDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_decorator(&self) -> Option<TimeDecorator> {
        match self {
            FieldValue::Decorator(decorator) => Some(*decorator),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            FieldValue::Time(time) => Some(*time),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => Ok(()),
            FieldValue::Text(text) => write!(f, "{text}"),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::PostalCode(code) => write!(f, "{code}"),
            FieldValue::Year(year) => write!(f, "{year}"),
            FieldValue::Month(month) => write!(f, "{month}"),
            FieldValue::Day(day) => write!(f, "{day}"),
            FieldValue::Date(date) => write!(f, "{date}"),
            FieldValue::Decorator(decorator) => write!(f, "{decorator}"),
            FieldValue::Time(time) => write!(f, "{}", time.format("%H:%M")),
        }
    }
}

/// One successful match: character-offset span and converted fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedMatch {
    /// `[start, end)` in characters, not bytes.
    pub span: (usize, usize),
    pub fields: Fields,
}

impl ExtractedMatch {
    pub fn new(span: (usize, usize), fields: Fields) -> Self {
        Self { span, fields }
    }

    /// Field value, treating [`FieldValue::Absent`] as missing.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).filter(|value| !value.is_absent())
    }

    /// The matched characters of `text`.
    pub fn excerpt(&self, text: &str) -> String {
        let (start, end) = self.span;
        text.chars().skip(start).take(end.saturating_sub(start)).collect()
    }
}

/// A typed value pulled out of an [`ExtractedMatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    pub value: T,
    /// Character-offset span in the source text.
    pub span: (usize, usize),
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, span: (usize, usize), source: impl Into<String>) -> Self {
        Self {
            value,
            span,
            source: source.into(),
        }
    }
}

/// Trait for entity extractors.
pub trait EntityExtractor {
    /// The composite value this extractor produces.
    type Output;

    /// Underlying pattern handler.
    fn handler(&self) -> &PatternHandler;

    /// Pull the composite value out of a converted match.
    fn value_of(&self, extracted: &ExtractedMatch) -> Option<Self::Output>;

    /// All candidate matches, failed conversions included.
    fn search(&self, text: &str) -> Vec<Result<ExtractedMatch>> {
        self.handler().search(text)
    }

    /// Successfully converted matches in text order.
    fn matches(&self, text: &str) -> Vec<ExtractedMatch> {
        self.handler().matches(text)
    }

    /// Extract all occurrences of the entity.
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch<Self::Output>> {
        self.matches(text)
            .into_iter()
            .filter_map(|m| {
                let value = self.value_of(&m)?;
                let source = m.excerpt(text);
                Some(ExtractionMatch::new(value, m.span, source))
            })
            .collect()
    }

    /// Extract the first occurrence of the entity.
    fn extract(&self, text: &str) -> Option<ExtractionMatch<Self::Output>> {
        self.extract_all(text).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_skips_absent_fields() {
        let mut fields = Fields::new();
        fields.insert("a".to_string(), FieldValue::Absent);
        fields.insert("b".to_string(), FieldValue::Integer(3));
        let extracted = ExtractedMatch::new((0, 1), fields);

        assert_eq!(extracted.get("a"), None);
        assert_eq!(extracted.get("b").and_then(FieldValue::as_integer), Some(3));
        assert_eq!(extracted.get("c"), None);
    }

    #[test]
    fn test_excerpt_uses_character_offsets() {
        let extracted = ExtractedMatch::new((3, 13), Fields::new());
        assert_eq!(extracted.excerpt("今日は2019-04-03です。"), "2019-04-03");
    }

    #[test]
    fn test_field_value_serializes_untagged() {
        let value = serde_json::to_value(FieldValue::Year(Year::absolute(2019))).unwrap();
        assert_eq!(value, serde_json::json!({"value": 2019, "mode": "absolute"}));
        assert_eq!(serde_json::to_value(FieldValue::Absent).unwrap(), serde_json::Value::Null);
    }
}
