//! Time extraction (10:30, 午後三時半, 十一時十五分).

use chrono::NaiveTime;
use lazy_static::lazy_static;

use super::converters::{parse_time_decorator, parse_time_hour, parse_time_minute, text};
use super::handler::PatternHandler;
use super::patterns::time_pattern;
use super::{EntityExtractor, ExtractedMatch, FieldValue, Fields, Result};
use crate::error::ExtractionError;
use crate::models::{compose_time, LocaleTables, SuujiConfig};

pub const TIME_STRING: &str = "time_string";
pub const TIME_DECORATOR: &str = "time_decorator";
pub const TIME_HOUR: &str = "time_hour";
pub const TIME_MINUTE: &str = "time_minute";
/// Assembled [`NaiveTime`].
pub const TIME: &str = "time";

const TIME_HOUR_LIKE: &str = "time_hour_like";
const TIME_MINUTE_COLON: &str = "time_minute_colon";

lazy_static! {
    static ref DEFAULT_TIME_EXTRACTOR: TimeExtractor =
        TimeExtractor::new(&LocaleTables::default()).unwrap();
}

/// Time-of-day extractor.
#[derive(Debug, Clone)]
pub struct TimeExtractor {
    handler: PatternHandler,
}

impl TimeExtractor {
    pub fn new(locale: &LocaleTables) -> Result<Self> {
        let am = locale.prefixes.time_am.clone();
        let pm = locale.prefixes.time_pm.clone();
        let half_hour = locale.special_values.half_hour.clone();

        let handler = PatternHandler::new("time", &time_pattern(locale))?
            .with_converter(TIME_STRING, text)
            .with_converter(TIME_DECORATOR, move |raw| parse_time_decorator(raw, &am, &pm))
            .with_converter(TIME_HOUR, parse_time_hour)
            .with_converter(TIME_MINUTE, move |raw| parse_time_minute(raw, &half_hour))
            .with_converter(TIME_MINUTE_COLON, |raw| parse_time_minute(raw, &[]))
            .with_converter(TIME_HOUR_LIKE, text)
            .with_post_processor(assemble_time)
            .with_numeral_boundaries(true);

        Ok(Self { handler })
    }

    pub fn from_config(config: &SuujiConfig) -> Result<Self> {
        Self::new(&config.locale)
    }
}

impl Default for TimeExtractor {
    fn default() -> Self {
        DEFAULT_TIME_EXTRACTOR.clone()
    }
}

impl EntityExtractor for TimeExtractor {
    type Output = NaiveTime;

    fn handler(&self) -> &PatternHandler {
        &self.handler
    }

    fn value_of(&self, extracted: &ExtractedMatch) -> Option<NaiveTime> {
        extracted.get(TIME).and_then(FieldValue::as_time)
    }
}

/// Apply the decorator to the hour and add the composite time. A missing minute is 0.
fn assemble_time(fields: &mut Fields) -> Result<()> {
    if let Some(FieldValue::Text(counter)) = fields.remove(TIME_HOUR_LIKE) {
        return Err(ExtractionError::invalid("hour", counter, "a duration, not a time of day"));
    }
    if let Some(minute) = fields.remove(TIME_MINUTE_COLON).filter(|m| !m.is_absent()) {
        fields.insert(TIME_MINUTE.to_string(), minute);
    }

    let hour = fields
        .get(TIME_HOUR)
        .and_then(FieldValue::as_integer)
        .ok_or_else(|| ExtractionError::MissingField(TIME_HOUR.to_string()))?;
    let minute = fields.get(TIME_MINUTE).and_then(FieldValue::as_integer).unwrap_or(0);
    let decorator = fields.get(TIME_DECORATOR).and_then(FieldValue::as_decorator);

    let time = compose_time(hour, minute, decorator)?;
    fields.insert(TIME.to_string(), FieldValue::Time(time));
    Ok(())
}

/// All times in `text`, using the built-in Japanese tables.
pub fn extract_all_times(text: &str) -> Vec<ExtractedMatch> {
    DEFAULT_TIME_EXTRACTOR.matches(text)
}

/// Times of day in `text`.
pub fn extract_times(text: &str) -> Vec<NaiveTime> {
    DEFAULT_TIME_EXTRACTOR
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}
