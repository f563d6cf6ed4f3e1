//! Phone number extraction (03-1234-5678, (03) 1234 5678).

use lazy_static::lazy_static;

use super::converters::{parse_phone_number, text};
use super::handler::PatternHandler;
use super::patterns::phone_number_pattern;
use super::{EntityExtractor, ExtractedMatch, FieldValue, Result};
use crate::models::{LocaleTables, SuujiConfig};

pub const PHONE_NUMBER_STRING: &str = "phone_number_string";
/// Digits only, half-width.
pub const PHONE_NUMBER_VALUE: &str = "phone_number_value";

lazy_static! {
    static ref DEFAULT_PHONE_NUMBER_EXTRACTOR: PhoneNumberExtractor =
        PhoneNumberExtractor::new(&LocaleTables::default()).unwrap();
}

/// Phone number extractor.
#[derive(Debug, Clone)]
pub struct PhoneNumberExtractor {
    handler: PatternHandler,
}

impl PhoneNumberExtractor {
    pub fn new(locale: &LocaleTables) -> Result<Self> {
        let handler = PatternHandler::new("phone_number", &phone_number_pattern(locale))?
            .with_converter(PHONE_NUMBER_STRING, text)
            .with_converter(PHONE_NUMBER_VALUE, parse_phone_number)
            .with_numeral_boundaries(true);

        Ok(Self { handler })
    }

    pub fn from_config(config: &SuujiConfig) -> Result<Self> {
        Self::new(&config.locale)
    }
}

impl Default for PhoneNumberExtractor {
    fn default() -> Self {
        DEFAULT_PHONE_NUMBER_EXTRACTOR.clone()
    }
}

impl EntityExtractor for PhoneNumberExtractor {
    type Output = String;

    fn handler(&self) -> &PatternHandler {
        &self.handler
    }

    fn value_of(&self, extracted: &ExtractedMatch) -> Option<String> {
        extracted
            .get(PHONE_NUMBER_VALUE)
            .and_then(FieldValue::as_text)
            .map(str::to_string)
    }
}

/// All phone numbers in `text`, using the built-in Japanese tables.
pub fn extract_all_phone_numbers(text: &str) -> Vec<ExtractedMatch> {
    DEFAULT_PHONE_NUMBER_EXTRACTOR.matches(text)
}

/// Normalised phone numbers in `text`.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    DEFAULT_PHONE_NUMBER_EXTRACTOR
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}
