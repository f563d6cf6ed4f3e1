//! Postal code extraction (〒012-2321, 一〇一の二四一二, T３３３ー３２３２).

use lazy_static::lazy_static;

use super::converters::{parse_postal_code, text};
use super::handler::PatternHandler;
use super::patterns::postal_code_pattern;
use super::{EntityExtractor, ExtractedMatch, FieldValue, Result};
use crate::models::{LocaleTables, PostalCode, SuujiConfig};

pub const POSTAL_CODE_STRING: &str = "postal_code_string";
pub const POSTAL_CODE_VALUE: &str = "postal_code_value";

lazy_static! {
    static ref DEFAULT_POSTAL_CODE_EXTRACTOR: PostalCodeExtractor =
        PostalCodeExtractor::new(&LocaleTables::default()).unwrap();
}

/// Postal code extractor.
#[derive(Debug, Clone)]
pub struct PostalCodeExtractor {
    handler: PatternHandler,
}

impl PostalCodeExtractor {
    pub fn new(locale: &LocaleTables) -> Result<Self> {
        let handler = PatternHandler::new("postal_code", &postal_code_pattern(locale))?
            .with_converter(POSTAL_CODE_STRING, text)
            .with_converter(POSTAL_CODE_VALUE, parse_postal_code)
            .with_numeral_boundaries(true);

        Ok(Self { handler })
    }

    pub fn from_config(config: &SuujiConfig) -> Result<Self> {
        Self::new(&config.locale)
    }
}

impl Default for PostalCodeExtractor {
    fn default() -> Self {
        DEFAULT_POSTAL_CODE_EXTRACTOR.clone()
    }
}

impl EntityExtractor for PostalCodeExtractor {
    type Output = PostalCode;

    fn handler(&self) -> &PatternHandler {
        &self.handler
    }

    fn value_of(&self, extracted: &ExtractedMatch) -> Option<PostalCode> {
        extracted.get(POSTAL_CODE_VALUE).and_then(FieldValue::as_postal_code)
    }
}

/// All postal codes in `text`, using the built-in Japanese tables.
pub fn extract_all_postal_codes(text: &str) -> Vec<ExtractedMatch> {
    DEFAULT_POSTAL_CODE_EXTRACTOR.matches(text)
}

/// Postal codes in `text`.
pub fn extract_postal_codes(text: &str) -> Vec<PostalCode> {
    DEFAULT_POSTAL_CODE_EXTRACTOR
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}
