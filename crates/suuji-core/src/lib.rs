//! Core library for reading numbers out of Japanese text.
//!
//! This crate provides:
//! - Conversion of kanji, full-width and mixed numerals to integers
//! - Date, time, postal code and phone number extraction
//! - Domain models for the extracted entities
//! - JSON configuration of the locale tables and era table

pub mod error;
pub mod extract;
pub mod models;
pub mod numeral;

pub use error::{ExtractionError, NumeralError, Result, SuujiError};
pub use extract::{
    extract_all_dates, extract_all_phone_numbers, extract_all_postal_codes, extract_all_times,
    DateExtractor, DocumentParser, EntityExtractor, ExtractedMatch, ExtractionReport, FieldValue,
    PatternHandler, PhoneNumberExtractor, PostalCodeExtractor, TimeExtractor,
};
pub use models::{
    CompositeDate, DateMode, Day, Era, ExtractionConfig, LocaleTables, Month, PostalCode,
    SuujiConfig, TimeDecorator, Year,
};
pub use numeral::{
    below_ten_thousand, clean_mixed, convert, dirty_mixed, traditional_style, western_style,
    ConversionStyle,
};
