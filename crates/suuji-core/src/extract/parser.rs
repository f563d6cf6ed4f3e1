//! Document-level parser running every enabled extractor over one text.

use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::dates::DateExtractor;
use super::phone_numbers::PhoneNumberExtractor;
use super::postal_codes::PostalCodeExtractor;
use super::times::TimeExtractor;
use super::{EntityExtractor, ExtractedMatch, Result};
use crate::models::{ExtractionConfig, SuujiConfig};

/// Result of parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub dates: Vec<ExtractedMatch>,
    pub times: Vec<ExtractedMatch>,
    pub postal_codes: Vec<ExtractedMatch>,
    pub phone_numbers: Vec<ExtractedMatch>,
    /// Dates resolved against the reference date, when one was given.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resolved_dates: Vec<ResolvedDate>,
    /// Matches whose conversion or resolution failed.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionReport {
    pub fn total_matches(&self) -> usize {
        self.dates.len() + self.times.len() + self.postal_codes.len() + self.phone_numbers.len()
    }
}

/// A date match resolved to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDate {
    pub span: (usize, usize),
    pub date: NaiveDate,
}

/// Runs the date, time, postal code and phone number extractors.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    dates: DateExtractor,
    times: TimeExtractor,
    postal_codes: PostalCodeExtractor,
    phone_numbers: PhoneNumberExtractor,
    extraction: ExtractionConfig,
    reference_date: Option<NaiveDate>,
}

impl DocumentParser {
    /// Parser with the built-in Japanese tables and every extractor enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser built from a configuration's locale tables, eras and switches.
    pub fn from_config(config: &SuujiConfig) -> Result<Self> {
        Ok(Self {
            dates: DateExtractor::from_config(config)?,
            times: TimeExtractor::from_config(config)?,
            postal_codes: PostalCodeExtractor::from_config(config)?,
            phone_numbers: PhoneNumberExtractor::from_config(config)?,
            extraction: config.extraction.clone(),
            reference_date: None,
        })
    }

    /// Replace the extraction switches.
    pub fn with_extraction_config(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Resolve every extracted date against `reference`.
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.reference_date = Some(reference);
        self
    }

    pub fn parse(&self, text: &str) -> ExtractionReport {
        let start = Instant::now();
        let mut report = ExtractionReport::default();

        info!("Parsing {} characters of text", text.chars().count());

        if self.extraction.dates {
            report.dates = self.collect("date", &self.dates, text, &mut report.warnings);
        }
        if self.extraction.times {
            report.times = self.collect("time", &self.times, text, &mut report.warnings);
        }
        if self.extraction.postal_codes {
            report.postal_codes =
                self.collect("postal code", &self.postal_codes, text, &mut report.warnings);
        }
        if self.extraction.phone_numbers {
            report.phone_numbers =
                self.collect("phone number", &self.phone_numbers, text, &mut report.warnings);
        }

        if let Some(reference) = self.reference_date {
            for extracted in &report.dates {
                let Some(date) = self.dates.value_of(extracted) else {
                    continue;
                };
                match date.resolve(reference) {
                    Ok(resolved) => report.resolved_dates.push(ResolvedDate {
                        span: extracted.span,
                        date: resolved,
                    }),
                    Err(e) if self.extraction.report_failures => {
                        report.warnings.push(format!("date at {:?}: {e}", extracted.span));
                    }
                    Err(_) => {}
                }
            }
        }

        report.processing_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Extracted {} dates, {} times, {} postal codes, {} phone numbers with {} warnings",
            report.dates.len(),
            report.times.len(),
            report.postal_codes.len(),
            report.phone_numbers.len(),
            report.warnings.len()
        );

        report
    }

    fn collect<E: EntityExtractor>(
        &self,
        kind: &str,
        extractor: &E,
        text: &str,
        warnings: &mut Vec<String>,
    ) -> Vec<ExtractedMatch> {
        let mut matches = Vec::new();
        for result in extractor.search(text) {
            match result {
                Ok(extracted) => matches.push(extracted),
                Err(e) => {
                    debug!(kind, error = %e, "match rejected");
                    if self.extraction.report_failures {
                        warnings.push(format!("{kind}: {e}"));
                    }
                }
            }
        }
        matches
    }
}
