//! Regex scanning with per-group converters.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};
use tracing::{debug, trace};

use super::{ExtractedMatch, FieldValue, Fields, Result};
use crate::numeral::is_numeral;

/// Turns one captured substring into a field value. An absent group is passed as "".
pub type Converter = Arc<dyn Fn(&str) -> Result<FieldValue> + Send + Sync>;

/// Derives composite fields from the converted fields of one match.
pub type PostProcessor = Arc<dyn Fn(&mut Fields) -> Result<()> + Send + Sync>;

/// A compiled pattern, the converters for its named groups and an optional
/// post-processor.
#[derive(Clone)]
pub struct PatternHandler {
    name: String,
    regex: Regex,
    converters: BTreeMap<String, Converter>,
    post_processor: Option<PostProcessor>,
    numeral_boundaries: bool,
}

impl PatternHandler {
    /// Compile `pattern`. The handler is labelled `name` in log events.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(pattern)?;
        trace!(handler = %name, groups = regex.captures_len(), "compiled pattern");

        Ok(Self {
            name,
            regex,
            converters: BTreeMap::new(),
            post_processor: None,
            numeral_boundaries: false,
        })
    }

    /// Convert group `group` with `converter`.
    pub fn with_converter<F>(mut self, group: impl Into<String>, converter: F) -> Self
    where
        F: Fn(&str) -> Result<FieldValue> + Send + Sync + 'static,
    {
        self.converters.insert(group.into(), Arc::new(converter));
        self
    }

    /// Run `post_processor` on the fields of every match.
    pub fn with_post_processor<F>(mut self, post_processor: F) -> Self
    where
        F: Fn(&mut Fields) -> Result<()> + Send + Sync + 'static,
    {
        self.post_processor = Some(Arc::new(post_processor));
        self
    }

    /// Reject matches that start or end inside a run of numerals.
    pub fn with_numeral_boundaries(mut self, enabled: bool) -> Self {
        self.numeral_boundaries = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Scan `text` left to right and convert every non-overlapping match.
    ///
    /// A failed conversion yields an `Err` entry in place of its match and
    /// scanning continues after it.
    pub fn search(&self, text: &str) -> Vec<Result<ExtractedMatch>> {
        let mut results = Vec::new();
        let mut position = 0;

        while position <= text.len() {
            let Some(captures) = self.regex.captures_at(text, position) else {
                break;
            };
            let Some(whole) = captures.get(0) else {
                break;
            };

            if whole.is_empty() {
                position = next_boundary(text, whole.end());
                continue;
            }

            if self.numeral_boundaries && splits_numeral_run(text, whole.start(), whole.end()) {
                trace!(handler = %self.name, matched = whole.as_str(), "match splits a numeral");
                position = next_boundary(text, whole.start());
                continue;
            }

            results.push(self.convert(text, &captures, whole.start(), whole.end()));
            position = whole.end();
        }

        results
    }

    /// Like [`search`](Self::search) but drops failed matches.
    pub fn matches(&self, text: &str) -> Vec<ExtractedMatch> {
        self.search(text)
            .into_iter()
            .filter_map(|result| match result {
                Ok(extracted) => Some(extracted),
                Err(e) => {
                    debug!(handler = %self.name, error = %e, "skipping match");
                    None
                }
            })
            .collect()
    }

    fn convert(
        &self,
        text: &str,
        captures: &Captures<'_>,
        start: usize,
        end: usize,
    ) -> Result<ExtractedMatch> {
        let mut fields = Fields::new();
        for (group, converter) in &self.converters {
            let raw = captures.name(group).map_or("", |m| m.as_str());
            fields.insert(group.clone(), converter(raw)?);
        }

        if let Some(post_processor) = &self.post_processor {
            post_processor(&mut fields)?;
        }

        let span = (char_offset(text, start), char_offset(text, end));
        Ok(ExtractedMatch::new(span, fields))
    }
}

impl fmt::Debug for PatternHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternHandler")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .field("groups", &self.converters.keys().collect::<Vec<_>>())
            .field("post_processor", &self.post_processor.is_some())
            .field("numeral_boundaries", &self.numeral_boundaries)
            .finish()
    }
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

fn next_boundary(text: &str, byte_offset: usize) -> usize {
    text[byte_offset..]
        .chars()
        .next()
        .map_or(byte_offset + 1, |c| byte_offset + c.len_utf8())
}

/// True if the match continues a numeral that began before it or goes on after it.
fn splits_numeral_run(text: &str, start: usize, end: usize) -> bool {
    let matched = &text[start..end];
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let first = matched.chars().next();
    let last = matched.chars().next_back();

    let both = |a: Option<char>, b: Option<char>| {
        matches!((a, b), (Some(a), Some(b)) if is_numeral(a) && is_numeral(b))
    };
    both(before, first) || both(last, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use pretty_assertions::assert_eq;

    fn integer(raw: &str) -> Result<FieldValue> {
        if raw.is_empty() {
            return Ok(FieldValue::Absent);
        }
        raw.parse()
            .map(FieldValue::Integer)
            .map_err(|_| ExtractionError::invalid("number", raw, "not an integer"))
    }

    fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_search_converts_groups() {
        let handler = PatternHandler::new("pair", r"(?P<left>\d+)x(?P<right>\d+)?")
            .unwrap()
            .with_converter("left", integer)
            .with_converter("right", integer);

        let results = handler.matches("2x3 と 4x");
        assert_eq!(
            results,
            vec![
                ExtractedMatch::new(
                    (0, 3),
                    fields(&[("left", FieldValue::Integer(2)), ("right", FieldValue::Integer(3))])
                ),
                ExtractedMatch::new(
                    (6, 8),
                    fields(&[("left", FieldValue::Integer(4)), ("right", FieldValue::Absent)])
                ),
            ]
        );
    }

    #[test]
    fn test_spans_are_character_offsets() {
        let handler = PatternHandler::new("digits", r"(?P<n>\d+)")
            .unwrap()
            .with_converter("n", integer);
        let results = handler.matches("日本語12です");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].span, (3, 5));
    }

    #[test]
    fn test_failed_match_does_not_drop_neighbours() {
        let handler = PatternHandler::new("digits", r"(?P<n>[0-9a]+)")
            .unwrap()
            .with_converter("n", integer);
        let results = handler.search("1 a 2");
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert_eq!(handler.matches("1 a 2").len(), 2);
    }

    #[test]
    fn test_post_processor_adds_fields() {
        let handler = PatternHandler::new("sum", r"(?P<a>\d)\+(?P<b>\d)")
            .unwrap()
            .with_converter("a", integer)
            .with_converter("b", integer)
            .with_post_processor(|fields| {
                let a = fields.get("a").and_then(FieldValue::as_integer).unwrap_or(0);
                let b = fields.get("b").and_then(FieldValue::as_integer).unwrap_or(0);
                fields.insert("sum".to_string(), FieldValue::Integer(a + b));
                Ok(())
            });

        let results = handler.matches("1+2");
        assert_eq!(results[0].fields.get("sum"), Some(&FieldValue::Integer(3)));
    }

    #[test]
    fn test_numeral_boundaries() {
        let handler = PatternHandler::new("pair", r"(?P<n>\d{2})")
            .unwrap()
            .with_converter("n", integer)
            .with_numeral_boundaries(true);

        assert_eq!(handler.matches("12").len(), 1);
        assert!(handler.matches("123").is_empty());
        assert!(handler.matches("三12").is_empty());
        assert_eq!(handler.matches("a12b34").len(), 2);
    }

    #[test]
    fn test_search_is_repeatable() {
        let handler = PatternHandler::new("digits", r"(?P<n>\d+)")
            .unwrap()
            .with_converter("n", integer);
        let text = "1, 22, 333";
        assert_eq!(handler.search(text), handler.search(text));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            PatternHandler::new("broken", "(?P<open"),
            Err(ExtractionError::Pattern(_))
        ));
    }
}
