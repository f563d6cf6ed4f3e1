//! Pattern templates for the entity extractors.
//!
//! Locale literals are escaped and substituted as alternation groups, so the
//! same template serves any [`LocaleTables`].

use lazy_static::lazy_static;

use crate::models::{Era, LocaleTables};
use crate::numeral::table::{kanji_in_range, KANJI_DIGITS};

const DECIMAL_DIGITS: &str = "0-9０-９";

lazy_static! {
    /// Decimal digits plus kanji numerals below ten thousand.
    pub static ref NUMERAL_CLASS: String =
        format!("[{DECIMAL_DIGITS}{}]", escape_chars(&kanji_in_range(0, 1_000)));

    /// Decimal digits plus single-digit kanji.
    pub static ref DIGIT_CLASS: String =
        format!("[{DECIMAL_DIGITS}{}]", escape_chars(&KANJI_DIGITS));

    /// ASCII and full-width decimal digits.
    pub static ref DECIMAL_CLASS: String = format!("[{DECIMAL_DIGITS}]");
}

/// Escaped non-capturing alternation of `literals`, longest first.
///
/// Longest-first ordering keeps 再来年 from being read as 来年 by a
/// leftmost-first engine. An empty table yields a group that never matches.
pub fn alternation<S: AsRef<str>>(literals: &[S]) -> String {
    let mut literals: Vec<&str> = literals
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .collect();
    if literals.is_empty() {
        return r"[^\s\S]".to_string();
    }
    literals.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    literals.dedup();

    let escaped: Vec<String> = literals.into_iter().map(regex::escape).collect();
    format!("(?:{})", escaped.join("|"))
}

/// [`alternation`] over several tables.
pub fn alternation_of(tables: &[&[String]]) -> String {
    let all: Vec<&String> = tables.iter().flat_map(|t| t.iter()).collect();
    alternation(&all)
}

fn escape_chars(chars: &[char]) -> String {
    chars.iter().map(|c| regex::escape(&c.to_string())).collect()
}

/// Year, month and day fields.
///
/// Kanji form: an optional year (relative word, era year, or numeral with the
/// year suffix), a month (relative word or numeral with the month suffix) and
/// an optional day. Numeric form: `YYYY-MM-DD` with dash, blank or slash
/// separators, always with all three fields. A month is required in both
/// forms, so a year on its own (2019年, 来年) is not a date. Day counters such
/// as 三日間 are captured in their own group so the post-processor can reject
/// them.
pub fn date_pattern(locale: &LocaleTables, eras: &[Era]) -> String {
    let numeral = NUMERAL_CLASS.as_str();
    let decimal = DECIMAL_CLASS.as_str();
    let separators = &locale.separators;
    let prefixes = &locale.prefixes;
    let suffixes = &locale.suffixes;

    let separator = alternation_of(&[&separators.dash, &separators.blank, &separators.slash]);
    let year_suffix = alternation(&suffixes.year);
    let month_suffix = alternation(&suffixes.month);
    let day_suffix = alternation(&suffixes.day);
    let day_like = alternation(&suffixes.day_like);
    let first_year = alternation(&locale.special_values.first_era_year);
    let era_names: Vec<&str> = eras.iter().map(|e| e.name.as_str()).collect();
    let era = alternation(&era_names);
    let relative_year: Vec<&str> =
        prefixes.relative_year.iter().map(|t| t.token.as_str()).collect();
    let relative_month: Vec<&str> =
        prefixes.relative_month.iter().map(|t| t.token.as_str()).collect();
    let relative_year = alternation(&relative_year);
    let relative_month = alternation(&relative_month);

    format!(
        "(?P<date_string>\
         (?P<date_year>{relative_year}\
         |{era}(?:{first_year}|{numeral}{{1,4}}){year_suffix}\
         |{numeral}{{1,5}}{year_suffix})?\
         (?P<date_month>{relative_month}|{numeral}{{1,3}}{month_suffix})\
         (?:(?P<date_day_like>{numeral}{{1,3}}{day_like})\
         |(?P<date_day>{numeral}{{1,3}}{day_suffix}))?\
         |(?P<date_year_numeric>{decimal}{{4}}){separator}\
         (?P<date_month_numeric>{decimal}{{1,2}}){separator}\
         (?P<date_day_numeric>{decimal}{{1,2}}))"
    )
}

/// Hour, minute and AM/PM fields.
///
/// After an hour suffix the minute is optional (三時, 三時半, 三時十五分).
/// After a colon it must be two digits (10:30), kept in its own group. Hour
/// counters such as 三時間 are captured in their own group so the
/// post-processor can reject them.
pub fn time_pattern(locale: &LocaleTables) -> String {
    let numeral = NUMERAL_CLASS.as_str();
    let suffixes = &locale.suffixes;

    let decorator = alternation_of(&[&locale.prefixes.time_am, &locale.prefixes.time_pm]);
    let blank = alternation(&locale.separators.blank);
    let hour_like = alternation(&suffixes.hour_like);
    let hour_suffix = alternation(&suffixes.hour);
    let colon = alternation(&locale.separators.colon);
    let minute_suffix = alternation(&suffixes.minute);
    let half_hour = alternation(&locale.special_values.half_hour);

    format!(
        "(?P<time_string>\
         (?:(?P<time_decorator>{decorator}){blank}*)?\
         (?:\
         (?P<time_hour_like>{numeral}{{1,3}}{hour_like})\
         |(?P<time_hour>{numeral}{{1,3}})(?:\
         {hour_suffix}(?:(?P<time_minute>{half_hour}|{numeral}{{1,3}}){minute_suffix}?)?\
         |{colon}(?P<time_minute_colon>{numeral}{{2}})\
         )))"
    )
}

/// Seven digits split 3-4 by a dash or a kanji separator, with an optional marker.
pub fn postal_code_pattern(locale: &LocaleTables) -> String {
    let digit = DIGIT_CLASS.as_str();
    let separators = &locale.separators;

    let prefix = alternation(&locale.prefixes.postal_code);
    let gap = alternation_of(&[&separators.blank, &separators.colon]);
    let separator = alternation_of(&[&separators.dash, &separators.postal_code_kanji]);

    format!(
        "(?P<postal_code_string>\
         (?:{prefix}{gap}*)?\
         (?P<postal_code_value>{digit}{{3}}{separator}{digit}{{4}}))"
    )
}

/// Three digit groups split by dashes or blanks; the first may be parenthesised.
pub fn phone_number_pattern(locale: &LocaleTables) -> String {
    let decimal = DECIMAL_CLASS.as_str();
    let separators = &locale.separators;

    let separator = alternation_of(&[&separators.dash, &separators.blank]);
    let blank = alternation(&separators.blank);
    let left = alternation(&separators.left_parenthesis);
    let right = alternation(&separators.right_parenthesis);

    format!(
        "(?P<phone_number_string>(?P<phone_number_value>\
         (?:{left}{blank}*{decimal}{{1,6}}{blank}*{right}{separator}*|{decimal}{{1,6}}{separator}+)\
         {decimal}{{1,4}}{separator}+{decimal}{{3,4}}))"
    )
}
