//! Date models: components that are absolute or relative, and their composite.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Whether a date component is a fixed value or an offset from a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateMode {
    Absolute,
    Relative,
}

macro_rules! date_component {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            pub value: i64,
            pub mode: DateMode,
        }

        impl $name {
            pub fn new(value: i64, mode: DateMode) -> Self {
                Self { value, mode }
            }

            pub fn absolute(value: i64) -> Self {
                Self::new(value, DateMode::Absolute)
            }

            pub fn relative(value: i64) -> Self {
                Self::new(value, DateMode::Relative)
            }

            pub fn is_relative(&self) -> bool {
                self.mode == DateMode::Relative
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.mode {
                    DateMode::Absolute => write!(f, "{}", self.value),
                    DateMode::Relative => write!(f, "{:+}", self.value),
                }
            }
        }
    };
}

date_component!(
    /// A year, absolute (2019) or relative in years (来年 = +1).
    Year
);
date_component!(
    /// A month, absolute (4) or relative in months (前月 = -1).
    Month
);
date_component!(
    /// A day of month, absolute (3) or relative in days.
    Day
);

/// A date assembled from independently optional components.
///
/// Construction never validates; [`CompositeDate::resolve`] does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeDate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<Month>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Day>,
}

impl CompositeDate {
    pub fn new(year: Option<Year>, month: Option<Month>, day: Option<Day>) -> Self {
        Self { year, month, day }
    }

    /// True if any present component is relative.
    pub fn is_relative(&self) -> bool {
        self.year.is_some_and(|y| y.is_relative())
            || self.month.is_some_and(|m| m.is_relative())
            || self.day.is_some_and(|d| d.is_relative())
    }

    /// Resolve to a calendar date.
    ///
    /// Components are visited from day to year. A relative component shifts
    /// `reference` by its offset and fixes every finer component already read;
    /// coarser components are then not consulted. Absolute components are
    /// collected until the year completes the date.
    pub fn resolve(&self, reference: NaiveDate) -> Result<NaiveDate, ExtractionError> {
        let day = self.day.ok_or_else(|| self.unresolvable("day is missing"))?;
        if day.is_relative() {
            return shift_days(reference, day.value).ok_or_else(|| self.unresolvable("day offset out of range"));
        }
        let day = component_u32(day.value).ok_or_else(|| self.unresolvable("invalid day"))?;

        let month = self.month.ok_or_else(|| self.unresolvable("month is missing"))?;
        if month.is_relative() {
            let shifted = shift_months(reference, month.value)
                .ok_or_else(|| self.unresolvable("month offset out of range"))?;
            return NaiveDate::from_ymd_opt(shifted.year(), shifted.month(), day)
                .ok_or_else(|| self.unresolvable("day does not exist in the shifted month"));
        }
        let month = component_u32(month.value).ok_or_else(|| self.unresolvable("invalid month"))?;

        let year = self.year.ok_or_else(|| self.unresolvable("year is missing"))?;
        let year = if year.is_relative() {
            let offset = year.value.checked_mul(12).ok_or_else(|| self.unresolvable("year offset out of range"))?;
            shift_months(reference, offset)
                .ok_or_else(|| self.unresolvable("year offset out of range"))?
                .year()
        } else {
            i32::try_from(year.value).map_err(|_| self.unresolvable("invalid year"))?
        };

        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| self.unresolvable("no such calendar date"))
    }

    /// Resolve against today's local date.
    pub fn resolve_today(&self) -> Result<NaiveDate, ExtractionError> {
        self.resolve(chrono::Local::now().date_naive())
    }

    fn unresolvable(&self, reason: &str) -> ExtractionError {
        ExtractionError::Unresolvable(format!("{reason} in {self}"))
    }
}

impl fmt::Display for CompositeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map_or_else(|| "-".to_string(), ToString::to_string)
        }
        write!(
            f,
            "year: {}, month: {}, day: {}",
            part(&self.year),
            part(&self.month),
            part(&self.day)
        )
    }
}

fn component_u32(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let days = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

fn shift_months(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let months = Months::new(u32::try_from(offset.unsigned_abs()).ok()?);
    if offset >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

/// A Japanese calendar era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    /// Era name as written in text (平成).
    pub name: String,
    /// Added to the era year to obtain the Gregorian year.
    pub gregorian_offset: i64,
    /// Number of years in the era; `None` for the current, open-ended era.
    pub length_in_years: Option<i64>,
}

impl Era {
    pub fn new(name: impl Into<String>, gregorian_offset: i64, length_in_years: Option<i64>) -> Self {
        Self {
            name: name.into(),
            gregorian_offset,
            length_in_years,
        }
    }

    /// Gregorian year for an era year, or `None` if the era year is out of range.
    pub fn to_gregorian(&self, era_year: i64) -> Option<i64> {
        if era_year < 1 || self.length_in_years.is_some_and(|length| era_year > length) {
            return None;
        }
        Some(self.gregorian_offset + era_year)
    }
}

/// Eras from 大正 onwards.
pub fn default_eras() -> Vec<Era> {
    vec![
        Era::new("大正", 1911, Some(15)),
        Era::new("昭和", 1925, Some(64)),
        Era::new("平成", 1988, Some(31)),
        Era::new("令和", 2018, None),
    ]
}
