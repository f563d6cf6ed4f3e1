//! Time-of-day models.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Morning/afternoon marker written before the hour (午前 / 午後).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeDecorator {
    Am,
    Pm,
}

impl TimeDecorator {
    /// Hours added to a 12-hour clock value.
    pub fn hour_offset(&self) -> i64 {
        match self {
            TimeDecorator::Am => 0,
            TimeDecorator::Pm => 12,
        }
    }
}

impl fmt::Display for TimeDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeDecorator::Am => write!(f, "AM"),
            TimeDecorator::Pm => write!(f, "PM"),
        }
    }
}

/// Build a time of day from an hour, a minute and an optional decorator.
///
/// A PM decorator adds twelve hours; the result must still be a valid clock time.
pub fn compose_time(
    hour: i64,
    minute: i64,
    decorator: Option<TimeDecorator>,
) -> Result<NaiveTime, ExtractionError> {
    let hour = hour + decorator.map_or(0, |d| d.hour_offset());

    let to_u32 = |value: i64| u32::try_from(value).ok();
    to_u32(hour)
        .zip(to_u32(minute))
        .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
        .ok_or_else(|| {
            ExtractionError::invalid("time", format!("{hour}:{minute:02}"), "not a valid time of day")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_time() {
        assert_eq!(compose_time(9, 0, None).unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(
            compose_time(3, 30, Some(TimeDecorator::Pm)).unwrap(),
            NaiveTime::from_hms_opt(15, 30, 0).unwrap()
        );
        assert_eq!(
            compose_time(11, 5, Some(TimeDecorator::Am)).unwrap(),
            NaiveTime::from_hms_opt(11, 5, 0).unwrap()
        );
    }

    #[test]
    fn test_compose_time_out_of_range() {
        assert!(compose_time(24, 0, None).is_err());
        assert!(compose_time(12, 0, Some(TimeDecorator::Pm)).is_err());
        assert!(compose_time(10, 60, None).is_err());
        assert!(compose_time(-1, 0, None).is_err());
    }
}
