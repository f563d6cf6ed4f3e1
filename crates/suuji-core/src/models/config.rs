//! Configuration structures: locale tables, era table and extraction switches.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::date::{default_eras, Era};
use crate::error::{Result, SuujiError};

/// Main configuration for the suuji extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuujiConfig {
    /// Literal strings substituted into the extraction patterns.
    pub locale: LocaleTables,

    /// Japanese calendar eras recognised in year fields.
    pub eras: Vec<Era>,

    /// Extraction switches.
    pub extraction: ExtractionConfig,
}

impl Default for SuujiConfig {
    fn default() -> Self {
        Self {
            locale: LocaleTables::default(),
            eras: default_eras(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Separator, prefix, suffix and special-value literals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleTables {
    pub separators: Separators,
    pub prefixes: Prefixes,
    pub suffixes: Suffixes,
    pub special_values: SpecialValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Separators {
    pub dash: Vec<String>,
    pub blank: Vec<String>,
    pub slash: Vec<String>,
    pub left_parenthesis: Vec<String>,
    pub right_parenthesis: Vec<String>,
    pub comma: Vec<String>,
    /// Between hour and minute.
    pub colon: Vec<String>,
    /// Kanji written between the two halves of a postal code (一〇一の二四一二).
    pub postal_code_kanji: Vec<String>,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            dash: strings(&["-", "‐", "ー", "―", "－"]),
            blank: strings(&[" ", "\u{3000}"]),
            slash: strings(&["/", "／"]),
            left_parenthesis: strings(&["(", "（"]),
            right_parenthesis: strings(&[")", "）"]),
            comma: strings(&[",", "、", "，"]),
            colon: strings(&[":", "："]),
            postal_code_kanji: strings(&["の", "ノ", "之"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefixes {
    /// Markers written before a postal code.
    pub postal_code: Vec<String>,
    pub relative_year: Vec<RelativeToken>,
    pub relative_month: Vec<RelativeToken>,
    pub time_am: Vec<String>,
    pub time_pm: Vec<String>,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self {
            postal_code: strings(&["〒", "🏣", "〶", "T", "郵便番号"]),
            relative_year: vec![
                RelativeToken::new("去年", -1),
                RelativeToken::new("今年", 0),
                RelativeToken::new("本年", 0),
                RelativeToken::new("来年", 1),
                RelativeToken::new("再来年", 2),
            ],
            relative_month: vec![
                RelativeToken::new("前月", -1),
                RelativeToken::new("先月", -1),
                RelativeToken::new("今月", 0),
                RelativeToken::new("本月", 0),
                RelativeToken::new("来月", 1),
                RelativeToken::new("再来月", 2),
            ],
            time_am: strings(&["午前"]),
            time_pm: strings(&["午後"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suffixes {
    pub year: Vec<String>,
    pub month: Vec<String>,
    pub day: Vec<String>,
    /// Day counters that are not calendar days (三日間, 三日目).
    pub day_like: Vec<String>,
    pub hour: Vec<String>,
    pub minute: Vec<String>,
    /// Hour counters that are not clock times (三時間, 三時限).
    pub hour_like: Vec<String>,
}

impl Default for Suffixes {
    fn default() -> Self {
        Self {
            year: strings(&["年"]),
            month: strings(&["月"]),
            day: strings(&["日"]),
            day_like: strings(&["日目", "日間"]),
            hour: strings(&["時"]),
            minute: strings(&["分"]),
            hour_like: strings(&["時限", "時間"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialValues {
    /// Minute tokens meaning thirty minutes (半).
    pub half_hour: Vec<String>,
    /// Era-year token meaning the first year of an era (元年).
    pub first_era_year: Vec<String>,
}

impl Default for SpecialValues {
    fn default() -> Self {
        Self {
            half_hour: strings(&["半"]),
            first_era_year: strings(&["元"]),
        }
    }
}

/// A word denoting an offset from the current year or month (来年 = +1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeToken {
    pub token: String,
    pub offset: i64,
}

impl RelativeToken {
    pub fn new(token: impl Into<String>, offset: i64) -> Self {
        Self {
            token: token.into(),
            offset,
        }
    }
}

/// Offset of an exact relative-vocabulary match.
pub fn relative_offset(tokens: &[RelativeToken], word: &str) -> Option<i64> {
    tokens.iter().find(|t| t.token == word).map(|t| t.offset)
}

/// Which extractors run and how failures are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub dates: bool,
    pub times: bool,
    pub postal_codes: bool,
    pub phone_numbers: bool,

    /// Keep a warning for every match whose conversion failed.
    pub report_failures: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dates: true,
            times: true,
            postal_codes: true,
            phone_numbers: true,
            report_failures: true,
        }
    }
}

impl SuujiConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the tables for entries that would produce a broken pattern.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for era in &self.eras {
            if era.name.is_empty() {
                return Err(SuujiError::Config("era with an empty name".to_string()));
            }
            if !names.insert(era.name.as_str()) {
                return Err(SuujiError::Config(format!("duplicate era {}", era.name)));
            }
            if era.length_in_years.is_some_and(|length| length < 1) {
                return Err(SuujiError::Config(format!(
                    "era {} must last at least one year",
                    era.name
                )));
            }
        }

        let locale = &self.locale;
        let required = [
            ("separators.dash", &locale.separators.dash),
            ("separators.colon", &locale.separators.colon),
            ("suffixes.year", &locale.suffixes.year),
            ("suffixes.month", &locale.suffixes.month),
            ("suffixes.day", &locale.suffixes.day),
            ("suffixes.hour", &locale.suffixes.hour),
        ];
        for (name, table) in required {
            if table.is_empty() {
                return Err(SuujiError::Config(format!("{name} must not be empty")));
            }
        }

        let all_tables = [
            &locale.separators.dash,
            &locale.separators.blank,
            &locale.separators.slash,
            &locale.separators.left_parenthesis,
            &locale.separators.right_parenthesis,
            &locale.separators.comma,
            &locale.separators.colon,
            &locale.separators.postal_code_kanji,
            &locale.prefixes.postal_code,
            &locale.prefixes.time_am,
            &locale.prefixes.time_pm,
            &locale.suffixes.year,
            &locale.suffixes.month,
            &locale.suffixes.day,
            &locale.suffixes.day_like,
            &locale.suffixes.hour,
            &locale.suffixes.minute,
            &locale.suffixes.hour_like,
            &locale.special_values.half_hour,
            &locale.special_values.first_era_year,
        ];
        let relative = locale
            .prefixes
            .relative_year
            .iter()
            .chain(&locale.prefixes.relative_month)
            .map(|t| &t.token);
        if all_tables.iter().flat_map(|t| t.iter()).chain(relative).any(String::is_empty) {
            return Err(SuujiError::Config("locale tables must not contain empty strings".to_string()));
        }

        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
