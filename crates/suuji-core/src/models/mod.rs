//! Data models for extracted entities and configuration.

pub mod config;
pub mod date;
pub mod postal_code;
pub mod time;

pub use config::{ExtractionConfig, LocaleTables, RelativeToken, SuujiConfig};
pub use date::{default_eras, CompositeDate, DateMode, Day, Era, Month, Year};
pub use postal_code::PostalCode;
pub use time::{compose_time, TimeDecorator};
