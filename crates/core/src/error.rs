use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Data-quality problem attached to a cooldown result.
///
/// These never abort a computation; they ride along inside
/// [`CooldownInfo`](crate::cooldown::CooldownInfo) so callers can render a
/// partial row instead of losing the record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownError {
    #[error("check-in date is not in YYYY-MM-DD form")]
    InvalidCheckInFormat,

    #[error("check-in date is not a real calendar date")]
    InvalidCheckInDate,

    #[error("record is missing the check-in date or default cooldown")]
    MissingCooldownFields,

    #[error("cooldown end date falls outside the supported calendar")]
    PeriodOutOfRange,
}

impl CooldownError {
    /// Stable machine-readable tag (matches the serialized form).
    pub fn code(&self) -> &'static str {
        match self {
            CooldownError::InvalidCheckInFormat => "invalid_check_in_format",
            CooldownError::InvalidCheckInDate => "invalid_check_in_date",
            CooldownError::MissingCooldownFields => "missing_cooldown_fields",
            CooldownError::PeriodOutOfRange => "period_out_of_range",
        }
    }
}

#[derive(Error, Debug)]
pub enum HotelCdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Hotel name already exists: {0}")]
    DuplicateName(String),

    #[error("Hotel entry not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, HotelCdError>;
