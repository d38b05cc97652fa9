//! Cooldown period values as they arrive from stored records or user input.
//!
//! Hash-backed stores hand every field back as a string, older records carry
//! JSON numbers, and cleared overrides show up as `null` or `""`. All of that
//! is collapsed here into `Option<u32>` so the computation never sees
//! anything but a validated day count.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Raw period value before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoosePeriod {
    Int(i64),
    Float(f64),
    Text(String),
    /// Booleans, arrays, objects: never a valid period.
    Other(IgnoredAny),
}

impl LoosePeriod {
    /// Resolve to a day count. Negative, fractional and non-numeric values
    /// resolve to `None`.
    pub fn resolve(&self) -> Option<u32> {
        match self {
            LoosePeriod::Int(n) => u32::try_from(*n).ok(),
            LoosePeriod::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 {
                    Some(*f as u32)
                } else {
                    None
                }
            }
            LoosePeriod::Text(s) => parse_period(s),
            LoosePeriod::Other(_) => None,
        }
    }
}

/// Parse a day count from text. Surrounding whitespace is ignored; anything
/// other than a plain non-negative integer yields `None`.
pub fn parse_period(raw: &str) -> Option<u32> {
    let s = raw.trim();
    let digits = s.strip_prefix('+').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Serde adapter: deserialize a loosely typed period into `Option<u32>`.
///
/// Use with `#[serde(default, deserialize_with = "...")]` so a missing field
/// also becomes `None`.
pub fn deserialize_loose_period<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<LoosePeriod> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.resolve()))
}

/// Pick the period that actually applies: the override when present,
/// otherwise the default.
pub fn effective_period(custom: Option<u32>, default: u32) -> u32 {
    custom.unwrap_or(default)
}
