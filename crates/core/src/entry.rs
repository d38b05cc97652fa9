//! Hotel entry records and their create/update validation.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::cooldown::parse_check_in_date;
use crate::error::{HotelCdError, Result};
use crate::period::deserialize_loose_period;

/// Default cooldown applied to new entries when nothing else is configured.
pub const DEFAULT_CD_DAYS: u32 = 30;

/// One tracked hotel stay.
///
/// `check_in_date` and `default_cd` are optional on read so incomplete
/// records still load; decoration reports them instead of dropping them.
/// Fields this type does not know about are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub check_in_date: Option<String>,
    #[serde(
        rename = "customCD",
        default,
        deserialize_with = "deserialize_loose_period"
    )]
    pub custom_cd: Option<u32>,
    #[serde(
        rename = "defaultCD",
        default,
        deserialize_with = "deserialize_loose_period"
    )]
    pub default_cd: Option<u32>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload for creating an entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHotelEntry {
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    pub check_in_date: String,
    #[serde(
        rename = "customCD",
        default,
        deserialize_with = "deserialize_loose_period"
    )]
    pub custom_cd: Option<u32>,
}

/// Partial update. `custom_cd` is doubly optional: `None` leaves the override
/// alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelEntryPatch {
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(
        rename = "customCD",
        default,
        deserialize_with = "deserialize_patch_period"
    )]
    pub custom_cd: Option<Option<u32>>,
}

impl HotelEntryPatch {
    pub fn is_empty(&self) -> bool {
        self.hotel_name.is_none() && self.check_in_date.is_none() && self.custom_cd.is_none()
    }
}

fn deserialize_blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

// Only invoked when the key is present, so `null` maps to `Some(None)`.
fn deserialize_patch_period<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_loose_period(deserializer).map(Some)
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn normalize_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HotelCdError::Validation("hotel name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_check_in(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HotelCdError::Validation("check-in date is required".into()));
    }
    parse_check_in_date(trimmed)
        .map_err(|e| HotelCdError::Validation(format!("{}: {}", e, trimmed)))?;
    Ok(trimmed.to_string())
}

/// Case-insensitive name clash check, skipping `exclude_id`.
fn ensure_unique_name(name: &str, existing: &[HotelEntry], exclude_id: Option<&str>) -> Result<()> {
    let wanted = name.to_lowercase();
    let clash = existing.iter().any(|e| {
        Some(e.id.as_str()) != exclude_id && e.hotel_name.trim().to_lowercase() == wanted
    });
    if clash {
        return Err(HotelCdError::DuplicateName(name.to_string()));
    }
    Ok(())
}

impl HotelEntry {
    /// Fill a missing or unreadable `default_cd` with `days`. Stored records
    /// written before the field existed still get a real cooldown.
    pub fn with_default_cd(mut self, days: u32) -> Self {
        if self.default_cd.is_none() {
            self.default_cd = Some(days);
        }
        self
    }

    /// Validate `input` against the entries already tracked and build a new
    /// record with a fresh id and timestamps.
    pub fn create(input: &NewHotelEntry, existing: &[HotelEntry], default_cd: u32) -> Result<Self> {
        let hotel_name = normalize_name(&input.hotel_name)?;
        let check_in_date = validate_check_in(&input.check_in_date)?;
        ensure_unique_name(&hotel_name, existing, None)?;

        let now = now_rfc3339();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            hotel_name,
            check_in_date: Some(check_in_date),
            custom_cd: input.custom_cd,
            default_cd: Some(default_cd),
            created_at: now.clone(),
            updated_at: now,
            extra: serde_json::Map::new(),
        })
    }

    /// Apply a partial update. `others` are the remaining entries, used for
    /// the duplicate-name check. `updated_at` is refreshed even when the
    /// patch is empty.
    pub fn apply_patch(&mut self, patch: &HotelEntryPatch, others: &[HotelEntry]) -> Result<()> {
        let hotel_name = match &patch.hotel_name {
            Some(raw) => {
                let name = normalize_name(raw)?;
                ensure_unique_name(&name, others, Some(&self.id))?;
                Some(name)
            }
            None => None,
        };
        let check_in_date = match &patch.check_in_date {
            Some(raw) => Some(validate_check_in(raw)?),
            None => None,
        };

        if let Some(name) = hotel_name {
            self.hotel_name = name;
        }
        if let Some(date) = check_in_date {
            self.check_in_date = Some(date);
        }
        if let Some(custom) = patch.custom_cd {
            self.custom_cd = custom;
        }
        self.updated_at = now_rfc3339();
        Ok(())
    }
}
