//! Cooldown computation: when can a hotel be booked again?

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::error::CooldownError;
use crate::format::{render, INVALID_DATE};
use crate::period::effective_period;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Summary of a record's cooldown as of "today".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownInfo {
    /// Check-in date as `MM月DD日`, or the invalid-date sentinel.
    pub formatted_check_in_date: String,
    /// End date as `MM月DD日`, or the invalid-date sentinel.
    #[serde(rename = "cdEndDate")]
    pub cooldown_end_date: String,
    /// Full end date, present whenever the computation succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub days_remaining: u32,
    pub is_active: bool,
    #[serde(rename = "cdPeriod")]
    pub effective_period_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CooldownError>,
}

impl CooldownInfo {
    /// Result for a record that could not be computed. Display fields carry the
    /// sentinel, nothing is active.
    pub fn failed(error: CooldownError, effective_period_days: u32) -> Self {
        Self {
            formatted_check_in_date: INVALID_DATE.to_string(),
            cooldown_end_date: INVALID_DATE.to_string(),
            end_date: None,
            days_remaining: 0,
            is_active: false,
            effective_period_days,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Parse a check-in date strictly as three dash-separated numeric parts.
pub fn parse_check_in_date(raw: &str) -> Result<NaiveDate, CooldownError> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 {
        return Err(CooldownError::InvalidCheckInFormat);
    }

    let numeric = |s: &str| -> Result<u32, CooldownError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CooldownError::InvalidCheckInFormat);
        }
        s.parse().map_err(|_| CooldownError::InvalidCheckInDate)
    };

    let year = numeric(parts[0])?;
    let month = numeric(parts[1])?;
    let day = numeric(parts[2])?;
    let year = i32::try_from(year).map_err(|_| CooldownError::InvalidCheckInDate)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(CooldownError::InvalidCheckInDate)
}

/// Whole days from `today` until `end`, rounded up.
///
/// Both dates sit at midnight so the span is an exact multiple of a day; the
/// ceiling still governs any partial day.
pub fn days_until(end: NaiveDate, today: NaiveDate) -> i64 {
    let seconds = end
        .and_time(chrono::NaiveTime::MIN)
        .signed_duration_since(today.and_time(chrono::NaiveTime::MIN))
        .num_seconds();
    ceil_div(seconds, SECONDS_PER_DAY)
}

fn ceil_div(n: i64, d: i64) -> i64 {
    let q = n.div_euclid(d);
    if n.rem_euclid(d) == 0 {
        q
    } else {
        q + 1
    }
}

/// Compute the cooldown for a check-in date against an explicit "today".
pub fn compute_cooldown_on(
    check_in_date: &str,
    custom_period_days: Option<u32>,
    default_period_days: u32,
    today: NaiveDate,
) -> CooldownInfo {
    let period = effective_period(custom_period_days, default_period_days);

    let check_in = match parse_check_in_date(check_in_date) {
        Ok(d) => d,
        Err(err) => {
            debug!(check_in_date, error = %err, "Rejected check-in date");
            return CooldownInfo::failed(err, period);
        }
    };

    let Some(end) = check_in.checked_add_days(Days::new(u64::from(period))) else {
        debug!(check_in_date, period, "Cooldown end date overflows calendar");
        let mut info = CooldownInfo::failed(CooldownError::PeriodOutOfRange, period);
        info.formatted_check_in_date = render(check_in);
        return info;
    };

    let remaining = days_until(end, today);
    let is_active = remaining > 0;
    let days_remaining = if is_active {
        u32::try_from(remaining).unwrap_or(u32::MAX)
    } else {
        0
    };

    CooldownInfo {
        formatted_check_in_date: render(check_in),
        cooldown_end_date: render(end),
        end_date: Some(end),
        days_remaining,
        is_active,
        effective_period_days: period,
        error: None,
    }
}

/// Compute the cooldown for a check-in date using `clock` for "today".
pub fn compute_cooldown<C: Clock + ?Sized>(
    check_in_date: &str,
    custom_period_days: Option<u32>,
    default_period_days: u32,
    clock: &C,
) -> CooldownInfo {
    compute_cooldown_on(check_in_date, custom_period_days, default_period_days, clock.today())
}
