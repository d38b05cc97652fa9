//! Attach cooldown summaries to hotel entries, one at a time or in batches.
//!
//! Decoration never drops or reorders records. A record that cannot be
//! computed is still returned, carrying an error-tagged [`CooldownInfo`].

use serde::Serialize;
use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::cooldown::{compute_cooldown_on, CooldownInfo};
use crate::entry::{HotelEntry, DEFAULT_CD_DAYS};
use crate::error::CooldownError;
use crate::format::format_display_date;
use crate::period::effective_period;

/// A hotel entry together with its cooldown summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedEntry {
    #[serde(flatten)]
    pub entry: HotelEntry,
    #[serde(rename = "cdInfo")]
    pub cd_info: CooldownInfo,
    pub formatted_check_in_date: String,
}

/// Computes cooldowns against a clock.
///
/// `fallback_period_days` only labels results for records that are missing
/// their own default; it never feeds a real computation.
#[derive(Debug, Clone)]
pub struct CooldownCalculator<C = SystemClock> {
    clock: C,
    fallback_period_days: u32,
}

impl CooldownCalculator<SystemClock> {
    pub fn new(fallback_period_days: u32) -> Self {
        Self::with_clock(SystemClock, fallback_period_days)
    }
}

impl Default for CooldownCalculator<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_CD_DAYS)
    }
}

impl<C: Clock> CooldownCalculator<C> {
    pub fn with_clock(clock: C, fallback_period_days: u32) -> Self {
        Self {
            clock,
            fallback_period_days,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn fallback_period_days(&self) -> u32 {
        self.fallback_period_days
    }

    /// Single computation against this calculator's clock.
    pub fn compute(&self, check_in_date: &str, custom: Option<u32>, default: u32) -> CooldownInfo {
        compute_cooldown_on(check_in_date, custom, default, self.clock.today())
    }

    /// Decorate one entry. Decoration keys already present in the record's
    /// passthrough fields are replaced, never duplicated.
    pub fn decorate(&self, mut entry: HotelEntry) -> DecoratedEntry {
        entry.extra.remove("cdInfo");
        entry.extra.remove("formattedCheckInDate");

        let cd_info = match (entry.check_in_date.as_deref(), entry.default_cd) {
            (Some(check_in), Some(default)) => self.compute(check_in, entry.custom_cd, default),
            (check_in, default) => {
                let period = effective_period(
                    entry.custom_cd,
                    default.unwrap_or(self.fallback_period_days),
                );
                let mut info = CooldownInfo::failed(CooldownError::MissingCooldownFields, period);
                if let Some(raw) = check_in {
                    info.formatted_check_in_date = format_display_date(raw);
                }
                info
            }
        };

        if let Some(err) = cd_info.error {
            warn!(
                id = %entry.id,
                hotel = %entry.hotel_name,
                error = err.code(),
                "Cooldown could not be computed for entry"
            );
        }

        let formatted_check_in_date = cd_info.formatted_check_in_date.clone();
        DecoratedEntry {
            entry,
            cd_info,
            formatted_check_in_date,
        }
    }

    /// Decorate a single entry or a batch; the output mirrors the input shape.
    pub fn attach<T: AttachCooldown>(&self, data: T) -> T::Output {
        data.attach_with(self)
    }
}

/// Shapes that can carry cooldown info: a single entry, an optional entry, or
/// an ordered batch.
pub trait AttachCooldown {
    type Output;

    fn attach_with<C: Clock>(self, calculator: &CooldownCalculator<C>) -> Self::Output;
}

impl AttachCooldown for HotelEntry {
    type Output = DecoratedEntry;

    fn attach_with<C: Clock>(self, calculator: &CooldownCalculator<C>) -> Self::Output {
        calculator.decorate(self)
    }
}

impl AttachCooldown for Option<HotelEntry> {
    type Output = Option<DecoratedEntry>;

    fn attach_with<C: Clock>(self, calculator: &CooldownCalculator<C>) -> Self::Output {
        self.map(|entry| calculator.decorate(entry))
    }
}

impl AttachCooldown for Vec<HotelEntry> {
    type Output = Vec<DecoratedEntry>;

    fn attach_with<C: Clock>(self, calculator: &CooldownCalculator<C>) -> Self::Output {
        self.into_iter().map(|entry| calculator.decorate(entry)).collect()
    }
}

impl AttachCooldown for &[HotelEntry] {
    type Output = Vec<DecoratedEntry>;

    fn attach_with<C: Clock>(self, calculator: &CooldownCalculator<C>) -> Self::Output {
        self.iter().cloned().map(|entry| calculator.decorate(entry)).collect()
    }
}

/// Decorate `data` using `clock` for "today" and the stock 30-day fallback.
pub fn attach_cooldown_info<T: AttachCooldown, C: Clock>(data: T, clock: C) -> T::Output {
    CooldownCalculator::with_clock(clock, DEFAULT_CD_DAYS).attach(data)
}
