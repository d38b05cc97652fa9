pub mod clock;
pub mod config;
pub mod cooldown;
pub mod decorate;
pub mod entry;
pub mod error;
pub mod format;
pub mod period;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use cooldown::{compute_cooldown, compute_cooldown_on, CooldownInfo};
pub use decorate::{attach_cooldown_info, AttachCooldown, CooldownCalculator, DecoratedEntry};
pub use entry::{HotelEntry, HotelEntryPatch, NewHotelEntry, DEFAULT_CD_DAYS};
pub use error::*;
pub use format::{format_display_date, DateLike, INVALID_DATE};
pub use store::HotelStore;
