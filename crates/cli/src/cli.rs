use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use hotel_cd_core::cooldown::parse_check_in_date;

/// Track hotel booking cooldowns.
///
/// Records a hotel and its check-in date, then reports when the same hotel
/// may be booked again.
#[derive(Parser, Debug)]
#[command(name = "hotel-cd", about = "Track hotel booking cooldown windows")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/hotel-cd/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to the hotels JSON file (overrides env and config file)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a cooldown without touching the store
    Check {
        /// Check-in date (YYYY-MM-DD)
        date: String,

        /// Custom cooldown in days; unparsable values fall back to the default
        #[arg(long)]
        custom: Option<String>,

        /// Default cooldown in days
        #[arg(long = "default")]
        default_days: Option<u32>,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a date in display form
    Format {
        date: String,
    },

    /// List tracked hotels with their cooldowns
    List {
        /// Only show hotels still in cooldown
        #[arg(long, conflicts_with = "expired")]
        active: bool,

        /// Only show hotels whose cooldown has ended
        #[arg(long)]
        expired: bool,

        /// Only show hotels whose name contains TEXT (case-insensitive)
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Track a new hotel stay
    Add {
        name: String,

        /// Check-in date (YYYY-MM-DD)
        date: String,

        /// Custom cooldown in days
        #[arg(long)]
        custom: Option<u32>,
    },

    /// Change a tracked hotel
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// New check-in date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New custom cooldown in days
        #[arg(long, conflicts_with = "clear_custom")]
        custom: Option<u32>,

        /// Drop the custom cooldown and use the default again
        #[arg(long)]
        clear_custom: bool,
    },

    /// Stop tracking a hotel
    Remove {
        id: String,
    },
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_check_in_date(raw.trim()).map_err(|e| e.to_string())
}
