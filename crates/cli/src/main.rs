mod cli;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use hotel_cd_core::cooldown::parse_check_in_date;
use hotel_cd_core::period::parse_period;
use hotel_cd_core::{
    Clock, CooldownCalculator, DecoratedEntry, FixedClock, HotelEntryPatch, HotelStore,
    NewHotelEntry, SystemClock,
};

use crate::cli::{CliArgs, Command};
use crate::config::CliConfig;
use crate::output::Terminal;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize tracing
    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    hotel_cd_core::config::load_dotenv();
    let env_config = hotel_cd_core::Config::from_env();
    env_config.log_summary();

    let cli_config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    let terminal = Terminal::new(cli_config.color);

    if let Err(e) = run(args, &env_config, &cli_config, &terminal) {
        terminal.print_error(&format!("{:#}", e))?;
        std::process::exit(1);
    }
    Ok(())
}

fn clock_for(today: Option<chrono::NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    }
}

/// Sort for display: longest remaining cooldown first, then by name.
fn sort_for_display(entries: &mut [DecoratedEntry]) {
    entries.sort_by(|a, b| {
        b.cd_info
            .days_remaining
            .cmp(&a.cd_info.days_remaining)
            .then_with(|| {
                a.entry
                    .hotel_name
                    .to_lowercase()
                    .cmp(&b.entry.hotel_name.to_lowercase())
            })
    });
}

/// History order for expired rows: most recent check-in first, unreadable
/// dates last.
fn sort_by_check_in_desc(entries: &mut [DecoratedEntry]) {
    entries.sort_by_key(|d| {
        std::cmp::Reverse(
            d.entry
                .check_in_date
                .as_deref()
                .and_then(|raw| parse_check_in_date(raw).ok()),
        )
    });
}

/// Which rows `list` keeps.
#[derive(Debug, Default)]
struct ListFilter<'a> {
    active: bool,
    expired: bool,
    search: Option<&'a str>,
}

impl ListFilter<'_> {
    /// Rows that failed to compute are neither active nor expired, so the
    /// status filters drop them.
    fn keeps(&self, row: &DecoratedEntry) -> bool {
        if self.active && !row.cd_info.is_active {
            return false;
        }
        if self.expired && (row.cd_info.is_active || row.cd_info.is_error()) {
            return false;
        }
        match self.search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(needle) => row
                .entry
                .hotel_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

fn filter_rows(rows: &mut Vec<DecoratedEntry>, filter: &ListFilter<'_>) {
    rows.retain(|row| filter.keeps(row));
}

fn run(
    args: CliArgs,
    env_config: &hotel_cd_core::Config,
    cli_config: &CliConfig,
    terminal: &Terminal,
) -> Result<()> {
    let default_cd = cli_config.resolve_default_cd(env_config, None);
    let store_path = cli_config.resolve_store_path(env_config, args.store.as_deref());
    debug!(store = %store_path.display(), default_cd, "Resolved settings");

    match args.command {
        Command::Check {
            date,
            custom,
            default_days,
            today,
            json,
        } => {
            let custom_days = custom.as_deref().and_then(|raw| {
                let parsed = parse_period(raw);
                if parsed.is_none() {
                    warn!(custom = raw, "Ignoring unparsable custom cooldown, using default");
                }
                parsed
            });
            let default_days = cli_config.resolve_default_cd(env_config, default_days);
            let calculator = CooldownCalculator::with_clock(clock_for(today), default_days);
            let info = calculator.compute(date.trim(), custom_days, default_days);
            if json {
                terminal.print_json(&info)?;
            } else {
                terminal.print_cooldown(date.trim(), &info)?;
            }
        }

        Command::Format { date } => {
            println!("{}", hotel_cd_core::format_display_date(date.as_str()));
        }

        Command::List {
            active,
            expired,
            search,
            today,
            json,
        } => {
            let store = HotelStore::new(&store_path, default_cd);
            let entries = store
                .list()
                .with_context(|| format!("failed to read {}", store_path.display()))?;
            let calculator = CooldownCalculator::with_clock(clock_for(today), default_cd);
            let mut decorated = calculator.attach(entries);
            filter_rows(
                &mut decorated,
                &ListFilter {
                    active,
                    expired,
                    search: search.as_deref(),
                },
            );
            if expired {
                sort_by_check_in_desc(&mut decorated);
            } else {
                sort_for_display(&mut decorated);
            }
            if json {
                terminal.print_json(&decorated)?;
            } else {
                terminal.print_entries(&decorated)?;
            }
        }

        Command::Add { name, date, custom } => {
            let store = HotelStore::new(&store_path, default_cd);
            let entry = store.add(&NewHotelEntry {
                hotel_name: name,
                check_in_date: date,
                custom_cd: custom,
            })?;
            let decorated = CooldownCalculator::new(default_cd).attach(entry);
            terminal.print_info(&format!("Added {} ({})", decorated.entry.hotel_name, decorated.entry.id))?;
            terminal.print_entries(std::slice::from_ref(&decorated))?;
        }

        Command::Update {
            id,
            name,
            date,
            custom,
            clear_custom,
        } => {
            let patch = HotelEntryPatch {
                hotel_name: name,
                check_in_date: date,
                custom_cd: if clear_custom { Some(None) } else { custom.map(Some) },
            };
            let store = HotelStore::new(&store_path, default_cd);
            let entry = store.update(&id, &patch)?;
            let decorated = CooldownCalculator::new(default_cd).attach(entry);
            terminal.print_info(&format!("Updated {}", decorated.entry.hotel_name))?;
            terminal.print_entries(std::slice::from_ref(&decorated))?;
        }

        Command::Remove { id } => {
            let store = HotelStore::new(&store_path, default_cd);
            let removed = store.remove(&id)?;
            terminal.print_info(&format!("Removed {} ({})", removed.hotel_name, removed.id))?;
        }
    }

    Ok(())
}
