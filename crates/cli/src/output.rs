use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use serde::Serialize;
use std::io::{self, Write};

use hotel_cd_core::{CooldownInfo, DecoratedEntry};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const ACTIVE: Color = Color::Yellow;
    const EXPIRED: Color = Color::Green;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
    const HEADER: Color = Color::Magenta;
}

/// Writes command results to the terminal.
pub struct Terminal {
    color: bool,
}

impl Terminal {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn write<W: Write>(&self, out: &mut W, color: Option<Color>, text: &str) -> Result<()> {
        match color {
            Some(c) if self.color => {
                execute!(out, SetForegroundColor(c), Print(text), ResetColor)?;
            }
            _ => {
                execute!(out, Print(text))?;
            }
        }
        Ok(())
    }

    pub fn print_info(&self, message: &str) -> Result<()> {
        let mut stdout = io::stdout();
        self.write(&mut stdout, Some(Colors::DIM), &format!("{}\n", message))?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_error(&self, message: &str) -> Result<()> {
        let mut stderr = io::stderr();
        self.write(&mut stderr, Some(Colors::ERROR), &format!("error: {}\n", message))?;
        stderr.flush()?;
        Ok(())
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// One-off computation result.
    pub fn print_cooldown(&self, check_in: &str, info: &CooldownInfo) -> Result<()> {
        let mut stdout = io::stdout();
        self.write(
            &mut stdout,
            Some(Colors::HEADER),
            &format!("check-in {} ({})\n", check_in, info.formatted_check_in_date),
        )?;
        self.write(
            &mut stdout,
            Some(Colors::DIM),
            &format!("cooldown {} days, ends {}\n", info.effective_period_days, info.cooldown_end_date),
        )?;
        self.write(&mut stdout, Some(status_color(info)), &format!("{}\n", status_line(info)))?;
        stdout.flush()?;
        Ok(())
    }

    /// Table of decorated entries.
    pub fn print_entries(&self, entries: &[DecoratedEntry]) -> Result<()> {
        let mut stdout = io::stdout();
        if entries.is_empty() {
            self.write(&mut stdout, Some(Colors::DIM), "No hotels tracked.\n")?;
            stdout.flush()?;
            return Ok(());
        }

        let name_width = entries
            .iter()
            .map(|e| e.entry.hotel_name.chars().count())
            .max()
            .unwrap_or(0)
            .max(5);

        self.write(
            &mut stdout,
            Some(Colors::HEADER),
            &format!("{:<8}  {:<name_width$}  {:<10}  {:>4}  STATUS\n", "ID", "HOTEL", "CHECK-IN", "CD"),
        )?;
        for row in entries {
            let info = &row.cd_info;
            let id: String = row.entry.id.chars().take(8).collect();
            let line = format!(
                "{:<8}  {:<name_width$}  {:<10}  {:>3}d  ",
                id, row.entry.hotel_name, row.formatted_check_in_date, info.effective_period_days,
            );
            self.write(&mut stdout, None, &line)?;
            self.write(&mut stdout, Some(status_color(info)), &format!("{}\n", status_line(info)))?;
        }
        stdout.flush()?;
        Ok(())
    }
}

fn status_color(info: &CooldownInfo) -> Color {
    if info.error.is_some() {
        Colors::ERROR
    } else if info.is_active {
        Colors::ACTIVE
    } else {
        Colors::EXPIRED
    }
}

/// Human summary of a cooldown result.
pub fn status_line(info: &CooldownInfo) -> String {
    if let Some(err) = info.error {
        return format!("cannot compute: {}", err);
    }
    if info.is_active {
        let unit = if info.days_remaining == 1 { "day" } else { "days" };
        format!(
            "{} {} left, bookable from {}",
            info.days_remaining, unit, info.cooldown_end_date
        )
    } else {
        format!("bookable now (cooldown ended {})", info.cooldown_end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hotel_cd_core::compute_cooldown_on;

    fn today(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn active_status() {
        let info = compute_cooldown_on("2025-01-01", None, 30, today(2025, 1, 20));
        assert_eq!(status_line(&info), "11 days left, bookable from 01月31日");
    }

    #[test]
    fn singular_day() {
        let info = compute_cooldown_on("2025-01-01", None, 30, today(2025, 1, 30));
        assert_eq!(status_line(&info), "1 day left, bookable from 01月31日");
    }

    #[test]
    fn expired_status() {
        let info = compute_cooldown_on("2025-01-01", None, 30, today(2025, 2, 5));
        assert_eq!(status_line(&info), "bookable now (cooldown ended 01月31日)");
    }

    #[test]
    fn error_status() {
        let info = compute_cooldown_on("2025-02-30", None, 30, today(2025, 2, 5));
        assert!(status_line(&info).starts_with("cannot compute:"));
        assert_eq!(status_color(&info), Colors::ERROR);
    }
}
