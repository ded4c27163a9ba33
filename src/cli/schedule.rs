use chrono::NaiveDate;
use clap::Parser;
use madrasa::{
    CourseSchedule, WeeklySlot,
    domain::schedule::{parse_date, parse_day, parse_time},
};
use serde_json::json;

use super::OutputFormat;
use super::terminal::Colorize;

/// Command arguments for `madrasa schedule`.
#[derive(Debug, Parser)]
#[command(about = "Derive course duration and session count")]
pub struct Schedule {
    /// Course start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    start: Option<NaiveDate>,

    /// Course end date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    end: Option<NaiveDate>,

    /// Weekly slot, as DAY or DAY@HH:MM-HH:MM (repeatable)
    #[arg(long = "slot", value_name = "SLOT", value_parser = parse_slot_arg)]
    slots: Vec<WeeklySlot>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Schedule {
    pub fn run(self) -> anyhow::Result<()> {
        let schedule = CourseSchedule::new(self.start, self.end, self.slots);
        let derived = schedule.derive()?;

        if self.output == OutputFormat::Json {
            let value = derived.map_or_else(
                || json!({ "duration_weeks": null, "total_sessions": null }),
                |d| json!(d),
            );
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        match derived {
            Some(d) => {
                println!("Duration: {} week(s)", d.duration_weeks);
                println!("Sessions: {}", d.total_sessions);
            }
            None => println!(
                "{}",
                "not yet computable: needs --start, --end, and at least one --slot".warning()
            ),
        }

        Ok(())
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

/// Parse a `DAY` or `DAY@HH:MM-HH:MM` slot argument.
///
/// Times are informational for derivation, so a bare day gets a whole-day
/// placeholder block.
fn parse_slot_arg(s: &str) -> Result<WeeklySlot, String> {
    let (day, times) = s
        .split_once('@')
        .map_or((s, None), |(day, times)| (day, Some(times)));

    let day = parse_day(day).map_err(|e| e.to_string())?;

    let (start, end) = match times {
        Some(times) => {
            let (start, end) = times
                .split_once('-')
                .ok_or_else(|| format!("invalid time range '{times}': expected HH:MM-HH:MM"))?;
            (start, end)
        }
        None => ("00:00", "23:59"),
    };
    let start = parse_time(start).map_err(|e| e.to_string())?;
    let end = parse_time(end).map_err(|e| e.to_string())?;

    WeeklySlot::new(day, start, end, None).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    #[test]
    fn parses_bare_day() {
        let slot = parse_slot_arg("monday").unwrap();
        assert_eq!(slot.day(), Weekday::Mon);
    }

    #[test]
    fn parses_day_with_times() {
        let slot = parse_slot_arg("fri@19:00-20:30").unwrap();
        assert_eq!(slot.day(), Weekday::Fri);
        assert_eq!(slot.start_time(), parse_time("19:00").unwrap());
        assert_eq!(slot.end_time(), parse_time("20:30").unwrap());
    }

    #[test]
    fn rejects_malformed_slots() {
        assert!(parse_slot_arg("moonday").is_err());
        assert!(parse_slot_arg("mon@19:00").is_err());
        assert!(parse_slot_arg("mon@20:00-19:00").is_err());
    }
}
