//! Course schedule derivation.
//!
//! Turns a course's date range and weekly meeting pattern into the two
//! derived figures shown on the course form and persisted with the course
//! record: the number of calendar weeks the course spans, and the number of
//! individual class sessions that will occur.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Errors arising from malformed or inconsistent schedule inputs.
///
/// All of these are local, recoverable conditions surfaced as inline form
/// feedback. None are fatal.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A time-of-day string did not match `HH:MM`.
    #[error("invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// A date string did not match `YYYY-MM-DD`.
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A string did not name a day of the week.
    #[error("invalid day of week '{0}'")]
    InvalidDay(String),

    /// A slot's end time is not strictly after its start time.
    #[error("slot end {end} is not after slot start {start}")]
    SlotOrder {
        /// The slot's start time.
        start: NaiveTime,
        /// The slot's end time.
        end: NaiveTime,
    },

    /// The course end date precedes its start date.
    #[error("end date {end} precedes start date {start}")]
    InvalidRange {
        /// The course start date.
        start: NaiveDate,
        /// The course end date.
        end: NaiveDate,
    },
}

/// Parses a local time-of-day in `HH:MM` form.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTime`] if the string is malformed.
pub fn parse_time(s: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| ScheduleError::InvalidTime(s.to_string()))
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDate`] if the string is malformed.
pub fn parse_date(s: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ScheduleError::InvalidDate(s.to_string()))
}

/// Parses a day-of-week name ("monday", "mon", case-insensitive).
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDay`] if the string does not name a day.
pub fn parse_day(s: &str) -> Result<Weekday, ScheduleError> {
    s.parse().map_err(|_| ScheduleError::InvalidDay(s.to_string()))
}

/// Returns the full lowercase English name of a weekday, as used on the wire.
#[must_use]
pub const fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// One recurring weekly class meeting.
///
/// Only the day of week participates in schedule derivation; the time range
/// and location are informational. The `start < end` ordering is enforced at
/// construction, so a `WeeklySlot` is always internally consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeeklySlotWire", into = "WeeklySlotWire")]
pub struct WeeklySlot {
    day: Weekday,
    start_time: NaiveTime,
    end_time: NaiveTime,
    location: Option<String>,
}

impl WeeklySlot {
    /// Creates a slot, enforcing that the end time is strictly after the
    /// start time.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::SlotOrder`] if `end_time <= start_time`.
    pub fn new(
        day: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        location: Option<String>,
    ) -> Result<Self, ScheduleError> {
        if end_time <= start_time {
            return Err(ScheduleError::SlotOrder {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            day,
            start_time,
            end_time,
            location,
        })
    }

    /// The day of week this slot recurs on.
    #[must_use]
    pub const fn day(&self) -> Weekday {
        self.day
    }

    /// The local start time of the meeting.
    #[must_use]
    pub const fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    /// The local end time of the meeting.
    #[must_use]
    pub const fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// The meeting location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// Wire representation of a slot: day as a lowercase name, times as `HH:MM`.
#[derive(Debug, Serialize, Deserialize)]
struct WeeklySlotWire {
    day: String,
    start_time: String,
    end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl TryFrom<WeeklySlotWire> for WeeklySlot {
    type Error = ScheduleError;

    fn try_from(wire: WeeklySlotWire) -> Result<Self, Self::Error> {
        Self::new(
            parse_day(&wire.day)?,
            parse_time(&wire.start_time)?,
            parse_time(&wire.end_time)?,
            wire.location,
        )
    }
}

impl From<WeeklySlot> for WeeklySlotWire {
    fn from(slot: WeeklySlot) -> Self {
        Self {
            day: day_name(slot.day).to_string(),
            start_time: slot.start_time.format("%H:%M").to_string(),
            end_time: slot.end_time.format("%H:%M").to_string(),
            location: slot.location,
        }
    }
}

/// The derived-computation input aggregate.
///
/// Constructed transiently on every edit of the course form; never persisted
/// as its own entity. Either date may be absent while the form is partially
/// filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseSchedule {
    /// First day of the course (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Last day of the course (inclusive).
    pub end_date: Option<NaiveDate>,
    /// The weekly meeting pattern. Days may repeat across different time
    /// ranges; only the set of distinct days matters for derivation.
    pub slots: Vec<WeeklySlot>,
}

/// The derived schedule figures attached to the course record.
///
/// Field names match the JSON payload sent to the course-management
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDerivation {
    /// Calendar weeks spanned by the course, rounded up.
    pub duration_weeks: u32,
    /// Total number of individual class sessions in the date range.
    pub total_sessions: u32,
}

impl CourseSchedule {
    /// Creates a schedule from its parts.
    #[must_use]
    pub const fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        slots: Vec<WeeklySlot>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            slots,
        }
    }

    /// Derives the duration in weeks and the total session count.
    ///
    /// Returns `Ok(None)` while the inputs are incomplete (missing start
    /// date, missing end date, or no slots): not an error, just "not yet
    /// computable". The result is deterministic and independent of slot
    /// order; duplicate days of week across slots count once.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidRange`] if the end date precedes the
    /// start date.
    #[instrument(level = "debug", skip(self))]
    pub fn derive(&self) -> Result<Option<ScheduleDerivation>, ScheduleError> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Ok(None);
        };
        if self.slots.is_empty() {
            return Ok(None);
        }
        if end < start {
            return Err(ScheduleError::InvalidRange { start, end });
        }

        let span_days = (end - start).num_days();
        let duration_weeks = clamped_u32((span_days + 6) / 7);

        // Collapse slots to their distinct days of week, then count each
        // day's calendar occurrences in the inclusive range.
        let total_sessions = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|day| self.slots.iter().any(|slot| slot.day == *day))
        .map(|day| occurrences_in_range(day, start, end))
        .sum();

        Ok(Some(ScheduleDerivation {
            duration_weeks,
            total_sessions,
        }))
    }
}

/// Counts the occurrences of a weekday within an inclusive date range.
///
/// Walks forward from `start` to the first matching date, then counts every
/// 7th day up to and including `end`.
fn occurrences_in_range(day: Weekday, start: NaiveDate, end: NaiveDate) -> u32 {
    let offset = (day.num_days_from_monday() + 7 - start.weekday().num_days_from_monday()) % 7;
    let Some(first) = start.checked_add_days(Days::new(u64::from(offset))) else {
        return 0;
    };
    if first > end {
        return 0;
    }
    let repeats = (end - first).num_days() / 7;
    clamped_u32(repeats + 1)
}

/// Clamping conversion for derived counts. The representable date range
/// spans roughly 27 million weeks, well inside `u32`, so the clamp never
/// engages in practice.
fn clamped_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> NaiveTime {
        parse_time(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn slot(day: Weekday) -> WeeklySlot {
        WeeklySlot::new(day, time("19:00"), time("20:30"), None).unwrap()
    }

    fn slot_at(day: Weekday, start: &str, end: &str) -> WeeklySlot {
        WeeklySlot::new(day, time(start), time(end), None).unwrap()
    }

    #[test]
    fn incomplete_inputs_are_not_computable() {
        let missing_end = CourseSchedule::new(
            Some(date("2025-01-01")),
            None,
            vec![slot(Weekday::Mon)],
        );
        assert_eq!(missing_end.derive().unwrap(), None);

        let missing_start = CourseSchedule::new(
            None,
            Some(date("2025-03-01")),
            vec![slot(Weekday::Mon)],
        );
        assert_eq!(missing_start.derive().unwrap(), None);

        let no_slots =
            CourseSchedule::new(Some(date("2025-01-01")), Some(date("2025-03-01")), vec![]);
        assert_eq!(no_slots.derive().unwrap(), None);
    }

    #[test]
    fn reversed_range_is_an_error() {
        let schedule = CourseSchedule::new(
            Some(date("2025-03-01")),
            Some(date("2025-01-01")),
            vec![slot(Weekday::Mon)],
        );
        assert_eq!(
            schedule.derive().unwrap_err(),
            ScheduleError::InvalidRange {
                start: date("2025-03-01"),
                end: date("2025-01-01"),
            }
        );
    }

    #[test]
    fn single_day_course_with_matching_weekday_has_one_session() {
        // 2025-01-06 is a Monday.
        let schedule = CourseSchedule::new(
            Some(date("2025-01-06")),
            Some(date("2025-01-06")),
            vec![slot(Weekday::Mon)],
        );
        let derived = schedule.derive().unwrap().unwrap();
        assert_eq!(derived.duration_weeks, 0);
        assert_eq!(derived.total_sessions, 1);
    }

    #[test]
    fn single_day_course_with_non_matching_weekday_has_zero_sessions() {
        let schedule = CourseSchedule::new(
            Some(date("2025-01-06")),
            Some(date("2025-01-06")),
            vec![slot(Weekday::Fri)],
        );
        let derived = schedule.derive().unwrap().unwrap();
        assert_eq!(derived.total_sessions, 0);
    }

    #[test]
    fn counts_five_wednesdays_in_a_four_week_range() {
        // 2025-01-01 and 2025-01-29 are both Wednesdays; the inclusive
        // range contains five of them.
        let schedule = CourseSchedule::new(
            Some(date("2025-01-01")),
            Some(date("2025-01-29")),
            vec![slot(Weekday::Wed)],
        );
        let derived = schedule.derive().unwrap().unwrap();
        assert_eq!(derived.duration_weeks, 4);
        assert_eq!(derived.total_sessions, 5);
    }

    #[test]
    fn duration_rounds_partial_weeks_up() {
        // 30 inclusive days: a 29-day span, ceil(29 / 7) = 5.
        let schedule = CourseSchedule::new(
            Some(date("2025-01-01")),
            Some(date("2025-01-30")),
            vec![slot(Weekday::Wed)],
        );
        let derived = schedule.derive().unwrap().unwrap();
        assert_eq!(derived.duration_weeks, 5);
    }

    #[test]
    fn duplicate_weekday_slots_count_once_per_week() {
        let morning = slot_at(Weekday::Mon, "09:00", "10:30");
        let evening = slot_at(Weekday::Mon, "19:00", "20:30");

        let doubled = CourseSchedule::new(
            Some(date("2025-01-06")),
            Some(date("2025-02-02")),
            vec![morning, evening],
        );
        let single = CourseSchedule::new(
            Some(date("2025-01-06")),
            Some(date("2025-02-02")),
            vec![slot(Weekday::Mon)],
        );

        assert_eq!(
            doubled.derive().unwrap().unwrap().total_sessions,
            single.derive().unwrap().unwrap().total_sessions
        );
    }

    #[test]
    fn derivation_is_invariant_to_slot_order() {
        let slots = vec![slot(Weekday::Fri), slot(Weekday::Mon), slot(Weekday::Wed)];
        let mut reversed = slots.clone();
        reversed.reverse();

        let forward = CourseSchedule::new(
            Some(date("2025-02-03")),
            Some(date("2025-04-27")),
            slots,
        );
        let backward = CourseSchedule::new(
            Some(date("2025-02-03")),
            Some(date("2025-04-27")),
            reversed,
        );

        assert_eq!(forward.derive().unwrap(), backward.derive().unwrap());
    }

    #[test]
    fn counts_each_distinct_day_independently() {
        // 2025-01-06 (Monday) through 2025-01-19 (Sunday): two full weeks,
        // so two Mondays and two Thursdays.
        let schedule = CourseSchedule::new(
            Some(date("2025-01-06")),
            Some(date("2025-01-19")),
            vec![slot(Weekday::Mon), slot(Weekday::Thu)],
        );
        let derived = schedule.derive().unwrap().unwrap();
        assert_eq!(derived.duration_weeks, 2);
        assert_eq!(derived.total_sessions, 4);
    }

    #[test]
    fn widest_representable_range_derives_without_overflow() {
        let schedule = CourseSchedule::new(
            Some(NaiveDate::MIN),
            Some(NaiveDate::MAX),
            vec![slot(Weekday::Mon)],
        );
        let derived = schedule.derive().unwrap().unwrap();
        assert!(derived.duration_weeks > 1_000_000);
        assert!(derived.total_sessions > 1_000_000);
        assert!(derived.duration_weeks < u32::MAX);
    }

    #[test]
    fn slot_rejects_inverted_times() {
        let err = WeeklySlot::new(Weekday::Mon, time("20:00"), time("19:00"), None).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::SlotOrder {
                start: time("20:00"),
                end: time("19:00"),
            }
        );

        // Zero-length slots are rejected too.
        assert!(WeeklySlot::new(Weekday::Mon, time("19:00"), time("19:00"), None).is_err());
    }

    #[test]
    fn malformed_inputs_fail_with_validation_errors() {
        assert_eq!(
            parse_time("7pm").unwrap_err(),
            ScheduleError::InvalidTime("7pm".to_string())
        );
        assert_eq!(
            parse_date("01/02/2025").unwrap_err(),
            ScheduleError::InvalidDate("01/02/2025".to_string())
        );
        assert_eq!(
            parse_day("moonday").unwrap_err(),
            ScheduleError::InvalidDay("moonday".to_string())
        );
    }

    #[test]
    fn slot_serde_uses_wire_names() {
        let slot = WeeklySlot::new(
            Weekday::Sun,
            time("10:00"),
            time("11:30"),
            Some("Main hall".to_string()),
        )
        .unwrap();

        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "day": "sunday",
                "start_time": "10:00",
                "end_time": "11:30",
                "location": "Main hall",
            })
        );

        let back: WeeklySlot = serde_json::from_value(json).unwrap();
        assert_eq!(back, slot);
    }

    #[test]
    fn slot_serde_rejects_inverted_times() {
        let result = serde_json::from_value::<WeeklySlot>(serde_json::json!({
            "day": "monday",
            "start_time": "20:00",
            "end_time": "19:00",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn derivation_serializes_with_record_field_names() {
        let derived = ScheduleDerivation {
            duration_weeks: 12,
            total_sessions: 24,
        };
        let json = serde_json::to_value(derived).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "duration_weeks": 12, "total_sessions": 24 })
        );
    }
}
