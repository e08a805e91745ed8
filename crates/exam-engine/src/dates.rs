//! Calendar placement of slots.
//!
//! Turns abstract slot numbers into concrete exam days. Slots are visited in
//! ascending order and walk forward from a start date, skipping holidays and
//! leaving a fixed number of rest days between consecutive exam days. All
//! functions take explicit inputs (no system clock access); the caller
//! provides the start date.
//!
//! # Date walk
//!
//! For each slot, starting with `current = start`:
//!
//! 1. advance `current` one day at a time while it is a holiday,
//! 2. assign `current` to the slot,
//! 3. advance `current` by `gap_days + 1`.
//!
//! Holidays inside a gap are not skipped mid-gap; step 1 of the next slot
//! handles them.
//!
//! # Functions
//!
//! - [`assign_dates`] — Slot groups + start + holidays → [`DatePlan`]
//! - [`optimization_percent`] — Slot saving over one slot per exam
//! - [`parse_date`] / [`format_date`] — Canonical `YYYY-MM-DD` conversion

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::dsatur::Slot;
use crate::error::{Result, ScheduleError};
use crate::graph::Exam;

/// Rest days between exam days when the caller does not say otherwise.
pub const DEFAULT_GAP_DAYS: u32 = 2;

/// Longest run of consecutive holidays skipped for a single slot before the
/// walk is declared unsatisfiable.
pub const MAX_HOLIDAY_RUN_DAYS: u64 = 3660;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── DatePlan ────────────────────────────────────────────────────────────────

/// One dated slot, for chronological listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    /// Exam day (`YYYY-MM-DD`).
    pub date: String,
    /// The slot sitting on that day.
    pub slot: Slot,
    /// Exams in the slot, lexically sorted.
    pub exams: Vec<Exam>,
}

/// The outcome of a complete date walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePlan {
    /// Exam day per slot.
    pub dates: BTreeMap<Slot, NaiveDate>,
    /// See [`optimization_percent`]. `None` when there were no exams.
    pub optimization_percent: Option<i64>,
}

impl DatePlan {
    pub fn date_of(&self, slot: Slot) -> Option<NaiveDate> {
        self.dates.get(&slot).copied()
    }

    /// Dates as canonical strings, keyed by slot.
    pub fn formatted(&self) -> BTreeMap<Slot, String> {
        self.dates
            .iter()
            .map(|(slot, date)| (*slot, format_date(*date)))
            .collect()
    }

    /// Dated slots in ascending date order, with their exams from `groups`.
    ///
    /// Slots missing from `groups` are listed with no exams.
    pub fn rows(&self, groups: &BTreeMap<Slot, BTreeSet<Exam>>) -> Vec<ScheduleRow> {
        let mut dated: Vec<(NaiveDate, Slot)> =
            self.dates.iter().map(|(slot, date)| (*date, *slot)).collect();
        dated.sort();
        dated
            .into_iter()
            .map(|(date, slot)| ScheduleRow {
                date: format_date(date),
                slot,
                exams: groups
                    .get(&slot)
                    .map(|exams| exams.iter().cloned().collect())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

// ── assign_dates ────────────────────────────────────────────────────────────

/// Assign a calendar day to every slot in `groups`.
///
/// # Arguments
///
/// * `groups` — Slot → exams sitting in it
/// * `start` — First candidate day, `YYYY-MM-DD`
/// * `holidays` — Days that may not host exams, compared as exact strings
/// * `gap_days` — Minimum full rest days between consecutive exam days
///
/// # Returns
///
/// A [`DatePlan`] where increasing slots map to strictly increasing days at
/// least `gap_days + 1` apart, none of them a holiday.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidStartDate`] before any walking if `start`
/// is not a valid date, and [`ScheduleError::UnsatisfiableDateWalk`] if a
/// slot meets more than [`MAX_HOLIDAY_RUN_DAYS`] consecutive holidays or the
/// walk runs off the calendar. No partial plan is returned.
///
/// # Examples
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use exam_engine::dates::assign_dates;
///
/// let groups = BTreeMap::from([
///     (1, BTreeSet::from(["Math".to_string()])),
///     (2, BTreeSet::from(["Chem".to_string()])),
/// ]);
/// let holidays = BTreeSet::from(["2024-01-02".to_string()]);
/// let plan = assign_dates(&groups, "2024-01-01", &holidays, 1).unwrap();
/// assert_eq!(plan.formatted()[&2], "2024-01-03");
/// ```
pub fn assign_dates(
    groups: &BTreeMap<Slot, BTreeSet<Exam>>,
    start: &str,
    holidays: &BTreeSet<String>,
    gap_days: u32,
) -> Result<DatePlan> {
    let mut current = parse_date(start)?;
    let step = Days::new(u64::from(gap_days) + 1);
    let mut dates = BTreeMap::new();

    for (index, &slot) in groups.keys().enumerate() {
        if index > 0 {
            current = current.checked_add_days(step).ok_or_else(|| {
                ScheduleError::UnsatisfiableDateWalk(format!(
                    "slot {slot}: date range exhausted after {}",
                    format_date(current)
                ))
            })?;
        }
        current = skip_holidays(current, holidays, slot)?;
        dates.insert(slot, current);
    }

    let exam_count = groups.values().map(BTreeSet::len).sum();
    Ok(DatePlan {
        dates,
        optimization_percent: optimization_percent(groups.len(), exam_count),
    })
}

/// Percentage fewer slots than one slot per exam, rounded.
///
/// Returns `None` when `exam_count` is zero.
///
/// # Examples
///
/// ```
/// use exam_engine::dates::optimization_percent;
///
/// assert_eq!(optimization_percent(2, 4), Some(50));
/// assert_eq!(optimization_percent(0, 0), None);
/// ```
pub fn optimization_percent(slots_used: usize, exam_count: usize) -> Option<i64> {
    if exam_count == 0 {
        return None;
    }
    let ratio = slots_used as f64 / exam_count as f64;
    Some(((1.0 - ratio) * 100.0).round() as i64)
}

/// Parse a strict `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidStartDate`] for empty or malformed input.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::InvalidStartDate(
            "no start date given".to_string(),
        ));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| ScheduleError::InvalidStartDate(format!("'{}': {}", trimmed, e)))
}

/// Format a date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// First non-holiday on or after `from`.
fn skip_holidays(from: NaiveDate, holidays: &BTreeSet<String>, slot: Slot) -> Result<NaiveDate> {
    let mut current = from;
    let mut skipped = 0;
    while holidays.contains(&format_date(current)) {
        if skipped >= MAX_HOLIDAY_RUN_DAYS {
            return Err(ScheduleError::UnsatisfiableDateWalk(format!(
                "slot {slot}: no free day within {MAX_HOLIDAY_RUN_DAYS} days of {}",
                format_date(from)
            )));
        }
        current = current.succ_opt().ok_or_else(|| {
            ScheduleError::UnsatisfiableDateWalk(format!(
                "slot {slot}: date range exhausted after {}",
                format_date(current)
            ))
        })?;
        skipped += 1;
    }
    Ok(current)
}

// ── Tests ───────────────────────────────────────────────────────────────────
