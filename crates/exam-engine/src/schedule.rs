//! End-to-end scheduling: exams and conflicts in, slots and dates out.
//!
//! [`plan`] chains the three stages (graph construction, DSATUR coloring,
//! date walk) and packages the result in a serializable [`ScheduleReport`].
//! Every call recomputes from the full request; nothing is cached between
//! calls.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dates::{assign_dates, optimization_percent, ScheduleRow, DEFAULT_GAP_DAYS};
use crate::dsatur::{color_steps, AssignmentStep, Coloring, Slot};
use crate::error::{Result, ScheduleError};
use crate::graph::{ConflictGraph, Exam};

// ── Options ─────────────────────────────────────────────────────────────────

/// Tunables for [`plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    /// Minimum full rest days between consecutive exam days.
    pub gap_days: u32,
    /// Fail on malformed conflict pairs instead of dropping them.
    #[serde(alias = "strict")]
    pub strict_pairs: bool,
    /// Include the full assignment trace in the report.
    pub include_steps: bool,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            gap_days: DEFAULT_GAP_DAYS,
            strict_pairs: false,
            include_steps: false,
        }
    }
}

// ── Request / report ────────────────────────────────────────────────────────

/// Everything needed for one scheduling run.
///
/// Deserializes from JSON such as:
///
/// ```json
/// {
///   "exams": ["Math", "Physics"],
///   "conflicts": [["Math", "Physics"]],
///   "start": "2024-01-01",
///   "holidays": ["2024-01-02"],
///   "gap_days": 1
/// }
/// ```
///
/// Only `exams` is required in practice; everything else has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub conflicts: Vec<(Exam, Exam)>,
    /// First candidate exam day. Without it no dates are assigned.
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub holidays: BTreeSet<String>,
    #[serde(flatten)]
    pub options: ScheduleOptions,
}

impl ScheduleRequest {
    /// Parse a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidRequest`] if the text is not a valid
    /// request document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScheduleError::InvalidRequest(e.to_string()))
    }
}

/// The outcome of [`plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    /// Distinct exams scheduled.
    pub total_exams: usize,
    /// Slots used by the coloring.
    pub total_slots: Slot,
    /// Slots needed with one exam per slot.
    pub naive_slots: usize,
    /// Percentage fewer slots than `naive_slots`. Absent with no exams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement_percent: Option<i64>,
    /// Exam → slot.
    pub scheduled_exams: Coloring,
    /// Slot → exams.
    pub slot_groups: BTreeMap<Slot, BTreeSet<Exam>>,
    /// Slot → `YYYY-MM-DD`. Absent when the request had no start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<BTreeMap<Slot, String>>,
    /// Dated slots in ascending date order.
    pub calendar: Vec<ScheduleRow>,
    /// The assignment trace, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<AssignmentStep>>,
}

// ── plan ────────────────────────────────────────────────────────────────────

/// Schedule every exam in `request`.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidPair`] or [`ScheduleError::InvalidExam`]
/// for malformed input when `strict_pairs` is set,
/// [`ScheduleError::InvalidStartDate`] for a bad start date, and
/// [`ScheduleError::UnsatisfiableDateWalk`] when no dates can be placed.
///
/// # Examples
///
/// ```
/// use exam_engine::schedule::{plan, ScheduleRequest};
///
/// let request = ScheduleRequest {
///     exams: vec!["Math".into(), "Physics".into(), "Chem".into(), "Bio".into()],
///     conflicts: vec![
///         ("Math".into(), "Physics".into()),
///         ("Physics".into(), "Chem".into()),
///     ],
///     ..Default::default()
/// };
/// let report = plan(&request).unwrap();
/// assert_eq!(report.total_slots, 2);
/// assert_eq!(report.improvement_percent, Some(50));
/// ```
pub fn plan(request: &ScheduleRequest) -> Result<ScheduleReport> {
    let options = &request.options;
    let graph = if options.strict_pairs {
        ConflictGraph::try_build(&request.exams, &request.conflicts)?
    } else {
        ConflictGraph::build(&request.exams, &request.conflicts)
    };

    let steps = color_steps(&graph);
    let coloring = steps
        .last()
        .map(|step| step.coloring.clone())
        .unwrap_or_default();
    let slot_groups = coloring.groups();

    let (dates, calendar) = match request.start.as_deref() {
        Some(start) => {
            let dated = assign_dates(&slot_groups, start, &request.holidays, options.gap_days)?;
            (Some(dated.formatted()), dated.rows(&slot_groups))
        }
        None => (None, Vec::new()),
    };

    let total_exams = graph.exam_count();

    Ok(ScheduleReport {
        total_exams,
        total_slots: coloring.slot_count(),
        naive_slots: total_exams,
        improvement_percent: optimization_percent(slot_groups.len(), total_exams),
        scheduled_exams: coloring,
        slot_groups,
        dates,
        calendar,
        steps: options.include_steps.then_some(steps),
    })
}

/// Display label for a slot, e.g. `Slot-3`.
pub fn slot_label(slot: Slot) -> String {
    format!("Slot-{slot}")
}

// ── Tests ───────────────────────────────────────────────────────────────────
