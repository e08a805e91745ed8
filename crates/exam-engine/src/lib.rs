//! # exam-engine
//!
//! Deterministic exam timetabling.
//!
//! Given a set of exams and the pairs that share students, the engine places
//! every exam in a numbered slot so that no conflicting pair shares one, then
//! maps slots onto calendar days around holidays with a fixed rest gap. All
//! functions are pure: explicit inputs, no clock, no I/O, no hidden state.
//!
//! ## Modules
//!
//! - [`graph`] — Exams + conflict pairs → symmetric conflict graph
//! - [`dsatur`] — Saturation-degree coloring with a full assignment trace
//! - [`dates`] — Slot → calendar day walk with holidays and rest gaps
//! - [`schedule`] — End-to-end request → report
//! - [`error`] — Error types

pub mod dates;
pub mod dsatur;
pub mod error;
pub mod graph;
pub mod schedule;

pub use dates::{
    assign_dates, format_date, optimization_percent, parse_date, DatePlan, ScheduleRow,
    DEFAULT_GAP_DAYS, MAX_HOLIDAY_RUN_DAYS,
};
pub use dsatur::{color, color_steps, AssignmentStep, Coloring, Slot};
pub use error::ScheduleError;
pub use graph::{ConflictGraph, ConflictPair, Exam};
pub use schedule::{plan, slot_label, ScheduleOptions, ScheduleReport, ScheduleRequest};
