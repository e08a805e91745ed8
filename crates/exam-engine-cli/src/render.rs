//! Plain-text rendering of a [`ScheduleReport`].

use exam_engine::{slot_label, AssignmentStep, ScheduleReport};

/// Render the report as human-readable text.
pub fn report_text(report: &ScheduleReport) -> String {
    let mut lines = vec![format!("Total Time Slots (Colors): {}", report.total_slots)];
    lines.push(format!("Baseline (Naive) Slots: {}", report.naive_slots));
    if let Some(pct) = report.improvement_percent {
        lines.push(format!("Improvement: {pct}% fewer slots"));
    }

    lines.push(String::new());
    lines.push("Coloring (Grouped by Slot)".to_string());
    for (slot, exams) in &report.slot_groups {
        let names: Vec<&str> = exams.iter().map(String::as_str).collect();
        lines.push(format!("{}: {}", slot_label(*slot), names.join(", ")));
    }

    lines.push(String::new());
    lines.push("Schedule (Exam -> Slot)".to_string());
    for (exam, slot) in report.scheduled_exams.iter() {
        lines.push(format!("{exam} -> {}", slot_label(slot)));
    }

    if !report.calendar.is_empty() {
        lines.push(String::new());
        lines.push("Calendar".to_string());
        for row in &report.calendar {
            lines.push(format!(
                "{}  {}  {}",
                row.date,
                slot_label(row.slot),
                row.exams.join(", ")
            ));
        }
    }

    if let Some(steps) = &report.steps {
        lines.push(String::new());
        lines.push("Assignment Steps".to_string());
        lines.extend(steps_text(steps));
    }

    lines.join("\n")
}

fn steps_text(steps: &[AssignmentStep]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{:>3}. {} -> {}", i + 1, step.exam, slot_label(step.slot)))
        .collect()
}
