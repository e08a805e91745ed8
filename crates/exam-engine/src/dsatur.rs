//! DSATUR slot assignment.
//!
//! Colors the conflict graph with the saturation-degree greedy heuristic
//! (Brélaz, 1979). Each color is a slot; adjacent exams never share one.
//! The result is not guaranteed to use the chromatic number of slots.
//!
//! # Selection order
//!
//! Among uncolored exams, the next one to color is chosen by:
//!
//! 1. highest saturation (distinct slots among colored neighbors),
//! 2. then highest static degree,
//! 3. then lexically smallest identifier.
//!
//! The chosen exam takes the smallest slot not used by a colored neighbor.
//! With no randomness and a total order over candidates, the whole run is
//! reproducible for a given graph.
//!
//! # Functions
//!
//! - [`color_steps`] — Full assignment trace, one [`AssignmentStep`] per exam
//! - [`color`] — Final [`Coloring`] only

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::graph::{ConflictGraph, Exam};

/// A slot number. Slots start at 1 and are used densely.
pub type Slot = u32;

// ── Coloring ────────────────────────────────────────────────────────────────

/// Exam → slot mapping. Exams absent from the map are unassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Coloring(BTreeMap<Exam, Slot>);

impl Coloring {
    pub fn slot_of(&self, exam: &str) -> Option<Slot> {
        self.0.get(exam).copied()
    }

    /// Highest slot in use, or 0 when nothing is assigned.
    pub fn slot_count(&self) -> Slot {
        self.0.values().copied().max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Assignments in lexical exam order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Slot)> + '_ {
        self.0.iter().map(|(exam, slot)| (exam.as_str(), *slot))
    }

    /// Group exams by slot. Both levels are sorted.
    pub fn groups(&self) -> BTreeMap<Slot, BTreeSet<Exam>> {
        let mut groups: BTreeMap<Slot, BTreeSet<Exam>> = BTreeMap::new();
        for (exam, slot) in &self.0 {
            groups.entry(*slot).or_default().insert(exam.clone());
        }
        groups
    }

    /// Whether no edge of `graph` joins two exams holding the same slot.
    pub fn is_proper(&self, graph: &ConflictGraph) -> bool {
        graph.edges().all(|pair| {
            match (self.slot_of(pair.first()), self.slot_of(pair.second())) {
                (Some(a), Some(b)) => a != b,
                _ => true,
            }
        })
    }

    pub fn into_inner(self) -> BTreeMap<Exam, Slot> {
        self.0
    }
}

// ── AssignmentStep ──────────────────────────────────────────────────────────

/// One coloring decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentStep {
    /// The exam colored at this step.
    pub exam: Exam,
    /// The slot it received.
    pub slot: Slot,
    /// Every assignment made so far, this one included.
    pub coloring: Coloring,
}

// ── color_steps / color ─────────────────────────────────────────────────────

/// Run DSATUR over `graph` and return every assignment in order.
///
/// The trace has exactly one step per exam. An empty graph yields an empty
/// trace. Each call is an independent run.
///
/// # Examples
///
/// ```
/// use exam_engine::dsatur::color_steps;
/// use exam_engine::graph::ConflictGraph;
///
/// let graph = ConflictGraph::build(&["A", "B", "C"], &[("A", "B")]);
/// let steps = color_steps(&graph);
/// assert_eq!(steps.len(), 3);
/// assert_eq!((steps[0].exam.as_str(), steps[0].slot), ("A", 1));
/// assert_eq!((steps[1].exam.as_str(), steps[1].slot), ("B", 2));
/// ```
pub fn color_steps(graph: &ConflictGraph) -> Vec<AssignmentStep> {
    let degree: BTreeMap<&str, usize> = graph
        .exams()
        .map(|exam| (exam, graph.degree(exam).unwrap_or(0)))
        .collect();
    let mut saturation: BTreeMap<&str, BTreeSet<Slot>> =
        graph.exams().map(|exam| (exam, BTreeSet::new())).collect();
    let mut coloring = Coloring::default();
    let mut steps = Vec::with_capacity(graph.exam_count());

    while let Some(chosen) = saturation
        .iter()
        .max_by_key(|(exam, used)| (used.len(), degree[*exam], Reverse(**exam)))
        .map(|(exam, _)| *exam)
    {
        let neighbors = graph.neighbors(chosen);
        let taken: BTreeSet<Slot> = neighbors
            .into_iter()
            .flatten()
            .filter_map(|n| coloring.slot_of(n))
            .collect();
        let slot = smallest_free_slot(&taken);

        coloring.0.insert(chosen.to_string(), slot);
        steps.push(AssignmentStep {
            exam: chosen.to_string(),
            slot,
            coloring: coloring.clone(),
        });

        saturation.remove(chosen);
        for neighbor in neighbors.into_iter().flatten() {
            if let Some(used) = saturation.get_mut(neighbor.as_str()) {
                used.insert(slot);
            }
        }
    }

    steps
}

/// Run DSATUR over `graph` and return only the final assignment.
pub fn color(graph: &ConflictGraph) -> Coloring {
    color_steps(graph)
        .pop()
        .map(|step| step.coloring)
        .unwrap_or_default()
}

/// First positive slot not in `taken`.
fn smallest_free_slot(taken: &BTreeSet<Slot>) -> Slot {
    let mut slot = 1;
    while taken.contains(&slot) {
        slot += 1;
    }
    slot
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn order(steps: &[AssignmentStep]) -> Vec<(&str, Slot)> {
        steps.iter().map(|s| (s.exam.as_str(), s.slot)).collect()
    }

    // ── Scenario tests ──────────────────────────────────────────────────

    #[test]
    fn test_four_exam_scenario() {
        let graph = ConflictGraph::build(
            &["Math", "Physics", "Chem", "Bio"],
            &[("Math", "Physics"), ("Physics", "Chem")],
        );
        let steps = color_steps(&graph);
        // Physics has the highest degree; Chem and Math then tie on
        // saturation and degree, so Chem goes first lexically. Bio is last.
        assert_eq!(
            order(&steps),
            vec![("Physics", 1), ("Chem", 2), ("Math", 2), ("Bio", 1)]
        );

        let coloring = color(&graph);
        assert_eq!(coloring.slot_count(), 2);
        assert_eq!(coloring.slot_of("Bio"), Some(1));
        assert!(coloring.is_proper(&graph));
    }

    #[test]
    fn test_lexical_tie_break() {
        let graph = ConflictGraph::build(&["C", "A", "B"], &[] as &[(&str, &str)]);
        let steps = color_steps(&graph);
        assert_eq!(order(&steps), vec![("A", 1), ("B", 1), ("C", 1)]);
    }

    #[test]
    fn test_degree_breaks_saturation_tie() {
        // Z has degree 2, the rest degree 1.
        let graph = ConflictGraph::build(&["A", "B", "Z"], &[("A", "Z"), ("B", "Z")]);
        assert_eq!(color_steps(&graph)[0].exam, "Z");
    }

    #[test]
    fn test_saturation_outranks_degree() {
        // H goes first. Its leaves then have saturation 1 and beat K, which
        // has a higher degree but no colored neighbor yet.
        let exams = ["H", "K", "L", "M", "P1", "P2", "P3"];
        let pairs = [
            ("H", "P1"),
            ("H", "P2"),
            ("H", "P3"),
            ("K", "L"),
            ("K", "M"),
        ];
        let graph = ConflictGraph::build(&exams, &pairs);
        let steps = color_steps(&graph);
        assert_eq!(order(&steps)[..2], [("H", 1), ("P1", 2)]);
    }

    #[test]
    fn test_triangle_needs_three_slots() {
        let graph = ConflictGraph::build(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
        let coloring = color(&graph);
        assert_eq!(coloring.slot_count(), 3);
        assert!(coloring.is_proper(&graph));
    }

    #[test]
    fn test_even_cycle_uses_two_slots() {
        let graph = ConflictGraph::build(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        assert_eq!(color(&graph).slot_count(), 2);
    }

    // ── Saturation tests ────────────────────────────────────────────────

    #[test]
    fn test_repeated_neighbor_slot_counts_once() {
        // P ends up with two neighbors (A and B) both in slot 2. Its
        // saturation stays 1, so M (also saturation 1, same degree) wins the
        // lexical tie-break at step five.
        let exams = [
            "H", "A", "B", "P", "D", "M", "h1", "h2", "h3", "h4", "d1", "d2", "d3", "m1",
        ];
        let pairs = [
            ("H", "A"),
            ("H", "B"),
            ("H", "h1"),
            ("H", "h2"),
            ("H", "h3"),
            ("H", "h4"),
            ("A", "P"),
            ("B", "P"),
            ("B", "D"),
            ("D", "d1"),
            ("D", "d2"),
            ("D", "d3"),
            ("D", "M"),
            ("M", "m1"),
        ];
        let graph = ConflictGraph::build(&exams, &pairs);
        let steps = color_steps(&graph);
        assert_eq!(
            order(&steps)[..6],
            [("H", 1), ("B", 2), ("D", 1), ("A", 2), ("M", 2), ("P", 1)]
        );
        assert!(color(&graph).is_proper(&graph));
    }

    // ── Trace tests ─────────────────────────────────────────────────────

    #[test]
    fn test_trace_snapshots_grow_by_one() {
        let graph = ConflictGraph::build(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]);
        let steps = color_steps(&graph);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.coloring.len(), i + 1);
            assert_eq!(step.coloring.slot_of(&step.exam), Some(step.slot));
        }
        assert_eq!(steps.last().unwrap().coloring, color(&graph));
    }

    #[test]
    fn test_trace_is_deterministic() {
        let exams = ["E1", "E2", "E3", "E4", "E5"];
        let forward = [("E1", "E2"), ("E2", "E3"), ("E3", "E4"), ("E4", "E5"), ("E5", "E1")];
        let mut reversed = forward;
        reversed.reverse();
        let a = color_steps(&ConflictGraph::build(&exams, &forward));
        let b = color_steps(&ConflictGraph::build(&exams, &reversed));
        assert_eq!(a, b);
    }

    // ── Edge cases ──────────────────────────────────────────────────────

    #[test]
    fn test_empty_graph() {
        let graph = ConflictGraph::default();
        assert!(color_steps(&graph).is_empty());
        let coloring = color(&graph);
        assert!(coloring.is_empty());
        assert_eq!(coloring.slot_count(), 0);
    }

    #[test]
    fn test_isolated_exams_get_slot_one() {
        let graph = ConflictGraph::build(&["Solo", "A", "B"], &[("A", "B")]);
        assert_eq!(color(&graph).slot_of("Solo"), Some(1));
    }

    #[test]
    fn test_groups_are_sorted() {
        let graph = ConflictGraph::build(
            &["Math", "Physics", "Chem", "Bio"],
            &[("Math", "Physics"), ("Physics", "Chem")],
        );
        let groups = color(&graph).groups();
        let slot1: Vec<_> = groups[&1].iter().map(String::as_str).collect();
        let slot2: Vec<_> = groups[&2].iter().map(String::as_str).collect();
        assert_eq!(slot1, vec!["Bio", "Physics"]);
        assert_eq!(slot2, vec!["Chem", "Math"]);
    }

    #[test]
    fn test_is_proper_detects_clash() {
        let graph = ConflictGraph::build(&["A", "B"], &[("A", "B")]);
        let mut clash = Coloring::default();
        clash.0.insert("A".into(), 1);
        clash.0.insert("B".into(), 1);
        assert!(!clash.is_proper(&graph));
    }

    #[test]
    fn test_smallest_free_slot_fills_gaps() {
        let taken: BTreeSet<Slot> = [1, 2, 4].into_iter().collect();
        assert_eq!(smallest_free_slot(&taken), 3);
        assert_eq!(smallest_free_slot(&BTreeSet::new()), 1);
    }
}
