//! Conflict graph construction.
//!
//! Exams are vertices; an undirected edge joins two exams that share at
//! least one student and therefore may not sit in the same slot. The graph
//! is kept simple (no self-loops) and symmetric at all times.
//!
//! Adjacency is stored in ordered maps, so every traversal visits exams in
//! lexical order. The colorer relies on that for its final tie-break.
//!
//! # Malformed input
//!
//! - [`ConflictGraph::build`] is lenient: a pair naming an unknown exam, a
//!   self-pair, or an empty exam name is dropped whole.
//! - [`ConflictGraph::try_build`] is strict: the first malformed entry fails
//!   the build and nothing is returned.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{Result, ScheduleError};

/// An exam identifier. Case-sensitive and never empty inside a graph.
pub type Exam = String;

// ── ConflictPair ────────────────────────────────────────────────────────────

/// Two distinct exams that must not share a slot.
///
/// Stored canonically with the lexically smaller exam first, so `(A, B)` and
/// `(B, A)` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConflictPair {
    first: Exam,
    second: Exam,
}

impl ConflictPair {
    /// Create a canonical pair.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidPair`] if both sides name the same exam
    /// or either side is empty.
    pub fn new(a: impl Into<Exam>, b: impl Into<Exam>) -> Result<Self> {
        let (a, b) = (a.into(), b.into());
        if a.is_empty() || b.is_empty() {
            return Err(ScheduleError::InvalidPair(format!(
                "('{a}', '{b}'): exam name must not be empty"
            )));
        }
        if a == b {
            return Err(ScheduleError::InvalidPair(format!(
                "('{a}', '{b}'): an exam cannot conflict with itself"
            )));
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

// ── ConflictGraph ───────────────────────────────────────────────────────────

/// Undirected exam conflict graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConflictGraph {
    adjacency: BTreeMap<Exam, BTreeSet<Exam>>,
}

impl ConflictGraph {
    /// Build a graph, silently dropping malformed pairs and empty exam names.
    ///
    /// Duplicate exams collapse into one vertex and repeated pairs are
    /// idempotent. Neither input is mutated.
    ///
    /// # Examples
    ///
    /// ```
    /// use exam_engine::graph::ConflictGraph;
    ///
    /// let exams = ["Math", "Physics", "Chem"];
    /// let pairs = [("Math", "Physics"), ("Physics", "Ghost")];
    /// let graph = ConflictGraph::build(&exams, &pairs);
    /// assert_eq!(graph.degree("Physics"), Some(1));
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn build<E, A, B>(exams: &[E], pairs: &[(A, B)]) -> Self
    where
        E: AsRef<str>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut graph = Self::with_exams(
            exams
                .iter()
                .map(|e| e.as_ref())
                .filter(|e| !e.is_empty()),
        );
        for (a, b) in pairs {
            if let Ok(pair) = graph.check_pair(a.as_ref(), b.as_ref()) {
                graph.insert_edge(pair);
            }
        }
        graph
    }

    /// Build a graph, failing on the first malformed exam or pair.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidExam`] for an empty exam name, or
    /// [`ScheduleError::InvalidPair`] for a self-pair or a pair citing an
    /// exam outside `exams`.
    pub fn try_build<E, A, B>(exams: &[E], pairs: &[(A, B)]) -> Result<Self>
    where
        E: AsRef<str>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        if let Some(pos) = exams.iter().position(|e| e.as_ref().is_empty()) {
            return Err(ScheduleError::InvalidExam(format!(
                "exam at position {pos} has an empty name"
            )));
        }

        let mut graph = Self::with_exams(exams.iter().map(|e| e.as_ref()));
        let checked = pairs
            .iter()
            .map(|(a, b)| graph.check_pair(a.as_ref(), b.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        for pair in checked {
            graph.insert_edge(pair);
        }
        Ok(graph)
    }

    /// All exams in lexical order.
    pub fn exams(&self) -> impl Iterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }

    /// The exams conflicting with `exam`, or `None` if it is not in the graph.
    pub fn neighbors(&self, exam: &str) -> Option<&BTreeSet<Exam>> {
        self.adjacency.get(exam)
    }

    /// Number of conflicts of `exam`, or `None` if it is not in the graph.
    pub fn degree(&self, exam: &str) -> Option<usize> {
        self.adjacency.get(exam).map(BTreeSet::len)
    }

    pub fn contains(&self, exam: &str) -> bool {
        self.adjacency.contains_key(exam)
    }

    pub fn exam_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Every edge once, as canonical pairs in lexical order.
    pub fn edges(&self) -> impl Iterator<Item = ConflictPair> + '_ {
        self.adjacency.iter().flat_map(|(exam, others)| {
            others
                .range::<str, _>((
                    std::ops::Bound::Excluded(exam.as_str()),
                    std::ops::Bound::Unbounded,
                ))
                .map(move |other| ConflictPair {
                    first: exam.clone(),
                    second: other.clone(),
                })
        })
    }

    fn with_exams<'a>(exams: impl Iterator<Item = &'a str>) -> Self {
        let adjacency = exams.map(|e| (e.to_string(), BTreeSet::new())).collect();
        Self { adjacency }
    }

    /// Validate a pair against this graph's exam set.
    fn check_pair(&self, a: &str, b: &str) -> Result<ConflictPair> {
        let pair = ConflictPair::new(a, b)?;
        for exam in [pair.first(), pair.second()] {
            if !self.contains(exam) {
                return Err(ScheduleError::InvalidPair(format!(
                    "('{a}', '{b}'): unknown exam '{exam}'"
                )));
            }
        }
        Ok(pair)
    }

    fn insert_edge(&mut self, pair: ConflictPair) {
        if let Some(set) = self.adjacency.get_mut(&pair.first) {
            set.insert(pair.second.clone());
        }
        if let Some(set) = self.adjacency.get_mut(&pair.second) {
            set.insert(pair.first);
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
