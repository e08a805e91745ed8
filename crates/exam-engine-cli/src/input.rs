//! Building a [`ScheduleRequest`] from a JSON document and/or inline flags.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use exam_engine::{Exam, ScheduleRequest};

/// Read a JSON request from `path`, or from stdin when `path` is `-`.
pub fn read_request(path: &Path) -> Result<ScheduleRequest> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read request file '{}'", path.display()))?
    };
    ScheduleRequest::from_json(&text)
        .with_context(|| format!("failed to parse request '{}'", path.display()))
}

/// Split a comma-separated exam list, trimming names and dropping empties.
pub fn parse_exam_list(s: &str) -> Vec<Exam> {
    s.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse one `A-B` conflict line.
///
/// Returns `None` for anything that does not split into exactly two
/// non-empty names.
pub fn parse_conflict_line(line: &str) -> Option<(Exam, Exam)> {
    let parts: Vec<&str> = line.trim().split('-').map(str::trim).collect();
    match parts.as_slice() {
        [a, b] if !a.is_empty() && !b.is_empty() => Some((a.to_string(), b.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exam_list() {
        assert_eq!(
            parse_exam_list(" Math, Physics ,,Chem,"),
            vec!["Math", "Physics", "Chem"]
        );
        assert!(parse_exam_list("  ").is_empty());
    }

    #[test]
    fn test_parse_conflict_line() {
        assert_eq!(
            parse_conflict_line(" Math - Physics "),
            Some(("Math".to_string(), "Physics".to_string()))
        );
        assert_eq!(parse_conflict_line("Math"), None);
        assert_eq!(parse_conflict_line("Math-"), None);
        assert_eq!(parse_conflict_line("A-B-C"), None);
    }

    #[test]
    fn test_read_request_missing_file() {
        let err = read_request(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read request file"));
    }
}
