//! High score leaderboard collaborator
//!
//! Tracks the top 5 survival times as (name, seconds) pairs, serialized as
//! a simple delimited text format with exactly two fields per line:
//!
//! ```text
//! ada,94.2
//! lin,41.7
//! ```
//!
//! The simulation core never reads or writes files; a host loads/stores the
//! rendered text wherever it likes and hands the final elapsed time over.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of entries kept
pub const MAX_ENTRIES: usize = 5;

/// Field separator in the text format
const DELIMITER: char = ',';

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// Survival time in seconds (the score)
    pub seconds: f32,
}

/// Top-5 leaderboard, sorted descending by survival time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best survival time so far (if any)
    pub fn top_seconds(&self) -> Option<f32> {
        self.entries.first().map(|e| e.seconds)
    }

    /// Check if a time qualifies for the board
    pub fn qualifies(&self, seconds: f32) -> bool {
        if seconds <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries
            .last()
            .map(|e| seconds > e.seconds)
            .unwrap_or(true)
    }

    /// Insert a run (if it qualifies), keeping descending order and the
    /// size cap. Returns the rank achieved (1-indexed) or None.
    ///
    /// The delimiter is stripped from the name so the text format stays
    /// two fields per line.
    pub fn add_score(&mut self, name: &str, seconds: f32) -> Option<usize> {
        if !self.qualifies(seconds) {
            return None;
        }

        let name: String = name
            .trim()
            .chars()
            .map(|c| if c == DELIMITER { ' ' } else { c })
            .collect();
        let entry = ScoreEntry { name, seconds };

        let pos = self.entries.iter().position(|e| seconds > e.seconds);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }
}

impl fmt::Display for HighScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}{}{}", entry.name, DELIMITER, entry.seconds)?;
        }
        Ok(())
    }
}

impl FromStr for HighScores {
    type Err = ParseScoresError;

    /// Parse the delimited text format. Blank lines are skipped; a line
    /// with the wrong field count or a bad number is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scores = HighScores::new();
        for (index, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, rest) = line
                .split_once(DELIMITER)
                .ok_or(ParseScoresError::MissingField { line: index + 1 })?;
            if rest.contains(DELIMITER) {
                return Err(ParseScoresError::ExtraField { line: index + 1 });
            }
            let seconds: f32 = rest
                .trim()
                .parse()
                .map_err(|_| ParseScoresError::BadNumber { line: index + 1 })?;
            scores.entries.push(ScoreEntry {
                name: name.trim().to_string(),
                seconds,
            });
        }
        // Stored order is authoritative only when sorted; re-sort in case
        // the host edited the file by hand
        scores
            .entries
            .sort_by(|a, b| b.seconds.partial_cmp(&a.seconds).unwrap_or(std::cmp::Ordering::Equal));
        scores.entries.truncate(MAX_ENTRIES);
        Ok(scores)
    }
}

/// Malformed leaderboard text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseScoresError {
    /// A line without the delimiter (fewer than two fields)
    MissingField { line: usize },
    /// A line with more than two fields
    ExtraField { line: usize },
    /// Second field is not a number
    BadNumber { line: usize },
}

impl fmt::Display for ParseScoresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseScoresError::MissingField { line } => {
                write!(f, "line {line}: expected two delimited fields")
            }
            ParseScoresError::ExtraField { line } => {
                write!(f, "line {line}: too many fields")
            }
            ParseScoresError::BadNumber { line } => {
                write!(f, "line {line}: second field is not a number")
            }
        }
    }
}

impl std::error::Error for ParseScoresError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_score_keeps_descending_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("lin", 41.7), Some(1));
        assert_eq!(scores.add_score("ada", 94.2), Some(1));
        assert_eq!(scores.add_score("sam", 60.0), Some(2));

        let times: Vec<f32> = scores.entries().iter().map(|e| e.seconds).collect();
        assert_eq!(times, vec![94.2, 60.0, 41.7]);
    }

    #[test]
    fn test_board_caps_at_five() {
        let mut scores = HighScores::new();
        for i in 1..=7 {
            scores.add_score(&format!("p{i}"), i as f32 * 10.0);
        }
        assert_eq!(scores.entries().len(), MAX_ENTRIES);
        assert_eq!(scores.top_seconds(), Some(70.0));
        // The two weakest runs fell off
        assert!(scores.entries().iter().all(|e| e.seconds >= 30.0));
    }

    #[test]
    fn test_non_qualifying_score_rejected() {
        let mut scores = HighScores::new();
        for i in 1..=5 {
            scores.add_score(&format!("p{i}"), i as f32 * 10.0);
        }
        assert_eq!(scores.add_score("late", 5.0), None);
        assert_eq!(scores.add_score("zero", 0.0), None);
        assert_eq!(scores.entries().len(), MAX_ENTRIES);
    }

    #[test]
    fn test_text_round_trip() {
        let mut scores = HighScores::new();
        scores.add_score("ada", 94.25);
        scores.add_score("lin", 41.5);

        let text = scores.to_string();
        let parsed: HighScores = text.parse().unwrap();
        assert_eq!(parsed, scores);
    }

    #[test]
    fn test_parse_sorts_hand_edited_text() {
        let parsed: HighScores = "lin,10\n\nada,99.5\n".parse().unwrap();
        assert_eq!(parsed.entries()[0].name, "ada");
        assert_eq!(parsed.entries()[1].name, "lin");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert_eq!(
            "just-a-name".parse::<HighScores>(),
            Err(ParseScoresError::MissingField { line: 1 })
        );
        assert_eq!(
            "a,1\nb,not-a-number".parse::<HighScores>(),
            Err(ParseScoresError::BadNumber { line: 2 })
        );
        assert_eq!(
            "a,1,extra".parse::<HighScores>(),
            Err(ParseScoresError::ExtraField { line: 1 })
        );
    }

    #[test]
    fn test_delimiter_stripped_from_names() {
        let mut scores = HighScores::new();
        scores.add_score("a,b", 10.0);
        assert_eq!(scores.entries()[0].name, "a b");
        // Round-trip stays two fields per line
        let parsed: HighScores = scores.to_string().parse().unwrap();
        assert_eq!(parsed.entries()[0].name, "a b");
    }
}
