//! High score leaderboard system
//!
//! Persisted to a flat text file, tracks top 10 scores. The file holds one
//! initials line followed by one score line per entry, best first.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::NUM_HIGH_SCORES;
use crate::error::StoreError;

/// Initials shown for an empty slot and pre-filled for a new entry
pub const DEFAULT_INITIALS: &str = "AAA";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player's score
    pub score: u32,
    /// Player's initials (three letters)
    pub initials: String,
}

impl Default for ScoreEntry {
    fn default() -> Self {
        Self {
            score: 0,
            initials: DEFAULT_INITIALS.to_string(),
        }
    }
}

/// High score leaderboard, always exactly `NUM_HIGH_SCORES` entries ordered
/// best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: [ScoreEntry; NUM_HIGH_SCORES],
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreTable {
    /// Table of zero scores with default initials
    pub fn new() -> Self {
        Self {
            entries: std::array::from_fn(|_| ScoreEntry::default()),
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn get(&self, slot: usize) -> Option<&ScoreEntry> {
        self.entries.get(slot)
    }

    /// Get the top score
    pub fn top_score(&self) -> u32 {
        self.entries[0].score
    }

    /// Slot a score would take, or `None` if it does not qualify.
    ///
    /// The score must strictly beat an entry; ties keep the earlier entry.
    pub fn rank(&self, score: u32) -> Option<usize> {
        self.entries.iter().position(|e| score > e.score)
    }

    /// Push entries at and below `slot` down one place, dropping the last,
    /// and write `score` at `slot` with placeholder initials.
    pub fn insert(&mut self, slot: usize, score: u32) {
        if slot >= NUM_HIGH_SCORES {
            return;
        }
        self.entries[slot..].rotate_right(1);
        self.entries[slot] = ScoreEntry {
            score,
            initials: DEFAULT_INITIALS.to_string(),
        };
    }

    /// Rank and insert in one step. Returns the slot taken.
    pub fn submit(&mut self, score: u32) -> Option<usize> {
        let slot = self.rank(score)?;
        self.insert(slot, score);
        Some(slot)
    }

    /// Write final initials for `slot` and persist the whole table
    pub fn commit_initials(
        &mut self,
        slot: usize,
        initials: &str,
        path: &Path,
    ) -> Result<(), StoreError> {
        if let Some(entry) = self.entries.get_mut(slot) {
            entry.initials = initials.to_string();
        }
        self.save(path)
    }

    /// Parse the flat-file format.
    ///
    /// Missing lines leave the corresponding defaults; a score line that is
    /// not a number reads as 0.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        let mut lines = text.lines();
        for entry in table.entries.iter_mut() {
            let Some(initials) = lines.next() else {
                break;
            };
            entry.initials = initials.to_string();
            entry.score = lines.next().map(parse_score).unwrap_or(0);
        }
        table
    }

    /// Render the flat-file format
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{}", entry.initials);
            let _ = writeln!(out, "{}", entry.score);
        }
        out
    }

    /// Load high scores from `path`. A missing or unreadable file yields the
    /// default table.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(table)) => {
                log::info!("Loaded high scores from {}", path.display());
                table
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("{e}; using default high scores");
                Self::new()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Option<Self>, StoreError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(Self::parse(&text))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Save high scores to `path`, replacing the file
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        fs::write(path, self.to_text()).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("High scores saved to {}", path.display());
        Ok(())
    }
}

/// Leading optional sign and digits, like C's `atoi`; anything else is 0
fn parse_score(line: &str) -> u32 {
    let line = line.trim_start();
    let digits: String = line
        .strip_prefix('+')
        .unwrap_or(line)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "brick_breaker_{}_{}_{}.txt",
            name,
            std::process::id(),
            line!()
        ))
    }

    fn table_with(scores: &[u32]) -> HighScoreTable {
        let mut table = HighScoreTable::new();
        for &s in scores {
            table.submit(s);
        }
        table
    }

    #[test]
    fn test_default_table() {
        let table = HighScoreTable::new();
        assert_eq!(table.entries().len(), NUM_HIGH_SCORES);
        assert!(table.entries().iter().all(|e| e.score == 0 && e.initials == "AAA"));
    }

    #[test]
    fn test_rank_on_empty_table() {
        let table = HighScoreTable::new();
        assert_eq!(table.rank(0), None);
        assert_eq!(table.rank(1), Some(0));
    }

    #[test]
    fn test_rank_ties_do_not_displace() {
        let table = table_with(&[500, 300, 100]);
        assert_eq!(table.rank(300), Some(2));
        assert_eq!(table.rank(301), Some(1));
        assert_eq!(table.rank(900), Some(0));
    }

    #[test]
    fn test_rank_full_table() {
        let table = table_with(&[100, 200, 300, 400, 500, 600, 700, 800, 900, 1000]);
        assert_eq!(table.rank(100), None);
        assert_eq!(table.rank(101), Some(9));
    }

    #[test]
    fn test_insert_shifts_down_and_drops_last() {
        let mut table = table_with(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        table.insert(2, 85);
        let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![100, 90, 85, 80, 70, 60, 50, 40, 30, 20]);
        assert_eq!(table.get(2).unwrap().initials, DEFAULT_INITIALS);
    }

    #[test]
    fn test_insert_keeps_initials_with_their_scores() {
        let mut table = HighScoreTable::new();
        table.insert(0, 300);
        table.entries[0].initials = "BOB".to_string();
        table.insert(0, 500);
        assert_eq!(table.get(1).unwrap().initials, "BOB");
        assert_eq!(table.get(1).unwrap().score, 300);
    }

    #[test]
    fn test_parse_malformed_score_is_zero() {
        let table = HighScoreTable::parse("ABC\n120\nXYZ\nlots\nQQQ\n42abc\n");
        assert_eq!(table.get(0).unwrap().score, 120);
        assert_eq!(table.get(1).unwrap().initials, "XYZ");
        assert_eq!(table.get(1).unwrap().score, 0);
        assert_eq!(table.get(2).unwrap().score, 42);
        assert_eq!(table.get(3).unwrap(), &ScoreEntry::default());
    }

    #[test]
    fn test_missing_file_gives_default() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(HighScoreTable::load(&path), HighScoreTable::new());
    }

    #[test]
    fn test_commit_then_reload_round_trip() {
        let path = temp_path("roundtrip");
        let mut table = table_with(&[5000, 1200, 700]);
        let slot = table.submit(2500).unwrap();
        assert_eq!(slot, 1);
        table.commit_initials(slot, "JDK", &path).unwrap();

        let reloaded = HighScoreTable::load(&path);
        assert_eq!(reloaded, table);
        assert_eq!(reloaded.get(1).unwrap().initials, "JDK");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_format() {
        let mut table = HighScoreTable::new();
        table.submit(75);
        let text = table.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 * NUM_HIGH_SCORES);
        assert_eq!(&lines[..4], &["AAA", "75", "AAA", "0"]);
    }

    proptest! {
        #[test]
        fn prop_table_stays_sorted(scores in proptest::collection::vec(0u32..100_000, 0..40)) {
            let mut table = HighScoreTable::new();
            for s in &scores {
                table.submit(*s);
            }
            prop_assert_eq!(table.entries().len(), NUM_HIGH_SCORES);
            for pair in table.entries().windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
            let best = scores.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(table.top_score(), best);
        }

        #[test]
        fn prop_fresh_table_ranks_any_positive_score_first(score in 1u32..u32::MAX) {
            prop_assert_eq!(HighScoreTable::new().rank(score), Some(0));
        }
    }
}
