use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::{AnalyzeResponse, OptimizeResponse};
use crate::metrics;

// ---------------------------------------------------------------------------
// Submission log entry (JSONL history)
// ---------------------------------------------------------------------------

/// A single entry in the submission history (`~/.greenprompt/history.jsonl`).
///
/// One line per settled submission. The live session totals stay in memory;
/// the history additionally persists per-submission records across runs for
/// the `stats` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionLogEntry {
    pub timestamp: String,
    pub original_tokens: u64,
    pub optimized_tokens: u64,
    /// Negative when the optimized prompt grew.
    pub tokens_saved: i64,
    pub energy_saved_watts: f64,
    pub similarity_cosine: f64,
    pub similarity_gpt: f64,
    /// Whether the optimize phase was served from the backend cache.
    #[serde(default)]
    pub cached: bool,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Record a settled submission.
///
/// Best-effort — failures are silently ignored so a full disk or a missing
/// home directory never breaks the session.
pub fn log_submission(optimization: &OptimizeResponse, analysis: &AnalyzeResponse) {
    let entry = SubmissionLogEntry {
        timestamp: Utc::now().to_rfc3339(),
        original_tokens: analysis.original_tokens,
        optimized_tokens: analysis.optimized_tokens,
        tokens_saved: metrics::tokens_saved(analysis),
        energy_saved_watts: analysis.energy_saved_watts,
        similarity_cosine: analysis.similarity_score_cosine,
        similarity_gpt: analysis.similarity_score_gpt,
        cached: optimization.is_cached,
    };

    let _ = append_entry(&entry);
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all history entries.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries() -> Vec<SubmissionLogEntry> {
    let Some(path) = history_log_path() else {
        return Vec::new();
    };

    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<SubmissionLogEntry>(&line).ok())
        .collect()
}

/// Read history entries filtered to a time window (last N days).
///
/// If `days` is `None`, returns all entries.
pub fn read_entries_since_days(days: Option<u32>) -> Vec<SubmissionLogEntry> {
    let entries = read_all_entries();

    let Some(days) = days else {
        return entries;
    };

    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
    let cutoff_str = cutoff.to_rfc3339();

    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff_str)
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_entry(entry: &SubmissionLogEntry) -> Result<()> {
    let Some(path) = history_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Return the path to the history log file.
pub fn history_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".greenprompt").join("history.jsonl"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_round_trips_through_json() {
        let entry = SubmissionLogEntry {
            timestamp: "2026-08-06T12:00:00+00:00".to_string(),
            original_tokens: 120,
            optimized_tokens: 45,
            tokens_saved: 75,
            energy_saved_watts: 0.002,
            similarity_cosine: 0.93,
            similarity_gpt: 0.97,
            cached: true,
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: SubmissionLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tokens_saved, 75);
        assert_eq!(back.original_tokens, 120);
        assert!(back.cached);
    }

    #[test]
    fn cached_defaults_to_false_for_old_entries() {
        let json = r#"{
            "timestamp": "2026-01-01T00:00:00+00:00",
            "original_tokens": 10,
            "optimized_tokens": 8,
            "tokens_saved": 2,
            "energy_saved_watts": 0.0001,
            "similarity_cosine": 0.9,
            "similarity_gpt": 0.9
        }"#;
        let entry: SubmissionLogEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.cached);
    }
}
