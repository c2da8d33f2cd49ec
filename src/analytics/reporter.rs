//! History reporter — aggregation over the persisted submission log.
//!
//! Reads the JSONL history and produces the summary behind
//! `greenprompt stats`: totals, weighted savings percentage, average
//! similarity, and the scaled projection.

use crate::analytics::logger::{self, SubmissionLogEntry};
use crate::metrics::{self, EnergyVisualization, PROMPT_SCALE};

// ---------------------------------------------------------------------------
// Aggregated stats
// ---------------------------------------------------------------------------

/// Summary statistics over the submission history.
#[derive(Debug)]
pub struct HistoryStats {
    pub total_submissions: usize,
    pub cached_submissions: usize,
    pub total_original_tokens: u64,
    pub total_optimized_tokens: u64,
    /// Sum of per-submission deltas; negative submissions are not floored.
    pub total_tokens_saved: i64,
    pub total_energy_saved_watts: f64,
    /// Weighted by token volume, not a mean of percentages. Zero when there
    /// is no data.
    pub total_savings_pct: f64,
    pub avg_similarity_cosine_pct: f64,
    pub avg_similarity_gpt_pct: f64,
}

impl HistoryStats {
    /// Totals projected to [`PROMPT_SCALE`] prompts.
    pub fn scaled_tokens_saved(&self) -> i64 {
        self.total_tokens_saved * PROMPT_SCALE
    }

    pub fn scaled_energy_saved_watts(&self) -> f64 {
        self.total_energy_saved_watts * PROMPT_SCALE as f64
    }

    pub fn energy_visualization(&self) -> EnergyVisualization {
        metrics::energy_visualization(self.total_energy_saved_watts)
    }
}

// ---------------------------------------------------------------------------
// Stats computation
// ---------------------------------------------------------------------------

/// Compute aggregate stats from the history, optionally filtered to the
/// last `days` days.
pub fn compute_stats(days: Option<u32>) -> HistoryStats {
    build_stats(&logger::read_entries_since_days(days))
}

fn build_stats(entries: &[SubmissionLogEntry]) -> HistoryStats {
    if entries.is_empty() {
        return HistoryStats {
            total_submissions: 0,
            cached_submissions: 0,
            total_original_tokens: 0,
            total_optimized_tokens: 0,
            total_tokens_saved: 0,
            total_energy_saved_watts: 0.0,
            total_savings_pct: 0.0,
            avg_similarity_cosine_pct: 0.0,
            avg_similarity_gpt_pct: 0.0,
        };
    }

    let total_submissions = entries.len();
    let cached_submissions = entries.iter().filter(|e| e.cached).count();
    let total_original_tokens: u64 = entries.iter().map(|e| e.original_tokens).sum();
    let total_optimized_tokens: u64 = entries.iter().map(|e| e.optimized_tokens).sum();
    let total_tokens_saved: i64 = entries.iter().map(|e| e.tokens_saved).sum();
    let total_energy_saved_watts: f64 = entries.iter().map(|e| e.energy_saved_watts).sum();

    let total_savings_pct = if total_original_tokens == 0 {
        0.0
    } else {
        (total_original_tokens as i64 - total_optimized_tokens as i64) as f64
            / total_original_tokens as f64
            * 100.0
    };

    let count = total_submissions as f64;
    let avg_similarity_cosine_pct =
        entries.iter().map(|e| e.similarity_cosine).sum::<f64>() / count * 100.0;
    let avg_similarity_gpt_pct =
        entries.iter().map(|e| e.similarity_gpt).sum::<f64>() / count * 100.0;

    HistoryStats {
        total_submissions,
        cached_submissions,
        total_original_tokens,
        total_optimized_tokens,
        total_tokens_saved,
        total_energy_saved_watts,
        total_savings_pct,
        avg_similarity_cosine_pct,
        avg_similarity_gpt_pct,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(original: u64, optimized: u64, energy: f64, cached: bool) -> SubmissionLogEntry {
        SubmissionLogEntry {
            timestamp: "2026-08-06T12:00:00+00:00".to_string(),
            original_tokens: original,
            optimized_tokens: optimized,
            tokens_saved: original as i64 - optimized as i64,
            energy_saved_watts: energy,
            similarity_cosine: 0.9,
            similarity_gpt: 0.8,
            cached,
        }
    }

    #[test]
    fn empty_history_yields_zeroed_stats() {
        let stats = build_stats(&[]);
        assert_eq!(stats.total_submissions, 0);
        assert_eq!(stats.total_tokens_saved, 0);
        assert_eq!(stats.total_savings_pct, 0.0);
        assert_eq!(stats.energy_visualization().symbol, "⏳");
    }

    #[test]
    fn stats_aggregate_across_entries() {
        let entries = vec![
            entry(100, 60, 0.002, false),
            entry(200, 100, 0.003, true),
            entry(50, 70, 0.001, false), // negative saving
        ];
        let stats = build_stats(&entries);

        assert_eq!(stats.total_submissions, 3);
        assert_eq!(stats.cached_submissions, 1);
        assert_eq!(stats.total_original_tokens, 350);
        assert_eq!(stats.total_optimized_tokens, 230);
        assert_eq!(stats.total_tokens_saved, 120);
        assert!((stats.total_energy_saved_watts - 0.006).abs() < 1e-12);
        assert!((stats.total_savings_pct - 120.0 / 350.0 * 100.0).abs() < 1e-9);
        assert!((stats.avg_similarity_cosine_pct - 90.0).abs() < 1e-9);
        assert!((stats.avg_similarity_gpt_pct - 80.0).abs() < 1e-9);
    }

    #[test]
    fn scaled_projection_matches_totals() {
        let stats = build_stats(&[entry(100, 40, 0.0005, false)]);
        assert_eq!(stats.scaled_tokens_saved(), 600_000);
        assert_eq!(stats.scaled_energy_saved_watts(), 5.0);
    }

    #[test]
    fn zero_token_history_has_zero_savings_pct() {
        let stats = build_stats(&[entry(0, 0, 0.0, false)]);
        assert_eq!(stats.total_savings_pct, 0.0);
    }
}
