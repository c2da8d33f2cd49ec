//! Savings metrics — per-request derived values, running totals, and the
//! aggregate energy visualization.
//!
//! The aggregator owns the session's cumulative counters and exposes a
//! single mutation entry point ([`MetricsAggregator::record`]); everything
//! else is derived on demand.

use crate::api::AnalyzeResponse;

/// Projection factor illustrating savings at larger volume.
pub const PROMPT_SCALE: i64 = 10_000;

/// Reference light source for the energy visualization, in watts.
const LED_BULB_WATTS: f64 = 6.0;

// ---------------------------------------------------------------------------
// Per-request derived values
// ---------------------------------------------------------------------------

/// Display values derived from a single analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMetrics {
    /// Negative when the optimized prompt came out longer than the original.
    pub tokens_saved: i64,
    /// `None` when the original prompt measured zero tokens — there is no
    /// meaningful percentage to report.
    pub tokens_saved_percent: Option<f64>,
    pub similarity_cosine_percent: f64,
    pub similarity_gpt_percent: f64,
}

impl RequestMetrics {
    pub fn from_analysis(analysis: &AnalyzeResponse) -> Self {
        let tokens_saved = tokens_saved(analysis);
        let tokens_saved_percent = if analysis.original_tokens == 0 {
            None
        } else {
            Some(tokens_saved as f64 / analysis.original_tokens as f64 * 100.0)
        };

        Self {
            tokens_saved,
            tokens_saved_percent,
            similarity_cosine_percent: analysis.similarity_score_cosine * 100.0,
            similarity_gpt_percent: analysis.similarity_score_gpt * 100.0,
        }
    }
}

/// Token delta for one analysis result.
pub fn tokens_saved(analysis: &AnalyzeResponse) -> i64 {
    analysis.original_tokens as i64 - analysis.optimized_tokens as i64
}

// ---------------------------------------------------------------------------
// Running totals
// ---------------------------------------------------------------------------

/// Cumulative savings across a session.
///
/// Owned by exactly one aggregator value and mutated only through
/// [`record`](Self::record) — never replaced, never reset. A multi-session
/// reimplementation would wrap this in a lock without touching call sites.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    total_tokens_saved: i64,
    total_energy_saved_watts: f64,
}

/// Running totals projected to [`PROMPT_SCALE`] prompts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledProjection {
    pub tokens_saved: i64,
    pub energy_saved_watts: f64,
}

/// Symbol and caption for the aggregate energy savings display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyVisualization {
    pub symbol: &'static str,
    pub text: String,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one analysis result into the running totals.
    ///
    /// No clamping: a submission whose optimized prompt grew subtracts from
    /// the total.
    pub fn record(&mut self, analysis: &AnalyzeResponse) {
        self.total_tokens_saved += tokens_saved(analysis);
        self.total_energy_saved_watts += analysis.energy_saved_watts;
    }

    pub fn total_tokens_saved(&self) -> i64 {
        self.total_tokens_saved
    }

    pub fn total_energy_saved_watts(&self) -> f64 {
        self.total_energy_saved_watts
    }

    /// Totals projected to [`PROMPT_SCALE`] prompts. Recomputed on demand,
    /// never stored.
    pub fn scaled_projection(&self) -> ScaledProjection {
        ScaledProjection {
            tokens_saved: self.total_tokens_saved * PROMPT_SCALE,
            energy_saved_watts: self.total_energy_saved_watts * PROMPT_SCALE as f64,
        }
    }

    pub fn energy_visualization(&self) -> EnergyVisualization {
        energy_visualization(self.total_energy_saved_watts)
    }
}

/// Render a total energy saving (unscaled watts) as hours of a 6 W LED bulb
/// at projected scale.
///
/// Exactly zero means nothing has been saved yet — an hourglass. Anything
/// else gets the bulb, including a negative total (negative hours).
pub fn energy_visualization(total_energy_saved_watts: f64) -> EnergyVisualization {
    let scaled = total_energy_saved_watts * PROMPT_SCALE as f64;

    if scaled == 0.0 {
        EnergyVisualization {
            symbol: "⏳",
            text: "0 hours saved".to_string(),
        }
    } else {
        let hours = scaled / LED_BULB_WATTS;
        EnergyVisualization {
            symbol: "💡",
            text: format!("{hours:.1} hours of a LED bulb"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(original: u64, optimized: u64, energy: f64) -> AnalyzeResponse {
        AnalyzeResponse {
            energy_saved_watts: energy,
            similarity_score_cosine: 0.95,
            similarity_score_gpt: 0.9,
            original_tokens: original,
            optimized_tokens: optimized,
        }
    }

    #[test]
    fn request_metrics_basic() {
        let metrics = RequestMetrics::from_analysis(&analysis(200, 150, 0.001));
        assert_eq!(metrics.tokens_saved, 50);
        assert_eq!(metrics.tokens_saved_percent, Some(25.0));
        assert_eq!(metrics.similarity_cosine_percent, 95.0);
        assert_eq!(metrics.similarity_gpt_percent, 90.0);
    }

    #[test]
    fn request_metrics_negative_saving() {
        let metrics = RequestMetrics::from_analysis(&analysis(100, 120, 0.0));
        assert_eq!(metrics.tokens_saved, -20);
        assert_eq!(metrics.tokens_saved_percent, Some(-20.0));
    }

    #[test]
    fn request_metrics_zero_original_tokens_has_no_percentage() {
        let metrics = RequestMetrics::from_analysis(&analysis(0, 0, 0.0));
        assert_eq!(metrics.tokens_saved, 0);
        assert!(metrics.tokens_saved_percent.is_none());
    }

    #[test]
    fn record_accumulates_sums() {
        let mut aggregator = MetricsAggregator::new();
        aggregator.record(&analysis(100, 60, 0.002));
        aggregator.record(&analysis(300, 200, 0.003));
        aggregator.record(&analysis(50, 70, 0.001)); // negative saving

        assert_eq!(aggregator.total_tokens_saved(), 40 + 100 - 20);
        let expected_energy = 0.002 + 0.003 + 0.001;
        assert!((aggregator.total_energy_saved_watts() - expected_energy).abs() < 1e-12);
    }

    #[test]
    fn accumulation_is_order_independent() {
        let results = [
            analysis(120, 80, 0.004),
            analysis(90, 90, 0.0),
            analysis(10, 40, 0.001),
        ];

        let mut forward = MetricsAggregator::new();
        for r in &results {
            forward.record(r);
        }
        let mut reverse = MetricsAggregator::new();
        for r in results.iter().rev() {
            reverse.record(r);
        }

        assert_eq!(forward.total_tokens_saved(), reverse.total_tokens_saved());
        assert!(
            (forward.total_energy_saved_watts() - reverse.total_energy_saved_watts()).abs()
                < 1e-12
        );
    }

    #[test]
    fn scaled_projection_is_exactly_ten_thousand_times() {
        let mut aggregator = MetricsAggregator::new();
        assert_eq!(aggregator.scaled_projection().tokens_saved, 0);
        assert_eq!(aggregator.scaled_projection().energy_saved_watts, 0.0);

        aggregator.record(&analysis(10, 40, 0.0005)); // negative token total
        let scaled = aggregator.scaled_projection();
        assert_eq!(scaled.tokens_saved, -30 * PROMPT_SCALE);
        assert_eq!(scaled.energy_saved_watts, 0.0005 * PROMPT_SCALE as f64);
    }

    #[test]
    fn energy_visualization_zero_is_hourglass() {
        let viz = energy_visualization(0.0);
        assert_eq!(viz.symbol, "⏳");
        assert_eq!(viz.text, "0 hours saved");
    }

    #[test]
    fn energy_visualization_nonzero_is_bulb() {
        // 0.0006 W × 10000 = 6 W·h → exactly 1.0 hours of a 6 W bulb.
        let viz = energy_visualization(0.0006);
        assert_eq!(viz.symbol, "💡");
        assert_eq!(viz.text, "1.0 hours of a LED bulb");
    }

    #[test]
    fn energy_visualization_negative_total_still_gets_bulb() {
        let viz = energy_visualization(-0.0006);
        assert_eq!(viz.symbol, "💡");
        assert_eq!(viz.text, "-1.0 hours of a LED bulb");
    }

    #[test]
    fn aggregator_visualization_tracks_totals() {
        let mut aggregator = MetricsAggregator::new();
        assert_eq!(aggregator.energy_visualization().symbol, "⏳");

        aggregator.record(&analysis(100, 50, 0.0012));
        let viz = aggregator.energy_visualization();
        assert_eq!(viz.symbol, "💡");
        assert_eq!(viz.text, "2.0 hours of a LED bulb");
    }
}
