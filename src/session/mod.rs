//! Session orchestration — the two-phase optimize → analyze pipeline and
//! the state machine that guards it.
//!
//! One submission runs the pipeline to completion or failure; there is no
//! cancellation and no concurrent submission. The orchestrator exclusively
//! owns the transient [`SessionState`] and replaces it wholesale on every
//! accepted submission.

use anyhow::{Result, bail};

use crate::api::{AnalyzeRequest, AnalyzeResponse, OptimizeResponse, PromptBackend};
use crate::metrics::MetricsAggregator;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Pipeline progress for the active session.
///
/// `Idle → Optimizing → Analyzing → Settled`, with `Errored` reachable from
/// either in-flight state. A new submission is accepted from `Idle`,
/// `Settled`, or `Errored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Optimizing,
    Analyzing,
    Settled,
    Errored,
}

/// Transient state for the current submission.
///
/// Re-seeded on every accepted submission: the new prompt is recorded and
/// both results are cleared before the pipeline starts.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub prompt: String,
    pub optimization: Option<OptimizeResponse>,
    pub analysis: Option<AnalyzeResponse>,
}

impl SessionState {
    fn seeded(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            optimization: None,
            analysis: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives the two-phase pipeline against a [`PromptBackend`] and owns the
/// session's transient state plus the running savings totals.
pub struct Orchestrator {
    backend: Box<dyn PromptBackend>,
    phase: Phase,
    state: SessionState,
    aggregator: MetricsAggregator,
}

impl Orchestrator {
    pub fn new(backend: Box<dyn PromptBackend>) -> Self {
        Self {
            backend,
            phase: Phase::Idle,
            state: SessionState::default(),
            aggregator: MetricsAggregator::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn aggregator(&self) -> &MetricsAggregator {
        &self.aggregator
    }

    /// Whether a new submission would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !matches!(self.phase, Phase::Optimizing | Phase::Analyzing)
    }

    pub fn is_optimizing(&self) -> bool {
        self.phase == Phase::Optimizing
    }

    pub fn is_analyzing(&self) -> bool {
        self.phase == Phase::Analyzing
    }

    /// Run the full pipeline for one prompt.
    ///
    /// Rejected outright while a previous submission is in flight. The
    /// analyze call is only issued after the optimize call has succeeded —
    /// strictly sequential, never concurrent.
    ///
    /// On an optimize failure nothing is stored. On an analyze failure the
    /// optimize-phase result is retained and still displayable, but the
    /// running totals are not touched for that submission. Either failure
    /// leaves the session in `Errored`, from which the next submission
    /// restarts the pipeline.
    pub fn submit(&mut self, prompt: &str) -> Result<()> {
        if !self.can_submit() {
            bail!("a submission is already in flight");
        }

        self.state = SessionState::seeded(prompt);
        self.phase = Phase::Optimizing;

        let optimization = match self.backend.optimize(prompt) {
            Ok(resp) => resp,
            Err(err) => {
                self.phase = Phase::Errored;
                return Err(err.context("failed to process the prompt"));
            }
        };

        let request = AnalyzeRequest {
            original_prompt: self.state.prompt.clone(),
            optimized_prompt: optimization.optimized_prompt.clone(),
            original_answer: optimization.original_answer.clone(),
            optimized_answer: optimization.optimized_answer.clone(),
        };
        self.state.optimization = Some(optimization);
        self.phase = Phase::Analyzing;

        let analysis = match self.backend.analyze(&request) {
            Ok(resp) => resp,
            Err(err) => {
                self.phase = Phase::Errored;
                return Err(err.context("failed to process the prompt"));
            }
        };

        self.aggregator.record(&analysis);
        self.state.analysis = Some(analysis);
        self.phase = Phase::Settled;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
