use serde::Serialize;

use super::StructuredIdeas;

/// Stage 1-3 outputs kept for observability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntermediateTexts {
    /// Prompt reconstructed from the original text
    pub generated_prompt: String,
    /// Text regenerated from that prompt
    pub ai_text: String,
    /// Free-text comparison of the two texts
    pub comparison_result: String,
}

/// Result of one full pipeline run. A cycle is either fully successful or
/// fully failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Success {
        cycle_id: usize,
        structured_result: StructuredIdeas,
        intermediate_texts: IntermediateTexts,
    },
    Failure {
        cycle_id: usize,
        error_description: String,
    },
}

impl CycleOutcome {
    pub fn failure(cycle_id: usize, error_description: impl Into<String>) -> Self {
        CycleOutcome::Failure {
            cycle_id,
            error_description: error_description.into(),
        }
    }

    pub fn cycle_id(&self) -> usize {
        match self {
            CycleOutcome::Success { cycle_id, .. } | CycleOutcome::Failure { cycle_id, .. } => {
                *cycle_id
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Success { .. })
    }

    pub fn structured_result(&self) -> Option<&StructuredIdeas> {
        match self {
            CycleOutcome::Success {
                structured_result, ..
            } => Some(structured_result),
            CycleOutcome::Failure { .. } => None,
        }
    }

    pub fn intermediate_texts(&self) -> Option<&IntermediateTexts> {
        match self {
            CycleOutcome::Success {
                intermediate_texts, ..
            } => Some(intermediate_texts),
            CycleOutcome::Failure { .. } => None,
        }
    }
}

/// Cycle counts over the whole batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl CycleStats {
    pub fn from_outcomes(outcomes: &[CycleOutcome]) -> Self {
        let successful = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            successful,
            failed: outcomes.len() - successful,
        }
    }
}

/// Consensus over all successful cycles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedResult {
    pub ideas: StructuredIdeas,
    pub stats: CycleStats,
}
