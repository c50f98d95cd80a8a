use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::CycleOutcome;
use crate::stages::{run_pipeline, StageInvoker};

/// Runs one complete cycle and reports it as a [`CycleOutcome`]
///
/// Implementations must not panic or return early on stage errors; every
/// failure is reported as `CycleOutcome::Failure`.
#[async_trait]
pub trait CycleRunner: Send + Sync {
    async fn run(&self, text: &str, cycle_id: usize) -> CycleOutcome;
}

/// Cycle runner backed by the four-stage model pipeline
pub struct PipelineCycleRunner {
    invoker: StageInvoker,
}

impl PipelineCycleRunner {
    pub fn new(invoker: StageInvoker) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl CycleRunner for PipelineCycleRunner {
    async fn run(&self, text: &str, cycle_id: usize) -> CycleOutcome {
        match run_pipeline(&self.invoker, text).await {
            Ok(output) => {
                info!(
                    "Cycle {}: complete ({} ideas)",
                    cycle_id,
                    output.ideas.idea_count()
                );
                CycleOutcome::Success {
                    cycle_id,
                    structured_result: output.ideas,
                    intermediate_texts: output.texts,
                }
            }
            Err(e) => {
                warn!("Cycle {} failed: {}", cycle_id, e);
                CycleOutcome::failure(cycle_id, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm::scripted::ScriptedGenerator;
    use crate::llm::{Credential, CredentialRotator};
    use crate::stages::{PipelineConfig, Stage};

    fn runner(generator: ScriptedGenerator) -> PipelineCycleRunner {
        let rotator = CredentialRotator::new(vec![Credential::new("key")]).unwrap();
        PipelineCycleRunner::new(StageInvoker::new(
            Arc::new(generator),
            Arc::new(rotator),
            PipelineConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_success_keeps_intermediate_texts() {
        let outcome = runner(ScriptedGenerator::new()).run("Mills and looms.", 7).await;

        assert_eq!(outcome.cycle_id(), 7);
        let texts = outcome.intermediate_texts().unwrap();
        assert_eq!(texts.generated_prompt, "Describe the Industrial Revolution.");
        assert_eq!(texts.comparison_result, "Both mention factories.");
    }

    #[tokio::test]
    async fn test_upstream_error_becomes_failure() {
        let generator = ScriptedGenerator::new().failing(Stage::PromptReconstruction, 1);
        let outcome = runner(generator).run("Mills and looms.", 3).await;

        match outcome {
            CycleOutcome::Failure {
                cycle_id,
                error_description,
            } => {
                assert_eq!(cycle_id, 3);
                assert!(error_description.contains("prompt reconstruction"));
                assert!(error_description.contains("503"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_structure_becomes_failure() {
        let generator = ScriptedGenerator::new().respond(Stage::Structuring, "{\"similar_ideas\": ");
        let outcome = runner(generator).run("Mills and looms.", 1).await;

        assert!(!outcome.is_success());
    }
}
