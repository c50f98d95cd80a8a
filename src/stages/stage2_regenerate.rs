use super::{Stage, StageInvoker};
use crate::error::StageError;
use crate::llm::build_regeneration_prompt;

/// Execute Stage 2: generate fresh text from the reconstructed prompt
pub async fn execute_stage2(
    invoker: &StageInvoker,
    generated_prompt: &str,
) -> Result<String, StageError> {
    let prompt = build_regeneration_prompt(generated_prompt);
    invoker.invoke(Stage::Regeneration, &prompt).await
}
