use super::{Stage, StageInvoker};
use crate::error::StageError;
use crate::llm::build_reconstruction_prompt;

/// Execute Stage 1: reconstruct a prompt that could have produced `text`
///
/// The model's answer is used as-is; no format checks.
pub async fn execute_stage1(invoker: &StageInvoker, text: &str) -> Result<String, StageError> {
    let prompt = build_reconstruction_prompt(text);
    invoker.invoke(Stage::PromptReconstruction, &prompt).await
}
