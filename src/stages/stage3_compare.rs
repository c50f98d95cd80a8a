use super::{Stage, StageInvoker};
use crate::error::StageError;
use crate::llm::build_comparison_prompt;

/// Execute Stage 3: free-text comparison of the supporting ideas in the
/// original and regenerated texts
pub async fn execute_stage3(
    invoker: &StageInvoker,
    original: &str,
    regenerated: &str,
) -> Result<String, StageError> {
    let prompt = build_comparison_prompt(original, regenerated);
    invoker.invoke(Stage::Comparison, &prompt).await
}
