use super::{execute_stage1, execute_stage2, execute_stage3, execute_stage4, StageInvoker};
use crate::error::StageError;
use crate::models::{IntermediateTexts, StructuredIdeas};

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub ideas: StructuredIdeas,
    pub texts: IntermediateTexts,
}

/// Run the four stages in order. Each stage's output is the literal input of
/// the next; the first failing stage ends the run.
pub async fn run_pipeline(invoker: &StageInvoker, text: &str) -> Result<PipelineOutput, StageError> {
    let generated_prompt = execute_stage1(invoker, text).await?;
    let ai_text = execute_stage2(invoker, &generated_prompt).await?;
    let comparison_result = execute_stage3(invoker, text, &ai_text).await?;
    let ideas = execute_stage4(invoker, &comparison_result).await?;

    Ok(PipelineOutput {
        ideas,
        texts: IntermediateTexts {
            generated_prompt,
            ai_text,
            comparison_result,
        },
    })
}
