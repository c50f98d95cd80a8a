use tracing::debug;

use super::{Stage, StageInvoker};
use crate::error::StageError;
use crate::llm::build_structuring_prompt;
use crate::models::{parse_structured_ideas, StructuredIdeas};

/// Execute Stage 4: turn the comparison into the three idea lists
///
/// The model often wraps its JSON in a Markdown fence despite being asked not
/// to; fences are stripped before parsing. Output that still is not the
/// expected object fails the stage.
pub async fn execute_stage4(
    invoker: &StageInvoker,
    comparison: &str,
) -> Result<StructuredIdeas, StageError> {
    let prompt = build_structuring_prompt(comparison);
    let raw = invoker.invoke(Stage::Structuring, &prompt).await?;

    let ideas = parse_structured_ideas(&raw).map_err(|source| StageError::Unparsable {
        stage: Stage::Structuring,
        source,
    })?;

    debug!(
        "Stage 4: {} similar, {} text1-only, {} text2-only ideas",
        ideas.similar_ideas.len(),
        ideas.text1_original_ideas.len(),
        ideas.text2_original_ideas.len()
    );

    Ok(ideas)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm::scripted::ScriptedGenerator;
    use crate::llm::{Credential, CredentialRotator};
    use crate::stages::PipelineConfig;

    fn invoker(generator: ScriptedGenerator) -> StageInvoker {
        let rotator = CredentialRotator::new(vec![Credential::new("key")]).unwrap();
        StageInvoker::new(Arc::new(generator), Arc::new(rotator), PipelineConfig::default())
    }

    #[tokio::test]
    async fn test_fenced_json_parses() {
        let ideas = execute_stage4(&invoker(ScriptedGenerator::new()), "Both mention factories.")
            .await
            .unwrap();
        assert_eq!(ideas.similar_ideas, vec!["factories"]);
        assert_eq!(ideas.text1_original_ideas, vec!["Luddites"]);
    }

    #[tokio::test]
    async fn test_prose_answer_is_stage_error() {
        let generator =
            ScriptedGenerator::new().respond(Stage::Structuring, "Sure! Here are the ideas.");
        let err = execute_stage4(&invoker(generator), "Both mention factories.")
            .await
            .unwrap_err();

        assert!(matches!(err, StageError::Unparsable { stage: Stage::Structuring, .. }));
    }
}
