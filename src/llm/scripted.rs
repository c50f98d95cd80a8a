//! Scripted text generator for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{Credential, TextGenerator};
use crate::error::UpstreamError;
use crate::stages::Stage;

/// Answers each stage with a fixed text and records every call
pub struct ScriptedGenerator {
    responses: HashMap<Stage, String>,
    failures: Mutex<HashMap<Stage, usize>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(Stage, String)>>,
}

pub const STRUCTURED_JSON: &str = r#"{"similar_ideas": ["factories"], "text1_original_ideas": ["Luddites"], "text2_original_ideas": []}"#;

impl ScriptedGenerator {
    pub fn new() -> Self {
        let responses = HashMap::from([
            (Stage::PromptReconstruction, "Describe the Industrial Revolution.".to_string()),
            (Stage::Regeneration, "Factories changed everything.".to_string()),
            (Stage::Comparison, "Both mention factories.".to_string()),
            (Stage::Structuring, format!("```json\n{}\n```", STRUCTURED_JSON)),
        ]);
        Self {
            responses,
            failures: Mutex::new(HashMap::new()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, stage: Stage, text: impl Into<String>) -> Self {
        self.responses.insert(stage, text.into());
        self
    }

    /// Fail the next `times` calls for `stage` with a 503
    pub fn failing(self, stage: Stage, times: usize) -> Self {
        self.failures.lock().unwrap().insert(stage, times);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call so far as (stage, credential secret)
    pub fn calls(&self) -> Vec<(Stage, String)> {
        self.calls.lock().unwrap().clone()
    }
}

/// Recognise which stage a request belongs to from its wording
pub fn classify(prompt: &str) -> Stage {
    if prompt.contains("Only output the prompt, nothing else.") {
        Stage::PromptReconstruction
    } else if prompt.contains("END OF BOTH TEXTS") {
        Stage::Comparison
    } else if prompt.contains("format it into a JSON object") {
        Stage::Structuring
    } else {
        Stage::Regeneration
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, credential: &Credential) -> Result<String, UpstreamError> {
        let stage = classify(prompt);
        self.calls
            .lock()
            .unwrap()
            .push((stage, credential.secret().to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        {
            let mut failures = self.failures.lock().unwrap();
            if let Some(remaining) = failures.get_mut(&stage) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(UpstreamError::Status {
                        status: 503,
                        body: "overloaded".to_string(),
                    });
                }
            }
        }

        Ok(self.responses[&stage].clone())
    }
}
