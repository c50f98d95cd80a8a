use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use super::aggregate;
use crate::config::AnalyzerConfig;
use crate::cycles::{CycleOrchestrator, CycleRunner, PipelineCycleRunner};
use crate::error::AnalysisError;
use crate::llm::GeminiClient;
use crate::models::AnalysisResponse;
use crate::stages::StageInvoker;

/// Batch settings for one analysis
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub cycle_count: usize,
    pub batch_timeout: Option<Duration>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            cycle_count: 3,
            batch_timeout: None,
        }
    }
}

/// The `analyze` operation: run a batch of cycles and vote on the result
pub struct Analyzer {
    orchestrator: CycleOrchestrator,
    settings: AnalysisSettings,
}

impl Analyzer {
    pub fn new(runner: Arc<dyn CycleRunner>, settings: AnalysisSettings) -> Self {
        Self {
            orchestrator: CycleOrchestrator::new(runner),
            settings,
        }
    }

    /// Wire up the Gemini backend and credential pool from configuration
    ///
    /// Fails fast when the credential pool is empty.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let rotator = config.rotator()?;
        info!(
            "Credential pool: {} keys, model {}",
            rotator.len(),
            config.gemini.model
        );

        let client = GeminiClient::new(config.gemini.clone()).map_err(AnalysisError::ClientSetup)?;

        let invoker = StageInvoker::new(
            Arc::new(client),
            Arc::new(rotator),
            config.pipeline.clone(),
        );

        Ok(Self::new(
            Arc::new(PipelineCycleRunner::new(invoker)),
            AnalysisSettings {
                cycle_count: config.cycles,
                batch_timeout: config.batch_timeout_secs.map(Duration::from_secs),
            },
        ))
    }

    /// Analyze `text`. Errors are folded into the response as a description.
    pub async fn analyze(&self, text: &str) -> AnalysisResponse {
        match self.try_analyze(text).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Analysis failed: {}", e);
                AnalysisResponse::error(e.to_string())
            }
        }
    }

    pub async fn try_analyze(&self, text: &str) -> Result<AnalysisResponse, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let request_id = Uuid::new_v4();
        info!(
            "Analysis {}: {} chars, {} cycles",
            request_id,
            text.len(),
            self.settings.cycle_count
        );

        // a timeout past the end of the clock means no deadline
        let deadline = self
            .settings
            .batch_timeout
            .and_then(|t| Instant::now().checked_add(t));
        let outcomes = self
            .orchestrator
            .run_batch_until(text, self.settings.cycle_count, deadline)
            .await;

        let result = aggregate(&outcomes)?;

        let details = if self.settings.cycle_count == 1 {
            outcomes
                .iter()
                .find_map(|o| o.intermediate_texts())
                .cloned()
        } else {
            None
        };

        info!(
            "Analysis {}: {} similar, {} text1-only, {} text2-only ideas from {}/{} cycles",
            request_id,
            result.ideas.similar_ideas.len(),
            result.ideas.text1_original_ideas.len(),
            result.ideas.text2_original_ideas.len(),
            result.stats.successful,
            result.stats.total
        );

        Ok(AnalysisResponse::from_aggregate(result, details))
    }
}
