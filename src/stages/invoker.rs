use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::Stage;
use crate::error::{StageError, UpstreamError};
use crate::llm::{CredentialRotator, TextGenerator};

/// Configuration shared by every stage call
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Extra attempts for a failed upstream call (0 = single attempt)
    pub max_retries: u32,
    /// Backoff before the first retry; doubles on each further retry
    pub retry_backoff_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl PipelineConfig {
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

/// Issues stage requests, pairing each one with a freshly rotated credential
pub struct StageInvoker {
    generator: Arc<dyn TextGenerator>,
    rotator: Arc<CredentialRotator>,
    config: PipelineConfig,
}

impl StageInvoker {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        rotator: Arc<CredentialRotator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            rotator,
            config,
        }
    }

    /// Send one stage request. Every attempt acquires its own credential.
    pub async fn invoke(&self, stage: Stage, prompt: &str) -> Result<String, StageError> {
        let mut last_error: Option<UpstreamError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let backoff = self.config.backoff(attempt);
                warn!(
                    "Stage {} ({}): retry {} of {} in {:?}",
                    stage.number(),
                    stage,
                    attempt,
                    self.config.max_retries,
                    backoff
                );
                tokio::time::sleep(backoff).await;
            }

            let credential = self.rotator.acquire();
            debug!("Stage {} ({}): calling model with key {}", stage.number(), stage, credential);

            match self.generator.generate(prompt, &credential).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    debug!("Stage {} ({}) attempt failed: {}", stage.number(), stage, e);
                    last_error = Some(e);
                }
            }
        }

        Err(StageError::Upstream {
            stage,
            source: last_error.unwrap_or(UpstreamError::EmptyResponse),
        })
    }
}
