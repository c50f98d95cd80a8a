pub mod analysis;
pub mod config;
pub mod cycles;
pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod stages;

pub use analysis::{aggregate, AnalysisSettings, Analyzer};
pub use config::AnalyzerConfig;
pub use cycles::{CycleOrchestrator, CycleRunner, PipelineCycleRunner};
pub use error::{
    AnalysisError, ConfigurationError, NoSuccessfulCyclesError, ParseError, StageError,
    UpstreamError,
};
pub use io::{read_input_text, render_response, write_response, TextSource};
pub use llm::{Credential, CredentialRotator, GeminiClient, GeminiConfig, TextGenerator};
pub use models::{
    AggregatedResult, AnalysisResponse, CycleOutcome, CycleStats, IntermediateTexts,
    StructuredIdeas,
};
pub use stages::{run_pipeline, PipelineConfig, Stage, StageInvoker};
