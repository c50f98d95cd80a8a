use serde::Serialize;

use super::{AggregatedResult, CycleStats, IntermediateTexts, StructuredIdeas};

/// Successful analysis payload
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub final_result: StructuredIdeas,
    pub cycle_stats: CycleStats,
    /// Stage texts of the only cycle, present for single-cycle runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<IntermediateTexts>,
}

/// What `analyze` hands back to the request-handling layer
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Report(AnalysisReport),
    Error { error: String },
}

impl AnalysisResponse {
    pub fn from_aggregate(result: AggregatedResult, details: Option<IntermediateTexts>) -> Self {
        AnalysisResponse::Report(AnalysisReport {
            final_result: result.ideas,
            cycle_stats: result.stats,
            details,
        })
    }

    pub fn error(description: impl Into<String>) -> Self {
        AnalysisResponse::Error {
            error: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisResponse::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_shape() {
        let value = serde_json::to_value(AnalysisResponse::error("all 2 analysis cycles failed"))
            .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"error": "all 2 analysis cycles failed"})
        );
    }

    #[test]
    fn test_report_shape_without_details() {
        let response = AnalysisResponse::from_aggregate(
            AggregatedResult {
                ideas: StructuredIdeas {
                    similar_ideas: vec!["a".to_string()],
                    ..Default::default()
                },
                stats: CycleStats {
                    total: 3,
                    successful: 2,
                    failed: 1,
                },
            },
            None,
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["final_result"]["similar_ideas"][0], "a");
        assert_eq!(value["cycle_stats"]["failed"], 1);
        assert!(value.get("details").is_none());
        assert!(!response.is_error());
    }
}
