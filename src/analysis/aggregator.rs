//! Majority voting across cycle results.
//!
//! Each idea category is voted on independently. An idea survives when it
//! occurs in strictly more than half of the successful cycles, compared with
//! exact, case-sensitive string equality.

use std::collections::HashMap;

use crate::error::NoSuccessfulCyclesError;
use crate::models::{AggregatedResult, CycleOutcome, CycleStats, IdeaCategory, StructuredIdeas};

/// Merge all successful outcomes into one consensus result
///
/// Statistics cover every outcome, failures included. Output lists keep
/// first-seen order, scanning successful cycles by ascending cycle id.
pub fn aggregate(outcomes: &[CycleOutcome]) -> Result<AggregatedResult, NoSuccessfulCyclesError> {
    let stats = CycleStats::from_outcomes(outcomes);

    let mut successes: Vec<(usize, &StructuredIdeas)> = outcomes
        .iter()
        .filter_map(|o| o.structured_result().map(|r| (o.cycle_id(), r)))
        .collect();

    if successes.is_empty() {
        return Err(NoSuccessfulCyclesError {
            total: outcomes.len(),
        });
    }
    successes.sort_by_key(|(cycle_id, _)| *cycle_id);

    let mut ideas = StructuredIdeas::default();
    for category in IdeaCategory::ALL {
        *ideas.get_mut(category) = majority_vote(
            successes.iter().map(|(_, result)| result.get(category)),
            successes.len(),
        );
    }

    Ok(AggregatedResult { ideas, stats })
}

/// Keep the strings whose total occurrence count exceeds `successful / 2`
pub fn majority_vote<'a>(
    lists: impl IntoIterator<Item = &'a [String]>,
    successful: usize,
) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for list in lists {
        for idea in list {
            let count = counts.entry(idea.as_str()).or_insert_with(|| {
                order.push(idea.as_str());
                0
            });
            *count += 1;
        }
    }

    // count > successful / 2, kept in integers
    order
        .into_iter()
        .filter(|idea| counts[idea] * 2 > successful)
        .map(String::from)
        .collect()
}
