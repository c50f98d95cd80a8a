use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// The three idea lists produced by the structuring stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredIdeas {
    /// Supporting ideas both texts share
    pub similar_ideas: Vec<String>,
    /// Ideas only the original text uses
    pub text1_original_ideas: Vec<String>,
    /// Ideas only the regenerated text uses
    pub text2_original_ideas: Vec<String>,
}

/// One of the three idea lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdeaCategory {
    Similar,
    Text1Original,
    Text2Original,
}

impl IdeaCategory {
    pub const ALL: [IdeaCategory; 3] = [
        IdeaCategory::Similar,
        IdeaCategory::Text1Original,
        IdeaCategory::Text2Original,
    ];
}

impl StructuredIdeas {
    pub fn get(&self, category: IdeaCategory) -> &[String] {
        match category {
            IdeaCategory::Similar => &self.similar_ideas,
            IdeaCategory::Text1Original => &self.text1_original_ideas,
            IdeaCategory::Text2Original => &self.text2_original_ideas,
        }
    }

    pub fn get_mut(&mut self, category: IdeaCategory) -> &mut Vec<String> {
        match category {
            IdeaCategory::Similar => &mut self.similar_ideas,
            IdeaCategory::Text1Original => &mut self.text1_original_ideas,
            IdeaCategory::Text2Original => &mut self.text2_original_ideas,
        }
    }

    /// Total number of ideas across all categories
    pub fn idea_count(&self) -> usize {
        IdeaCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}

/// Remove Markdown code fence markers the model tends to wrap JSON in
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse the structuring stage output into idea lists
///
/// All three keys must be present and hold arrays of strings. Extra keys are
/// ignored.
pub fn parse_structured_ideas(raw: &str) -> Result<StructuredIdeas, ParseError> {
    let cleaned = strip_code_fences(raw);
    Ok(serde_json::from_str(&cleaned)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"{
        "similar_ideas": ["steam power", "urbanization"],
        "text1_original_ideas": ["Luddites"],
        "text2_original_ideas": []
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let ideas = parse_structured_ideas(PLAIN).unwrap();

        assert_eq!(ideas.similar_ideas, vec!["steam power", "urbanization"]);
        assert_eq!(ideas.text1_original_ideas, vec!["Luddites"]);
        assert!(ideas.text2_original_ideas.is_empty());
        assert_eq!(ideas.idea_count(), 3);
    }

    #[test]
    fn test_fenced_output_parses_identically() {
        let fenced = format!("```json\n{}\n```", PLAIN);
        let padded = format!("\n\n  ```json\n{}\n```  \n", PLAIN);

        let plain = parse_structured_ideas(PLAIN).unwrap();
        assert_eq!(parse_structured_ideas(&fenced).unwrap(), plain);
        assert_eq!(parse_structured_ideas(&padded).unwrap(), plain);
    }

    #[test]
    fn test_bare_fence_without_language() {
        let fenced = format!("```\n{}\n```", PLAIN);
        assert_eq!(
            parse_structured_ideas(&fenced).unwrap(),
            parse_structured_ideas(PLAIN).unwrap()
        );
    }

    #[test]
    fn test_missing_key_is_error() {
        let raw = r#"{"similar_ideas": [], "text1_original_ideas": []}"#;
        assert!(parse_structured_ideas(raw).is_err());
    }

    #[test]
    fn test_prose_is_error() {
        assert!(parse_structured_ideas("Both texts discuss factories.").is_err());
    }

    #[test]
    fn test_non_string_items_are_error() {
        let raw = r#"{"similar_ideas": [1], "text1_original_ideas": [], "text2_original_ideas": []}"#;
        assert!(parse_structured_ideas(raw).is_err());
    }

    #[test]
    fn test_categories_select_matching_lists() {
        let mut ideas = parse_structured_ideas(PLAIN).unwrap();
        ideas.get_mut(IdeaCategory::Text2Original).push("railways".to_string());

        assert_eq!(ideas.get(IdeaCategory::Similar), ["steam power", "urbanization"]);
        assert_eq!(ideas.get(IdeaCategory::Text1Original), ["Luddites"]);
        assert_eq!(ideas.get(IdeaCategory::Text2Original), ["railways"]);
    }
}
