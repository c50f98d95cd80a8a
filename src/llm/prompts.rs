/// Stage 1 request: ask the model for a prompt that would produce `text`
pub fn build_reconstruction_prompt(text: &str) -> String {
    format!(
        r#"{text}

The text above was written by Generative AI. Based on the features of the text, eg, how many paragraphs it is, or the BROAD topic of the text, write a prompt to an AI that would output a similar answer. Let the AI determine what examples to use to answer the question, DO NOT guide the AI in the prompt on what specific examples to use.

Good Prompt: In a 200 word paragraph, how did people respond to the new economic and social structure created by the Industrial Revolution?

Bad Prompt: Write a concise historical overview detailing how people responded to the significant economic and social changes brought about by the Industrial Revolution. Focus on the range of reactions, including resistance to new work structures, attempts at adaptation, and the emergence of more radical demands for change. Discuss how the shift from traditional labor systems impacted workers and contributed to social and political movements aimed at improving working conditions.

The BAD prompt was bad due to it being very specific.

Only output the prompt, nothing else."#
    )
}

/// Stage 2 request: the reconstructed prompt is sent as-is
pub fn build_regeneration_prompt(generated_prompt: &str) -> String {
    generated_prompt.to_string()
}

/// Stage 3 request: compare supporting ideas of both texts
pub fn build_comparison_prompt(original: &str, regenerated: &str) -> String {
    format!(
        r#"Text 1

{original}

Text 2

{regenerated}

END OF BOTH TEXTS

Based on ONLY THE IDEAS DISCUSSED in Text 1 and Text 2, how similar are the 2 texts? Which ideas were similar? Which ideas did Text 1 use that Text 2 didn't and vice versa? I'm not asking about the core arguments, I'm talking about the supporting details. It's fine if the texts share similar ideas and there are no original ideas in either."#
    )
}

/// Stage 4 request: turn the comparison into the three idea lists
pub fn build_structuring_prompt(comparison: &str) -> String {
    format!(
        r#"Take the following text and format it into a JSON object. The JSON should have three keys: "similar_ideas", "text1_original_ideas", and "text2_original_ideas". Each key should have an array of strings as its value, where each string is a distinct idea.

Here is the text to format:
{comparison}

Only output the raw JSON, nothing else. Do not wrap it in markdown backticks. It's fine if the texts share similar ideas and there are no original ideas."#
    )
}
