//! Review prompt construction
//!
//! Builds the fixed instruction prompt sent as the system message of every
//! upstream completion call

/// Fixed task description, review dimensions, and color legend
const REVIEW_INSTRUCTIONS: &str = r#"As an advanced AI language model, your task is to perform a detailed review of the provided text. Your feedback should be interwoven directly into the original text using HTML '<span>' tags for annotations. Your comments should appear when hovering over the highlighted sections. Here's how to do it: wrap the section you are referring to in '<span style="background-color: color" title="Your comment here">highlighted text</span>'.

Remember: Do NOT use <!-- --> comments, as they will not be visible when hovering over the text.

In your review, please focus on these aspects:

1. **Grammar:** Correct any grammatical errors such as incorrect verb tenses, misplaced punctuation, sentence fragments, etc.
2. **Typos:** Fix any spelling mistakes or typographical errors you find.
3. **Completeness of Information:** Assess whether the text provides a full understanding of the topic being discussed. Suggest where more details or explanations could be added.
4. **Word Choice:** Check if the chosen words, phrases, and expressions are clear, precise, and effective.
5. **Accuracy:** Point out statements whose factual accuracy is doubtful and say what should be verified.

Colors:
    Dark Blue (#00008B) is used for incorrect form or grammar.
    Dark Red (#8B0000) is used for typographical errors.
    Purple (#800080) is used for ambiguous or unclear phrases.
    Dark Green (#006400) is used for places where additional clarity could be beneficial.
    Saddle Brown (#8B4513) is used for weak or imprecise word choice.
    Dark Goldenrod (#B8860B) is used for statements that need fact checking."#;

/// Fixed worked example demonstrating the annotation markup
const ANNOTATION_EXAMPLE: &str = r#"If the original sentence is::
  The quick brown fox jumps over the lazzy dog. It's an old sentence used for demonstrating all alphabets. However it's not much usefull outside that.

Your HTML annotated sentence should look like:
  <p>The quick brown fox jumps over the <span style="background-color: #8B0000" title="Typographical error. The correct spelling is 'lazy'.">lazzy</span> dog. <span style="background-color: #800080" title="Ambiguous pronoun reference. Consider revising to 'This is an old sentence...'">It's</span> an old sentence used for demonstrating all <span style="background-color: #006400" title="Consider revising for clarity. Perhaps 'all the letters of the alphabet' would work better.">alphabets</span>. However <span style="background-color: #00008B" title="Incorrect form. Use 'it's' instead of 'it' to mean 'it is'.">it's</span> not much <span style="background-color: #8B0000" title="Incorrect word usage. Use 'useful' instead of 'usefull'.">usefull</span> outside that.</p>"#;

/// Build the review prompt for one input text
///
/// Pure function of the input: identical input yields an identical prompt,
/// and the input is appended verbatim as the final suffix. No truncation is
/// performed here; length limits are caller policy.
pub fn build_review_prompt(input_text: &str) -> String {
    format!(
        "{REVIEW_INSTRUCTIONS}\n\nHere's a clear example of what you should do:\n\n{ANNOTATION_EXAMPLE}\n\nYour goal is to help improve the overall quality and clarity of the text.\n\nInput text:\n{input_text}"
    )
}
