//! Grounded prompt assembly.
//!
//! The prompt format is a contract surface: passages are clearly delimited
//! from one another and from the question, and the instruction directs the
//! generator to answer only from the supplied context.

/// The deterministic reply for questions asked when retrieval finds
/// nothing, returned without calling the generator.
pub const NO_CONTEXT_ANSWER: &str = "Sorry, I couldn't find any relevant information in the uploaded documents to answer your question.";

/// Separator placed between retrieved passages in the prompt.
pub const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Assemble a grounded generation prompt from retrieved passages and the
/// user's question.
///
/// Passages must already be in descending-similarity order; they appear in
/// that order under the context heading, separated by
/// [`PASSAGE_SEPARATOR`], followed by the literal question.
pub fn build_grounded_prompt(passages: &[&str], question: &str) -> String {
    let context = passages.join(PASSAGE_SEPARATOR);
    format!(
        "Using ONLY the information provided in the following context (from uploaded PDF documents), \
         answer the user's question accurately, clearly, and respectfully. \
         If the answer is not present in the context, respond with: \
         'Sorry, I could not find relevant information in the provided documents.'\n\n\
         Context (from PDF documents):\n\
         {context}\n\n\
         User's Question:\n\
         {question}\n\n\
         Your Answer (cite the context if possible):"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passages_appear_in_order_and_separated() {
        let prompt = build_grounded_prompt(&["first passage", "second passage"], "What?");

        let first = prompt.find("first passage").unwrap();
        let second = prompt.find("second passage").unwrap();
        assert!(first < second);
        assert!(prompt.contains(PASSAGE_SEPARATOR));
    }

    #[test]
    fn test_question_follows_the_context() {
        let prompt = build_grounded_prompt(&["the only passage"], "Where is it?");

        let context = prompt.find("the only passage").unwrap();
        let question = prompt.find("Where is it?").unwrap();
        assert!(context < question);
        assert!(prompt.ends_with("Your Answer (cite the context if possible):"));
    }

    #[test]
    fn test_single_passage_needs_no_separator() {
        let prompt = build_grounded_prompt(&["alone"], "Q?");
        assert!(!prompt.contains(PASSAGE_SEPARATOR));
    }
}
