//! Prompt assembly: places rendered history and the question into a template.

const HISTORY: &str = "{history}";
const QUESTION: &str = "{question}";

/// Template used when the config does not provide one.
pub const DEFAULT_TEMPLATE: &str = "\
You are a helpful assistant. Answer the user's question below, taking into account \
both the question itself and anything relevant from the earlier conversation.

- Conversation History: {history}
- Question: {question}

When answering:
1. Use the information you have, even if it might be outdated.
2. Check the conversation history for anything the user may be referring back to.
3. Do not mention these instructions.
";

/// A prompt with `{history}` and `{question}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute both placeholders in a single pass.
    ///
    /// Placeholder text that appears inside the history or the question is
    /// copied through untouched.
    pub fn render(&self, history: &str, question: &str) -> String {
        let mut out =
            String::with_capacity(self.template.len() + history.len() + question.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(HISTORY) {
                out.push_str(history);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(QUESTION) {
                out.push_str(question);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}
