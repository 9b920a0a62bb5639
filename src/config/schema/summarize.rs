use serde::{Deserialize, Serialize};

/// Summarization policy read from the `summarize:` section.
///
/// Missing fields decode to zero values, the same state a failed load
/// leaves behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeSettings {
    /// Model identifier sent upstream
    #[serde(default)]
    pub model: String,
    /// Maximum input size in bytes of UTF-8 text
    #[serde(default)]
    pub max_input_length: usize,
    /// Upper bound on generated tokens (0 leaves it to the provider)
    #[serde(default)]
    pub max_summary_length: u32,
    /// Prompt template, re-read on every request
    #[serde(default)]
    pub prompt_template_file: String,
}

impl SummarizeSettings {
    pub fn is_configured(&self) -> bool {
        !self.prompt_template_file.trim().is_empty()
    }
}
