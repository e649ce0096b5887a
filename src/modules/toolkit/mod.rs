//! Toolkit commands for inspecting ABIs and encoding/decoding calls

pub mod decode;
pub mod encode;
pub mod inspect;

/// Result of a toolkit operation
pub struct ToolResult {
    pub title: String,
    pub content: Vec<(String, String)>, // (label, value) pairs
}

impl ToolResult {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
        }
    }

    pub fn add(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.push((label.into(), value.into()));
        self
    }

    /// Render as a titled block with aligned labels
    pub fn render(&self) -> String {
        let width = self
            .content
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = self.title.clone();
        for (label, value) in &self.content {
            out.push('\n');
            out.push_str(&format!("  {:<width$}  {}", label, value, width = width));
        }
        out
    }
}
