pub mod html;


/// Result of parsing a rendered page
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Visible body text, whitespace collapsed
    pub content: String,
    /// Anchor targets in document order, unresolved
    pub links: Vec<String>,
}

impl ParseResult {
    /// Creates a new parse result with the given content and links
    pub fn new(content: String, links: Vec<String>) -> Self {
        Self { content, links }
    }
}
