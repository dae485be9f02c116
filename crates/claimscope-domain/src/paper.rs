//! Paper module - the document under analysis

use std::fmt;

/// Built-in sample abstract analyzed when no paper is supplied.
pub const SAMPLE_PAPER: &str = "
We introduce a new architecture called Transformer that relies
entirely on attention mechanisms, dispensing with recurrence
and convolutions. Experiments show the model achieves 28.4 BLEU
on English-to-German translation, surpassing existing best results.
";

/// Raw text of a research paper
///
/// The text is kept exactly as supplied. No length bound is enforced and
/// whitespace is not normalized; whatever the caller provides is what the
/// claim extractor sees.
///
/// # Examples
///
/// ```
/// use claimscope_domain::PaperText;
///
/// let paper = PaperText::new("Attention is all you need.");
/// assert_eq!(paper.as_str(), "Attention is all you need.");
/// assert!(!paper.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaperText(String);

impl PaperText {
    /// Wrap raw paper text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The built-in sample paper
    pub fn sample() -> Self {
        Self::new(SAMPLE_PAPER)
    }

    /// Borrow the raw text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the raw text in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the text contains nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for PaperText {
    fn default() -> Self {
        Self::sample()
    }
}

impl From<String> for PaperText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for PaperText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for PaperText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
