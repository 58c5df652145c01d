//! The immutable value returned for every formatting call

use serde::Serialize;

/// Outcome of applying a mask: what to display, where the caret goes, and
/// the meaningful characters behind the formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultBundle {
    formatted_text: String,
    extracted_value: String,
    caret_position: usize,
    is_complete: bool,
}

impl ResultBundle {
    pub(crate) fn new(
        formatted_text: String,
        extracted_value: String,
        caret_position: usize,
        is_complete: bool,
    ) -> Self {
        debug_assert!(caret_position <= formatted_text.chars().count());
        Self {
            formatted_text,
            extracted_value,
            caret_position,
            is_complete,
        }
    }

    pub fn formatted_text(&self) -> &str {
        &self.formatted_text
    }

    pub fn extracted_value(&self) -> &str {
        &self.extracted_value
    }

    /// Caret as a char index into [`formatted_text`](Self::formatted_text)
    pub fn caret_position(&self) -> usize {
        self.caret_position
    }

    /// Every mandatory slot holds a character
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Length of the formatted text in chars, the upper bound for edit ranges
    pub fn formatted_len(&self) -> usize {
        self.formatted_text.chars().count()
    }
}
