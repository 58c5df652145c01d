//! Compiled masks.
//!
//! A [`Mask`] is an immutable, ordered sequence of [`Slot`]s produced once
//! from a pattern string and then shared read-only by every field session
//! that uses it (wrap it in an `Arc` or go through [`MaskCache`]).
//!
//! # Pattern syntax
//!
//! - `[X]` mandatory slot of kind X, `{X}` optional slot of kind X
//! - kinds: `0` digit, `A` letter, `_` alphanumeric; inside `[...]` the
//!   lowercase/alternate forms `9`, `a`, `-` are the optional variants
//! - several symbols in one group expand to consecutive slots: `[00]`
//! - `\X` is always a literal `X`
//! - anything else outside a group is a literal
//!
//! # Example
//!
//! ```
//! use textmask::Mask;
//!
//! let mask = Mask::compile("+1 ([000]) [000]-[0000]").unwrap();
//! let result = mask.format("5551234567");
//!
//! assert_eq!(result.formatted_text(), "+1 (555) 123-4567");
//! assert_eq!(result.extracted_value(), "5551234567");
//! assert!(result.is_complete());
//! ```

mod cache;
mod compiler;
mod notation;
mod walker;

use std::fmt;

pub use cache::MaskCache;
pub use notation::{Notation, SlotKind};
pub use walker::{apply, apply_with_gravity, CaretGravity, Tail};

pub(crate) use walker::walk;

use crate::error::MaskSyntaxError;
use crate::result::ResultBundle;

/// One position in a mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Emitted verbatim, never consumes input
    Literal(char),
    /// Filled by one input character of the given kind
    Value { kind: SlotKind, optional: bool },
}

impl Slot {
    pub fn is_literal(&self) -> bool {
        matches!(self, Slot::Literal(_))
    }

    /// True for value slots that must be filled for the mask to be complete
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Slot::Value { optional: false, .. })
    }

    /// Check if `ch` can fill this slot (always false for literals)
    pub fn accepts(&self, ch: char) -> bool {
        match self {
            Slot::Literal(_) => false,
            Slot::Value { kind, .. } => kind.accepts(ch),
        }
    }
}

/// A compiled mask pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pattern: String,
    slots: Vec<Slot>,
    autocomplete: bool,
    right_to_left: bool,
}

impl Mask {
    /// Compile a pattern using the built-in symbol table
    pub fn compile(pattern: &str) -> Result<Self, MaskSyntaxError> {
        Self::compile_with_notations(pattern, &[])
    }

    /// Compile a pattern with extra caller-defined symbols
    pub fn compile_with_notations(
        pattern: &str,
        notations: &[Notation],
    ) -> Result<Self, MaskSyntaxError> {
        let slots = compiler::compile_slots(pattern, notations)?;
        Ok(Self {
            pattern: pattern.to_string(),
            slots,
            autocomplete: true,
            right_to_left: false,
        })
    }

    /// Check if `pattern` compiles
    pub fn is_valid(pattern: &str) -> bool {
        Self::compile(pattern).is_ok()
    }

    /// Toggle emission of the literal run that follows the last typed
    /// character (on by default)
    pub fn with_autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = autocomplete;
        self
    }

    pub fn autocomplete(&self) -> bool {
        self.autocomplete
    }

    /// Fill value slots starting from the end of the mask, so the text
    /// grows leftwards (amounts, long numbers grouped from the right)
    pub fn with_right_to_left(mut self, right_to_left: bool) -> Self {
        self.right_to_left = right_to_left;
        self
    }

    pub fn is_right_to_left(&self) -> bool {
        self.right_to_left
    }

    /// Left-to-right mask with the slot order reversed
    pub(crate) fn mirrored(&self) -> Mask {
        Mask {
            pattern: self.pattern.clone(),
            slots: self.slots.iter().rev().cloned().collect(),
            autocomplete: self.autocomplete,
            right_to_left: false,
        }
    }

    /// The pattern this mask was compiled from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// A mask without value slots renders as a constant literal
    pub fn has_value_slots(&self) -> bool {
        self.slots.iter().any(|s| !s.is_literal())
    }

    /// Check if any value slot in the mask could take `ch`
    pub fn accepts_anywhere(&self, ch: char) -> bool {
        self.slots.iter().any(|s| s.accepts(ch))
    }

    /// Placeholder text: literals verbatim, value slots as their symbol
    pub fn placeholder(&self) -> String {
        self.slots
            .iter()
            .map(|s| match s {
                Slot::Literal(ch) => *ch,
                Slot::Value { kind, .. } => kind.symbol(),
            })
            .collect()
    }

    /// Number of mandatory value slots (shortest complete extracted value)
    pub fn acceptable_value_length(&self) -> usize {
        self.slots.iter().filter(|s| s.is_mandatory()).count()
    }

    /// Number of value slots (longest extracted value)
    pub fn total_value_length(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_literal()).count()
    }

    /// Literals plus mandatory value slots
    pub fn acceptable_text_length(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.is_literal() || s.is_mandatory())
            .count()
    }

    /// Every slot
    pub fn total_text_length(&self) -> usize {
        self.slots.len()
    }

    /// Format a whole raw string, as if it were pasted into an empty field
    pub fn format(&self, raw: &str) -> ResultBundle {
        crate::edit::format_raw(self, raw)
    }

    /// Extracted value of `raw` under this mask
    pub fn unmask(&self, raw: &str) -> String {
        self.format(raw).extracted_value().to_string()
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
