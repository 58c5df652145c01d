//! textmask - masked text input formatting
//!
//! This crate turns a mask pattern such as `+1 ([000]) [000]-[0000]` into a
//! compiled [`Mask`], and then keeps a field's displayed text, extracted
//! value and caret consistent while the user types, deletes and pastes.
//!
//! The pieces, bottom-up:
//! - [`mask`] compiles patterns and lays values out over them
//! - [`edit`] maps edits on the displayed text back onto the value
//! - [`affine`] picks the best of several masks for some text
//! - [`field`] holds one field's state across edits
//! - [`config`] loads named field definitions from YAML

pub mod affine;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod edit;
pub mod error;
pub mod field;
pub mod mask;
pub mod result;
pub mod tracing;

// Re-export commonly used types
pub use affine::{pick_mask, AffinityStrategy};
pub use config::{FieldConfig, MaskConfig};
pub use edit::{apply_edit, apply_edit_with, EditOptions};
pub use error::{MaskError, MaskSyntaxError, RangeOutOfBounds, SyntaxErrorKind};
pub use field::{CompletionChange, FieldUpdate, MaskedField};
pub use mask::{
    apply, apply_with_gravity, CaretGravity, Mask, MaskCache, Notation, Slot, SlotKind, Tail,
};
pub use result::ResultBundle;

/// Compile a pattern with the built-in symbol table
pub fn compile(pattern: &str) -> Result<Mask, MaskSyntaxError> {
    Mask::compile(pattern)
}
