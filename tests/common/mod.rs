//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use textmask::{Mask, MaskedField, ResultBundle};

/// Compile a pattern that is known to be valid
pub fn mask(pattern: &str) -> Mask {
    Mask::compile(pattern).unwrap()
}

/// Start an empty field session for `pattern`
pub fn field(pattern: &str) -> MaskedField {
    MaskedField::new(Arc::new(mask(pattern)))
}

/// Type `text` one character at a time at the field's caret, returning the
/// bundle produced by each keystroke
pub fn type_text(field: &mut MaskedField, text: &str) -> Vec<ResultBundle> {
    text.chars()
        .map(|ch| {
            let caret = field.caret_position();
            field
                .edit(caret, caret, &ch.to_string())
                .unwrap()
                .bundle
        })
        .collect()
}

/// Press backspace once at the field's caret
pub fn backspace(field: &mut MaskedField) -> ResultBundle {
    let caret = field.caret_position();
    let start = caret.saturating_sub(1);
    field.edit(start, caret, "").unwrap().bundle
}

/// Assert the caret of `bundle` lies inside its formatted text
pub fn assert_caret_in_bounds(bundle: &ResultBundle) {
    assert!(
        bundle.caret_position() <= bundle.formatted_len(),
        "caret {} past end of {:?}",
        bundle.caret_position(),
        bundle.formatted_text()
    );
}
