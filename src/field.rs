//! Per-field editing session.
//!
//! [`MaskedField`] is the single owner of one input field's extracted value.
//! The compiled masks it formats with are shared read-only handles, so many
//! fields (on many threads) can use the same mask while each field's value
//! stays confined to its owner. Edits to one field must be serialized by
//! the caller.
//!
//! Nothing here notifies anyone. Each edit returns a [`FieldUpdate`] whose
//! `transition` is set exactly when completeness flipped, and forwarding
//! that to observers is up to the caller.

use std::sync::Arc;

use crate::affine::{pick_mask, AffinityStrategy};
use crate::edit::{align_directed, apply_edit_with, EditOptions};
use crate::error::RangeOutOfBounds;
use crate::mask::{walk, CaretGravity, Mask, Tail};
use crate::result::ResultBundle;

/// Completeness flip caused by one edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionChange {
    /// Incomplete -> complete
    Completed,
    /// Complete -> incomplete
    Uncompleted,
}

/// Result of one edit to a [`MaskedField`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub bundle: ResultBundle,
    pub transition: Option<CompletionChange>,
}

/// One active input field: shared masks plus the owned extracted value
#[derive(Debug, Clone)]
pub struct MaskedField {
    primary: Arc<Mask>,
    affine: Vec<Arc<Mask>>,
    strategy: AffinityStrategy,
    autoskip: bool,
    autocomplete_on_focus: bool,
    focused: bool,
    /// Mask the current value is laid out with
    active: Arc<Mask>,
    /// Tail policy the current text was laid out with
    tail: Tail,
    current: ResultBundle,
}

impl MaskedField {
    /// Start an empty field formatted with `mask`
    pub fn new(mask: Arc<Mask>) -> Self {
        Self::with_affine(mask, Vec::new(), AffinityStrategy::default())
    }

    /// Start an empty field that switches between `primary` and the
    /// `affine` masks depending on which fits the text best
    pub fn with_affine(
        primary: Arc<Mask>,
        affine: Vec<Arc<Mask>>,
        strategy: AffinityStrategy,
    ) -> Self {
        let current =
            walk(&primary, &[], Tail::AfterValue).into_bundle(0, CaretGravity::Forward);
        Self {
            active: Arc::clone(&primary),
            primary,
            affine,
            strategy,
            autoskip: false,
            autocomplete_on_focus: false,
            focused: false,
            tail: Tail::AfterValue,
            current,
        }
    }

    /// Backspacing right after a literal run deletes the value character
    /// in front of the run instead of only moving the caret
    pub fn with_autoskip(mut self, autoskip: bool) -> Self {
        self.autoskip = autoskip;
        self
    }

    /// An empty focused field shows the mask's leading literals
    pub fn with_autocomplete_on_focus(mut self, autocomplete_on_focus: bool) -> Self {
        self.autocomplete_on_focus = autocomplete_on_focus;
        self
    }

    /// Mask the field is currently formatted with
    pub fn mask(&self) -> &Mask {
        &self.active
    }

    /// The last result produced for this field
    pub fn current(&self) -> &ResultBundle {
        &self.current
    }

    pub fn text(&self) -> &str {
        self.current.formatted_text()
    }

    pub fn extracted_value(&self) -> &str {
        self.current.extracted_value()
    }

    pub fn caret_position(&self) -> usize {
        self.current.caret_position()
    }

    pub fn is_complete(&self) -> bool {
        self.current.is_complete()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The widget gained focus
    pub fn focus(&mut self) -> FieldUpdate {
        self.focused = true;
        if self.autocomplete_on_focus && self.current.extracted_value().is_empty() {
            self.relayout(Tail::Eager)
        } else {
            self.unchanged()
        }
    }

    /// The widget lost focus. An empty field drops the literals it showed
    /// while focused.
    pub fn blur(&mut self) -> FieldUpdate {
        self.focused = false;
        if self.current.extracted_value().is_empty() && self.current.formatted_len() > 0 {
            self.relayout(Tail::AfterValue)
        } else {
            self.unchanged()
        }
    }

    /// Replace chars `start..end` of the displayed text with `replacement`
    pub fn edit(
        &mut self,
        start: usize,
        end: usize,
        replacement: &str,
    ) -> Result<FieldUpdate, RangeOutOfBounds> {
        let options = self.edit_options();
        let bundle = if self.affine.is_empty() {
            apply_edit_with(
                &self.active,
                self.current.extracted_value(),
                start,
                end,
                replacement,
                options,
            )?
        } else {
            self.edit_with_affine(start, end, replacement, options)?
        };
        self.tail = options.tail_after(replacement);
        Ok(self.commit(bundle))
    }

    /// Programmatic full-field replace
    pub fn set_text(&mut self, text: &str) -> FieldUpdate {
        let len = self.current.formatted_len();
        // 0..len always lies inside the current text
        self.edit(0, len, text).unwrap_or_else(|_| self.unchanged())
    }

    /// Empty the field
    pub fn clear(&mut self) -> FieldUpdate {
        self.set_text("")
    }

    fn edit_options(&self) -> EditOptions {
        let tail = if self.focused && self.autocomplete_on_focus {
            Tail::Eager
        } else {
            Tail::AfterValue
        };
        EditOptions {
            autoskip: self.autoskip,
            old_tail: self.tail,
            tail,
        }
    }

    fn unchanged(&self) -> FieldUpdate {
        FieldUpdate {
            bundle: self.current.clone(),
            transition: None,
        }
    }

    /// Lay the current value out again with another tail policy
    fn relayout(&mut self, tail: Tail) -> FieldUpdate {
        let value: Vec<char> = self.current.extracted_value().chars().collect();
        let bundle =
            walk(&self.active, &value, tail).into_bundle(value.len(), CaretGravity::Forward);
        self.tail = tail;
        self.commit(bundle)
    }

    fn commit(&mut self, bundle: ResultBundle) -> FieldUpdate {
        let transition = match (self.current.is_complete(), bundle.is_complete()) {
            (false, true) => Some(CompletionChange::Completed),
            (true, false) => Some(CompletionChange::Uncompleted),
            _ => None,
        };
        if let Some(change) = transition {
            tracing::debug!(?change, mask = %self.active, "field completeness changed");
        }
        self.current = bundle.clone();
        FieldUpdate { bundle, transition }
    }

    fn edit_with_affine(
        &mut self,
        start: usize,
        end: usize,
        replacement: &str,
        options: EditOptions,
    ) -> Result<ResultBundle, RangeOutOfBounds> {
        let len = self.current.formatted_len();
        if start > end || end > len {
            return Err(RangeOutOfBounds { start, end, len });
        }

        let mut raw_start = start;
        if options.autoskip && replacement.is_empty() && end == start + 1 {
            let value: Vec<char> = self.current.extracted_value().chars().collect();
            let old = walk(&self.active, &value, self.tail);
            if let Some(before) = old.value_before_literals(start) {
                raw_start = before;
            }
        }

        let shown: Vec<char> = self.current.formatted_text().chars().collect();
        let prefix: String = shown[..raw_start]
            .iter()
            .copied()
            .chain(replacement.chars())
            .collect();
        let suffix: String = shown[end..].iter().collect();
        let raw = format!("{prefix}{suffix}");

        let picked = Arc::clone(pick_mask(
            &self.primary,
            &self.affine[..],
            &raw,
            self.strategy,
        ));
        if Arc::ptr_eq(&picked, &self.active) {
            return apply_edit_with(
                &self.active,
                self.current.extracted_value(),
                start,
                end,
                replacement,
                options,
            );
        }

        tracing::debug!(from = %self.active, to = %picked, "switching mask");

        // The old layout means nothing under the new mask; re-read the raw
        // text from scratch and keep the caret behind the replacement.
        let absorb_literals = raw.chars().nth(1).is_some();
        let kept = align_directed(&picked, 0, &raw, absorb_literals).kept;
        let intent = if picked.is_right_to_left() {
            let behind = align_directed(&picked, 0, &suffix, absorb_literals).kept.len();
            kept.len().saturating_sub(behind)
        } else {
            align_directed(&picked, 0, &prefix, absorb_literals).kept.len()
        };
        let gravity = if replacement.is_empty() {
            CaretGravity::Backward
        } else {
            CaretGravity::Forward
        };

        self.active = picked;
        let tail = options.tail_after(replacement);
        Ok(walk(&self.active, &kept, tail).into_bundle(intent, gravity))
    }
}
