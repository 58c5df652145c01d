//! Edit applier: formatted-text edits -> new extracted value -> new layout
//!
//! The widget reports edits in formatted-text coordinates ("replace chars
//! `start..end` of what you showed me with this text"). The applier maps
//! that range back onto the extracted value, splices in the usable part of
//! the replacement and re-walks the mask. The extracted value stays the
//! source of truth throughout; formatted text is always re-derived.

use crate::error::RangeOutOfBounds;
use crate::mask::{walk, CaretGravity, Mask, Slot, Tail};
use crate::result::ResultBundle;

/// Replacement characters kept after alignment, with the affinity score
/// of the alignment
#[derive(Debug, Clone, Default)]
pub(crate) struct Alignment {
    pub kept: Vec<char>,
    pub affinity: i64,
}

/// Filter `text` against the mask starting at `start_slot`.
///
/// Characters no slot kind accepts are always dropped. When
/// `absorb_literals` is set, a character equal to the literal slot the
/// alignment has reached is treated as formatting and dropped too; other
/// characters skip over literal slots on their way to a value slot.
fn align(mask: &Mask, start_slot: usize, text: &str, absorb_literals: bool) -> Alignment {
    let slots = mask.slots();
    let mut out = Alignment::default();

    if !absorb_literals {
        for ch in text.chars() {
            if mask.accepts_anywhere(ch) {
                out.kept.push(ch);
                out.affinity += 1;
            } else {
                out.affinity -= 1;
            }
        }
        return out;
    }

    let mut slot = start_slot;
    for ch in text.chars() {
        loop {
            match slots.get(slot) {
                Some(Slot::Literal(lit)) if *lit == ch => {
                    out.affinity += 1;
                    slot += 1;
                    break;
                }
                Some(Slot::Literal(_)) => {
                    out.affinity -= 1;
                    slot += 1;
                }
                Some(Slot::Value { kind, optional }) => {
                    if kind.accepts(ch) {
                        out.kept.push(ch);
                        out.affinity += 1;
                        slot += 1;
                    } else if *optional {
                        slot += 1;
                        continue;
                    } else {
                        if mask.accepts_anywhere(ch) {
                            out.kept.push(ch);
                        }
                        out.affinity -= 1;
                    }
                    break;
                }
                None => {
                    if mask.accepts_anywhere(ch) {
                        out.kept.push(ch);
                    }
                    out.affinity -= 1;
                    break;
                }
            }
        }
    }
    out
}

/// [`align`] in the mask's reading direction. `start_slot` counts from
/// the end of the mask for right-to-left masks.
pub(crate) fn align_directed(
    mask: &Mask,
    start_slot: usize,
    text: &str,
    absorb_literals: bool,
) -> Alignment {
    if !mask.is_right_to_left() {
        return align(mask, start_slot, text, absorb_literals);
    }
    let reversed: String = text.chars().rev().collect();
    let mut out = align(&mask.mirrored(), start_slot, &reversed, absorb_literals);
    out.kept.reverse();
    out
}

/// Align a whole raw string from the start of the mask
pub(crate) fn align_text(mask: &Mask, text: &str) -> Alignment {
    let absorb_literals = text.chars().nth(1).is_some();
    align_directed(mask, 0, text, absorb_literals)
}

/// How [`apply_edit_with`] interprets an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOptions {
    /// Backspacing over a literal run also deletes the value character
    /// in front of the run
    pub autoskip: bool,
    /// Tail policy the old formatted text was rendered with
    pub old_tail: Tail,
    /// Tail policy for the result of insertions and replacements
    pub tail: Tail,
}

impl EditOptions {
    /// Tail policy of the text produced by replacing with `replacement`.
    /// Deletions never bring the trailing literal run back.
    pub fn tail_after(&self, replacement: &str) -> Tail {
        if replacement.is_empty() {
            Tail::Hidden
        } else {
            self.tail
        }
    }
}

/// Apply one edit to a field.
///
/// `range_start..range_end` is a char range in the formatted text derived
/// from `old_extracted`. Deletion is an empty `replacement`; a full-field
/// replace covers `0..formatted_len`.
///
/// Multi-character replacements (pastes, programmatic set) have literal
/// characters aligned with the mask stripped as formatting; a single typed
/// character is always taken as input.
///
/// # Errors
///
/// [`RangeOutOfBounds`] when either end lies past the formatted text or
/// the range is inverted. The engine never clamps.
///
/// # Example
///
/// ```
/// use textmask::{apply_edit, Mask};
///
/// let mask = Mask::compile("[00]-[00]").unwrap();
/// let result = apply_edit(&mask, "12", 3, 3, "3").unwrap();
///
/// assert_eq!(result.formatted_text(), "12-3");
/// assert_eq!(result.caret_position(), 4);
/// ```
pub fn apply_edit(
    mask: &Mask,
    old_extracted: &str,
    range_start: usize,
    range_end: usize,
    replacement: &str,
) -> Result<ResultBundle, RangeOutOfBounds> {
    apply_edit_with(
        mask,
        old_extracted,
        range_start,
        range_end,
        replacement,
        EditOptions::default(),
    )
}

/// [`apply_edit`] with explicit [`EditOptions`]
pub fn apply_edit_with(
    mask: &Mask,
    old_extracted: &str,
    range_start: usize,
    range_end: usize,
    replacement: &str,
    options: EditOptions,
) -> Result<ResultBundle, RangeOutOfBounds> {
    let old_input: Vec<char> = old_extracted.chars().collect();
    let old = walk(mask, &old_input, options.old_tail);
    let len = old.len();

    if range_start > range_end || range_end > len {
        tracing::debug!(
            range_start,
            range_end,
            len,
            "rejected edit outside formatted text"
        );
        return Err(RangeOutOfBounds {
            start: range_start,
            end: range_end,
            len,
        });
    }

    let mut range_start = range_start;
    if options.autoskip && replacement.is_empty() && range_end == range_start + 1 {
        if let Some(value) = old.value_before_literals(range_start) {
            tracing::trace!(from = range_start, to = value, "autoskip over literals");
            range_start = value;
        }
    }

    let old_value: Vec<char> = old.extracted().chars().collect();
    let mapped_start = old.values_before(range_start);
    let mapped_end = old.values_before(range_end);

    let absorb_literals = replacement.chars().nth(1).is_some();
    let start_slot = if mask.is_right_to_left() {
        old.cell_slot(range_end)
            .map_or(0, |slot| mask.slots().len() - slot)
    } else {
        old.slot_at(range_start)
    };
    let aligned = align_directed(mask, start_slot, replacement, absorb_literals);

    let mut input = Vec::with_capacity(old_value.len() + aligned.kept.len());
    input.extend_from_slice(&old_value[..mapped_start]);
    input.extend_from_slice(&aligned.kept);
    input.extend_from_slice(&old_value[mapped_end..]);

    let intent = mapped_start + aligned.kept.len();
    let gravity = if replacement.is_empty() {
        CaretGravity::Backward
    } else {
        CaretGravity::Forward
    };

    tracing::debug!(
        mask = %mask,
        range_start,
        range_end,
        mapped_start,
        mapped_end,
        kept = aligned.kept.len(),
        ?gravity,
        "applying edit"
    );

    Ok(walk(mask, &input, options.tail_after(replacement)).into_bundle(intent, gravity))
}

/// Format a raw string as a paste into an empty field
pub(crate) fn format_raw(mask: &Mask, raw: &str) -> ResultBundle {
    let aligned = align_text(mask, raw);
    let intent = aligned.kept.len();
    walk(mask, &aligned.kept, Tail::AfterValue).into_bundle(intent, CaretGravity::Forward)
}
