//! Cursor/state walker: lays an extracted value out over a mask.
//!
//! The walk visits slots in order with a cursor into the input. Literals
//! are buffered and flushed in front of the next placed value, so leading
//! and trailing decoration only shows up around real input. A character a
//! mandatory slot rejects is dropped; an optional slot that rejects the
//! next character is skipped instead, letting the character fall through
//! to the following slot.
//!
//! Right-to-left masks are walked mirrored: reversed slots over reversed
//! input, with the resulting layout flipped back.
//!
//! Positions are char offsets, not byte offsets.

use super::{Mask, Slot};
use crate::result::ResultBundle;

/// Which side of a literal run the caret settles on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaretGravity {
    /// Skip past literals so the next keystroke lands in a value slot
    #[default]
    Forward,
    /// Stay right after the last value character before the edit point
    Backward,
}

/// When the literal run that follows the last placed value is shown
///
/// Masks with autocomplete turned off always behave as [`Tail::Hidden`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tail {
    /// Never shown (results of deletions)
    Hidden,
    /// Shown once at least one value character is placed
    #[default]
    AfterValue,
    /// Shown even for an empty value, so a focused field displays the
    /// mask's leading literals
    Eager,
}

/// One emitted character of formatted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    /// Index of the slot that produced this character
    slot: usize,
    /// Index into the walker input, for value characters
    input: Option<usize>,
}

/// Full layout of one walk
#[derive(Debug, Clone)]
pub(crate) struct Walk {
    cells: Vec<Cell>,
    /// Cell indices of placed value characters, in input order
    values: Vec<usize>,
    complete: bool,
}

impl Walk {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }

    /// Value characters that were actually placed
    pub fn extracted(&self) -> String {
        self.values.iter().map(|&i| self.cells[i].ch).collect()
    }

    /// Number of value characters in `cells[..pos]`
    pub fn values_before(&self, pos: usize) -> usize {
        self.values.iter().take_while(|&&i| i < pos).count()
    }

    /// Slot under formatted position `pos`, if any
    pub fn cell_slot(&self, pos: usize) -> Option<usize> {
        self.cells.get(pos).map(|c| c.slot)
    }

    /// Slot under formatted position `pos`, or the slot right after the
    /// last emitted character when `pos` is the end of the text
    pub fn slot_at(&self, pos: usize) -> usize {
        match self.cell_slot(pos) {
            Some(slot) => slot,
            None => self.cells.last().map_or(0, |c| c.slot + 1),
        }
    }

    /// For a literal at `pos`, the position of the value character in
    /// front of the literal run containing it
    pub fn value_before_literals(&self, pos: usize) -> Option<usize> {
        if self.cells.get(pos)?.input.is_some() {
            return None;
        }
        self.cells[..pos].iter().rposition(|c| c.input.is_some())
    }

    /// Map a boundary in the walker input onto the formatted text
    pub fn caret(&self, intent: usize, gravity: CaretGravity) -> usize {
        let placed = self
            .values
            .iter()
            .take_while(|&&i| self.cells[i].input.is_some_and(|input| input < intent))
            .count();

        match gravity {
            CaretGravity::Forward => self
                .values
                .get(placed)
                .copied()
                .unwrap_or(self.cells.len()),
            CaretGravity::Backward => match placed {
                0 => self.values.first().copied().unwrap_or(0),
                n => self.values[n - 1] + 1,
            },
        }
    }

    pub fn into_bundle(self, intent: usize, gravity: CaretGravity) -> ResultBundle {
        let caret = self.caret(intent, gravity);
        ResultBundle::new(self.text(), self.extracted(), caret, self.complete)
    }

    /// Flip a walk of the mirrored mask over reversed input back into
    /// display order
    fn mirrored(self, input_len: usize, slot_count: usize) -> Walk {
        let last = self.cells.len().saturating_sub(1);
        let cells = self
            .cells
            .iter()
            .rev()
            .map(|c| Cell {
                ch: c.ch,
                slot: slot_count - 1 - c.slot,
                input: c.input.map(|i| input_len - 1 - i),
            })
            .collect();
        let values = self.values.iter().rev().map(|&i| last - i).collect();
        Walk {
            cells,
            values,
            complete: self.complete,
        }
    }
}

/// Walk `input` through the mask
pub(crate) fn walk(mask: &Mask, input: &[char], tail: Tail) -> Walk {
    let tail = if mask.autocomplete() {
        tail
    } else {
        Tail::Hidden
    };

    if mask.is_right_to_left() {
        let reversed: Vec<char> = input.iter().rev().copied().collect();
        walk_forward(&mask.mirrored(), &reversed, tail).mirrored(input.len(), mask.slots().len())
    } else {
        walk_forward(mask, input, tail)
    }
}

fn walk_forward(mask: &Mask, input: &[char], tail: Tail) -> Walk {
    let slots = mask.slots();

    if !mask.has_value_slots() {
        let cells = slots
            .iter()
            .enumerate()
            .filter_map(|(slot, s)| match s {
                Slot::Literal(ch) => Some(Cell {
                    ch: *ch,
                    slot,
                    input: None,
                }),
                Slot::Value { .. } => None,
            })
            .collect();
        return Walk {
            cells,
            values: Vec::new(),
            complete: true,
        };
    }

    let mut cells: Vec<Cell> = Vec::with_capacity(slots.len());
    let mut values = Vec::new();
    let mut pending: Vec<Cell> = Vec::new();
    let mut slot = 0;
    let mut next = 0;
    // Slot right after the last placed value
    let mut resume = 0;

    while slot < slots.len() {
        match &slots[slot] {
            Slot::Literal(ch) => {
                pending.push(Cell {
                    ch: *ch,
                    slot,
                    input: None,
                });
                slot += 1;
            }
            Slot::Value { kind, optional } => {
                let Some(&ch) = input.get(next) else {
                    break;
                };
                if kind.accepts(ch) {
                    cells.append(&mut pending);
                    values.push(cells.len());
                    cells.push(Cell {
                        ch,
                        slot,
                        input: Some(next),
                    });
                    next += 1;
                    slot += 1;
                    resume = slot;
                } else if *optional {
                    slot += 1;
                } else {
                    tracing::trace!(slot, ?ch, "dropped character rejected by slot");
                    next += 1;
                }
            }
        }
    }

    // Leftover input may have skipped optional slots without placing
    // anything. Rewind so the layout only depends on the placed values.
    slot = resume;

    let show_tail = match tail {
        Tail::Hidden => false,
        Tail::AfterValue => !values.is_empty(),
        Tail::Eager => true,
    };
    if show_tail {
        while let Some(Slot::Literal(ch)) = slots.get(slot) {
            cells.push(Cell {
                ch: *ch,
                slot,
                input: None,
            });
            slot += 1;
        }
    }

    let complete = slots[slot..].iter().all(|s| !s.is_mandatory());

    tracing::trace!(
        placed = values.len(),
        dropped = next - values.len(),
        complete,
        "walked mask"
    );

    Walk {
        cells,
        values,
        complete,
    }
}

/// Lay `extracted` out over `mask`, with forward caret gravity.
///
/// `caret_intent` is a char index into `extracted`; the returned caret is
/// a char index into the formatted text.
pub fn apply(mask: &Mask, extracted: &str, caret_intent: usize) -> ResultBundle {
    apply_with_gravity(mask, extracted, caret_intent, CaretGravity::Forward)
}

/// [`apply`] with an explicit caret gravity
pub fn apply_with_gravity(
    mask: &Mask,
    extracted: &str,
    caret_intent: usize,
    gravity: CaretGravity,
) -> ResultBundle {
    let input: Vec<char> = extracted.chars().collect();
    walk(mask, &input, Tail::AfterValue).into_bundle(caret_intent, gravity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(pattern: &str) -> Mask {
        Mask::compile(pattern).unwrap()
    }

    #[test]
    fn test_trailing_literal_is_autocompleted() {
        let r = apply(&mask("[00]-[00]"), "12", 2);
        assert_eq!(r.formatted_text(), "12-");
        assert_eq!(r.caret_position(), 3);
        assert!(!r.is_complete());
    }

    #[test]
    fn test_no_autocomplete_keeps_trailing_literal_hidden() {
        let m = mask("[00]-[00]").with_autocomplete(false);
        let r = apply(&m, "12", 2);
        assert_eq!(r.formatted_text(), "12");
        assert_eq!(r.caret_position(), 2);
    }

    #[test]
    fn test_optional_leading_slot_is_trimmed() {
        let r = apply(&mask("{A}[00]"), "5", 1);
        assert_eq!(r.formatted_text(), "5");
        assert!(!r.is_complete());
    }

    #[test]
    fn test_mandatory_slot_drops_mismatch() {
        let r = apply(&mask("[00]"), "a1b2c", 5);
        assert_eq!(r.formatted_text(), "12");
        assert_eq!(r.extracted_value(), "12");
        assert!(r.is_complete());
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        let r = apply(&mask("+1 ([000])"), "", 0);
        assert_eq!(r.formatted_text(), "");
        assert_eq!(r.caret_position(), 0);
        assert!(!r.is_complete());
    }

    #[test]
    fn test_constant_mask() {
        let r = apply(&mask("N/A"), "", 0);
        assert_eq!(r.formatted_text(), "N/A");
        assert_eq!(r.caret_position(), 3);
        assert!(r.is_complete());
    }

    #[test]
    fn test_forward_caret_skips_literal_run() {
        let m = mask("[00]-[00]");
        let r = apply(&m, "1234", 2);
        assert_eq!(r.formatted_text(), "12-34");
        assert_eq!(r.caret_position(), 3);
    }

    #[test]
    fn test_backward_caret_stays_before_literal_run() {
        let m = mask("[00]-[00]");
        let r = apply_with_gravity(&m, "1234", 2, CaretGravity::Backward);
        assert_eq!(r.caret_position(), 2);
    }

    #[test]
    fn test_caret_lands_after_leading_literals() {
        let m = mask("+1 ([000])");
        let r = apply(&m, "55", 0);
        assert_eq!(r.formatted_text(), "+1 (55");
        assert_eq!(r.caret_position(), 4);
        let r = apply_with_gravity(&m, "55", 0, CaretGravity::Backward);
        assert_eq!(r.caret_position(), 4);
    }

    #[test]
    fn test_leftover_input_does_not_skip_optional_slot() {
        // 'x' skips {0}, reaches '-', then [0] drops it
        let m = mask("[A]{0}-[0]");
        let r = apply(&m, "ax", 2);
        assert_eq!(r.formatted_text(), "a");
        assert_eq!(r, apply(&m, "a", 1));
    }

    #[test]
    fn test_excess_input_is_dropped() {
        let r = apply(&mask("[00]!"), "123", 3);
        assert_eq!(r.formatted_text(), "12!");
        assert_eq!(r.extracted_value(), "12");
        assert_eq!(r.caret_position(), 3);
        assert!(r.is_complete());
    }

    #[test]
    fn test_slot_at_end_is_next_slot() {
        let w = walk(&mask("[00]-[00]"), &['1', '2'], Tail::AfterValue);
        assert_eq!(w.slot_at(0), 0);
        assert_eq!(w.slot_at(2), 2);
        assert_eq!(w.slot_at(3), 3);
        assert_eq!(w.values_before(3), 2);
    }

    #[test]
    fn test_hidden_tail_drops_trailing_literal() {
        let w = walk(&mask("[00]-[00]"), &['1', '2'], Tail::Hidden);
        let r = w.into_bundle(2, CaretGravity::Backward);
        assert_eq!(r.formatted_text(), "12");
        assert_eq!(r.caret_position(), 2);
        assert!(!r.is_complete());
    }

    #[test]
    fn test_eager_tail_shows_leading_literals_for_empty_value() {
        let w = walk(&mask("+1 ([000])"), &[], Tail::Eager);
        assert_eq!(w.text(), "+1 (");
        assert_eq!(w.caret(0, CaretGravity::Forward), 4);
        assert_eq!(w.values_before(4), 0);
        assert_eq!(w.slot_at(4), 4);
    }

    #[test]
    fn test_eager_tail_respects_autocomplete_off() {
        let m = mask("+1 ([000])").with_autocomplete(false);
        assert_eq!(walk(&m, &[], Tail::Eager).text(), "");
    }

    #[test]
    fn test_value_before_literals() {
        let w = walk(&mask("[00] - [00]"), &['1', '2', '3'], Tail::AfterValue);
        assert_eq!(w.text(), "12 - 3");
        assert_eq!(w.value_before_literals(4), Some(1));
        assert_eq!(w.value_before_literals(2), Some(1));
        assert_eq!(w.value_before_literals(1), None);
        assert_eq!(w.value_before_literals(9), None);
    }

    #[test]
    fn test_right_to_left_fills_from_the_right() {
        let m = mask("[000] [000]").with_right_to_left(true);
        let r = apply(&m, "1234", 4);
        assert_eq!(r.formatted_text(), "1 234");
        assert_eq!(r.extracted_value(), "1234");
        assert_eq!(r.caret_position(), 5);
        assert!(!r.is_complete());

        let r = apply(&m, "123456", 6);
        assert_eq!(r.formatted_text(), "123 456");
        assert!(r.is_complete());
    }

    #[test]
    fn test_right_to_left_caret_and_slots() {
        let m = mask("[000] [000]").with_right_to_left(true);
        let w = walk(&m, &['1', '2', '3', '4'], Tail::AfterValue);
        assert_eq!(w.values_before(2), 1);
        assert_eq!(w.slot_at(0), 2);
        assert_eq!(w.slot_at(1), 3);
        assert_eq!(w.caret(1, CaretGravity::Forward), 2);
        assert_eq!(w.caret(1, CaretGravity::Backward), 1);
    }
}
