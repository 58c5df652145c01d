//! Pattern compiler: mask string -> flat slot sequence
//!
//! Single left-to-right pass. Bracket groups are flat (no nesting) and each
//! symbol inside a group becomes its own slot; a backslash turns the next
//! character into a literal wherever it appears.

use super::notation::{resolve_symbol, Notation};
use super::Slot;
use crate::error::{MaskSyntaxError, SyntaxErrorKind};

/// An open bracket group
#[derive(Debug, Clone, Copy)]
struct Group {
    open: char,
    position: usize,
}

impl Group {
    fn close(self) -> char {
        if self.open == '{' {
            '}'
        } else {
            ']'
        }
    }

    fn is_curly(self) -> bool {
        self.open == '{'
    }
}

/// Compile `pattern` into slots, consulting `notations` before the
/// built-in symbol table
pub(crate) fn compile_slots(
    pattern: &str,
    notations: &[Notation],
) -> Result<Vec<Slot>, MaskSyntaxError> {
    let mut slots = Vec::with_capacity(pattern.len());
    let mut group: Option<Group> = None;
    let mut chars = pattern.chars().enumerate();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '\\' => {
                let (_, escaped) = chars.next().ok_or_else(|| {
                    MaskSyntaxError::new(SyntaxErrorKind::UnterminatedEscape, pos)
                })?;
                slots.push(Slot::Literal(escaped));
            }
            '[' | '{' => {
                if group.is_some() {
                    return Err(MaskSyntaxError::new(
                        SyntaxErrorKind::NestedBracket { open: ch },
                        pos,
                    ));
                }
                group = Some(Group {
                    open: ch,
                    position: pos,
                });
            }
            ']' | '}' => match group.take() {
                None => {
                    return Err(MaskSyntaxError::new(
                        SyntaxErrorKind::UnmatchedClosingBracket { close: ch },
                        pos,
                    ));
                }
                Some(g) if g.close() != ch => {
                    return Err(MaskSyntaxError::new(
                        SyntaxErrorKind::MismatchedBracket {
                            expected: g.close(),
                            found: ch,
                        },
                        pos,
                    ));
                }
                Some(_) => {}
            },
            _ => match group {
                Some(g) => {
                    let (kind, optional) = resolve_symbol(ch, g.is_curly(), notations)
                        .ok_or_else(|| {
                            MaskSyntaxError::new(
                                SyntaxErrorKind::UnknownSymbol { symbol: ch },
                                pos,
                            )
                        })?;
                    slots.push(Slot::Value { kind, optional });
                }
                None => slots.push(Slot::Literal(ch)),
            },
        }
    }

    if let Some(g) = group {
        return Err(MaskSyntaxError::new(
            SyntaxErrorKind::UnclosedBracket { open: g.open },
            g.position,
        ));
    }

    tracing::debug!(pattern, slots = slots.len(), "compiled mask");
    Ok(slots)
}
