//! Slot kinds and the symbol table used inside bracket groups.
//!
//! Built-in symbols:
//!
//! | symbol | kind         | in `[...]` | in `{...}` |
//! |--------|--------------|------------|------------|
//! | `0`    | Digit        | mandatory  | optional   |
//! | `9`    | Digit        | optional   | optional   |
//! | `A`    | Letter       | mandatory  | optional   |
//! | `a`    | Letter       | optional   | optional   |
//! | `_`    | Alphanumeric | mandatory  | optional   |
//! | `-`    | Alphanumeric | optional   | optional   |
//!
//! Custom [`Notation`]s are consulted before the built-in table.

use serde::{Deserialize, Serialize};

/// Character class a value slot accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    Digit,
    Letter,
    Alphanumeric,
    /// User-defined class registered through a [`Notation`]
    Custom { symbol: char, characters: String },
}

impl SlotKind {
    /// Check if `ch` can fill a slot of this kind
    pub fn accepts(&self, ch: char) -> bool {
        match self {
            SlotKind::Digit => ch.is_ascii_digit(),
            SlotKind::Letter => ch.is_alphabetic(),
            SlotKind::Alphanumeric => ch.is_ascii_digit() || ch.is_alphabetic(),
            SlotKind::Custom { characters, .. } => characters.contains(ch),
        }
    }

    /// Canonical mandatory symbol, used for placeholders
    pub fn symbol(&self) -> char {
        match self {
            SlotKind::Digit => '0',
            SlotKind::Letter => 'A',
            SlotKind::Alphanumeric => '_',
            SlotKind::Custom { symbol, .. } => *symbol,
        }
    }
}

/// A caller-defined symbol for bracket groups
///
/// `characters` is the exact set of characters the slot accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notation {
    pub symbol: char,
    pub characters: String,
    #[serde(default)]
    pub optional: bool,
}

impl Notation {
    pub fn new(symbol: char, characters: impl Into<String>, optional: bool) -> Self {
        Self {
            symbol,
            characters: characters.into(),
            optional,
        }
    }
}

/// Look up `symbol` for a group opened with `[` (`curly == false`) or `{`.
///
/// Returns the slot kind and whether the resulting slot is optional.
pub(crate) fn resolve_symbol(
    symbol: char,
    curly: bool,
    notations: &[Notation],
) -> Option<(SlotKind, bool)> {
    if let Some(n) = notations.iter().find(|n| n.symbol == symbol) {
        let kind = SlotKind::Custom {
            symbol: n.symbol,
            characters: n.characters.clone(),
        };
        return Some((kind, curly || n.optional));
    }

    let (kind, optional) = match symbol {
        '0' => (SlotKind::Digit, false),
        '9' => (SlotKind::Digit, true),
        'A' => (SlotKind::Letter, false),
        'a' => (SlotKind::Letter, true),
        '_' => (SlotKind::Alphanumeric, false),
        '-' => (SlotKind::Alphanumeric, true),
        _ => return None,
    };
    Some((kind, curly || optional))
}
