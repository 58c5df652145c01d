//! Pattern compiler tests - syntax, errors, metrics and caching

mod common;

use std::sync::Arc;

use common::mask;
use textmask::{Mask, MaskCache, MaskError, Notation, Slot, SlotKind, SyntaxErrorKind};

// ========================================================================
// Syntax
// ========================================================================

#[test]
fn test_phone_mask_slots() {
    let m = mask("+1 ([000]) [000]-[0000]");
    assert_eq!(m.total_text_length(), 17);
    assert_eq!(m.total_value_length(), 10);
    assert_eq!(m.placeholder(), "+1 (000) 000-0000");
    assert!(m.slots()[0].is_literal());
    assert!(m.slots()[4].is_mandatory());
}

#[test]
fn test_optional_symbols_in_square_brackets() {
    let m = mask("[09Aa_-]");
    let optional: Vec<bool> = m.slots().iter().map(|s| !s.is_mandatory()).collect();
    assert_eq!(optional, vec![false, true, false, true, false, true]);
    assert_eq!(m.placeholder(), "00AA__");
}

#[test]
fn test_curly_brackets_make_every_symbol_optional() {
    let m = mask("{0A_}");
    assert!(m.slots().iter().all(|s| !s.is_literal() && !s.is_mandatory()));
    assert_eq!(m.acceptable_value_length(), 0);
    assert_eq!(m.total_value_length(), 3);
}

#[test]
fn test_escapes_are_literals_everywhere() {
    let m = mask("\\[[0]\\]\\\\");
    assert_eq!(
        m.slots(),
        &[
            Slot::Literal('['),
            Slot::Value {
                kind: SlotKind::Digit,
                optional: false
            },
            Slot::Literal(']'),
            Slot::Literal('\\'),
        ]
    );
}

#[test]
fn test_non_ascii_literals() {
    let m = mask("№ [000] ₽");
    assert_eq!(m.placeholder(), "№ 000 ₽");
    assert_eq!(m.format("123").formatted_text(), "№ 123 ₽");
}

#[test]
fn test_custom_notation() {
    let hex = Notation::new('H', "0123456789abcdefABCDEF", false);
    let m = Mask::compile_with_notations("#[HHHHHH]", &[hex]).unwrap();
    assert_eq!(m.placeholder(), "#HHHHHH");

    let result = m.format("ff00zz88");
    assert_eq!(result.extracted_value(), "ff0088");
    assert_eq!(result.formatted_text(), "#ff0088");
}

#[test]
fn test_optional_custom_notation() {
    let sign = Notation::new('S', "+-", true);
    let m = Mask::compile_with_notations("[S000]", &[sign]).unwrap();
    assert_eq!(m.acceptable_value_length(), 3);
    assert_eq!(m.format("42").formatted_text(), "42");
    assert_eq!(m.format("-42").formatted_text(), "-42");
}

#[test]
fn test_unknown_symbol_without_notation() {
    let err = Mask::compile("#[HH]").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnknownSymbol { symbol: 'H' });
    assert_eq!(err.position, 2);
}

// ========================================================================
// Errors
// ========================================================================

#[test]
fn test_error_positions_are_char_offsets() {
    let err = Mask::compile("№№[0").unwrap_err();
    assert_eq!(err.position, 2);

    let err = Mask::compile("№ \\").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnterminatedEscape);
    assert_eq!(err.position, 2);
}

#[test]
fn test_error_kinds() {
    let cases = [
        ("[0", SyntaxErrorKind::UnclosedBracket { open: '[' }),
        ("{0", SyntaxErrorKind::UnclosedBracket { open: '{' }),
        ("[0{0}]", SyntaxErrorKind::NestedBracket { open: '{' }),
        ("0}", SyntaxErrorKind::UnmatchedClosingBracket { close: '}' }),
        (
            "{0]",
            SyntaxErrorKind::MismatchedBracket {
                expected: '}',
                found: ']',
            },
        ),
        ("[0 0]", SyntaxErrorKind::UnknownSymbol { symbol: ' ' }),
        ("\\", SyntaxErrorKind::UnterminatedEscape),
    ];
    for (pattern, kind) in cases {
        assert_eq!(Mask::compile(pattern).unwrap_err().kind, kind, "{pattern:?}");
    }
}

#[test]
fn test_error_message_names_offset() {
    let err = Mask::compile("ab[0").unwrap_err();
    assert_eq!(err.to_string(), "unclosed '[' opened at offset 2");
}

#[test]
fn test_errors_convert_into_mask_error() {
    fn build(pattern: &str) -> Result<usize, MaskError> {
        let m = Mask::compile(pattern)?;
        let r = textmask::apply_edit(&m, "", 0, 1, "1")?;
        Ok(r.formatted_len())
    }

    assert!(matches!(build("[0"), Err(MaskError::Syntax(_))));
    assert!(matches!(build("[00]"), Err(MaskError::Range(_))));
}

// ========================================================================
// Metrics
// ========================================================================

#[test]
fn test_length_metrics() {
    let m = mask("[00]{00}-[A]");
    assert_eq!(m.acceptable_value_length(), 3);
    assert_eq!(m.total_value_length(), 5);
    assert_eq!(m.acceptable_text_length(), 4);
    assert_eq!(m.total_text_length(), 6);
}

#[test]
fn test_constant_mask() {
    let m = mask("N/A");
    assert!(!m.has_value_slots());
    let result = m.format("anything");
    assert_eq!(result.formatted_text(), "N/A");
    assert_eq!(result.extracted_value(), "");
    assert!(result.is_complete());
}

#[test]
fn test_crate_level_compile() {
    let m = textmask::compile("[00]").unwrap();
    assert_eq!(m, mask("[00]"));
}

// ========================================================================
// Cache
// ========================================================================

#[test]
fn test_cache_compiles_once() {
    let cache = MaskCache::new();
    let a = cache.get_or_compile("[000]").unwrap();
    let b = cache.get_or_compile("[000]").unwrap();
    let c = cache.get_or_compile("[00]").unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}
