//! Picking the best of several masks for a piece of text.
//!
//! A field can declare a primary mask plus "affine" alternatives (say, a
//! 10-digit and an 11-digit phone layout). Every candidate is scored
//! against the current text and the highest score wins. The primary mask
//! wins ties; affine masks tie-break by declaration order.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::edit::align_directed;
use crate::mask::Mask;

/// How a mask is scored against text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffinityStrategy {
    /// +1 per character a slot consumes, -1 per auto-inserted literal or
    /// dropped character
    #[default]
    WholeString,
    /// Length of the common prefix of the text and its formatted form
    Prefix,
}

impl AffinityStrategy {
    /// Score `mask` against `text`
    pub fn affinity(self, mask: &Mask, text: &str) -> i64 {
        match self {
            AffinityStrategy::WholeString => align_directed(mask, 0, text, true).affinity,
            AffinityStrategy::Prefix => {
                let formatted = mask.format(text);
                let common = formatted
                    .formatted_text()
                    .chars()
                    .zip(text.chars())
                    .take_while(|(a, b)| a == b)
                    .count();
                i64::try_from(common).unwrap_or(i64::MAX)
            }
        }
    }
}

/// Return the candidate with the highest affinity for `text`
///
/// Works over plain masks as well as shared `Arc<Mask>` handles.
pub fn pick_mask<'a, M: Borrow<Mask>>(
    primary: &'a M,
    affine: &'a [M],
    text: &str,
    strategy: AffinityStrategy,
) -> &'a M {
    let mut best = primary;
    let mut best_score = strategy.affinity(primary.borrow(), text);

    for candidate in affine {
        let score = strategy.affinity(candidate.borrow(), text);
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }

    tracing::debug!(
        picked = %best.borrow(),
        score = best_score,
        candidates = affine.len() + 1,
        "picked mask"
    );
    best
}
