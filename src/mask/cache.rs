//! Compile-once cache of masks keyed on the pattern string

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::Mask;
use crate::error::MaskSyntaxError;

/// Shared cache of compiled masks
///
/// Masks are immutable, so one `Arc<Mask>` can back any number of field
/// sessions on any thread. Only masks compiled with the built-in symbol
/// table and default options go through here.
#[derive(Debug, Default)]
pub struct MaskCache {
    masks: RwLock<HashMap<String, Arc<Mask>>>,
}

impl MaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached mask for `pattern`, compiling it on first use
    ///
    /// Syntax errors are not cached; a bad pattern fails on every call.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<Mask>, MaskSyntaxError> {
        if let Some(mask) = self
            .masks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pattern)
        {
            return Ok(Arc::clone(mask));
        }

        let compiled = Arc::new(Mask::compile(pattern)?);
        let mut masks = self.masks.write().unwrap_or_else(PoisonError::into_inner);
        let mask = masks
            .entry(pattern.to_string())
            .or_insert_with(|| Arc::clone(&compiled));
        Ok(Arc::clone(mask))
    }

    pub fn len(&self) -> usize {
        self.masks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.masks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
