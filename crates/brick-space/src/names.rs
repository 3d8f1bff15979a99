// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Write-once name bindings.

use rustc_hash::FxHashMap;

use crate::error::ValidationError;
use crate::selection::Selection;

/// Exact-match map from a user-supplied name to the objects it denotes.
///
/// Bindings are write-once: there is no rebinding and no unbinding. A failed
/// bind leaves the existing binding untouched.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    bindings: FxHashMap<String, Selection>,
}

impl NameIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if `name` could not be bound to `ids` right now.
    pub fn check_bind(&self, name: &str, ids: &Selection) -> Result<(), ValidationError> {
        if self.bindings.contains_key(name) {
            return Err(ValidationError::DuplicateName {
                name: name.to_owned(),
            });
        }
        if ids.is_empty() {
            return Err(ValidationError::EmptyBinding {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Binds `name` to `ids`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::DuplicateName`] if `name` is already bound.
    /// - [`ValidationError::EmptyBinding`] if `ids` selects nothing.
    pub fn bind(&mut self, name: &str, ids: Selection) -> Result<(), ValidationError> {
        self.check_bind(name, &ids)?;
        self.bindings.insert(name.to_owned(), ids);
        Ok(())
    }

    /// Objects bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownName`] if `name` was never bound.
    pub fn lookup(&self, name: &str) -> Result<&Selection, ValidationError> {
        self.bindings
            .get(name)
            .ok_or_else(|| ValidationError::UnknownName {
                name: name.to_owned(),
            })
    }

    /// Returns `true` if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
