// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Append-only record of every effectful operation.
//!
//! The log holds exactly one entry per operation that advanced the time-step,
//! in operation order, so the entry at index `n` describes time-step `n`.
//! Entries carry enough to undo their operation without a snapshot: prior
//! attribute values for mutations and the inverse op for transforms.

use std::collections::BTreeMap;

use brick_geom::{AffineKind, AffineOp, Vec3};
use serde::{Deserialize, Serialize};

use crate::attributes::AttrValue;
use crate::ident::TimeStep;
use crate::selection::Selector;

/// Prior attribute values of a mutation, per key.
///
/// Each list holds one value per selected primitive (selection order),
/// followed by one value per selected composite: the composite's first
/// member, standing in for the whole range.
pub type PriorValues = BTreeMap<String, Vec<AttrValue>>;

/// One committed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    /// Objects were created (inserted or cloned).
    Addition {
        /// Time-step of the insertion.
        time_step: TimeStep,
        /// Name bound at insertion, if any.
        name: Option<String>,
    },
    /// Attribute values were overwritten.
    Mutation {
        /// Values before the overwrite.
        prior: PriorValues,
        /// How the mutated objects were selected.
        selector: Selector,
    },
    /// Geometry was transformed.
    Transform {
        /// The op that undoes the applied transform, in caller basis.
        inverse: AffineOp,
        /// How the transformed objects were selected.
        selector: Selector,
    },
}

impl Change {
    /// Selector recorded with a mutation or transform.
    pub const fn selector(&self) -> Option<&Selector> {
        match self {
            Self::Addition { .. } => None,
            Self::Mutation { selector, .. } | Self::Transform { selector, .. } => Some(selector),
        }
    }

    /// Transform family and logged (inverse) vector, for transform entries.
    pub fn transform(&self) -> Option<(AffineKind, Vec3)> {
        match self {
            Self::Transform { inverse, .. } => Some((inverse.kind(), inverse.vector())),
            _ => None,
        }
    }
}

/// Ordered, append-only sequence of [`Change`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeLog {
    entries: Vec<Change>,
}

impl ChangeLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Callers append only after every store update of the
    /// operation has succeeded.
    pub fn append(&mut self, entry: Change) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry describing `time_step`.
    pub fn at_time_step(&self, time_step: TimeStep) -> Option<&Change> {
        usize::try_from(time_step)
            .ok()
            .and_then(|idx| self.entries.get(idx))
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&Change> {
        self.entries.last()
    }

    /// All entries in operation order.
    pub fn entries(&self) -> &[Change] {
        &self.entries
    }

    /// Iterates entries in operation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn transform_entries_compare_on_every_field() {
        let a = Change::Transform {
            inverse: AffineOp::Translate(Vec3::new(-3.0, -3.0, -3.0)),
            selector: Selector::Coordinate(Vec3::new(1.0, 2.0, 3.0)),
        };
        let same = a.clone();
        let other_point = Change::Transform {
            inverse: AffineOp::Translate(Vec3::new(-3.0, -3.0, -3.0)),
            selector: Selector::Coordinate(Vec3::new(1.0, 2.0, 4.0)),
        };
        let by_name = Change::Transform {
            inverse: AffineOp::Translate(Vec3::new(-3.0, -3.0, -3.0)),
            selector: Selector::name("x"),
        };
        assert_eq!(a, same);
        assert_ne!(a, other_point);
        assert_ne!(a, by_name);
        assert_eq!(
            a.transform(),
            Some((AffineKind::Translation, Vec3::splat(-3.0)))
        );
    }

    #[test]
    fn index_matches_time_step() {
        let mut log = ChangeLog::new();
        log.append(Change::Addition {
            time_step: 0,
            name: Some("a".into()),
        });
        log.append(Change::Addition {
            time_step: 1,
            name: None,
        });
        assert_eq!(log.len(), 2);
        assert!(matches!(
            log.at_time_step(1),
            Some(Change::Addition { time_step: 1, .. })
        ));
        assert!(log.at_time_step(2).is_none());
        assert_eq!(log.iter().count(), 2);
    }

    #[test]
    fn serializes_as_tagged_json() {
        let entry = Change::Mutation {
            prior: PriorValues::from([("alpha".to_owned(), vec![AttrValue::Float(0.0)])]),
            selector: Selector::Scene(0),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"type":"mutation","prior":{"alpha":[0.0]},"selector":{"scene":0}}"#
        );
        let back: Change = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
