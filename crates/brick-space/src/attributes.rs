// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Column store of named visual properties.
//!
//! One column per property key, one row per primitive. Columns are created
//! up front from the configured defaults; every later read or write must name
//! an existing column.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ident::{CompositeRange, PrimitiveId};

/// A single visual property value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// No value (e.g. a transparent fill).
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number (widths, opacities).
    Float(f64),
    /// Free text (colour names).
    Text(String),
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Attribute map keyed by property name, in deterministic key order.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Growable column store, sized in lockstep with the primitive population.
///
/// # Invariant
///
/// Every column has exactly `rows` entries.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    columns: BTreeMap<String, Vec<AttrValue>>,
    defaults: Attributes,
    rows: usize,
}

impl AttributeStore {
    /// Creates an empty store with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares columns and their defaults.
    ///
    /// New columns are back-filled with their default for every existing
    /// row. Existing columns only have their default replaced.
    pub fn set_column_defaults(&mut self, defaults: &Attributes) {
        for (key, value) in defaults {
            self.columns
                .entry(key.clone())
                .or_insert_with(|| vec![value.clone(); self.rows]);
            self.defaults.insert(key.clone(), value.clone());
        }
    }

    /// Number of rows (primitives).
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Known property keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Default value of every column.
    pub const fn defaults(&self) -> &Attributes {
        &self.defaults
    }

    /// Returns `true` if `key` names a column.
    pub fn has_column(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    /// Fails on the first key that is not a column.
    pub fn validate_keys<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a String>,
    ) -> Result<(), ValidationError> {
        match keys.into_iter().find(|k| !self.has_column(k)) {
            Some(key) => Err(ValidationError::UnknownAttribute { key: key.clone() }),
            None => Ok(()),
        }
    }

    /// Value of `key` for primitive `id`, or `None` past the last row.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownAttribute`] if `key` is not a column.
    pub fn get(&self, id: PrimitiveId, key: &str) -> Result<Option<&AttrValue>, ValidationError> {
        let column = self
            .columns
            .get(key)
            .ok_or_else(|| ValidationError::UnknownAttribute {
                key: key.to_owned(),
            })?;
        Ok(column.get(id))
    }

    /// Full attribute map of primitive `id`, or `None` past the last row.
    pub fn row(&self, id: PrimitiveId) -> Option<Attributes> {
        if id >= self.rows {
            return None;
        }
        self.columns
            .iter()
            .map(|(k, col)| Some((k.clone(), col.get(id)?.clone())))
            .collect()
    }

    /// Overwrites `key` for primitive `id` and returns the prior value.
    ///
    /// `key` must already have been validated.
    pub fn set(&mut self, id: PrimitiveId, key: &str, value: AttrValue) -> Option<AttrValue> {
        let slot = self.columns.get_mut(key)?.get_mut(id)?;
        Some(std::mem::replace(slot, value))
    }

    /// Overwrites `key` for every member of `range` and returns the prior
    /// value of the first member.
    ///
    /// `key` must already have been validated.
    pub fn broadcast_set(
        &mut self,
        range: CompositeRange,
        key: &str,
        value: &AttrValue,
    ) -> Option<AttrValue> {
        let column = self.columns.get_mut(key)?;
        let members = column.get_mut(range.ids())?;
        let prior = members.first().cloned();
        for slot in members {
            *slot = value.clone();
        }
        prior
    }

    /// Appends `count` rows carrying `attrs`, with defaults filling any
    /// column `attrs` leaves out.
    ///
    /// Keys must already have been validated.
    pub fn push_rows(&mut self, count: usize, attrs: &Attributes) {
        for (key, column) in &mut self.columns {
            let value = attrs
                .get(key)
                .or_else(|| self.defaults.get(key))
                .cloned()
                .unwrap_or_default();
            column.resize(self.rows + count, value);
        }
        self.rows += count;
    }
}

/// The column set every space starts with.
pub fn standard_defaults() -> Attributes {
    Attributes::from([
        ("facecolor".to_owned(), AttrValue::Null),
        ("linewidth".to_owned(), AttrValue::Float(0.1)),
        ("edgecolor".to_owned(), AttrValue::from("black")),
        ("alpha".to_owned(), AttrValue::Float(0.0)),
    ])
}
