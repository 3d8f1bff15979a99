// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Attribute mutation engine.

use tracing::{debug, instrument, trace};

use crate::attributes::Attributes;
use crate::changelog::{Change, PriorValues};
use crate::error::SpaceError;
use crate::selection::Selector;
use crate::space::Space;

impl Space {
    /// Overwrites attributes of every object `selector` resolves to.
    ///
    /// Composites are written as a unit. The logged prior values hold one
    /// entry per selected primitive followed by one per selected composite
    /// (its first member). An empty selection or empty `deltas` is a no-op:
    /// the time-step does not advance and nothing is logged.
    ///
    /// # Errors
    ///
    /// Any selector error from [`Space::select`], or
    /// [`crate::ValidationError::UnknownAttribute`] if a key in `deltas` is not
    /// a column.
    #[instrument(skip(self, deltas), fields(keys = deltas.len()))]
    pub fn mutate(&mut self, selector: &Selector, deltas: &Attributes) -> Result<(), SpaceError> {
        let selection = self.select(selector)?;
        if selection.is_empty() || deltas.is_empty() {
            trace!("nothing to mutate");
            return Ok(());
        }
        self.attributes.validate_keys(deltas.keys())?;

        let mut prior = PriorValues::new();
        for (key, value) in deltas {
            let mut values = Vec::with_capacity(selection.len());
            for id in &selection.primitives {
                values.extend(self.attributes.set(*id, key, value.clone()));
            }
            for range in &selection.composites {
                values.extend(self.attributes.broadcast_set(*range, key, value));
            }
            prior.insert(key.clone(), values);
        }

        self.temporal
            .record_selection(&selection, self.time_step, self.scene_counter);
        self.commit(Change::Mutation {
            prior,
            selector: selector.clone(),
        });
        debug!(objects = selection.len(), time_step = self.time_step - 1, "mutated");
        Ok(())
    }
}
