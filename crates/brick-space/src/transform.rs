// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Affine transform engine.

use brick_geom::{AffineOp, Vec3};
use tracing::{debug, instrument, trace};

use crate::changelog::Change;
use crate::error::{SpaceError, ValidationError};
use crate::ident::CompositeRange;
use crate::selection::Selector;
use crate::space::Space;

/// Loose transform arguments, as a front-end would collect them.
///
/// Converting into an [`AffineOp`] enforces that exactly one is set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformArgs {
    /// Translation vector, caller basis.
    pub translate: Option<Vec3>,
    /// Reflection vector of `±1` components, caller basis.
    pub reflect: Option<Vec3>,
    /// Positive scale vector, caller basis.
    pub scale: Option<Vec3>,
}

impl TryFrom<TransformArgs> for AffineOp {
    type Error = ValidationError;

    fn try_from(args: TransformArgs) -> Result<Self, Self::Error> {
        match (args.translate, args.reflect, args.scale) {
            (Some(v), None, None) => Ok(Self::Translate(v)),
            (None, Some(v), None) => Ok(Self::Reflect(v)),
            (None, None, Some(v)) => Ok(Self::Scale(v)),
            (t, r, s) => Err(ValidationError::TransformCount {
                got: usize::from(t.is_some()) + usize::from(r.is_some()) + usize::from(s.is_some()),
            }),
        }
    }
}

fn check_op(op: &AffineOp) -> Result<(), ValidationError> {
    if op.is_well_formed() {
        return Ok(());
    }
    Err(match op {
        AffineOp::Translate(_) => ValidationError::NonFiniteTranslation,
        AffineOp::Reflect(_) => ValidationError::InvalidReflection,
        AffineOp::Scale(_) => ValidationError::NonPositiveScale,
    })
}

impl Space {
    /// Applies `op` (caller basis) to every vertex of every object `selector`
    /// resolves to.
    ///
    /// The log records the inverse op so the prior geometry can be rebuilt
    /// from the log alone. An empty selection or identity op is a no-op.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonPositiveScale`],
    ///   [`ValidationError::InvalidReflection`] or
    ///   [`ValidationError::NonFiniteTranslation`] for a malformed vector.
    /// - Any selector error from [`Space::select`].
    /// - [`ValidationError::ScaleOnComposite`] if a scale would touch a
    ///   composite.
    #[instrument(skip(self), fields(kind = op.kind().as_str()))]
    pub fn transform(&mut self, selector: &Selector, op: AffineOp) -> Result<(), SpaceError> {
        check_op(&op)?;
        let selection = self.select(selector)?;
        if matches!(op, AffineOp::Scale(_)) && !selection.composites.is_empty() {
            return Err(ValidationError::ScaleOnComposite.into());
        }
        if selection.is_empty() || op.is_identity() {
            trace!("nothing to transform");
            return Ok(());
        }

        let storage_op = op.to_storage(&self.basis);
        for id in &selection.primitives {
            self.geometry
                .transform(CompositeRange::new(*id, *id + 1), &storage_op, &op);
        }
        for range in &selection.composites {
            self.geometry.transform(*range, &storage_op, &op);
        }

        self.temporal
            .record_selection(&selection, self.time_step, self.scene_counter);
        self.commit(Change::Transform {
            inverse: op.inverse(),
            selector: selector.clone(),
        });
        debug!(objects = selection.len(), time_step = self.time_step - 1, "transformed");
        Ok(())
    }

    /// [`Space::transform`] taking loose arguments.
    ///
    /// # Errors
    ///
    /// [`ValidationError::TransformCount`] unless exactly one vector is set,
    /// then anything [`Space::transform`] returns.
    pub fn transform_with(&mut self, selector: &Selector, args: TransformArgs) -> Result<(), SpaceError> {
        let op = AffineOp::try_from(args)?;
        self.transform(selector, op)
    }
}
