//! Property selection shared by the derived methods.

use sg_model::{Accessor, Expr, PropertyDef, TypeDef};
use tracing::trace;

use crate::DerivedMethod;

/// A property that takes part in a derived method, with its accessor.
pub(crate) struct Readable<'a> {
    pub(crate) def: &'a PropertyDef,
    accessor: &'a Accessor,
}

impl Readable<'_> {
    pub(crate) fn ty(&self) -> &TypeDef {
        &self.def.ty
    }

    /// Read this property from `target`.
    pub(crate) fn read(&self, target: &Expr) -> Expr {
        target
            .clone()
            .access(self.accessor.clone(), self.def.ty.clone())
    }
}

/// Properties taking part in `method`, in declaration order.
///
/// Properties without an accessor are skipped.
pub(crate) fn select(properties: &[PropertyDef], method: DerivedMethod) -> Vec<Readable<'_>> {
    properties
        .iter()
        .filter(|def| {
            let included = if method.uses_string_exclusions() {
                def.in_string_form()
            } else {
                def.in_equality()
            };
            if !def.is_readable() {
                trace!(property = %def.name, "no accessor, property skipped");
            }
            included
        })
        .filter_map(|def| {
            def.accessor
                .as_ref()
                .map(|accessor| Readable { def, accessor })
        })
        .collect()
}
