//! `equals` synthesis.

use sg_model::{ClassTypeDef, Expr, MethodDef, PropertyDef, Stmt, TypeDef};

use crate::readable::{select, Readable};
use crate::DerivedMethod;

/// Build `static boolean equals(Self instance, Object o)`.
///
/// Short-circuits in a fixed order: identity, then null or runtime type
/// mismatch, then the conjunction of per-property tests.
pub fn derive_equals(self_type: &ClassTypeDef, properties: &[PropertyDef]) -> MethodDef {
    let compared = select(properties, DerivedMethod::Equals);
    let self_ty = TypeDef::Class(self_type.clone());

    MethodDef::builder("equals")
        .static_method()
        .returns(TypeDef::BOOLEAN)
        .parameter("instance", self_ty.clone())
        .parameter("o", TypeDef::Class(ClassTypeDef::object().nullable()))
        .build(|params| {
            let instance = &params[0];
            let o = &params[1];
            Stmt::multi([
                instance
                    .clone()
                    .equal_to(o.clone())
                    .return_if(Expr::true_value()),
                o.clone()
                    .is_null()
                    .or(instance
                        .clone()
                        .runtime_type()
                        .not_equal_to(o.clone().runtime_type()))
                    .return_if(Expr::false_value()),
                o.clone()
                    .cast(self_ty.clone())
                    .new_local("other", self_ty.clone(), |other| {
                        let combined = compared
                            .iter()
                            .map(|property| property_equals(property, instance, &other))
                            .reduce(Expr::and)
                            .unwrap_or_else(Expr::true_value);
                        vec![combined.returning()]
                    }),
            ])
        })
}

/// Equality test for one property.
///
/// Primitives compare by value. References and arrays use the null-safe
/// form `a == b || (a != null && eq(a, b))`.
fn property_equals(property: &Readable<'_>, instance: &Expr, other: &Expr) -> Expr {
    let lhs = property.read(instance);
    let rhs = property.read(other);
    let structural = match property.ty() {
        TypeDef::Primitive(_) => return lhs.equal_to(rhs),
        TypeDef::Array(array) => {
            let method = if array.is_nested() { "deepEquals" } else { "equals" };
            Expr::invoke_static(
                ClassTypeDef::arrays(),
                method,
                TypeDef::BOOLEAN,
                vec![lhs.clone(), rhs.clone()],
            )
        }
        TypeDef::Class(_) => lhs
            .clone()
            .invoke("equals", TypeDef::BOOLEAN, vec![rhs.clone()]),
    };
    lhs.clone()
        .equal_to(rhs)
        .or(lhs.is_non_null().and(structural))
}
