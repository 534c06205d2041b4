//! `toString` synthesis.

use sg_model::{ClassTypeDef, Expr, MethodDef, PropertyDef, TypeDef};

use crate::readable::{select, Readable};
use crate::DerivedMethod;

/// Build `static String toString(Self instance)`.
///
/// The result reads `Name[a=1, b=two]`, listing every readable property not
/// excluded from the string form, in declaration order.
pub fn derive_to_string(self_type: &ClassTypeDef, properties: &[PropertyDef]) -> MethodDef {
    let included = select(properties, DerivedMethod::ToString);
    let builder_ty = TypeDef::Class(ClassTypeDef::string_builder());
    let seed = format!("{}[", self_type.simple_name());

    MethodDef::builder("toString")
        .static_method()
        .returns(TypeDef::string())
        .parameter("instance", TypeDef::Class(self_type.clone()))
        .build(|params| {
            let instance = &params[0];
            Expr::new_instance(ClassTypeDef::string_builder(), vec![Expr::constant(seed)])
                .new_local("strBuilder", builder_ty.clone(), |str_builder| {
                    let mut exp = str_builder;
                    if included.is_empty() {
                        exp = append(exp, &builder_ty, Expr::constant("]"));
                    }
                    for (i, property) in included.iter().enumerate() {
                        let separator = if i + 1 == included.len() { "]" } else { ", " };
                        exp = append(
                            exp,
                            &builder_ty,
                            Expr::constant(format!("{}=", property.def.name)),
                        );
                        exp = append(exp, &builder_ty, property_text(property, instance));
                        exp = append(exp, &builder_ty, Expr::constant(separator));
                    }
                    vec![exp.invoke("toString", TypeDef::string(), vec![]).returning()]
                })
        })
}

fn append(target: Expr, builder_ty: &TypeDef, value: Expr) -> Expr {
    target.invoke("append", builder_ty.clone(), vec![value])
}

/// The value appended for one property; arrays go through the library
/// stringify call so their elements are listed.
fn property_text(property: &Readable<'_>, instance: &Expr) -> Expr {
    let value = property.read(instance);
    match property.ty().as_array() {
        Some(array) => {
            let method = if array.is_nested() { "deepToString" } else { "toString" };
            Expr::invoke_static(ClassTypeDef::arrays(), method, TypeDef::string(), vec![value])
        }
        None => value,
    }
}
