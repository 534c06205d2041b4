//! `hashCode` synthesis.

use sg_model::{BinaryOp, ClassTypeDef, Expr, MethodDef, PrimitiveKind, PropertyDef, Stmt, TypeDef};

use crate::readable::select;
use crate::DerivedMethod;

/// Contribution of a `null` reference property.
pub const NULL_HASH_VALUE: i32 = 43;
/// Contribution of a `true` boolean property.
pub const TRUE_HASH_VALUE: i32 = 79;
/// Contribution of a `false` boolean property.
pub const FALSE_HASH_VALUE: i32 = 97;
/// Factor applied to the accumulator before each contribution.
pub const HASH_MULTIPLIER: i32 = 59;
/// Initial accumulator value.
pub const HASH_SEED: i32 = 1;
/// Hash of a `null` instance.
pub const NULL_INSTANCE_HASH: i32 = 0;

/// Build `static int hashCode(Self instance)`.
///
/// `hashValue = hashValue * 59 + contribution` for each property taking part
/// in equality, seeded with 1.
pub fn derive_hash_code(self_type: &ClassTypeDef, properties: &[PropertyDef]) -> MethodDef {
    let hashed = select(properties, DerivedMethod::HashCode);

    MethodDef::builder("hashCode")
        .static_method()
        .returns(TypeDef::INT)
        .parameter("instance", TypeDef::Class(self_type.clone().nullable()))
        .build(|params| {
            let instance = &params[0];
            Stmt::multi([
                instance
                    .clone()
                    .is_null()
                    .return_if(Expr::constant(NULL_INSTANCE_HASH)),
                Expr::constant(HASH_SEED).new_mutable_local("hashValue", TypeDef::INT, |hash| {
                    let mut stmts: Vec<Stmt> = hashed
                        .iter()
                        .map(|property| {
                            let contribution =
                                hash_contribution(property.ty(), property.read(instance));
                            hash.assign(
                                hash.reference()
                                    .binary(BinaryOp::Mul, Expr::constant(HASH_MULTIPLIER))
                                    .binary(BinaryOp::Add, contribution),
                            )
                        })
                        .collect();
                    stmts.push(hash.reference().returning());
                    stmts
                }),
            ])
        })
}

/// The `int` a property value adds to the running hash.
///
/// | type | contribution |
/// |---|---|
/// | boolean | 79 if true, 97 if false |
/// | float | bit pattern as int |
/// | double | bit pattern as long, folded |
/// | long | folded: `(v >>> 32) ^ v` |
/// | char | `c - '0'` |
/// | short | `v & 0xffff` |
/// | byte, int | the value |
/// | array | library hash, deep when nested |
/// | reference | 43 if null, else `v.hashCode()` |
pub fn hash_contribution(ty: &TypeDef, value: Expr) -> Expr {
    let contribution = match ty {
        TypeDef::Array(array) => {
            let method = if array.is_nested() { "deepHashCode" } else { "hashCode" };
            Expr::invoke_static(ClassTypeDef::arrays(), method, TypeDef::INT, vec![value])
        }
        TypeDef::Primitive(kind) => match kind {
            PrimitiveKind::Boolean => value.if_else(
                Expr::constant(TRUE_HASH_VALUE),
                Expr::constant(FALSE_HASH_VALUE),
            ),
            PrimitiveKind::Float => Expr::invoke_static(
                ClassTypeDef::float_box(),
                "floatToIntBits",
                TypeDef::INT,
                vec![value],
            ),
            PrimitiveKind::Double => fold_long(Expr::invoke_static(
                ClassTypeDef::double_box(),
                "doubleToLongBits",
                TypeDef::LONG,
                vec![value],
            )),
            PrimitiveKind::Long => fold_long(value),
            PrimitiveKind::Char => value.binary(BinaryOp::Sub, Expr::constant('0')),
            PrimitiveKind::Short => value.binary(BinaryOp::BitAnd, Expr::constant(0xffff)),
            PrimitiveKind::Byte | PrimitiveKind::Int => value,
        },
        TypeDef::Class(_) => value.clone().is_null().if_else(
            Expr::constant(NULL_HASH_VALUE),
            value.invoke("hashCode", TypeDef::INT, vec![]),
        ),
    };
    if contribution.ty() == TypeDef::INT {
        contribution
    } else {
        contribution.cast(TypeDef::INT)
    }
}

/// `(bits >>> 32) ^ bits`, still a long; the caller narrows it.
fn fold_long(bits: Expr) -> Expr {
    bits.clone()
        .binary(BinaryOp::UnsignedShr, Expr::constant(32))
        .binary(BinaryOp::BitXor, bits)
}
