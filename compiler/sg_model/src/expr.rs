//! Expression nodes.
//!
//! Expressions are immutable trees built through the combinators on
//! [`Expr`]. Every node knows its static result type so emitters can pick
//! dialect-specific spellings (identity vs. value equality, numeric casts).

use std::fmt;

use crate::stmt::{LocalDef, Stmt};
use crate::{Accessor, ClassTypeDef, PrimitiveKind, TypeDef};

/// A literal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Char(char),
    String(String),
}

impl Constant {
    pub fn ty(&self) -> TypeDef {
        match self {
            Constant::Null => TypeDef::Class(ClassTypeDef::object().nullable()),
            Constant::Boolean(_) => TypeDef::BOOLEAN,
            Constant::Int(_) => TypeDef::INT,
            Constant::Long(_) => TypeDef::LONG,
            Constant::Char(_) => TypeDef::CHAR,
            Constant::String(_) => TypeDef::string(),
        }
    }
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        Constant::Boolean(value)
    }
}

impl From<i32> for Constant {
    fn from(value: i32) -> Self {
        Constant::Int(value)
    }
}

impl From<i64> for Constant {
    fn from(value: i64) -> Self {
        Constant::Long(value)
    }
}

impl From<char> for Constant {
    fn from(value: char) -> Self {
        Constant::Char(value)
    }
}

impl From<&str> for Constant {
    fn from(value: &str) -> Self {
        Constant::String(value.to_owned())
    }
}

impl From<String> for Constant {
    fn from(value: String) -> Self {
        Constant::String(value)
    }
}

/// A reference to a parameter or bound local.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariableRef {
    pub name: String,
    pub ty: TypeDef,
}

/// Binary operators.
///
/// Comparisons produce `boolean`; the arithmetic and bitwise operators follow
/// binary numeric promotion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    BitAnd,
    BitXor,
    /// Logical (zero-filling) right shift.
    UnsignedShr,
}

impl BinaryOp {
    /// C-family spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::UnsignedShr => ">>>",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An expression node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Constant(Constant),
    Variable(VariableRef),
    /// Read a property through its accessor.
    Access {
        target: Box<Expr>,
        accessor: Accessor,
        ty: TypeDef,
    },
    /// Instance method call.
    Invoke {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
        ty: TypeDef,
    },
    /// Static (library) method call.
    InvokeStatic {
        owner: ClassTypeDef,
        method: String,
        args: Vec<Expr>,
        ty: TypeDef,
    },
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// Short-circuit conjunction, evaluated left to right.
    And(Vec<Expr>),
    /// Short-circuit disjunction, evaluated left to right.
    Or(Vec<Expr>),
    IsNull(Box<Expr>),
    IsNonNull(Box<Expr>),
    Cast {
        expr: Box<Expr>,
        ty: TypeDef,
    },
    New {
        class: ClassTypeDef,
        args: Vec<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// The runtime class of a value.
    RuntimeType(Box<Expr>),
}

impl Expr {
    pub fn constant(value: impl Into<Constant>) -> Expr {
        Expr::Constant(value.into())
    }

    pub fn true_value() -> Expr {
        Expr::Constant(Constant::Boolean(true))
    }

    pub fn false_value() -> Expr {
        Expr::Constant(Constant::Boolean(false))
    }

    pub fn null() -> Expr {
        Expr::Constant(Constant::Null)
    }

    pub fn variable(name: impl Into<String>, ty: TypeDef) -> Expr {
        Expr::Variable(VariableRef {
            name: name.into(),
            ty,
        })
    }

    pub fn invoke_static(
        owner: ClassTypeDef,
        method: impl Into<String>,
        ty: TypeDef,
        args: Vec<Expr>,
    ) -> Expr {
        Expr::InvokeStatic {
            owner,
            method: method.into(),
            args,
            ty,
        }
    }

    pub fn new_instance(class: ClassTypeDef, args: Vec<Expr>) -> Expr {
        Expr::New { class, args }
    }

    /// Read a property of this value.
    #[must_use]
    pub fn access(self, accessor: Accessor, ty: TypeDef) -> Expr {
        Expr::Access {
            target: Box::new(self),
            accessor,
            ty,
        }
    }

    /// Call an instance method on this value.
    #[must_use]
    pub fn invoke(self, method: impl Into<String>, ty: TypeDef, args: Vec<Expr>) -> Expr {
        Expr::Invoke {
            target: Box::new(self),
            method: method.into(),
            args,
            ty,
        }
    }

    #[must_use]
    pub fn binary(self, op: BinaryOp, rhs: Expr) -> Expr {
        Expr::Binary {
            lhs: Box::new(self),
            op,
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn equal_to(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Eq, rhs)
    }

    #[must_use]
    pub fn not_equal_to(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::NotEq, rhs)
    }

    /// `self && rhs`, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, rhs: Expr) -> Expr {
        let mut operands = match self {
            Expr::And(operands) => operands,
            other => vec![other],
        };
        match rhs {
            Expr::And(more) => operands.extend(more),
            other => operands.push(other),
        }
        Expr::And(operands)
    }

    /// `self || rhs`, flattening nested disjunctions.
    #[must_use]
    pub fn or(self, rhs: Expr) -> Expr {
        let mut operands = match self {
            Expr::Or(operands) => operands,
            other => vec![other],
        };
        match rhs {
            Expr::Or(more) => operands.extend(more),
            other => operands.push(other),
        }
        Expr::Or(operands)
    }

    #[must_use]
    pub fn is_null(self) -> Expr {
        Expr::IsNull(Box::new(self))
    }

    #[must_use]
    pub fn is_non_null(self) -> Expr {
        Expr::IsNonNull(Box::new(self))
    }

    #[must_use]
    pub fn cast(self, ty: TypeDef) -> Expr {
        Expr::Cast {
            expr: Box::new(self),
            ty,
        }
    }

    /// `self ? then : otherwise`.
    #[must_use]
    pub fn if_else(self, then: Expr, otherwise: Expr) -> Expr {
        Expr::Conditional {
            condition: Box::new(self),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    #[must_use]
    pub fn runtime_type(self) -> Expr {
        Expr::RuntimeType(Box::new(self))
    }

    pub fn returning(self) -> Stmt {
        Stmt::Return(self)
    }

    /// `if (self) return value;`
    pub fn return_if(self, value: Expr) -> Stmt {
        Stmt::ReturnIf {
            condition: self,
            value,
        }
    }

    /// Bind this value to an immutable local visible only to `body`.
    pub fn new_local(
        self,
        name: impl Into<String>,
        ty: TypeDef,
        body: impl FnOnce(Expr) -> Vec<Stmt>,
    ) -> Stmt {
        self.bind(LocalDef::new(name, ty), body)
    }

    /// Bind this value to a reassignable local visible only to `body`.
    pub fn new_mutable_local(
        self,
        name: impl Into<String>,
        ty: TypeDef,
        body: impl FnOnce(&LocalDef) -> Vec<Stmt>,
    ) -> Stmt {
        let local = LocalDef::new(name, ty).mutable();
        let body = body(&local);
        Stmt::Local {
            local,
            init: self,
            body,
        }
    }

    fn bind(self, local: LocalDef, body: impl FnOnce(Expr) -> Vec<Stmt>) -> Stmt {
        let body = body(local.reference());
        Stmt::Local {
            local,
            init: self,
            body,
        }
    }

    /// Static result type.
    pub fn ty(&self) -> TypeDef {
        match self {
            Expr::Constant(constant) => constant.ty(),
            Expr::Variable(var) => var.ty.clone(),
            Expr::Access { ty, .. }
            | Expr::Invoke { ty, .. }
            | Expr::InvokeStatic { ty, .. }
            | Expr::Cast { ty, .. } => ty.clone(),
            Expr::Binary { lhs, op, rhs } => {
                if op.is_comparison() {
                    TypeDef::BOOLEAN
                } else {
                    promote(&lhs.ty(), &rhs.ty())
                }
            }
            Expr::And(_) | Expr::Or(_) | Expr::IsNull(_) | Expr::IsNonNull(_) => TypeDef::BOOLEAN,
            Expr::New { class, .. } => TypeDef::Class(class.clone()),
            Expr::Conditional { then, .. } => then.ty(),
            Expr::RuntimeType(_) => TypeDef::Class(ClassTypeDef::class()),
        }
    }
}

/// Binary numeric promotion: `double` > `float` > `long` > `int`.
fn promote(lhs: &TypeDef, rhs: &TypeDef) -> TypeDef {
    let rank = |ty: &TypeDef| match ty.as_primitive() {
        Some(PrimitiveKind::Double) => 3,
        Some(PrimitiveKind::Float) => 2,
        Some(PrimitiveKind::Long) => 1,
        _ => 0,
    };
    match rank(lhs).max(rank(rhs)) {
        3 => TypeDef::DOUBLE,
        2 => TypeDef::FLOAT,
        1 => TypeDef::LONG,
        _ => TypeDef::INT,
    }
}
