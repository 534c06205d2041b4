//! Statement nodes.

use crate::expr::VariableRef;
use crate::{Expr, TypeDef};

/// A local variable introduced by [`Stmt::Local`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalDef {
    pub name: String,
    pub ty: TypeDef,
    /// Whether the body reassigns the local.
    pub mutable: bool,
}

impl LocalDef {
    pub fn new(name: impl Into<String>, ty: TypeDef) -> Self {
        LocalDef {
            name: name.into(),
            ty,
            mutable: false,
        }
    }

    #[must_use]
    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }

    /// An expression reading the local.
    pub fn reference(&self) -> Expr {
        Expr::variable(self.name.clone(), self.ty.clone())
    }

    /// `name = value;`
    pub fn assign(&self, value: Expr) -> Stmt {
        Stmt::Assign {
            target: VariableRef {
                name: self.name.clone(),
                ty: self.ty.clone(),
            },
            value,
        }
    }
}

/// A statement node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stmt {
    /// Evaluate for side effects.
    Expr(Expr),
    Return(Expr),
    /// `if (condition) return value;`
    ReturnIf { condition: Expr, value: Expr },
    Assign { target: VariableRef, value: Expr },
    /// Bind `init` to `local`; the binding is only visible in `body`.
    Local {
        local: LocalDef,
        init: Expr,
        body: Vec<Stmt>,
    },
    Block(Vec<Stmt>),
}

impl Stmt {
    /// Sequence statements, splicing nested blocks.
    pub fn multi(stmts: impl IntoIterator<Item = Stmt>) -> Stmt {
        let mut flat = Vec::new();
        for stmt in stmts {
            match stmt {
                Stmt::Block(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Stmt::Block(flat)
    }

    /// Whether every path through this statement ends in a return.
    pub fn always_returns(&self) -> bool {
        match self {
            Stmt::Return(_) => true,
            Stmt::Expr(_) | Stmt::ReturnIf { .. } | Stmt::Assign { .. } => false,
            Stmt::Local { body, .. } | Stmt::Block(body) => {
                body.last().is_some_and(Stmt::always_returns)
            }
        }
    }
}
