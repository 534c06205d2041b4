//! Method and class definitions.

use std::fmt;

use crate::{ClassTypeDef, Expr, Stmt, TypeDef};

/// Member and class visibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Internal => write!(f, "internal"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterDef {
    pub name: String,
    pub ty: TypeDef,
}

impl ParameterDef {
    pub fn reference(&self) -> Expr {
        Expr::variable(self.name.clone(), self.ty.clone())
    }
}

/// A method definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodDef {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub parameters: Vec<ParameterDef>,
    /// `None` for methods that return nothing.
    pub return_type: Option<TypeDef>,
    pub body: Stmt,
}

impl MethodDef {
    pub fn builder(name: impl Into<String>) -> MethodDefBuilder {
        MethodDefBuilder {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            parameters: Vec::new(),
            return_type: None,
        }
    }
}

/// Builder for [`MethodDef`]; the body is produced last from the parameters.
#[derive(Clone, Debug)]
pub struct MethodDefBuilder {
    name: String,
    visibility: Visibility,
    is_static: bool,
    parameters: Vec<ParameterDef>,
    return_type: Option<TypeDef>,
}

impl MethodDefBuilder {
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeDef) -> Self {
        self.return_type = Some(ty);
        self
    }

    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, ty: TypeDef) -> Self {
        self.parameters.push(ParameterDef {
            name: name.into(),
            ty,
        });
        self
    }

    /// Finish the method, building the body from parameter references.
    pub fn build(self, body: impl FnOnce(&[Expr]) -> Stmt) -> MethodDef {
        let refs: Vec<Expr> = self.parameters.iter().map(ParameterDef::reference).collect();
        let body = body(&refs);
        MethodDef {
            name: self.name,
            visibility: self.visibility,
            is_static: self.is_static,
            parameters: self.parameters,
            return_type: self.return_type,
            body,
        }
    }
}

/// A class definition: the unit handed to an emitter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassDef {
    pub package: String,
    pub simple_name: String,
    pub visibility: Visibility,
    pub is_final: bool,
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    /// Start a class from its qualified name.
    pub fn builder(qualified_name: &str) -> ClassDefBuilder {
        let class = ClassTypeDef::of(qualified_name);
        ClassDefBuilder {
            def: ClassDef {
                package: class.package().to_owned(),
                simple_name: class.simple_name().to_owned(),
                visibility: Visibility::Public,
                is_final: false,
                methods: Vec::new(),
            },
        }
    }

    pub fn qualified_name(&self) -> String {
        self.as_type().qualified_name()
    }

    /// A reference to this class.
    pub fn as_type(&self) -> ClassTypeDef {
        ClassTypeDef::new(self.package.clone(), self.simple_name.clone())
    }
}

#[derive(Clone, Debug)]
pub struct ClassDefBuilder {
    def: ClassDef,
}

impl ClassDefBuilder {
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.def.visibility = visibility;
        self
    }

    #[must_use]
    pub fn final_class(mut self) -> Self {
        self.def.is_final = true;
        self
    }

    pub fn add_method(&mut self, method: MethodDef) -> &mut Self {
        self.def.methods.push(method);
        self
    }

    pub fn build(self) -> ClassDef {
        self.def
    }
}
