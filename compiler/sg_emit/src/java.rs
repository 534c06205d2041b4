//! Java source generator.
//!
//! Classes render as `public final class` holding static methods. Binary
//! sub-expressions are always parenthesized so no precedence table is
//! needed. `java.lang` and same-package types use their simple name.

use sg_model::{
    Accessor, ClassDef, ClassTypeDef, Constant, Expr, MethodDef, Stmt, TypeDef, Visibility,
};

use crate::context::EmitContext;
use crate::lexical::{is_identifier, is_java_reserved, quote_char, quote_string};
use crate::{Dialect, EmitError, Emitter, SourceGenerator, GENERATED_NOTICE};

/// Renders `.java` sources.
#[derive(Clone, Copy, Debug, Default)]
pub struct JavaGenerator;

impl SourceGenerator for JavaGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Java
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn write(&self, class: &ClassDef, out: &mut dyn Emitter) -> Result<(), EmitError> {
        JavaWriter {
            package: class.package.clone(),
            ctx: EmitContext::new(out),
        }
        .class(class)
    }
}

struct JavaWriter<'a> {
    package: String,
    ctx: EmitContext<'a>,
}

fn ident(name: &str) -> Result<&str, EmitError> {
    if is_identifier(name) && !is_java_reserved(name) {
        Ok(name)
    } else {
        Err(EmitError::InvalidIdentifier {
            dialect: Dialect::Java,
            name: name.to_owned(),
        })
    }
}

fn modifier(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public ",
        Visibility::Internal => "",
        Visibility::Private => "private ",
    }
}

impl JavaWriter<'_> {
    fn class(&mut self, class: &ClassDef) -> Result<(), EmitError> {
        let name = ident(&class.simple_name)?;
        self.ctx.line(&format!("// {GENERATED_NOTICE}"));
        if !class.package.is_empty() {
            for segment in class.package.split('.') {
                ident(segment)?;
            }
            self.ctx.line(&format!("package {};", class.package));
            self.ctx.blank_line();
        }
        let finality = if class.is_final { "final " } else { "" };
        self.ctx.open_block(&format!(
            "{}{finality}class {name}",
            modifier(class.visibility)
        ));
        for (i, method) in class.methods.iter().enumerate() {
            if i > 0 {
                self.ctx.blank_line();
            }
            self.method(method)?;
        }
        self.ctx.close_block();
        Ok(())
    }

    fn method(&mut self, method: &MethodDef) -> Result<(), EmitError> {
        if method.return_type.is_some() && !method.body.always_returns() {
            return Err(EmitError::MissingReturn {
                method: method.name.clone(),
            });
        }
        let mut params = Vec::with_capacity(method.parameters.len());
        for p in &method.parameters {
            params.push(format!("{} {}", self.type_name(&p.ty), ident(&p.name)?));
        }
        let returns = match &method.return_type {
            Some(ty) => self.type_name(ty),
            None => "void".to_owned(),
        };
        let statik = if method.is_static { "static " } else { "" };
        self.ctx.open_block(&format!(
            "{}{statik}{returns} {}({})",
            modifier(method.visibility),
            ident(&method.name)?,
            params.join(", ")
        ));
        self.ctx.enter_method(&method.parameters);
        self.stmt(&method.body)?;
        self.ctx.close_block();
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), EmitError> {
        match stmt {
            Stmt::Expr(expr) => {
                let text = self.expr(expr)?;
                self.ctx.line(&format!("{text};"));
            }
            Stmt::Return(expr) => {
                let text = self.expr(expr)?;
                self.ctx.line(&format!("return {text};"));
            }
            Stmt::ReturnIf { condition, value } => {
                let condition = self.expr(condition)?;
                let value = self.expr(value)?;
                self.ctx.open_block(&format!("if ({condition})"));
                self.ctx.line(&format!("return {value};"));
                self.ctx.close_block();
            }
            Stmt::Assign { target, value } => {
                self.ctx.check_assignable(&target.name)?;
                let value = self.expr(value)?;
                self.ctx.line(&format!("{} = {value};", target.name));
            }
            Stmt::Local { local, init, body } => {
                let name = ident(&local.name)?;
                let init = self.expr(init)?;
                let finality = if local.mutable { "" } else { "final " };
                let ty = self.type_name(&local.ty);
                self.ctx.line(&format!("{finality}{ty} {name} = {init};"));
                let depth = self.ctx.declare(local)?;
                for stmt in body {
                    self.stmt(stmt)?;
                }
                self.ctx.restore(depth);
            }
            Stmt::Block(stmts) => {
                for stmt in stmts {
                    self.stmt(stmt)?;
                }
            }
        }
        Ok(())
    }

    fn expr(&self, expr: &Expr) -> Result<String, EmitError> {
        Ok(match expr {
            Expr::Constant(constant) => literal(constant),
            Expr::Variable(var) => {
                self.ctx.check_bound(&var.name)?;
                var.name.clone()
            }
            Expr::Access {
                target, accessor, ..
            } => {
                let target = self.operand(target)?;
                match accessor {
                    Accessor::Method(name) => format!("{target}.{}()", ident(name)?),
                    Accessor::Field(name) => format!("{target}.{}", ident(name)?),
                }
            }
            Expr::Invoke {
                target,
                method,
                args,
                ..
            } => format!(
                "{}.{}({})",
                self.operand(target)?,
                ident(method)?,
                self.args(args)?
            ),
            Expr::InvokeStatic {
                owner,
                method,
                args,
                ..
            } => format!(
                "{}.{}({})",
                self.class_name(owner),
                ident(method)?,
                self.args(args)?
            ),
            Expr::Binary { lhs, op, rhs } => {
                format!("{} {op} {}", self.operand(lhs)?, self.operand(rhs)?)
            }
            Expr::And(operands) => self.logical(operands, " && ")?,
            Expr::Or(operands) => self.logical(operands, " || ")?,
            Expr::IsNull(inner) => format!("{} == null", self.operand(inner)?),
            Expr::IsNonNull(inner) => format!("{} != null", self.operand(inner)?),
            Expr::Cast { expr, ty } => format!("({}) {}", self.type_name(ty), self.operand(expr)?),
            Expr::New { class, args } => {
                format!("new {}({})", self.class_name(class), self.args(args)?)
            }
            Expr::Conditional {
                condition,
                then,
                otherwise,
            } => format!(
                "{} ? {} : {}",
                self.condition(condition)?,
                self.operand(then)?,
                self.operand(otherwise)?
            ),
            Expr::RuntimeType(inner) => format!("{}.getClass()", self.operand(inner)?),
        })
    }

    /// An expression used as an operand or receiver.
    fn operand(&self, expr: &Expr) -> Result<String, EmitError> {
        let text = self.expr(expr)?;
        Ok(match expr {
            Expr::Binary { .. }
            | Expr::And(_)
            | Expr::Or(_)
            | Expr::IsNull(_)
            | Expr::IsNonNull(_)
            | Expr::Cast { .. }
            | Expr::Conditional { .. } => format!("({text})"),
            _ => text,
        })
    }

    /// The test of a `?:`; only a nested conditional needs parens.
    fn condition(&self, expr: &Expr) -> Result<String, EmitError> {
        let text = self.expr(expr)?;
        Ok(match expr {
            Expr::Conditional { .. } => format!("({text})"),
            _ => text,
        })
    }

    /// `&&` / `||` chains; comparisons bind tighter, nested chains get parens.
    fn logical(&self, operands: &[Expr], separator: &str) -> Result<String, EmitError> {
        let parts = operands
            .iter()
            .map(|operand| {
                let text = self.expr(operand)?;
                Ok(match operand {
                    Expr::And(_) | Expr::Or(_) | Expr::Conditional { .. } => format!("({text})"),
                    _ => text,
                })
            })
            .collect::<Result<Vec<_>, EmitError>>()?;
        Ok(parts.join(separator))
    }

    fn args(&self, args: &[Expr]) -> Result<String, EmitError> {
        let parts = args
            .iter()
            .map(|arg| self.expr(arg))
            .collect::<Result<Vec<_>, EmitError>>()?;
        Ok(parts.join(", "))
    }

    fn type_name(&self, ty: &TypeDef) -> String {
        match ty {
            TypeDef::Primitive(kind) => kind.name().to_owned(),
            TypeDef::Class(class) => self.class_name(class),
            TypeDef::Array(array) => {
                let mut name = self.type_name(array.element());
                for _ in 0..array.dimensions() {
                    name.push_str("[]");
                }
                name
            }
        }
    }

    fn class_name(&self, class: &ClassTypeDef) -> String {
        if class.package() == "java.lang" || class.package() == self.package {
            class.simple_name().to_owned()
        } else {
            class.qualified_name()
        }
    }
}

fn literal(constant: &Constant) -> String {
    match constant {
        Constant::Null => "null".to_owned(),
        Constant::Boolean(b) => b.to_string(),
        Constant::Int(v) => v.to_string(),
        Constant::Long(v) => format!("{v}L"),
        Constant::Char(c) => quote_char(*c),
        Constant::String(s) => quote_string(s, false),
    }
}
