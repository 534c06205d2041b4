//! Kotlin source generator.
//!
//! Classes render as an `object` whose methods carry `@JvmStatic`, so the
//! generated code is called the same way from Java and Kotlin. Reference
//! comparisons use `===`; numeric casts become conversion calls.

use sg_model::{
    Accessor, BinaryOp, ClassDef, ClassTypeDef, Constant, Expr, MethodDef, PrimitiveKind, Stmt,
    TypeDef, Visibility,
};

use crate::context::EmitContext;
use crate::lexical::{is_identifier, is_kotlin_keyword, quote_char, quote_string};
use crate::{Dialect, EmitError, Emitter, SourceGenerator, GENERATED_NOTICE};

/// Renders `.kt` sources.
#[derive(Clone, Copy, Debug, Default)]
pub struct KotlinGenerator;

impl SourceGenerator for KotlinGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Kotlin
    }

    fn file_extension(&self) -> &'static str {
        "kt"
    }

    fn write(&self, class: &ClassDef, out: &mut dyn Emitter) -> Result<(), EmitError> {
        KotlinWriter {
            package: class.package.clone(),
            ctx: EmitContext::new(out),
        }
        .class(class)
    }
}

struct KotlinWriter<'a> {
    package: String,
    ctx: EmitContext<'a>,
}

/// A name as written in source; keywords and `$` names get backticks.
fn ident(name: &str) -> Result<String, EmitError> {
    if !is_identifier(name) {
        return Err(EmitError::InvalidIdentifier {
            dialect: Dialect::Kotlin,
            name: name.to_owned(),
        });
    }
    if is_kotlin_keyword(name) || name.contains('$') {
        Ok(format!("`{name}`"))
    } else {
        Ok(name.to_owned())
    }
}

fn modifier(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "",
        Visibility::Internal => "internal ",
        Visibility::Private => "private ",
    }
}

fn primitive_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "Boolean",
        PrimitiveKind::Char => "Char",
        PrimitiveKind::Byte => "Byte",
        PrimitiveKind::Short => "Short",
        PrimitiveKind::Int => "Int",
        PrimitiveKind::Long => "Long",
        PrimitiveKind::Float => "Float",
        PrimitiveKind::Double => "Double",
    }
}

/// Kotlin spelling of `java.lang` types that map onto built-ins.
fn mapped_java_lang(simple_name: &str) -> Option<&'static str> {
    Some(match simple_name {
        "Object" => "Any",
        "String" => "String",
        "Integer" => "Int",
        "Long" => "Long",
        "Short" => "Short",
        "Byte" => "Byte",
        "Character" => "Char",
        "Boolean" => "Boolean",
        "Float" => "Float",
        "Double" => "Double",
        "Class" => "Class<*>",
        _ => return None,
    })
}

impl KotlinWriter<'_> {
    fn class(&mut self, class: &ClassDef) -> Result<(), EmitError> {
        let name = ident(&class.simple_name)?;
        self.ctx.line(&format!("// {GENERATED_NOTICE}"));
        if !class.package.is_empty() {
            let segments = class
                .package
                .split('.')
                .map(ident)
                .collect::<Result<Vec<_>, _>>()?;
            self.ctx.line(&format!("package {}", segments.join(".")));
            self.ctx.blank_line();
        }
        // objects are final; `is_final` needs no spelling
        self.ctx
            .open_block(&format!("{}object {name}", modifier(class.visibility)));
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
            params.push(format!("{}: {}", ident(&p.name)?, self.type_name(&p.ty)));
        }
        let returns = match &method.return_type {
            Some(ty) => format!(": {}", self.type_name(ty)),
            None => String::new(),
        };
        if method.is_static {
            self.ctx.line("@JvmStatic");
        }
        let header = format!(
            "{}fun {}({}){returns}",
            modifier(method.visibility),
            ident(&method.name)?,
            params.join(", ")
        );
        self.ctx.open_block(&header);
        self.ctx.enter_method(&method.parameters);
        self.stmt(&method.body)?;
        self.ctx.close_block();
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), EmitError> {
        match stmt {
            Stmt::Expr(expr) => {
                let text = self.expr(expr)?;
                self.ctx.line(&text);
            }
            Stmt::Return(expr) => {
                let text = self.expr(expr)?;
                self.ctx.line(&format!("return {text}"));
            }
            Stmt::ReturnIf { condition, value } => {
                let condition = self.expr(condition)?;
                let value = self.expr(value)?;
                self.ctx.open_block(&format!("if ({condition})"));
                self.ctx.line(&format!("return {value}"));
                self.ctx.close_block();
            }
            Stmt::Assign { target, value } => {
                self.ctx.check_assignable(&target.name)?;
                let value = self.expr(value)?;
                let name = ident(&target.name)?;
                self.ctx.line(&format!("{name} = {value}"));
            }
            Stmt::Local { local, init, body } => {
                let name = ident(&local.name)?;
                let init = self.expr(init)?;
                let keyword = if local.mutable { "var" } else { "val" };
                let ty = self.type_name(&local.ty);
                self.ctx.line(&format!("{keyword} {name}: {ty} = {init}"));
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
                ident(&var.name)?
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
            // Static helpers are always qualified: `Double` alone names the
            // Kotlin built-in, not `java.lang.Double`.
            Expr::InvokeStatic {
                owner,
                method,
                args,
                ..
            } => format!(
                "{}.{}({})",
                owner.qualified_name(),
                ident(method)?,
                self.args(args)?
            ),
            Expr::Binary { lhs, op, rhs } => self.binary(lhs, *op, rhs)?,
            Expr::And(operands) => self.logical(operands, " && ")?,
            Expr::Or(operands) => self.logical(operands, " || ")?,
            Expr::IsNull(inner) => format!("{} == null", self.operand(inner)?),
            Expr::IsNonNull(inner) => format!("{} != null", self.operand(inner)?),
            Expr::Cast { expr, ty } => self.cast(expr, ty)?,
            Expr::New { class, args } => {
                format!("{}({})", self.class_name(class), self.args(args)?)
            }
            Expr::Conditional {
                condition,
                then,
                otherwise,
            } => format!(
                "if ({}) {} else {}",
                self.expr(condition)?,
                self.operand(then)?,
                self.operand(otherwise)?
            ),
            Expr::RuntimeType(inner) => format!("{}.javaClass", self.operand(inner)?),
        })
    }

    fn binary(&self, lhs: &Expr, op: BinaryOp, rhs: &Expr) -> Result<String, EmitError> {
        let (lhs_ty, rhs_ty) = (lhs.ty(), rhs.ty());
        let both_primitive = lhs_ty.is_primitive() && rhs_ty.is_primitive();
        let symbol = match op {
            BinaryOp::Eq if !both_primitive => "===",
            BinaryOp::NotEq if !both_primitive => "!==",
            BinaryOp::BitAnd => "and",
            BinaryOp::BitXor => "xor",
            BinaryOp::UnsignedShr => "ushr",
            other => other.symbol(),
        };
        // Kotlin has no implicit widening for bitwise operators or for
        // `Char` arithmetic other than `Char - Char`.
        let char_pair = lhs_ty == TypeDef::CHAR && rhs_ty == TypeDef::CHAR;
        let widen = !op.is_comparison() && !(op == BinaryOp::Sub && char_pair);
        let bitwise = matches!(
            op,
            BinaryOp::BitAnd | BinaryOp::BitXor | BinaryOp::UnsignedShr
        );
        let side = |expr: &Expr, ty: &TypeDef| -> Result<String, EmitError> {
            let text = self.operand(expr)?;
            Ok(match ty.as_primitive() {
                Some(PrimitiveKind::Char) if widen => format!("{text}.code"),
                Some(PrimitiveKind::Byte | PrimitiveKind::Short) if bitwise => {
                    format!("{text}.toInt()")
                }
                _ => text,
            })
        };
        Ok(format!(
            "{} {symbol} {}",
            side(lhs, &lhs_ty)?,
            side(rhs, &rhs_ty)?
        ))
    }

    fn cast(&self, expr: &Expr, ty: &TypeDef) -> Result<String, EmitError> {
        let text = self.operand(expr)?;
        let from = expr.ty();
        Ok(match ty {
            TypeDef::Primitive(kind) if from.is_primitive() => {
                let source = if from == TypeDef::CHAR && *kind != PrimitiveKind::Char {
                    format!("{text}.code")
                } else {
                    text
                };
                match kind {
                    PrimitiveKind::Boolean => source,
                    _ if from == *ty => source,
                    PrimitiveKind::Int if from == TypeDef::CHAR => source,
                    _ => format!("{source}.to{}()", primitive_name(*kind)),
                }
            }
            _ => format!("{text} as {}", self.type_name(ty)),
        })
    }

    /// An expression used as an operand or receiver.
    fn operand(&self, expr: &Expr) -> Result<String, EmitError> {
        let text = self.expr(expr)?;
        let bare = match expr {
            Expr::Binary { .. }
            | Expr::And(_)
            | Expr::Or(_)
            | Expr::IsNull(_)
            | Expr::IsNonNull(_)
            | Expr::Conditional { .. } => false,
            // conversions are postfix calls; only `as` needs parens
            Expr::Cast { ty, expr: inner } => ty.is_primitive() && inner.ty().is_primitive(),
            Expr::Constant(Constant::Int(v)) => *v >= 0,
            Expr::Constant(Constant::Long(v)) => *v >= 0,
            _ => true,
        };
        Ok(if bare { text } else { format!("({text})") })
    }

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
            TypeDef::Primitive(kind) => primitive_name(*kind).to_owned(),
            TypeDef::Class(class) => self.class_name(class),
            TypeDef::Array(array) => {
                let mut name = match array.element() {
                    TypeDef::Primitive(kind) => format!("{}Array", primitive_name(*kind)),
                    element => format!("Array<{}>", self.type_name(element)),
                };
                for _ in 1..array.dimensions() {
                    name = format!("Array<{name}>");
                }
                name
            }
        }
    }

    fn class_name(&self, class: &ClassTypeDef) -> String {
        let base = match mapped_java_lang(class.simple_name()) {
            Some(mapped) if class.package() == "java.lang" => mapped.to_owned(),
            _ if class.package() == "java.lang" || class.package() == self.package => {
                class.simple_name().to_owned()
            }
            _ => class.qualified_name(),
        };
        if class.is_nullable() {
            format!("{base}?")
        } else {
            base
        }
    }
}

fn literal(constant: &Constant) -> String {
    match constant {
        Constant::Null => "null".to_owned(),
        Constant::Boolean(b) => b.to_string(),
        // the negated literal would be a Long
        Constant::Int(i32::MIN) => "Int.MIN_VALUE".to_owned(),
        Constant::Int(v) => v.to_string(),
        Constant::Long(i64::MIN) => "Long.MIN_VALUE".to_owned(),
        Constant::Long(v) => format!("{v}L"),
        Constant::Char(c) => quote_char(*c),
        Constant::String(s) => quote_string(s, true),
    }
}

#[cfg(test)]
mod tests;
