//! A small interpreter for code model trees, used by the tests to check what
//! a synthesized method computes rather than only how its tree is shaped.
//!
//! Values follow JVM semantics closely enough for derived methods: `==` on
//! references is identity, `int`/`long` arithmetic wraps, the `Arrays`
//! helpers and the boxed bit-pattern helpers are modeled. An array's own
//! `hashCode` is its identity hash, derived from its allocation.

use std::cell::RefCell;
use std::rc::Rc;

use sg_model::{BinaryOp, ClassTypeDef, Constant, Expr, MethodDef, PrimitiveKind, Stmt, TypeDef};

pub(crate) type EvalResult<T> = Result<T, String>;

/// A bean instance: its class and values keyed by accessor name.
#[derive(Debug)]
pub(crate) struct Object {
    class: String,
    fields: Vec<(String, Value)>,
}

#[derive(Clone, Debug)]
pub(crate) enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(Rc<str>),
    Object(Rc<Object>),
    Array(Rc<Vec<Value>>),
    Builder(Rc<RefCell<String>>),
    Class(String),
}

impl Value {
    pub(crate) fn str(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }

    pub(crate) fn array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(elements))
    }

    pub(crate) fn object(class: &str, fields: &[(&str, Value)]) -> Value {
        Value::Object(Rc::new(Object {
            class: class.to_owned(),
            fields: fields
                .iter()
                .map(|(name, value)| ((*name).to_owned(), value.clone()))
                .collect(),
        }))
    }

    pub(crate) fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Invoke a static method with positional arguments.
pub(crate) fn call(method: &MethodDef, args: Vec<Value>) -> EvalResult<Value> {
    if method.parameters.len() != args.len() {
        return Err(format!(
            "{} expects {} arguments, got {}",
            method.name,
            method.parameters.len(),
            args.len()
        ));
    }
    let mut frame = Frame {
        locals: method
            .parameters
            .iter()
            .map(|p| p.name.clone())
            .zip(args)
            .collect(),
    };
    match frame.exec(&method.body)? {
        Flow::Return(value) => Ok(value),
        Flow::Next => Err(format!("{} fell off the end", method.name)),
    }
}

pub(crate) fn call_to_string(method: &MethodDef, instance: Value) -> String {
    let result = call(method, vec![instance]).unwrap_or_else(|e| panic!("{e}"));
    result
        .as_str()
        .map(str::to_owned)
        .unwrap_or_else(|| panic!("toString returned {result:?}"))
}

pub(crate) fn call_equals(method: &MethodDef, a: Value, b: Value) -> bool {
    let result = call(method, vec![a, b]).unwrap_or_else(|e| panic!("{e}"));
    result
        .as_bool()
        .unwrap_or_else(|| panic!("equals returned {result:?}"))
}

pub(crate) fn call_hash_code(method: &MethodDef, instance: Value) -> i32 {
    let result = call(method, vec![instance]).unwrap_or_else(|e| panic!("{e}"));
    result
        .as_int()
        .unwrap_or_else(|| panic!("hashCode returned {result:?}"))
}

/// Evaluate a free-standing expression with no variables in scope.
pub(crate) fn eval_expr(expr: &Expr) -> EvalResult<Value> {
    Frame { locals: Vec::new() }.eval(expr)
}

enum Flow {
    Next,
    Return(Value),
}

struct Frame {
    locals: Vec<(String, Value)>,
}

impl Frame {
    fn lookup(&self, name: &str) -> EvalResult<Value> {
        self.locals
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| format!("unbound variable `{name}`"))
    }

    fn exec(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval(expr)?;
                Ok(Flow::Next)
            }
            Stmt::Return(expr) => Ok(Flow::Return(self.eval(expr)?)),
            Stmt::ReturnIf { condition, value } => {
                if truth(&self.eval(condition)?)? {
                    Ok(Flow::Return(self.eval(value)?))
                } else {
                    Ok(Flow::Next)
                }
            }
            Stmt::Assign { target, value } => {
                let value = self.eval(value)?;
                let slot = self
                    .locals
                    .iter_mut()
                    .rev()
                    .find(|(n, _)| *n == target.name)
                    .ok_or_else(|| format!("assignment to unbound `{}`", target.name))?;
                slot.1 = value;
                Ok(Flow::Next)
            }
            Stmt::Local { local, init, body } => {
                let value = self.eval(init)?;
                self.locals.push((local.name.clone(), value));
                let flow = self.exec_all(body);
                self.locals.pop();
                flow
            }
            Stmt::Block(stmts) => self.exec_all(stmts),
        }
    }

    fn exec_all(&mut self, stmts: &[Stmt]) -> EvalResult<Flow> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Constant(constant) => Ok(match constant {
                Constant::Null => Value::Null,
                Constant::Boolean(b) => Value::Bool(*b),
                Constant::Int(v) => Value::Int(*v),
                Constant::Long(v) => Value::Long(*v),
                Constant::Char(c) => Value::Char(*c),
                Constant::String(s) => Value::str(s),
            }),
            Expr::Variable(var) => self.lookup(&var.name),
            Expr::Access {
                target, accessor, ..
            } => match self.eval(target)? {
                Value::Object(object) => object
                    .fields
                    .iter()
                    .find(|(name, _)| name == accessor.name())
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| format!("{} has no `{}`", object.class, accessor.name())),
                Value::Null => Err(format!("NullPointerException reading {}", accessor.name())),
                other => Err(format!("cannot read {} from {other:?}", accessor.name())),
            },
            Expr::Invoke {
                target,
                method,
                args,
                ..
            } => {
                let target = self.eval(target)?;
                let args = self.eval_all(args)?;
                invoke(&target, method, &args)
            }
            Expr::InvokeStatic {
                owner,
                method,
                args,
                ..
            } => {
                let args = self.eval_all(args)?;
                invoke_static(owner, method, &args)
            }
            Expr::Binary { lhs, op, rhs } => binary(&self.eval(lhs)?, *op, &self.eval(rhs)?),
            Expr::And(operands) => {
                for operand in operands {
                    if !truth(&self.eval(operand)?)? {
                        return Ok(Value::Bool(false));
                    }
                }
                Ok(Value::Bool(true))
            }
            Expr::Or(operands) => {
                for operand in operands {
                    if truth(&self.eval(operand)?)? {
                        return Ok(Value::Bool(true));
                    }
                }
                Ok(Value::Bool(false))
            }
            Expr::IsNull(inner) => Ok(Value::Bool(self.eval(inner)?.is_null())),
            Expr::IsNonNull(inner) => Ok(Value::Bool(!self.eval(inner)?.is_null())),
            Expr::Cast { expr, ty } => cast(self.eval(expr)?, ty),
            Expr::New { class, args } => {
                let args = self.eval_all(args)?;
                match (class.qualified_name().as_str(), args.as_slice()) {
                    ("java.lang.StringBuilder", []) => {
                        Ok(Value::Builder(Rc::new(RefCell::new(String::new()))))
                    }
                    ("java.lang.StringBuilder", [seed]) => Ok(Value::Builder(Rc::new(
                        RefCell::new(java_string(seed)?),
                    ))),
                    (name, _) => Err(format!("cannot instantiate {name}")),
                }
            }
            Expr::Conditional {
                condition,
                then,
                otherwise,
            } => {
                if truth(&self.eval(condition)?)? {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            Expr::RuntimeType(inner) => match self.eval(inner)? {
                Value::Null => Err("NullPointerException in getClass".to_owned()),
                Value::Object(object) => Ok(Value::Class(object.class.clone())),
                Value::Str(_) => Ok(Value::Class("java.lang.String".to_owned())),
                Value::Builder(_) => Ok(Value::Class("java.lang.StringBuilder".to_owned())),
                other => Err(format!("getClass on {other:?}")),
            },
        }
    }

    fn eval_all(&self, exprs: &[Expr]) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|e| self.eval(e)).collect()
    }
}

fn truth(value: &Value) -> EvalResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| format!("expected boolean, got {value:?}"))
}

/// `String.valueOf` for the values a builder is fed.
fn java_string(value: &Value) -> EvalResult<String> {
    Ok(match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Byte(v) => v.to_string(),
        Value::Short(v) => v.to_string(),
        Value::Char(c) => c.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Long(v) => v.to_string(),
        Value::Float(v) => float_string(f64::from(*v)),
        Value::Double(v) => float_string(*v),
        Value::Str(s) => s.to_string(),
        Value::Builder(b) => b.borrow().clone(),
        Value::Class(name) => format!("class {name}"),
        Value::Object(_) | Value::Array(_) => {
            return Err(format!("no stable string form for {value:?}"))
        }
    })
}

fn float_string(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

fn invoke(target: &Value, method: &str, args: &[Value]) -> EvalResult<Value> {
    match (target, method, args) {
        (Value::Null, _, _) => Err(format!("NullPointerException calling {method}")),
        (Value::Builder(buf), "append", [arg]) => {
            let text = java_string(arg)?;
            buf.borrow_mut().push_str(&text);
            Ok(target.clone())
        }
        (Value::Builder(buf), "toString", []) => Ok(Value::str(&buf.borrow())),
        (_, "equals", [other]) => Ok(Value::Bool(object_equals(target, other))),
        (_, "hashCode", []) => element_hash(target, false).map(Value::Int),
        (_, "toString", []) => java_string(target).map(|s| Value::str(&s)),
        _ => Err(format!("no method {method}/{} on {target:?}", args.len())),
    }
}

fn invoke_static(owner: &ClassTypeDef, method: &str, args: &[Value]) -> EvalResult<Value> {
    match (owner.qualified_name().as_str(), method, args) {
        ("java.util.Arrays", "toString", [a]) => arrays_to_string(a, false).map(|s| Value::str(&s)),
        ("java.util.Arrays", "deepToString", [a]) => {
            arrays_to_string(a, true).map(|s| Value::str(&s))
        }
        ("java.util.Arrays", "equals", [a, b]) => Ok(Value::Bool(arrays_equals(a, b, false))),
        ("java.util.Arrays", "deepEquals", [a, b]) => Ok(Value::Bool(arrays_equals(a, b, true))),
        ("java.util.Arrays", "hashCode", [a]) => arrays_hash(a, false).map(Value::Int),
        ("java.util.Arrays", "deepHashCode", [a]) => arrays_hash(a, true).map(Value::Int),
        ("java.lang.Float", "floatToIntBits", [Value::Float(v)]) => {
            Ok(Value::Int(float_to_int_bits(*v)))
        }
        ("java.lang.Double", "doubleToLongBits", [Value::Double(v)]) => {
            Ok(Value::Long(double_to_long_bits(*v)))
        }
        (owner, _, _) => Err(format!("no static {owner}.{method}/{}", args.len())),
    }
}

pub(crate) fn float_to_int_bits(v: f32) -> i32 {
    if v.is_nan() {
        0x7fc0_0000
    } else {
        v.to_bits() as i32
    }
}

pub(crate) fn double_to_long_bits(v: f64) -> i64 {
    if v.is_nan() {
        0x7ff8_0000_0000_0000
    } else {
        v.to_bits() as i64
    }
}

/// `String.hashCode`: `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 units.
pub(crate) fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn same_reference(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Str(x), Value::Str(y)) => Rc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
        (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
        (Value::Builder(x), Value::Builder(y)) => Rc::ptr_eq(x, y),
        (Value::Class(x), Value::Class(y)) => x == y,
        _ => false,
    }
}

/// `a.equals(b)` for a non-null `a`, with boxed primitives comparing by value.
fn object_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Byte(x), Value::Byte(y)) => x == y,
        (Value::Short(x), Value::Short(y)) => x == y,
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Long(x), Value::Long(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => float_to_int_bits(*x) == float_to_int_bits(*y),
        (Value::Double(x), Value::Double(y)) => double_to_long_bits(*x) == double_to_long_bits(*y),
        _ => same_reference(a, b),
    }
}

fn arrays_to_string(value: &Value, deep: bool) -> EvalResult<String> {
    let elements = match value {
        Value::Null => return Ok("null".to_owned()),
        Value::Array(elements) => elements,
        other => return Err(format!("Arrays.toString on {other:?}")),
    };
    let mut out = String::from("[");
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let text = match element {
            Value::Array(_) if deep => arrays_to_string(element, true)?,
            other => java_string(other)?,
        };
        out.push_str(&text);
    }
    out.push(']');
    Ok(out)
}

fn arrays_equals(a: &Value, b: &Value, deep: bool) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            Rc::ptr_eq(x, y)
                || (x.len() == y.len()
                    && x.iter().zip(y.iter()).all(|(l, r)| match (l, r) {
                        (Value::Array(_), Value::Array(_)) if deep => arrays_equals(l, r, true),
                        (Value::Null, _) => r.is_null(),
                        _ => object_equals(l, r),
                    }))
        }
        _ => same_reference(a, b),
    }
}

fn arrays_hash(value: &Value, deep: bool) -> EvalResult<i32> {
    match value {
        Value::Null => Ok(0),
        Value::Array(elements) => elements.iter().try_fold(1i32, |h, element| {
            Ok(h.wrapping_mul(31).wrapping_add(element_hash(element, deep)?))
        }),
        other => Err(format!("Arrays.hashCode on {other:?}")),
    }
}

/// The boxed `hashCode` of one value.
fn element_hash(value: &Value, deep: bool) -> EvalResult<i32> {
    Ok(match value {
        Value::Null => 0,
        Value::Bool(true) => 1231,
        Value::Bool(false) => 1237,
        Value::Byte(v) => i32::from(*v),
        Value::Short(v) => i32::from(*v),
        Value::Char(c) => *c as i32,
        Value::Int(v) => *v,
        Value::Long(v) => fold(*v),
        Value::Float(v) => float_to_int_bits(*v),
        Value::Double(v) => fold(double_to_long_bits(*v)),
        Value::Str(s) => string_hash(s),
        Value::Array(_) if deep => arrays_hash(value, true)?,
        Value::Array(elements) => fold(Rc::as_ptr(elements) as usize as i64),
        other => return Err(format!("no stable hash for {other:?}")),
    })
}

fn fold(v: i64) -> i32 {
    (((v as u64) >> 32) as i64 ^ v) as i32
}

#[derive(Clone, Copy)]
enum Num {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

fn numeric(value: &Value) -> Option<Num> {
    Some(match value {
        Value::Byte(v) => Num::Int(i32::from(*v)),
        Value::Short(v) => Num::Int(i32::from(*v)),
        Value::Char(c) => Num::Int(*c as i32),
        Value::Int(v) => Num::Int(*v),
        Value::Long(v) => Num::Long(*v),
        Value::Float(v) => Num::Float(*v),
        Value::Double(v) => Num::Double(*v),
        _ => return None,
    })
}

fn as_f64(n: Num) -> f64 {
    match n {
        Num::Int(v) => f64::from(v),
        Num::Long(v) => v as f64,
        Num::Float(v) => f64::from(v),
        Num::Double(v) => v,
    }
}

fn as_i64(n: Num) -> i64 {
    match n {
        Num::Int(v) => i64::from(v),
        Num::Long(v) => v,
        Num::Float(v) => v as i64,
        Num::Double(v) => v as i64,
    }
}

/// Binary numeric promotion of a pair.
fn promote(l: Num, r: Num) -> (Num, Num) {
    match (l, r) {
        (Num::Double(_), _) | (_, Num::Double(_)) => {
            (Num::Double(as_f64(l)), Num::Double(as_f64(r)))
        }
        (Num::Float(_), _) | (_, Num::Float(_)) => {
            (Num::Float(as_f64(l) as f32), Num::Float(as_f64(r) as f32))
        }
        (Num::Long(_), _) | (_, Num::Long(_)) => (Num::Long(as_i64(l)), Num::Long(as_i64(r))),
        _ => (l, r),
    }
}

fn binary(lhs: &Value, op: BinaryOp, rhs: &Value) -> EvalResult<Value> {
    let (Some(l), Some(r)) = (numeric(lhs), numeric(rhs)) else {
        return match (op, lhs, rhs) {
            (BinaryOp::Eq, Value::Bool(x), Value::Bool(y)) => Ok(Value::Bool(x == y)),
            (BinaryOp::NotEq, Value::Bool(x), Value::Bool(y)) => Ok(Value::Bool(x != y)),
            (BinaryOp::Eq, _, _) => Ok(Value::Bool(same_reference(lhs, rhs))),
            (BinaryOp::NotEq, _, _) => Ok(Value::Bool(!same_reference(lhs, rhs))),
            _ => Err(format!("{lhs:?} {op} {rhs:?}")),
        };
    };
    if op == BinaryOp::UnsignedShr {
        let shift = as_i64(r);
        return match l {
            Num::Int(v) => Ok(Value::Int(((v as u32) >> (shift & 31)) as i32)),
            Num::Long(v) => Ok(Value::Long(((v as u64) >> (shift & 63)) as i64)),
            _ => Err(format!("shift of {lhs:?}")),
        };
    }
    let value = match promote(l, r) {
        (Num::Int(a), Num::Int(b)) => match op {
            BinaryOp::Add => Value::Int(a.wrapping_add(b)),
            BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
            BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
            BinaryOp::BitAnd => Value::Int(a & b),
            BinaryOp::BitXor => Value::Int(a ^ b),
            _ => Value::Bool(compare(op, a.cmp(&b))),
        },
        (Num::Long(a), Num::Long(b)) => match op {
            BinaryOp::Add => Value::Long(a.wrapping_add(b)),
            BinaryOp::Sub => Value::Long(a.wrapping_sub(b)),
            BinaryOp::Mul => Value::Long(a.wrapping_mul(b)),
            BinaryOp::BitAnd => Value::Long(a & b),
            BinaryOp::BitXor => Value::Long(a ^ b),
            _ => Value::Bool(compare(op, a.cmp(&b))),
        },
        (a, b) => {
            let (a, b) = (as_f64(a), as_f64(b));
            match op {
                BinaryOp::Add => Value::Double(a + b),
                BinaryOp::Sub => Value::Double(a - b),
                BinaryOp::Mul => Value::Double(a * b),
                BinaryOp::Eq => Value::Bool(a == b),
                BinaryOp::NotEq => Value::Bool(a != b),
                BinaryOp::Lt => Value::Bool(a < b),
                BinaryOp::LtEq => Value::Bool(a <= b),
                BinaryOp::Gt => Value::Bool(a > b),
                BinaryOp::GtEq => Value::Bool(a >= b),
                _ => return Err(format!("{lhs:?} {op} {rhs:?}")),
            }
        }
    };
    Ok(value)
}

fn compare(op: BinaryOp, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::{Equal, Greater, Less};
    match op {
        BinaryOp::Eq => ordering == Equal,
        BinaryOp::NotEq => ordering != Equal,
        BinaryOp::Lt => ordering == Less,
        BinaryOp::LtEq => ordering != Greater,
        BinaryOp::Gt => ordering == Greater,
        _ => ordering != Less,
    }
}

fn cast(value: Value, ty: &TypeDef) -> EvalResult<Value> {
    match ty {
        TypeDef::Primitive(kind) => {
            let n = numeric(&value).ok_or_else(|| format!("cannot cast {value:?} to {ty}"))?;
            Ok(match kind {
                PrimitiveKind::Int => Value::Int(as_i64(n) as i32),
                PrimitiveKind::Long => Value::Long(as_i64(n)),
                PrimitiveKind::Short => Value::Short(as_i64(n) as i16),
                PrimitiveKind::Byte => Value::Byte(as_i64(n) as i8),
                PrimitiveKind::Float => Value::Float(as_f64(n) as f32),
                PrimitiveKind::Double => Value::Double(as_f64(n)),
                PrimitiveKind::Char | PrimitiveKind::Boolean => {
                    return Err(format!("unsupported cast to {kind}"))
                }
            })
        }
        TypeDef::Class(class) => match &value {
            Value::Object(object) if object.class != class.qualified_name() => Err(format!(
                "ClassCastException: {} is not {}",
                object.class,
                class.qualified_name()
            )),
            _ => Ok(value),
        },
        TypeDef::Array(_) => Ok(value),
    }
}
