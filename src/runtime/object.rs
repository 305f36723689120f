//! The runtime value: a tagged enum with cheap clones.
//!
//! Containers (lists, dicts, struct instances) are shared through
//! `Rc<RefCell<...>>`, so cloning an [`Object`] copies a handle, not the
//! contents. That gives the language its call-by-value feel for scalars while
//! keeping container mutation visible through every alias.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ast::Node;
use crate::runtime::builtins::{BuiltinFunction, HostFunction};
use crate::runtime::dict::DictObject;
use crate::runtime::module::ModuleRef;

#[derive(Debug, Clone)]
pub enum Object {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Object>>>),
    Dict(Rc<RefCell<DictObject>>),
    StructDef(Rc<StructDef>),
    Struct(Rc<RefCell<StructInstance>>),
    Function(Rc<FunctionObject>),
    Method(Rc<MethodObject>),
    Builtin(BuiltinFunction),
    HostFunction(Rc<HostFunction>),
    Module(ModuleRef),
}

/// A user-defined function. `module` names the defining module; calls push
/// their frame onto that module's scope, not the caller's.
#[derive(Debug)]
pub struct FunctionObject {
    pub module: Arc<str>,
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Node>,
}

/// A struct definition registered in a module's struct name space.
#[derive(Debug)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<String>,
    pub methods: FxHashMap<String, Rc<FunctionObject>>,
}

/// An instance holds its definition and field values; methods are produced on
/// demand by [`StructInstance::method`], so no instance ever owns a method
/// that points back at it.
#[derive(Debug)]
pub struct StructInstance {
    pub def: Rc<StructDef>,
    pub fields: FxHashMap<String, Object>,
}

impl StructInstance {
    pub fn field(&self, name: &str) -> Option<Object> {
        self.fields.get(name).cloned()
    }

    pub fn method(this: &Rc<RefCell<Self>>, name: &str) -> Option<Object> {
        let function = this.borrow().def.methods.get(name)?.clone();
        Some(Object::Method(Rc::new(MethodObject {
            function,
            receiver: this.clone(),
        })))
    }
}

/// A function bound to a receiver instance.
#[derive(Debug)]
pub struct MethodObject {
    pub function: Rc<FunctionObject>,
    pub receiver: Rc<RefCell<StructInstance>>,
}

impl Object {
    pub fn str(value: impl Into<Rc<str>>) -> Self {
        Object::Str(value.into())
    }

    pub fn list(elements: Vec<Object>) -> Self {
        Object::List(Rc::new(RefCell::new(elements)))
    }

    pub fn dict(dict: DictObject) -> Self {
        Object::Dict(Rc::new(RefCell::new(dict)))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Object::Nil => "nil",
            Object::Bool(_) => "bool",
            Object::Int(_) => "int",
            Object::Float(_) => "float",
            Object::Str(_) => "string",
            Object::List(_) => "list",
            Object::Dict(_) => "dict",
            Object::StructDef(_) => "struct def",
            Object::Struct(_) => "struct",
            Object::Function(_) => "function",
            Object::Method(_) => "method",
            Object::Builtin(_) => "builtin function",
            Object::HostFunction(_) => "host function",
            Object::Module(_) => "module",
        }
    }

    /// Falsy: `nil`, `false`, zero of either numeric kind, and empty
    /// strings, lists, and dicts.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Nil => false,
            Object::Bool(value) => *value,
            Object::Int(value) => *value != 0,
            Object::Float(value) => *value != 0.0,
            Object::Str(value) => !value.is_empty(),
            Object::List(elements) => !elements.borrow().is_empty(),
            Object::Dict(dict) => dict.borrow().len() != 0,
            _ => true,
        }
    }

    /// Strict equality: different kinds are unequal, including int vs float.
    pub fn value_eq(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Nil, Object::Nil) => true,
            (Object::Bool(a), Object::Bool(b)) => a == b,
            (Object::Int(a), Object::Int(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Str(a), Object::Str(b)) => a == b,
            (Object::List(a), Object::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let a = a.borrow();
                let b = b.borrow();
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.value_eq(y))
            }
            (Object::Dict(a), Object::Dict(b)) => {
                Rc::ptr_eq(a, b) || a.borrow().value_eq(&b.borrow())
            }
            (Object::Struct(a), Object::Struct(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let a = a.borrow();
                let b = b.borrow();
                Rc::ptr_eq(&a.def, &b.def)
                    && a.def.fields.iter().all(|name| {
                        match (a.fields.get(name), b.fields.get(name)) {
                            (Some(x), Some(y)) => x.value_eq(y),
                            (None, None) => true,
                            _ => false,
                        }
                    })
            }
            (Object::StructDef(a), Object::StructDef(b)) => Rc::ptr_eq(a, b),
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Method(a), Object::Method(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a == b,
            (Object::HostFunction(a), Object::HostFunction(b)) => Rc::ptr_eq(a, b),
            (Object::Module(a), Object::Module(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Canonical string form, as printed by `print` and the REPL. Strings
    /// render without quotes at this level.
    pub fn to_output(&self) -> String {
        match self {
            Object::Str(value) => value.to_string(),
            _ => self.to_repr(),
        }
    }

    /// String form used inside containers and for dict keys; strings are
    /// quoted here so nested output stays unambiguous.
    pub fn to_repr(&self) -> String {
        match self {
            Object::Nil => "nil".to_string(),
            Object::Bool(value) => value.to_string(),
            Object::Int(value) => value.to_string(),
            Object::Float(value) => format_float(*value),
            Object::Str(value) => format!("\"{value}\""),
            Object::List(elements) => {
                let parts: Vec<String> =
                    elements.borrow().iter().map(Object::to_repr).collect();
                format!("[{}]", parts.join(", "))
            }
            Object::Dict(dict) => dict.borrow().to_repr(),
            Object::StructDef(def) => format!("<struct {}>", def.name),
            Object::Struct(instance) => {
                let instance = instance.borrow();
                let parts: Vec<String> = instance
                    .def
                    .fields
                    .iter()
                    .map(|name| {
                        let value = instance
                            .fields
                            .get(name)
                            .map_or_else(|| "nil".to_string(), Object::to_repr);
                        format!("{name}: {value}")
                    })
                    .collect();
                format!("{}{{{}}}", instance.def.name, parts.join(", "))
            }
            Object::Function(function) => format!("<function {}>", function.name),
            Object::Method(method) => format!("<method {}>", method.function.name),
            Object::Builtin(builtin) => format!("<builtin {}>", builtin.name()),
            Object::HostFunction(function) => format!("<host function {}>", function.name),
            Object::Module(module) => format!("<module {}>", module.borrow().name),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_output())
    }
}

/// Floats always show a decimal point so `3.0` stays distinguishable from
/// the integer `3`.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_covers_empty_and_zero_values() {
        assert!(!Object::Nil.is_truthy());
        assert!(!Object::Bool(false).is_truthy());
        assert!(!Object::Int(0).is_truthy());
        assert!(!Object::Float(0.0).is_truthy());
        assert!(!Object::str("").is_truthy());
        assert!(!Object::list(Vec::new()).is_truthy());
        assert!(!Object::dict(DictObject::new()).is_truthy());

        assert!(Object::Bool(true).is_truthy());
        assert!(Object::Int(-1).is_truthy());
        assert!(Object::Float(0.5).is_truthy());
        assert!(Object::str("x").is_truthy());
        assert!(Object::list(vec![Object::Nil]).is_truthy());
    }

    #[test]
    fn int_and_float_never_compare_equal() {
        assert!(!Object::Int(1).value_eq(&Object::Float(1.0)));
        assert!(Object::Int(1).value_eq(&Object::Int(1)));
        assert!(Object::Float(1.0).value_eq(&Object::Float(1.0)));
    }

    #[test]
    fn lists_compare_elementwise() {
        let a = Object::list(vec![Object::Int(1), Object::str("x")]);
        let b = Object::list(vec![Object::Int(1), Object::str("x")]);
        let c = Object::list(vec![Object::Int(2), Object::str("x")]);
        assert!(a.value_eq(&b));
        assert!(!a.value_eq(&c));
    }

    #[test]
    fn output_and_repr_forms() {
        assert_eq!(Object::Int(42).to_output(), "42");
        assert_eq!(Object::Float(3.0).to_output(), "3.0");
        assert_eq!(Object::Float(2.5).to_output(), "2.5");
        assert_eq!(Object::str("hi").to_output(), "hi");
        assert_eq!(Object::str("hi").to_repr(), "\"hi\"");
        assert_eq!(Object::Nil.to_output(), "nil");
        let list = Object::list(vec![Object::Int(1), Object::str("a")]);
        assert_eq!(list.to_output(), "[1, \"a\"]");
    }

    #[test]
    fn shared_lists_are_aliases() {
        let a = Object::list(vec![Object::Int(1)]);
        let b = a.clone();
        if let Object::List(elements) = &a {
            elements.borrow_mut().push(Object::Int(2));
        }
        assert_eq!(b.to_output(), "[1, 2]");
    }
}
