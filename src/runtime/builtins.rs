//! Host callbacks reachable from every module: the fixed builtin set and
//! user-registered host-stdlib functions.

use std::fmt;

use crate::error::ErrorKind;
use crate::runtime::object::Object;
use crate::runtime::sequence::Sequence;

/// The builtin functions bound in every root scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFunction {
    Print,
    Len,
    Type,
    Str,
}

/// What a builtin call produced: a value, or lines for the output stream.
pub enum BuiltinEffect {
    Value(Object),
    Print(String),
}

impl BuiltinFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "print" => BuiltinFunction::Print,
            "len" => BuiltinFunction::Len,
            "type" => BuiltinFunction::Type,
            "str" => BuiltinFunction::Str,
            _ => return None,
        };
        Some(builtin)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFunction::Print => "print",
            BuiltinFunction::Len => "len",
            BuiltinFunction::Type => "type",
            BuiltinFunction::Str => "str",
        }
    }

    /// Runs the builtin. The caller attaches the call-site location to any
    /// returned error kind.
    pub fn call(&self, args: &[Object]) -> Result<BuiltinEffect, ErrorKind> {
        match self {
            BuiltinFunction::Print => {
                let parts: Vec<String> = args.iter().map(Object::to_output).collect();
                Ok(BuiltinEffect::Print(parts.join(" ")))
            }
            BuiltinFunction::Len => {
                let arg = single(args)?;
                if let Some(seq) = Sequence::of(arg) {
                    return Ok(BuiltinEffect::Value(Object::Int(seq.len() as i64)));
                }
                if let Object::Dict(dict) = arg {
                    return Ok(BuiltinEffect::Value(Object::Int(dict.borrow().len() as i64)));
                }
                Err(ErrorKind::TypeMismatch {
                    expected: "string, list, or dict".to_string(),
                    actual: arg.kind_name().to_string(),
                })
            }
            BuiltinFunction::Type => {
                let arg = single(args)?;
                Ok(BuiltinEffect::Value(Object::str(arg.kind_name())))
            }
            BuiltinFunction::Str => {
                let arg = single(args)?;
                Ok(BuiltinEffect::Value(Object::str(arg.to_output())))
            }
        }
    }
}

fn single(args: &[Object]) -> Result<&Object, ErrorKind> {
    match args {
        [arg] => Ok(arg),
        _ => Err(ErrorKind::TypeMismatch {
            expected: "1 argument".to_string(),
            actual: format!("{} arguments", args.len()),
        }),
    }
}

/// A function registered by the embedding host. Failures come back as plain
/// messages; the evaluator tags them with the call site.
pub struct HostFunction {
    pub name: String,
    pub func: Box<dyn Fn(&[Object]) -> Result<Object, String>>,
}

impl HostFunction {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&[Object]) -> Result<Object, String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
