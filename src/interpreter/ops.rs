//! Binary and unary operator semantics.
//!
//! Pure value-in/value-out; the evaluator attaches locations to the error
//! kinds returned here. `&&`/`||` never reach this module because the
//! evaluator short-circuits them.

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::ErrorKind;
use crate::runtime::object::Object;

pub fn binary(op: BinaryOp, lhs: &Object, rhs: &Object) -> Result<Object, ErrorKind> {
    match op {
        BinaryOp::Add => add(lhs, rhs).ok_or_else(|| invalid(op, lhs, rhs)),
        BinaryOp::Sub | BinaryOp::Mul => {
            arith(op, lhs, rhs).ok_or_else(|| invalid(op, lhs, rhs))
        }
        BinaryOp::Div => divide(lhs, rhs),
        BinaryOp::Mod => modulo(lhs, rhs),
        BinaryOp::Eq => Ok(Object::Bool(lhs.value_eq(rhs))),
        BinaryOp::NotEq => Ok(Object::Bool(!lhs.value_eq(rhs))),
        BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq => {
            compare(op, lhs, rhs).ok_or_else(|| invalid(op, lhs, rhs))
        }
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor | BinaryOp::Shl | BinaryOp::Shr => {
            bitwise(op, lhs, rhs).ok_or_else(|| invalid(op, lhs, rhs))
        }
        BinaryOp::And | BinaryOp::Or => Err(ErrorKind::Internal(
            "logical operator reached value dispatch".to_string(),
        )),
    }
}

pub fn unary(op: UnaryOp, operand: &Object) -> Result<Object, ErrorKind> {
    match (op, operand) {
        (UnaryOp::Pos, Object::Int(_) | Object::Float(_)) => Ok(operand.clone()),
        (UnaryOp::Neg, Object::Int(value)) => Ok(Object::Int(value.wrapping_neg())),
        (UnaryOp::Neg, Object::Float(value)) => Ok(Object::Float(-value)),
        // `!` accepts any value through the truthiness predicate.
        (UnaryOp::Not, _) => Ok(Object::Bool(!operand.is_truthy())),
        (UnaryOp::BitNot, Object::Int(value)) => Ok(Object::Int(!value)),
        _ => Err(ErrorKind::InvalidUnaryOp {
            op: op.to_string(),
            operand: operand.kind_name(),
        }),
    }
}

/// `+` also concatenates strings and lists.
fn add(lhs: &Object, rhs: &Object) -> Option<Object> {
    match (lhs, rhs) {
        (Object::Str(a), Object::Str(b)) => Some(Object::str(format!("{a}{b}"))),
        (Object::List(a), Object::List(b)) => {
            let mut elements = a.borrow().clone();
            elements.extend(b.borrow().iter().cloned());
            Some(Object::list(elements))
        }
        _ => arith(BinaryOp::Add, lhs, rhs),
    }
}

/// Numeric `+ - *` with int/float promotion.
fn arith(op: BinaryOp, lhs: &Object, rhs: &Object) -> Option<Object> {
    match (lhs, rhs) {
        (Object::Int(a), Object::Int(b)) => {
            let value = match op {
                BinaryOp::Add => a.wrapping_add(*b),
                BinaryOp::Sub => a.wrapping_sub(*b),
                BinaryOp::Mul => a.wrapping_mul(*b),
                _ => return None,
            };
            Some(Object::Int(value))
        }
        _ => {
            let (a, b) = promote(lhs, rhs)?;
            let value = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                _ => return None,
            };
            Some(Object::Float(value))
        }
    }
}

/// Int/int division truncates; any zero divisor is an error. Mixed operands
/// promote to float.
fn divide(lhs: &Object, rhs: &Object) -> Result<Object, ErrorKind> {
    match (lhs, rhs) {
        (Object::Int(_), Object::Int(0)) => Err(ErrorKind::DivisionByZero),
        (Object::Int(a), Object::Int(b)) => Ok(Object::Int(a.wrapping_div(*b))),
        _ => match promote(lhs, rhs) {
            Some((_, b)) if b == 0.0 => Err(ErrorKind::DivisionByZero),
            Some((a, b)) => Ok(Object::Float(a / b)),
            None => Err(invalid(BinaryOp::Div, lhs, rhs)),
        },
    }
}

fn modulo(lhs: &Object, rhs: &Object) -> Result<Object, ErrorKind> {
    match (lhs, rhs) {
        (Object::Int(_), Object::Int(0)) => Err(ErrorKind::DivisionByZero),
        (Object::Int(a), Object::Int(b)) => Ok(Object::Int(a.wrapping_rem(*b))),
        _ => Err(invalid(BinaryOp::Mod, lhs, rhs)),
    }
}

/// Ordering over numeric pairs (promoted) and string pairs (lexicographic by
/// codepoint).
fn compare(op: BinaryOp, lhs: &Object, rhs: &Object) -> Option<Object> {
    let ordering = match (lhs, rhs) {
        (Object::Int(a), Object::Int(b)) => a.cmp(b),
        (Object::Str(a), Object::Str(b)) => a.cmp(b),
        _ => {
            let (a, b) = promote(lhs, rhs)?;
            a.partial_cmp(&b)?
        }
    };
    let result = match op {
        BinaryOp::Less => ordering.is_lt(),
        BinaryOp::LessEq => ordering.is_le(),
        BinaryOp::Greater => ordering.is_gt(),
        BinaryOp::GreaterEq => ordering.is_ge(),
        _ => return None,
    };
    Some(Object::Bool(result))
}

fn bitwise(op: BinaryOp, lhs: &Object, rhs: &Object) -> Option<Object> {
    let (Object::Int(a), Object::Int(b)) = (lhs, rhs) else {
        return None;
    };
    let value = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl => a.wrapping_shl(*b as u32),
        BinaryOp::Shr => a.wrapping_shr(*b as u32),
        _ => return None,
    };
    Some(Object::Int(value))
}

fn promote(lhs: &Object, rhs: &Object) -> Option<(f64, f64)> {
    let a = match lhs {
        Object::Int(value) => *value as f64,
        Object::Float(value) => *value,
        _ => return None,
    };
    let b = match rhs {
        Object::Int(value) => *value as f64,
        Object::Float(value) => *value,
        _ => return None,
    };
    Some((a, b))
}

fn invalid(op: BinaryOp, lhs: &Object, rhs: &Object) -> ErrorKind {
    ErrorKind::InvalidBinaryOp {
        op: op.to_string(),
        lhs: lhs.kind_name(),
        rhs: rhs.kind_name(),
    }
}
