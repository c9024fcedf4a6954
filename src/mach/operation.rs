use super::val::{Complex, Val};
use crate::error;
use crate::lang::ast::{BinaryOp, UnaryOp};
use crate::lang::Error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Operands promoted to a common representation.
enum Pair {
    Integers(i64, i64),
    Reals(f64, f64),
    Complexes(Complex, Complex),
    Strings(Rc<str>, Rc<str>),
}

fn as_integer(v: &Val) -> Option<i64> {
    match v {
        Val::Integer(n) => Some(*n),
        Val::Boolean(b) => Some(if *b { -1 } else { 0 }),
        _ => None,
    }
}

fn promote(lhs: Val, rhs: Val) -> Result<Pair> {
    use Val::*;
    if let (Some(l), Some(r)) = (as_integer(&lhs), as_integer(&rhs)) {
        return Ok(Pair::Integers(l, r));
    }
    match (lhs, rhs) {
        (String(l), String(r)) => Ok(Pair::Strings(l, r)),
        (String(_), _) | (_, String(_)) => Err(error!(TypeMismatch; "cannot mix strings and numbers")),
        (l @ Complex(_), r) | (l, r @ Complex(_)) => {
            Ok(Pair::Complexes(l.to_complex()?, r.to_complex()?))
        }
        (l, r) => Ok(Pair::Reals(l.to_f64()?, r.to_f64()?)),
    }
}

pub struct Operation {}

impl Operation {
    pub fn unary(op: UnaryOp, val: Val) -> Result<Val> {
        match op {
            UnaryOp::Negate => Operation::negate(val),
            UnaryOp::Not => Operation::not(val),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Val, rhs: Val) -> Result<Val> {
        use BinaryOp::*;
        match op {
            Power => Operation::power(lhs, rhs),
            Multiply => Operation::multiply(lhs, rhs),
            Divide => Operation::divide(lhs, rhs),
            Modulus => Operation::modulus(lhs, rhs),
            Add => Operation::sum(lhs, rhs),
            Subtract => Operation::subtract(lhs, rhs),
            And | Or | Xor => Operation::logical(op, lhs, rhs),
            _ => Ok(Val::Boolean(Operation::compare(op, lhs, rhs)?)),
        }
    }

    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_neg() {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow)),
            },
            Real(n) => Ok(Real(-n)),
            Complex(c) => Ok(Complex(self::Complex::new(-c.re, -c.im))),
            Boolean(b) => Ok(Integer(if b { 1 } else { 0 })),
            String(_) => Err(error!(TypeMismatch; "cannot negate a string")),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        match val {
            Val::Boolean(b) => Ok(Val::Boolean(!b)),
            v => Ok(Val::Integer(!i64::try_from(&v)?)),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        match promote(lhs, rhs)? {
            Pair::Integers(l, r) if r >= 0 => {
                let exp = match u32::try_from(r) {
                    Ok(exp) => exp,
                    Err(_) => return Err(error!(Overflow)),
                };
                match l.checked_pow(exp) {
                    Some(n) => Ok(Val::Integer(n)),
                    None => Err(error!(Overflow)),
                }
            }
            Pair::Integers(l, r) => Operation::real_power(l as f64, r as f64),
            Pair::Reals(l, r) => Operation::real_power(l, r),
            Pair::Complexes(l, r) => Ok(Val::Complex(l.powc(r))),
            Pair::Strings(..) => Err(error!(TypeMismatch; "cannot raise a string to a power")),
        }
    }

    fn real_power(l: f64, r: f64) -> Result<Val> {
        if l == 0.0 && r < 0.0 {
            return Err(error!(DivisionByZero));
        }
        if l < 0.0 && r.fract() != 0.0 {
            return Ok(Val::Complex(Complex::new(l, 0.0).powc(Complex::new(r, 0.0))));
        }
        Ok(Val::Real(l.powf(r)))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        match promote(lhs, rhs)? {
            Pair::Integers(l, r) => match l.checked_mul(r) {
                Some(n) => Ok(Val::Integer(n)),
                None => Err(error!(Overflow)),
            },
            Pair::Reals(l, r) => Ok(Val::Real(l * r)),
            Pair::Complexes(l, r) => Ok(Val::Complex(l.mul(r))),
            Pair::Strings(..) => Err(error!(TypeMismatch; "cannot multiply strings")),
        }
    }

    /// Division always produces a real or complex quotient.
    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        match promote(lhs, rhs)? {
            Pair::Integers(l, r) => Operation::divide_reals(l as f64, r as f64),
            Pair::Reals(l, r) => Operation::divide_reals(l, r),
            Pair::Complexes(l, r) => match l.div(r) {
                Some(c) => Ok(Val::Complex(c)),
                None => Err(error!(DivisionByZero)),
            },
            Pair::Strings(..) => Err(error!(TypeMismatch; "cannot divide strings")),
        }
    }

    fn divide_reals(l: f64, r: f64) -> Result<Val> {
        if r == 0.0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(Val::Real(l / r))
        }
    }

    pub fn modulus(lhs: Val, rhs: Val) -> Result<Val> {
        match promote(lhs, rhs)? {
            Pair::Integers(_, 0) => Err(error!(DivisionByZero)),
            Pair::Integers(l, r) => match l.checked_rem(r) {
                Some(n) => Ok(Val::Integer(n)),
                None => Err(error!(Overflow)),
            },
            Pair::Reals(_, r) if r == 0.0 => Err(error!(DivisionByZero)),
            Pair::Reals(l, r) => Ok(Val::Real(l % r)),
            _ => Err(error!(TypeMismatch; "MOD requires real numbers")),
        }
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        match promote(lhs, rhs)? {
            Pair::Integers(l, r) => match l.checked_add(r) {
                Some(n) => Ok(Val::Integer(n)),
                None => Err(error!(Overflow)),
            },
            Pair::Reals(l, r) => Ok(Val::Real(l + r)),
            Pair::Complexes(l, r) => Ok(Val::Complex(l.add(r))),
            Pair::Strings(l, r) => Ok(Val::String((l.to_string() + &r).into())),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        match promote(lhs, rhs)? {
            Pair::Integers(l, r) => match l.checked_sub(r) {
                Some(n) => Ok(Val::Integer(n)),
                None => Err(error!(Overflow)),
            },
            Pair::Reals(l, r) => Ok(Val::Real(l - r)),
            Pair::Complexes(l, r) => Ok(Val::Complex(l.sub(r))),
            Pair::Strings(..) => Err(error!(TypeMismatch; "cannot subtract strings")),
        }
    }

    /// Booleans combine logically; anything else combines bitwise as
    /// integers.
    pub fn logical(op: BinaryOp, lhs: Val, rhs: Val) -> Result<Val> {
        if let (Val::Boolean(l), Val::Boolean(r)) = (&lhs, &rhs) {
            return Ok(Val::Boolean(match op {
                BinaryOp::And => *l && *r,
                BinaryOp::Or => *l || *r,
                _ => *l != *r,
            }));
        }
        let l = i64::try_from(&lhs)?;
        let r = i64::try_from(&rhs)?;
        Ok(Val::Integer(match op {
            BinaryOp::And => l & r,
            BinaryOp::Or => l | r,
            _ => l ^ r,
        }))
    }

    pub fn compare(op: BinaryOp, lhs: Val, rhs: Val) -> Result<bool> {
        use std::cmp::Ordering;
        let ordering = match promote(lhs, rhs)? {
            Pair::Integers(l, r) => l.cmp(&r),
            Pair::Reals(l, r) => match l.partial_cmp(&r) {
                Some(o) => o,
                None => return Ok(op == BinaryOp::NotEqual),
            },
            Pair::Strings(l, r) => l.cmp(&r),
            Pair::Complexes(l, r) => {
                return match op {
                    BinaryOp::Equal => Ok(l == r),
                    BinaryOp::NotEqual => Ok(l != r),
                    _ => Err(error!(TypeMismatch; "complex numbers are not ordered")),
                }
            }
        };
        Ok(match op {
            BinaryOp::Equal => ordering == Ordering::Equal,
            BinaryOp::NotEqual => ordering != Ordering::Equal,
            BinaryOp::Less => ordering == Ordering::Less,
            BinaryOp::LessEqual => ordering != Ordering::Greater,
            BinaryOp::Greater => ordering == Ordering::Greater,
            BinaryOp::GreaterEqual => ordering != Ordering::Less,
            _ => return Err(error!(InternalError; format!("{} is not a comparison", op))),
        })
    }

    pub fn equal_bool(lhs: Val, rhs: Val) -> Result<bool> {
        Operation::compare(BinaryOp::Equal, lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn op(o: BinaryOp, l: Val, r: Val) -> Result<Val> {
        Operation::binary(o, l, r)
    }

    #[test]
    fn test_numeric_tower() {
        use BinaryOp::*;
        assert_eq!(op(Add, Val::Integer(2), Val::Integer(3)).unwrap(), Val::Integer(5));
        assert_eq!(op(Add, Val::Integer(2), Val::Real(0.5)).unwrap(), Val::Real(2.5));
        assert_eq!(op(Divide, Val::Integer(7), Val::Integer(2)).unwrap(), Val::Real(3.5));
        assert_eq!(
            op(Multiply, Val::Complex(Complex::new(0.0, 1.0)), Val::Complex(Complex::new(0.0, 1.0)))
                .unwrap(),
            Val::Complex(Complex::new(-1.0, 0.0))
        );
        assert_eq!(op(Power, Val::Integer(2), Val::Integer(10)).unwrap(), Val::Integer(1024));
        assert_eq!(op(Power, Val::Integer(2), Val::Integer(-1)).unwrap(), Val::Real(0.5));
        assert_eq!(op(Modulus, Val::Integer(7), Val::Integer(3)).unwrap(), Val::Integer(1));
    }

    #[test]
    fn test_errors() {
        use BinaryOp::*;
        let code = |r: Result<Val>| r.unwrap_err().code();
        assert_eq!(code(op(Divide, Val::Integer(1), Val::Integer(0))), ErrorCode::DivisionByZero);
        assert_eq!(code(op(Modulus, Val::Integer(1), Val::Integer(0))), ErrorCode::DivisionByZero);
        assert_eq!(code(op(Add, Val::Integer(i64::MAX), Val::Integer(1))), ErrorCode::Overflow);
        assert_eq!(code(op(Add, Val::String("a".into()), Val::Integer(1))), ErrorCode::TypeMismatch);
        assert_eq!(
            code(op(Less, Val::Complex(Complex::new(1.0, 1.0)), Val::Integer(1))),
            ErrorCode::TypeMismatch
        );
    }

    #[test]
    fn test_comparison_and_logic() {
        use BinaryOp::*;
        assert_eq!(op(Less, Val::Integer(1), Val::Real(1.5)).unwrap(), Val::Boolean(true));
        assert_eq!(
            op(Equal, Val::String("abc".into()), Val::String("abc".into())).unwrap(),
            Val::Boolean(true)
        );
        assert_eq!(op(And, Val::Boolean(true), Val::Boolean(false)).unwrap(), Val::Boolean(false));
        assert_eq!(op(Or, Val::Integer(12), Val::Integer(3)).unwrap(), Val::Integer(15));
        assert_eq!(Operation::not(Val::Integer(0)).unwrap(), Val::Integer(-1));
        assert_eq!(
            op(Add, Val::String("ab".into()), Val::String("cd".into())).unwrap(),
            Val::String("abcd".into())
        );
    }
}
