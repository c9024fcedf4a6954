use super::val::{Complex, Val};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use std::ops::RangeInclusive;

type Result<T> = std::result::Result<T, Error>;

/// ## Builtin functions
///
/// Functions that need machine state (RND, TIMER, EOF, TELL, KEYDOWN, KEYUP,
/// UBOUND) are listed here for arity checks and evaluated by the machine.

pub struct Function {}

impl Function {
    pub fn arity(name: &str) -> Option<RangeInclusive<usize>> {
        Some(match name {
            "ABS" | "SQR" | "SIN" | "COS" | "TAN" | "ATN" | "EXP" | "LOG" | "INT" | "SGN" => 1..=1,
            "LEN" | "UCASE$" | "LCASE$" | "STR$" | "VAL" | "CHR$" | "ASC" | "RE" | "IM" => 1..=1,
            "LEFT$" | "RIGHT$" | "CMPLX" => 2..=2,
            "MID$" => 2..=3,
            "INSTR" => 2..=3,
            "RND" => 0..=1,
            "TIMER" | "TIME$" | "DATE$" => 0..=0,
            "EOF" | "TELL" | "KEYDOWN" | "KEYUP" => 1..=1,
            "UBOUND" => 1..=2,
            _ => return None,
        })
    }

    /// Builtins that may be written without parentheses.
    pub fn is_bare(name: &str) -> bool {
        matches!(name, "TIMER" | "RND" | "TIME$" | "DATE$")
    }

    pub fn check_arity(name: &str, count: usize) -> Result<()> {
        match Function::arity(name) {
            None => Err(error!(IllegalFunctionCall; format!("unknown function: {}", name))),
            Some(range) if !range.contains(&count) => {
                let expected = if range.start() == range.end() {
                    format!("{}", range.start())
                } else {
                    format!("{} to {}", range.start(), range.end())
                };
                Err(error!(IllegalFunctionCall; format!(
                    "{} expects {} argument(s), got {}",
                    name, expected, count
                )))
            }
            Some(_) => Ok(()),
        }
    }

    /// Evaluates a builtin that depends only on its arguments.
    pub fn call(name: &str, args: Vec<Val>) -> Result<Val> {
        Function::check_arity(name, args.len())?;
        let mut args = args.into_iter();
        let mut arg = || match args.next() {
            Some(v) => Ok(v),
            None => Err(error!(InternalError; "missing argument")),
        };
        match name {
            "ABS" => Function::abs(arg()?),
            "SQR" => Function::sqr(arg()?),
            "SIN" => Ok(Val::Real(real(arg()?)?.sin())),
            "COS" => Ok(Val::Real(real(arg()?)?.cos())),
            "TAN" => Ok(Val::Real(real(arg()?)?.tan())),
            "ATN" => Ok(Val::Real(real(arg()?)?.atan())),
            "EXP" => match arg()? {
                Val::Complex(c) => Ok(Val::Complex(c.exp())),
                v => Ok(Val::Real(v.to_f64()?.exp())),
            },
            "LOG" => Function::log(arg()?),
            "INT" => Function::int(arg()?),
            "SGN" => {
                let n = real(arg()?)?;
                Ok(Val::Integer(if n > 0.0 {
                    1
                } else if n < 0.0 {
                    -1
                } else {
                    0
                }))
            }
            "LEN" => Ok(Val::Integer(string(arg()?)?.chars().count() as i64)),
            "LEFT$" => {
                let s = string(arg()?)?;
                let n = count(arg()?)?;
                Ok(Val::String(s.chars().take(n).collect::<String>().into()))
            }
            "RIGHT$" => {
                let s = string(arg()?)?;
                let n = count(arg()?)?;
                let len = s.chars().count();
                Ok(Val::String(
                    s.chars().skip(len.saturating_sub(n)).collect::<String>().into(),
                ))
            }
            "MID$" => {
                let s = string(arg()?)?;
                let start = position(arg()?)?;
                let n = match args.next() {
                    Some(v) => count(v)?,
                    None => usize::MAX,
                };
                Ok(Val::String(
                    s.chars().skip(start - 1).take(n).collect::<String>().into(),
                ))
            }
            "UCASE$" => Ok(Val::String(string(arg()?)?.to_uppercase().into())),
            "LCASE$" => Ok(Val::String(string(arg()?)?.to_lowercase().into())),
            "STR$" => {
                let v = arg()?;
                if !v.is_number() {
                    return Err(error!(TypeMismatch; "STR$ expects a number"));
                }
                Ok(Val::String(v.to_string().into()))
            }
            "VAL" => Ok(Function::val(&string(arg()?)?)),
            "CHR$" => {
                let code = i64::try_from(&arg()?)?;
                match u32::try_from(code).ok().and_then(std::char::from_u32) {
                    Some(ch) => Ok(Val::String(ch.to_string().into())),
                    None => Err(error!(IllegalFunctionCall; format!("CHR$({}) is not a character", code))),
                }
            }
            "ASC" => match string(arg()?)?.chars().next() {
                Some(ch) => Ok(Val::Integer(ch as i64)),
                None => Err(error!(IllegalFunctionCall; "ASC of an empty string")),
            },
            "INSTR" => {
                let first = arg()?;
                let second = arg()?;
                let (start, hay, needle) = match args.next() {
                    Some(third) => (position(first)?, string(second)?, string(third)?),
                    None => (1, string(first)?, string(second)?),
                };
                Ok(Val::Integer(Function::instr(start, &hay, &needle)))
            }
            "RE" => Ok(Val::Real(arg()?.to_complex()?.re)),
            "IM" => Ok(Val::Real(arg()?.to_complex()?.im)),
            "CMPLX" => {
                let re = real(arg()?)?;
                let im = real(arg()?)?;
                Ok(Val::Complex(Complex::new(re, im)))
            }
            "TIME$" => Ok(Val::String(
                chrono::Local::now().format("%H:%M:%S").to_string().into(),
            )),
            "DATE$" => Ok(Val::String(
                chrono::Local::now().format("%Y-%m-%d").to_string().into(),
            )),
            _ => Err(error!(InternalError; format!("{} needs the machine", name))),
        }
    }

    fn abs(val: Val) -> Result<Val> {
        match val {
            Val::Integer(n) => match n.checked_abs() {
                Some(n) => Ok(Val::Integer(n)),
                None => Err(error!(Overflow)),
            },
            Val::Complex(c) => Ok(Val::Real(c.abs())),
            v => Ok(Val::Real(v.to_f64()?.abs())),
        }
    }

    /// Square roots of negative numbers are imaginary.
    fn sqr(val: Val) -> Result<Val> {
        match val {
            Val::Complex(c) => Ok(Val::Complex(c.sqrt())),
            v => {
                let n = v.to_f64()?;
                if n < 0.0 {
                    Ok(Val::Complex(Complex::new(0.0, (-n).sqrt())))
                } else {
                    Ok(Val::Real(n.sqrt()))
                }
            }
        }
    }

    fn log(val: Val) -> Result<Val> {
        let c = val.to_complex()?;
        if c.re == 0.0 && c.im == 0.0 {
            return Err(error!(IllegalFunctionCall; "LOG of zero"));
        }
        match val {
            Val::Complex(_) => Ok(Val::Complex(c.ln())),
            _ if c.re < 0.0 => Ok(Val::Complex(c.ln())),
            _ => Ok(Val::Real(c.re.ln())),
        }
    }

    fn int(val: Val) -> Result<Val> {
        match val {
            Val::Integer(_) => Ok(val),
            v => {
                let n = v.to_f64()?.floor();
                if n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
                    Ok(Val::Integer(n as i64))
                } else {
                    Ok(Val::Real(n))
                }
            }
        }
    }

    /// Leading number in `s`, or 0.
    pub fn val(s: &str) -> Val {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Val::Integer(n);
        }
        let mut end = 0;
        for (i, _) in s.char_indices().chain(std::iter::once((s.len(), ' '))) {
            if s[..i].parse::<f64>().is_ok() {
                end = i;
            }
        }
        match s[..end].parse::<f64>() {
            Ok(n) if n.fract() == 0.0 && n.abs() < 1e15 && !s[..end].contains(&['.', 'e', 'E'][..]) => {
                Val::Integer(n as i64)
            }
            Ok(n) => Val::Real(n),
            Err(_) => Val::Integer(0),
        }
    }

    fn instr(start: usize, hay: &str, needle: &str) -> i64 {
        let chars: Vec<char> = hay.chars().collect();
        let needle: Vec<char> = needle.chars().collect();
        if start > chars.len() + 1 {
            return 0;
        }
        if needle.is_empty() {
            return start as i64;
        }
        for i in (start - 1)..chars.len() {
            if chars[i..].starts_with(&needle) {
                return i as i64 + 1;
            }
        }
        0
    }
}

fn real(val: Val) -> Result<f64> {
    match val {
        Val::Complex(_) => Err(error!(TypeMismatch; "expected a real number")),
        v => v.to_f64(),
    }
}

fn string(val: Val) -> Result<std::rc::Rc<str>> {
    match val {
        Val::String(s) => Ok(s),
        v => Err(error!(TypeMismatch; format!("expected a string, not {}", v.type_name()))),
    }
}

fn count(val: Val) -> Result<usize> {
    let n = i64::try_from(&val)?;
    match usize::try_from(n) {
        Ok(n) => Ok(n),
        Err(_) => Err(error!(IllegalFunctionCall; format!("negative length: {}", n))),
    }
}

/// 1-based position.
fn position(val: Val) -> Result<usize> {
    match count(val)? {
        0 => Err(error!(IllegalFunctionCall; "positions start at 1")),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn s(v: &str) -> Val {
        Val::String(v.into())
    }

    fn call(name: &str, args: Vec<Val>) -> Val {
        Function::call(name, args).unwrap()
    }

    #[test]
    fn test_strings() {
        assert_eq!(call("LEFT$", vec![s("hello"), Val::Integer(2)]), s("he"));
        assert_eq!(call("RIGHT$", vec![s("hello"), Val::Integer(3)]), s("llo"));
        assert_eq!(call("MID$", vec![s("hello"), Val::Integer(2), Val::Integer(3)]), s("ell"));
        assert_eq!(call("MID$", vec![s("hello"), Val::Integer(4)]), s("lo"));
        assert_eq!(call("INSTR", vec![s("banana"), s("na")]), Val::Integer(3));
        assert_eq!(call("INSTR", vec![Val::Integer(4), s("banana"), s("na")]), Val::Integer(5));
        assert_eq!(call("INSTR", vec![s("banana"), s("x")]), Val::Integer(0));
        assert_eq!(call("LEN", vec![s("héllo")]), Val::Integer(5));
        assert_eq!(call("CHR$", vec![Val::Integer(65)]), s("A"));
        assert_eq!(call("ASC", vec![s("a")]), Val::Integer(97));
        assert_eq!(call("STR$", vec![Val::Real(2.5)]), s("2.5"));
    }

    #[test]
    fn test_val() {
        assert_eq!(Function::val("42"), Val::Integer(42));
        assert_eq!(Function::val(" 3.5kg"), Val::Real(3.5));
        assert_eq!(Function::val("abc"), Val::Integer(0));
    }

    #[test]
    fn test_math() {
        assert_eq!(call("INT", vec![Val::Real(-2.5)]), Val::Integer(-3));
        assert_eq!(call("SGN", vec![Val::Integer(-9)]), Val::Integer(-1));
        assert_eq!(call("ABS", vec![Val::Complex(Complex::new(3.0, 4.0))]), Val::Real(5.0));
        assert_eq!(call("SQR", vec![Val::Integer(-9)]), Val::Complex(Complex::new(0.0, 3.0)));
        assert_eq!(call("RE", vec![Val::Complex(Complex::new(1.5, 2.0))]), Val::Real(1.5));
        assert_eq!(
            call("CMPLX", vec![Val::Integer(1), Val::Integer(2)]),
            Val::Complex(Complex::new(1.0, 2.0))
        );
    }

    #[test]
    fn test_arity_and_types() {
        let e = Function::call("LEFT$", vec![s("x")]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::IllegalFunctionCall);
        assert_eq!(e.text(), "LEFT$ expects 2 argument(s), got 1");
        let e = Function::call("NOPE", vec![]).unwrap_err();
        assert_eq!(e.text(), "unknown function: NOPE");
        let e = Function::call("LEN", vec![Val::Integer(1)]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
        let e = Function::call("LOG", vec![Val::Integer(0)]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::IllegalFunctionCall);
    }
}
