use crate::error;
use crate::lang::{Error, Ident};
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Complex {
        Complex { re, im }
    }

    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn add(self, o: Complex) -> Complex {
        Complex::new(self.re + o.re, self.im + o.im)
    }

    pub fn sub(self, o: Complex) -> Complex {
        Complex::new(self.re - o.re, self.im - o.im)
    }

    pub fn mul(self, o: Complex) -> Complex {
        Complex::new(
            self.re * o.re - self.im * o.im,
            self.re * o.im + self.im * o.re,
        )
    }

    pub fn div(self, o: Complex) -> Option<Complex> {
        let d = o.re * o.re + o.im * o.im;
        if d == 0.0 {
            return None;
        }
        Some(Complex::new(
            (self.re * o.re + self.im * o.im) / d,
            (self.im * o.re - self.re * o.im) / d,
        ))
    }

    pub fn exp(self) -> Complex {
        let m = self.re.exp();
        Complex::new(m * self.im.cos(), m * self.im.sin())
    }

    pub fn ln(self) -> Complex {
        Complex::new(self.abs().ln(), self.arg())
    }

    pub fn sqrt(self) -> Complex {
        let m = self.abs().sqrt();
        let a = self.arg() / 2.0;
        Complex::new(m * a.cos(), m * a.sin())
    }

    pub fn powc(self, w: Complex) -> Complex {
        if self.re == 0.0 && self.im == 0.0 {
            return Complex::new(0.0, 0.0);
        }
        w.mul(self.ln()).exp()
    }
}

/// Shortest decimal text: whole reals print without a fraction.
pub fn number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.re == 0.0 {
            write!(f, "{}i", number_text(self.im))
        } else if self.im < 0.0 {
            write!(f, "{}-{}i", number_text(self.re), number_text(-self.im))
        } else {
            write!(f, "{}+{}i", number_text(self.re), number_text(self.im))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Integer(i64),
    Real(f64),
    Complex(Complex),
    String(Rc<str>),
    Boolean(bool),
}

impl Val {
    /// Value of a variable that was never assigned.
    pub fn default_for(ident: &Ident) -> Val {
        match ident {
            Ident::Plain(_) | Ident::Integer(_) => Val::Integer(0),
            Ident::Real(_) => Val::Real(0.0),
            Ident::String(_) => Val::String("".into()),
            Ident::Complex(_) => Val::Complex(Complex::new(0.0, 0.0)),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Integer(_) => "integer",
            Val::Real(_) => "real",
            Val::Complex(_) => "complex",
            Val::String(_) => "string",
            Val::Boolean(_) => "boolean",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Val::Integer(_) | Val::Real(_) | Val::Complex(_))
    }

    /// Converts a value for storage in `ident`. Reals stored in integer
    /// variables truncate toward zero; booleans become -1 or 0.
    pub fn coerce(self, ident: &Ident) -> Result<Val> {
        use Val::*;
        match ident {
            Ident::Plain(_) => Ok(self),
            Ident::Integer(_) => match self {
                Integer(_) => Ok(self),
                Boolean(b) => Ok(Integer(if b { -1 } else { 0 })),
                Real(n) => Ok(Integer(real_to_i64(n.trunc())?)),
                _ => Err(mismatch(ident, &self)),
            },
            Ident::Real(_) => match self {
                Real(_) => Ok(self),
                Integer(n) => Ok(Real(n as f64)),
                Boolean(b) => Ok(Real(if b { -1.0 } else { 0.0 })),
                _ => Err(mismatch(ident, &self)),
            },
            Ident::String(_) => match self {
                String(_) => Ok(self),
                _ => Err(mismatch(ident, &self)),
            },
            Ident::Complex(_) => match self {
                Complex(_) => Ok(self),
                Integer(n) => Ok(Complex(self::Complex::new(n as f64, 0.0))),
                Real(n) => Ok(Complex(self::Complex::new(n, 0.0))),
                _ => Err(mismatch(ident, &self)),
            },
        }
    }

    /// Condition test. Non-zero numbers are true.
    pub fn is_true(&self) -> Result<bool> {
        match self {
            Val::Boolean(b) => Ok(*b),
            Val::Integer(n) => Ok(*n != 0),
            Val::Real(n) => Ok(*n != 0.0),
            _ => Err(error!(TypeMismatch; format!(
                "condition must be a number or boolean, not {}",
                self.type_name()
            ))),
        }
    }

    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Val::Integer(n) => Ok(*n as f64),
            Val::Real(n) => Ok(*n),
            Val::Boolean(b) => Ok(if *b { -1.0 } else { 0.0 }),
            _ => Err(error!(TypeMismatch; format!("expected a number, not {}", self.type_name()))),
        }
    }

    pub fn to_complex(&self) -> Result<Complex> {
        match self {
            Val::Complex(c) => Ok(*c),
            _ => Ok(Complex::new(self.to_f64()?, 0.0)),
        }
    }
}

fn mismatch(ident: &Ident, val: &Val) -> Error {
    error!(TypeMismatch; format!("cannot store {} in {}", val.type_name(), ident))
}

fn real_to_i64(n: f64) -> Result<i64> {
    if n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Ok(n as i64)
    } else {
        Err(error!(Overflow))
    }
}

impl TryFrom<&Val> for i64 {
    type Error = Error;

    fn try_from(val: &Val) -> Result<i64> {
        match val {
            Val::Integer(n) => Ok(*n),
            Val::Real(n) => real_to_i64(n.trunc()),
            Val::Boolean(b) => Ok(if *b { -1 } else { 0 }),
            _ => Err(error!(TypeMismatch; format!("expected a number, not {}", val.type_name()))),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Integer(n) => write!(f, "{}", n),
            Val::Real(n) => write!(f, "{}", number_text(*n)),
            Val::Complex(c) => write!(f, "{}", c),
            Val::String(s) => write!(f, "{}", s),
            Val::Boolean(true) => write!(f, "TRUE"),
            Val::Boolean(false) => write!(f, "FALSE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_display() {
        assert_eq!(Val::Real(3.0).to_string(), "3");
        assert_eq!(Val::Real(2.5).to_string(), "2.5");
        assert_eq!(Val::Real(-0.0).to_string(), "0");
        assert_eq!(Val::Complex(Complex::new(3.0, 4.0)).to_string(), "3+4i");
        assert_eq!(Val::Complex(Complex::new(1.0, -0.5)).to_string(), "1-0.5i");
        assert_eq!(Val::Complex(Complex::new(0.0, 2.0)).to_string(), "2i");
        assert_eq!(Val::Boolean(true).to_string(), "TRUE");
    }

    #[test]
    fn test_coerce() {
        let i = Ident::new("n%");
        assert_eq!(Val::Real(-2.7).coerce(&i).unwrap(), Val::Integer(-2));
        assert_eq!(Val::Boolean(true).coerce(&i).unwrap(), Val::Integer(-1));
        let e = Val::Integer(1).coerce(&Ident::new("s$")).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
        assert_eq!(
            Val::Integer(2).coerce(&Ident::new("z&")).unwrap(),
            Val::Complex(Complex::new(2.0, 0.0))
        );
        assert_eq!(Val::Real(1e30).coerce(&i).unwrap_err().code(), ErrorCode::Overflow);
    }

    #[test]
    fn test_complex_math() {
        let z = Complex::new(-4.0, 0.0).sqrt();
        assert!(z.re.abs() < 1e-12 && (z.im - 2.0).abs() < 1e-12);
        let q = Complex::new(1.0, 1.0).div(Complex::new(0.0, 1.0)).unwrap();
        assert_eq!(q, Complex::new(1.0, -1.0));
        assert!(Complex::new(1.0, 0.0).div(Complex::new(0.0, 0.0)).is_none());
    }
}
