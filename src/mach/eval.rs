use super::exec::{member_ident, Machine};
use super::{Complex, Function, Operation, Val};
use crate::error;
use crate::lang::ast::{Expression, Variable};
use crate::lang::{Error, Ident};
use chrono::Timelike;
use rand::Rng;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

impl<'a> Machine<'a> {
    pub fn eval(&mut self, expr: &Expression) -> Result<Val> {
        match expr {
            Expression::Integer(n) => Ok(Val::Integer(*n)),
            Expression::Real(n) => Ok(Val::Real(*n)),
            Expression::Complex(re, im) => Ok(Val::Complex(Complex::new(*re, *im))),
            Expression::String(s) => Ok(Val::String(s.clone())),
            Expression::Boolean(b) => Ok(Val::Boolean(*b)),
            Expression::Var(Variable::Unary(ident)) if Function::is_bare(&ident.key()) => {
                self.function(&ident.key(), &[])
            }
            Expression::Var(var) => self.fetch(var),
            Expression::Function(name, args) => self.function(name, args),
            Expression::Group(expr) => self.eval(expr),
            Expression::Unary(op, expr) => {
                let val = self.eval(expr)?;
                Operation::unary(*op, val)
            }
            Expression::Binary(op, lhs, rhs) => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                Operation::binary(*op, lhs, rhs)
            }
        }
    }

    pub fn fetch(&mut self, var: &Variable) -> Result<Val> {
        match var {
            Variable::Unary(ident) => Ok(self.ctx.vars.fetch(ident)),
            Variable::Member(ident, member) => Ok(self.ctx.vars.fetch(&member_ident(ident, member))),
            Variable::Index(ident, dims) => {
                let idx = self.indices(dims)?;
                self.ctx.vars.fetch_index(ident, &idx)
            }
            Variable::Array(ident) => {
                Err(error!(TypeMismatch; format!("array {} used as a value", ident)))
            }
        }
    }

    fn function(&mut self, name: &str, args: &[Expression]) -> Result<Val> {
        Function::check_arity(name, args.len())?;
        match name {
            "RND" => match args.first() {
                None => Ok(Val::Real(self.ctx.rng.gen::<f64>())),
                Some(expr) => {
                    let n = self.int(expr)?;
                    if n < 1 {
                        return Err(error!(IllegalFunctionCall; format!("RND({}) needs a positive limit", n)));
                    }
                    Ok(Val::Integer(self.ctx.rng.gen_range(1..=n)))
                }
            },
            "TIMER" => {
                let now = chrono::Local::now();
                let seconds = now.num_seconds_from_midnight() as f64
                    + f64::from(now.nanosecond() % 1_000_000_000) / 1e9;
                Ok(Val::Real(seconds))
            }
            "EOF" => {
                let handle = self.int(&args[0])?;
                Ok(Val::Boolean(self.devices.files.eof(handle)?))
            }
            "TELL" => {
                let handle = self.int(&args[0])?;
                let pos = self.devices.files.tell(handle)?;
                match i64::try_from(pos) {
                    Ok(pos) => Ok(Val::Integer(pos)),
                    Err(_) => Err(error!(Overflow)),
                }
            }
            "KEYDOWN" => {
                let key = self.string(&args[0])?;
                Ok(Val::Boolean(self.keys.is_down(&key)))
            }
            "KEYUP" => {
                let key = self.string(&args[0])?;
                Ok(Val::Boolean(self.keys.is_up(&key)))
            }
            "UBOUND" => {
                let ident = array_arg(&args[0])?;
                let dim = match args.get(1) {
                    Some(expr) => self.int(expr)?,
                    None => 1,
                };
                let array = match self.ctx.vars.array(ident) {
                    Some(array) => array,
                    None => {
                        return Err(error!(SubscriptOutOfRange; format!("{} is not dimensioned", ident)))
                    }
                };
                match usize::try_from(dim).ok().and_then(|d| array.ubound(d)) {
                    Some(bound) => Ok(Val::Integer(bound)),
                    None => Err(error!(SubscriptOutOfRange; format!("{} has no dimension {}", ident, dim))),
                }
            }
            _ => {
                let mut vals = Vec::with_capacity(args.len());
                for arg in args {
                    vals.push(self.eval(arg)?);
                }
                Function::call(name, vals)
            }
        }
    }
}

fn array_arg(expr: &Expression) -> Result<&Ident> {
    match expr {
        Expression::Var(Variable::Array(ident)) | Expression::Var(Variable::Unary(ident)) => Ok(ident),
        _ => Err(error!(TypeMismatch; "UBOUND needs an array")),
    }
}
