use super::val::Val;
use super::DEFAULT_ARRAY_BOUND;
use crate::error;
use crate::lang::{Error, Ident};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const MAX_ARRAY_ELEMENTS: usize = 1 << 24;

/// ## Arrays
///
/// Zero-based with an inclusive upper bound per dimension.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    lens: Vec<usize>,
    data: Vec<Val>,
}

impl Array {
    pub fn new(bounds: &[i64], fill: Val) -> Result<Array> {
        let mut lens = vec![];
        let mut total: usize = 1;
        for b in bounds {
            let len = match usize::try_from(*b) {
                Ok(b) => b + 1,
                Err(_) => return Err(error!(SubscriptOutOfRange; format!("bad array bound: {}", b))),
            };
            total = total.saturating_mul(len);
            lens.push(len);
        }
        if total > MAX_ARRAY_ELEMENTS {
            return Err(error!(Overflow; "array too large"));
        }
        Ok(Array {
            lens,
            data: vec![fill; total],
        })
    }

    /// One-dimensional array holding `values`.
    pub fn from_values(values: Vec<Val>) -> Array {
        Array {
            lens: vec![values.len()],
            data: values,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.lens.len()
    }

    /// Upper bound of dimension `dim`, counted from 1. Empty dimensions
    /// report -1.
    pub fn ubound(&self, dim: usize) -> Option<i64> {
        let len = *self.lens.get(dim.checked_sub(1)?)?;
        Some(len as i64 - 1)
    }

    fn offset(&self, idx: &[i64]) -> Result<usize> {
        if idx.len() != self.lens.len() {
            return Err(error!(SubscriptOutOfRange; format!(
                "array has {} dimension(s), not {}",
                self.lens.len(),
                idx.len()
            )));
        }
        let mut offset = 0;
        for (i, len) in idx.iter().zip(&self.lens) {
            match usize::try_from(*i) {
                Ok(i) if i < *len => offset = offset * len + i,
                _ => return Err(error!(SubscriptOutOfRange; format!("index {} out of range", i))),
            }
        }
        Ok(offset)
    }

    pub fn get(&self, idx: &[i64]) -> Result<&Val> {
        let offset = self.offset(idx)?;
        Ok(&self.data[offset])
    }

    pub fn set(&mut self, idx: &[i64], val: Val) -> Result<()> {
        let offset = self.offset(idx)?;
        self.data[offset] = val;
        Ok(())
    }

    pub fn values(&self) -> &[Val] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [Val] {
        &mut self.data
    }
}

/// Where a name lives. `frame` is `None` for globals.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    frame: Option<usize>,
    key: Rc<str>,
}

/// Variables of one SUB invocation, or the globals.
#[derive(Debug, Default)]
pub struct Scope {
    vars: HashMap<Rc<str>, Val>,
    arrays: HashMap<Rc<str>, Array>,
    refs: HashMap<Rc<str>, Location>,
    array_refs: HashMap<Rc<str>, Location>,
}

impl Scope {
    pub fn new() -> Scope {
        Scope::default()
    }

    pub fn local(&mut self, ident: &Ident, val: Val) -> Result<()> {
        let val = val.coerce(ident)?;
        self.vars.insert(ident.key(), val);
        Ok(())
    }

    pub fn local_array(&mut self, ident: &Ident, array: Array) {
        self.arrays.insert(ident.key(), array);
    }

    pub fn bind(&mut self, ident: &Ident, target: Location) {
        self.refs.insert(ident.key(), target);
    }

    pub fn bind_array(&mut self, ident: &Ident, target: Location) {
        self.array_refs.insert(ident.key(), target);
    }
}

/// ## Variable memory
///
/// Names not local to the innermost SUB frame resolve to globals.

#[derive(Debug, Default)]
pub struct Var {
    globals: Scope,
    frames: Vec<Scope>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.globals = Scope::default();
        self.frames.clear();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self, scope: Scope) {
        self.frames.push(scope);
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    pub fn truncate_frames(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    fn scope(&self, frame: Option<usize>) -> &Scope {
        match frame.and_then(|f| self.frames.get(f)) {
            Some(scope) => scope,
            None => &self.globals,
        }
    }

    fn scope_mut(&mut self, frame: Option<usize>) -> &mut Scope {
        match frame {
            Some(f) if f < self.frames.len() => &mut self.frames[f],
            _ => &mut self.globals,
        }
    }

    pub fn locate(&self, ident: &Ident) -> Location {
        let key = ident.key();
        if let Some(top) = self.frames.last() {
            if let Some(loc) = top.refs.get(&key) {
                return loc.clone();
            }
            if top.vars.contains_key(&key) {
                return Location {
                    frame: Some(self.frames.len() - 1),
                    key,
                };
            }
        }
        Location { frame: None, key }
    }

    pub fn locate_array(&self, ident: &Ident) -> Location {
        let key = ident.key();
        if let Some(top) = self.frames.last() {
            if let Some(loc) = top.array_refs.get(&key) {
                return loc.clone();
            }
            if top.arrays.contains_key(&key) {
                return Location {
                    frame: Some(self.frames.len() - 1),
                    key,
                };
            }
        }
        Location { frame: None, key }
    }

    pub fn fetch(&self, ident: &Ident) -> Val {
        let loc = self.locate(ident);
        match self.scope(loc.frame).vars.get(&loc.key) {
            Some(val) => val.clone(),
            None => Val::default_for(ident),
        }
    }

    pub fn store(&mut self, ident: &Ident, val: Val) -> Result<()> {
        let val = val.coerce(ident)?;
        let loc = self.locate(ident);
        self.scope_mut(loc.frame).vars.insert(loc.key, val);
        Ok(())
    }

    /// LOCAL inside a SUB. At the top level every name is already global.
    pub fn declare_local(&mut self, ident: &Ident) {
        if let Some(top) = self.frames.last_mut() {
            top.vars
                .entry(ident.key())
                .or_insert_with(|| Val::default_for(ident));
        }
    }

    pub fn array(&self, ident: &Ident) -> Option<&Array> {
        let loc = self.locate_array(ident);
        self.scope(loc.frame).arrays.get(&loc.key)
    }

    pub fn set_array(&mut self, ident: &Ident, array: Array) {
        let loc = self.locate_array(ident);
        self.scope_mut(loc.frame).arrays.insert(loc.key, array);
    }

    /// DIM inside a SUB creates a local array unless the name is bound to
    /// a caller's array.
    pub fn dimension(&mut self, ident: &Ident, bounds: &[i64]) -> Result<()> {
        let key = ident.key();
        let frame = match self.frames.last() {
            Some(top) if !top.array_refs.contains_key(&key) => Some(self.frames.len() - 1),
            _ => None,
        };
        let loc = match frame {
            Some(f) => Location { frame: Some(f), key },
            None => self.locate_array(ident),
        };
        if self.scope(loc.frame).arrays.contains_key(&loc.key) {
            return Err(error!(RedimensionedArray; format!("{} is already dimensioned", ident)));
        }
        let array = Array::new(bounds, Val::default_for(ident))?;
        self.scope_mut(loc.frame).arrays.insert(loc.key, array);
        Ok(())
    }

    pub fn erase(&mut self, ident: &Ident) {
        let loc = self.locate_array(ident);
        self.scope_mut(loc.frame).arrays.remove(&loc.key);
    }

    fn auto_array(&mut self, ident: &Ident, dims: usize) -> Result<&mut Array> {
        let loc = self.locate_array(ident);
        let scope = self.scope_mut(loc.frame);
        if !scope.arrays.contains_key(&loc.key) {
            let array = Array::new(&vec![DEFAULT_ARRAY_BOUND; dims], Val::default_for(ident))?;
            scope.arrays.insert(loc.key.clone(), array);
        }
        match scope.arrays.get_mut(&loc.key) {
            Some(array) => Ok(array),
            None => Err(error!(InternalError; "array vanished")),
        }
    }

    pub fn fetch_index(&mut self, ident: &Ident, idx: &[i64]) -> Result<Val> {
        Ok(self.auto_array(ident, idx.len())?.get(idx)?.clone())
    }

    pub fn store_index(&mut self, ident: &Ident, idx: &[i64], val: Val) -> Result<()> {
        let val = val.coerce(ident)?;
        self.auto_array(ident, idx.len())?.set(idx, val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn id(s: &str) -> Ident {
        Ident::new(s)
    }

    #[test]
    fn test_defaults_and_case() {
        let mut v = Var::new();
        assert_eq!(v.fetch(&id("s$")), Val::String("".into()));
        v.store(&id("Count%"), Val::Real(4.9)).unwrap();
        assert_eq!(v.fetch(&id("COUNT%")), Val::Integer(4));
        assert_eq!(v.fetch(&id("count")), Val::Integer(0));
    }

    #[test]
    fn test_arrays() {
        let mut v = Var::new();
        v.dimension(&id("a%"), &[3]).unwrap();
        v.store_index(&id("a%"), &[3], Val::Integer(7)).unwrap();
        assert_eq!(v.fetch_index(&id("a%"), &[3]).unwrap(), Val::Integer(7));
        let e = v.fetch_index(&id("a%"), &[4]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::SubscriptOutOfRange);
        let e = v.dimension(&id("a%"), &[5]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::RedimensionedArray);
        v.erase(&id("a%"));
        assert!(v.dimension(&id("a%"), &[5]).is_ok());
    }

    #[test]
    fn test_auto_dimension() {
        let mut v = Var::new();
        v.store_index(&id("m"), &[10, 10], Val::Integer(1)).unwrap();
        assert!(v.fetch_index(&id("m"), &[11, 0]).is_err());
        assert_eq!(v.array(&id("m")).unwrap().ubound(2), Some(10));
    }

    #[test]
    fn test_frames_and_bindings() {
        let mut v = Var::new();
        v.store(&id("total"), Val::Integer(1)).unwrap();
        v.store(&id("x"), Val::Integer(5)).unwrap();
        let mut scope = Scope::new();
        scope.bind(&id("t"), v.locate(&id("total")));
        scope.local(&id("x"), Val::Integer(99)).unwrap();
        v.push_frame(scope);
        v.store(&id("t"), Val::Integer(42)).unwrap();
        assert_eq!(v.fetch(&id("x")), Val::Integer(99));
        v.store(&id("x"), Val::Integer(100)).unwrap();
        v.pop_frame();
        assert_eq!(v.fetch(&id("total")), Val::Integer(42));
        assert_eq!(v.fetch(&id("x")), Val::Integer(5));
    }
}
