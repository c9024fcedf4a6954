// Used in both Token and Ast

use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Ident {
    Plain(Rc<str>),
    Integer(Rc<str>),
    Real(Rc<str>),
    String(Rc<str>),
    Complex(Rc<str>),
}

impl Ident {
    /// Classifies identifier text by its trailing sigil. A trailing `[]`
    /// array marker is not part of the identifier.
    pub fn new(s: &str) -> Ident {
        let s = s.strip_suffix("[]").unwrap_or(s);
        match s.chars().last() {
            Some('%') => Ident::Integer(s.into()),
            Some('#') => Ident::Real(s.into()),
            Some('$') => Ident::String(s.into()),
            Some('&') => Ident::Complex(s.into()),
            _ => Ident::Plain(s.into()),
        }
    }

    pub fn name(&self) -> &Rc<str> {
        use Ident::*;
        match self {
            Plain(s) | Integer(s) | Real(s) | String(s) | Complex(s) => s,
        }
    }

    /// Storage key. Identifiers are case-insensitive; the sigil is part of
    /// the key so `A` and `A$` are distinct variables.
    pub fn key(&self) -> Rc<str> {
        self.name().to_ascii_uppercase().into()
    }

    pub fn has_sigil(&self) -> bool {
        !matches!(self, Ident::Plain(_))
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigils() {
        assert_eq!(Ident::new("a%"), Ident::Integer("a%".into()));
        assert_eq!(Ident::new("b$[]"), Ident::String("b$".into()));
        assert_eq!(Ident::new("z&"), Ident::Complex("z&".into()));
        assert_eq!(Ident::new("total"), Ident::Plain("total".into()));
        assert_eq!(&*Ident::new("Total#").key(), "TOTAL#");
    }
}
