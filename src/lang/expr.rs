use super::ast::*;
use super::lex::tokenize;
use super::token::{Token, TokenKind};
use super::Error;

type Result<T> = std::result::Result<T, Error>;

/// Parses one complete expression from source text.
pub fn parse_expression(s: &str) -> Result<Expression> {
    let tokens = tokenize(s)?;
    let mut parse = ExprParser {
        tokens: &tokens,
        pos: 0,
    };
    let expr = parse.expression(0)?;
    let t = parse.peek();
    if !t.is_eof() {
        return Err(error!(SyntaxError; format!("unexpected token: {}", t)));
    }
    Ok(expr)
}

struct ExprParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn peek(&self) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn next(&mut self) -> &'a Token {
        let t = self.peek();
        if !t.is_eof() {
            self.pos += 1;
        }
        t
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        if self.accept(kind) {
            Ok(())
        } else {
            Err(error!(SyntaxError; format!("expected {}", what)))
        }
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        use BinaryOp::*;
        let t = self.peek();
        Some(match t.kind {
            TokenKind::Power => Power,
            TokenKind::Star => Multiply,
            TokenKind::Slash => Divide,
            TokenKind::Plus => Add,
            TokenKind::Minus => Subtract,
            TokenKind::Equal => Equal,
            TokenKind::NotEqual => NotEqual,
            TokenKind::Less => Less,
            TokenKind::LessEqual => LessEqual,
            TokenKind::Greater => Greater,
            TokenKind::GreaterEqual => GreaterEqual,
            TokenKind::Keyword => match t.text.as_str() {
                "MOD" => Modulus,
                "AND" => And,
                "OR" => Or,
                "XOR" => Xor,
                _ => return None,
            },
            _ => return None,
        })
    }

    fn expression(&mut self, precedence: usize) -> Result<Expression> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.binary_op() {
            let op_precedence = op.precedence();
            if op_precedence < precedence {
                break;
            }
            self.next();
            let next = if op.is_right_associative() {
                op_precedence
            } else {
                op_precedence + 1
            };
            let rhs = self.expression(next)?;
            lhs = Expression::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expression> {
        let op = match self.peek() {
            t if t.kind == TokenKind::Minus => UnaryOp::Negate,
            t if t.is_keyword("NOT") => UnaryOp::Not,
            _ => return self.primary(),
        };
        self.next();
        let expr = self.expression(op.precedence())?;
        Ok(Expression::Unary(op, Box::new(expr)))
    }

    fn primary(&mut self) -> Result<Expression> {
        let t = self.next();
        match t.kind {
            TokenKind::Integer => match t.text.parse::<i64>() {
                Ok(n) => Ok(Expression::Integer(n)),
                Err(_) => Err(error!(Overflow; format!("integer out of range: {}", t.text))),
            },
            TokenKind::Real => match t.text.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Expression::Real(n)),
                Ok(_) => Err(error!(Overflow; format!("number out of range: {}", t.text))),
                Err(_) => Err(error!(SyntaxError; format!("malformed number: {}", t.text))),
            },
            TokenKind::Complex => complex_literal(&t.text),
            TokenKind::String => Ok(Expression::String(t.text.as_str().into())),
            TokenKind::Keyword if t.text == "TRUE" => Ok(Expression::Boolean(true)),
            TokenKind::Keyword if t.text == "FALSE" => Ok(Expression::Boolean(false)),
            TokenKind::LParen => {
                let expr = self.expression(0)?;
                self.expect(TokenKind::RParen, "right parenthesis")?;
                Ok(Expression::Group(Box::new(expr)))
            }
            TokenKind::Identifier => self.identifier(t),
            TokenKind::Eof => Err(error!(SyntaxError; "expected expression")),
            _ => Err(error!(SyntaxError; format!("unexpected token: {}", t))),
        }
    }

    fn identifier(&mut self, t: &Token) -> Result<Expression> {
        let ident = Ident::new(&t.text);
        if t.text.ends_with("[]") {
            return Ok(Expression::Var(Variable::Array(ident)));
        }
        match self.peek().kind {
            TokenKind::LParen => {
                self.next();
                let args = self.list(TokenKind::RParen, "right parenthesis")?;
                let name = t.text.to_ascii_uppercase();
                Ok(Expression::Function(name.into(), args))
            }
            TokenKind::LBracket => {
                self.next();
                if self.accept(TokenKind::RBracket) {
                    return Ok(Expression::Var(Variable::Array(ident)));
                }
                let dims = self.list(TokenKind::RBracket, "right bracket")?;
                if dims.len() > 2 {
                    return Err(error!(SyntaxError; "arrays have at most 2 dimensions"));
                }
                Ok(Expression::Var(Variable::Index(ident, dims)))
            }
            TokenKind::Dot => {
                self.next();
                let member = self.next();
                if member.kind != TokenKind::Identifier {
                    return Err(error!(SyntaxError; "expected member name"));
                }
                Ok(Expression::Var(Variable::Member(
                    ident,
                    member.text.as_str().into(),
                )))
            }
            _ => Ok(Expression::Var(Variable::Unary(ident))),
        }
    }

    fn list(&mut self, close: TokenKind, what: &str) -> Result<Vec<Expression>> {
        let mut v = vec![];
        if self.accept(close) {
            return Ok(v);
        }
        loop {
            v.push(self.expression(0)?);
            if self.accept(close) {
                return Ok(v);
            }
            self.expect(TokenKind::Comma, what)?;
        }
    }
}

/// Splits `<real>[+|-<real>]i` into its parts.
fn complex_literal(text: &str) -> Result<Expression> {
    let body = text.trim_end_matches(|c| c == 'i' || c == 'I');
    let bytes = body.as_bytes();
    let mut split = None;
    for i in (1..bytes.len()).rev() {
        if (bytes[i] == b'+' || bytes[i] == b'-') && bytes[i - 1] != b'E' && bytes[i - 1] != b'e' {
            split = Some(i);
            break;
        }
    }
    let malformed = || error!(SyntaxError; format!("malformed complex literal: {}", text));
    let (re, im) = match split {
        Some(i) => (
            body[..i].parse::<f64>().map_err(|_| malformed())?,
            body[i..].parse::<f64>().map_err(|_| malformed())?,
        ),
        None => (0.0, body.parse::<f64>().map_err(|_| malformed())?),
    };
    if !re.is_finite() || !im.is_finite() {
        return Err(error!(Overflow; format!("number out of range: {}", text)));
    }
    Ok(Expression::Complex(re, im))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Expression {
        parse_expression(s).unwrap()
    }

    fn int(n: i64) -> Box<Expression> {
        Box::new(Expression::Integer(n))
    }

    #[test]
    fn test_precedence() {
        use BinaryOp::*;
        assert_eq!(
            p("1 + 2 * 3"),
            Expression::Binary(Add, int(1), Box::new(Expression::Binary(Multiply, int(2), int(3))))
        );
        assert_eq!(
            p("2 ** 3 ** 2"),
            Expression::Binary(Power, int(2), Box::new(Expression::Binary(Power, int(3), int(2))))
        );
        assert_eq!(
            p("-2 ** 2"),
            Expression::Unary(
                UnaryOp::Negate,
                Box::new(Expression::Binary(Power, int(2), int(2)))
            )
        );
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        assert_eq!(p("NOT 1 = 2").to_string(), "NOT 1 = 2");
        match p("NOT 1 = 2 AND TRUE") {
            Expression::Binary(BinaryOp::And, lhs, _) => {
                assert!(matches!(*lhs, Expression::Unary(UnaryOp::Not, _)))
            }
            e => panic!("{:?}", e),
        }
    }

    #[test]
    fn test_references() {
        assert_eq!(
            p("grid%[1, 2]"),
            Expression::Var(Variable::Index(
                Ident::new("grid%"),
                vec![Expression::Integer(1), Expression::Integer(2)]
            ))
        );
        assert_eq!(p("a$[]"), Expression::Var(Variable::Array(Ident::new("a$"))));
        assert_eq!(p("b[]"), Expression::Var(Variable::Array(Ident::new("b"))));
        assert_eq!(
            p("pos.x"),
            Expression::Var(Variable::Member(Ident::new("pos"), "x".into()))
        );
        assert_eq!(
            p("left$(s$, 2)"),
            Expression::Function(
                "LEFT$".into(),
                vec![Expression::Var(Variable::Unary(Ident::new("s$"))), Expression::Integer(2)]
            )
        );
        assert!(parse_expression("m[1, 2, 3]").is_err());
    }

    #[test]
    fn test_literals() {
        assert_eq!(p("3+4i"), Expression::Complex(3.0, 4.0));
        assert_eq!(p("1E-2-2i"), Expression::Complex(0.01, -2.0));
        assert_eq!(p("&HFF"), Expression::Integer(255));
        assert_eq!(p("2.5"), Expression::Real(2.5));
        assert_eq!(p("TRUE"), Expression::Boolean(true));
    }

    #[test]
    fn test_rendering_is_fixed_point() {
        for s in &[
            "(a + b) * -c",
            "x ** -1",
            "NOT done AND n% MOD 2 = 0",
            "s$ + \"\\\"quoted\\\"\"",
            "1 + 2i",
            "0-2i",
            "f(g(1), h[2])",
            "2.0 / 3",
        ] {
            let once = p(s).to_string();
            assert_eq!(p(&once).to_string(), once);
            assert_eq!(p(&once), p(s));
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_expression("").unwrap_err().text(), "expected expression");
        assert!(parse_expression("1 +").is_err());
        assert!(parse_expression("(1").is_err());
        assert!(parse_expression("1 2").is_err());
    }
}
