//! Statement parsers.
//!
//! Every parser receives the cursor positioned on its leading keyword,
//! consumes the keyword plus everything its grammar requires, and returns
//! the first failure it meets unchanged.

use super::ast::*;
use super::expr::parse_expression;
use super::token::{is_stop_keyword, Token, TokenKind};
use super::{Column, Error};
use std::collections::HashMap;

mod data;
mod file;
mod flow;
mod media;

pub type ParseResult<T> = std::result::Result<T, Error>;

type StatementParser = fn(&mut Parser) -> ParseResult<Statement>;

thread_local!(
    static DISPATCH: HashMap<&'static str, StatementParser> = dispatch_table();
);

fn dispatch_table() -> HashMap<&'static str, StatementParser> {
    let mut t: HashMap<&'static str, StatementParser> = HashMap::new();
    data::register(&mut t);
    file::register(&mut t);
    flow::register(&mut t);
    media::register(&mut t);
    t
}

/// Parses one statement from a token sequence ending in `Eof`.
pub fn parse_statement(tokens: &[Token]) -> ParseResult<Statement> {
    let mut parse = Parser::new(tokens);
    let statement = parse.statement()?;
    let t = parse.peek();
    if !t.is_eof() {
        let err = error!(SyntaxError, ..&t.column_range(); format!("unexpected token: {}", t));
        return Err(err);
    }
    Ok(statement)
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Parser<'a> {
        debug_assert!(tokens.last().map_or(false, |t| t.is_eof()));
        Parser { tokens, pos: 0 }
    }

    fn statement(&mut self) -> ParseResult<Statement> {
        let t = self.peek();
        if t.kind != TokenKind::Keyword {
            return Err(self.fail("expected keyword or statement"));
        }
        match DISPATCH.with(|d| d.get(t.text.as_str()).copied()) {
            Some(parser) => parser(self),
            None => Err(self.fail(format!("unknown keyword: {}", t.text))),
        }
    }

    pub(super) fn peek(&self) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn peek_second(&self) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + 1).min(last)]
    }

    pub(super) fn next(&mut self) -> &'a Token {
        let t = self.peek();
        if !t.is_eof() {
            self.pos += 1;
        }
        t
    }

    fn column(&self) -> Column {
        self.peek().column_range()
    }

    /// A syntax error pointing at the current token.
    fn fail<S: Into<String>>(&self, msg: S) -> Error {
        error!(SyntaxError, ..&self.column(); msg)
    }

    fn at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn at_keyword(&self, word: &str) -> bool {
        self.peek().is_keyword(word)
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.next();
            true
        } else {
            false
        }
    }

    fn accept_keyword(&mut self, word: &str) -> bool {
        if self.at_keyword(word) {
            self.next();
            true
        } else {
            false
        }
    }

    fn keyword(&mut self, word: &str) -> ParseResult<()> {
        if self.accept_keyword(word) {
            Ok(())
        } else {
            Err(self.fail(format!("expected {}", word)))
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<()> {
        if self.accept(kind) {
            Ok(())
        } else {
            Err(self.fail(format!("expected {}", what)))
        }
    }

    fn comma(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::Comma, "comma")
    }

    /// Collects the longest run of tokens that can form an expression and
    /// hands its source text to the expression grammar. Collection stops at
    /// a top-level comma, semicolon, colon, closing delimiter or stop keyword.
    fn expression(&mut self) -> ParseResult<Expression> {
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            let t = self.peek();
            if t.is_eof() {
                break;
            }
            if depth == 0 {
                let boundary = match t.kind {
                    TokenKind::Comma | TokenKind::Semicolon | TokenKind::Colon => true,
                    TokenKind::Keyword => is_stop_keyword(&t.text),
                    k => k.closes(),
                };
                if boundary {
                    break;
                }
            }
            if t.kind.opens() {
                depth += 1;
            } else if t.kind.closes() {
                depth -= 1;
            }
            self.next();
        }
        let collected = &self.tokens[start..self.pos];
        if collected.is_empty() {
            return Err(self.fail("expected expression"));
        }
        let text: Vec<String> = collected.iter().map(|t| t.to_string()).collect();
        let first = collected[0].column_range();
        let last = collected[collected.len() - 1].column_range();
        parse_expression(&text.join(" ")).map_err(|e| {
            error!(SyntaxError, ..&(first.start..last.end); e.text())
        })
    }

    fn optional_expression(&mut self) -> ParseResult<Option<Expression>> {
        if self.at_end() {
            Ok(None)
        } else {
            Ok(Some(self.expression()?))
        }
    }

    fn expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut v = vec![self.expression()?];
        while self.accept(TokenKind::Comma) {
            v.push(self.expression()?);
        }
        Ok(v)
    }

    fn point(&mut self) -> ParseResult<Point> {
        let x = self.expression()?;
        self.comma()?;
        let y = self.expression()?;
        Ok(Point { x, y })
    }

    fn ident(&mut self) -> ParseResult<Ident> {
        let t = self.peek();
        if t.kind != TokenKind::Identifier || t.text.ends_with("[]") {
            return Err(self.fail("expected identifier"));
        }
        self.next();
        Ok(Ident::new(&t.text))
    }

    /// A whole-array reference: `a%[]` or `name` followed by `[]`.
    fn array_ident(&mut self) -> ParseResult<Ident> {
        let t = self.peek();
        if t.kind != TokenKind::Identifier {
            return Err(self.fail("expected array"));
        }
        self.next();
        if !t.text.ends_with("[]") {
            if self.peek().kind != TokenKind::LBracket
                || self.peek_second().kind != TokenKind::RBracket
            {
                return Err(self.fail("expected []"));
            }
            self.next();
            self.next();
        }
        Ok(Ident::new(&t.text))
    }

    /// A name: label, subroutine or help topic.
    fn name(&mut self, what: &str) -> ParseResult<std::rc::Rc<str>> {
        let t = self.peek();
        match t.kind {
            TokenKind::Identifier if !t.text.ends_with("[]") => {
                self.next();
                Ok(t.text.as_str().into())
            }
            TokenKind::Integer => {
                self.next();
                Ok(t.text.as_str().into())
            }
            _ => Err(self.fail(format!("expected {}", what))),
        }
    }

    /// An assignable reference: `a`, `a[i]`, `a[i, j]`, `a[]` or `a.b`.
    fn variable(&mut self) -> ParseResult<Variable> {
        let t = self.peek();
        if t.kind != TokenKind::Identifier {
            return Err(self.fail("expected variable"));
        }
        self.next();
        let ident = Ident::new(&t.text);
        if t.text.ends_with("[]") {
            return Ok(Variable::Array(ident));
        }
        if self.accept(TokenKind::LBracket) {
            if self.accept(TokenKind::RBracket) {
                return Ok(Variable::Array(ident));
            }
            let dims = self.expression_list()?;
            self.expect(TokenKind::RBracket, "right bracket")?;
            if dims.len() > 2 {
                return Err(self.fail("arrays have at most 2 dimensions"));
            }
            return Ok(Variable::Index(ident, dims));
        }
        if self.accept(TokenKind::Dot) {
            let member = self.peek();
            if member.kind != TokenKind::Identifier {
                return Err(self.fail("expected member name"));
            }
            self.next();
            return Ok(Variable::Member(ident, member.text.as_str().into()));
        }
        Ok(Variable::Unary(ident))
    }

    /// `WITH color`, when present.
    fn with_color(&mut self) -> ParseResult<Option<Expression>> {
        if self.accept_keyword("WITH") {
            Ok(Some(self.expression()?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex::tokenize;
    use super::*;

    fn parse_str(s: &str) -> ParseResult<Statement> {
        parse_statement(&tokenize(s).unwrap())
    }

    fn err(s: &str) -> String {
        parse_str(s).unwrap_err().text().to_string()
    }

    fn canonical(s: &str) -> String {
        match parse_str(s) {
            Ok(st) => st.to_string(),
            Err(e) => panic!("{} : {:?}", s, e),
        }
    }

    #[test]
    fn test_dispatch_failures() {
        assert_eq!(err("x = 1"), "expected keyword or statement");
        assert_eq!(err("THEN"), "unknown keyword: THEN");
        assert_eq!(err("PRINT 1 )"), "unexpected token: )");
    }

    #[test]
    fn test_expression_collection() {
        assert_eq!(err("IF THEN"), "expected expression");
        assert_eq!(err("SLEEP"), "expected expression");
        assert_eq!(canonical("sleep (1+2)*3"), "SLEEP (1 + 2) * 3");
    }

    #[test]
    fn test_let() {
        assert_eq!(canonical("let x=42"), "LET x = 42");
        assert_eq!(canonical("LET grid%[i,j+1]=0"), "LET grid%[i, j + 1] = 0");
        assert_eq!(canonical("LET p.x = p.x+1"), "LET p.x = p.x + 1");
        assert_eq!(err("LET = 3"), "expected variable");
    }

    #[test]
    fn test_randomize() {
        assert!(parse_str("RANDOMIZE").is_ok());
        assert!(parse_str("RANDOMIZE 123").is_ok());
        assert!(parse_str("RANDOMIZE ,").is_err());
    }

    #[test]
    fn test_color() {
        assert_eq!(canonical("color 4"), "COLOR 4");
        assert_eq!(canonical("color 4,1"), "COLOR 4, 1");
        assert_eq!(err("COLOR , 2"), "COLOR requires at least a foreground color");
    }

    #[test]
    fn test_for() {
        assert_eq!(canonical("for i=1 to 10"), "FOR i = 1 TO 10");
        assert_eq!(canonical("FOR i = 10 TO 1 STEP -1"), "FOR i = 10 TO 1 STEP -1");
        assert_eq!(err("FOR i = 1 TO 10 STEP"), "expected expression");
        assert_eq!(err("FOR i = 1"), "expected TO");
    }

    #[test]
    fn test_open_modes() {
        assert_eq!(
            canonical("open \"a.txt\" for append as h%"),
            "OPEN \"a.txt\" FOR APPEND AS h%"
        );
        assert_eq!(err("OPEN \"a\" FOR WRITE AS h"), "invalid file mode: WRITE");
    }

    #[test]
    fn test_set_options() {
        assert_eq!(canonical("set line spacing on"), "SET LINE SPACING ON");
        assert_eq!(canonical("SET TEXT WRAP OFF"), "SET TEXT WRAP OFF");
        assert_eq!(canonical("set audio off"), "SET AUDIO OFF");
        assert_eq!(err("SET COLOR ON"), "unknown SET option: COLOR");
    }

    #[test]
    fn test_exit_continue() {
        assert_eq!(canonical("exit for"), "EXIT FOR");
        assert_eq!(canonical("exit sub"), "EXIT SUB");
        assert_eq!(canonical("continue do"), "CONTINUE DO");
        assert!(err("EXIT").starts_with("EXIT must specify target"));
        assert!(err("CONTINUE SUB").starts_with("CONTINUE must specify target"));
    }

    #[test]
    fn test_do_variants() {
        assert_eq!(parse_str("DO").unwrap(), Statement::Do(Condition::Always));
        assert_eq!(canonical("do while x<3"), "DO WHILE x < 3");
        assert_eq!(canonical("do until done"), "DO UNTIL done");
        assert_eq!(canonical("loop until n>=10"), "LOOP UNTIL n >= 10");
    }

    #[test]
    fn test_if_requires_then() {
        assert_eq!(canonical("if a=1 then"), "IF a = 1 THEN");
        assert_eq!(err("IF a = 1"), "expected THEN");
        assert_eq!(canonical("elseif b then"), "ELSEIF b THEN");
        assert_eq!(canonical("unless ok then"), "UNLESS ok THEN");
    }

    #[test]
    fn test_round_trip_all_kinds() {
        for s in &[
            "LET x = 42",
            "DIM a%[10], m#[3, 4]",
            "LOCAL a, b$",
            "PRINT \"x = \"; x, y;",
            "PRINT",
            "INPUT \"Name\"; n$, age%",
            "INPUT n$",
            "IF a > 1 THEN",
            "ELSEIF a = 1 THEN",
            "ELSE",
            "END IF",
            "UNLESS done THEN",
            "END UNLESS",
            "SELECT CASE n%",
            "CASE 1, 2 TO 4, IS > 10",
            "CASE ELSE",
            "END SELECT",
            "FOR i = 1 TO 10 STEP 2",
            "NEXT i",
            "NEXT",
            "WHILE x < 10",
            "WEND",
            "DO",
            "DO UNTIL x",
            "LOOP WHILE x < 3",
            "UNTIL k% = 5",
            "UEND",
            "SUB add(a, BYREF total#, list%[])",
            "SUB tick",
            "END SUB",
            "CALL add(1, t#, nums%[])",
            "CALL tick",
            "GOTO done",
            "GOSUB work",
            "RETURN",
            "LABEL done",
            "TRY",
            "CATCH err$",
            "CATCH",
            "FINALLY",
            "END TRY",
            "THROW \"bad \\\"input\\\"\"",
            "EXIT WHILE",
            "CONTINUE FOR",
            "END",
            "RANDOMIZE TIMER",
            "SLEEP 100",
            "CLS",
            "HELP",
            "HELP PRINT",
            "CONSOLE \"debug: \" + STR$(x)",
            "SET AUDIO ON",
            "SWAP a[1], a[2]",
            "COLOR 2, 0",
            "PSET 10, 20 WITH 3",
            "LINE FROM 0, 0 TO 100, 50",
            "RECTANGLE FROM 1, 1 TO 5, 5 WITH 2 FILLED",
            "OVAL AT 50, 50 RADII 20, 10 FILLED",
            "CIRCLE AT x, y RADIUS r WITH c",
            "TRIANGLE 0, 0, 10, 0, 5, 8 WITH 1",
            "ARC AT 0, 0 RADIUS 5 FROM 0 TO 90",
            "PAINT AT 3, 3 WITH 4",
            "GET s$ FROM 0, 0 TO 7, 7",
            "PUT s$ AT 10, 10",
            "TURTLE \"FD 10 RT 90\"",
            "TEMPO 120",
            "VOLUME 0.5",
            "VOICE 1, \"PIANO\"",
            "VOICE 2, \"SQUARE\" WITH 0.1, 0.2, 0.7, 0.3",
            "PLAY 1, \"CDEFG\"",
            "OPEN \"log.txt\" FOR OVERWRITE AS h%",
            "CLOSE h%",
            "WRITE h%, 42",
            "WRITELINE h%, \"line\"",
            "READLINE h%, l$",
            "SEEK h%, 0",
            "READFILE s$ FROM \"notes.txt\"",
            "WRITEFILE s$ TO \"copy.txt\"",
            "LISTDIR names$[] FROM \"/\"",
            "MKDIR \"docs\"",
            "RMDIR \"docs\"",
            "COPY \"a\" TO \"b\"",
            "MOVE \"b\" TO \"c\"",
            "DELETE \"c\"",
            "SORT scores%[] DESCENDING",
            "SORT names$[]",
            "ERASE a[], b$[]",
        ] {
            let once = canonical(s);
            assert_eq!(&once, s);
            assert_eq!(parse_str(&once).unwrap(), parse_str(s).unwrap());
        }
    }
}
