use super::{ParseResult, Parser, StatementParser};
use crate::lang::ast::*;
use crate::lang::token::TokenKind;
use std::collections::HashMap;

pub(super) fn register(t: &mut HashMap<&'static str, StatementParser>) {
    t.insert("CONSOLE", console);
    t.insert("DIM", dim);
    t.insert("ERASE", erase);
    t.insert("HELP", help);
    t.insert("INPUT", input);
    t.insert("LET", let_);
    t.insert("LOCAL", local);
    t.insert("PRINT", print);
    t.insert("RANDOMIZE", randomize);
    t.insert("SET", set);
    t.insert("SLEEP", sleep);
    t.insert("SORT", sort);
    t.insert("SWAP", swap);
}

fn let_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let var = p.variable()?;
    p.expect(TokenKind::Equal, "=")?;
    Ok(Statement::Let(var, p.expression()?))
}

fn dim(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let mut arrays = vec![];
    loop {
        let ident = p.ident()?;
        p.expect(TokenKind::LBracket, "left bracket")?;
        let dims = p.expression_list()?;
        p.expect(TokenKind::RBracket, "right bracket")?;
        if dims.len() > 2 {
            return Err(p.fail("arrays have at most 2 dimensions"));
        }
        arrays.push((ident, dims));
        if !p.accept(TokenKind::Comma) {
            break;
        }
    }
    Ok(Statement::Dim(arrays))
}

fn local(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let mut idents = vec![p.ident()?];
    while p.accept(TokenKind::Comma) {
        idents.push(p.ident()?);
    }
    Ok(Statement::Local(idents))
}

fn print(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let mut items = vec![];
    loop {
        match p.peek().kind {
            TokenKind::Eof => break,
            TokenKind::Semicolon => {
                p.next();
                items.push(PrintItem::Semicolon);
            }
            TokenKind::Comma => {
                p.next();
                items.push(PrintItem::Comma);
            }
            _ => {
                if let Some(PrintItem::Expression(_)) = items.last() {
                    break;
                }
                items.push(PrintItem::Expression(p.expression()?));
            }
        }
    }
    Ok(Statement::Print(items))
}

fn input(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let mut prompt = None;
    let t = p.peek();
    if t.kind == TokenKind::String
        && matches!(p.peek_second().kind, TokenKind::Semicolon | TokenKind::Comma)
    {
        p.next();
        p.next();
        prompt = Some(t.text.as_str().into());
    }
    let mut vars = vec![p.variable()?];
    while p.accept(TokenKind::Comma) {
        vars.push(p.variable()?);
    }
    Ok(Statement::Input(prompt, vars))
}

fn swap(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let a = p.variable()?;
    p.comma()?;
    Ok(Statement::Swap(a, p.variable()?))
}

fn sort(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let array = p.array_ident()?;
    Ok(Statement::Sort(array, p.accept_keyword("DESCENDING")))
}

fn erase(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let mut arrays = vec![p.array_ident()?];
    while p.accept(TokenKind::Comma) {
        arrays.push(p.array_ident()?);
    }
    Ok(Statement::Erase(arrays))
}

fn randomize(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Randomize(p.optional_expression()?))
}

fn sleep(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Sleep(p.expression()?))
}

fn console(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Console(p.expression()?))
}

fn help(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    if p.at_end() {
        return Ok(Statement::Help(None));
    }
    let t = p.peek();
    match t.kind {
        TokenKind::Identifier | TokenKind::Keyword => {
            p.next();
            Ok(Statement::Help(Some(t.text.to_ascii_uppercase().into())))
        }
        _ => Err(p.fail("expected help topic")),
    }
}

fn set(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let option = if p.accept_keyword("LINE") {
        p.keyword("SPACING")?;
        SetOption::LineSpacing
    } else if p.accept_keyword("TEXT") {
        p.keyword("WRAP")?;
        SetOption::TextWrap
    } else if p.accept_keyword("AUDIO") {
        SetOption::Audio
    } else {
        let t = p.peek();
        return Err(p.fail(format!("unknown SET option: {}", t)));
    };
    let on = if p.accept_keyword("ON") {
        true
    } else if p.accept_keyword("OFF") {
        false
    } else {
        return Err(p.fail("expected ON or OFF"));
    };
    Ok(Statement::Set(option, on))
}

#[cfg(test)]
mod tests {
    use crate::lang::ast::*;
    use crate::lang::{parse_statement, tokenize};

    fn parse(s: &str) -> Result<Statement, String> {
        parse_statement(&tokenize(s).unwrap()).map_err(|e| e.text().to_string())
    }

    #[test]
    fn test_print_items() {
        match parse("PRINT a; b,").unwrap() {
            Statement::Print(items) => {
                assert_eq!(items.len(), 4);
                assert_eq!(items[1], PrintItem::Semicolon);
                assert_eq!(items[3], PrintItem::Comma);
            }
            s => panic!("{:?}", s),
        }
        assert_eq!(parse("PRINT ;;").unwrap().to_string(), "PRINT ;;");
    }

    #[test]
    fn test_input_prompt() {
        match parse("INPUT \"Age? \", a%").unwrap() {
            Statement::Input(Some(prompt), vars) => {
                assert_eq!(&*prompt, "Age? ");
                assert_eq!(vars, vec![Variable::Unary(Ident::new("a%"))]);
            }
            s => panic!("{:?}", s),
        }
        assert_eq!(parse("INPUT \"oops\"").unwrap_err(), "expected variable");
    }

    #[test]
    fn test_dim_limits() {
        assert!(parse("DIM a[1, 2, 3]").is_err());
        assert_eq!(parse("DIM a").unwrap_err(), "expected left bracket");
    }

    #[test]
    fn test_array_references() {
        assert_eq!(parse("SORT v[]").unwrap(), Statement::Sort(Ident::new("v"), false));
        assert_eq!(parse("SORT v").unwrap_err(), "expected []");
        assert_eq!(
            parse("HELP print").unwrap(),
            Statement::Help(Some("PRINT".into()))
        );
    }
}
