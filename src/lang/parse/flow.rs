use super::{ParseResult, Parser, StatementParser};
use crate::lang::ast::*;
use crate::lang::token::TokenKind;
use std::collections::HashMap;

pub(super) fn register(t: &mut HashMap<&'static str, StatementParser>) {
    t.insert("CALL", call);
    t.insert("CASE", case);
    t.insert("CATCH", catch);
    t.insert("CONTINUE", continue_);
    t.insert("DO", do_);
    t.insert("ELSE", else_);
    t.insert("ELSEIF", else_if);
    t.insert("END", end);
    t.insert("EXIT", exit);
    t.insert("FINALLY", finally);
    t.insert("FOR", for_);
    t.insert("GOSUB", gosub);
    t.insert("GOTO", goto);
    t.insert("IF", if_);
    t.insert("LABEL", label);
    t.insert("LOOP", loop_);
    t.insert("NEXT", next);
    t.insert("RETURN", return_);
    t.insert("SELECT", select);
    t.insert("SUB", sub);
    t.insert("THROW", throw);
    t.insert("TRY", try_);
    t.insert("UEND", uend);
    t.insert("UNLESS", unless);
    t.insert("UNTIL", until);
    t.insert("WEND", wend);
    t.insert("WHILE", while_);
}

fn if_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let cond = p.expression()?;
    p.keyword("THEN")?;
    Ok(Statement::If(cond))
}

fn else_if(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let cond = p.expression()?;
    p.keyword("THEN")?;
    Ok(Statement::ElseIf(cond))
}

fn else_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Else)
}

fn unless(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let cond = p.expression()?;
    p.keyword("THEN")?;
    Ok(Statement::Unless(cond))
}

fn end(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let t = p.peek();
    let statement = match t.text.as_str() {
        "IF" if t.kind == TokenKind::Keyword => Statement::EndIf,
        "UNLESS" if t.kind == TokenKind::Keyword => Statement::EndUnless,
        "SELECT" if t.kind == TokenKind::Keyword => Statement::EndSelect,
        "SUB" if t.kind == TokenKind::Keyword => Statement::EndSub,
        "TRY" if t.kind == TokenKind::Keyword => Statement::EndTry,
        _ => return Ok(Statement::End),
    };
    p.next();
    Ok(statement)
}

fn select(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    p.keyword("CASE")?;
    Ok(Statement::Select(p.expression()?))
}

fn case(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    if p.accept_keyword("ELSE") {
        return Ok(Statement::CaseElse);
    }
    let mut tests = vec![];
    loop {
        if p.accept_keyword("IS") {
            let op = match p.next().kind {
                TokenKind::Equal => BinaryOp::Equal,
                TokenKind::NotEqual => BinaryOp::NotEqual,
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                _ => return Err(p.fail("expected comparison operator")),
            };
            tests.push(CaseTest::Is(op, p.expression()?));
        } else {
            let value = p.expression()?;
            if p.accept_keyword("TO") {
                tests.push(CaseTest::Range(value, p.expression()?));
            } else {
                tests.push(CaseTest::Value(value));
            }
        }
        if !p.accept(TokenKind::Comma) {
            break;
        }
    }
    Ok(Statement::Case(tests))
}

fn for_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let var = p.ident()?;
    p.expect(TokenKind::Equal, "=")?;
    let from = p.expression()?;
    p.keyword("TO")?;
    let to = p.expression()?;
    let step = if p.accept_keyword("STEP") {
        Some(p.expression()?)
    } else {
        None
    };
    Ok(Statement::For(var, from, to, step))
}

fn next(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    if p.at_end() {
        return Ok(Statement::Next(None));
    }
    Ok(Statement::Next(Some(p.ident()?)))
}

fn while_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::While(p.expression()?))
}

fn wend(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Wend)
}

fn condition(p: &mut Parser) -> ParseResult<Condition> {
    if p.accept_keyword("WHILE") {
        Ok(Condition::While(p.expression()?))
    } else if p.accept_keyword("UNTIL") {
        Ok(Condition::Until(p.expression()?))
    } else {
        Ok(Condition::Always)
    }
}

fn do_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Do(condition(p)?))
}

fn loop_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Loop(condition(p)?))
}

fn until(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Until(p.expression()?))
}

fn uend(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Uend)
}

fn param(p: &mut Parser) -> ParseResult<Param> {
    let by_ref = p.accept_keyword("BYREF");
    let t = p.peek();
    if t.kind != TokenKind::Identifier {
        return Err(p.fail("expected parameter"));
    }
    p.next();
    let mut array = t.text.ends_with("[]");
    if !array && p.peek().kind == TokenKind::LBracket && p.peek_second().kind == TokenKind::RBracket
    {
        p.next();
        p.next();
        array = true;
    }
    Ok(Param {
        ident: Ident::new(&t.text),
        by_ref,
        array,
    })
}

fn sub(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let name = p.ident()?.name().clone();
    let mut params = vec![];
    if p.accept(TokenKind::LParen) && !p.accept(TokenKind::RParen) {
        loop {
            params.push(param(p)?);
            if !p.accept(TokenKind::Comma) {
                break;
            }
        }
        p.expect(TokenKind::RParen, "right parenthesis")?;
    }
    Ok(Statement::Sub(name, params))
}

fn call(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let name = p.ident()?.name().clone();
    let mut args = vec![];
    if p.accept(TokenKind::LParen) && !p.accept(TokenKind::RParen) {
        args = p.expression_list()?;
        p.expect(TokenKind::RParen, "right parenthesis")?;
    }
    Ok(Statement::Call(name, args))
}

fn goto(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Goto(p.name("label")?))
}

fn gosub(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Gosub(p.name("label")?))
}

fn return_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Return)
}

fn label(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Label(p.name("label")?))
}

fn try_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Try)
}

fn catch(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    if p.at_end() {
        return Ok(Statement::Catch(None));
    }
    Ok(Statement::Catch(Some(p.ident()?)))
}

fn finally(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Finally)
}

fn throw(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Throw(p.expression()?))
}

fn block(p: &mut Parser, allow_sub: bool) -> Option<Block> {
    let t = p.peek();
    if t.kind != TokenKind::Keyword {
        return None;
    }
    let b = match t.text.as_str() {
        "FOR" => Block::For,
        "WHILE" => Block::While,
        "DO" => Block::Do,
        "UNTIL" => Block::Until,
        "SUB" if allow_sub => Block::Sub,
        _ => return None,
    };
    p.next();
    Some(b)
}

fn exit(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    match block(p, true) {
        Some(b) => Ok(Statement::Exit(b)),
        None => Err(p.fail("EXIT must specify target: FOR, WHILE, DO, UNTIL or SUB")),
    }
}

fn continue_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    match block(p, false) {
        Some(b) => Ok(Statement::Continue(b)),
        None => Err(p.fail("CONTINUE must specify target: FOR, WHILE, DO or UNTIL")),
    }
}
