use super::{ParseResult, Parser, StatementParser};
use crate::lang::ast::*;
use std::collections::HashMap;

pub(super) fn register(t: &mut HashMap<&'static str, StatementParser>) {
    t.insert("CLOSE", close);
    t.insert("COPY", copy);
    t.insert("DELETE", delete);
    t.insert("LISTDIR", list_dir);
    t.insert("MKDIR", mk_dir);
    t.insert("MOVE", move_);
    t.insert("OPEN", open);
    t.insert("READFILE", read_file);
    t.insert("READLINE", read_line);
    t.insert("RMDIR", rm_dir);
    t.insert("SEEK", seek);
    t.insert("WRITE", write);
    t.insert("WRITEFILE", write_file);
    t.insert("WRITELINE", write_line);
}

fn open(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let path = p.expression()?;
    p.keyword("FOR")?;
    let t = p.peek();
    let mode = match t.text.as_str() {
        "READ" => FileMode::Read,
        "APPEND" => FileMode::Append,
        "OVERWRITE" => FileMode::Overwrite,
        _ => return Err(p.fail(format!("invalid file mode: {}", t))),
    };
    p.next();
    p.keyword("AS")?;
    Ok(Statement::Open(path, mode, p.ident()?))
}

fn close(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Close(p.expression()?))
}

fn handle_and<F, T>(p: &mut Parser, then: F) -> ParseResult<(Expression, T)>
where
    F: FnOnce(&mut Parser) -> ParseResult<T>,
{
    p.next();
    let handle = p.expression()?;
    p.comma()?;
    Ok((handle, then(p)?))
}

fn write(p: &mut Parser) -> ParseResult<Statement> {
    let (h, e) = handle_and(p, |p| p.expression())?;
    Ok(Statement::Write(h, e))
}

fn write_line(p: &mut Parser) -> ParseResult<Statement> {
    let (h, e) = handle_and(p, |p| p.expression())?;
    Ok(Statement::WriteLine(h, e))
}

fn read_line(p: &mut Parser) -> ParseResult<Statement> {
    let (h, v) = handle_and(p, |p| p.variable())?;
    Ok(Statement::ReadLine(h, v))
}

fn seek(p: &mut Parser) -> ParseResult<Statement> {
    let (h, e) = handle_and(p, |p| p.expression())?;
    Ok(Statement::Seek(h, e))
}

fn read_file(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let var = p.variable()?;
    p.keyword("FROM")?;
    Ok(Statement::ReadFile(var, p.expression()?))
}

fn write_file(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let contents = p.expression()?;
    p.keyword("TO")?;
    Ok(Statement::WriteFile(contents, p.expression()?))
}

fn list_dir(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let array = p.array_ident()?;
    p.keyword("FROM")?;
    Ok(Statement::ListDir(array, p.expression()?))
}

fn mk_dir(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::MkDir(p.expression()?))
}

fn rm_dir(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::RmDir(p.expression()?))
}

fn delete(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Delete(p.expression()?))
}

fn copy(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let from = p.expression()?;
    p.keyword("TO")?;
    Ok(Statement::Copy(from, p.expression()?))
}

fn move_(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let from = p.expression()?;
    p.keyword("TO")?;
    Ok(Statement::Move(from, p.expression()?))
}
