use super::{ParseResult, Parser, StatementParser};
use crate::lang::ast::*;
use crate::lang::token::TokenKind;
use std::collections::HashMap;

pub(super) fn register(t: &mut HashMap<&'static str, StatementParser>) {
    t.insert("ARC", arc);
    t.insert("CIRCLE", circle);
    t.insert("CLS", cls);
    t.insert("COLOR", color);
    t.insert("GET", get);
    t.insert("LINE", line);
    t.insert("OVAL", oval);
    t.insert("PAINT", paint);
    t.insert("PLAY", play);
    t.insert("PSET", pset);
    t.insert("PUT", put);
    t.insert("RECTANGLE", rectangle);
    t.insert("TEMPO", tempo);
    t.insert("TRIANGLE", triangle);
    t.insert("TURTLE", turtle);
    t.insert("VOICE", voice);
    t.insert("VOLUME", volume);
}

fn cls(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Cls)
}

fn color(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    if p.at_end() || p.accept(TokenKind::Comma) {
        return Err(p.fail("COLOR requires at least a foreground color"));
    }
    let fg = p.expression()?;
    let bg = if p.accept(TokenKind::Comma) {
        Some(p.expression()?)
    } else {
        None
    };
    Ok(Statement::Color(fg, bg))
}

fn pset(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let at = p.point()?;
    Ok(Statement::Pset(at, p.with_color()?))
}

fn from_to(p: &mut Parser) -> ParseResult<(Point, Point)> {
    p.keyword("FROM")?;
    let a = p.point()?;
    p.keyword("TO")?;
    let b = p.point()?;
    Ok((a, b))
}

fn line(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let (a, b) = from_to(p)?;
    Ok(Statement::Line(a, b, p.with_color()?))
}

fn rectangle(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let (a, b) = from_to(p)?;
    let color = p.with_color()?;
    let filled = p.accept_keyword("FILLED");
    Ok(Statement::Rectangle(a, b, color, filled))
}

fn oval(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    p.keyword("AT")?;
    let center = p.point()?;
    p.keyword("RADII")?;
    let radii = p.point()?;
    let color = p.with_color()?;
    let filled = p.accept_keyword("FILLED");
    Ok(Statement::Oval(center, radii, color, filled))
}

fn circle(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    p.keyword("AT")?;
    let center = p.point()?;
    p.keyword("RADIUS")?;
    let radius = p.expression()?;
    let color = p.with_color()?;
    let filled = p.accept_keyword("FILLED");
    Ok(Statement::Circle(center, radius, color, filled))
}

fn triangle(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let a = p.point()?;
    p.comma()?;
    let b = p.point()?;
    p.comma()?;
    let c = p.point()?;
    let color = p.with_color()?;
    let filled = p.accept_keyword("FILLED");
    Ok(Statement::Triangle([a, b, c], color, filled))
}

fn arc(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    p.keyword("AT")?;
    let center = p.point()?;
    p.keyword("RADIUS")?;
    let radius = p.expression()?;
    p.keyword("FROM")?;
    let start = p.expression()?;
    p.keyword("TO")?;
    let end = p.expression()?;
    Ok(Statement::Arc(center, radius, start, end, p.with_color()?))
}

fn paint(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    p.keyword("AT")?;
    let at = p.point()?;
    p.keyword("WITH")?;
    Ok(Statement::Paint(at, p.expression()?))
}

fn get(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let var = p.variable()?;
    let (a, b) = from_to(p)?;
    Ok(Statement::GetSprite(var, a, b))
}

fn put(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let sprite = p.expression()?;
    p.keyword("AT")?;
    Ok(Statement::PutSprite(sprite, p.point()?))
}

fn turtle(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Turtle(p.expression()?))
}

fn tempo(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Tempo(p.expression()?))
}

fn volume(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    Ok(Statement::Volume(p.expression()?))
}

fn voice(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let index = p.expression()?;
    p.comma()?;
    let preset = p.expression()?;
    let envelope = if p.accept_keyword("WITH") {
        Some(p.expression_list()?)
    } else {
        None
    };
    Ok(Statement::Voice(index, preset, envelope))
}

fn play(p: &mut Parser) -> ParseResult<Statement> {
    p.next();
    let voice = p.expression()?;
    p.comma()?;
    Ok(Statement::Play(voice, p.expression()?))
}

#[cfg(test)]
mod tests {
    use crate::lang::ast::*;
    use crate::lang::{parse_statement, tokenize};

    fn parse(s: &str) -> Result<Statement, String> {
        parse_statement(&tokenize(s).unwrap()).map_err(|e| e.text().to_string())
    }

    #[test]
    fn test_shape_clauses() {
        match parse("CIRCLE AT 1, 2 RADIUS 3 FILLED").unwrap() {
            Statement::Circle(_, Expression::Integer(3), None, true) => {}
            s => panic!("{:?}", s),
        }
        assert_eq!(parse("RECTANGLE 1, 1 TO 2, 2").unwrap_err(), "expected FROM");
        assert_eq!(parse("OVAL AT 1, 1 RADIUS 2").unwrap_err(), "expected RADII");
        assert_eq!(parse("PSET 1").unwrap_err(), "expected comma");
    }

    #[test]
    fn test_voice_envelope() {
        match parse("VOICE 1, \"SINE\" WITH 0.1, 0.1, 0.8, 0.2").unwrap() {
            Statement::Voice(_, _, Some(env)) => assert_eq!(env.len(), 4),
            s => panic!("{:?}", s),
        }
    }

    #[test]
    fn test_color_forms() {
        assert!(parse("COLOR").is_err());
        assert!(parse("COLOR 1,").is_err());
        assert_eq!(
            parse("COLOR 1, 2").unwrap(),
            Statement::Color(Expression::Integer(1), Some(Expression::Integer(2)))
        );
    }
}
