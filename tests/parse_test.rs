use basic::lang::ast::*;
use basic::lang::{canonicalize, parse_line, parse_statement, tokenize, ErrorCode, Ident};
use basic::mach::{Program, Slot};

fn parse_str(s: &str) -> Option<Statement> {
    let tokens = tokenize(s).ok()?;
    parse_statement(&tokens).ok()
}

#[test]
fn test_let() {
    let answer = Statement::Let(
        Variable::Unary(Ident::new("ter")),
        Expression::Var(Variable::Unary(Ident::new("bar"))),
    );
    assert_eq!(parse_str("let ter = bar"), Some(answer));
    assert_eq!(parse_str("ter = bar"), None);
}

#[test]
fn test_literals() {
    let answer = Statement::Let(
        Variable::Unary(Ident::new("a%")),
        Expression::Integer(255),
    );
    assert_eq!(parse_str("LET a% = &HFF"), Some(answer));
    let answer = Statement::Let(
        Variable::Unary(Ident::new("z&")),
        Expression::Complex(3.0, 4.0),
    );
    assert_eq!(parse_str("LET z& = 3+4i"), Some(answer));
}

#[test]
fn test_for_parts() {
    let answer = Statement::For(
        Ident::new("i"),
        Expression::Integer(1),
        Expression::Integer(10),
        Some(Expression::Integer(2)),
    );
    assert_eq!(parse_str("FOR i = 1 TO 10 STEP 2"), Some(answer));
}

#[test]
fn test_print_items() {
    let answer = Statement::Print(vec![
        PrintItem::Expression(Expression::String("a".into())),
        PrintItem::Semicolon,
        PrintItem::Expression(Expression::Integer(1)),
        PrintItem::Comma,
    ]);
    assert_eq!(parse_str("print \"a\"; 1,"), Some(answer));
}

#[test]
fn test_canonical_forms() {
    assert_eq!(canonicalize("if x>1 then").unwrap(), "IF x > 1 THEN");
    assert_eq!(canonicalize("end   if").unwrap(), "END IF");
    assert_eq!(canonicalize("call go (1,2)").unwrap(), "CALL go(1, 2)");
    assert_eq!(canonicalize("circle at 1,2 radius 3").unwrap(), "CIRCLE AT 1, 2 RADIUS 3");
    assert_eq!(canonicalize("' remark").unwrap(), "' remark");
}

#[test]
fn test_parse_errors_are_kept() {
    let p = parse_line("RANDOMIZE ,", 4).unwrap();
    assert!(p.has_error);
    assert_eq!(p.error.unwrap().line_number(), Some(4));
    let p = parse_line("COLOR , 2", 0).unwrap();
    assert!(p.has_error);
    let p = parse_line("PRINT 1 @", 0).unwrap();
    assert_eq!(p.error.unwrap().code(), ErrorCode::IllegalCharacter);
    let p = parse_line("FROB 1", 0).unwrap();
    assert_eq!(p.error.unwrap().text(), "expected keyword or statement");
}

#[test]
fn test_huge_reals_are_rejected() {
    let p = parse_line("PRINT 1E999", 2).unwrap();
    assert!(p.has_error);
    assert_eq!(p.error.unwrap().code(), ErrorCode::Overflow);
    let text = canonicalize("PRINT 1E300").unwrap();
    assert_eq!(text, "PRINT 1e300");
    assert_eq!(canonicalize(&text).unwrap(), text);
}

#[test]
fn test_program_links() {
    let p = Program::parse(
        "WHILE x < 3
LET x = x + 1
IF x = 2 THEN
EXIT WHILE
END IF
WEND",
    )
    .unwrap();
    assert!(p.is_runnable());
    let links = p.links();
    assert_eq!(links.get(0, Slot::End), Some(5));
    assert_eq!(links.get(5, Slot::Opener), Some(0));
    assert_eq!(links.get(2, Slot::NextClause), Some(4));
    assert_eq!(links.get(3, Slot::Target), Some(0));
}

#[test]
fn test_program_structural_errors() {
    let p = Program::parse("IF 1 THEN\nPRINT 1\nWEND\nLABEL a\nLABEL a").unwrap();
    assert!(!p.is_runnable());
    let errors = p.errors();
    assert!(errors.iter().all(|e| e.is_structural()));
    let texts: Vec<&str> = errors.iter().map(|e| e.text()).collect();
    assert!(texts.contains(&"WEND without WHILE"));
    assert!(texts.contains(&"duplicate label: A"));
}

#[test]
fn test_listing_is_indented() {
    let p = Program::parse("sub hi\nprint \"hi\"\nend sub\ncall hi").unwrap();
    assert_eq!(p.listing(), "SUB hi\n    PRINT \"hi\"\nEND SUB\nCALL hi\n");
}
