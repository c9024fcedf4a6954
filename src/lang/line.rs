use super::ast::Statement;
use super::lex::tokenize_line;
use super::parse::parse_statement;
use super::{Error, MAX_LINE_LEN};

type Result<T> = std::result::Result<T, Error>;

/// One source line after parsing.
///
/// A line that failed to tokenize or parse is still a `ParsedLine`: its
/// statement is an Unparsable placeholder carrying the failure and
/// `has_error` is set. Comments and blank lines are placeholders without an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub source: String,
    pub statement: Statement,
    pub has_error: bool,
    pub error: Option<Error>,
}

impl ParsedLine {
    pub fn is_comment(&self) -> bool {
        !self.has_error && self.statement.is_unparsable()
    }
}

/// Parses the text of program line `line`.
///
/// The outer error is reserved for lines the interpreter refuses to hold at
/// all. Bad statements come back inside the `ParsedLine`.
pub fn parse_line(text: &str, line: usize) -> Result<ParsedLine> {
    let len = text.chars().count();
    if len > MAX_LINE_LEN {
        return Err(error!(LineBufferOverflow, Some(line);
            format!("line is {} characters; limit is {}", len, MAX_LINE_LEN)));
    }
    let source = text.trim_end_matches(&['\r', '\n'][..]).to_string();
    let parsed = tokenize_line(&source, line).and_then(|tokens| {
        if tokens.len() == 1 {
            return Ok(None);
        }
        parse_statement(&tokens).map(Some)
    });
    let line = match parsed {
        Ok(Some(statement)) => ParsedLine {
            source,
            statement,
            has_error: false,
            error: None,
        },
        Ok(None) => ParsedLine {
            statement: Statement::Unparsable(source.as_str().into(), None),
            source,
            has_error: false,
            error: None,
        },
        Err(e) => {
            let e = e.in_line_number(Some(line));
            ParsedLine {
                statement: Statement::Unparsable(source.as_str().into(), Some(e.text().into())),
                source,
                has_error: true,
                error: Some(e),
            }
        }
    };
    Ok(line)
}

/// Rewrites a line in canonical form. Lines that do not parse come back
/// unchanged.
pub fn canonicalize(text: &str) -> Result<String> {
    let parsed = parse_line(text, 0)?;
    if parsed.statement.is_unparsable() {
        Ok(parsed.source)
    } else {
        Ok(parsed.statement.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_comment_and_blank() {
        for s in &["", "   ", "' just a note"] {
            let p = parse_line(s, 3).unwrap();
            assert!(!p.has_error);
            assert!(p.is_comment());
            assert_eq!(p.statement.to_string(), *s);
        }
    }

    #[test]
    fn test_bad_line_is_kept() {
        let p = parse_line("COLOR , 2", 7).unwrap();
        assert!(p.has_error);
        assert!(p.statement.is_unparsable());
        assert_eq!(
            p.statement.parse_error(),
            Some("COLOR requires at least a foreground color")
        );
        assert_eq!(p.error.unwrap().line_number(), Some(7));

        let p = parse_line("PRINT \"open", 0).unwrap();
        assert!(p.has_error);
        assert_eq!(p.error.unwrap().code(), ErrorCode::UnterminatedString);
    }

    #[test]
    fn test_overflow_is_fatal() {
        let long = format!("PRINT \"{}\"", "x".repeat(MAX_LINE_LEN));
        let e = parse_line(&long, 2).unwrap_err();
        assert_eq!(e.code(), ErrorCode::LineBufferOverflow);
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("let x=42").unwrap(), "LET x = 42");
        assert_eq!(canonicalize("print a;b").unwrap(), "PRINT a; b");
        assert_eq!(canonicalize("for i=1 to 3 step 1").unwrap(), "FOR i = 1 TO 3 STEP 1");
        assert_eq!(canonicalize("x = = 1").unwrap(), "x = = 1");
    }
}
