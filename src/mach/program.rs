use super::analyze::{analyze, Analysis};
use super::{Address, LinkTable};
use crate::lang::ast::Statement;
use crate::lang::{parse_line, Error, ErrorCode, ParsedLine};
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const INDENT: usize = 4;

/// ## Program
///
/// Parsed lines in order, plus everything the analyzer resolved for them.
/// A line's index is its line number.

#[derive(Debug, Default)]
pub struct Program {
    lines: Vec<ParsedLine>,
    analysis: Analysis,
    errors: Rc<Vec<Error>>,
    linked: bool,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// Parses and links a whole source text.
    pub fn parse(source: &str) -> Result<Program> {
        let mut program = Program::new();
        for text in source.lines() {
            program.push(text)?;
        }
        program.link();
        Ok(program)
    }

    /// Appends one line. The program must be linked again before it runs.
    pub fn push(&mut self, text: &str) -> Result<Address> {
        let addr = self.lines.len();
        self.lines.push(parse_line(text, addr)?);
        self.linked = false;
        Ok(addr)
    }

    pub fn clear(&mut self) {
        *self = Program::default();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, addr: Address) -> Option<&ParsedLine> {
        self.lines.get(addr)
    }

    pub fn statement(&self, addr: Address) -> Option<&Statement> {
        self.lines.get(addr).map(|l| &l.statement)
    }

    pub fn link(&mut self) -> Rc<Vec<Error>> {
        self.analysis = analyze(&self.lines);
        self.errors = Rc::new(self.analysis.errors.clone());
        self.linked = true;
        self.errors.clone()
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn links(&self) -> &LinkTable {
        &self.analysis.links
    }

    pub fn labels(&self) -> &HashMap<Rc<str>, Address> {
        &self.analysis.labels
    }

    pub fn subs(&self) -> &HashMap<Rc<str>, Address> {
        &self.analysis.subs
    }

    pub fn errors(&self) -> Rc<Vec<Error>> {
        self.errors.clone()
    }

    /// Linked with nothing worse than a NEXT variable mismatch.
    pub fn is_runnable(&self) -> bool {
        self.linked
            && self
                .errors
                .iter()
                .all(|e| e.code() == ErrorCode::NextMismatch)
    }

    /// Canonical indented text of one line plus the columns of its errors.
    pub fn list_line(&self, addr: Address) -> Option<(String, Vec<Range<usize>>)> {
        let line = self.lines.get(addr)?;
        let indent = self.analysis.indent.get(addr).copied().unwrap_or(0) * INDENT;
        let text = if line.statement.is_unparsable() {
            line.source.trim().to_string()
        } else {
            line.statement.to_string()
        };
        // Error columns count characters of the source from 1.
        let lead = line.source.chars().count() - line.source.trim_start().chars().count();
        let place = |col: usize| (indent + col).saturating_sub(lead + 1);
        let columns = self
            .errors
            .iter()
            .filter(|e| e.line_number() == Some(addr) && e.is_parse())
            .map(|e| e.column())
            .filter(|c| c.end > c.start)
            .map(|c| place(c.start)..place(c.end))
            .collect();
        Some((format!("{:width$}{}", "", text, width = indent), columns))
    }

    /// The whole program, canonical and indented.
    pub fn listing(&self) -> String {
        let mut s = String::new();
        for addr in 0..self.lines.len() {
            if let Some((text, _)) = self.list_line(addr) {
                s.push_str(&text);
                s.push('\n');
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing() {
        let p = Program::parse("for i=1 to 3\nif i>1 then\nprint i\nend if\nnext i").unwrap();
        assert!(p.is_runnable());
        assert_eq!(
            p.listing(),
            "FOR i = 1 TO 3\n    IF i > 1 THEN\n        PRINT i\n    END IF\nNEXT i\n"
        );
    }

    #[test]
    fn test_not_runnable() {
        let mut p = Program::parse("PRINT 1\nWEND").unwrap();
        assert!(!p.is_runnable());
        assert_eq!(p.errors().len(), 1);
        p.push("PRINT 2").unwrap();
        assert!(!p.is_linked());
        let p = Program::parse("FOR i = 1 TO 2\nNEXT j").unwrap();
        assert!(p.is_runnable());
    }

    #[test]
    fn test_error_columns() {
        let p = Program::parse("WHILE 1\n  PRINT 1 @\nWEND").unwrap();
        let (text, cols) = p.list_line(1).unwrap();
        assert_eq!(text, "    PRINT 1 @");
        assert_eq!(cols, vec![12..13]);
    }

    #[test]
    fn test_comment_lines_keep_their_text() {
        let p = Program::parse("' hello\n\nprint 1").unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.listing(), "' hello\n\nPRINT 1\n");
    }
}
