use super::{Address, LinkTable, Slot};
use crate::error;
use crate::lang::ast::{Block, Statement};
use crate::lang::{Error, Ident, ParsedLine};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    If,
    Unless,
    Select,
    For,
    While,
    Do,
    Until,
    Sub,
    Try,
}

impl Kind {
    fn opener(self) -> &'static str {
        match self {
            Kind::If => "IF",
            Kind::Unless => "UNLESS",
            Kind::Select => "SELECT",
            Kind::For => "FOR",
            Kind::While => "WHILE",
            Kind::Do => "DO",
            Kind::Until => "UNTIL",
            Kind::Sub => "SUB",
            Kind::Try => "TRY",
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            Kind::If => "END IF",
            Kind::Unless => "END UNLESS",
            Kind::Select => "END SELECT",
            Kind::For => "NEXT",
            Kind::While => "WEND",
            Kind::Do => "LOOP",
            Kind::Until => "UEND",
            Kind::Sub => "END SUB",
            Kind::Try => "END TRY",
        }
    }

    fn of_block(block: Block) -> Kind {
        match block {
            Block::For => Kind::For,
            Block::While => Kind::While,
            Block::Do => Kind::Do,
            Block::Until => Kind::Until,
            Block::Sub => Kind::Sub,
        }
    }
}

/// One open block.
#[derive(Debug)]
struct Frame {
    kind: Kind,
    line: Address,
    /// Clause whose NextClause link the next ELSEIF/ELSE/CASE fills in.
    last_clause: Address,
    clauses: Vec<Address>,
    seen_else: bool,
    var: Option<Ident>,
    catch: Option<Address>,
    finally: Option<Address>,
}

impl Frame {
    fn new(kind: Kind, line: Address) -> Frame {
        Frame {
            kind,
            line,
            last_clause: line,
            clauses: vec![],
            seen_else: false,
            var: None,
            catch: None,
            finally: None,
        }
    }
}

/// What the analyzer learned about a program.
#[derive(Debug, Default)]
pub struct Analysis {
    pub links: LinkTable,
    pub labels: HashMap<Rc<str>, Address>,
    pub subs: HashMap<Rc<str>, Address>,
    /// Display nesting level of each line.
    pub indent: Vec<usize>,
    /// Parse and structural errors ordered by line.
    pub errors: Vec<Error>,
}

/// ## Block linking
///
/// Pairs every block opener with its clauses and terminator, builds the
/// label and SUB maps, and resolves jump targets. Linking is best effort:
/// every problem is reported and the rest of the program still links.

pub fn analyze(lines: &[ParsedLine]) -> Analysis {
    let mut a = Analyzer {
        analysis: Analysis::default(),
        stack: vec![],
    };
    for (line, parsed) in lines.iter().enumerate() {
        if let Some(e) = &parsed.error {
            a.analysis.errors.push(e.clone());
        }
        a.structure(line, &parsed.statement);
    }
    while let Some(frame) = a.stack.pop() {
        a.report(error!(MissingTerminator, Some(frame.line);
            format!("{}: missing {}", frame.kind.opener(), frame.kind.terminator())));
    }
    a.names(lines);
    a.resolve(lines);
    let mut analysis = a.analysis;
    analysis.errors.sort_by_key(|e| e.line_number());
    debug!(
        lines = lines.len(),
        links = analysis.links.len(),
        labels = analysis.labels.len(),
        subs = analysis.subs.len(),
        errors = analysis.errors.len(),
        "analyzed program"
    );
    analysis
}

struct Analyzer {
    analysis: Analysis,
    stack: Vec<Frame>,
}

impl Analyzer {
    fn report(&mut self, e: Error) {
        warn!(line = ?e.line_number(), "{}", e);
        self.analysis.errors.push(e);
    }

    fn mismatch(&mut self, line: Address, msg: String) {
        self.report(error!(BlockMismatch, Some(line); msg));
    }

    fn top_is(&self, kind: Kind) -> bool {
        matches!(self.stack.last(), Some(f) if f.kind == kind)
    }

    fn open(&mut self, kind: Kind, line: Address) {
        self.stack.push(Frame::new(kind, line));
    }

    /// ELSEIF, ELSE, CASE and CASE ELSE.
    fn clause(&mut self, kind: Kind, line: Address, name: &str, is_else: bool) {
        let frame = match self.stack.last_mut() {
            Some(f) if f.kind == kind => f,
            _ => {
                let owner = if kind == Kind::Select { "SELECT" } else { kind.opener() };
                return self.mismatch(line, format!("{} without {}", name, owner));
            }
        };
        if frame.seen_else {
            let after = if kind == Kind::Select { "CASE ELSE" } else { "ELSE" };
            return self.mismatch(line, format!("{} after {}", name, after));
        }
        self.analysis
            .links
            .set(frame.last_clause, Slot::NextClause, line);
        frame.last_clause = line;
        frame.clauses.push(line);
        frame.seen_else = is_else;
    }

    /// Closes the top frame if it is `kind`, linking opener and closer.
    fn close(&mut self, kind: Kind, line: Address) -> Option<Frame> {
        if !self.top_is(kind) {
            let closer = kind.terminator();
            self.mismatch(line, format!("{} without {}", closer, kind.opener()));
            return None;
        }
        let frame = self.stack.pop()?;
        let links = &mut self.analysis.links;
        links.set(frame.line, Slot::End, line);
        links.set(line, Slot::Opener, frame.line);
        if matches!(kind, Kind::If | Kind::Select) {
            links.set(frame.last_clause, Slot::NextClause, line);
        }
        for clause in &frame.clauses {
            links.set(*clause, Slot::End, line);
        }
        Some(frame)
    }

    fn leave(&mut self, line: Address, block: Block, verb: &str) {
        let kind = Kind::of_block(block);
        let mut target = None;
        for frame in self.stack.iter().rev() {
            if frame.kind == kind {
                target = Some(frame.line);
                break;
            }
            if frame.kind == Kind::Sub {
                break;
            }
        }
        match target {
            Some(opener) => self.analysis.links.set(line, Slot::Target, opener),
            None => self.report(error!(IllegalExit, Some(line);
                format!("{} {} outside {}", verb, block, block))),
        }
    }

    fn structure(&mut self, line: Address, statement: &Statement) {
        use Statement::*;
        let depth = self.stack.len();
        let indent = match statement {
            ElseIf(_) | Else | Case(_) | CaseElse | Catch(_) | Finally => depth.saturating_sub(1),
            EndIf | EndUnless | EndSelect | Next(_) | Wend | Loop(_) | Uend | EndSub | EndTry => {
                depth.saturating_sub(1)
            }
            _ => depth,
        };
        self.analysis.indent.push(indent);
        match statement {
            If(_) => self.open(Kind::If, line),
            ElseIf(_) => self.clause(Kind::If, line, "ELSEIF", false),
            Else => self.clause(Kind::If, line, "ELSE", true),
            EndIf => {
                self.close(Kind::If, line);
            }
            Unless(_) => self.open(Kind::Unless, line),
            EndUnless => {
                self.close(Kind::Unless, line);
            }
            Select(_) => self.open(Kind::Select, line),
            Case(_) => self.clause(Kind::Select, line, "CASE", false),
            CaseElse => self.clause(Kind::Select, line, "CASE ELSE", true),
            EndSelect => {
                self.close(Kind::Select, line);
            }
            For(var, ..) => {
                self.open(Kind::For, line);
                if let Some(frame) = self.stack.last_mut() {
                    frame.var = Some(var.clone());
                }
            }
            Next(var) => {
                if let Some(frame) = self.close(Kind::For, line) {
                    if let (Some(next), Some(counter)) = (var, &frame.var) {
                        if next.key() != counter.key() {
                            self.report(error!(NextMismatch, Some(line);
                                format!("NEXT {} does not match FOR {}", next, counter)));
                        }
                    }
                }
            }
            While(_) => self.open(Kind::While, line),
            Wend => {
                self.close(Kind::While, line);
            }
            Do(_) => self.open(Kind::Do, line),
            Loop(_) => {
                self.close(Kind::Do, line);
            }
            Until(_) => self.open(Kind::Until, line),
            Uend => {
                self.close(Kind::Until, line);
            }
            Sub(name, _) => {
                if self.stack.iter().any(|f| f.kind == Kind::Sub) {
                    self.mismatch(line, format!("SUB {} inside another SUB", name));
                }
                self.open(Kind::Sub, line);
            }
            EndSub => {
                self.close(Kind::Sub, line);
            }
            Try => self.open(Kind::Try, line),
            Catch(_) => self.catch(line),
            Finally => self.finally(line),
            EndTry => {
                if let Some(frame) = self.close(Kind::Try, line) {
                    let links = &mut self.analysis.links;
                    if let Some(catch) = frame.catch {
                        links.set(frame.line, Slot::Catch, catch);
                        links.set(catch, Slot::End, line);
                    }
                    if let Some(finally) = frame.finally {
                        links.set(frame.line, Slot::Finally, finally);
                        links.set(finally, Slot::End, line);
                        if let Some(catch) = frame.catch {
                            links.set(catch, Slot::Finally, finally);
                        }
                    }
                }
            }
            Exit(block) => self.leave(line, *block, "EXIT"),
            Continue(block) => {
                if *block == Block::Sub {
                    self.report(error!(IllegalExit, Some(line); "CONTINUE SUB is not allowed"));
                } else {
                    self.leave(line, *block, "CONTINUE")
                }
            }
            _ => {}
        }
    }

    fn catch(&mut self, line: Address) {
        let frame = match self.stack.last_mut() {
            Some(f) if f.kind == Kind::Try => f,
            _ => return self.mismatch(line, "CATCH without TRY".to_string()),
        };
        if frame.finally.is_some() {
            return self.mismatch(line, "CATCH after FINALLY".to_string());
        }
        if frame.catch.is_some() {
            return self.mismatch(line, "TRY has more than one CATCH".to_string());
        }
        frame.catch = Some(line);
    }

    fn finally(&mut self, line: Address) {
        let frame = match self.stack.last_mut() {
            Some(f) if f.kind == Kind::Try => f,
            _ => return self.mismatch(line, "FINALLY without TRY".to_string()),
        };
        if frame.finally.is_some() {
            return self.mismatch(line, "TRY has more than one FINALLY".to_string());
        }
        frame.finally = Some(line);
    }

    /// Label and SUB maps. The first definition of a name wins.
    fn names(&mut self, lines: &[ParsedLine]) {
        for (line, parsed) in lines.iter().enumerate() {
            let (map, what, name) = match &parsed.statement {
                Statement::Label(name) => (&mut self.analysis.labels, "label", name),
                Statement::Sub(name, _) => (&mut self.analysis.subs, "SUB", name),
                _ => continue,
            };
            let key: Rc<str> = name.to_ascii_uppercase().into();
            if map.contains_key(&key) {
                self.report(error!(DuplicateLabel, Some(line);
                    format!("duplicate {}: {}", what, name)));
            } else {
                map.insert(key, line);
            }
        }
    }

    fn resolve(&mut self, lines: &[ParsedLine]) {
        for (line, parsed) in lines.iter().enumerate() {
            let (target, what, name) = match &parsed.statement {
                Statement::Goto(name) | Statement::Gosub(name) => {
                    (self.analysis.labels.get(&*name.to_ascii_uppercase()), "label", name)
                }
                Statement::Call(name, _) => {
                    (self.analysis.subs.get(&*name.to_ascii_uppercase()), "SUB", name)
                }
                _ => continue,
            };
            match target.copied() {
                Some(target) => self.analysis.links.set(line, Slot::Target, target),
                None => self.report(error!(UndefinedLabel, Some(line);
                    format!("undefined {}: {}", what, name))),
            }
        }
    }
}
