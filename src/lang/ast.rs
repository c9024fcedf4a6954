//! Statement and expression trees.
//!
//! Every node renders to its canonical text through `Display`. Parsing the
//! canonical text of a node yields an equal node.

pub use super::ident::Ident;
use super::token::escape;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    /// Comments, blank lines and lines that failed to parse.
    Unparsable(Rc<str>, Option<Rc<str>>),
    Let(Variable, Expression),
    Dim(Vec<(Ident, Vec<Expression>)>),
    Local(Vec<Ident>),
    Print(Vec<PrintItem>),
    Input(Option<Rc<str>>, Vec<Variable>),
    If(Expression),
    ElseIf(Expression),
    Else,
    EndIf,
    Unless(Expression),
    EndUnless,
    Select(Expression),
    Case(Vec<CaseTest>),
    CaseElse,
    EndSelect,
    For(Ident, Expression, Expression, Option<Expression>),
    Next(Option<Ident>),
    While(Expression),
    Wend,
    Do(Condition),
    Loop(Condition),
    Until(Expression),
    Uend,
    Sub(Rc<str>, Vec<Param>),
    EndSub,
    Call(Rc<str>, Vec<Expression>),
    Goto(Rc<str>),
    Gosub(Rc<str>),
    Return,
    Label(Rc<str>),
    Try,
    Catch(Option<Ident>),
    Finally,
    EndTry,
    Throw(Expression),
    Exit(Block),
    Continue(Block),
    End,
    Randomize(Option<Expression>),
    Sleep(Expression),
    Cls,
    Help(Option<Rc<str>>),
    Console(Expression),
    Set(SetOption, bool),
    Swap(Variable, Variable),
    Color(Expression, Option<Expression>),
    Pset(Point, Option<Expression>),
    Line(Point, Point, Option<Expression>),
    Rectangle(Point, Point, Option<Expression>, bool),
    Oval(Point, Point, Option<Expression>, bool),
    Circle(Point, Expression, Option<Expression>, bool),
    Triangle([Point; 3], Option<Expression>, bool),
    Arc(Point, Expression, Expression, Expression, Option<Expression>),
    Paint(Point, Expression),
    GetSprite(Variable, Point, Point),
    PutSprite(Expression, Point),
    Turtle(Expression),
    Tempo(Expression),
    Volume(Expression),
    Voice(Expression, Expression, Option<Vec<Expression>>),
    Play(Expression, Expression),
    Open(Expression, FileMode, Ident),
    Close(Expression),
    Write(Expression, Expression),
    WriteLine(Expression, Expression),
    ReadLine(Expression, Variable),
    Seek(Expression, Expression),
    ReadFile(Variable, Expression),
    WriteFile(Expression, Expression),
    ListDir(Ident, Expression),
    MkDir(Expression),
    RmDir(Expression),
    Copy(Expression, Expression),
    Move(Expression, Expression),
    Delete(Expression),
    Sort(Ident, bool),
    Erase(Vec<Ident>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Variable {
    Unary(Ident),
    /// A whole array, written `name[]`.
    Array(Ident),
    Index(Ident, Vec<Expression>),
    Member(Ident, Rc<str>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(i64),
    Real(f64),
    Complex(f64, f64),
    String(Rc<str>),
    Boolean(bool),
    Var(Variable),
    Function(Rc<str>, Vec<Expression>),
    Group(Box<Expression>),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOp {
    Power,
    Multiply,
    Divide,
    Modulus,
    Add,
    Subtract,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    pub fn precedence(self) -> usize {
        use BinaryOp::*;
        match self {
            Or | Xor => 1,
            And => 2,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 4,
            Add | Subtract => 5,
            Multiply | Divide | Modulus => 6,
            Power => 8,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self == BinaryOp::Power
    }

    pub fn is_comparison(self) -> bool {
        use BinaryOp::*;
        matches!(
            self,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual
        )
    }
}

impl UnaryOp {
    pub fn precedence(self) -> usize {
        match self {
            UnaryOp::Not => 3,
            UnaryOp::Negate => 7,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum PrintItem {
    Expression(Expression),
    Semicolon,
    Comma,
}

#[derive(Debug, PartialEq, Clone)]
pub enum CaseTest {
    Value(Expression),
    Range(Expression, Expression),
    Is(BinaryOp, Expression),
}

/// Loop condition of `DO` and `LOOP`.
#[derive(Debug, PartialEq, Clone)]
pub enum Condition {
    Always,
    While(Expression),
    Until(Expression),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Block {
    For,
    While,
    Do,
    Until,
    Sub,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Param {
    pub ident: Ident,
    pub by_ref: bool,
    pub array: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Point {
    pub x: Expression,
    pub y: Expression,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SetOption {
    LineSpacing,
    TextWrap,
    Audio,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileMode {
    Read,
    Append,
    Overwrite,
}

impl Statement {
    pub fn is_unparsable(&self) -> bool {
        matches!(self, Statement::Unparsable(..))
    }

    /// The parse error carried by an Unparsable placeholder, if any.
    /// Comments and blank lines carry none.
    pub fn parse_error(&self) -> Option<&str> {
        match self {
            Statement::Unparsable(_, Some(e)) => Some(e),
            _ => None,
        }
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

fn with_color(c: &Option<Expression>) -> String {
    match c {
        Some(c) => format!(" WITH {}", c),
        None => String::new(),
    }
}

fn filled(f: bool) -> &'static str {
    if f {
        " FILLED"
    } else {
        ""
    }
}

fn on_off(b: bool) -> &'static str {
    if b {
        "ON"
    } else {
        "OFF"
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Statement::*;
        match self {
            Unparsable(text, _) => write!(f, "{}", text),
            Let(var, expr) => write!(f, "LET {} = {}", var, expr),
            Dim(arrays) => {
                let v: Vec<String> = arrays
                    .iter()
                    .map(|(ident, dims)| format!("{}[{}]", ident, join(dims)))
                    .collect();
                write!(f, "DIM {}", v.join(", "))
            }
            Local(idents) => write!(f, "LOCAL {}", join(idents)),
            Print(items) => {
                write!(f, "PRINT")?;
                let mut s = String::new();
                for item in items {
                    match item {
                        PrintItem::Expression(e) => {
                            if !s.is_empty() {
                                s.push(' ');
                            }
                            s.push_str(&e.to_string());
                        }
                        PrintItem::Semicolon => s.push(';'),
                        PrintItem::Comma => s.push(','),
                    }
                }
                if !s.is_empty() {
                    write!(f, " {}", s)?;
                }
                Ok(())
            }
            Input(prompt, vars) => match prompt {
                Some(p) => write!(f, "INPUT \"{}\"; {}", escape(p), join(vars)),
                None => write!(f, "INPUT {}", join(vars)),
            },
            If(e) => write!(f, "IF {} THEN", e),
            ElseIf(e) => write!(f, "ELSEIF {} THEN", e),
            Else => write!(f, "ELSE"),
            EndIf => write!(f, "END IF"),
            Unless(e) => write!(f, "UNLESS {} THEN", e),
            EndUnless => write!(f, "END UNLESS"),
            Select(e) => write!(f, "SELECT CASE {}", e),
            Case(tests) => write!(f, "CASE {}", join(tests)),
            CaseElse => write!(f, "CASE ELSE"),
            EndSelect => write!(f, "END SELECT"),
            For(var, from, to, step) => {
                write!(f, "FOR {} = {} TO {}", var, from, to)?;
                if let Some(step) = step {
                    write!(f, " STEP {}", step)?;
                }
                Ok(())
            }
            Next(None) => write!(f, "NEXT"),
            Next(Some(var)) => write!(f, "NEXT {}", var),
            While(e) => write!(f, "WHILE {}", e),
            Wend => write!(f, "WEND"),
            Do(c) => write!(f, "DO{}", c),
            Loop(c) => write!(f, "LOOP{}", c),
            Until(e) => write!(f, "UNTIL {}", e),
            Uend => write!(f, "UEND"),
            Sub(name, params) => {
                if params.is_empty() {
                    write!(f, "SUB {}", name)
                } else {
                    write!(f, "SUB {}({})", name, join(params))
                }
            }
            EndSub => write!(f, "END SUB"),
            Call(name, args) => {
                if args.is_empty() {
                    write!(f, "CALL {}", name)
                } else {
                    write!(f, "CALL {}({})", name, join(args))
                }
            }
            Goto(l) => write!(f, "GOTO {}", l),
            Gosub(l) => write!(f, "GOSUB {}", l),
            Return => write!(f, "RETURN"),
            Label(l) => write!(f, "LABEL {}", l),
            Try => write!(f, "TRY"),
            Catch(None) => write!(f, "CATCH"),
            Catch(Some(v)) => write!(f, "CATCH {}", v),
            Finally => write!(f, "FINALLY"),
            EndTry => write!(f, "END TRY"),
            Throw(e) => write!(f, "THROW {}", e),
            Exit(b) => write!(f, "EXIT {}", b),
            Continue(b) => write!(f, "CONTINUE {}", b),
            End => write!(f, "END"),
            Randomize(None) => write!(f, "RANDOMIZE"),
            Randomize(Some(e)) => write!(f, "RANDOMIZE {}", e),
            Sleep(e) => write!(f, "SLEEP {}", e),
            Cls => write!(f, "CLS"),
            Help(None) => write!(f, "HELP"),
            Help(Some(topic)) => write!(f, "HELP {}", topic),
            Console(e) => write!(f, "CONSOLE {}", e),
            Set(opt, on) => write!(f, "SET {} {}", opt, on_off(*on)),
            Swap(a, b) => write!(f, "SWAP {}, {}", a, b),
            Color(fg, None) => write!(f, "COLOR {}", fg),
            Color(fg, Some(bg)) => write!(f, "COLOR {}, {}", fg, bg),
            Pset(p, c) => write!(f, "PSET {}{}", p, with_color(c)),
            Line(a, b, c) => write!(f, "LINE FROM {} TO {}{}", a, b, with_color(c)),
            Rectangle(a, b, c, fill) => write!(
                f,
                "RECTANGLE FROM {} TO {}{}{}",
                a,
                b,
                with_color(c),
                filled(*fill)
            ),
            Oval(center, radii, c, fill) => write!(
                f,
                "OVAL AT {} RADII {}{}{}",
                center,
                radii,
                with_color(c),
                filled(*fill)
            ),
            Circle(center, r, c, fill) => write!(
                f,
                "CIRCLE AT {} RADIUS {}{}{}",
                center,
                r,
                with_color(c),
                filled(*fill)
            ),
            Triangle(p, c, fill) => write!(
                f,
                "TRIANGLE {}, {}, {}{}{}",
                p[0],
                p[1],
                p[2],
                with_color(c),
                filled(*fill)
            ),
            Arc(center, r, from, to, c) => write!(
                f,
                "ARC AT {} RADIUS {} FROM {} TO {}{}",
                center,
                r,
                from,
                to,
                with_color(c)
            ),
            Paint(p, c) => write!(f, "PAINT AT {} WITH {}", p, c),
            GetSprite(v, a, b) => write!(f, "GET {} FROM {} TO {}", v, a, b),
            PutSprite(e, p) => write!(f, "PUT {} AT {}", e, p),
            Turtle(e) => write!(f, "TURTLE {}", e),
            Tempo(e) => write!(f, "TEMPO {}", e),
            Volume(e) => write!(f, "VOLUME {}", e),
            Voice(i, preset, None) => write!(f, "VOICE {}, {}", i, preset),
            Voice(i, preset, Some(env)) => {
                write!(f, "VOICE {}, {} WITH {}", i, preset, join(env))
            }
            Play(v, m) => write!(f, "PLAY {}, {}", v, m),
            Open(path, mode, h) => write!(f, "OPEN {} FOR {} AS {}", path, mode, h),
            Close(h) => write!(f, "CLOSE {}", h),
            Write(h, e) => write!(f, "WRITE {}, {}", h, e),
            WriteLine(h, e) => write!(f, "WRITELINE {}, {}", h, e),
            ReadLine(h, v) => write!(f, "READLINE {}, {}", h, v),
            Seek(h, e) => write!(f, "SEEK {}, {}", h, e),
            ReadFile(v, path) => write!(f, "READFILE {} FROM {}", v, path),
            WriteFile(e, path) => write!(f, "WRITEFILE {} TO {}", e, path),
            ListDir(a, path) => write!(f, "LISTDIR {}[] FROM {}", a, path),
            MkDir(p) => write!(f, "MKDIR {}", p),
            RmDir(p) => write!(f, "RMDIR {}", p),
            Copy(a, b) => write!(f, "COPY {} TO {}", a, b),
            Move(a, b) => write!(f, "MOVE {} TO {}", a, b),
            Delete(p) => write!(f, "DELETE {}", p),
            Sort(a, false) => write!(f, "SORT {}[]", a),
            Sort(a, true) => write!(f, "SORT {}[] DESCENDING", a),
            Erase(arrays) => {
                let v: Vec<String> = arrays.iter().map(|a| format!("{}[]", a)).collect();
                write!(f, "ERASE {}", v.join(", "))
            }
        }
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Variable::*;
        match self {
            Unary(i) => write!(f, "{}", i),
            Array(i) => write!(f, "{}[]", i),
            Index(i, dims) => write!(f, "{}[{}]", i, join(dims)),
            Member(i, m) => write!(f, "{}.{}", i, m),
        }
    }
}

/// Shortest text for a real that still lexes as a real.
pub fn real_text(n: f64) -> String {
    let s = format!("{:?}", n);
    if s.contains('.') || s.contains('e') || s.contains("inf") || s.contains("NaN") {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Complex literal text. A zero real part is omitted when the imaginary
/// part is non-negative.
pub fn complex_text(re: f64, im: f64) -> String {
    if re == 0.0 && !re.is_sign_negative() && im >= 0.0 {
        format!("{}i", im)
    } else if im < 0.0 || (im == 0.0 && im.is_sign_negative()) {
        format!("{}-{}i", re, -im)
    } else {
        format!("{}+{}i", re, im)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Expression::*;
        match self {
            Integer(n) => write!(f, "{}", n),
            Real(n) => write!(f, "{}", real_text(*n)),
            Complex(re, im) => write!(f, "{}", complex_text(*re, *im)),
            String(s) => write!(f, "\"{}\"", escape(s)),
            Boolean(true) => write!(f, "TRUE"),
            Boolean(false) => write!(f, "FALSE"),
            Var(v) => write!(f, "{}", v),
            Function(name, args) => write!(f, "{}({})", name, join(args)),
            Group(e) => write!(f, "({})", e),
            Unary(UnaryOp::Negate, e) => write!(f, "-{}", e),
            Unary(UnaryOp::Not, e) => write!(f, "NOT {}", e),
            Binary(op, lhs, rhs) => write!(f, "{} {} {}", lhs, op, rhs),
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use BinaryOp::*;
        let s = match self {
            Power => "**",
            Multiply => "*",
            Divide => "/",
            Modulus => "MOD",
            Add => "+",
            Subtract => "-",
            Equal => "=",
            NotEqual => "<>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            And => "AND",
            Or => "OR",
            Xor => "XOR",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for PrintItem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PrintItem::Expression(e) => write!(f, "{}", e),
            PrintItem::Semicolon => write!(f, ";"),
            PrintItem::Comma => write!(f, ","),
        }
    }
}

impl std::fmt::Display for CaseTest {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CaseTest::Value(e) => write!(f, "{}", e),
            CaseTest::Range(a, b) => write!(f, "{} TO {}", a, b),
            CaseTest::Is(op, e) => write!(f, "IS {} {}", op, e),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Condition::Always => Ok(()),
            Condition::While(e) => write!(f, " WHILE {}", e),
            Condition::Until(e) => write!(f, " UNTIL {}", e),
        }
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Block::For => "FOR",
            Block::While => "WHILE",
            Block::Do => "DO",
            Block::Until => "UNTIL",
            Block::Sub => "SUB",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.by_ref {
            write!(f, "BYREF ")?;
        }
        write!(f, "{}", self.ident)?;
        if self.array {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl std::fmt::Display for SetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            SetOption::LineSpacing => "LINE SPACING",
            SetOption::TextWrap => "TEXT WRAP",
            SetOption::Audio => "AUDIO",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            FileMode::Read => "READ",
            FileMode::Append => "APPEND",
            FileMode::Overwrite => "OVERWRITE",
        };
        write!(f, "{}", s)
    }
}
