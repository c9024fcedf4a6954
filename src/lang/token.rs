use std::collections::HashSet;

thread_local!(
    static KEYWORDS: HashSet<&'static str> = KEYWORD_LIST.iter().copied().collect();
);

const KEYWORD_LIST: &[&str] = &[
    "AND", "APPEND", "ARC", "AS", "AT", "AUDIO", "BYREF", "CALL", "CASE", "CATCH", "CIRCLE",
    "CLOSE", "CLS", "COLOR", "CONSOLE", "CONTINUE", "COPY", "DELETE", "DESCENDING", "DIM", "DO",
    "ELSE", "ELSEIF", "END", "ERASE", "EXIT", "FALSE", "FILLED", "FINALLY", "FOR", "FROM", "GET",
    "GOSUB", "GOTO", "HELP", "IF", "IN", "INPUT", "IS", "LABEL", "LET", "LINE", "LISTDIR",
    "LOCAL", "LOOP", "MKDIR", "MOD", "MOVE", "NEXT", "NOT", "OFF", "ON", "OPEN", "OR", "OVAL",
    "OVERWRITE", "PAINT", "PLAY", "PRINT", "PSET", "PUT", "RADII", "RADIUS", "RANDOMIZE", "READ",
    "READFILE", "READLINE", "RECTANGLE", "RETURN", "RMDIR", "SEEK", "SELECT", "SET", "SLEEP",
    "SORT", "SPACING", "STEP", "SUB", "SWAP", "TEMPO", "TEXT", "THEN", "THROW", "TO", "TRIANGLE",
    "TRUE", "TRY", "TURTLE", "UEND", "UNLESS", "UNTIL", "VOICE", "VOLUME", "WEND", "WHILE", "WITH",
    "WRAP", "WRITE", "WRITEFILE", "WRITELINE", "XOR",
];

/// Keywords that end an expression when met at nesting depth zero.
pub const STOP_KEYWORDS: &[&str] = &[
    "AS",
    "AT",
    "FILLED",
    "FOR",
    "FROM",
    "IN",
    "OVERWRITE",
    "RADII",
    "RADIUS",
    "READ",
    "STEP",
    "THEN",
    "TO",
    "WITH",
];

pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.with(|k| k.contains(s))
}

pub fn is_stop_keyword(s: &str) -> bool {
    STOP_KEYWORDS.contains(&s)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Integer,
    Real,
    Complex,
    String,
    Identifier,
    Keyword,
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Eof,
}

impl TokenKind {
    pub fn for_operator(s: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match s {
            "+" => Plus,
            "-" => Minus,
            "*" => Star,
            "/" => Slash,
            "**" => Power,
            "=" => Equal,
            "<>" => NotEqual,
            "<" => Less,
            "<=" => LessEqual,
            ">" => Greater,
            ">=" => GreaterEqual,
            "(" => LParen,
            ")" => RParen,
            "[" => LBracket,
            "]" => RBracket,
            "{" => LBrace,
            "}" => RBrace,
            "," => Comma,
            ";" => Semicolon,
            ":" => Colon,
            "." => Dot,
            _ => return None,
        })
    }

    pub fn is_literal(self) -> bool {
        use TokenKind::*;
        matches!(self, Integer | Real | Complex | String)
    }

    pub fn opens(self) -> bool {
        use TokenKind::*;
        matches!(self, LParen | LBracket | LBrace)
    }

    pub fn closes(self) -> bool {
        use TokenKind::*;
        matches!(self, RParen | RBracket | RBrace)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, line: usize, column: usize) -> Token {
        Token {
            kind,
            text: text.to_string(),
            line,
            column,
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Character range of the token within its line.
    pub fn column_range(&self) -> std::ops::Range<usize> {
        self.column..self.column + self.text.chars().count().max(1)
    }
}

/// Renders a token back to source text. Strings are re-quoted with their
/// escapes restored; every other kind renders its text verbatim.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "\"{}\"", escape(&self.text)),
            _ => write!(f, "{}", self.text),
        }
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}
