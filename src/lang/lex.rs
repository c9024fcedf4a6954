use super::token::*;
use super::Error;

type Result<T> = std::result::Result<T, Error>;

/// Converts source text into tokens. The sequence always ends with an
/// `Eof` token. Lines are counted from zero.
pub fn tokenize(s: &str) -> Result<Vec<Token>> {
    tokenize_line(s, 0)
}

/// Like [`tokenize`] with every token attributed to `line` onward.
pub fn tokenize_line(s: &str, line: usize) -> Result<Vec<Token>> {
    Tokenizer::new(s, line).collect()
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_sigil(c: char) -> bool {
    c == '%' || c == '#' || c == '$' || c == '&'
}

struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    line_start: usize,
    done: bool,
}

impl Tokenizer {
    fn new(s: &str, line: usize) -> Tokenizer {
        Tokenizer {
            chars: s.chars().collect(),
            pos: 0,
            line,
            line_start: 0,
            done: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn column(&self, pos: usize) -> usize {
        pos - self.line_start + 1
    }

    fn token(&self, kind: TokenKind, text: &str, start: usize) -> Token {
        Token::new(kind, text, self.line, self.column(start))
    }

    fn error_at(&self, err: Error, start: usize) -> Error {
        let col = self.column(start);
        err.in_line_number(Some(self.line)).in_column(&(col..col + 1))
    }

    fn skip_blanks(&mut self) {
        while let Some(ch) = self.peek() {
            if is_basic_whitespace(ch) {
                self.pos += 1;
            } else if ch == '\n' {
                self.pos += 1;
                self.line += 1;
                self.line_start = self.pos;
            } else if ch == '\'' {
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn string(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut s = String::new();
        self.pos += 1;
        loop {
            let ch = match self.peek() {
                Some(ch) if ch != '\n' => ch,
                _ => {
                    return Err(self.error_at(error!(UnterminatedString; "unterminated string"), start))
                }
            };
            self.pos += 1;
            match ch {
                '"' => return Ok(self.token(TokenKind::String, &s, start)),
                '\\' => {
                    match self.peek() {
                        Some('n') => s.push('\n'),
                        Some('t') => s.push('\t'),
                        Some('r') => s.push('\r'),
                        Some('\\') => s.push('\\'),
                        Some('"') => s.push('"'),
                        Some(other) if other != '\n' => {
                            s.push('\\');
                            s.push(other);
                        }
                        _ => {
                            return Err(self.error_at(
                                error!(UnterminatedString; "unterminated string"),
                                start,
                            ))
                        }
                    }
                    self.pos += 1;
                }
                _ => s.push(ch),
            }
        }
    }

    /// Scans `digits[.digits][E[+|-]digits]` and returns the normalized
    /// text, or `None` without moving if no number starts here.
    fn real_text(&mut self) -> Option<String> {
        let start = self.pos;
        let mut s = String::new();
        let mut digits = 0;
        while let Some(ch) = self.peek() {
            if is_basic_digit(ch) {
                s.push(ch);
                digits += 1;
                self.pos += 1;
            } else if ch == '.' && !s.contains('.') {
                s.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        if digits == 0 {
            self.pos = start;
            return None;
        }
        if let Some('e') | Some('E') = self.peek() {
            let mark = self.pos;
            let mut exp = String::from("E");
            self.pos += 1;
            if let Some(sign) = self.peek().filter(|c| *c == '+' || *c == '-') {
                exp.push(sign);
                self.pos += 1;
            }
            let mut exp_digits = 0;
            while let Some(ch) = self.peek().filter(|c| is_basic_digit(*c)) {
                exp.push(ch);
                exp_digits += 1;
                self.pos += 1;
            }
            if exp_digits == 0 {
                self.pos = mark;
            } else {
                s.push_str(&exp);
            }
        }
        Some(s)
    }

    /// True when the character at `pos` is an `i` suffix that is not the
    /// start of a longer identifier.
    fn imaginary_at(&self, n: usize) -> bool {
        match self.peek_at(n) {
            Some('i') | Some('I') => match self.peek_at(n + 1) {
                Some(ch) => !(is_basic_alphabetic(ch) || is_basic_digit(ch) || is_sigil(ch)),
                None => true,
            },
            _ => false,
        }
    }

    fn number(&mut self) -> Result<Token> {
        let start = self.pos;
        let real = match self.real_text() {
            Some(s) => s,
            None => return Err(self.error_at(error!(IllegalCharacter; "illegal character"), start)),
        };
        if self.imaginary_at(0) {
            self.pos += 1;
            return Ok(self.token(TokenKind::Complex, &format!("{}i", real), start));
        }
        if let Some(sign) = self.peek().filter(|c| *c == '+' || *c == '-') {
            let mark = self.pos;
            self.pos += 1;
            if let Some(imag) = self.real_text() {
                if self.imaginary_at(0) {
                    self.pos += 1;
                    let text = format!("{}{}{}i", real, sign, imag);
                    return Ok(self.token(TokenKind::Complex, &text, start));
                }
            }
            self.pos = mark;
        }
        if real.contains('.') || real.contains('E') || real.parse::<i64>().is_err() {
            Ok(self.token(TokenKind::Real, &real, start))
        } else {
            Ok(self.token(TokenKind::Integer, &real, start))
        }
    }

    fn radix(&mut self) -> Result<Token> {
        let start = self.pos;
        let radix = match self.peek_at(1) {
            Some('h') | Some('H') => 16,
            Some('b') | Some('B') => 2,
            _ => return Err(self.error_at(error!(IllegalCharacter; "illegal character: &"), start)),
        };
        self.pos += 2;
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch == '_' {
                self.pos += 1;
            } else if ch.is_digit(radix) {
                digits.push(ch);
                self.pos += 1;
            } else if ch.is_ascii_alphanumeric() {
                return Err(self.error_at(error!(SyntaxError; "invalid digit in radix literal"), start));
            } else {
                break;
            }
        }
        match i64::from_str_radix(&digits, radix) {
            Ok(n) => Ok(self.token(TokenKind::Integer, &n.to_string(), start)),
            Err(_) if digits.is_empty() => {
                Err(self.error_at(error!(SyntaxError; "radix literal has no digits"), start))
            }
            Err(_) => Err(self.error_at(error!(SyntaxError; "radix literal overflows"), start)),
        }
    }

    fn alphabetic(&mut self) -> Token {
        let start = self.pos;
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if is_basic_alphabetic(ch) || is_basic_digit(ch) {
                s.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        if let Some(sigil) = self.peek().filter(|c| is_sigil(*c)) {
            s.push(sigil);
            self.pos += 1;
            if self.peek() == Some('[') && self.peek_at(1) == Some(']') {
                s.push_str("[]");
                self.pos += 2;
            }
            return self.token(TokenKind::Identifier, &s, start);
        }
        let upper = s.to_ascii_uppercase();
        if is_keyword(&upper) {
            self.token(TokenKind::Keyword, &upper, start)
        } else {
            self.token(TokenKind::Identifier, &s, start)
        }
    }

    fn minutia(&mut self) -> Result<Token> {
        let start = self.pos;
        let ch = self.chars[self.pos];
        self.pos += 1;
        let double = match (ch, self.peek()) {
            ('*', Some('*')) => Some("**"),
            ('<', Some('>')) => Some("<>"),
            ('<', Some('=')) => Some("<="),
            ('>', Some('=')) => Some(">="),
            _ => None,
        };
        if let Some(op) = double {
            self.pos += 1;
            if let Some(kind) = TokenKind::for_operator(op) {
                return Ok(self.token(kind, op, start));
            }
        }
        let text = ch.to_string();
        match TokenKind::for_operator(&text) {
            Some(kind) => Ok(self.token(kind, &text, start)),
            None => Err(self.error_at(
                error!(IllegalCharacter; format!("illegal character: {}", ch)),
                start,
            )),
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.skip_blanks();
        let pk = match self.peek() {
            Some(pk) => pk,
            None => {
                self.done = true;
                return Some(Ok(self.token(TokenKind::Eof, "", self.pos)));
            }
        };
        let result = if pk == '"' {
            self.string()
        } else if is_basic_digit(pk) || (pk == '.' && self.peek_at(1).map_or(false, is_basic_digit)) {
            self.number()
        } else if pk == '&' {
            self.radix()
        } else if is_basic_alphabetic(pk) {
            Ok(self.alphabetic())
        } else {
            self.minutia()
        };
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<(TokenKind, String)> {
        tokenize(s)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_radix_literals() {
        assert_eq!(kinds("&HFF")[0], (TokenKind::Integer, "255".to_string()));
        assert_eq!(kinds("&B1101_0011")[0], (TokenKind::Integer, "211".to_string()));
        assert!(tokenize("&H").is_err());
        assert!(tokenize("&B102").is_err());
    }

    #[test]
    fn test_complex_backtracking() {
        assert_eq!(kinds("3+4i")[0], (TokenKind::Complex, "3+4i".to_string()));
        assert_eq!(kinds("2.5I")[0], (TokenKind::Complex, "2.5i".to_string()));
        let t = kinds("1+2*i");
        assert_eq!(t[0], (TokenKind::Integer, "1".to_string()));
        assert_eq!(t[1].0, TokenKind::Plus);
        assert_eq!(t[2], (TokenKind::Integer, "2".to_string()));
        let t = kinds("5+if");
        assert_eq!(t[0], (TokenKind::Integer, "5".to_string()));
        assert_eq!(t[2], (TokenKind::Keyword, "IF".to_string()));
    }

    #[test]
    fn test_scientific() {
        assert_eq!(kinds("1e6")[0], (TokenKind::Real, "1E6".to_string()));
        assert_eq!(kinds("3.2E-4")[0], (TokenKind::Real, "3.2E-4".to_string()));
        assert_eq!(kinds("99999999999999999999")[0].0, TokenKind::Real);
    }

    #[test]
    fn test_identifiers_and_keywords() {
        let t = kinds("for Count% = a$[] To 10");
        assert_eq!(t[0], (TokenKind::Keyword, "FOR".to_string()));
        assert_eq!(t[1], (TokenKind::Identifier, "Count%".to_string()));
        assert_eq!(t[3], (TokenKind::Identifier, "a$[]".to_string()));
        assert_eq!(t[4], (TokenKind::Keyword, "TO".to_string()));
        let t = kinds("a[1]");
        assert_eq!(t[0], (TokenKind::Identifier, "a".to_string()));
        assert_eq!(t[1].0, TokenKind::LBracket);
    }

    #[test]
    fn test_operators() {
        let t: Vec<TokenKind> = kinds("a**2<>b<=c>=d").into_iter().map(|t| t.0).collect();
        use TokenKind::*;
        assert_eq!(
            t,
            vec![Identifier, Power, Integer, NotEqual, Identifier, LessEqual, Identifier,
                GreaterEqual, Identifier, Eof]
        );
    }

    #[test]
    fn test_strings_and_comments() {
        let t = tokenize(r#"PRINT "a\tb\"c" ' trailing remark"#).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t[1].text, "a\tb\"c");
        assert!(t[2].is_eof());
        assert_eq!(t[2].text, "");
        let e = tokenize(r#"PRINT "oops"#).unwrap_err();
        assert_eq!(e.text(), "unterminated string");
    }

    #[test]
    fn test_columns_and_errors() {
        let t = tokenize("  x = 1").unwrap();
        assert_eq!(t[0].column, 3);
        assert_eq!(t[2].column, 7);
        let e = tokenize_line("x = 1 @", 4).unwrap_err();
        assert_eq!(e.line_number(), Some(4));
        assert_eq!(e.column(), 7..8);
    }

    #[test]
    fn test_deterministic() {
        let s = "IF x% > &H10 THEN ' check";
        assert_eq!(tokenize(s).unwrap(), tokenize(s).unwrap());
    }
}
