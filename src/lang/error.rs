use super::{Column, LineNumber};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    /// Tokenizer and statement parser failures.
    pub fn is_parse(&self) -> bool {
        use ErrorCode::*;
        matches!(
            self.code,
            SyntaxError | UnterminatedString | IllegalCharacter | LineBufferOverflow
        )
    }

    /// Failures reported by the block-linking analyzer.
    pub fn is_structural(&self) -> bool {
        use ErrorCode::*;
        matches!(
            self.code,
            UndefinedLabel
                | BlockMismatch
                | MissingTerminator
                | DuplicateLabel
                | NextMismatch
                | IllegalExit
        )
    }

    pub fn is_runtime(&self) -> bool {
        !self.is_parse() && !self.is_structural()
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        Error {
            code: self.code,
            line_number: line,
            column: self.column.clone(),
            message: self.message.clone(),
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        Error {
            code: self.code,
            line_number: self.line_number,
            column: column.clone(),
            message: self.message.clone(),
        }
    }

    pub fn message<S: Into<String>>(&self, message: S) -> Error {
        Error {
            code: self.code,
            line_number: self.line_number,
            column: self.column.clone(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    ReturnWithoutGosub = 3,
    IllegalFunctionCall = 5,
    Overflow = 6,
    UndefinedLabel = 8,
    SubscriptOutOfRange = 9,
    RedimensionedArray = 10,
    DivisionByZero = 11,
    TypeMismatch = 13,
    LineBufferOverflow = 23,
    UnterminatedString = 24,
    IllegalCharacter = 25,
    BlockMismatch = 26,
    MissingTerminator = 27,
    DuplicateLabel = 28,
    NextMismatch = 29,
    IllegalExit = 30,
    UserThrow = 40,
    Unparsable = 41,
    StackOverflow = 42,
    InternalError = 51,
    BadFileHandle = 52,
    FileNotFound = 53,
    BadFileMode = 54,
    DiskIoError = 57,
    FileAlreadyExists = 58,
}

impl ErrorCode {
    pub fn name(self) -> &'static str {
        use ErrorCode::*;
        match self {
            SyntaxError => "SYNTAX ERROR",
            ReturnWithoutGosub => "RETURN WITHOUT GOSUB",
            IllegalFunctionCall => "ILLEGAL FUNCTION CALL",
            Overflow => "OVERFLOW",
            UndefinedLabel => "UNDEFINED LABEL",
            SubscriptOutOfRange => "SUBSCRIPT OUT OF RANGE",
            RedimensionedArray => "REDIMENSIONED ARRAY",
            DivisionByZero => "DIVISION BY ZERO",
            TypeMismatch => "TYPE MISMATCH",
            LineBufferOverflow => "LINE BUFFER OVERFLOW",
            UnterminatedString => "UNTERMINATED STRING",
            IllegalCharacter => "ILLEGAL CHARACTER",
            BlockMismatch => "BLOCK MISMATCH",
            MissingTerminator => "MISSING TERMINATOR",
            DuplicateLabel => "DUPLICATE LABEL",
            NextMismatch => "NEXT MISMATCH",
            IllegalExit => "ILLEGAL EXIT",
            UserThrow => "EXCEPTION",
            Unparsable => "UNPARSABLE STATEMENT",
            StackOverflow => "STACK OVERFLOW",
            InternalError => "INTERNAL ERROR",
            BadFileHandle => "BAD FILE HANDLE",
            FileNotFound => "FILE NOT FOUND",
            BadFileMode => "BAD FILE MODE",
            DiskIoError => "DISK I/O ERROR",
            FileAlreadyExists => "FILE ALREADY EXISTS",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" {}", line_number));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if suffix.is_empty() {
            write!(f, "{}", self.code.name())?;
        } else {
            write!(f, "{} IN{}", self.code.name(), suffix)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}
