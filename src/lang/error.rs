/// Makes an [`Error`](crate::lang::Error) from an
/// [`ErrorCode`](crate::lang::ErrorCode) variant name.
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
}

/// Everything that can go wrong, one code per message.
///
/// `Break` is not a fault; it is the user interrupt travelling the same
/// path as an error so that every loop unwinds the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Syntax,
    DivisionByZero,
    ArrayIndexOver,
    Parameter,
    StackOverflow,
    CantResume,
    LabelNotFound,
    NotInRunMode,
    PgAreaOverflow,
    PgEmpty,
    LoopNothing,
    EndifNotFound,
    ExprTooDeep,
    UnexpectedNext,
    UnexpectedReturn,
    UnexpectedLoop,
    UnexpectedExit,
    UnexpectedContinue,
    UnexpectedRead,
    Break,
}

impl ErrorCode {
    fn message(self) -> &'static str {
        use ErrorCode::*;
        match self {
            Syntax => "Syntax",
            DivisionByZero => "Division by 0",
            ArrayIndexOver => "Array index over",
            Parameter => "Parameter",
            StackOverflow => "Stack overflow",
            CantResume => "Can't resume",
            LabelNotFound => "Label not found",
            NotInRunMode => "Not in run-mode",
            PgAreaOverflow => "PG area overflow",
            PgEmpty => "PG empty",
            LoopNothing => "Loop nothing",
            EndifNotFound => "Endif not found",
            ExprTooDeep => "Expr too deep",
            UnexpectedNext => "Unexpected Next",
            UnexpectedReturn => "Unexpected Return",
            UnexpectedLoop => "Unexpected Loop",
            UnexpectedExit => "Unexpected Exit",
            UnexpectedContinue => "Unexpected Continue",
            UnexpectedRead => "Unexpected Read",
            Break => "Break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    line: Option<u16>,
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error { code, line: None }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn is_break(&self) -> bool {
        self.code == ErrorCode::Break
    }

    /// Stamps the physical line number; 0 means direct mode and stays off
    /// the report.
    pub fn in_line_number(mut self, line: u16) -> Error {
        if self.line.is_none() && line != 0 {
            self.line = Some(line);
        }
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.code == ErrorCode::Break {
            write!(f, "Break")?;
        } else {
            write!(f, "{} error", self.code.message())?;
        }
        if let Some(line) = self.line {
            write!(f, " in {}", line)?;
        }
        Ok(())
    }
}
