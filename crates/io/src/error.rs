use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IoError {
    #[error("Unexpected end of stream: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },
    #[error("Negative length prefix {0}")]
    NegativeLength(i32),
    #[error("{kind} length {len} exceeds maximum {max}")]
    LengthOutOfRange {
        kind: &'static str,
        len: usize,
        max: usize,
    },
    #[error("Length {0} does not fit in a 32-bit prefix")]
    LengthOverflow(usize),
    #[error("Malformed UTF-8 text: {0}")]
    MalformedText(#[from] std::str::Utf8Error),
    #[error("Invalid {kind} value {value:#04x}")]
    InvalidValue { kind: &'static str, value: u8 },
    #[error("Nesting depth {depth} exceeds maximum {max}")]
    NestingTooDeep { depth: usize, max: usize },
    #[error("No constructor registered for type `{0}`")]
    UnknownType(String),
}

impl IoError {
    pub fn end_of_stream(needed: usize, remaining: usize) -> Self {
        Self::UnexpectedEof { needed, remaining }
    }

    pub fn out_of_range(kind: &'static str, len: usize, max: usize) -> Self {
        Self::LengthOutOfRange { kind, len, max }
    }
}

pub type IoResult<T> = Result<T, IoError>;
