use thiserror::Error;

#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),

    #[error("invalid integer at offset {offset}: {reason}")]
    InvalidInteger { offset: usize, reason: String },

    #[error("invalid string length at offset {0}")]
    InvalidStringLength(usize),

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("dictionary key at offset {0} is not a byte string")]
    NonStringKey(usize),

    #[error("trailing data after value at offset {0}")]
    TrailingData(usize),

    #[error("nesting too deep at offset {0}")]
    NestingTooDeep(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
