use crate::{error::HexConvError, parse::error::ParseError};

/// Errors that can occur when decoding a complete buffer, as opposed to
/// parsing a value out of a buffer that may hold more data afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    Conv(HexConvError),
    Parse(ParseError),
}

impl DecodeError {
    /// Returns `true` if the underlying cause is a buffer that was too short
    /// for the layout being decoded.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Parse(err) if err.is_truncated())
    }
}

impl From<std::convert::Infallible> for DecodeError {
    fn from(void: std::convert::Infallible) -> Self {
        match void {}
    }
}

impl From<HexConvError> for DecodeError {
    fn from(err: HexConvError) -> Self {
        Self::Conv(err)
    }
}

impl From<ParseError> for DecodeError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Conv(err) => {
                write!(f, "hex conversion encountered error: {}", err)
            }
            DecodeError::Parse(err) => {
                write!(f, "parser encountered error: {}", err)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Conv(err) => Some(err),
            DecodeError::Parse(err) => Some(err),
        }
    }
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
