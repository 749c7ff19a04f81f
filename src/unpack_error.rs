//! Unpacker errors.

/// Errors thrown by [`crate::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackError {
    /// The input was exhausted before the requested number of values was emitted.
    UnexpectedEnd,
    /// The scheme's smallest bucket does not fit inside the chosen integer width.
    UnsupportedScheme,
}

impl std::fmt::Display for UnpackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnpackError::UnexpectedEnd => {
                write!(f, "input exhausted before the requested value count was reached")
            }
            UnpackError::UnsupportedScheme => {
                write!(
                    f,
                    "the scheme's smallest bucket does not fit the requested integer width"
                )
            }
        }
    }
}

impl std::error::Error for UnpackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
