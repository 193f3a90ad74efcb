use thiserror::Error;

/// Reasons a character grid cannot be turned into a [`crate::map::Map`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("malformed map: {0}")]
    Malformed(String),

    #[error("expected exactly one open cell in the first row, found {found}")]
    NoEntryPoint { found: usize },

    #[error("expected exactly one open cell in the last row, found {found}")]
    NoExitPoint { found: usize },
}
