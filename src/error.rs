use thiserror::Error;

/// Reasons a cell sequence cannot be turned into a [`crate::engine::Board`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 9 cells, found {found}")]
    WrongLength { found: usize },
    #[error("cell {index} holds {value}, expected a value in 0..=8")]
    ValueOutOfRange { index: usize, value: u8 },
    #[error("value {value} appears more than once")]
    DuplicateValue { value: u8 },
    #[error("unrecognized token '{token}'")]
    InvalidToken { token: String },
}
