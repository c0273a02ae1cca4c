
use thiserror::Error;

use crate::construct::BookId;

#[derive(Error, Debug)]
pub enum ShelvingError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Shelf count mismatch: {declared} declared but {supplied} identifiers supplied")]
    ShelfCountMismatch { declared: usize, supplied: usize },
    #[error("No such shelf: {shelf}")]
    ShelfNotFound { shelf: String },
    #[error("Shelf {shelf} is at max capacity ({capacity})")]
    ShelfFull { shelf: String, capacity: usize },
    #[error("Book {book} is already shelved on {shelf}, unshelve it first")]
    AlreadyShelved { book: BookId, shelf: String },
    #[error("Book {book} is in storage, not on a shelf")]
    NotShelved { book: BookId },
    #[error("Book {book} not found on shelf {shelf}")]
    BookNotFound { book: BookId, shelf: String },
    #[error("Unknown book: {book}")]
    UnknownBook { book: BookId },
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, ShelvingError>;
