use thiserror::Error;

/// Failure reported by a [`BookInfoProvider`](super::ports::BookInfoProvider).
#[derive(Debug, Error)]
pub enum BookLookupError {
    #[error("book {0} not found")]
    NotFound(i64),
    #[error("book catalog unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by an [`OrderRepository`](super::ports::OrderRepository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid empty books")]
    EmptyOrder,
    #[error("invalid book ID: {0}")]
    InvalidBookId(i64),
    #[error("invalid book quantity {quantity} for book {book_id}")]
    InvalidQuantity { book_id: i64, quantity: i32 },
    #[error("duplicate book {0} in order, use quantity instead")]
    DuplicateBookInOrder(i64),
    #[error("book lookup failed: {0}")]
    BookLookupFailed(#[source] BookLookupError),
    #[error("order creation failed: {0}")]
    OrderPersistenceFailed(#[source] RepositoryError),
    #[error("order history unavailable: {0}")]
    OrderHistoryUnavailable(#[source] RepositoryError),
}

/// Stable discriminant of a [`DomainError`], safe to match on or send over
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyOrder,
    InvalidBookId,
    InvalidQuantity,
    DuplicateBookInOrder,
    BookLookupFailed,
    OrderPersistenceFailed,
    OrderHistoryUnavailable,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EmptyOrder => "EMPTY_ORDER",
            ErrorKind::InvalidBookId => "INVALID_BOOK_ID",
            ErrorKind::InvalidQuantity => "INVALID_QUANTITY",
            ErrorKind::DuplicateBookInOrder => "DUPLICATE_BOOK_IN_ORDER",
            ErrorKind::BookLookupFailed => "BOOK_LOOKUP_FAILED",
            ErrorKind::OrderPersistenceFailed => "ORDER_PERSISTENCE_FAILED",
            ErrorKind::OrderHistoryUnavailable => "ORDER_HISTORY_UNAVAILABLE",
        }
    }

    /// Caller-input problems, fixable by resubmitting corrected input.
    pub fn is_validation(self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyOrder
                | ErrorKind::InvalidBookId
                | ErrorKind::InvalidQuantity
                | ErrorKind::DuplicateBookInOrder
        )
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::EmptyOrder => ErrorKind::EmptyOrder,
            DomainError::InvalidBookId(_) => ErrorKind::InvalidBookId,
            DomainError::InvalidQuantity { .. } => ErrorKind::InvalidQuantity,
            DomainError::DuplicateBookInOrder(_) => ErrorKind::DuplicateBookInOrder,
            DomainError::BookLookupFailed(_) => ErrorKind::BookLookupFailed,
            DomainError::OrderPersistenceFailed(_) => ErrorKind::OrderPersistenceFailed,
            DomainError::OrderHistoryUnavailable(_) => ErrorKind::OrderHistoryUnavailable,
        }
    }
}

impl From<BookLookupError> for DomainError {
    fn from(e: BookLookupError) -> Self {
        DomainError::BookLookupFailed(e)
    }
}
