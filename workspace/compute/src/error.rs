use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The requested (year, month) pair does not name a calendar month
    #[error("Invalid month: {0}")]
    Month(String),

    /// A transaction row is dated outside the month being aggregated.
    /// The aggregator rejects the whole pass instead of skipping the row,
    /// so a truncated or corrupted result set never looks complete.
    #[error("Transaction outside target month: {0}")]
    OutOfRange(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
