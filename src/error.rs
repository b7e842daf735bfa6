use thiserror::Error;

/// Errors raised by grid accessors and the search engine.
///
/// "No path exists" is not an error: a search that exhausts its frontier
/// returns `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("cell ({row}, {col}) is outside a {rows}x{rows} grid")]
    OutOfBounds { row: usize, col: usize, rows: usize },

    #[error("invalid run: {0}")]
    InvalidRun(String),

    #[error("search cancelled")]
    Cancelled,

    #[error("invalid grid dimensions: {rows} rows")]
    InvalidDimensions { rows: usize },
}

pub type SearchResult<T> = Result<T, SearchError>;
