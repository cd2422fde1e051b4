//! Error types for toolprune-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Block '{name}' opened at line {start_line} is never closed")]
    UnterminatedBlock { name: String, start_line: usize },

    #[error("Invalid block pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
