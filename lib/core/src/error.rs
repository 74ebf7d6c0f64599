use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown appid: {0}")]
    UnknownItem(u32),

    #[error("None of the liked appids are present in the index")]
    NoValidSeeds,

    #[error("Missing input file: {0}")]
    MissingInputFile(PathBuf),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
