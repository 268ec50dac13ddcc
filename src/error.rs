use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FundError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("{kind} with id {id} already exists")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("Project with id {0} not found")]
    ProjectNotFound(u32),
    #[error("Project name already occupied: {0}")]
    ProjectNameOccupied(String),
    #[error("Closed project {0} cannot be edited")]
    ProjectClosed(u32),
    #[error("Project {0} was already invested, cannot delete")]
    ProjectInvested(u32),
    #[error("Full amount {requested} cannot be less than already invested amount {invested}")]
    AmountBelowInvested { invested: Decimal, requested: Decimal },
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, FundError>;
