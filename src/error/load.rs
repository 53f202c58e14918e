use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Expected {expected} worker results but received {received}.")]
    MissingBatchResults { expected: u64, received: u64 },
    #[error("Report accounts for {accounted} requests but {expected} were planned.")]
    ReportMismatch { expected: u64, accounted: u64 },
}
