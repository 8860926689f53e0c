use thiserror::Error;

/// Errors surfaced to the dispatch layer, which converts them into
/// protocol-level error replies carrying the message string only.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The supplied date string failed the `YYYY-MM-DD` format parse.
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The supplied date lies before the current date.
    #[error("Past dates are not allowed")]
    PastDate,

    /// A failure raised by the entitlement backend. Full detail is logged
    /// server-side; only the message text travels to the caller.
    #[error("{0}")]
    Business(String),
}

impl ServiceError {
    pub(crate) fn business(err: anyhow::Error) -> Self {
        tracing::error!("entitlement backend call failed: {err:#}");
        Self::Business(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
