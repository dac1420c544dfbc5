use thiserror::Error;

/// Input rejected by the user service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No se proporcionaron datos del usuario")]
    MissingData,
    #[error("No se proporciono un nombre")]
    MissingName,
}

/// Failures inside the user handler. All of them are turned into a response locally.
#[derive(Debug, Error)]
pub enum UserHandlerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("request body is not a string")]
    NonTextBody,
}

/// Failures that escape to the dispatcher's error boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    MalformedEnvelope(serde_json::Error),
    #[error("record {index}: {source}")]
    RecordBody {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    RecordProcessor(anyhow::Error),
}
