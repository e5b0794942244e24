use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompassError {
    #[error("{field}: {message}")] Validation { field: String, message: String },
    #[error("Message cannot be empty.")] EmptyMessage,
    #[error("a request is already in flight")] Busy,
    #[error("template error: {0}")] Template(String),
    #[error("provider error: {0}")] Provider(String),
    #[error("schema error: {0}")] Schema(String),
    #[error("no assessment on record; complete the assessment first")] MissingAssessment,
    #[error("state store error: {0}")] Store(String),
}
