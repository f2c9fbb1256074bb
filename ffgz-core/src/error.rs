/// Errors produced by the `ffgz-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A required text field was absent, null, or blank after trimming.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },
}
