use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// An internal invariant was violated mid-run.  The run is aborted and
    /// the failing computation named, rather than returning a truncated or
    /// silently-wrong result.
    #[error("internal failure in {what}: {detail}")]
    Internal {
        what:   &'static str,
        detail: String,
    },
}

pub type SimResult<T> = Result<T, SimError>;
