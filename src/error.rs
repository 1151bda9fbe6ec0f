use thiserror::Error;

/// Reasons a topology constructor rejects its arguments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("a network needs at least 2 layers, got {0}")]
    TooFewLayers(usize),
    #[error("layer {0} has zero neurons")]
    EmptyLayer(usize),
    #[error("connection rate {0} is outside (0, 1]")]
    InvalidConnectionRate(f64),
}

/// Every fallible operation in the crate returns this error.
///
/// None of these are fatal: the object the call was made on is left exactly
/// as it was before the call.
#[derive(Debug, Error)]
pub enum Error {
    #[error("construction failed: {0}")]
    Construction(#[from] ConstructionError),

    /// A buffer length or example count does not match what the receiver declares.
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("network has not been constructed")]
    Unconstructed,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> Error {
        Error::DimensionMismatch { what, expected, actual }
    }
}
