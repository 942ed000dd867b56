use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Values must be positive. Got {field} = '{value}'")]
    InvalidInput { field: &'static str, value: String },

    #[error("Too many trials: {requested} requested, at most {max} allowed")]
    TooManyTrials { requested: u64, max: u64 },

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Entropy source error: {0}")]
    Entropy(#[from] getrandom::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SimulationError {
    pub fn invalid_input(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
        }
    }

    /// Usage mistakes exit with 2, runtime failures with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput { .. } | Self::TooManyTrials { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
