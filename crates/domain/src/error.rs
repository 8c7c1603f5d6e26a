#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("malformed data: {0}")]
    Malformed(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutError {
    #[error("Add at least one block before starting a workout.")]
    NoBlocks,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Keep at least 2 exercises in a superset/circuit.")]
    GroupTooSmall,
}
