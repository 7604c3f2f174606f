use ether_chemicals::{ChemicalsError, SettingsError};
use thiserror::Error;

/// Errors raised when a container is constructed with inconsistent inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("may specify either `data` or `id_data`, but not both")]
    DataAndIdData,

    #[error("size of data ({found}) must be equal to the number of chemicals ({expected})")]
    SizeMismatch { expected: usize, found: usize },

    #[error("number of data rows ({found}) must be equal to the number of phases ({expected})")]
    PhaseCountMismatch { expected: usize, found: usize },

    #[error(
        "number of data columns ({found}) must be equal to the number of chemicals ({expected})"
    )]
    ChemicalCountMismatch { expected: usize, found: usize },
}

/// Errors that can occur when building, indexing, or assigning material data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterialError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The phase tag is not one of the container's phases.
    #[error("phase `{0}` is not defined")]
    UndefinedPhase(char),

    /// A chemical identifier could not be resolved by the registry.
    #[error(transparent)]
    Chemicals(#[from] ChemicalsError),

    /// No registry was given and no default is configured.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The assigned values cannot be broadcast to the selected positions.
    #[error("cannot assign values of shape {found:?} to a selection of shape {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Paired phase and identifier lists have lengths that cannot be matched.
    #[error("cannot pair {phases} phases with {chemicals} chemicals")]
    PairLengthMismatch { phases: usize, chemicals: usize },

    #[error("slice step cannot be zero")]
    ZeroSliceStep,
}
