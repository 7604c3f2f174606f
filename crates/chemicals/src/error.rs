use thiserror::Error;

/// Errors that can occur when building or querying a [`Chemicals`] registry.
///
/// [`Chemicals`]: crate::Chemicals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChemicalsError {
    /// The identifier is not part of the registry.
    #[error("chemical `{0}` is not defined")]
    UnknownId(String),

    /// The identifier appears more than once in a registry definition.
    #[error("chemical `{0}` is defined more than once")]
    DuplicateId(String),
}

/// Errors that can occur when resolving registries through [`Settings`].
///
/// [`Settings`]: crate::Settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("no default chemicals have been set")]
    NoDefaultChemicals,
}
