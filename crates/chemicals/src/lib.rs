//! Chemical registries for the Ether process modeling framework.
//!
//! A [`Chemicals`] registry fixes the positional order of chemical
//! identifiers that every flow and composition array in a simulation is
//! aligned to.
//! Registries are built once and shared read-only behind an [`Arc`],
//! so many containers can reference the same ordering without copying it.
//!
//! [`Settings`] holds the process-level default registry and is consulted at
//! the call boundary when a caller does not supply one explicitly.
//!
//! [`Arc`]: std::sync::Arc

mod chemicals;
mod error;
mod settings;

pub use chemicals::Chemicals;
pub use error::{ChemicalsError, SettingsError};
pub use settings::Settings;
