//! Chemical- and phase-indexed material data for the Ether process modeling
//! framework.
//!
//! This crate provides two containers aligned to a shared
//! [`Chemicals`](ether_chemicals::Chemicals) registry:
//!
//! - [`MaterialData`]: one value per chemical, such as the flow rates of a
//!   single-phase stream
//! - [`MultiPhaseMaterialData`]: one row per phase and one column per
//!   chemical
//!
//! Both are indexed with typed selectors ([`ChemicalKey`], [`PhaseKey`],
//! [`Key`]) that resolve identifiers, phase tags, and slices to positions,
//! and both render their nonzero entries as aligned text for display.

mod describe;
mod error;
mod key;
mod material_data;
mod multi_phase_material_data;
mod selection;

pub use describe::{format_significant, nonzeros, phase_name};
pub use error::{ConfigurationError, MaterialError};
pub use key::{ChemicalKey, Key, PhaseKey, Slice};
pub use material_data::MaterialData;
pub use multi_phase_material_data::{DEFAULT_PHASES, MultiPhaseMaterialData};
pub use selection::Selection;
