use std::{fmt, sync::Arc};

use ether_chemicals::{Chemicals, Settings};
use ndarray::{Array1, Axis};

use crate::{
    ChemicalKey, ConfigurationError, MaterialError, Selection,
    describe::{self, EMPTY},
    key::Index,
};

/// Per-chemical quantities aligned to a [`Chemicals`] registry.
///
/// Holds one value for each chemical in the registry, such as the molar flow
/// rates of a stream.
/// The number of values always equals the registry size.
///
/// The `units` string is a display label only; no conversions are applied.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ether_chemicals::Chemicals;
/// use ether_material::MaterialData;
///
/// let chemicals = Arc::new(Chemicals::new(["Water", "Ethanol", "Methane"]).unwrap());
/// let mut flows = MaterialData::from_id_data(chemicals, &[("Ethanol", 5.0)])
///     .unwrap()
///     .with_units("kmol/hr");
///
/// flows.set("Water", 2.0).unwrap();
///
/// assert_eq!(flows.get("Water").unwrap().as_scalar(), Some(2.0));
/// assert_eq!(flows.total(), 7.0);
/// ```
#[derive(Clone, PartialEq)]
pub struct MaterialData {
    data: Array1<f64>,
    units: String,
    chemicals: Arc<Chemicals>,
}

impl MaterialData {
    const NAME: &'static str = "MaterialData";

    /// Creates material data from either a full array or identifier-value
    /// pairs.
    ///
    /// With neither, every value is zero.
    /// With `id_data`, unlisted chemicals are zero; if an identifier is
    /// listed more than once the last value wins.
    ///
    /// # Errors
    ///
    /// Returns an error if both `data` and `id_data` are given, if `data` does
    /// not have one value per chemical, or if an identifier is not in the
    /// registry.
    pub fn new(
        chemicals: Arc<Chemicals>,
        data: Option<Array1<f64>>,
        id_data: &[(&str, f64)],
    ) -> Result<Self, MaterialError> {
        let size = chemicals.size();
        let data = match data {
            Some(_) if !id_data.is_empty() => {
                return Err(ConfigurationError::DataAndIdData.into());
            }
            Some(data) if data.len() != size => {
                return Err(ConfigurationError::SizeMismatch {
                    expected: size,
                    found: data.len(),
                }
                .into());
            }
            Some(data) => data,
            None => {
                let mut data = Array1::zeros(size);
                for &(id, value) in id_data {
                    data[chemicals.index(id)?] = value;
                }
                data
            }
        };

        Ok(Self::from_parts(chemicals, data))
    }

    /// Creates material data with every value zero.
    #[must_use]
    pub fn zeros(chemicals: Arc<Chemicals>) -> Self {
        let data = Array1::zeros(chemicals.size());
        Self::from_parts(chemicals, data)
    }

    fn from_parts(chemicals: Arc<Chemicals>, data: Array1<f64>) -> Self {
        log::debug!("created {} with {} chemicals", Self::NAME, chemicals.size());
        Self {
            data,
            units: String::new(),
            chemicals,
        }
    }

    /// Creates material data from one value per chemical.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not have one value per chemical.
    pub fn from_data(
        chemicals: Arc<Chemicals>,
        data: impl Into<Array1<f64>>,
    ) -> Result<Self, MaterialError> {
        Self::new(chemicals, Some(data.into()), &[])
    }

    /// Creates material data from identifier-value pairs, zero elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier is not in the registry.
    pub fn from_id_data(
        chemicals: Arc<Chemicals>,
        id_data: &[(&str, f64)],
    ) -> Result<Self, MaterialError> {
        Self::new(chemicals, None, id_data)
    }

    /// Creates material data using the registry resolved by `settings`.
    ///
    /// The given registry is used when present, otherwise the default.
    ///
    /// # Errors
    ///
    /// Returns an error if no registry can be resolved, or for any reason
    /// listed on [`MaterialData::new`].
    pub fn with_settings(
        settings: &Settings,
        chemicals: Option<&Arc<Chemicals>>,
        data: Option<Array1<f64>>,
        id_data: &[(&str, f64)],
    ) -> Result<Self, MaterialError> {
        let chemicals = settings.get_default_chemicals(chemicals)?;
        Self::new(chemicals, data, id_data)
    }

    /// Returns this data with the given units label.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Returns the values, one per chemical in registry order.
    #[must_use]
    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    /// Replaces all values.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not have one value per chemical.
    pub fn set_data(&mut self, data: impl Into<Array1<f64>>) -> Result<(), MaterialError> {
        let data = data.into();
        if data.len() != self.chemicals.size() {
            return Err(ConfigurationError::SizeMismatch {
                expected: self.chemicals.size(),
                found: data.len(),
            }
            .into());
        }
        self.data = data;
        Ok(())
    }

    /// Returns the units label, empty if none was set.
    #[must_use]
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Returns the registry the values are aligned to.
    #[must_use]
    pub fn chemicals(&self) -> &Arc<Chemicals> {
        &self.chemicals
    }

    /// Returns the sum of all values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.data.sum()
    }

    /// Returns the selected values.
    ///
    /// A single identifier selects a scalar; several identifiers or a slice
    /// select a vector in the order requested.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier is not in the registry or a slice
    /// step is zero.
    pub fn get<'k>(&self, key: impl Into<ChemicalKey<'k>>) -> Result<Selection, MaterialError> {
        Ok(match key.into().resolve(&self.chemicals)? {
            Index::One(i) => Selection::Scalar(self.data[i]),
            Index::Many(indices) => Selection::Vector(self.data.select(Axis(0), &indices)),
        })
    }

    /// Assigns values to the selected chemicals.
    ///
    /// A scalar is written to every selected position.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be resolved or the values cannot be
    /// broadcast to the selection.
    /// Nothing is written when an error is returned.
    pub fn set<'k>(
        &mut self,
        key: impl Into<ChemicalKey<'k>>,
        values: impl Into<Selection>,
    ) -> Result<(), MaterialError> {
        let index = key.into().resolve(&self.chemicals)?;

        let mut shape = Vec::new();
        index.extend_shape(&mut shape);
        let values = values.into().broadcast(&shape)?;

        for (&i, value) in index.positions().iter().zip(values) {
            self.data[i] = value;
        }
        Ok(())
    }

    /// Iterates over the values in registry order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Renders the nonzero values, showing at most `n` entries.
    ///
    /// Chemicals with a zero value are omitted.
    /// When more than `n` chemicals are nonzero, the last shown line before
    /// the final entry becomes `...`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use ether_chemicals::Chemicals;
    /// use ether_material::MaterialData;
    ///
    /// let chemicals = Arc::new(Chemicals::new(["Water", "Ethanol", "Methane"]).unwrap());
    /// let data = MaterialData::from_data(chemicals, vec![0.0, 5.0, 0.0]).unwrap();
    ///
    /// assert_eq!(data.describe(5), "MaterialData:\n data: Ethanol  5");
    /// ```
    #[must_use]
    pub fn describe(&self, n: usize) -> String {
        let mut info = format!("{}:\n", Self::NAME);

        let (ids, values) = describe::nonzeros(self.chemicals.iter(), self.data.view());
        if ids.is_empty() {
            info.push_str(EMPTY);
            return info;
        }

        let start = if self.units.is_empty() {
            " data: ".to_owned()
        } else {
            format!(" data ({}): ", self.units)
        };
        let indent = " ".repeat(start.chars().count());
        let width = describe::max_width(ids.iter().copied()) + 1;

        info.push_str(&start);
        describe::push_entries(&mut info, &ids, &values, width, n, &indent);
        info
    }

    /// Prints [`describe`](Self::describe) to standard output.
    pub fn show(&self, n: usize) {
        println!("{}", self.describe(n));
    }
}

impl<'a> IntoIterator for &'a MaterialData {
    type Item = f64;
    type IntoIter = std::iter::Copied<ndarray::iter::Iter<'a, f64, ndarray::Ix1>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter().copied()
    }
}

/// Renders up to five nonzero entries.
impl fmt::Display for MaterialData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(5))
    }
}

impl fmt::Debug for MaterialData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", Self::NAME)?;
        for (id, value) in self.chemicals.iter().zip(&self.data) {
            write!(f, "{id}={value:?}, ")?;
        }
        write!(f, "units='{}')", self.units)
    }
}
