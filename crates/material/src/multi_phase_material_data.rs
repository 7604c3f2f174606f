use std::{
    collections::HashMap,
    fmt::{self, Write},
    sync::Arc,
};

use ether_chemicals::{Chemicals, Settings};
use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::{
    ChemicalKey, ConfigurationError, Key, MaterialError, PhaseKey, Selection,
    describe::{self, CHEMICAL_HEADER, EMPTY},
    key::Index,
};

/// Phases used when none are given: liquid and vapor.
pub const DEFAULT_PHASES: &str = "lg";

/// Phase-by-chemical quantities aligned to a [`Chemicals`] registry.
///
/// Rows follow the phase tags in order and columns follow the registry.
/// Common tags are `s` (solid), `l` (liquid), `L` (a second liquid), and
/// `g` (vapor).
///
/// The `units` string is a display label only; no conversions are applied.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ether_chemicals::Chemicals;
/// use ether_material::{MultiPhaseMaterialData, Selection};
///
/// let chemicals = Arc::new(Chemicals::new(["Water", "Ethanol"]).unwrap());
/// let mut flows = MultiPhaseMaterialData::zeros(chemicals, "lg");
///
/// flows.set(('l', "Water"), 1.0).unwrap();
/// flows.set(('g', "Ethanol"), 2.0).unwrap();
///
/// assert_eq!(flows.get('g').unwrap(), Selection::from(vec![0.0, 2.0]));
/// assert_eq!(flows.total(), 3.0);
/// ```
#[derive(Clone, PartialEq)]
pub struct MultiPhaseMaterialData {
    phases: String,
    phase_index: HashMap<char, usize>,
    data: Array2<f64>,
    units: String,
    chemicals: Arc<Chemicals>,
}

impl MultiPhaseMaterialData {
    const NAME: &'static str = "MultiPhaseMaterialData";

    /// Creates multi-phase data from a full array, or all zeros if `data` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of rows differs from the number of
    /// phases or the number of columns differs from the registry size.
    pub fn new(
        chemicals: Arc<Chemicals>,
        phases: &str,
        data: Option<Array2<f64>>,
    ) -> Result<Self, MaterialError> {
        let shape = (phases.chars().count(), chemicals.size());
        let data = match data {
            Some(data) => {
                check_shape(shape, &data)?;
                data
            }
            None => Array2::zeros(shape),
        };

        Ok(Self::from_parts(chemicals, phases, data))
    }

    /// Creates multi-phase data with every value zero.
    #[must_use]
    pub fn zeros(chemicals: Arc<Chemicals>, phases: &str) -> Self {
        let data = Array2::zeros((phases.chars().count(), chemicals.size()));
        Self::from_parts(chemicals, phases, data)
    }

    /// Creates multi-phase data using the registry resolved by `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if no registry can be resolved, or for any reason
    /// listed on [`MultiPhaseMaterialData::new`].
    pub fn with_settings(
        settings: &Settings,
        chemicals: Option<&Arc<Chemicals>>,
        phases: &str,
        data: Option<Array2<f64>>,
    ) -> Result<Self, MaterialError> {
        let chemicals = settings.get_default_chemicals(chemicals)?;
        Self::new(chemicals, phases, data)
    }

    fn from_parts(chemicals: Arc<Chemicals>, phases: &str, data: Array2<f64>) -> Self {
        // A repeated tag resolves to its last row.
        let phase_index = phases.chars().enumerate().map(|(i, phase)| (phase, i)).collect();

        log::debug!(
            "created {} with phases {phases:?} and {} chemicals",
            Self::NAME,
            chemicals.size()
        );
        Self {
            phases: phases.to_owned(),
            phase_index,
            data,
            units: String::new(),
            chemicals,
        }
    }

    /// Returns this data with the given units label.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Returns the values, one row per phase and one column per chemical.
    #[must_use]
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Replaces all values.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not have one row per phase and one
    /// column per chemical.
    pub fn set_data(&mut self, data: Array2<f64>) -> Result<(), MaterialError> {
        check_shape(self.data.dim(), &data)?;
        self.data = data;
        Ok(())
    }

    /// Returns the phase tags in row order.
    #[must_use]
    pub fn phases(&self) -> &str {
        &self.phases
    }

    /// Returns the units label, empty if none was set.
    #[must_use]
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Returns the registry the columns are aligned to.
    #[must_use]
    pub fn chemicals(&self) -> &Arc<Chemicals> {
        &self.chemicals
    }

    /// Returns the sum of all values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.data.sum()
    }

    /// Returns the total of each phase, in phase order.
    #[must_use]
    pub fn total_by_phase(&self) -> Array1<f64> {
        self.data.sum_axis(Axis(1))
    }

    /// Returns the total of each chemical over all phases, in registry order.
    #[must_use]
    pub fn total_by_chemical(&self) -> Array1<f64> {
        self.data.sum_axis(Axis(0))
    }

    fn resolve(&self, key: Key<'_>) -> Result<Cells, MaterialError> {
        let phase_count = self.data.nrows();
        match key {
            Key::ByPhase(phases) => {
                let rows = phases.resolve(&self.phase_index, phase_count)?;
                let columns = Index::Many((0..self.chemicals.size()).collect());
                Ok(Cells::Grid(rows, columns))
            }
            Key::ByPhaseAndIdentifier(
                phases @ PhaseKey::ByPhases(_),
                chemicals @ ChemicalKey::ByIdentifiers(_),
            ) => {
                let rows = phases.resolve(&self.phase_index, phase_count)?;
                let columns = chemicals.resolve(&self.chemicals)?;
                pair(rows.positions(), columns.positions()).map(Cells::Pairs)
            }
            Key::ByPhaseAndIdentifier(phases, chemicals) => {
                let rows = phases.resolve(&self.phase_index, phase_count)?;
                let columns = chemicals.resolve(&self.chemicals)?;
                Ok(Cells::Grid(rows, columns))
            }
        }
    }

    /// Returns the selected values.
    ///
    /// A single phase with a single chemical selects a scalar.
    /// A single phase, or a single chemical across several phases, selects a
    /// vector.
    /// A list of phase tags with a list of identifiers selects the cells they
    /// name pairwise, as a vector; a list of one length broadcasts against
    /// the other.
    /// Any other combination with a slice selects a matrix with one row per
    /// selected phase and one column per selected chemical.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::UndefinedPhase`] for a phase tag that is not
    /// defined, [`MaterialError::PairLengthMismatch`] for paired lists that
    /// cannot be matched, or an error if an identifier is not in the
    /// registry.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Result<Selection, MaterialError> {
        let selection = match self.resolve(key.into())? {
            Cells::Grid(Index::One(row), Index::One(column)) => {
                Selection::Scalar(self.data[[row, column]])
            }
            Cells::Grid(Index::One(row), Index::Many(columns)) => {
                Selection::Vector(self.data.row(row).select(Axis(0), &columns))
            }
            Cells::Grid(Index::Many(rows), Index::One(column)) => {
                Selection::Vector(self.data.column(column).select(Axis(0), &rows))
            }
            Cells::Grid(Index::Many(rows), Index::Many(columns)) => Selection::Matrix(
                self.data
                    .select(Axis(0), &rows)
                    .select(Axis(1), &columns),
            ),
            Cells::Pairs(cells) => {
                Selection::Vector(cells.iter().map(|&cell| self.data[cell]).collect())
            }
        };
        Ok(selection)
    }

    /// Assigns values to the selected cells.
    ///
    /// Cells are selected as in [`get`](Self::get). Values are broadcast to
    /// the selection, so a scalar fills every cell and a vector with one
    /// value per selected chemical fills every selected phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be resolved or the values cannot be
    /// broadcast to the selection.
    /// Nothing is written when an error is returned.
    pub fn set<'k>(
        &mut self,
        key: impl Into<Key<'k>>,
        values: impl Into<Selection>,
    ) -> Result<(), MaterialError> {
        let (cells, shape) = match self.resolve(key.into())? {
            Cells::Grid(rows, columns) => {
                let mut shape = Vec::new();
                rows.extend_shape(&mut shape);
                columns.extend_shape(&mut shape);
                let cells = rows
                    .positions()
                    .iter()
                    .flat_map(|&row| columns.positions().iter().map(move |&column| [row, column]))
                    .collect::<Vec<_>>();
                (cells, shape)
            }
            Cells::Pairs(cells) => {
                let shape = vec![cells.len()];
                (cells, shape)
            }
        };
        let values = values.into().broadcast(&shape)?;

        for (cell, value) in cells.into_iter().zip(values) {
            self.data[cell] = value;
        }
        Ok(())
    }

    /// Iterates over `(phase, row)` pairs in phase order.
    pub fn iter(&self) -> impl Iterator<Item = (char, ArrayView1<'_, f64>)> + '_ {
        self.phases.chars().zip(self.data.rows())
    }

    /// Renders the nonzero values grouped by phase, showing at most `n`
    /// entries per phase.
    ///
    /// Chemicals that are zero in every phase are never shown, and phases
    /// with no nonzero values are skipped.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use ether_chemicals::Chemicals;
    /// use ether_material::MultiPhaseMaterialData;
    /// use ndarray::array;
    ///
    /// let chemicals = Arc::new(Chemicals::new(["Water", "Ethanol"]).unwrap());
    /// let values = array![[1.0, 0.0], [0.0, 2.0]];
    /// let data = MultiPhaseMaterialData::new(chemicals, "lg", Some(values)).unwrap();
    ///
    /// assert_eq!(
    ///     data.describe(5),
    ///     "MultiPhaseMaterialData:\n liquid: Water     1\n vapor:  Ethanol   2",
    /// );
    /// ```
    #[must_use]
    pub fn describe(&self, n: usize) -> String {
        let mut info = format!("{}:\n", Self::NAME);

        let columns: Vec<usize> = self
            .total_by_chemical()
            .iter()
            .enumerate()
            .filter(|&(_, total)| *total != 0.0)
            .map(|(i, _)| i)
            .collect();
        if columns.is_empty() {
            info.push_str(EMPTY);
            return info;
        }

        let shown_ids: Vec<&str> = columns.iter().filter_map(|&i| self.chemicals.id(i)).collect();
        let label_width = describe::max_width(self.chemicals.iter()).max(CHEMICAL_HEADER.len());
        let width = label_width + 1;

        let mut header = (!self.units.is_empty()).then_some(self.units.as_str());
        let mut blocks = Vec::new();
        for phase in self.phases.chars() {
            // A repeated tag renders the row it resolves to.
            let Some(&row) = self.phase_index.get(&phase) else {
                continue;
            };
            let row = self.data.row(row).select(Axis(0), &columns);
            let (ids, values) = describe::nonzeros(shown_ids.iter().copied(), row.view());
            if ids.is_empty() {
                continue;
            }

            let name = describe::phase_name(phase).map_or_else(|| phase.to_string(), str::to_owned);
            let mut beginning = format!(" {name}: ");
            let mut indent = " ".repeat(beginning.chars().count());
            // Align five-letter names with "liquid".
            if matches!(phase, 's' | 'g') {
                beginning.push(' ');
                indent.push(' ');
            }

            let mut block = String::new();
            if let Some(units) = header.take() {
                // Writing to a `String` cannot fail.
                let _ = writeln!(block, "{indent}{CHEMICAL_HEADER:<width$} {units}");
            }
            block.push_str(&beginning);
            describe::push_entries(&mut block, &ids, &values, width, n, &indent);
            blocks.push(block);
        }

        info.push_str(&blocks.join("\n"));
        info
    }

    /// Prints [`describe`](Self::describe) to standard output.
    pub fn show(&self, n: usize) {
        println!("{}", self.describe(n));
    }
}

/// Cells selected by a resolved key.
enum Cells {
    /// Every combination of the selected rows and columns.
    Grid(Index, Index),
    /// Explicit `[row, column]` positions.
    Pairs(Vec<[usize; 2]>),
}

/// Pairs rows with columns element by element, broadcasting a single entry.
fn pair(rows: &[usize], columns: &[usize]) -> Result<Vec<[usize; 2]>, MaterialError> {
    let cells = match (rows, columns) {
        (rows, columns) if rows.len() == columns.len() => rows
            .iter()
            .zip(columns)
            .map(|(&row, &column)| [row, column])
            .collect(),
        (&[row], columns) => columns.iter().map(|&column| [row, column]).collect(),
        (rows, &[column]) => rows.iter().map(|&row| [row, column]).collect(),
        (rows, columns) => {
            return Err(MaterialError::PairLengthMismatch {
                phases: rows.len(),
                chemicals: columns.len(),
            });
        }
    };
    Ok(cells)
}

fn check_shape(expected: (usize, usize), data: &Array2<f64>) -> Result<(), ConfigurationError> {
    let (rows, columns) = data.dim();
    if rows != expected.0 {
        return Err(ConfigurationError::PhaseCountMismatch {
            expected: expected.0,
            found: rows,
        });
    }
    if columns != expected.1 {
        return Err(ConfigurationError::ChemicalCountMismatch {
            expected: expected.1,
            found: columns,
        });
    }
    Ok(())
}

impl<'a> IntoIterator for &'a MultiPhaseMaterialData {
    type Item = (char, ArrayView1<'a, f64>);
    type IntoIter =
        std::iter::Zip<std::str::Chars<'a>, ndarray::iter::LanesIter<'a, f64, ndarray::Ix1>>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.chars().zip(self.data.rows())
    }
}

/// Renders up to five nonzero entries per phase.
impl fmt::Display for MultiPhaseMaterialData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(5))
    }
}

impl fmt::Debug for MultiPhaseMaterialData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(phases='{}', units='{}', data=...)",
            Self::NAME,
            self.phases,
            self.units
        )
    }
}
