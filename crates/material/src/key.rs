//! Selectors for indexing material data.
//!
//! Chemicals are selected with a [`ChemicalKey`], phases with a [`PhaseKey`],
//! and multi-phase data with a [`Key`] combining the two.
//! Every selector resolves to positions before any data is touched, so an
//! invalid key never leaves a container partially modified.
//!
//! Most selectors are built through `From` conversions:
//!
//! ```
//! use ether_material::{ChemicalKey, Key, PhaseKey, Slice};
//!
//! assert_eq!(ChemicalKey::from("Water"), ChemicalKey::ByIdentifier("Water"));
//! assert_eq!(ChemicalKey::from(1..3), ChemicalKey::BySlice(Slice::new(Some(1), Some(3), 1)));
//! assert_eq!(PhaseKey::from('l'), PhaseKey::ByPhase('l'));
//! assert_eq!(
//!     Key::from(('g', &["Methane", "Ethane"])),
//!     Key::ByPhaseAndIdentifier(
//!         PhaseKey::ByPhase('g'),
//!         ChemicalKey::ByIdentifiers(&["Methane", "Ethane"]),
//!     ),
//! );
//! ```

use std::{
    collections::HashMap,
    ops::{Range, RangeFrom, RangeFull, RangeTo},
};

use ether_chemicals::Chemicals;

use crate::MaterialError;

/// A range of positions with an optional step, following the usual
/// start/stop/step conventions for sequences.
///
/// Negative bounds count from the end, out-of-range bounds are clamped to
/// the sequence, and a negative step walks backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
}

impl Slice {
    /// Creates a slice from optional bounds and a step.
    ///
    /// A step of zero is accepted here but fails on use.
    #[must_use]
    pub fn new(start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        Self { start, stop, step }
    }

    /// Creates a slice covering every position.
    #[must_use]
    pub fn full() -> Self {
        Self::new(None, None, 1)
    }

    /// Returns the slice with a different step.
    #[must_use]
    pub fn step_by(self, step: isize) -> Self {
        Self { step, ..self }
    }

    /// Resolves the slice against a sequence of length `len`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::ZeroSliceStep`] if the step is zero.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>, MaterialError> {
        if self.step == 0 {
            return Err(MaterialError::ZeroSliceStep);
        }

        let len = to_isize(len);
        let (lower, upper) = if self.step > 0 {
            (0, len)
        } else {
            (-1, len - 1)
        };

        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let (default_start, default_stop) = if self.step > 0 {
            (lower, upper)
        } else {
            (upper, lower)
        };
        let start = self.start.map_or(default_start, clamp);
        let stop = self.stop.map_or(default_stop, clamp);

        let mut indices = Vec::new();
        let mut i = start;
        while (self.step > 0 && i < stop) || (self.step < 0 && i > stop) {
            // Bounds are clamped to `lower..=upper`, so `i` is a valid position.
            indices.push(i.unsigned_abs());
            i += self.step;
        }

        Ok(indices)
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::full()
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<Range<usize>> for Slice {
    fn from(range: Range<usize>) -> Self {
        Self::new(Some(to_isize(range.start)), Some(to_isize(range.end)), 1)
    }
}

impl From<RangeFrom<usize>> for Slice {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::new(Some(to_isize(range.start)), None, 1)
    }
}

impl From<RangeTo<usize>> for Slice {
    fn from(range: RangeTo<usize>) -> Self {
        Self::new(None, Some(to_isize(range.end)), 1)
    }
}

fn to_isize(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

/// Selects chemicals by identifier or by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChemicalKey<'a> {
    /// A single chemical; selects a scalar.
    ByIdentifier(&'a str),

    /// Several chemicals, in the order given.
    ByIdentifiers(&'a [&'a str]),

    /// A range of registry positions.
    BySlice(Slice),
}

impl ChemicalKey<'_> {
    pub(crate) fn resolve(&self, chemicals: &Chemicals) -> Result<Index, MaterialError> {
        let index = match self {
            Self::ByIdentifier(id) => Index::One(chemicals.index(id)?),
            Self::ByIdentifiers(ids) => Index::Many(chemicals.indices(ids.iter())?),
            Self::BySlice(slice) => Index::Many(slice.indices(chemicals.size())?),
        };
        log::trace!("resolved {self:?} to {index:?}");
        Ok(index)
    }
}

impl<'a> From<&'a str> for ChemicalKey<'a> {
    fn from(id: &'a str) -> Self {
        Self::ByIdentifier(id)
    }
}

impl<'a> From<&'a [&'a str]> for ChemicalKey<'a> {
    fn from(ids: &'a [&'a str]) -> Self {
        Self::ByIdentifiers(ids)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for ChemicalKey<'a> {
    fn from(ids: &'a [&'a str; N]) -> Self {
        Self::ByIdentifiers(ids)
    }
}

impl<'a> From<&'a Vec<&'a str>> for ChemicalKey<'a> {
    fn from(ids: &'a Vec<&'a str>) -> Self {
        Self::ByIdentifiers(ids)
    }
}

impl From<Slice> for ChemicalKey<'_> {
    fn from(slice: Slice) -> Self {
        Self::BySlice(slice)
    }
}

impl From<RangeFull> for ChemicalKey<'_> {
    fn from(range: RangeFull) -> Self {
        Self::BySlice(range.into())
    }
}

impl From<Range<usize>> for ChemicalKey<'_> {
    fn from(range: Range<usize>) -> Self {
        Self::BySlice(range.into())
    }
}

impl From<RangeFrom<usize>> for ChemicalKey<'_> {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::BySlice(range.into())
    }
}

impl From<RangeTo<usize>> for ChemicalKey<'_> {
    fn from(range: RangeTo<usize>) -> Self {
        Self::BySlice(range.into())
    }
}

/// Selects phases (rows) of multi-phase data by tag or by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKey<'a> {
    /// A single phase tag; selects one row.
    ByPhase(char),

    /// Each character is a phase tag, in the order given.
    ByPhases(&'a str),

    /// A range of row positions.
    BySlice(Slice),
}

impl PhaseKey<'_> {
    pub(crate) fn resolve(
        &self,
        phase_index: &HashMap<char, usize>,
        phase_count: usize,
    ) -> Result<Index, MaterialError> {
        let lookup = |phase: char| {
            phase_index
                .get(&phase)
                .copied()
                .ok_or(MaterialError::UndefinedPhase(phase))
        };

        let index = match self {
            Self::ByPhase(phase) => Index::One(lookup(*phase)?),
            Self::ByPhases(phases) => {
                Index::Many(phases.chars().map(lookup).collect::<Result<_, _>>()?)
            }
            Self::BySlice(slice) => Index::Many(slice.indices(phase_count)?),
        };
        log::trace!("resolved {self:?} to {index:?}");
        Ok(index)
    }
}

impl From<char> for PhaseKey<'_> {
    fn from(phase: char) -> Self {
        Self::ByPhase(phase)
    }
}

/// A one-character string selects a single phase, like [`PhaseKey::ByPhase`].
impl<'a> From<&'a str> for PhaseKey<'a> {
    fn from(phases: &'a str) -> Self {
        let mut chars = phases.chars();
        match (chars.next(), chars.next()) {
            (Some(phase), None) => Self::ByPhase(phase),
            _ => Self::ByPhases(phases),
        }
    }
}

impl From<Slice> for PhaseKey<'_> {
    fn from(slice: Slice) -> Self {
        Self::BySlice(slice)
    }
}

impl From<RangeFull> for PhaseKey<'_> {
    fn from(range: RangeFull) -> Self {
        Self::BySlice(range.into())
    }
}

impl From<Range<usize>> for PhaseKey<'_> {
    fn from(range: Range<usize>) -> Self {
        Self::BySlice(range.into())
    }
}

impl From<RangeFrom<usize>> for PhaseKey<'_> {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::BySlice(range.into())
    }
}

impl From<RangeTo<usize>> for PhaseKey<'_> {
    fn from(range: RangeTo<usize>) -> Self {
        Self::BySlice(range.into())
    }
}

/// Selects cells of multi-phase data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    /// Whole rows for the selected phases.
    ByPhase(PhaseKey<'a>),

    /// The selected chemicals within the selected phases.
    ByPhaseAndIdentifier(PhaseKey<'a>, ChemicalKey<'a>),
}

impl<'a> From<PhaseKey<'a>> for Key<'a> {
    fn from(phases: PhaseKey<'a>) -> Self {
        Self::ByPhase(phases)
    }
}

impl From<char> for Key<'_> {
    fn from(phase: char) -> Self {
        Self::ByPhase(phase.into())
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(phases: &'a str) -> Self {
        Self::ByPhase(phases.into())
    }
}

impl From<Slice> for Key<'_> {
    fn from(slice: Slice) -> Self {
        Self::ByPhase(slice.into())
    }
}

impl From<RangeFull> for Key<'_> {
    fn from(range: RangeFull) -> Self {
        Self::ByPhase(range.into())
    }
}

impl From<Range<usize>> for Key<'_> {
    fn from(range: Range<usize>) -> Self {
        Self::ByPhase(range.into())
    }
}

impl From<RangeFrom<usize>> for Key<'_> {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::ByPhase(range.into())
    }
}

impl From<RangeTo<usize>> for Key<'_> {
    fn from(range: RangeTo<usize>) -> Self {
        Self::ByPhase(range.into())
    }
}

impl<'a, P, C> From<(P, C)> for Key<'a>
where
    P: Into<PhaseKey<'a>>,
    C: Into<ChemicalKey<'a>>,
{
    fn from((phases, chemicals): (P, C)) -> Self {
        Self::ByPhaseAndIdentifier(phases.into(), chemicals.into())
    }
}

/// Resolved positions along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Index {
    /// A single position; the axis is dropped from the selection's shape.
    One(usize),
    /// Several positions; the axis is kept with this length.
    Many(Vec<usize>),
}

impl Index {
    pub(crate) fn positions(&self) -> &[usize] {
        match self {
            Self::One(i) => std::slice::from_ref(i),
            Self::Many(indices) => indices,
        }
    }

    /// Appends this axis' contribution to a selection shape.
    pub(crate) fn extend_shape(&self, shape: &mut Vec<usize>) {
        if let Self::Many(indices) = self {
            shape.push(indices.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_matches_sequence_conventions() -> Result<(), MaterialError> {
        let cases: [(Slice, Vec<usize>); 9] = [
            (Slice::full(), vec![0, 1, 2, 3, 4]),
            ((1..3).into(), vec![1, 2]),
            ((3..).into(), vec![3, 4]),
            ((..2).into(), vec![0, 1]),
            ((2..10).into(), vec![2, 3, 4]),
            (Slice::new(Some(-2), None, 1), vec![3, 4]),
            (Slice::full().step_by(2), vec![0, 2, 4]),
            (Slice::full().step_by(-1), vec![4, 3, 2, 1, 0]),
            (Slice::new(Some(3), Some(0), -2), vec![3, 1]),
        ];

        for (slice, expected) in cases {
            assert_eq!(slice.indices(5)?, expected, "slice {slice:?}");
        }

        Ok(())
    }

    #[test]
    fn empty_and_degenerate_slices() -> Result<(), MaterialError> {
        assert!(Slice::full().indices(0)?.is_empty());
        assert!(Slice::full().step_by(-1).indices(0)?.is_empty());
        assert!(Slice::from(3..1).indices(5)?.is_empty());
        assert!(Slice::new(Some(-10), Some(-8), 1).indices(5)?.is_empty());

        Ok(())
    }

    #[test]
    fn zero_step_fails() {
        assert_eq!(
            Slice::full().step_by(0).indices(3),
            Err(MaterialError::ZeroSliceStep)
        );
    }

    #[test]
    fn single_character_string_selects_one_phase() {
        assert_eq!(PhaseKey::from("l"), PhaseKey::ByPhase('l'));
        assert_eq!(PhaseKey::from("lg"), PhaseKey::ByPhases("lg"));
        assert_eq!(PhaseKey::from(""), PhaseKey::ByPhases(""));
    }

    #[test]
    fn phase_resolution_reports_the_offending_tag() {
        let phase_index = HashMap::from([('l', 0), ('g', 1)]);

        assert_eq!(
            PhaseKey::ByPhase('g').resolve(&phase_index, 2),
            Ok(Index::One(1))
        );
        assert_eq!(
            PhaseKey::ByPhases("gl").resolve(&phase_index, 2),
            Ok(Index::Many(vec![1, 0]))
        );
        assert_eq!(
            PhaseKey::ByPhase('s').resolve(&phase_index, 2),
            Err(MaterialError::UndefinedPhase('s'))
        );
        assert_eq!(
            PhaseKey::ByPhases("lsL").resolve(&phase_index, 2),
            Err(MaterialError::UndefinedPhase('s'))
        );
    }

    #[test]
    fn tuple_keys_convert_both_parts() {
        let ids = ["Water", "Ethanol"];

        assert_eq!(
            Key::from(("lg", &ids)),
            Key::ByPhaseAndIdentifier(
                PhaseKey::ByPhases("lg"),
                ChemicalKey::ByIdentifiers(&["Water", "Ethanol"]),
            )
        );
        assert_eq!(
            Key::from((.., "Water")),
            Key::ByPhaseAndIdentifier(
                PhaseKey::BySlice(Slice::full()),
                ChemicalKey::ByIdentifier("Water"),
            )
        );
    }

    #[test]
    fn ranges_select_phases() {
        assert_eq!(PhaseKey::from(..1), PhaseKey::BySlice(Slice::new(None, Some(1), 1)));
        assert_eq!(
            Key::from(..2),
            Key::ByPhase(PhaseKey::BySlice(Slice::new(None, Some(2), 1)))
        );
        assert_eq!(
            Key::from((..1, ..2)),
            Key::ByPhaseAndIdentifier(
                PhaseKey::BySlice(Slice::new(None, Some(1), 1)),
                ChemicalKey::BySlice(Slice::new(None, Some(2), 1)),
            )
        );
    }

    #[test]
    fn index_shapes() {
        let mut shape = Vec::new();
        Index::One(3).extend_shape(&mut shape);
        Index::Many(vec![0, 2]).extend_shape(&mut shape);

        assert_eq!(shape, vec![2]);
        assert_eq!(Index::One(3).positions(), &[3]);
    }
}
