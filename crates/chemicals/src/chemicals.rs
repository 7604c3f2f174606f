use indexmap::IndexSet;

use crate::ChemicalsError;

/// An ordered set of chemical identifiers.
///
/// The position of an identifier in the registry is its column in every
/// array aligned to this registry.
/// Identifiers are unique and the order never changes after construction.
///
/// # Example
///
/// ```
/// use ether_chemicals::Chemicals;
///
/// let chemicals = Chemicals::new(["Water", "Ethanol", "Methane"]).unwrap();
///
/// assert_eq!(chemicals.size(), 3);
/// assert_eq!(chemicals.index("Ethanol").unwrap(), 1);
/// assert_eq!(chemicals.indices(["Methane", "Water"]).unwrap(), vec![2, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<String>", into = "Vec<String>")
)]
pub struct Chemicals {
    ids: IndexSet<String>,
}

impl Chemicals {
    /// Creates a registry from identifiers in their canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`ChemicalsError::DuplicateId`] if an identifier is repeated.
    pub fn new<I, S>(ids: I) -> Result<Self, ChemicalsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for id in ids {
            let id = id.into();
            if set.contains(&id) {
                return Err(ChemicalsError::DuplicateId(id));
            }
            set.insert(id);
        }

        log::debug!("created chemical registry with {} chemicals", set.len());
        Ok(Self { ids: set })
    }

    /// Returns the number of chemicals in the registry.
    #[must_use]
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the registry has no chemicals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the identifiers in canonical order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.iter().collect()
    }

    /// Iterates over the identifiers in canonical order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    /// Returns the identifier at the given position, if any.
    #[must_use]
    pub fn id(&self, index: usize) -> Option<&str> {
        self.ids.get_index(index).map(String::as_str)
    }

    /// Returns `true` if the identifier is part of the registry.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns the position of a chemical.
    ///
    /// # Errors
    ///
    /// Returns [`ChemicalsError::UnknownId`] if the identifier is not defined.
    pub fn index(&self, id: &str) -> Result<usize, ChemicalsError> {
        self.ids
            .get_index_of(id)
            .ok_or_else(|| ChemicalsError::UnknownId(id.to_owned()))
    }

    /// Returns the positions of several chemicals, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`ChemicalsError::UnknownId`] for the first identifier that is
    /// not defined.
    pub fn indices<I, S>(&self, ids: I) -> Result<Vec<usize>, ChemicalsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter().map(|id| self.index(id.as_ref())).collect()
    }
}

impl<'a> IntoIterator for &'a Chemicals {
    type Item = &'a str;
    type IntoIter = std::iter::Map<indexmap::set::Iter<'a, String>, fn(&String) -> &str>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().map(String::as_str as fn(&String) -> &str)
    }
}

impl TryFrom<Vec<String>> for Chemicals {
    type Error = ChemicalsError;

    fn try_from(ids: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(ids)
    }
}

impl From<Chemicals> for Vec<String> {
    fn from(chemicals: Chemicals) -> Self {
        chemicals.ids.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_ethanol_methane() -> Chemicals {
        Chemicals::new(["Water", "Ethanol", "Methane"]).unwrap()
    }

    #[test]
    fn preserves_definition_order() {
        let chemicals = water_ethanol_methane();

        assert_eq!(chemicals.size(), 3);
        assert_eq!(chemicals.ids(), vec!["Water", "Ethanol", "Methane"]);
        assert_eq!(chemicals.id(2), Some("Methane"));
        assert_eq!(chemicals.id(3), None);
    }

    #[test]
    fn rejects_duplicates() {
        let result = Chemicals::new(["Water", "Ethanol", "Water"]);

        assert_eq!(result, Err(ChemicalsError::DuplicateId("Water".into())));
    }

    #[test]
    fn resolves_indices_in_input_order() -> Result<(), ChemicalsError> {
        let chemicals = water_ethanol_methane();

        assert_eq!(chemicals.index("Water")?, 0);
        assert_eq!(chemicals.indices(["Methane", "Water", "Ethanol"])?, vec![2, 0, 1]);
        assert_eq!(chemicals.indices(Vec::<String>::new())?, Vec::<usize>::new());

        Ok(())
    }

    #[test]
    fn unknown_identifiers_fail() {
        let chemicals = water_ethanol_methane();

        assert_eq!(
            chemicals.index("Argon"),
            Err(ChemicalsError::UnknownId("Argon".into()))
        );
        assert_eq!(
            chemicals.indices(["Water", "Argon", "Helium"]),
            Err(ChemicalsError::UnknownId("Argon".into()))
        );
    }

    #[test]
    fn empty_registry() -> Result<(), ChemicalsError> {
        let chemicals = Chemicals::new(Vec::<String>::new())?;

        assert!(chemicals.is_empty());
        assert_eq!(chemicals.size(), 0);

        Ok(())
    }

    #[test]
    fn iterates_by_reference() {
        let chemicals = water_ethanol_methane();
        let lengths: Vec<usize> = (&chemicals).into_iter().map(str::len).collect();

        assert_eq!(lengths, vec![5, 7, 7]);
        assert!(chemicals.contains("Methane"));
        assert!(!chemicals.contains("methane"));
    }
}
