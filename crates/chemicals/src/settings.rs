use std::sync::Arc;

use crate::{Chemicals, SettingsError};

/// Process-level settings shared by an application.
///
/// `Settings` holds the default [`Chemicals`] registry used when a caller
/// does not provide one.
/// It is created and owned by the application and read at the call boundary,
/// so data containers only ever receive a resolved registry.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ether_chemicals::{Chemicals, Settings};
///
/// let chemicals = Arc::new(Chemicals::new(["Water", "Ethanol"]).unwrap());
/// let settings = Settings::default().with_default_chemicals(Arc::clone(&chemicals));
///
/// let resolved = settings.get_default_chemicals(None).unwrap();
/// assert!(Arc::ptr_eq(&resolved, &chemicals));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Settings {
    default_chemicals: Option<Arc<Chemicals>>,
}

impl Settings {
    /// Returns these settings with the given default registry.
    #[must_use]
    pub fn with_default_chemicals(mut self, chemicals: Arc<Chemicals>) -> Self {
        self.set_default_chemicals(chemicals);
        self
    }

    /// Sets the default registry.
    pub fn set_default_chemicals(&mut self, chemicals: Arc<Chemicals>) {
        log::debug!("default chemicals set ({} chemicals)", chemicals.size());
        self.default_chemicals = Some(chemicals);
    }

    /// Returns the default registry, if one has been set.
    #[must_use]
    pub fn default_chemicals(&self) -> Option<&Arc<Chemicals>> {
        self.default_chemicals.as_ref()
    }

    /// Resolves the registry to use for a new container.
    ///
    /// Returns the given registry when present, otherwise the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoDefaultChemicals`] if no registry is given
    /// and no default has been set.
    pub fn get_default_chemicals(
        &self,
        chemicals: Option<&Arc<Chemicals>>,
    ) -> Result<Arc<Chemicals>, SettingsError> {
        chemicals
            .or(self.default_chemicals.as_ref())
            .map(Arc::clone)
            .ok_or(SettingsError::NoDefaultChemicals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(ids: &[&str]) -> Arc<Chemicals> {
        Arc::new(Chemicals::new(ids.iter().copied()).unwrap())
    }

    #[test]
    fn without_default_fails() {
        let settings = Settings::default();

        assert!(settings.default_chemicals().is_none());
        assert_eq!(
            settings.get_default_chemicals(None),
            Err(SettingsError::NoDefaultChemicals)
        );
    }

    #[test]
    fn given_registry_wins_over_default() -> Result<(), SettingsError> {
        let default = registry(&["Water"]);
        let given = registry(&["Methane", "Ethane"]);
        let settings = Settings::default().with_default_chemicals(default);

        let resolved = settings.get_default_chemicals(Some(&given))?;
        assert!(Arc::ptr_eq(&resolved, &given));

        Ok(())
    }

    #[test]
    fn falls_back_to_shared_default() -> Result<(), SettingsError> {
        let default = registry(&["Water", "Ethanol"]);
        let mut settings = Settings::default();
        settings.set_default_chemicals(Arc::clone(&default));

        let first = settings.get_default_chemicals(None)?;
        let second = settings.get_default_chemicals(None)?;
        assert!(Arc::ptr_eq(&first, &default));
        assert!(Arc::ptr_eq(&first, &second));

        Ok(())
    }
}
