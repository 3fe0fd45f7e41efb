//! Dark-mode preference persisted under `theme-preference`.

use crate::domain::StoreWriteError;
use crate::ports::KvStore;
use crate::store::{DurableStore, THEME_KEY};

#[derive(Debug, Clone)]
pub struct ThemePreference<S> {
    store: DurableStore<S>,
}

impl<S: KvStore> ThemePreference<S> {
    pub fn new(store: DurableStore<S>) -> Self {
        Self { store }
    }

    /// Light mode unless a `true` flag was stored.
    pub fn is_dark(&self) -> bool {
        self.store.read(THEME_KEY, false)
    }

    pub fn set_dark(&self, dark: bool) -> Result<(), StoreWriteError> {
        self.store.write(THEME_KEY, &dark)
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> Result<bool, StoreWriteError> {
        let next = !self.is_dark();
        self.set_dark(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryKvStore;

    #[test]
    fn defaults_to_light() {
        let theme = ThemePreference::new(DurableStore::new(InMemoryKvStore::new()));
        assert!(!theme.is_dark());
    }

    #[test]
    fn toggle_persists() {
        let medium = InMemoryKvStore::new();
        let theme = ThemePreference::new(DurableStore::new(medium.clone()));

        assert!(theme.toggle().unwrap());
        assert_eq!(medium.raw(THEME_KEY).as_deref(), Some("true"));
        assert!(!theme.toggle().unwrap());
        assert!(!theme.is_dark());
    }

    #[test]
    fn corrupted_flag_reads_as_light() {
        let medium = InMemoryKvStore::new().with_entry(THEME_KEY, "yes please");
        let theme = ThemePreference::new(DurableStore::new(medium));
        assert!(!theme.is_dark());
    }

    #[test]
    fn failed_toggle_reports_error() {
        let medium = InMemoryKvStore::new();
        medium.fail_writes(true);
        let theme = ThemePreference::new(DurableStore::new(medium));

        assert!(theme.toggle().is_err());
        assert!(!theme.is_dark());
    }
}
