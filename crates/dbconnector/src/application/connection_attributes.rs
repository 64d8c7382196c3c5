//! Named accessors for the four connection settings.
//!
//! Connection-facing types implement [`ConnectionAttributes`] by exposing
//! their resolver; they get `driver()` / `set_driver()` and friends for free.
//! The accessors add no behaviour beyond forwarding, except that every write
//! that changed the in-memory value fires the
//! [`parameters_changed`](ConnectionAttributes::parameters_changed) hook so
//! the implementor can rebuild whatever it derives from the settings.

use dbconnector_core::SettingName;

use crate::application::error::AttributeError;
use crate::application::resolver::AttributeResolver;
use crate::application::store::AttributeStore;

pub trait ConnectionAttributes {
    type Store: AttributeStore;

    fn resolver(&self) -> &AttributeResolver<Self::Store>;

    fn resolver_mut(&mut self) -> &mut AttributeResolver<Self::Store>;

    /// Notification point invoked after the settings changed in memory.
    fn parameters_changed(&mut self) {}

    fn driver(&self) -> &str {
        self.resolver().value(SettingName::Driver)
    }

    fn set_driver(&mut self, value: impl Into<String>) -> Result<(), AttributeError> {
        self.set_setting(SettingName::Driver, value)
    }

    fn host(&self) -> &str {
        self.resolver().value(SettingName::Host)
    }

    fn set_host(&mut self, value: impl Into<String>) -> Result<(), AttributeError> {
        self.set_setting(SettingName::Host, value)
    }

    fn db_name(&self) -> &str {
        self.resolver().value(SettingName::DbName)
    }

    fn set_db_name(&mut self, value: impl Into<String>) -> Result<(), AttributeError> {
        self.set_setting(SettingName::DbName, value)
    }

    fn win_auth(&self) -> &str {
        self.resolver().value(SettingName::WinAuth)
    }

    fn set_win_auth(&mut self, value: impl Into<String>) -> Result<(), AttributeError> {
        self.set_setting(SettingName::WinAuth, value)
    }

    /// Writes one setting through the resolver.
    ///
    /// A store failure still fires the hook: the resolver has already applied
    /// the value in memory by the time persistence is attempted.
    fn set_setting(
        &mut self,
        name: SettingName,
        value: impl Into<String>,
    ) -> Result<(), AttributeError> {
        let result = self.resolver_mut().set(name.as_str(), value);
        if matches!(result, Ok(()) | Err(AttributeError::Store(_))) {
            self.parameters_changed();
        }
        result
    }

    /// Resets every setting to its default; see
    /// [`AttributeResolver::reset_to_defaults`].
    fn reset_to_defaults(&mut self) -> Result<(), AttributeError> {
        let result = self.resolver_mut().reset_to_defaults();
        if matches!(result, Ok(()) | Err(AttributeError::Store(_))) {
            self.parameters_changed();
        }
        result
    }
}
