//! Fluent construction of registry-wide settings.
//!
//! Everything configured here is fixed for the life of the registry:
//! environment-name derivation, the help and version flag names, and the
//! application identity used by the usage renderer.

use std::collections::HashMap;

use crate::flag::Flag;

use super::Registry;

/// Builder for [`Registry`].
///
/// # Examples
///
/// ```
/// use flenv::Registry;
///
/// let registry = Registry::builder()
///     .app_name("demo")
///     .version("1.2.3")
///     .env_prefix("DEMO_")
///     .build();
/// assert!(!registry.help_requested());
/// ```
pub struct Builder {
    app_name: Option<String>,
    version: Option<String>,
    env_prefix: String,
    env_formatter: Box<dyn Fn(&str) -> String>,
    auto_env: bool,
    help_flag_name: String,
    version_flag_name: String,
}

fn default_env_formatter(name: &str) -> String {
    name.to_ascii_uppercase().replace('-', "_")
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            app_name: None,
            version: None,
            env_prefix: String::new(),
            env_formatter: Box::new(default_env_formatter),
            auto_env: true,
            help_flag_name: "help".to_owned(),
            version_flag_name: "version".to_owned(),
        }
    }

    /// Application name shown in the usage line. Defaults to `argv[0]`.
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Version string. Configuring one auto-registers the version toggle.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Prefix prepended to every derived environment variable name.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Replace the default derivation (uppercase, `-` to `_`) of
    /// environment variable names from flag names.
    #[must_use]
    pub fn env_formatter(mut self, formatter: impl Fn(&str) -> String + 'static) -> Self {
        self.env_formatter = Box::new(formatter);
        self
    }

    /// Enable or disable automatic environment-name derivation for
    /// registered flags. On by default.
    #[must_use]
    pub fn auto_env(mut self, enabled: bool) -> Self {
        self.auto_env = enabled;
        self
    }

    /// Rename the auto-registered help toggle (default `help`).
    #[must_use]
    pub fn help_flag_name(mut self, name: impl Into<String>) -> Self {
        self.help_flag_name = name.into();
        self
    }

    /// Rename the version toggle (default `version`).
    #[must_use]
    pub fn version_flag_name(mut self, name: impl Into<String>) -> Self {
        self.version_flag_name = name.into();
        self
    }

    /// Finish construction, registering the help toggle and, when a
    /// version string was configured, the version toggle.
    #[must_use]
    pub fn build(self) -> Registry {
        let help = Flag::<bool>::new(self.help_flag_name.clone(), "Show help message");
        let version_toggle = self
            .version
            .is_some()
            .then(|| Flag::<bool>::new(self.version_flag_name.clone(), "Show application version"));

        let mut registry = Registry {
            descriptors: Vec::new(),
            index: HashMap::new(),
            app_name: self.app_name,
            version: self.version,
            env_prefix: self.env_prefix,
            env_formatter: self.env_formatter,
            auto_env: self.auto_env,
            help_flag_name: self.help_flag_name.clone(),
            help: help.clone(),
            version_toggle: version_toggle.clone(),
        };

        registry.register(self.help_flag_name, Box::new(help));
        if let Some(toggle) = version_toggle {
            registry.register(self.version_flag_name, Box::new(toggle));
        }

        registry
    }
}
