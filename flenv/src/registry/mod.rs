//! Flag registry and the resolution engine.
//!
//! The registry owns an insertion-ordered collection of type-erased
//! descriptors plus a name index. One resolution pass layers the three
//! value sources: defaults seed first, environment values overwrite
//! them, and command-line tokens overwrite both. Per-flag failures are
//! collected and reported together; only grammar violations (a bare
//! positional token, or trailing tokens after `--`) halt tokenization.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Errors};
use crate::flag::{Descriptor, Flag, FlagType};

mod builder;
mod usage;

pub use builder::Builder;
pub use usage::RunOutcome;


const FLAG_MARKER: &str = "--";

/// Ordered collection of flags and the engine that resolves their values.
///
/// # Examples
///
/// ```
/// use flenv::Registry;
///
/// let mut registry = Registry::builder().app_name("demo").build();
/// let verbose = registry.toggle("verbose", "Enable verbose output");
/// let count = registry.integer("count", "Worker count").default_value(4);
///
/// registry.resolve(["--verbose", "--count", "8"])?;
/// assert!(verbose.get().unwrap_or(false));
/// assert_eq!(count.get(), Some(8));
/// # Ok::<(), flenv::Errors>(())
/// ```
pub struct Registry {
    descriptors: Vec<Box<dyn Descriptor>>,
    index: HashMap<String, usize>,

    app_name: Option<String>,
    version: Option<String>,
    env_prefix: String,
    env_formatter: Box<dyn Fn(&str) -> String>,
    auto_env: bool,
    help_flag_name: String,

    help: Flag<bool>,
    version_toggle: Option<Flag<bool>>,
}

impl Registry {
    /// Start configuring a registry.
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// A registry with default settings (auto-derived environment names,
    /// `--help` toggle, no version flag).
    #[must_use]
    pub fn new() -> Self {
        Builder::new().build()
    }

    /// Register a flag of any [`FlagType`].
    ///
    /// When auto-derivation is enabled (the default), the flag is given
    /// the environment name `prefix + formatter(name)`.
    ///
    /// # Panics
    ///
    /// Panics if a flag with the same name is already registered.
    pub fn flag<T: FlagType>(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
    ) -> Flag<T> {
        let name = name.into();
        let flag = Flag::<T>::new(name.clone(), help);
        self.register(name.clone(), Box::new(flag.clone()));
        if self.auto_env {
            let var = format!("{}{}", self.env_prefix, (self.env_formatter)(&name));
            flag.env(var)
        } else {
            flag
        }
    }

    /// Register a boolean toggle, set by bare `--name` presence.
    ///
    /// # Panics
    ///
    /// Panics if a flag with the same name is already registered.
    pub fn toggle(&mut self, name: impl Into<String>, help: impl Into<String>) -> Flag<bool> {
        self.flag(name, help)
    }

    /// Register a 64-bit integer flag.
    ///
    /// # Panics
    ///
    /// Panics if a flag with the same name is already registered.
    pub fn integer(&mut self, name: impl Into<String>, help: impl Into<String>) -> Flag<i64> {
        self.flag(name, help)
    }

    /// Register a 64-bit floating-point flag.
    ///
    /// # Panics
    ///
    /// Panics if a flag with the same name is already registered.
    pub fn float(&mut self, name: impl Into<String>, help: impl Into<String>) -> Flag<f64> {
        self.flag(name, help)
    }

    /// Register a duration flag accepting magnitude-plus-unit values such
    /// as `300ms` or `2h45m`.
    ///
    /// # Panics
    ///
    /// Panics if a flag with the same name is already registered.
    pub fn duration(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
    ) -> Flag<Duration> {
        self.flag(name, help)
    }

    /// Register a string flag.
    ///
    /// # Panics
    ///
    /// Panics if a flag with the same name is already registered.
    pub fn string(&mut self, name: impl Into<String>, help: impl Into<String>) -> Flag<String> {
        self.flag(name, help)
    }

    /// Register a URL flag, validated on parse.
    ///
    /// # Panics
    ///
    /// Panics if a flag with the same name is already registered.
    pub fn url(&mut self, name: impl Into<String>, help: impl Into<String>) -> Flag<Url> {
        self.flag(name, help)
    }

    pub(crate) fn register(&mut self, name: String, descriptor: Box<dyn Descriptor>) {
        assert!(
            !self.index.contains_key(&name),
            "flag with name {name} is already registered"
        );
        self.index.insert(name, self.descriptors.len());
        self.descriptors.push(descriptor);
    }

    /// Run one resolution pass over `args`.
    ///
    /// Defaults seed every flag first, then environment values, then the
    /// command-line tokens. All failures are aggregated; tokenization
    /// halts early only on grammar violations.
    ///
    /// # Errors
    ///
    /// Returns every [`Error`] collected during the pass, seed-pass
    /// failures first, then tokenize-pass failures in encounter order.
    pub fn resolve<I, S>(&mut self, args: I) -> Result<(), Errors>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errs = Errors::default();

        for descriptor in &self.descriptors {
            descriptor.apply_default();
            if let Err(err) = descriptor.apply_env() {
                warn!(flag = %descriptor.name(), %err, "environment value rejected");
                errs.push(err);
            }
        }
        debug!(flags = self.descriptors.len(), "seeded defaults and environment");

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut tokens = args.into_iter().peekable();
        while let Some(token) = tokens.next() {
            let Some(body) = token.strip_prefix(FLAG_MARKER) else {
                errs.push(Error::UnexpectedArgument { token });
                return errs.into_result();
            };

            if body.is_empty() {
                // end of flags
                let rest: Vec<String> = tokens.collect();
                if !rest.is_empty() {
                    errs.push(Error::TrailingArguments { tokens: rest.join(" ") });
                }
                return errs.into_result();
            }

            if let Some((name, value)) = body.split_once('=') {
                if let Err(err) = self.assign(name, value) {
                    errs.push(err);
                }
                continue;
            }

            let follows_value = tokens
                .peek()
                .is_some_and(|next| !next.starts_with(FLAG_MARKER));
            let result = if follows_value {
                let value = tokens.next().unwrap_or_default();
                self.assign(body, &value)
            } else {
                // bare flag, treated as a toggle
                self.assign(body, "true")
            };
            if let Err(err) = result {
                errs.push(err);
            }
        }

        errs.into_result()
    }

    fn assign(&self, name: &str, raw: &str) -> Result<(), Error> {
        match self.index.get(name).and_then(|&i| self.descriptors.get(i)) {
            Some(descriptor) => descriptor.apply_string(raw),
            None => Err(Error::UnknownFlag { name: name.to_owned() }),
        }
    }

    /// Verify that every required flag was set by some source.
    ///
    /// Run this after [`resolve`](Self::resolve) succeeds and after the
    /// help/version toggles have been checked.
    ///
    /// # Errors
    ///
    /// Returns one [`Error::MissingRequired`] per unsatisfied flag, in
    /// registration order.
    pub fn check_required(&self) -> Result<(), Errors> {
        let mut errs = Errors::default();
        for descriptor in &self.descriptors {
            if descriptor.is_required() && !descriptor.is_set() {
                errs.push(Error::MissingRequired { name: descriptor.name() });
            }
        }
        errs.into_result()
    }

    /// Whether the auto-registered help toggle was set.
    #[must_use]
    pub fn help_requested(&self) -> bool {
        self.help.get().unwrap_or(false)
    }

    /// Whether the version toggle was set. Always false when no version
    /// string was configured.
    #[must_use]
    pub fn version_requested(&self) -> bool {
        self.version_toggle
            .as_ref()
            .is_some_and(|flag| flag.get().unwrap_or(false))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
