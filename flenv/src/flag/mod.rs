//! Flag descriptors: one named, typed setting each.
//!
//! A [`Flag`] is a cheaply cloneable handle over shared descriptor state.
//! The registry keeps one clone for resolution; the caller keeps another
//! and reads the final value through it afterwards. Constraints
//! (required, default, placeholder) are enforced when they are declared:
//! conflicting combinations are programmer errors and panic immediately.

use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use crate::error::Error;

mod value;

pub use value::FlagType;

#[cfg(test)]
mod tests;

struct State<T: FlagType> {
    name: String,
    help: String,
    env_var: Option<String>,
    placeholder: String,
    default: Option<T>,
    required: bool,
    set: bool,
    value: Option<T>,
}

/// Handle to a single registered flag.
///
/// Obtained from the typed registration methods on
/// [`Registry`](crate::Registry). Chain constraint methods at
/// registration time, then read the resolved value back with
/// [`get`](Self::get) once [`Registry::resolve`](crate::Registry::resolve)
/// has run.
///
/// # Examples
///
/// ```
/// use flenv::Registry;
///
/// let mut registry = Registry::builder().build();
/// let retries = registry.integer("retries", "Attempts before giving up").default_value(3);
/// registry.resolve(["--retries=5"])?;
/// assert_eq!(retries.get(), Some(5));
/// # Ok::<(), flenv::Errors>(())
/// ```
pub struct Flag<T: FlagType> {
    state: Rc<RefCell<State<T>>>,
}

impl<T: FlagType> Clone for Flag<T> {
    fn clone(&self) -> Self {
        Self { state: Rc::clone(&self.state) }
    }
}

impl<T: FlagType> Flag<T> {
    pub(crate) fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                name: name.into(),
                help: help.into(),
                env_var: None,
                placeholder: T::PLACEHOLDER.to_owned(),
                default: None,
                required: false,
                set: false,
                value: None,
            })),
        }
    }

    /// Override the placeholder token shown in usage text.
    ///
    /// # Panics
    ///
    /// Panics for toggle flags, which carry no value placeholder.
    #[must_use]
    pub fn placeholder(self, placeholder: impl Into<String>) -> Self {
        let mut state = self.state.borrow_mut();
        assert!(
            !T::IS_TOGGLE,
            "flag --{}: a toggle flag has no value placeholder",
            state.name
        );
        state.placeholder = placeholder.into();
        drop(state);
        self
    }

    /// Configure a fallback value, used only when neither the environment
    /// nor the command line supplies one.
    ///
    /// # Panics
    ///
    /// Panics for toggle flags and for flags already marked required;
    /// those states are mutually exclusive.
    #[must_use]
    pub fn default_value(self, value: T) -> Self {
        let mut state = self.state.borrow_mut();
        assert!(
            !T::IS_TOGGLE,
            "flag --{}: a toggle flag cannot take a default value",
            state.name
        );
        assert!(
            !state.required,
            "flag --{}: a required flag cannot take a default value",
            state.name
        );
        state.default = Some(value);
        drop(state);
        self
    }

    /// Mark the flag as mandatory; resolution must set it from some source.
    ///
    /// # Panics
    ///
    /// Panics for toggle flags and for flags that already carry a default
    /// value; those states are mutually exclusive.
    #[must_use]
    pub fn required(self) -> Self {
        let mut state = self.state.borrow_mut();
        assert!(
            !T::IS_TOGGLE,
            "flag --{}: a toggle flag cannot be required",
            state.name
        );
        assert!(
            state.default.is_none(),
            "flag --{}: a flag with a default value cannot be required",
            state.name
        );
        state.required = true;
        drop(state);
        self
    }

    /// Override the environment variable consulted during the seed pass.
    ///
    /// An empty name disables the lookup entirely.
    #[must_use]
    pub fn env(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.state.borrow_mut().env_var = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// The flag's registered name.
    #[must_use]
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Clone of the current value, if any source has set one.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.state.borrow().value.clone()
    }

    /// Whether any source (default, environment, command line) has
    /// successfully written a value.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.state.borrow().set
    }

    /// Whether the flag was marked required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.state.borrow().required
    }

    /// `--name` for toggles, `--name=PLACEHOLDER` otherwise.
    #[must_use]
    pub fn short_description(&self) -> String {
        let state = self.state.borrow();
        if T::IS_TOGGLE {
            format!("--{}", state.name)
        } else {
            format!("--{}={}", state.name, state.placeholder)
        }
    }

    /// Two-column help line: the short form, a tab, then the help text
    /// with its qualifier (` (required)`, ` (default: …)` or nothing) and
    /// the ` [$ENVVAR]` suffix when an environment name is set.
    ///
    /// The tab is the column break the usage renderer aligns on.
    #[must_use]
    pub fn long_description(&self) -> String {
        let mut out = format!("  {}\t{}", self.short_description(), self.state.borrow().help);
        let state = self.state.borrow();
        if state.required {
            out.push_str(" (required)");
        } else if let Some(default) = &state.default {
            out.push_str(&format!(" (default: {})", default.format()));
        }
        if let Some(var) = &state.env_var {
            out.push_str(&format!(" [${var}]"));
        }
        out
    }

    fn store(&self, value: T) {
        let mut state = self.state.borrow_mut();
        state.value = Some(value);
        state.set = true;
    }

    pub(crate) fn set_from_string(&self, raw: &str) -> Result<(), Error> {
        match T::parse(raw) {
            Ok(value) => {
                self.store(value);
                Ok(())
            }
            Err(reason) => Err(Error::Parse {
                flag: self.name(),
                raw: raw.to_owned(),
                reason,
            }),
        }
    }

    pub(crate) fn set_from_env(&self) -> Result<(), Error> {
        let Some(var) = self.state.borrow().env_var.clone() else {
            return Ok(());
        };
        match env::var(&var) {
            Ok(raw) => self.set_from_string(&raw),
            Err(env::VarError::NotPresent) => Ok(()),
            Err(env::VarError::NotUnicode(_)) => Err(Error::Parse {
                flag: self.name(),
                raw: format!("${var}"),
                reason: "environment value is not valid Unicode".to_owned(),
            }),
        }
    }

    pub(crate) fn set_from_default(&self) {
        let default = self.state.borrow().default.clone();
        if let Some(value) = default {
            self.store(value);
        }
    }
}

/// Type-erased descriptor contract the registry resolves against.
pub(crate) trait Descriptor {
    fn name(&self) -> String;
    fn is_required(&self) -> bool;
    fn is_set(&self) -> bool;
    fn short_description(&self) -> String;
    fn long_description(&self) -> String;
    fn apply_default(&self);
    fn apply_env(&self) -> Result<(), Error>;
    fn apply_string(&self, raw: &str) -> Result<(), Error>;
}

impl<T: FlagType> Descriptor for Flag<T> {
    fn name(&self) -> String {
        Self::name(self)
    }

    fn is_required(&self) -> bool {
        Self::is_required(self)
    }

    fn is_set(&self) -> bool {
        Self::is_set(self)
    }

    fn short_description(&self) -> String {
        Self::short_description(self)
    }

    fn long_description(&self) -> String {
        Self::long_description(self)
    }

    fn apply_default(&self) {
        self.set_from_default();
    }

    fn apply_env(&self) -> Result<(), Error> {
        self.set_from_env()
    }

    fn apply_string(&self, raw: &str) -> Result<(), Error> {
        self.set_from_string(raw)
    }
}
