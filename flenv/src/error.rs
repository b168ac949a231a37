//! Error types produced by a resolution pass.
//!
//! Everything here is recoverable from the caller's point of view:
//! per-token and per-flag failures are collected into an [`Errors`]
//! aggregation and returned at the end of the pass. Configuration
//! mistakes (conflicting constraints, duplicate registration) are
//! programmer errors and panic at construction time instead.

use std::fmt;

use thiserror::Error;

/// A single failure observed while resolving flag values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A raw value could not be converted to the flag's type, whether it
    /// came from the command line or the environment.
    #[error("invalid value {raw:?} for flag --{flag}: {reason}")]
    Parse {
        /// Name of the flag the value was destined for.
        flag: String,
        /// The offending raw text.
        raw: String,
        /// Type-specific explanation of the failure.
        reason: String,
    },

    /// A `--name` token referenced a name missing from the registry.
    #[error("unknown flag: --{name}")]
    UnknownFlag {
        /// The unrecognised flag name.
        name: String,
    },

    /// A bare token without the flag marker. Halts tokenization.
    #[error("unexpected argument: {token}")]
    UnexpectedArgument {
        /// The offending token.
        token: String,
    },

    /// Tokens found after the `--` end-of-flags marker. Halts tokenization.
    #[error("unexpected arguments: {tokens}")]
    TrailingArguments {
        /// The space-joined trailing tokens.
        tokens: String,
    },

    /// A required flag was never set by any source.
    #[error("missing required flag: --{name}")]
    MissingRequired {
        /// Name of the unsatisfied flag.
        name: String,
    },
}

/// Collection of [`Error`]s produced during a single resolution pass.
///
/// Preserves encounter order: seed-pass (environment) failures first,
/// then tokenize-pass failures left to right.
///
/// # Examples
///
/// ```
/// use flenv::Registry;
///
/// let mut registry = Registry::builder().build();
/// let errs = registry
///     .resolve(["--nope"])
///     .expect_err("unknown flag must be reported");
/// assert_eq!(errs.len(), 1);
/// assert_eq!(errs.to_string(), "unknown flag: --nope");
/// ```
#[derive(Debug, Default)]
pub struct Errors(Vec<Error>);

impl Errors {
    /// Create an aggregation from already-collected errors.
    #[must_use]
    pub const fn new(errors: Vec<Error>) -> Self {
        Self(errors)
    }

    pub(crate) fn push(&mut self, error: Error) {
        self.0.push(error);
    }

    /// Convert into `Err(self)` when any error was collected.
    pub(crate) fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Iterate over the contained errors in encounter order.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.0.iter()
    }

    /// Number of collected errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
